//! Application-level utilities for the Diary CLI.
//!
//! This module provides:
//! - Config file and journal path resolution
//! - Passphrase handling with retry logic

mod context;
mod passphrase;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use passphrase::load_journal_with_retry;
