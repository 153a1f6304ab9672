//! # Diary Core
//!
//! Core library for Diary - a local, encrypted personal journal.
//!
//! Each entry lives in its own file, sealed with hybrid encryption so that
//! writing needs only the journal's public key and reading needs the
//! passphrase-protected private key.
//!
//! ## Architecture
//!
//! - **crypto**: Envelope layout, key loading, and per-entry seal/open
//! - **storage**: Journal directory loading, ordering, and appending
//! - **config**: Explicit journal configuration (paths and policies)
//! - **fs**: Atomic file creation

pub mod config;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod storage;

pub use config::{JournalConfig, KeyWrap, LoadPolicy};
pub use error::{DiaryError, Result};
pub use storage::{Entry, EnvelopeJournal, StorageEngine};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
