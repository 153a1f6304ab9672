//! Storage abstraction for Diary.
//!
//! This module defines the `StorageEngine` trait and the directory-backed
//! journal that implements it.
//!
//! ## Layout
//!
//! A journal is a directory holding one envelope file per entry. Files are
//! created once and never rewritten; the directory is the source of truth
//! and the in-memory collection is rebuilt from it on every load.
//!
//! ## Security
//!
//! - Entries are sealed with the public key only, so writing never needs
//!   the passphrase
//! - Loading is fail-closed by default: one unreadable envelope aborts the
//!   load and exposes nothing
//! - New envelopes appear atomically

pub mod journal;
pub mod traits;
pub mod types;

// Re-export public types
pub use journal::{append, append_at, entry_path, load_all, EnvelopeJournal, ENTRY_EXTENSION};
pub use traits::StorageEngine;
pub use types::{sort_newest_first, Entry};
