//! Storage engine trait definition.
//!
//! The `StorageEngine` trait is the seam between the journal's lifecycle
//! (unloaded, then loaded) and whoever presents it. Presentation code reads
//! the ordered entries and appends new ones; it never reorders or edits them.

use super::types::Entry;
use crate::crypto::Passphrase;
use crate::error::Result;

/// Storage engine interface for an encrypted journal.
///
/// All implementations must ensure:
/// - Data is encrypted at rest
/// - Entries are append-only; stored entries are never rewritten
/// - A failed load exposes no entries
pub trait StorageEngine {
    /// Decrypt every stored entry and hold them newest first.
    ///
    /// This is the only transition from unloaded to loaded. The passphrase
    /// is consumed and zeroized before this returns, on success or failure.
    ///
    /// # Errors
    ///
    /// Returns the first failure encountered under the strict policy. After
    /// an error the store is unloaded.
    fn load(&mut self, passphrase: Passphrase) -> Result<&[Entry]>;

    /// Whether `load` has completed successfully.
    fn is_loaded(&self) -> bool;

    /// The loaded entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::NotLoaded` before a successful `load`.
    fn entries(&self) -> Result<&[Entry]>;

    /// Seal and persist a new entry, then insert it at the front.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::NotLoaded` before a successful `load`, or the
    /// seal/write failure. On error the in-memory entries are unchanged.
    fn append(&mut self, content: &str) -> Result<&Entry>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_dyn(_engine: &mut dyn StorageEngine) {}
    }
}
