//! Output formatting helpers for the CLI.
//!
//! Entries are printed as readable text, as a table, or as JSON.

mod json;
mod text;

// Re-export public API
pub use json::{print_entries_json, print_entries_jsonl};
pub use text::{print_entries, print_entry_table};
