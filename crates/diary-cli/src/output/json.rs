//! JSON output formatting for entries.

use diary_core::Entry;

/// Print entries as one pretty-printed JSON array.
pub fn print_entries_json(entries: &[Entry]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(entries)?);
    Ok(())
}

/// Print entries as one compact JSON object per line.
pub fn print_entries_jsonl(entries: &[Entry]) -> anyhow::Result<()> {
    for entry in entries {
        println!("{}", serde_json::to_string(entry)?);
    }
    Ok(())
}
