//! Text and table output formatting for entries.

use std::io::IsTerminal;

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use diary_core::Entry;
use owo_colors::OwoColorize;

/// Widest summary shown in a table row.
const SUMMARY_WIDTH: usize = 60;

/// Print each entry as its date line followed by its content.
pub fn print_entries(entries: &[Entry], quiet: bool) {
    if entries.is_empty() {
        if !quiet {
            println!("No entries.");
        }
        return;
    }

    let color = use_color();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            println!();
        }
        if color {
            println!("{}", entry.date.bold());
        } else {
            println!("{}", entry.date);
        }
        print!("{}", entry.content);
    }
}

/// Print a date / first-line table of entries.
///
/// Quiet mode drops the header and borders: one tab-separated row per entry.
pub fn print_entry_table(entries: &[Entry], quiet: bool) {
    if quiet {
        for entry in entries {
            println!("{}\t{}", entry.date, truncate(entry.summary(), SUMMARY_WIDTH));
        }
        return;
    }
    if entries.is_empty() {
        println!("No entries.");
        return;
    }
    println!("{}", entry_table(entries, use_color()));
}

fn entry_table(entries: &[Entry], color: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let header: Vec<Cell> = ["Date", "Entry"]
        .iter()
        .map(|title| {
            let cell = Cell::new(title);
            if color {
                cell.add_attribute(Attribute::Dim)
            } else {
                cell
            }
        })
        .collect();
    table.set_header(header);

    for entry in entries {
        table.add_row(vec![
            entry.date.clone(),
            truncate(entry.summary(), SUMMARY_WIDTH),
        ]);
    }
    for i in 0..2 {
        if let Some(column) = table.column_mut(i) {
            column.set_padding((0, 2));
        }
    }
    table
}

fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Truncate to `max_len` characters, marking the cut with an ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}
