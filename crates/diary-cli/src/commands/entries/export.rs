use diary_core::StorageEngine;

use crate::app::AppContext;
use crate::cli::{ExportArgs, ExportFormat};
use crate::output::{print_entries_json, print_entries_jsonl};

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let journal = ctx.open_journal(args.no_input)?;
    let entries = journal.entries()?;
    match args.format {
        ExportFormat::Json => print_entries_json(entries),
        ExportFormat::Jsonl => print_entries_jsonl(entries),
    }
}
