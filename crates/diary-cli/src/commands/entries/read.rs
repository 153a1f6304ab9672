use diary_core::StorageEngine;

use crate::app::AppContext;
use crate::cli::ReadArgs;
use crate::output::{print_entries, print_entries_json};

pub fn handle_read(ctx: &AppContext, args: &ReadArgs) -> anyhow::Result<()> {
    let journal = ctx.open_journal(args.no_input)?;
    let entries = journal.entries()?;
    let shown = &entries[..args.limit.unwrap_or(entries.len()).min(entries.len())];

    if args.json {
        print_entries_json(shown)
    } else {
        print_entries(shown, ctx.quiet());
        Ok(())
    }
}
