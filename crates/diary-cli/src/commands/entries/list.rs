use diary_core::StorageEngine;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::constants::DEFAULT_LIST_LIMIT;
use crate::output::print_entry_table;

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let journal = ctx.open_journal(args.no_input)?;
    let entries = journal.entries()?;

    let limit = args.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(entries.len());
    print_entry_table(&entries[..limit], ctx.quiet());

    if !ctx.quiet() && limit < entries.len() {
        eprintln!(
            "Showing {} of {} entries. Use --limit to see more.",
            limit,
            entries.len()
        );
    }
    Ok(())
}
