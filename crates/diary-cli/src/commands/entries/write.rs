use diary_core::storage::append;

use crate::app::AppContext;
use crate::cli::WriteArgs;
use crate::errors::CliError;
use crate::helpers::read_entry_body;

pub fn handle_write(ctx: &AppContext, args: &WriteArgs) -> anyhow::Result<()> {
    let body = read_entry_body(args.text.clone(), args.no_input, ctx.editor()?)?;

    let entry_dir = ctx.entry_dir()?;
    if !entry_dir.exists() {
        std::fs::create_dir_all(entry_dir).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create entry directory {}: {}",
                entry_dir.display(),
                e
            )
        })?;
        tracing::info!(dir = %entry_dir.display(), "created entry directory");
    }

    let entry = append(ctx.journal_config()?, &body).map_err(CliError::from)?;
    if !ctx.quiet() {
        println!("Wrote entry for {}", entry.date);
    }
    Ok(())
}
