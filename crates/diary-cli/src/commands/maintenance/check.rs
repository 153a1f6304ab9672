use diary_core::{LoadPolicy, StorageEngine};

use crate::app::{load_journal_with_retry, AppContext};

/// Decrypt every entry under the strict policy; the first failure is reported.
pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let config = ctx
        .journal_config()?
        .clone()
        .with_load_policy(LoadPolicy::Strict);
    let dir = config.entry_dir().to_path_buf();

    match load_journal_with_retry(config, false) {
        Ok(journal) => {
            if !ctx.quiet() {
                println!("Integrity check: OK");
                println!("- journal: {}", dir.display());
                println!("- entries: {}", journal.entries()?.len());
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("Integrity check: FAILED");
            Err(err)
        }
    }
}
