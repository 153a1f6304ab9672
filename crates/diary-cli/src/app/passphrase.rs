//! Passphrase handling and journal loading with retry logic.

use std::io::IsTerminal;

use diary_core::{DiaryError, EnvelopeJournal, JournalConfig, StorageEngine};

use crate::constants::MAX_PASSPHRASE_ATTEMPTS;
use crate::errors::CliError;
use crate::helpers::{env_passphrase, prompt_passphrase};

/// Load the journal, prompting for the passphrase when it is not in the
/// environment.
///
/// An incorrect passphrase at an interactive prompt is retried up to
/// `MAX_PASSPHRASE_ATTEMPTS` times. A passphrase from `DIARY_PASSPHRASE` is
/// tried once.
pub fn load_journal_with_retry(
    config: JournalConfig,
    no_input: bool,
) -> anyhow::Result<EnvelopeJournal> {
    // Fail on a missing journal before asking for anything.
    if !config.entry_dir().is_dir() {
        let missing = DiaryError::EntryDirNotFound(config.entry_dir().to_path_buf());
        return Err(CliError::from(missing).into());
    }

    let mut journal = EnvelopeJournal::new(config).map_err(CliError::from)?;

    if let Some(passphrase) = env_passphrase() {
        let count = journal
            .load(passphrase)
            .map(|entries| entries.len())
            .map_err(CliError::from)?;
        tracing::debug!(count, "journal unlocked from environment");
        return Ok(journal);
    }

    let interactive = std::io::stdin().is_terminal() && !no_input;
    let max_attempts = if interactive {
        MAX_PASSPHRASE_ATTEMPTS
    } else {
        1
    };
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let passphrase = prompt_passphrase(interactive)?;
        match journal.load(passphrase).map(|entries| entries.len()) {
            Ok(count) => {
                tracing::debug!(count, attempts, "journal unlocked");
                return Ok(journal);
            }
            Err(DiaryError::IncorrectPassphrase) => {
                let remaining = max_attempts.saturating_sub(attempts);
                if remaining == 0 {
                    return Err(CliError::auth_failed("Too many failed passphrase attempts.")
                        .with_hint(
                            "Hint: Entries cannot be recovered without the private key passphrase.",
                        )
                        .into());
                }
                eprintln!(
                    "Incorrect passphrase. {} attempt{} remaining.",
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                );
            }
            Err(err) => return Err(CliError::from(err).into()),
        }
    }
}
