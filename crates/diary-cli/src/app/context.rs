//! Application context for the Diary CLI.
//!
//! Bundles CLI arguments with the lazily resolved journal configuration.

use std::path::Path;

use diary_core::{EnvelopeJournal, JournalConfig};
use once_cell::unsync::OnceCell;

use crate::cli::Cli;
use crate::config::DiaryConfig;

use super::passphrase::load_journal_with_retry;
use super::resolver::{load_file_config, resolve_journal_config};

pub struct AppContext<'a> {
    cli: &'a Cli,
    file_config: OnceCell<DiaryConfig>,
    journal_config: OnceCell<JournalConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            file_config: OnceCell::new(),
            journal_config: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn file_config(&self) -> anyhow::Result<&DiaryConfig> {
        self.file_config
            .get_or_try_init(|| load_file_config(self.cli))
    }

    /// The journal configuration, resolved on first use.
    pub fn journal_config(&self) -> anyhow::Result<&JournalConfig> {
        self.journal_config.get_or_try_init(|| {
            let file = self.file_config()?;
            resolve_journal_config(self.cli, file)
        })
    }

    pub fn entry_dir(&self) -> anyhow::Result<&Path> {
        Ok(self.journal_config()?.entry_dir())
    }

    /// Editor from `[entry] editor`, if configured.
    pub fn editor(&self) -> anyhow::Result<Option<&str>> {
        Ok(self.file_config()?.entry.editor.as_deref())
    }

    /// Unlock and load the journal with the resolved configuration.
    pub fn open_journal(&self, no_input: bool) -> anyhow::Result<EnvelopeJournal> {
        load_journal_with_retry(self.journal_config()?.clone(), no_input)
    }
}
