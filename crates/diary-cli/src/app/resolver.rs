//! Resolution of the journal configuration from flags, config file, and defaults.

use std::path::PathBuf;

use diary_core::JournalConfig;

use crate::cli::Cli;
use crate::config::{
    default_config_path, default_entry_dir, default_private_key_path, default_public_key_path,
    expand_path, read_config, DiaryConfig,
};
use crate::errors::CliError;

/// Read the config file named by `--config`/`DIARY_CONFIG`, or the default one.
///
/// An explicitly named file must exist; a missing default file means
/// "use defaults".
pub fn load_file_config(cli: &Cli) -> anyhow::Result<DiaryConfig> {
    if let Some(path) = cli.config.as_ref() {
        if !path.exists() {
            return Err(CliError::not_found(
                format!("No config found at {}", path.display()),
                "Hint: Check --config / DIARY_CONFIG, or remove it to use the default location.",
            )
            .into());
        }
        return read_config(path);
    }

    let path = default_config_path()?;
    if path.exists() {
        read_config(&path)
    } else {
        tracing::debug!(path = %path.display(), "no config file; using defaults");
        Ok(DiaryConfig::default())
    }
}

/// Merge flags (and their `DIARY_*` variables) over the config file over defaults.
pub fn resolve_journal_config(cli: &Cli, file: &DiaryConfig) -> anyhow::Result<JournalConfig> {
    let entry_dir = pick_path(
        cli.dir.as_ref(),
        file.journal.entry_dir.as_deref(),
        default_entry_dir,
    )?;
    let public_key = pick_path(
        cli.public_key.as_ref(),
        file.keys.public_key.as_deref(),
        default_public_key_path,
    )?;
    let private_key = pick_path(
        cli.private_key.as_ref(),
        file.keys.private_key.as_deref(),
        default_private_key_path,
    )?;

    let mut config = JournalConfig::new(entry_dir, public_key, private_key)
        .with_key_wrap(file.keys.wrap.unwrap_or_default())
        .with_load_policy(file.load.policy.unwrap_or_default());
    if let Some(format) = file.entry.date_format.as_ref() {
        config = config.with_date_format(format.clone());
    }
    config.validate().map_err(CliError::from)?;
    Ok(config)
}

fn pick_path(
    flag: Option<&PathBuf>,
    file_value: Option<&str>,
    default: fn() -> anyhow::Result<PathBuf>,
) -> anyhow::Result<PathBuf> {
    match (flag, file_value) {
        (Some(path), _) => Ok(path.clone()),
        (None, Some(value)) => expand_path(value),
        (None, None) => default(),
    }
}
