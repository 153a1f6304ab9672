//! Input helper functions for the CLI.

use std::io::{self, IsTerminal, Read};
use std::process::Command;

use dialoguer::Password;
use diary_core::crypto::Passphrase;
use secrecy::SecretString;

use crate::errors::CliError;

/// Environment variable consulted before prompting for the passphrase.
pub const PASSPHRASE_ENV: &str = "DIARY_PASSPHRASE";

/// Passphrase from `DIARY_PASSPHRASE`, if set and non-blank.
pub fn env_passphrase() -> Option<Passphrase> {
    std::env::var(PASSPHRASE_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(SecretString::from)
}

/// Prompt for the private key passphrase on the terminal.
pub fn prompt_passphrase(interactive: bool) -> anyhow::Result<Passphrase> {
    if !interactive {
        return Err(anyhow::anyhow!(
            "No passphrase provided and no TTY available. Set {}.",
            PASSPHRASE_ENV
        ));
    }
    Password::new()
        .with_prompt("Passphrase")
        .allow_empty_password(true)
        .interact()
        .map(SecretString::from)
        .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))
}

/// Read the entry body from the TEXT argument, stdin, or $EDITOR.
pub fn read_entry_body(
    text: Option<String>,
    no_input: bool,
    editor_override: Option<&str>,
) -> anyhow::Result<String> {
    if let Some(value) = text {
        return non_empty(value);
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        return non_empty(buffer.trim_end().to_string());
    }

    if no_input {
        return Err(anyhow::anyhow!(
            "--no-input requires the entry text as an argument or on stdin"
        ));
    }

    read_body_from_editor(editor_override)
}

/// Open $EDITOR on a scratch file and return what was saved.
fn read_body_from_editor(editor_override: Option<&str>) -> anyhow::Result<String> {
    let editor = editor_override
        .map(|value| value.to_string())
        .or_else(|| std::env::var("EDITOR").ok())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!("$EDITOR is not set; pass the entry text or pipe it via stdin")
        })?;

    let scratch = tempfile::Builder::new()
        .prefix("diary_entry_")
        .suffix(".txt")
        .tempfile()
        .map_err(|e| anyhow::anyhow!("Failed to create temp file: {}", e))?;

    let status = Command::new(&editor)
        .arg(scratch.path())
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to launch editor {}: {}", editor, e))?;
    if !status.success() {
        return Err(anyhow::anyhow!("Editor exited with failure"));
    }

    let contents = std::fs::read_to_string(scratch.path())
        .map_err(|e| anyhow::anyhow!("Failed to read temp file: {}", e))?;
    non_empty(contents.trim_end().to_string())
}

/// A blank body is invalid input; every other failure reading the body is not.
fn non_empty(body: String) -> anyhow::Result<String> {
    if body.trim().is_empty() {
        return Err(CliError::invalid_input("Entry body is empty; nothing written").into());
    }
    Ok(body)
}
