//! User-facing CLI errors with exit codes and hints.

use std::fmt;

use diary_core::DiaryError;

use crate::constants::exit_codes;

/// A terminal error: message, optional hint, and process exit code.
#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::new(exit_codes::NOT_FOUND, message).with_hint(hint)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(exit_codes::INVALID_INPUT, message)
    }

    pub fn auth_failed(message: impl Into<String>) -> Self {
        Self::new(exit_codes::AUTH_FAILED, message)
    }

    /// Print to stderr and exit the process.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self.message);
        if let Some(hint) = &self.hint {
            eprintln!("{}", hint);
        }
        std::process::exit(self.code)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<DiaryError> for CliError {
    fn from(err: DiaryError) -> Self {
        match &err {
            DiaryError::EntryDirNotFound(path) => CliError::not_found(
                format!("No journal found at {}", path.display()),
                "Hint: Create the directory, or point --dir / DIARY_DIR at an existing journal.",
            ),
            DiaryError::PublicKeyNotFound(path) => CliError::not_found(
                format!("Public key not found at {}", path.display()),
                "Hint: Set [keys] public_key in the config, or pass --public-key.",
            ),
            DiaryError::PrivateKeyNotFound(path) => CliError::not_found(
                format!("Private key not found at {}", path.display()),
                "Hint: Set [keys] private_key in the config, or pass --private-key.",
            ),
            DiaryError::IncorrectPassphrase => CliError::auth_failed("Incorrect passphrase."),
            DiaryError::EntryExists(_) => CliError::invalid_input(err.to_string())
                .with_hint("Hint: An entry was already written this second; try again."),
            DiaryError::Config(_) => CliError::invalid_input(err.to_string()),
            _ if err.is_envelope_damage() => {
                CliError::new(exit_codes::INTEGRITY_FAILED, err.to_string()).with_hint(
                    "Hint: Set [load] policy = \"best_effort\" to skip unreadable entries.",
                )
            }
            _ => CliError::new(1, err.to_string()),
        }
    }
}
