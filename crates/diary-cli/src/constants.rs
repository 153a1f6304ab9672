//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells and clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Entry directory, key, or config file not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong passphrase, too many attempts).
    pub const AUTH_FAILED: i32 = 5;

    /// At least one entry could not be decrypted.
    pub const INTEGRITY_FAILED: i32 = 6;
}

/// Passphrase attempts allowed at an interactive prompt.
pub const MAX_PASSPHRASE_ATTEMPTS: u32 = 3;

/// Rows shown by `list` when no limit is given.
pub const DEFAULT_LIST_LIMIT: usize = 20;
