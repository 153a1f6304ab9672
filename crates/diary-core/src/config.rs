//! Journal configuration.
//!
//! Callers resolve paths (from a config file, flags, or a test fixture) and
//! hand a `JournalConfig` to the store. The core never reads ambient state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DiaryError, Result};

/// Default date line format. Zero-padded, most significant field first, so
/// string order matches chronological order.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Asymmetric padding used to wrap the per-entry key.
///
/// Fixed per journal: envelopes sealed with one scheme cannot be opened with
/// the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyWrap {
    /// RSA-OAEP with SHA-256 / MGF1-SHA-256.
    #[default]
    Oaep,
    /// RSA PKCS#1 v1.5 encryption padding, for journals written by older tools.
    Pkcs1v15,
}

/// What `load` does when a single envelope cannot be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Abort the whole load; expose no entries.
    #[default]
    Strict,
    /// Skip damaged envelopes with a warning. Key errors stay fatal.
    BestEffort,
}

/// Paths and policies for one journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Directory holding one envelope file per entry
    pub entry_dir: PathBuf,

    /// SPKI PEM public key used to seal new entries
    pub public_key: PathBuf,

    /// Encrypted PKCS#8 PEM private key used to open entries
    pub private_key: PathBuf,

    /// Key-wrap padding scheme
    #[serde(default)]
    pub key_wrap: KeyWrap,

    /// Failure policy for loading
    #[serde(default)]
    pub load_policy: LoadPolicy,

    /// `chrono` format string for the date line of new entries
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl JournalConfig {
    pub fn new(
        entry_dir: impl Into<PathBuf>,
        public_key: impl Into<PathBuf>,
        private_key: impl Into<PathBuf>,
    ) -> Self {
        Self {
            entry_dir: entry_dir.into(),
            public_key: public_key.into(),
            private_key: private_key.into(),
            key_wrap: KeyWrap::default(),
            load_policy: LoadPolicy::default(),
            date_format: default_date_format(),
        }
    }

    pub fn with_key_wrap(mut self, key_wrap: KeyWrap) -> Self {
        self.key_wrap = key_wrap;
        self
    }

    pub fn with_load_policy(mut self, load_policy: LoadPolicy) -> Self {
        self.load_policy = load_policy;
        self
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    pub fn entry_dir(&self) -> &Path {
        &self.entry_dir
    }

    /// Check values that would otherwise fail late, mid-operation.
    ///
    /// The date format must render to a single non-empty line, since the
    /// first plaintext line is the entry's date.
    pub fn validate(&self) -> Result<()> {
        use std::fmt::Write;

        let sample = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|date| date.and_hms_opt(3, 4, 5))
            .ok_or_else(|| DiaryError::Config("cannot build sample timestamp".to_string()))?;
        let mut rendered = String::new();
        write!(rendered, "{}", sample.format(&self.date_format)).map_err(|_| {
            DiaryError::Config(format!("invalid date format: {:?}", self.date_format))
        })?;
        if rendered.trim().is_empty() || rendered.contains('\n') {
            return Err(DiaryError::Config(format!(
                "date format must render a single non-empty line: {:?}",
                self.date_format
            )));
        }
        Ok(())
    }
}
