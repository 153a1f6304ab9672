//! Directory-of-envelopes journal.
//!
//! One envelope file per entry, named `<unix-seconds>.txt`. Loading decrypts
//! every file in the directory and sorts by the date line; appending seals a
//! new file and prepends the entry in memory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

use super::traits::StorageEngine;
use super::types::{sort_newest_first, Entry};
use crate::config::{JournalConfig, LoadPolicy};
use crate::crypto::{load_private_key, open_file, seal_to_file, Passphrase};
use crate::error::{DiaryError, Result};
use crate::fs::TEMP_PREFIX;

/// File extension of entry envelopes.
pub const ENTRY_EXTENSION: &str = "txt";

/// Decrypt every envelope in the configured directory, newest first.
///
/// The private key is unlocked once, before any envelope is read, and
/// dropped when this returns. The passphrase is consumed.
///
/// Under `LoadPolicy::Strict` the first failure aborts the load and no
/// entries are returned. Under `LoadPolicy::BestEffort` envelopes that fail
/// to open are skipped with a warning.
///
/// # Errors
///
/// - `DiaryError::EntryDirNotFound` if the directory is missing
/// - any key-material error from unlocking the private key
/// - under the strict policy, the first envelope failure
pub fn load_all(config: &JournalConfig, passphrase: Passphrase) -> Result<Vec<Entry>> {
    let paths = list_envelopes(config.entry_dir())?;

    let private_key = load_private_key(&config.private_key, &passphrase)?;
    drop(passphrase);

    let mut entries = Vec::with_capacity(paths.len());
    let mut skipped = 0usize;
    for path in &paths {
        let opened = open_file(path, &private_key, config.key_wrap)
            .and_then(|plaintext| Entry::from_plaintext(&plaintext));
        match opened {
            Ok(entry) => entries.push(entry),
            Err(err) if config.load_policy == LoadPolicy::BestEffort => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                skipped += 1;
            }
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "journal load aborted");
                return Err(err);
            }
        }
    }

    sort_newest_first(&mut entries);
    tracing::info!(
        dir = %config.entry_dir().display(),
        loaded = entries.len(),
        skipped,
        "journal loaded"
    );
    Ok(entries)
}

/// Seal `content` as a new entry dated now.
///
/// See [`append_at`].
pub fn append(config: &JournalConfig, content: &str) -> Result<Entry> {
    append_at(config, content, Local::now())
}

/// Seal `content` as a new entry dated `now`.
///
/// The date line is `now` rendered with the configured format; the file is
/// `<entry_dir>/<now as unix seconds>.txt`. Only the public key is needed.
///
/// # Errors
///
/// - `DiaryError::Config` if the date format cannot be rendered
/// - `DiaryError::EntryExists` if an entry with the same second exists
/// - any seal or write error
pub fn append_at<Tz>(config: &JournalConfig, content: &str, now: DateTime<Tz>) -> Result<Entry>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let date = render_date(&now, &config.date_format)?;
    let plaintext = Entry::compose_plaintext(&date, content);
    let path = entry_path(config.entry_dir(), now.timestamp());

    seal_to_file(
        plaintext.as_bytes(),
        &path,
        &config.public_key,
        config.key_wrap,
    )?;
    tracing::info!(path = %path.display(), "entry appended");

    Entry::from_plaintext(plaintext.as_bytes())
}

/// Path of the envelope for an entry created at `timestamp`.
pub fn entry_path(dir: &Path, timestamp: i64) -> PathBuf {
    dir.join(format!("{}.{}", timestamp, ENTRY_EXTENSION))
}

/// Every path in `dir`, in file-name order.
///
/// The directory is expected to hold only envelopes. The one exception is a
/// temp file left behind by an interrupted write, which is skipped with a
/// warning; anything else that does not open is an error.
fn list_envelopes(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_dir = fs::read_dir(dir).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => DiaryError::EntryDirNotFound(dir.to_path_buf()),
        _ => DiaryError::from(err),
    })?;

    let mut paths = Vec::new();
    for item in read_dir {
        let item = item?;
        if item.file_name().to_string_lossy().starts_with(TEMP_PREFIX) {
            tracing::warn!(path = %item.path().display(), "skipping interrupted write");
            continue;
        }
        paths.push(item.path());
    }
    paths.sort();
    Ok(paths)
}

fn render_date<Tz>(now: &DateTime<Tz>, format: &str) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    use std::fmt::Write;

    let mut date = String::new();
    write!(date, "{}", now.format(format))
        .map_err(|_| DiaryError::Config(format!("invalid date format: {:?}", format)))?;
    Ok(date)
}

/// A journal directory with its unloaded/loaded lifecycle.
#[derive(Debug)]
pub struct EnvelopeJournal {
    config: JournalConfig,
    entries: Option<Vec<Entry>>,
}

impl EnvelopeJournal {
    /// Create an unloaded journal.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::Config` if the configuration is invalid.
    pub fn new(config: JournalConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            entries: None,
        })
    }

    pub fn config(&self) -> &JournalConfig {
        &self.config
    }

    pub fn entry_dir(&self) -> &Path {
        self.config.entry_dir()
    }

    /// Number of loaded entries (zero when unloaded).
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append with an explicit timestamp.
    pub fn append_at<Tz>(&mut self, content: &str, now: DateTime<Tz>) -> Result<&Entry>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let entries = self.entries.as_mut().ok_or(DiaryError::NotLoaded)?;
        let entry = append_at(&self.config, content, now)?;
        entries.insert(0, entry);
        Ok(&entries[0])
    }
}

impl StorageEngine for EnvelopeJournal {
    fn load(&mut self, passphrase: Passphrase) -> Result<&[Entry]> {
        self.entries = None;
        let entries = load_all(&self.config, passphrase)?;
        Ok(self.entries.insert(entries).as_slice())
    }

    fn is_loaded(&self) -> bool {
        self.entries.is_some()
    }

    fn entries(&self) -> Result<&[Entry]> {
        self.entries.as_deref().ok_or(DiaryError::NotLoaded)
    }

    fn append(&mut self, content: &str) -> Result<&Entry> {
        self.append_at(content, Local::now())
    }
}
