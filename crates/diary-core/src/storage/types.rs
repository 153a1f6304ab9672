//! Core data types for the storage layer.

use serde::{Deserialize, Serialize};

use crate::error::{DiaryError, Result};

/// One journal entry.
///
/// `date` is the first line of the decrypted plaintext, kept exactly as the
/// writer formatted it. `content` is every later line, each terminated by
/// `\n`, or empty if there are none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Date line as written
    pub date: String,

    /// Entry body
    pub content: String,
}

impl Entry {
    pub fn new(date: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            content: content.into(),
        }
    }

    /// Parse decrypted plaintext into an entry.
    ///
    /// ```
    /// use diary_core::storage::Entry;
    ///
    /// let entry = Entry::from_plaintext(b"2024-01-02 09:00:00\nhello").unwrap();
    /// assert_eq!(entry.date, "2024-01-02 09:00:00");
    /// assert_eq!(entry.content, "hello\n");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::InvalidEntry` if the plaintext is not UTF-8.
    pub fn from_plaintext(plaintext: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(plaintext)
            .map_err(|e| DiaryError::InvalidEntry(format!("plaintext is not UTF-8: {}", e)))?;

        let (date, rest) = text.split_once('\n').unwrap_or((text, ""));
        let content = if rest.is_empty() || rest.ends_with('\n') {
            rest.to_string()
        } else {
            format!("{}\n", rest)
        };

        Ok(Self {
            date: date.to_string(),
            content,
        })
    }

    /// Build the plaintext written for a new entry: the date line, a newline,
    /// then the content as given.
    pub fn compose_plaintext(date: &str, content: &str) -> String {
        let mut plaintext = String::with_capacity(date.len() + 1 + content.len());
        plaintext.push_str(date);
        plaintext.push('\n');
        plaintext.push_str(content);
        plaintext
    }

    /// First non-blank content line, for one-line listings.
    pub fn summary(&self) -> &str {
        self.content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("")
    }
}

/// Sort entries by descending `date` string.
///
/// Plain string comparison: a date format whose text order differs from
/// calendar order (for example unpadded day numbers) sorts by text.
pub fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
}
