//! Filesystem utilities for atomic operations.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::Builder;

/// Prefix for in-flight temporary files inside the entry directory.
pub(crate) const TEMP_PREFIX: &str = ".diary-";

/// Write `bytes` to a new file at `destination`, all or nothing.
///
/// The data is written and synced to a temporary file in the destination's
/// directory, then moved into place with a rename that refuses to replace an
/// existing file. Readers see either no file or the complete file.
///
/// If anything fails, the temporary file is removed.
///
/// # Errors
///
/// Returns `io::ErrorKind::AlreadyExists` if `destination` already exists,
/// or the underlying error if the directory is missing or unwritable.
pub fn write_new_atomically(destination: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if destination.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", destination.display()),
        ));
    }

    let mut temp = Builder::new().prefix(TEMP_PREFIX).tempfile_in(parent)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;

    // Dropping the returned temp handle on error deletes the partial file.
    temp.persist_noclobber(destination).map_err(|err| err.error)?;

    // Best-effort: make the rename itself durable.
    if let Ok(dir) = fs::File::open(parent) {
        let _ = dir.sync_all();
    }
    Ok(())
}
