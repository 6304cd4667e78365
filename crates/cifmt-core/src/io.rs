//! File reads and in-place writes

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::{Error, Result};

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Overwrite a file's content in place.
///
/// The existing file is truncated and rewritten, so symlinks are followed
/// and the file keeps its inode, ownership, and permissions.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    file.write_all(content.as_bytes())
        .map_err(|e| Error::io(path, e))?;

    file.sync_all().map_err(|e| Error::io(path, e))
}
