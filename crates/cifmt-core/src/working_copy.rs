//! Temporary working copy handed to the formatter.

use std::io::Write;
use std::path::Path;

use tempfile::TempPath;

use crate::error::{Error, Result};
use crate::io;

/// Suffix of working copy files, so formatters treat them as YAML.
pub const WORKING_COPY_SUFFIX: &str = ".yaml";

/// A sanitized document on disk.
///
/// The file is removed when the guard is dropped, whichever way the
/// processing of the current file ends. No handle is kept open, so the
/// formatter is free to replace the file.
#[derive(Debug)]
pub struct WorkingCopy {
    path: TempPath,
}

impl WorkingCopy {
    /// Create a uniquely named working copy in the system temp directory.
    pub fn create(content: &str) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("cifmt-")
            .suffix(WORKING_COPY_SUFFIX)
            .tempfile()
            .map_err(|e| Error::io(std::env::temp_dir(), e))?;

        file.write_all(content.as_bytes())
            .map_err(|e| Error::io(file.path(), e))?;
        file.flush().map_err(|e| Error::io(file.path(), e))?;

        let path = file.into_temp_path();
        tracing::debug!(path = %path.display(), "created working copy");

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back the working copy, as left by the formatter.
    pub fn read(&self) -> Result<String> {
        io::read_text(&self.path)
    }
}
