//! The YAML formatter seam.
//!
//! The formatter is an opaque collaborator that rewrites a file in place.
//! [`ExternalFormatter`] runs the `yamlfmt` executable; tests plug in their
//! own [`Formatter`] implementations.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Program run when no formatter is configured.
pub const DEFAULT_FORMATTER: &str = "yamlfmt";

/// What happened when the formatter was asked to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatOutcome {
    /// The formatter ran. Its exit status is informational only.
    Formatted { success: bool },
    /// The formatter could not be found; the file was left untouched.
    Unavailable,
}

/// Rewrites a YAML file in place.
pub trait Formatter {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Format the file at `path` in place.
    fn format(&self, path: &Path) -> Result<FormatOutcome>;
}

/// Runs an external formatter executable with the file path as its only argument.
#[derive(Debug, Clone)]
pub struct ExternalFormatter {
    program: PathBuf,
    name: String,
}

impl ExternalFormatter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        let name = program.to_string_lossy().into_owned();
        Self { program, name }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for ExternalFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_FORMATTER)
    }
}

impl Formatter for ExternalFormatter {
    fn name(&self) -> &str {
        &self.name
    }

    /// Output is captured and discarded and the exit code is not checked.
    /// A missing executable yields [`FormatOutcome::Unavailable`]; any other
    /// spawn failure is an error.
    fn format(&self, path: &Path) -> Result<FormatOutcome> {
        let output = Command::new(&self.program)
            .arg(path)
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(output) => {
                tracing::debug!(
                    formatter = %self.name,
                    path = %path.display(),
                    exit_code = ?output.status.code(),
                    "formatter finished"
                );
                Ok(FormatOutcome::Formatted {
                    success: output.status.success(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(formatter = %self.name, "formatter executable not found");
                Ok(FormatOutcome::Unavailable)
            }
            Err(source) => Err(Error::Spawn {
                program: self.name.clone(),
                source,
            }),
        }
    }
}
