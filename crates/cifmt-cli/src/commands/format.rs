//! The format command: process each file argument in turn.

use std::io::Write;
use std::path::PathBuf;

use cifmt_core::{FormatOutcome, Formatter, format_file};

use crate::error::Result;

/// Printed when no files are given.
pub const USAGE: &str = "Usage: cifmt <file1> <file2> ...";

/// Format every file in order, writing diagnostics to `out`.
///
/// Arguments that are not regular files are skipped with a warning. A
/// missing formatter is reported once per file and is not an error. Any
/// other failure stops the run.
pub fn run_format(files: &[PathBuf], formatter: &dyn Formatter, out: &mut impl Write) -> Result<()> {
    for path in files {
        if !path.is_file() {
            writeln!(out, "Warning: {} is not a file, skipping", path.display())?;
            continue;
        }

        let report = format_file(path, formatter)?;
        tracing::debug!(
            path = %report.path.display(),
            mode = ?report.mode,
            blocks = report.blocks,
            restored = report.restored,
            outcome = ?report.outcome,
            "processed file"
        );

        if report.outcome == FormatOutcome::Unavailable {
            writeln!(out, "{} not found, skipping formatting", formatter.name())?;
        }
    }

    Ok(())
}
