//! The per-file formatting pipeline.

use std::path::{Path, PathBuf};

use cifmt_blocks::{extract_blocks, has_include_directive, normalize_blank_lines, restore_blocks};

use crate::error::Result;
use crate::formatter::{FormatOutcome, Formatter};
use crate::io;
use crate::working_copy::WorkingCopy;

/// How a file was handed to the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingMode {
    /// No include marker; the formatter ran directly on the file.
    PassThrough,
    /// Include blocks were extracted and the formatter ran on a working copy.
    Sanitized,
}

/// Summary of one processed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub mode: ProcessingMode,
    /// Blocks extracted from the source.
    pub blocks: usize,
    /// Blocks written back into the result.
    pub restored: usize,
    pub outcome: FormatOutcome,
}

/// Format a single YAML file in place, preserving its `#include` blocks.
///
/// Files without an include marker go straight to the formatter. Otherwise
/// the blocks are swapped for placeholders in a [`WorkingCopy`], the
/// formatter runs on that copy, and the blocks are spliced back into its
/// output before blank-line runs are collapsed and the file is rewritten.
///
/// The working copy is removed on every return path. An unavailable
/// formatter is not an error: the content is restored unformatted.
pub fn format_file(path: &Path, formatter: &dyn Formatter) -> Result<FileReport> {
    let content = io::read_text(path)?;

    if !has_include_directive(&content) {
        tracing::debug!(path = %path.display(), "no include directive, formatting directly");
        let outcome = formatter.format(path)?;
        return Ok(FileReport {
            path: path.to_path_buf(),
            mode: ProcessingMode::PassThrough,
            blocks: 0,
            restored: 0,
            outcome,
        });
    }

    let extraction = extract_blocks(&content);
    tracing::debug!(
        path = %path.display(),
        blocks = extraction.blocks.len(),
        "extracted include blocks"
    );

    let working_copy = WorkingCopy::create(&extraction.working_copy())?;
    let outcome = formatter.format(working_copy.path())?;
    let formatted = working_copy.read()?;

    let restoration = restore_blocks(&formatted, &extraction.blocks);
    let final_content = normalize_blank_lines(&restoration.content);

    io::write_text(path, &final_content)?;

    Ok(FileReport {
        path: path.to_path_buf(),
        mode: ProcessingMode::Sanitized,
        blocks: extraction.blocks.len(),
        restored: restoration.restored,
        outcome,
    })
}
