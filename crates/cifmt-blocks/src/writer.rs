//! Block restoration and blank-line normalization.

use crate::parser::{IncludeBlock, PLACEHOLDER};
use regex::Regex;
use std::sync::LazyLock;

/// Runs of three or more newlines, i.e. more than one blank line.
static BLANK_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("Invalid blank run regex"));

/// Outcome of splicing blocks back into formatted content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restoration {
    /// Restored text, ending with a single newline. Not yet normalized.
    pub content: String,
    /// Number of blocks written back.
    pub restored: usize,
    /// Placeholders found after every block was already consumed.
    pub dropped_placeholders: usize,
    /// Blocks for which no placeholder survived formatting.
    pub unrestored_blocks: usize,
}

/// Replaces placeholder lines with the extracted blocks, in order.
///
/// A line is replaced when it equals [`PLACEHOLDER`] after trimming, so a
/// placeholder the formatter re-indented still gets its block. Placeholders
/// beyond the number of blocks are dropped. All other lines are copied
/// verbatim.
///
/// # Example
/// ```
/// use cifmt_blocks::{extract_blocks, restore_blocks};
///
/// let extraction = extract_blocks("a: 1\n\n#include\nhttps://x/y\nb: 2\n");
/// let restoration = restore_blocks(&extraction.working_copy(), &extraction.blocks);
///
/// assert_eq!(restoration.content, "a: 1\n\n#include\nhttps://x/y\n\nb: 2\n");
/// assert_eq!(restoration.restored, 1);
/// ```
pub fn restore_blocks(formatted: &str, blocks: &[IncludeBlock]) -> Restoration {
    let mut lines: Vec<&str> = Vec::new();
    let mut next_block = 0;
    let mut dropped_placeholders = 0;

    for line in formatted.lines() {
        if line.trim() != PLACEHOLDER {
            lines.push(line);
            continue;
        }

        match blocks.get(next_block) {
            Some(block) => {
                lines.extend(block.lines().iter().map(String::as_str));
                next_block += 1;
            }
            None => dropped_placeholders += 1,
        }
    }

    let unrestored_blocks = blocks.len() - next_block;

    if dropped_placeholders > 0 {
        tracing::debug!(dropped_placeholders, "dropped placeholders with no block left");
    }
    if unrestored_blocks > 0 {
        tracing::warn!(
            unrestored_blocks,
            "placeholders missing from formatted output; include blocks not restored"
        );
    }

    let mut content = lines.join("\n");
    content.push('\n');

    Restoration {
        content,
        restored: next_block,
        dropped_placeholders,
        unrestored_blocks,
    }
}

/// Collapses every run of three or more newlines to exactly two.
///
/// Applies to the whole document, not only around restored blocks.
///
/// # Example
/// ```
/// use cifmt_blocks::normalize_blank_lines;
///
/// assert_eq!(normalize_blank_lines("a\n\n\n\nb\n"), "a\n\nb\n");
/// assert_eq!(normalize_blank_lines("a\n\nb\n"), "a\n\nb\n");
/// ```
pub fn normalize_blank_lines(content: &str) -> String {
    BLANK_RUN_REGEX.replace_all(content, "\n\n").into_owned()
}
