//! Include-block detection and extraction.
//!
//! An include block is the `#include` marker line, the URL lines directly
//! below it, and the blank-line spacing around it:
//! ```text
//!
//! #include
//! https://example.com/one
//! https://example.com/two
//!
//! ```

use regex::Regex;
use std::sync::LazyLock;

/// The marker line that opens an include block, compared after trimming.
pub const INCLUDE_MARKER: &str = "#include";

/// Sentinel comment substituted for each extracted block.
///
/// It is a plain YAML comment, so formatters keep it on its own line.
pub const PLACEHOLDER: &str = "# CLOUD_INIT_INCLUDE_PLACEHOLDER";

/// Regex for URL lines following a marker. Leading indentation is allowed.
static URL_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*https?://").expect("Invalid URL line regex"));

/// One extracted include block, kept byte-for-byte for restoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeBlock {
    lines: Vec<String>,
}

impl IncludeBlock {
    /// All lines of the block in order, including the optional leading blank
    /// line and the single trailing blank line.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether the source had a blank line directly above the marker.
    pub fn has_leading_blank(&self) -> bool {
        self.lines.first().is_some_and(|line| line.is_empty())
    }

    /// The marker line as it appeared in the source, indentation included.
    pub fn marker(&self) -> &str {
        self.lines
            .iter()
            .find(|line| is_marker(line))
            .map(String::as_str)
            .unwrap_or(INCLUDE_MARKER)
    }

    /// The URL lines that followed the marker.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(|line| is_url_line(line))
            .map(String::as_str)
    }

    /// The block joined with newlines.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Result of sanitizing a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Document lines with every block replaced by one [`PLACEHOLDER`] line.
    pub lines: Vec<String>,
    /// Extracted blocks in document order.
    pub blocks: Vec<IncludeBlock>,
}

impl Extraction {
    /// The sanitized text handed to the formatter.
    ///
    /// Lines are joined with `\n` and no trailing newline is added.
    pub fn working_copy(&self) -> String {
        self.lines.join("\n")
    }

    /// Number of placeholder lines in the sanitized document.
    pub fn placeholder_count(&self) -> usize {
        self.lines.iter().filter(|line| *line == PLACEHOLDER).count()
    }
}

/// Checks whether a line is the include marker.
pub fn is_marker(line: &str) -> bool {
    line.trim() == INCLUDE_MARKER
}

/// Checks whether a line is a URL line (`http://` or `https://`, optionally indented).
pub fn is_url_line(line: &str) -> bool {
    URL_LINE_REGEX.is_match(line)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Checks whether any line of the content is an include marker.
///
/// # Example
/// ```
/// use cifmt_blocks::parser::has_include_directive;
///
/// assert!(has_include_directive("a: 1\n  #include  \nhttps://x/y\n"));
/// assert!(!has_include_directive("a: 1\n# include\n"));
/// ```
pub fn has_include_directive(content: &str) -> bool {
    content.lines().any(is_marker)
}

/// Extracts all include blocks from the content.
///
/// Each block is replaced by a single [`PLACEHOLDER`] line. A blank line
/// directly above the marker moves into the block. Blank lines after the
/// URLs are consumed and the block always ends with exactly one blank line.
/// Lines outside blocks are copied verbatim.
///
/// # Example
/// ```
/// use cifmt_blocks::parser::{extract_blocks, PLACEHOLDER};
///
/// let content = "a:1\n\n#include\nhttps://x/y\n\n\nb:2";
/// let extraction = extract_blocks(content);
///
/// assert_eq!(extraction.lines, vec!["a:1", PLACEHOLDER, "b:2"]);
/// assert_eq!(extraction.blocks.len(), 1);
/// assert_eq!(extraction.blocks[0].lines(), ["", "#include", "https://x/y", ""]);
/// ```
pub fn extract_blocks(content: &str) -> Extraction {
    let lines: Vec<&str> = content.lines().collect();
    let mut extraction = Extraction::default();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if !is_marker(line) {
            extraction.lines.push(line.to_string());
            i += 1;
            continue;
        }

        let mut block_lines = Vec::new();

        if i > 0 && is_blank(lines[i - 1]) {
            block_lines.push(String::new());
            // The blank is already in the output unless a previous block consumed it
            if extraction.lines.last().is_some_and(|last| is_blank(last)) {
                extraction.lines.pop();
            }
        }

        block_lines.push(line.to_string());
        i += 1;

        while i < lines.len() && is_url_line(lines[i]) {
            block_lines.push(lines[i].to_string());
            i += 1;
        }

        while i < lines.len() && is_blank(lines[i]) {
            i += 1;
        }

        block_lines.push(String::new());

        tracing::debug!(
            index = extraction.blocks.len(),
            lines = block_lines.len(),
            "extracted include block"
        );

        extraction.blocks.push(IncludeBlock { lines: block_lines });
        extraction.lines.push(PLACEHOLDER.to_string());
    }

    extraction
}
