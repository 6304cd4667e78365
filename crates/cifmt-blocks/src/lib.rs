//! Include-directive block handling for cifmt.
//!
//! cloud-init accepts YAML files that start a section with a bare `#include`
//! marker followed by URL lines:
//!
//! ```text
//! #include
//! https://example.com/one
//! https://example.com/two
//! ```
//!
//! Generic YAML formatters mangle these lines. This crate lifts each such
//! block out of the document, leaving a placeholder comment in its place, and
//! later splices the original text back in once the sanitized document has
//! been formatted.
//!
//! The crate is pure text processing: it performs no I/O and cannot fail.
//!
//! - [`parser`] detects markers and extracts blocks.
//! - [`writer`] restores blocks and normalizes blank-line runs.

pub mod parser;
pub mod writer;

pub use parser::{
    Extraction, INCLUDE_MARKER, IncludeBlock, PLACEHOLDER, extract_blocks, has_include_directive,
    is_marker, is_url_line,
};
pub use writer::{Restoration, normalize_blank_lines, restore_blocks};
