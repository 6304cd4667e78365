//! Per-file formatting pipeline for cifmt
//!
//! Reads a YAML file, moves `#include` blocks out of the way, runs the YAML
//! formatter on a temporary working copy, and writes the restored result back.

pub mod error;
pub mod formatter;
pub mod io;
pub mod pipeline;
pub mod working_copy;

pub use error::{Error, Result};
pub use formatter::{DEFAULT_FORMATTER, ExternalFormatter, FormatOutcome, Formatter};
pub use pipeline::{FileReport, ProcessingMode, format_file};
pub use working_copy::WorkingCopy;
