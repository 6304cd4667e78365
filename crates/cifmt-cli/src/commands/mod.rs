//! Command implementations for cifmt

mod format;

pub use format::{USAGE, run_format};
