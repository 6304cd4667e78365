//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use cifmt_core::DEFAULT_FORMATTER;

/// Format cloud-init YAML files with yamlfmt, keeping `#include` blocks intact
#[derive(Parser, Debug)]
#[command(name = "cifmt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Formatter executable to run on each file
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_FORMATTER)]
    pub formatter: PathBuf,

    /// YAML files to format in place
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}
