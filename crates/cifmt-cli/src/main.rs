//! cifmt CLI
//!
//! Runs yamlfmt over cloud-init YAML files without mangling their
//! `#include` directives.

mod cli;
mod commands;
mod error;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cifmt_core::ExternalFormatter;
use cli::Cli;
use error::Result;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup tracing if verbose; stdout is reserved for diagnostics
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            eprintln!("{}: tracing subscriber already set", "warning".yellow().bold());
        }
        tracing::debug!("Verbose mode enabled");
    }

    if cli.files.is_empty() {
        println!("{}", commands::USAGE);
        return Ok(ExitCode::FAILURE);
    }

    let formatter = ExternalFormatter::new(cli.formatter);
    let stdout = std::io::stdout();
    commands::run_format(&cli.files, &formatter, &mut stdout.lock())?;

    Ok(ExitCode::SUCCESS)
}
