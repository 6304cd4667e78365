//! Error types for cifmt-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that abort the run
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from cifmt-core
    #[error(transparent)]
    Core(#[from] cifmt_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
