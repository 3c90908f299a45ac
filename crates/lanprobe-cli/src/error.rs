//! Error types for the lanprobe CLI.

use lanprobe_core::error::DiscoveryError;
use thiserror::Error;

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
