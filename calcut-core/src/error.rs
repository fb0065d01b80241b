//! Error types for calcut.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in calcut operations.
///
/// Parsing never fails, so everything here is either configuration or I/O.
#[derive(Error, Debug)]
pub enum CalcutError {
    #[error("Invalid size '{value}': {reason}")]
    InvalidSize { value: String, reason: String },

    #[error("Invalid mode '{0}'. Expected 'per-event' or 'by-size'")]
    InvalidMode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias for calcut operations.
pub type CalcutResult<T> = Result<T, CalcutError>;
