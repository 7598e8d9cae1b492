//! Error types for cadview

use thiserror::Error;

/// Main error type for cadview operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Kernel error: {0}")]
    Kernel(String),
}

/// Result type alias for cadview operations
pub type Result<T> = std::result::Result<T, Error>;
