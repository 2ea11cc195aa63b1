//! Common error types for vmatch

use thiserror::Error;

/// Common result type for vmatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the vmatch crates
///
/// Missing-but-well-formed data is never an error. These variants cover
/// malformed input and failures at the I/O edges only.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed record (e.g. coordinates outside valid bounds)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
