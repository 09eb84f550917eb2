//! Memodex error types

use thiserror::Error;

/// Memodex error type
#[derive(Error, Debug)]
pub enum Error {
    /// Rejected request input, e.g. empty content
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation on an unknown content hash
    #[error("Not found: {0}")]
    NotFound(String),

    /// Durable write failed; the in-memory mutation was rolled back
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// Durable state unreadable or malformed at load time
    #[error("Corrupt state: {0}")]
    CorruptState(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for memodex operations
pub type Result<T> = std::result::Result<T, Error>;
