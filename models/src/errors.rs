// models/src/errors.rs

use std::io;

pub use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Storage error: {0}")]
    StorageError(String), // General storage operation error
    #[error("Serialization error: {0}")]
    SerializationError(String), // Error during data serialization
    #[error("Deserialization error: {0}")]
    DeserializationError(String), // Error during data deserialization
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("application with id {0} was not found")]
    NotFound(u64),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[cfg(feature = "sled-errors")]
    #[error(transparent)]
    Sled(#[from] sled::Error),
}

// Collapse serde_json errors into the serialization variant; callers only
// ever need the message.
impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        SiteError::SerializationError(format!("JSON processing error: {}", err))
    }
}

/// A type alias for a `Result` that returns a `SiteError` on failure.
pub type SiteResult<T> = Result<T, SiteError>;
