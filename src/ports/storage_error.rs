//! Errors shared by the persistence ports.

use thiserror::Error;

/// Errors that can occur while persisting transcripts or candidate records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Requested item does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Content could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Underlying filesystem failure
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
