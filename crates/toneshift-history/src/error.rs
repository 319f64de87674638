//! Error types for the history system

use thiserror::Error;

/// Result type for history operations
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Errors that can occur while building snapshots or persisting history
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Tone level outside of `[0, 100]`
    #[error("toneLevel must be a number between 0 and 100, got {0}")]
    ToneOutOfRange(i64),

    /// Persisted record is inconsistent
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Storage error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl HistoryError {
    /// Create a new ValidationError with context
    pub fn validation_error(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a new StorageError with context
    pub fn storage_error(msg: impl Into<String>) -> Self {
        Self::StorageError(msg.into())
    }
}
