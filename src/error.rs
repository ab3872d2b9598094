//! Error handling module for the storage proposal engine
//!
//! Conversion is total over well-formed settings, so the taxonomy is small:
//! the device graph being unavailable is the only failure that aborts a
//! conversion. The remaining variants belong to loading and validating input.

use thiserror::Error;

/// Main error type for the storage proposal engine
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO errors (reading settings, configuration or device graph files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation errors (ill-formed proposal settings)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The device graph snapshot could not be queried
    #[error("Device graph unavailable: {0}")]
    DevicegraphUnavailable(String),
}

/// Result type alias for storage proposal operations
pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a device graph error
    pub fn devicegraph_unavailable(msg: impl Into<String>) -> Self {
        Self::DevicegraphUnavailable(msg.into())
    }
}
