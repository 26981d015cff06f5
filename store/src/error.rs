//! Error types for key-value persistence.

use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures talking to the key-value backend.
///
/// Data-shape problems in stored values are not errors: the repository reads
/// them as an empty list.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No connection configuration was provided.
    #[error("Key-value backend is not configured")]
    NotConfigured,

    /// The connection configuration could not be used.
    #[error("Invalid backend configuration: {0}")]
    InvalidConfig(String),

    /// The backend could not be reached.
    #[error("Key-value backend unavailable: {0}")]
    Unavailable(String),

    /// Redis command or connection failure.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Encoding the list failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
