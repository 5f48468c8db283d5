//! Domain error types.

use thiserror::Error;

/// Errors that can occur at the persistence boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No database backend is configured. Reads degrade to empty fallbacks,
    /// writes are rejected.
    #[error("database backend is not configured")]
    Unconfigured,

    /// Underlying database error.
    #[error(transparent)]
    Db(#[from] sqlx::Error),

    /// A stored JSON value failed to re-encode.
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
