//! Error types for the persistence layer.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
///
/// Reads return `Ok(None)` when a row simply does not exist; an `Err` means
/// the storage itself failed, so callers can tell the two apart.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization/deserialization error for JSON-backed rows.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored row decoded into an invalid rule.
    #[error("invalid base rule row: {0}")]
    InvalidRule(#[from] daymark_rules::RuleError),

    /// A stored value was out of its domain (day type, plan id, ...).
    #[error("invalid data: {0}")]
    InvalidData(String),
}
