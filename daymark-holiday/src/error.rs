//! Error types for the holiday-plan layer.

use thiserror::Error;

/// Result type for holiday-plan operations.
pub type HolidayResult<T> = Result<T, HolidayError>;

/// Errors that can occur in holiday-plan operations.
#[derive(Debug, Error)]
pub enum HolidayError {
    /// The queried day lies outside the plan's validity window.
    ///
    /// Distinct from "no entry for that day": automation callers surface
    /// this to the user instead of defaulting to "work day".
    #[error("day is outside the plan's validity window")]
    OutOfPlanRange,

    /// Underlying persistence failed.
    #[error("store error: {0}")]
    Store(#[from] daymark_store::StoreError),

    /// An exchange file or resource could not be decoded.
    #[error("invalid plan file: {0}")]
    InvalidFile(#[from] serde_json::Error),

    /// A date in a plan file does not name a real calendar day.
    #[error("invalid date in plan file: {0}")]
    InvalidDate(#[from] daymark_types::Error),

    /// An unknown plan key string was encountered.
    #[error("unknown plan key: {0}")]
    UnknownPlanKey(String),
}
