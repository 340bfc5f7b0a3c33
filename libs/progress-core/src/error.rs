//! Error types for progress-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised when raw store values do not fit the domain types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid grade {value}: expected 0..=4")]
    InvalidGrade { value: i64 },
}
