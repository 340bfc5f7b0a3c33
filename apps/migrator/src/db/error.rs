//! Database error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("missing table: {0}")]
    MissingTable(&'static str),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
