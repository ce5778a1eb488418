//! Storage error types.
//!
//! "No rows" is never an error here: lookups return `Option`/empty `Vec`. These variants are the
//! failures callers must keep distinct from "not found".

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

/// A row did not have the shape its entity decoder expects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{entity}: expected {expected} columns, got {actual}")]
    ColumnCount {
        entity: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{entity}.{column}: {message}")]
    Column {
        entity: &'static str,
        column: &'static str,
        message: String,
    },
    #[error("invalid schedule_time '{0}'")]
    Timestamp(String),
    #[error("invalid duration {0} minutes")]
    Duration(i64),
    #[error("invalid lesson_type '{0}'")]
    LessonType(String),
    #[error("invalid role '{0}'")]
    Role(String),
}
