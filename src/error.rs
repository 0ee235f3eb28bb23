//! Error types for loading and validating process sets.

use thiserror::Error;

use crate::validation::ValidationError;

/// Crate error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected 4 fields (PID, arrival, burst, priority), found {found}")]
    FieldCount { line: u64, found: usize },

    #[error("line {line}: {field} is not an integer: {value:?}")]
    InvalidInteger {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: {field} out of range: {value}")]
    OutOfRange {
        line: u64,
        field: &'static str,
        value: i64,
    },

    #[error("invalid process set: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),
}

/// Crate result type.
pub type Result<T> = std::result::Result<T, Error>;

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
