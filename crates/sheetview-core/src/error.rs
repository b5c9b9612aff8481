//! Error types for sheetview-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetview-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid column letters (empty or non-alphabetic)
    #[error("Invalid column letters: {0:?}")]
    InvalidColumnLetters(String),
}
