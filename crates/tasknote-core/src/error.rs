//! Error types for tasknote-core

use thiserror::Error;

/// Result type alias using tasknote-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tasknote-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// `SQLite` error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
