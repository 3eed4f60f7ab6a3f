use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] tasknote_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Auth(#[from] tasknote_core::auth::AuthError),
    #[error("Login required: pass --username/--password or set TASKNOTE_USERNAME/TASKNOTE_PASSWORD")]
    MissingCredentials,
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Invalid note ID: {0}")]
    InvalidNoteId(String),
    #[error("No note with id {0}")]
    NoteNotFound(String),
    #[error("Background locator cannot be empty")]
    EmptyLocator,
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
