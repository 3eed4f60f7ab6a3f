//! tasknote-core - Core library for tasknote
//!
//! This crate contains the note store and its persistence codec, the
//! background selection state, and the screen controller that front ends
//! drive. Storage is a scoped key-value store backed by `SQLite`.

pub mod auth;
pub mod background;
pub mod clock;
pub mod codec;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod screen;
pub mod storage;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use models::{Note, NoteDraft, NoteId, StoreState};
pub use screen::{ActionOutcome, ScreenAction, ScreenController, ViewState};
pub use store::NoteStore;
