//! Data models for tasknote

mod note;
mod store_state;

pub use note::{Note, NoteDraft, NoteId};
pub use store_state::StoreState;
