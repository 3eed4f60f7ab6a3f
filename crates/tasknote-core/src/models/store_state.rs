//! Store state model

use super::note::{Note, NoteId};

/// Everything the note store persists: active notes plus scalars
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    /// Active notes in insertion (display) order
    pub notes: Vec<Note>,
    /// Number of notes ever completed; never decremented
    pub completed_count: u64,
    /// Locator of the chosen background, if any
    pub background_uri: Option<String>,
    /// Whether the background renders as a video
    pub is_video: bool,
}

impl StoreState {
    /// Id for the next note: one past the largest active id, or 1 when empty.
    ///
    /// `None` when the largest active id is already `u64::MAX`.
    #[must_use]
    pub fn next_note_id(&self) -> Option<NoteId> {
        self.notes
            .iter()
            .map(|note| note.id)
            .max()
            .map_or(Some(NoteId::FIRST), NoteId::next)
    }

    /// Position of the note with the given id in the active list
    #[must_use]
    pub fn position_of(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    #[must_use]
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }
}
