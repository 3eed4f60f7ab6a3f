//! Persistence codec for the note store.
//!
//! The store state is kept under four keys of the `task_list_prefs` scope:
//! the note list as a JSON array, the completed counter, the background
//! locator and the media-kind flag. [`encode`] is total; [`decode`] turns
//! anything malformed into a [`DecodeFailure`] so the caller can fall back
//! to an empty state. Neither function touches storage.

use serde_json::{json, Value};
use std::collections::HashSet;
use thiserror::Error;

use crate::error::Result;
use crate::models::{Note, NoteId, StoreState};
use crate::storage::{PreferenceEdits, Preferences};

/// Preference scope holding the task list
pub const PREFERENCES_SCOPE: &str = "task_list_prefs";
/// Key of the JSON-encoded active note list
pub const NOTES_KEY: &str = "notes";
/// Key of the completed counter
pub const COMPLETED_COUNT_KEY: &str = "completed_tasks";
/// Key of the background locator
pub const BACKGROUND_URI_KEY: &str = "background_uri";
/// Key of the background media-kind flag
pub const IS_VIDEO_KEY: &str = "is_video";

/// Raw persisted values, one per key; `None` means the key is absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredEntries {
    pub notes: Option<String>,
    pub completed_count: Option<String>,
    pub background_uri: Option<String>,
    pub is_video: Option<String>,
}

impl StoredEntries {
    /// Read all four keys from a preferences handle
    pub fn read_from<P: Preferences>(prefs: &P) -> Result<Self> {
        Ok(Self {
            notes: prefs.get(NOTES_KEY)?,
            completed_count: prefs.get(COMPLETED_COUNT_KEY)?,
            background_uri: prefs.get(BACKGROUND_URI_KEY)?,
            is_video: prefs.get(IS_VIDEO_KEY)?,
        })
    }

    /// True when nothing has ever been written
    pub const fn is_empty(&self) -> bool {
        self.notes.is_none()
            && self.completed_count.is_none()
            && self.background_uri.is_none()
            && self.is_video.is_none()
    }

    /// Edit batch that makes the store hold exactly these entries
    #[must_use]
    pub fn to_edits(&self) -> PreferenceEdits {
        PreferenceEdits::new()
            .put_optional(NOTES_KEY, self.notes.as_deref())
            .put_optional(COMPLETED_COUNT_KEY, self.completed_count.as_deref())
            .put_optional(BACKGROUND_URI_KEY, self.background_uri.as_deref())
            .put_optional(IS_VIDEO_KEY, self.is_video.as_deref())
    }
}

/// Why persisted entries could not be turned back into a store state
#[derive(Debug, Error)]
pub enum DecodeFailure {
    #[error("note list is not valid JSON for the note schema: {0}")]
    Notes(#[from] serde_json::Error),
    #[error("note id {0} appears more than once")]
    DuplicateNoteId(NoteId),
    #[error("completed counter is not a non-negative integer: {0:?}")]
    CompletedCount(String),
    #[error("media-kind flag is not a boolean: {0:?}")]
    MediaKind(String),
}

/// Encode a store state into persisted entries
#[must_use]
pub fn encode(state: &StoreState) -> StoredEntries {
    let notes = Value::Array(state.notes.iter().map(note_to_value).collect());

    StoredEntries {
        notes: Some(notes.to_string()),
        completed_count: Some(state.completed_count.to_string()),
        background_uri: state.background_uri.clone(),
        is_video: Some(state.is_video.to_string()),
    }
}

/// Decode persisted entries; absent keys take their default values
pub fn decode(entries: &StoredEntries) -> std::result::Result<StoreState, DecodeFailure> {
    let notes = match entries.notes.as_deref() {
        Some(raw) => decode_notes(raw)?,
        None => Vec::new(),
    };

    let completed_count = match entries.completed_count.as_deref() {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| DecodeFailure::CompletedCount(raw.to_string()))?,
        None => 0,
    };

    let is_video = match entries.is_video.as_deref() {
        Some(raw) => parse_flag(raw).ok_or_else(|| DecodeFailure::MediaKind(raw.to_string()))?,
        None => false,
    };

    Ok(StoreState {
        notes,
        completed_count,
        background_uri: entries.background_uri.clone(),
        is_video,
    })
}

fn decode_notes(raw: &str) -> std::result::Result<Vec<Note>, DecodeFailure> {
    let mut notes: Vec<Note> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(notes.len());
    for note in &mut notes {
        if !seen.insert(note.id) {
            return Err(DecodeFailure::DuplicateNoteId(note.id));
        }
        // Completed notes leave the list, so a stored flag is stale
        if note.is_completed {
            tracing::debug!("Clearing completion flag on active note {}", note.id);
            note.is_completed = false;
        }
    }

    Ok(notes)
}

fn note_to_value(note: &Note) -> Value {
    json!({
        "id": note.id.get(),
        "title": note.title,
        "description": note.description,
        "imageUri": note.image_uri,
        "isCompleted": note.is_completed,
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
