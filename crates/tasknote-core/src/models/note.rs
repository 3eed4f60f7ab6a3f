//! Note model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// A note identifier, unique within the store and assigned sequentially
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(u64);

impl NoteId {
    /// The id handed to the first note of an empty store
    pub const FIRST: Self = Self(1);

    /// Wrap a raw id value
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw id value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id following this one; `None` at the top of the id range
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for NoteId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A note in the active list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Store-assigned identifier
    pub id: NoteId,
    /// Title line, may be empty
    pub title: String,
    /// Free-form description, may be empty
    pub description: String,
    /// Opaque locator of an attached image
    #[serde(default)]
    pub image_uri: Option<String>,
    /// Completion flag; active notes always carry `false`
    #[serde(default)]
    pub is_completed: bool,
}

impl Note {
    /// Build an active note from a draft under the given id
    #[must_use]
    pub fn from_draft(id: NoteId, draft: NoteDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            image_uri: draft.image_uri,
            is_completed: false,
        }
    }

    /// Get the title as a single-line preview, truncated to `max_len` characters
    #[must_use]
    pub fn title_preview(&self, max_len: usize) -> String {
        let collapsed = self.title.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.chars().count() <= max_len {
            collapsed
        } else {
            let mut truncated = collapsed
                .chars()
                .take(max_len.saturating_sub(3))
                .collect::<String>();
            truncated.push_str("...");
            truncated
        }
    }
}

/// The result of a successful note-creation flow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub description: String,
    pub image_uri: Option<String>,
}

impl NoteDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image_uri: None,
        }
    }

    /// Attach an image locator; blank locators are dropped
    #[must_use]
    pub fn with_image(mut self, image_uri: Option<String>) -> Self {
        self.image_uri = crate::util::normalize_text_option(image_uri);
        self
    }

    /// Parse an editor buffer: first line is the title, the rest the description
    ///
    /// Returns `None` when the buffer is blank, which counts as a cancelled flow.
    #[must_use]
    pub fn from_editor_buffer(buffer: &str) -> Option<Self> {
        let trimmed = buffer.trim();
        if trimmed.is_empty() {
            return None;
        }

        let (title, description) = trimmed.split_once('\n').unwrap_or((trimmed, ""));
        Some(Self::new(title.trim(), description.trim()))
    }
}
