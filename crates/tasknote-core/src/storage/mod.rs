//! Durable key-value storage abstractions.
//!
//! A [`Preferences`] handle is a string-keyed store scoped to one namespace.
//! Reads go through [`Preferences::get`]; writes are collected into a
//! [`PreferenceEdits`] batch and committed atomically by [`Preferences::apply`],
//! so a partially written snapshot is never observable.

mod memory;

pub use memory::MemoryPreferences;

use crate::error::Result;

/// Trait for scoped key-value storage operations
pub trait Preferences {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Commit a batch of edits in one unit
    fn apply(&self, edits: &PreferenceEdits) -> Result<()>;
}

impl<P: Preferences + ?Sized> Preferences for &P {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn apply(&self, edits: &PreferenceEdits) -> Result<()> {
        (**self).apply(edits)
    }
}

/// A single pending change in a [`PreferenceEdits`] batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceEdit {
    Put { key: String, value: String },
    Remove { key: String },
}

/// An ordered batch of puts and removals, applied together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceEdits {
    edits: Vec<PreferenceEdit>,
}

impl PreferenceEdits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn put_string(mut self, key: &str, value: impl Into<String>) -> Self {
        self.edits.push(PreferenceEdit::Put {
            key: key.to_string(),
            value: value.into(),
        });
        self
    }

    /// Store `value` under `key`, or remove the key when `value` is `None`
    #[must_use]
    pub fn put_optional(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.put_string(key, value),
            None => self.remove(key),
        }
    }

    #[must_use]
    pub fn remove(mut self, key: &str) -> Self {
        self.edits.push(PreferenceEdit::Remove {
            key: key.to_string(),
        });
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &PreferenceEdit> {
        self.edits.iter()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}
