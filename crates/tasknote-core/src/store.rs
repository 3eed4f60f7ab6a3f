//! The note store: authoritative in-memory state with write-through persistence.
//!
//! Every mutating operation changes [`StoreState`] and then calls
//! [`NoteStore::persist`] as its last step, so storage always holds the
//! latest snapshot when the operation returns. Storage failures are logged
//! and never surface to callers; the in-memory state stays authoritative.

use crate::background::BackgroundSelection;
use crate::codec::{self, StoredEntries};
use crate::error::Result;
use crate::models::{Note, NoteDraft, NoteId, StoreState};
use crate::storage::Preferences;

/// Owns the active note list, the completed counter and the background
pub struct NoteStore<P: Preferences> {
    prefs: P,
    state: StoreState,
}

impl<P: Preferences> NoteStore<P> {
    /// Create a store over `prefs` holding the empty default state
    ///
    /// Call [`NoteStore::load`] before serving any action.
    pub fn new(prefs: P) -> Self {
        Self {
            prefs,
            state: StoreState::default(),
        }
    }

    /// Replace the in-memory state with whatever storage holds.
    ///
    /// Missing, unreadable or undecodable data yields the empty default.
    pub fn load(&mut self) {
        self.state = match StoredEntries::read_from(&self.prefs) {
            Ok(entries) if entries.is_empty() => {
                tracing::debug!("No persisted task list, starting empty");
                StoreState::default()
            }
            Ok(entries) => codec::decode(&entries).unwrap_or_else(|failure| {
                tracing::warn!("Discarding persisted task list: {failure}");
                StoreState::default()
            }),
            Err(error) => {
                tracing::error!("Failed to read persisted task list: {error}");
                StoreState::default()
            }
        };

        tracing::debug!(
            "Loaded {} note(s), {} completed",
            self.state.notes.len(),
            self.state.completed_count
        );
    }

    /// Append a new active note and return it.
    ///
    /// Returns `None` without writing when no id above the largest active
    /// id is left.
    pub fn add_note(&mut self, draft: NoteDraft) -> Option<Note> {
        let Some(id) = self.state.next_note_id() else {
            tracing::warn!("Note id space exhausted, refusing to add note");
            return None;
        };

        let note = Note::from_draft(id, draft);
        self.state.notes.push(note.clone());
        self.persist_or_log();
        Some(note)
    }

    /// Remove a note as done and count it.
    ///
    /// Returns the removed note, or `None` (with no state change) when the id
    /// is not in the active list.
    pub fn complete_note(&mut self, id: NoteId) -> Option<Note> {
        let Some(index) = self.state.position_of(id) else {
            tracing::debug!("Ignoring completion of unknown note {id}");
            return None;
        };

        let note = self.state.notes.remove(index);
        self.state.completed_count = self.state.completed_count.saturating_add(1);
        self.persist_or_log();
        Some(note)
    }

    /// Remove a note without counting it; `None` when the id is unknown
    pub fn delete_note(&mut self, id: NoteId) -> Option<Note> {
        let Some(index) = self.state.position_of(id) else {
            tracing::debug!("Ignoring deletion of unknown note {id}");
            return None;
        };

        let note = self.state.notes.remove(index);
        self.persist_or_log();
        Some(note)
    }

    /// Record a picked background and persist it.
    ///
    /// A blank locator clears the background, like a cancelled picker.
    pub fn set_background(&mut self, locator: &str) -> Option<BackgroundSelection> {
        let selection = BackgroundSelection::new(locator);
        match &selection {
            Some(selection) => {
                self.state.background_uri = Some(selection.locator.clone());
                self.state.is_video = selection.is_video();
            }
            None => {
                self.state.background_uri = None;
                self.state.is_video = false;
            }
        }
        self.persist_or_log();
        selection
    }

    /// Drop the background and persist
    pub fn clear_background(&mut self) {
        self.state.background_uri = None;
        self.state.is_video = false;
        self.persist_or_log();
    }

    /// Current background locator and whether it is a video
    pub fn current_background(&self) -> (Option<&str>, bool) {
        (self.state.background_uri.as_deref(), self.state.is_video)
    }

    /// Encode the whole state and commit it in one batch
    pub fn persist(&self) -> Result<()> {
        let edits = codec::encode(&self.state).to_edits();
        self.prefs.apply(&edits)
    }

    fn persist_or_log(&self) {
        if let Err(error) = self.persist() {
            tracing::error!("Failed to persist task list: {error}");
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.state.notes
    }

    pub const fn completed_count(&self) -> u64 {
        self.state.completed_count
    }

    pub const fn state(&self) -> &StoreState {
        &self.state
    }

    pub const fn preferences(&self) -> &P {
        &self.prefs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{BACKGROUND_URI_KEY, COMPLETED_COUNT_KEY, IS_VIDEO_KEY, NOTES_KEY};
    use crate::db::{Database, SqlitePreferencesRepository};
    use crate::storage::MemoryPreferences;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn loaded_store() -> NoteStore<MemoryPreferences> {
        let mut store = NoteStore::new(MemoryPreferences::new());
        store.load();
        store
    }

    fn ids<P: Preferences>(store: &NoteStore<P>) -> Vec<u64> {
        store.notes().iter().map(|note| note.id.get()).collect()
    }

    #[test]
    fn test_add_note_on_empty_store() {
        let mut store = loaded_store();
        let note = store.add_note(NoteDraft::new("Buy milk", "2%")).unwrap();

        assert_eq!(
            store.notes(),
            &[Note {
                id: NoteId::new(1),
                title: "Buy milk".to_string(),
                description: "2%".to_string(),
                image_uri: None,
                is_completed: false,
            }]
        );
        assert_eq!(note.id, NoteId::new(1));
        assert_eq!(store.completed_count(), 0);
    }

    #[test]
    fn test_add_refused_at_top_of_id_range() {
        let prefs = MemoryPreferences::with_values([
            (
                NOTES_KEY,
                r#"[{"id":18446744073709551615,"title":"last","description":""}]"#,
            ),
            (COMPLETED_COUNT_KEY, "7"),
        ]);
        let mut store = NoteStore::new(&prefs);
        store.load();
        assert_eq!(ids(&store), vec![u64::MAX]);

        assert_eq!(store.add_note(NoteDraft::new("b", "")), None);
        assert_eq!(prefs.commit_count(), 0);

        let mut reopened = NoteStore::new(&prefs);
        reopened.load();
        assert_eq!(ids(&reopened), vec![u64::MAX]);
        assert_eq!(reopened.completed_count(), 7);
    }

    #[test]
    fn test_complete_removes_and_counts() {
        let mut store = loaded_store();
        store.add_note(NoteDraft::new("one", ""));
        store.add_note(NoteDraft::new("two", ""));

        let completed = store.complete_note(NoteId::new(1)).unwrap();

        assert_eq!(completed.title, "one");
        assert_eq!(ids(&store), vec![2]);
        assert_eq!(store.completed_count(), 1);
    }

    #[test]
    fn test_delete_does_not_count() {
        let mut store = loaded_store();
        store.add_note(NoteDraft::new("one", ""));

        assert!(store.delete_note(NoteId::new(1)).is_some());
        assert!(store.notes().is_empty());
        assert_eq!(store.completed_count(), 0);
    }

    #[test]
    fn test_unknown_ids_are_no_ops() {
        let mut store = loaded_store();
        store.add_note(NoteDraft::new("one", ""));
        let commits = store.preferences().commit_count();

        assert_eq!(store.complete_note(NoteId::new(99)), None);
        assert_eq!(store.delete_note(NoteId::new(99)), None);

        assert_eq!(ids(&store), vec![1]);
        assert_eq!(store.completed_count(), 0);
        assert_eq!(store.preferences().commit_count(), commits);
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let mut store = loaded_store();

        store.add_note(NoteDraft::new("one", ""));
        assert_eq!(store.preferences().commit_count(), 1);
        store.add_note(NoteDraft::new("two", ""));
        store.complete_note(NoteId::new(1));
        store.delete_note(NoteId::new(2));
        store.set_background("file:///photo.jpg");
        store.clear_background();
        assert_eq!(store.preferences().commit_count(), 6);

        let persisted = codec::decode(&StoredEntries::read_from(store.preferences()).unwrap());
        assert_eq!(&persisted.unwrap(), store.state());
    }

    #[test]
    fn test_ids_stay_unique_across_interleaved_operations() {
        let mut store = loaded_store();
        let mut ever_assigned = Vec::new();

        for round in 0..5 {
            for _ in 0..3 {
                let before = store.notes().iter().map(|n| n.id).max();
                let note = store
                    .add_note(NoteDraft::new(format!("round {round}"), ""))
                    .unwrap();
                if let Some(max) = before {
                    assert!(note.id > max);
                }
                ever_assigned.push(note.id);
            }
            let first = store.notes()[0].id;
            store.complete_note(first);
            let last = store.notes()[store.notes().len() - 1].id;
            store.delete_note(last);
        }

        let active = store.notes().iter().map(|n| n.id).collect::<Vec<_>>();
        let unique = active.iter().copied().collect::<HashSet<_>>();
        assert_eq!(unique.len(), active.len());
        assert_eq!(store.completed_count(), 5);
        assert_eq!(ever_assigned.len(), 15);
    }

    #[test]
    fn test_id_follows_max_after_deleting_middle() {
        let mut store = loaded_store();
        store.add_note(NoteDraft::new("one", ""));
        store.add_note(NoteDraft::new("two", ""));
        store.add_note(NoteDraft::new("three", ""));
        store.delete_note(NoteId::new(2));

        let note = store.add_note(NoteDraft::new("four", "")).unwrap();
        assert_eq!(note.id, NoteId::new(4));
        assert_eq!(ids(&store), vec![1, 3, 4]);
    }

    #[test]
    fn test_completion_accounting_ignores_deletes_and_misses() {
        let mut store = loaded_store();
        for title in ["a", "b", "c", "d"] {
            store.add_note(NoteDraft::new(title, ""));
        }

        let mut successful = 0;
        for id in [1, 1, 3, 42] {
            if store.complete_note(NoteId::new(id)).is_some() {
                successful += 1;
            }
        }
        store.delete_note(NoteId::new(2));

        assert_eq!(successful, 2);
        assert_eq!(store.completed_count(), 2);
        assert_eq!(ids(&store), vec![4]);
    }

    #[test]
    fn test_background_classification() {
        let mut store = loaded_store();

        store.set_background("file:///clip.mp4");
        assert_eq!(store.current_background(), (Some("file:///clip.mp4"), true));

        store.set_background("file:///photo.jpg");
        assert_eq!(store.current_background(), (Some("file:///photo.jpg"), false));

        store.set_background(" content://media/external/video/media/9\n");
        assert_eq!(
            store.current_background(),
            (Some(" content://media/external/video/media/9\n"), true)
        );

        store.set_background("  ");
        assert_eq!(store.current_background(), (None, false));
    }

    #[test]
    fn test_background_persists_with_notes() {
        let prefs = MemoryPreferences::new();
        {
            let mut store = NoteStore::new(&prefs);
            store.load();
            store.add_note(NoteDraft::new("keep", ""));
            store.set_background("content://media/external/video/media/42");
        }

        let mut reopened = NoteStore::new(&prefs);
        reopened.load();
        assert_eq!(
            reopened.current_background(),
            (Some("content://media/external/video/media/42"), true)
        );
        assert_eq!(reopened.notes().len(), 1);
        assert_eq!(prefs.get(IS_VIDEO_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_load_twice_is_idempotent() {
        let prefs = MemoryPreferences::new();
        {
            let mut store = NoteStore::new(&prefs);
            store.load();
            store.add_note(NoteDraft::new("one", "x"));
            store.add_note(NoteDraft::new("two", "y"));
            store.complete_note(NoteId::new(1));
        }

        let mut store = NoteStore::new(&prefs);
        store.load();
        let first = store.state().clone();
        store.load();
        assert_eq!(store.state(), &first);
        assert_eq!(first.completed_count, 1);
    }

    #[test]
    fn test_load_defaults_on_corrupted_data() {
        let prefs = MemoryPreferences::with_values([
            (NOTES_KEY, "[{\"id\":1,\"title\""),
            (COMPLETED_COUNT_KEY, "5"),
            (BACKGROUND_URI_KEY, "file:///photo.jpg"),
        ]);
        let mut store = NoteStore::new(&prefs);
        store.load();

        assert_eq!(store.state(), &StoreState::default());
    }

    #[test]
    fn test_load_defaults_on_missing_data() {
        let store = loaded_store();
        assert_eq!(store.state(), &StoreState::default());
        assert_eq!(store.preferences().commit_count(), 0);
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let mut store = loaded_store();
        store.preferences().set_fail_writes(true);

        let note = store.add_note(NoteDraft::new("unsaved", "")).unwrap();

        assert_eq!(store.notes(), &[note]);
        assert!(store.persist().is_err());
        assert!(store.preferences().snapshot().is_empty());
    }

    #[test]
    fn test_sqlite_backed_store_survives_reopen() {
        let db = Database::open_in_memory().unwrap();
        {
            let prefs = SqlitePreferencesRepository::new(db.connection(), codec::PREFERENCES_SCOPE);
            let mut store = NoteStore::new(prefs);
            store.load();
            store.add_note(NoteDraft::new("Buy milk", "2%"));
            store.add_note(NoteDraft::new("Walk dog", ""));
            store.complete_note(NoteId::new(1));
            store.set_background("file:///clip.mp4");
        }

        let prefs = SqlitePreferencesRepository::new(db.connection(), codec::PREFERENCES_SCOPE);
        let mut store = NoteStore::new(prefs);
        store.load();

        assert_eq!(ids(&store), vec![2]);
        assert_eq!(store.completed_count(), 1);
        assert_eq!(store.current_background(), (Some("file:///clip.mp4"), true));
    }
}
