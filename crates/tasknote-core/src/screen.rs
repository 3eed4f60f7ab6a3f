//! Task list screen controller.
//!
//! The controller is the only way user intents reach the note store. It is
//! created by [`ScreenController::activate`], which loads persisted state
//! before returning, so no action can run against an unloaded store.

use std::time::Duration;

use serde::Serialize;

use crate::background::{request_grant_best_effort, BackgroundSelection, MediaKind, ResourceGrants};
use crate::clock::{now_display, ClockTicker};
use crate::models::{Note, NoteDraft, NoteId};
use crate::storage::Preferences;
use crate::store::NoteStore;

/// A user intent dispatched from the display surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    /// Result of the note-creation flow; `None` when it was cancelled
    AddNote(Option<NoteDraft>),
    /// The completion checkbox of a note was ticked
    CompleteNote(NoteId),
    /// Long-press on a note: ask before deleting it
    RequestDelete(NoteId),
    /// "Yes" in the delete dialog
    ConfirmDelete,
    /// "No" or dismissal of the delete dialog
    CancelDelete,
    /// Result of the background picker; `None` when nothing was picked
    ChangeBackground(Option<String>),
}

/// What an action did to the screen state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    NoteAdded(Note),
    NoteCompleted(Note),
    DeletePending(Note),
    NoteDeleted(Note),
    BackgroundChanged(Option<BackgroundSelection>),
    Unchanged,
}

/// Read-only snapshot consumed by the display surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub notes: Vec<Note>,
    pub completed_count: u64,
    pub background: Option<BackgroundSelection>,
    pub clock: String,
    pub pending_delete: Option<NoteId>,
}

impl ViewState {
    /// Title bar text
    pub fn completed_label(&self) -> String {
        format!("Completed: {}", self.completed_count)
    }
}

pub struct ScreenController<P: Preferences, G: ResourceGrants> {
    store: NoteStore<P>,
    grants: G,
    pending_delete: Option<NoteId>,
    clock: Option<ClockTicker>,
}

impl<P: Preferences, G: ResourceGrants> ScreenController<P, G> {
    /// Load persisted state and return a controller ready for actions
    pub fn activate(prefs: P, grants: G) -> Self {
        let mut store = NoteStore::new(prefs);
        store.load();
        tracing::debug!("Task list screen activated");

        Self {
            store,
            grants,
            pending_delete: None,
            clock: None,
        }
    }

    /// Start the live clock; must run inside a tokio runtime
    #[must_use]
    pub fn with_clock(mut self, period: Duration) -> Self {
        self.clock = Some(ClockTicker::spawn(period));
        self
    }

    pub fn dispatch(&mut self, action: ScreenAction) -> ActionOutcome {
        match action {
            ScreenAction::AddNote(Some(draft)) => self
                .store
                .add_note(draft)
                .map_or(ActionOutcome::Unchanged, ActionOutcome::NoteAdded),
            ScreenAction::AddNote(None) => ActionOutcome::Unchanged,
            ScreenAction::CompleteNote(id) => self
                .store
                .complete_note(id)
                .map_or(ActionOutcome::Unchanged, ActionOutcome::NoteCompleted),
            ScreenAction::RequestDelete(id) => match self.store.state().get(id) {
                Some(note) => {
                    self.pending_delete = Some(id);
                    ActionOutcome::DeletePending(note.clone())
                }
                None => ActionOutcome::Unchanged,
            },
            ScreenAction::ConfirmDelete => self
                .pending_delete
                .take()
                .and_then(|id| self.store.delete_note(id))
                .map_or(ActionOutcome::Unchanged, ActionOutcome::NoteDeleted),
            ScreenAction::CancelDelete => {
                self.pending_delete = None;
                ActionOutcome::Unchanged
            }
            ScreenAction::ChangeBackground(locator) => self.change_background(locator.as_deref()),
        }
    }

    fn change_background(&mut self, locator: Option<&str>) -> ActionOutcome {
        let Some(locator) = locator else {
            self.store.clear_background();
            return ActionOutcome::BackgroundChanged(None);
        };

        let selection = self.store.set_background(locator);
        if let Some(selection) = &selection {
            request_grant_best_effort(&self.grants, selection.locator.trim());
        }
        ActionOutcome::BackgroundChanged(selection)
    }

    pub fn view(&self) -> ViewState {
        let (background_uri, is_video) = self.store.current_background();
        ViewState {
            notes: self.store.notes().to_vec(),
            completed_count: self.store.completed_count(),
            background: background_uri.map(|locator| BackgroundSelection {
                locator: locator.to_string(),
                kind: MediaKind::from_video_flag(is_video),
            }),
            clock: self
                .clock
                .as_ref()
                .map_or_else(now_display, ClockTicker::current),
            pending_delete: self.pending_delete,
        }
    }

    pub const fn store(&self) -> &NoteStore<P> {
        &self.store
    }
}
