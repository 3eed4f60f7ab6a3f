use tasknote_core::background::ResourceGrants;
use tasknote_core::storage::Preferences;
use tasknote_core::{ActionOutcome, Note, ScreenAction, ScreenController};

use crate::commands::common::parse_note_id;
use crate::error::CliError;

/// Delete a note after `confirm` approves it.
///
/// Returns the removed note, or `None` when the confirmation was declined.
pub fn run_delete<P, G, F>(
    screen: &mut ScreenController<P, G>,
    id: &str,
    confirm: F,
) -> Result<Option<Note>, CliError>
where
    P: Preferences,
    G: ResourceGrants,
    F: FnOnce(&Note) -> Result<bool, CliError>,
{
    let note_id = parse_note_id(id)?;

    let ActionOutcome::DeletePending(note) = screen.dispatch(ScreenAction::RequestDelete(note_id))
    else {
        return Err(CliError::NoteNotFound(note_id.to_string()));
    };

    let approved = match confirm(&note) {
        Ok(approved) => approved,
        Err(error) => {
            screen.dispatch(ScreenAction::CancelDelete);
            return Err(error);
        }
    };

    if !approved {
        screen.dispatch(ScreenAction::CancelDelete);
        eprintln!("Kept note {note_id}");
        return Ok(None);
    }

    match screen.dispatch(ScreenAction::ConfirmDelete) {
        ActionOutcome::NoteDeleted(note) => {
            println!("{}", note.id);
            Ok(Some(note))
        }
        _ => Err(CliError::NoteNotFound(note_id.to_string())),
    }
}
