use tasknote_core::background::ResourceGrants;
use tasknote_core::storage::Preferences;
use tasknote_core::{ActionOutcome, Note, ScreenAction, ScreenController};

use crate::commands::common::parse_note_id;
use crate::error::CliError;

pub fn run_complete<P: Preferences, G: ResourceGrants>(
    screen: &mut ScreenController<P, G>,
    id: &str,
) -> Result<Note, CliError> {
    let note_id = parse_note_id(id)?;

    match screen.dispatch(ScreenAction::CompleteNote(note_id)) {
        ActionOutcome::NoteCompleted(note) => {
            println!("Completed {}: {}", note.id, note.title);
            println!("{}", screen.view().completed_label());
            Ok(note)
        }
        _ => Err(CliError::NoteNotFound(note_id.to_string())),
    }
}
