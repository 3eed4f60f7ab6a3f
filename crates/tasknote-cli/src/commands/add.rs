use tasknote_core::background::ResourceGrants;
use tasknote_core::storage::Preferences;
use tasknote_core::{ActionOutcome, Note, NoteDraft, ScreenAction, ScreenController};

pub fn run_add<P: Preferences, G: ResourceGrants>(
    screen: &mut ScreenController<P, G>,
    draft: Option<NoteDraft>,
) -> Option<Note> {
    let cancelled = draft.is_none();

    match screen.dispatch(ScreenAction::AddNote(draft)) {
        ActionOutcome::NoteAdded(note) => {
            println!("{}", note.id);
            Some(note)
        }
        _ if cancelled => {
            eprintln!("Cancelled, no note created");
            None
        }
        _ => {
            eprintln!("No note id left above the largest one, no note created");
            None
        }
    }
}
