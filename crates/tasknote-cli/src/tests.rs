use std::path::PathBuf;

use clap::Parser;
use pretty_assertions::assert_eq;
use tasknote_core::background::{MediaKind, NoGrants};
use tasknote_core::storage::MemoryPreferences;
use tasknote_core::{NoteDraft, NoteId, ScreenController};

use crate::cli::{BackgroundCommands, Cli, Commands, ExportFormat};
use crate::commands::add::run_add;
use crate::commands::background::{run_background, set_background};
use crate::commands::common::{
    activate_screen, draft_from_buffer, format_note_lines, is_affirmative, normalize_content,
    open_database, parse_note_id, resolve_db_path,
};
use crate::commands::complete::run_complete;
use crate::commands::config::apply_config_init;
use crate::commands::delete::run_delete;
use crate::commands::export::{resolve_export_path, run_export};
use crate::commands::list::render_list;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::login;

fn memory_screen() -> ScreenController<MemoryPreferences, NoGrants> {
    ScreenController::activate(MemoryPreferences::new(), NoGrants)
}

#[test]
fn parse_note_id_rejects_empty_and_garbage() {
    assert!(matches!(parse_note_id(" \n "), Err(CliError::EmptyNoteId)));
    assert!(matches!(parse_note_id("abc"), Err(CliError::InvalidNoteId(id)) if id == "abc"));
    assert_eq!(parse_note_id(" 7 ").unwrap(), NoteId::new(7));
}

#[test]
fn normalize_content_trims_and_rejects_blank() {
    assert_eq!(normalize_content("  hi  "), Some("hi".to_string()));
    assert_eq!(normalize_content(" \t\n"), None);
}

#[test]
fn is_affirmative_accepts_only_yes() {
    assert!(is_affirmative("y\n"));
    assert!(is_affirmative(" YES "));
    assert!(!is_affirmative("n"));
    assert!(!is_affirmative(""));
}

#[test]
fn draft_from_buffer_skips_comment_lines() {
    let buffer = "Buy milk\n2% please\n# First line is the title\n";
    let draft = draft_from_buffer(buffer, None, Some(" file:///milk.jpg ".to_string())).unwrap();

    assert_eq!(draft.title, "Buy milk");
    assert_eq!(draft.description, "2% please");
    assert_eq!(draft.image_uri.as_deref(), Some("file:///milk.jpg"));
}

#[test]
fn draft_from_buffer_treats_template_only_as_cancel() {
    let buffer = "\n\n# First line is the title\n# Leave empty to cancel.\n";
    assert_eq!(draft_from_buffer(buffer, None, None), None);
}

#[test]
fn draft_from_buffer_prefers_flag_description() {
    let draft = draft_from_buffer("Title\nfrom editor", Some("from flag".to_string()), None).unwrap();
    assert_eq!(draft.description, "from flag");
}

#[test]
fn resolve_db_path_prefers_flag_over_config() {
    let resolved = resolve_db_path(
        Some(PathBuf::from("/tmp/flag.db")),
        Some(PathBuf::from("/tmp/config.db")),
    );
    assert_eq!(resolved, PathBuf::from("/tmp/flag.db"));
}

#[test]
fn login_requires_both_credentials() {
    let config = CliConfig::default();

    assert!(matches!(
        login(&config, Some("root"), None),
        Err(CliError::MissingCredentials)
    ));
    assert!(matches!(
        login(&config, Some("root"), Some("nope")),
        Err(CliError::Auth(_))
    ));
    assert!(login(&config, Some("root"), Some("root")).is_ok());
}

#[test]
fn apply_config_init_overrides_given_fields() {
    let mut config = CliConfig::default();
    apply_config_init(&mut config, Some(" alice ".to_string()), None, Some(500));

    assert_eq!(config.credentials.username, "alice");
    assert_eq!(config.credentials.password, "root");
    assert_eq!(config.clock_tick_ms, 500);
}

#[test]
fn add_and_list_show_new_note() {
    let mut screen = memory_screen();
    let note = run_add(&mut screen, Some(NoteDraft::new("Buy milk", "2%"))).unwrap();
    assert_eq!(note.id, NoteId::FIRST);

    let lines = render_list(&screen.view());
    assert!(lines[0].starts_with("Completed: 0"));
    assert_eq!(lines[1], "Background: none");
    assert!(lines[3].contains("Buy milk"));
    assert!(lines[3].contains("2%"));
}

#[test]
fn cancelled_add_writes_nothing() {
    let mut screen = memory_screen();
    assert_eq!(run_add(&mut screen, None), None);
    assert_eq!(screen.store().preferences().commit_count(), 0);
    assert_eq!(render_list(&screen.view())[3], "No notes");
}

#[test]
fn complete_unknown_id_is_reported() {
    let mut screen = memory_screen();
    assert!(matches!(
        run_complete(&mut screen, "3"),
        Err(CliError::NoteNotFound(id)) if id == "3"
    ));
    assert_eq!(screen.view().completed_count, 0);
}

#[test]
fn complete_bumps_counter() {
    let mut screen = memory_screen();
    run_add(&mut screen, Some(NoteDraft::new("a", "")));

    let completed = run_complete(&mut screen, "1").unwrap();
    assert_eq!(completed.title, "a");
    assert_eq!(screen.view().completed_label(), "Completed: 1");
}

#[test]
fn declined_delete_keeps_note() {
    let mut screen = memory_screen();
    run_add(&mut screen, Some(NoteDraft::new("a", "")));

    let deleted = run_delete(&mut screen, "1", |_| Ok(false)).unwrap();
    assert_eq!(deleted, None);
    assert_eq!(screen.view().notes.len(), 1);
    assert_eq!(screen.view().pending_delete, None);
}

#[test]
fn confirmed_delete_removes_without_counting() {
    let mut screen = memory_screen();
    run_add(&mut screen, Some(NoteDraft::new("a", "")));

    let deleted = run_delete(&mut screen, "1", |note| {
        assert_eq!(note.title, "a");
        Ok(true)
    })
    .unwrap();
    assert_eq!(deleted.map(|note| note.id), Some(NoteId::FIRST));
    assert!(screen.view().notes.is_empty());
    assert_eq!(screen.view().completed_count, 0);
}

#[test]
fn failed_confirmation_cancels_pending_delete() {
    let mut screen = memory_screen();
    run_add(&mut screen, Some(NoteDraft::new("a", "")));

    let result = run_delete(&mut screen, "1", |_| {
        Err(CliError::Io(std::io::Error::other("stdin closed")))
    });
    assert!(result.is_err());
    assert_eq!(screen.view().pending_delete, None);
    assert_eq!(screen.view().notes.len(), 1);
}

#[test]
fn background_set_and_clear() {
    let mut screen = memory_screen();

    let selection = set_background(&mut screen, " file:///clip.mp4 ").unwrap();
    assert_eq!(selection.kind, MediaKind::Video);
    assert_eq!(selection.locator, " file:///clip.mp4 ");
    assert!(matches!(set_background(&mut screen, "  "), Err(CliError::EmptyLocator)));

    run_background(&mut screen, BackgroundCommands::Clear).unwrap();
    assert_eq!(screen.view().background, None);
}

#[test]
fn sqlite_screen_persists_between_activations() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("tasknote.db");

    {
        let db = open_database(&db_path).unwrap();
        let mut screen = activate_screen(&db);
        run_add(&mut screen, Some(NoteDraft::new("persisted", "")));
        set_background(&mut screen, "file:///photo.jpg").unwrap();
    }

    let db = open_database(&db_path).unwrap();
    let screen = activate_screen(&db);
    let view = screen.view();
    assert_eq!(view.notes.len(), 1);
    assert_eq!(view.notes[0].title, "persisted");
    assert_eq!(view.background.unwrap().locator, "file:///photo.jpg");
}

#[test]
fn export_writes_generated_name_into_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut screen = memory_screen();
    run_add(&mut screen, Some(NoteDraft::new("Export me", "")));

    let target = resolve_export_path(dir.path(), ExportFormat::Markdown);
    assert_eq!(target.parent(), Some(dir.path()));
    assert!(target.extension().is_some_and(|ext| ext == "md"));

    let file = dir.path().join("out.json");
    run_export(screen.store().state(), ExportFormat::Json, Some(&file)).unwrap();
    let written = std::fs::read_to_string(&file).unwrap();
    assert!(written.contains("\"Export me\""));
}

#[test]
fn format_note_lines_marks_images() {
    let note = tasknote_core::Note::from_draft(
        NoteId::new(12),
        NoteDraft::new("Paint", "").with_image(Some("file:///wall.jpg".to_string())),
    );
    assert_eq!(format_note_lines(&[note]), vec!["  12  Paint  [image]".to_string()]);
}

#[test]
fn cli_parses_delete_with_yes_flag() {
    let cli = Cli::try_parse_from(["tasknote", "delete", "4", "--yes"]).unwrap();
    assert!(matches!(cli.command, Commands::Delete { id, yes: true } if id == "4"));
}
