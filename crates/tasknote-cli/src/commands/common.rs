use std::env;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use tasknote_core::background::LocalFileGrants;
use tasknote_core::codec::PREFERENCES_SCOPE;
use tasknote_core::db::{Database, SqlitePreferencesRepository};
use tasknote_core::{Note, NoteDraft, NoteId, ScreenController, ViewState};

use crate::error::CliError;

/// Screen controller backed by the on-disk preferences table
pub type Screen<'a> = ScreenController<SqlitePreferencesRepository<'a>, LocalFileGrants>;

const EDITOR_TEMPLATE: &str = "\n\n# First line is the title, the rest is the description.\n# Lines starting with '#' are ignored. Leave empty to cancel.\n";

pub fn open_database(path: &Path) -> Result<Database, CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(Database::open(path)?)
}

pub fn activate_screen(db: &Database) -> Screen<'_> {
    let prefs = SqlitePreferencesRepository::new(db.connection(), PREFERENCES_SCOPE);
    ScreenController::activate(prefs, LocalFileGrants)
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .map(|note| {
            let preview = note.title_preview(40);
            let image = if note.image_uri.is_some() { "  [image]" } else { "" };
            if note.description.is_empty() {
                format!("{:>4}  {preview}{image}", note.id)
            } else {
                let description = note.description.lines().next().unwrap_or_default().trim();
                format!("{:>4}  {preview:<40}  {description}{image}", note.id)
            }
        })
        .collect()
}

pub fn format_background_line(view: &ViewState) -> String {
    view.background.as_ref().map_or_else(
        || "Background: none".to_string(),
        |background| {
            let kind = if background.is_video() { "video" } else { "image" };
            format!("Background ({kind}): {}", background.locator)
        },
    )
}

/// Build a draft from flags, falling back to piped stdin and then the editor.
///
/// `Ok(None)` means the user cancelled by leaving the buffer empty.
pub fn resolve_note_draft(
    title_parts: &[String],
    description: Option<String>,
    image: Option<String>,
) -> Result<Option<NoteDraft>, CliError> {
    if let Some(title) = normalize_content(&title_parts.join(" ")) {
        let description = description.unwrap_or_default().trim().to_string();
        return Ok(Some(NoteDraft::new(title, description).with_image(image)));
    }

    let buffer = match read_piped_stdin()? {
        Some(buffer) => buffer,
        None => capture_editor_input_with_initial(EDITOR_TEMPLATE)?.unwrap_or_default(),
    };

    Ok(draft_from_buffer(&buffer, description, image))
}

pub fn draft_from_buffer(
    buffer: &str,
    description: Option<String>,
    image: Option<String>,
) -> Option<NoteDraft> {
    let cleaned = strip_comment_lines(buffer);
    let mut draft = NoteDraft::from_editor_buffer(&cleaned)?;
    if let Some(description) = normalize_content(&description.unwrap_or_default()) {
        draft.description = description;
    }
    Some(draft.with_image(image))
}

fn strip_comment_lines(buffer: &str) -> String {
    buffer
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn parse_note_id(id: &str) -> Result<NoteId, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyNoteId);
    }

    trimmed
        .parse::<NoteId>()
        .map_err(|_| CliError::InvalidNoteId(trimmed.to_string()))
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

pub fn capture_editor_input_with_initial(
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_note_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let note_content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_content(&note_content))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let mut command = Command::new(program);
            command.args(parts).arg(file_path);

            let status = command.status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

pub fn create_temp_note_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("tasknote-note-{}-{now}.txt", std::process::id()))
}

/// Ask a yes/no question on stderr; anything but an explicit yes is a no
pub fn confirm(prompt: &str) -> Result<bool, CliError> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt} [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>, config_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("TASKNOTE_DB_PATH").map(PathBuf::from))
        .or(config_db_path)
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(env::temp_dir)
        .join("tasknote")
        .join("tasknote.db")
}
