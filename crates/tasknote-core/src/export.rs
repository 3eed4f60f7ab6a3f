//! Task list export helpers.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::models::{Note, StoreState};

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Serializable note representation used in JSON and Markdown exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNote {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub image_uri: Option<String>,
}

/// Whole-list export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub completed_count: u64,
    pub background_uri: Option<String>,
    pub is_video: bool,
    pub notes: Vec<ExportNote>,
}

#[must_use]
pub fn note_to_export_item(note: &Note) -> ExportNote {
    ExportNote {
        id: note.id.get(),
        title: note.title.clone(),
        description: note.description.clone(),
        image_uri: note.image_uri.clone(),
    }
}

#[must_use]
pub fn state_to_export_document(state: &StoreState) -> ExportDocument {
    ExportDocument {
        completed_count: state.completed_count,
        background_uri: state.background_uri.clone(),
        is_video: state.is_video,
        notes: state.notes.iter().map(note_to_export_item).collect(),
    }
}

/// Render the task list as pretty-printed JSON.
pub fn render_json_export(state: &StoreState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&state_to_export_document(state))
}

/// Render notes in Markdown with frontmatter blocks.
#[must_use]
pub fn render_markdown_export(state: &StoreState) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Completed: {}", state.completed_count);

    for note in &state.notes {
        output.push('\n');
        let _ = writeln!(output, "---");
        let _ = writeln!(output, "id: {}", note.id);
        if let Some(image_uri) = &note.image_uri {
            let _ = writeln!(output, "image: {image_uri}");
        }
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        let _ = writeln!(output, "## {}", note.title);
        if !note.description.is_empty() {
            let _ = writeln!(output);
            output.push_str(&note.description);
            output.push('\n');
        }
    }

    output
}

/// Render the task list in the selected format.
pub fn render_export(state: &StoreState, format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(state),
        ExportFormat::Markdown => Ok(render_markdown_export(state)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("tasknote-export-{timestamp_ms}.{}", format.extension())
}
