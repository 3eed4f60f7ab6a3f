use tasknote_core::background::ResourceGrants;
use tasknote_core::storage::Preferences;
use tasknote_core::{ScreenController, ViewState};

use crate::commands::common::{format_background_line, format_note_lines};
use crate::error::CliError;

pub fn run_list<P: Preferences, G: ResourceGrants>(
    screen: &ScreenController<P, G>,
    json: bool,
) -> Result<(), CliError> {
    let view = screen.view();

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        for line in render_list(&view) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn render_list(view: &ViewState) -> Vec<String> {
    let mut lines = vec![
        format!("{}    {}", view.completed_label(), view.clock),
        format_background_line(view),
        String::new(),
    ];

    if view.notes.is_empty() {
        lines.push("No notes".to_string());
    } else {
        lines.extend(format_note_lines(&view.notes));
    }

    lines
}
