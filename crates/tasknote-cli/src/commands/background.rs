use tasknote_core::background::{BackgroundSelection, ResourceGrants};
use tasknote_core::storage::Preferences;
use tasknote_core::{ActionOutcome, ScreenAction, ScreenController};

use crate::cli::BackgroundCommands;
use crate::commands::common::{format_background_line, normalize_content};
use crate::error::CliError;

pub fn run_background<P: Preferences, G: ResourceGrants>(
    screen: &mut ScreenController<P, G>,
    command: BackgroundCommands,
) -> Result<(), CliError> {
    match command {
        BackgroundCommands::Set { locator } => {
            set_background(screen, &locator)?;
            println!("{}", format_background_line(&screen.view()));
        }
        BackgroundCommands::Clear => {
            screen.dispatch(ScreenAction::ChangeBackground(None));
            println!("{}", format_background_line(&screen.view()));
        }
        BackgroundCommands::Show { json } => {
            let view = screen.view();
            if json {
                println!("{}", serde_json::to_string_pretty(&view.background)?);
            } else {
                println!("{}", format_background_line(&view));
            }
        }
    }

    Ok(())
}

pub fn set_background<P: Preferences, G: ResourceGrants>(
    screen: &mut ScreenController<P, G>,
    locator: &str,
) -> Result<BackgroundSelection, CliError> {
    if normalize_content(locator).is_none() {
        return Err(CliError::EmptyLocator);
    }

    match screen.dispatch(ScreenAction::ChangeBackground(Some(locator.to_string()))) {
        ActionOutcome::BackgroundChanged(Some(selection)) => Ok(selection),
        _ => Err(CliError::EmptyLocator),
    }
}
