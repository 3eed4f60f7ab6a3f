//! tasknote CLI - Task list from the command line
//!
//! Every command except `config` sits behind the login gate.

mod cli;
mod commands;
mod config;
mod error;

#[cfg(test)]
mod tests;

use clap::Parser;
use tasknote_core::auth::CredentialGate;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::background::run_background;
use crate::commands::clock::run_clock;
use crate::commands::common::{
    activate_screen, confirm, open_database, resolve_db_path, resolve_note_draft,
};
use crate::commands::complete::run_complete;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::export::run_export;
use crate::commands::list::run_list;
use crate::config::CliConfig;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tasknote=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Config { command } = cli.command {
        return run_config(command);
    }

    let config = CliConfig::load().map_err(CliError::Config)?;
    login(&config, cli.username.as_deref(), cli.password.as_deref())?;

    if let Commands::Clock { ticks } = cli.command {
        return run_clock(config.clock_tick(), ticks).await;
    }

    let db_path = resolve_db_path(cli.db_path, config.db_path.clone());
    tracing::debug!("Using database at {}", db_path.display());
    let db = open_database(&db_path)?;
    let mut screen = activate_screen(&db);

    match cli.command {
        Commands::Add {
            title,
            description,
            image,
        } => {
            let draft = resolve_note_draft(&title, description, image)?;
            run_add(&mut screen, draft);
        }
        Commands::List { json } => run_list(&screen, json)?,
        Commands::Complete { id } => {
            run_complete(&mut screen, &id)?;
        }
        Commands::Delete { id, yes } => {
            run_delete(&mut screen, &id, |note| {
                if yes {
                    Ok(true)
                } else {
                    confirm(&format!("Delete note {} \"{}\"?", note.id, note.title))
                }
            })?;
        }
        Commands::Background { command } => run_background(&mut screen, command)?,
        Commands::Export { format, output } => {
            run_export(screen.store().state(), format, output.as_deref())?;
        }
        Commands::Clock { .. } | Commands::Config { .. } => {}
    }

    Ok(())
}

fn login(
    config: &CliConfig,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<(), CliError> {
    let (Some(username), Some(password)) = (username, password) else {
        return Err(CliError::MissingCredentials);
    };

    CredentialGate::new(config.credentials.clone()).verify(username, password)?;
    tracing::debug!("Login accepted for {username}");
    Ok(())
}
