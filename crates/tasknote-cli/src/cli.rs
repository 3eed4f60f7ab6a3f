use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "tasknote")]
#[command(about = "A small task list with a persisted background")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Login username
    #[arg(long, global = true, env = "TASKNOTE_USERNAME", value_name = "NAME")]
    pub username: Option<String>,

    /// Login password
    #[arg(
        long,
        global = true,
        env = "TASKNOTE_PASSWORD",
        value_name = "PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note title; opens $EDITOR when omitted
        title: Vec<String>,
        /// Note description
        #[arg(short, long)]
        description: Option<String>,
        /// Image attached to the note
        #[arg(long, value_name = "LOCATOR")]
        image: Option<String>,
    },
    /// Show the task list
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a note as completed and remove it from the list
    #[command(alias = "done")]
    Complete {
        /// Note ID
        id: String,
    },
    /// Delete a note without counting it as completed
    Delete {
        /// Note ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Manage the screen background
    Background {
        #[command(subcommand)]
        command: BackgroundCommands,
    },
    /// Show a live clock
    Clock {
        /// Stop after this many ticks
        #[arg(long, value_name = "N")]
        ticks: Option<u32>,
    },
    /// Export the task list
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Manage the CLI configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum BackgroundCommands {
    /// Use an image or video as the background
    Set {
        /// File path or URI of the media
        locator: String,
    },
    /// Remove the background
    Clear,
    /// Show the current background
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a configuration file with the given values
    Init {
        /// Username accepted by the login gate
        #[arg(long = "set-username", value_name = "NAME")]
        login_username: Option<String>,
        /// Password accepted by the login gate
        #[arg(long = "set-password", value_name = "PASSWORD")]
        login_password: Option<String>,
        /// Clock refresh period in milliseconds
        #[arg(long, value_name = "MS")]
        clock_tick_ms: Option<u64>,
    },
    /// Print the configuration in effect
    Show,
    /// Print the configuration file location
    Path,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl From<ExportFormat> for tasknote_core::export::ExportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}
