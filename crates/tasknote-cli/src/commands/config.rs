use tasknote_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::config::{default_config_path, CliConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            login_username,
            login_password,
            clock_tick_ms,
        } => {
            let mut config = CliConfig::load().map_err(CliError::Config)?;
            apply_config_init(&mut config, login_username, login_password, clock_tick_ms);
            let path = config.save().map_err(CliError::Config)?;
            println!("Saved configuration to {}", path.display());
        }
        ConfigCommands::Show => {
            let config = CliConfig::load().map_err(CliError::Config)?;
            println!("username: {}", config.credentials.username);
            println!("password: [REDACTED]");
            println!(
                "db_path: {}",
                config
                    .db_path
                    .as_ref()
                    .map_or_else(|| "(default)".to_string(), |path| path.display().to_string())
            );
            println!("clock_tick_ms: {}", config.clock_tick_ms);
        }
        ConfigCommands::Path => println!("{}", default_config_path().display()),
    }

    Ok(())
}

pub fn apply_config_init(
    config: &mut CliConfig,
    username: Option<String>,
    password: Option<String>,
    clock_tick_ms: Option<u64>,
) {
    if let Some(username) = normalize_text_option(username) {
        config.credentials.username = username;
    }
    if let Some(password) = password {
        config.credentials.password = password;
    }
    if let Some(clock_tick_ms) = clock_tick_ms {
        config.clock_tick_ms = clock_tick_ms;
    }
}
