//! Persistent CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tasknote_core::auth::Credentials;
use tasknote_core::clock::DEFAULT_TICK;
use tasknote_core::util::normalize_text_option;

const CONFIG_FILE_NAME: &str = "config.json";
const MIN_CLOCK_TICK_MS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    #[serde(default = "default_clock_tick_ms")]
    pub clock_tick_ms: u64,
}

const fn default_config_version() -> u32 {
    1
}

fn default_clock_tick_ms() -> u64 {
    u64::try_from(DEFAULT_TICK.as_millis()).unwrap_or(1000)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            credentials: Credentials::default(),
            db_path: None,
            clock_tick_ms: default_clock_tick_ms(),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("tasknote")
        .join(CONFIG_FILE_NAME)
}

impl CliConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path();
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    pub fn clock_tick(&self) -> Duration {
        Duration::from_millis(self.clock_tick_ms)
    }

    fn normalize(&mut self) {
        if let Some(username) = normalize_text_option(Some(self.credentials.username.clone())) {
            self.credentials.username = username;
        } else {
            self.credentials.username = Credentials::default().username;
        }
        self.clock_tick_ms = self.clock_tick_ms.max(MIN_CLOCK_TICK_MS);
    }
}
