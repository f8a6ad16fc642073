//! Game configuration loaded from TOML, the environment and the command line.

use std::path::Path;
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Environment variable overriding the database path.
pub const DATABASE_ENV: &str = "STRICTLY_MEMORY_DB";

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "strictly_memory.toml";

/// Settings for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board size to start with; the start screen asks when absent.
    #[serde(default)]
    tiles: Option<usize>,

    /// How long a mismatched pair stays face up, in milliseconds.
    #[serde(default = "default_flip_back_delay_ms")]
    flip_back_delay_ms: u64,

    /// SQLite file holding best scores.
    #[serde(default = "default_database_path")]
    database_path: String,

    /// File receiving logs while the terminal UI owns the screen.
    #[serde(default = "default_log_file")]
    log_file: String,

    /// Seed for reproducible deals.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_flip_back_delay_ms() -> u64 {
    1000
}

fn default_database_path() -> String {
    "strictly_memory.db".to_string()
}

fn default_log_file() -> String {
    "strictly_memory.log".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tiles: None,
            flip_back_delay_ms: default_flip_back_delay_ms(),
            database_path: default_database_path(),
            log_file: default_log_file(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults, then
    /// applies the [`DATABASE_ENV`] override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an existing file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with_database(path, std::env::var(DATABASE_ENV).ok())
    }

    /// Like [`GameConfig::load`], with the database override passed in
    /// rather than read from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an existing file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_with_database(
        path: impl AsRef<Path>,
        database_path: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };

        if let Some(database_path) = database_path {
            info!(%database_path, "Database path overridden from environment");
            config.database_path = database_path;
        }

        Ok(config)
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        tiles: Option<usize>,
        database_path: Option<String>,
        seed: Option<u64>,
    ) -> Self {
        if tiles.is_some() {
            self.tiles = tiles;
        }
        if let Some(database_path) = database_path {
            self.database_path = database_path;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Mismatch delay as a [`Duration`].
    pub fn flip_back_delay(&self) -> Duration {
        Duration::from_millis(self.flip_back_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
