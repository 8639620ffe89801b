//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::CONFIG_DIR_NAME;
use crate::models::Family;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config directory (used by tests).
pub const CONFIG_DIR_ENV: &str = "FURNICFG_CONFIG_DIR";

/// Log levels accepted in `[logging] level`.
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Defaults applied when a command does not name them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Family used when `--family` is omitted
    pub family: Family,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            family: Family::Rack,
        }
    }
}

/// Output preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Print JSON instead of text even without `--json`
    #[serde(default)]
    pub json: bool,
}

/// Logging preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when neither `RUST_LOG` nor `--verbose` is given
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/FurnitureConfigurator/config.toml`
/// - macOS: `~/Library/Application Support/FurnitureConfigurator/config.toml`
/// - Windows: `%APPDATA%\FurnitureConfigurator\config.toml`
///
/// # Validation
///
/// - `logging.level` must be one of `error`, `warn`, `info`, `debug`, `trace`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Command defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Output preferences
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging preferences
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/FurnitureConfigurator/`
    /// - macOS: `~/Library/Application Support/FurnitureConfigurator/`
    /// - Windows: `%APPDATA%\FurnitureConfigurator\`
    ///
    /// `FURNICFG_CONFIG_DIR` replaces the whole path when set.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the platform config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `path`, falling back to defaults when it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the platform config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to `path` using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context(format!(
                "Failed to create config directory: {}",
                dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp config file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Expected one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            );
        }
        Ok(())
    }

    /// Sets the log level with validation.
    pub fn set_log_level(&mut self, level: &str) -> Result<()> {
        let previous = std::mem::replace(&mut self.logging.level, level.to_ascii_lowercase());
        if let Err(err) = self.validate() {
            self.logging.level = previous;
            return Err(err);
        }
        Ok(())
    }
}
