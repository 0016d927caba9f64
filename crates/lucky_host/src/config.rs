//! Host configuration loaded from a TOML file.
//!
//! Missing files are created with defaults on first load.

use crate::error::HostError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default tick interval for serde deserialization
fn default_tick_interval() -> u64 {
    50 // 20 ticks per second
}

fn default_config_directory() -> String {
    "config".to_string()
}

/// Top-level host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub plugins: PluginSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Tick loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Server tick interval in milliseconds; deferred plugin work runs once per tick
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

/// Where plugins keep their configuration files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginSettings {
    #[serde(default = "default_config_directory")]
    pub config_directory: String,
}

/// Logging system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to output logs in JSON format
    pub json_format: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
        }
    }
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            config_directory: default_config_directory(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            plugins: PluginSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl HostConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file doesn't exist, writes the default configuration to `path`
    /// and returns it.
    pub async fn load_from_file(path: &Path) -> Result<Self, HostError> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            let config: HostConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let default_config = HostConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            tokio::fs::write(path, toml_content).await?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Directory handed to plugins for their own configuration files.
    pub fn plugin_config_dir(&self) -> PathBuf {
        PathBuf::from(&self.plugins.config_directory)
    }

    /// Validates the configuration for consistency and correctness.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.tick_interval_ms == 0 {
            return Err("Tick interval must be greater than 0".to_string());
        }

        if self.plugins.config_directory.is_empty() {
            return Err("Plugin config directory cannot be empty".to_string());
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            ));
        }

        Ok(())
    }
}
