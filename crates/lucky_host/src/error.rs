//! Error types for the host.

use lucky_event_system::{EventError, PluginError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Plugin error: {0}")]
    Plugin(#[from] PluginError),

    #[error("Event system error: {0}")]
    Event(#[from] EventError),

    #[error("Unknown prefab: {0}")]
    UnknownPrefab(String),

    #[error("Logging setup error: {0}")]
    Logging(String),
}
