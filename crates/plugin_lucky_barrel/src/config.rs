//! Persisted plugin configuration.
//!
//! Stored as pretty JSON under the host's config directory. The file is
//! created with defaults when missing, regenerated when unreadable, and
//! migrated in place when written by an older plugin version.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;
use tracing::{info, warn};

/// File name of the configuration inside the host config directory.
pub const CONFIG_FILE_NAME: &str = "LuckyBarrel.json";

/// Oldest configuration layout that survives a migration. Anything older is
/// replaced by defaults.
const MIN_COMPATIBLE_VERSION: &str = "1.0.0";

fn default_always_turn_into_loot_barrel() -> bool {
    true
}

fn default_chance_to_spawn_loot_barrel() -> i32 {
    50
}

fn default_loot_barrel_prefabs() -> Vec<String> {
    [
        "assets/content/structures/excavator/prefabs/diesel_collectable.prefab",
        "assets/bundled/prefabs/autospawn/resource/loot/loot-barrel-1.prefab",
        "assets/bundled/prefabs/autospawn/resource/loot/loot-barrel-2.prefab",
        "assets/bundled/prefabs/radtown/loot_barrel_1.prefab",
        "assets/bundled/prefabs/radtown/loot_barrel_2.prefab",
        "assets/bundled/prefabs/radtown/oil_barrel.prefab",
    ]
    .iter()
    .map(|prefab| prefab.to_string())
    .collect()
}

/// Plugin configuration as stored on disk.
///
/// `always_turn_into_loot_barrel` selects the gate used when a barrel is
/// placed: `true` rolls against `chance_to_spawn_loot_barrel`, `false`
/// requires the builder to hold the secondary action instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuckyBarrelConfig {
    /// Plugin version that last wrote this file; empty when absent
    #[serde(rename = "Version", default)]
    pub version: String,
    #[serde(rename = "Always Turn Into Loot Barrel", default = "default_always_turn_into_loot_barrel")]
    pub always_turn_into_loot_barrel: bool,
    /// Percentage in 0..=100; values outside the range are accepted as-is
    #[serde(rename = "Chance To Spawn Loot Barrel", default = "default_chance_to_spawn_loot_barrel")]
    pub chance_to_spawn_loot_barrel: i32,
    #[serde(rename = "Loot Barrel Prefabs", default = "default_loot_barrel_prefabs")]
    pub loot_barrel_prefabs: Vec<String>,
}

/// Errors raised while loading or saving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl LuckyBarrelConfig {
    /// Default configuration stamped with `plugin_version`.
    pub fn defaults_for(plugin_version: &str) -> Self {
        Self {
            version: plugin_version.to_string(),
            always_turn_into_loot_barrel: default_always_turn_into_loot_barrel(),
            chance_to_spawn_loot_barrel: default_chance_to_spawn_loot_barrel(),
            loot_barrel_prefabs: default_loot_barrel_prefabs(),
        }
    }

    /// Loads the configuration at `path`, creating, repairing or migrating it
    /// as needed, and writes the result back.
    ///
    /// A file that fails validation is left untouched and reported as
    /// [`ConfigError::Invalid`].
    pub async fn load_or_create(path: &Path, plugin_version: &str) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            match serde_json::from_str::<Self>(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(
                        "⚠️ Configuration file {} could not be parsed ({}), regenerating defaults",
                        path.display(),
                        e
                    );
                    Self::defaults_for(plugin_version)
                }
            }
        } else {
            info!("Created default configuration file: {}", path.display());
            Self::defaults_for(plugin_version)
        };

        let config = config.migrate(plugin_version);
        config.validate()?;
        config.save(path).await?;
        Ok(config)
    }

    /// Writes the configuration as pretty JSON, creating parent directories.
    pub async fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Brings a configuration written by an older plugin up to `plugin_version`.
    pub fn migrate(mut self, plugin_version: &str) -> Self {
        if compare_versions(&self.version, plugin_version) != Ordering::Less {
            return self;
        }

        warn!("Config changes detected! Updating...");
        let previous = std::mem::take(&mut self.version);

        if compare_versions(&previous, MIN_COMPATIBLE_VERSION) == Ordering::Less {
            self = Self::defaults_for(plugin_version);
        }

        self.version = plugin_version.to_string();
        warn!(
            "Config update complete! Updated from version {} to {}",
            if previous.is_empty() { "<none>" } else { previous.as_str() },
            plugin_version
        );
        self
    }

    /// Checks invariants the decision logic relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loot_barrel_prefabs.is_empty() {
            return Err(ConfigError::Invalid(
                "\"Loot Barrel Prefabs\" must list at least one prefab".to_string(),
            ));
        }

        if let Some(index) = self.loot_barrel_prefabs.iter().position(|p| p.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "\"Loot Barrel Prefabs\" entry {index} is empty"
            )));
        }

        Ok(())
    }
}

/// Compares dotted version strings component by component.
///
/// Numeric components compare as numbers, anything else as text, and missing
/// trailing components count as `0`. An empty version sorts before every
/// non-empty one.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.trim(), b.trim());
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }

    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        let (l, r) = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (l, r) => (l.unwrap_or("0"), r.unwrap_or("0")),
        };

        let ord = match (l.parse::<u64>(), r.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => l.cmp(r),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}
