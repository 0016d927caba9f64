//! # Lucky Barrel Plugin
//!
//! Place a storage barrel, and with a bit of luck it turns into a random loot
//! barrel.
//!
//! ## Flow
//!
//! 1. `register_handlers` registers the [`PERMISSION_USE`] permission and
//!    subscribes to `core:entity_built`.
//! 2. `on_init` loads [`LuckyBarrelConfig`] from the host config directory.
//! 3. Each `entity_built` event goes through [`evaluate_construction`]; a
//!    positive decision is queued on the tick scheduler.
//! 4. On the next tick [`execute_swap`] destroys the storage barrel and spawns
//!    the chosen loot barrel at the same position and rotation.
//! 5. `on_shutdown` drops the configuration; later events are ignored.
//!
//! ## Module Organization
//!
//! - [`config`] - Persisted configuration, defaults and migration
//! - [`decision`] - The replacement decision
//! - [`dice`] - Random draws
//! - [`swap`] - Deferred world mutation

use async_trait::async_trait;
use lucky_event_system::{
    EntityBuiltEvent, EventSystem, LogLevel, PermissionRegistry, PluginError, ServerContext,
    SimplePlugin, TickScheduler, World,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

pub mod config;
pub mod decision;
pub mod dice;
pub mod swap;

pub use config::{compare_versions, ConfigError, LuckyBarrelConfig, CONFIG_FILE_NAME};
pub use decision::{evaluate_construction, BarrelSwap, STORAGE_BARREL_PREFAB};
pub use dice::{Dice, SeededDice, ThreadDice};
pub use swap::{execute_swap, SwapOutcome};

/// Plugin name, also the owner of its permissions.
pub const PLUGIN_NAME: &str = "LuckyBarrel";
/// Plugin version written into the configuration file.
pub const PLUGIN_VERSION: &str = "1.0.0";
/// Permission a player needs for their barrels to be considered.
pub const PERMISSION_USE: &str = "luckybarrel.use";

type ConfigSlot = Arc<RwLock<Option<Arc<LuckyBarrelConfig>>>>;

/// The Lucky Barrel plugin.
///
/// Configuration lives in a slot owned by the plugin instance: filled by
/// `on_init`, emptied by `on_shutdown`, and read by the event handler.
pub struct LuckyBarrelPlugin {
    name: String,
    config: ConfigSlot,
    dice: Arc<dyn Dice>,
}

impl LuckyBarrelPlugin {
    pub fn new() -> Self {
        Self::with_dice(Arc::new(ThreadDice))
    }

    /// Creates the plugin with a custom source of randomness.
    pub fn with_dice(dice: Arc<dyn Dice>) -> Self {
        debug!("🛢️ LuckyBarrelPlugin: Creating new instance");
        Self {
            name: PLUGIN_NAME.to_string(),
            config: Arc::new(RwLock::new(None)),
            dice,
        }
    }

    /// The configuration currently in effect, if the plugin is initialized.
    pub async fn config(&self) -> Option<Arc<LuckyBarrelConfig>> {
        self.config.read().await.clone()
    }
}

impl Default for LuckyBarrelPlugin {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the `entity_built` handler needs, captured at registration.
struct BuildWatcher {
    config: ConfigSlot,
    dice: Arc<dyn Dice>,
    permissions: Arc<dyn PermissionRegistry>,
    world: Arc<dyn World>,
    scheduler: TickScheduler,
}

impl BuildWatcher {
    fn on_entity_built(&self, event: EntityBuiltEvent) {
        // Contended only while the plugin initializes or shuts down.
        let Ok(slot) = self.config.try_read() else {
            return;
        };
        let Some(config) = slot.clone() else {
            return;
        };
        drop(slot);

        let Some(builder) = event.builder else {
            return;
        };
        let has_use = self.permissions.user_has_permission(builder, PERMISSION_USE);

        let Some(swap) = evaluate_construction(&event, has_use, &config, self.dice.as_ref()) else {
            return;
        };

        debug!(
            "🛢️ {} placed by {} will become '{}' next tick",
            swap.original, builder, swap.replacement
        );
        let world = self.world.clone();
        self.scheduler.next_tick(move || {
            execute_swap(world.as_ref(), &swap);
        });
    }
}

#[async_trait]
impl SimplePlugin for LuckyBarrelPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        PLUGIN_VERSION
    }

    async fn register_handlers(&mut self, events: Arc<EventSystem>, context: Arc<dyn ServerContext>) -> Result<(), PluginError> {
        info!("🛢️ LuckyBarrelPlugin: Registering event handlers...");

        let permissions = context.permissions();
        permissions.register_permission(PERMISSION_USE, &self.name);

        let watcher = BuildWatcher {
            config: self.config.clone(),
            dice: self.dice.clone(),
            permissions,
            world: context.world(),
            scheduler: context.scheduler(),
        };

        events
            .on_core("entity_built", move |event: EntityBuiltEvent| {
                watcher.on_entity_built(event);
                Ok(())
            })
            .await
            .map_err(|e| PluginError::InitializationFailed(e.to_string()))?;

        info!("🛢️ LuckyBarrelPlugin: ✅ All handlers registered successfully!");
        Ok(())
    }

    async fn on_init(&mut self, context: Arc<dyn ServerContext>) -> Result<(), PluginError> {
        let path = context.config_dir().join(CONFIG_FILE_NAME);
        let config = LuckyBarrelConfig::load_or_create(&path, PLUGIN_VERSION)
            .await
            .map_err(|e| PluginError::InitializationFailed(format!("{}: {}", path.display(), e)))?;

        context.log(
            LogLevel::Info,
            &format!(
                "🛢️ LuckyBarrelPlugin: Loaded {} loot barrel prefabs ({})",
                config.loot_barrel_prefabs.len(),
                if config.always_turn_into_loot_barrel {
                    format!("{}% chance", config.chance_to_spawn_loot_barrel)
                } else {
                    "secondary action".to_string()
                }
            ),
        );

        *self.config.write().await = Some(Arc::new(config));
        Ok(())
    }

    async fn on_shutdown(&mut self, context: Arc<dyn ServerContext>) -> Result<(), PluginError> {
        self.config.write().await.take();
        context.log(LogLevel::Info, "🛢️ LuckyBarrelPlugin: Shut down, configuration released");
        Ok(())
    }
}
