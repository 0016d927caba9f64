//! Plugin lifecycle driver and tick loop.

use crate::config::HostConfig;
use crate::error::HostError;
use crate::permissions::MemoryPermissions;
use crate::world::MemoryWorld;
use lucky_event_system::{
    current_timestamp, EntityBuiltEvent, EntityId, EventSystem, LogLevel, PermissionRegistry,
    PlayerId, PluginLoadedEvent, PluginUnloadedEvent, Quat, ServerContext, ShutdownState,
    SimplePlugin, TickScheduler, Vec3, World,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};

/// Services handed to plugins through [`ServerContext`].
#[derive(Debug)]
pub struct HostContext {
    events: Arc<EventSystem>,
    permissions: Arc<MemoryPermissions>,
    world: Arc<MemoryWorld>,
    scheduler: TickScheduler,
    config_dir: PathBuf,
}

impl ServerContext for HostContext {
    fn events(&self) -> Arc<EventSystem> {
        self.events.clone()
    }

    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => error!("{}", message),
            LogLevel::Warn => warn!("{}", message),
            LogLevel::Info => info!("{}", message),
            LogLevel::Debug => debug!("{}", message),
            LogLevel::Trace => trace!("{}", message),
        }
    }

    fn permissions(&self) -> Arc<dyn PermissionRegistry> {
        self.permissions.clone()
    }

    fn world(&self) -> Arc<dyn World> {
        self.world.clone()
    }

    fn scheduler(&self) -> TickScheduler {
        self.scheduler.clone()
    }

    fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }
}

/// In-process game host.
///
/// Owns the loaded plugins, emits world events on their behalf and runs
/// deferred work once per tick.
pub struct GameHost {
    context: Arc<HostContext>,
    plugins: Vec<Box<dyn SimplePlugin>>,
    tick_interval: Duration,
    ticks: u64,
}

impl GameHost {
    /// Creates a host with an empty world that accepts any prefab.
    pub fn new(config: &HostConfig) -> Self {
        Self::with_world(config, Arc::new(MemoryWorld::new()))
    }

    /// Creates a host around an existing world.
    pub fn with_world(config: &HostConfig, world: Arc<MemoryWorld>) -> Self {
        let context = HostContext {
            events: Arc::new(EventSystem::new()),
            permissions: Arc::new(MemoryPermissions::new()),
            world,
            scheduler: TickScheduler::new(),
            config_dir: config.plugin_config_dir(),
        };

        Self {
            context: Arc::new(context),
            plugins: Vec::new(),
            tick_interval: Duration::from_millis(config.server.tick_interval_ms.max(1)),
            ticks: 0,
        }
    }

    pub fn context(&self) -> Arc<dyn ServerContext> {
        self.context.clone()
    }

    pub fn events(&self) -> Arc<EventSystem> {
        self.context.events.clone()
    }

    pub fn permissions(&self) -> Arc<MemoryPermissions> {
        self.context.permissions.clone()
    }

    pub fn world(&self) -> Arc<MemoryWorld> {
        self.context.world.clone()
    }

    pub fn scheduler(&self) -> TickScheduler {
        self.context.scheduler.clone()
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Names of the loaded plugins, in load order.
    pub fn plugin_names(&self) -> Vec<String> {
        self.plugins.iter().map(|p| p.name().to_string()).collect()
    }

    /// Registers the plugin's handlers, initializes it, and keeps it loaded.
    ///
    /// A plugin that fails either phase is dropped and the error returned.
    pub async fn load_plugin(&mut self, mut plugin: Box<dyn SimplePlugin>) -> Result<(), HostError> {
        let name = plugin.name().to_string();
        info!("🔌 Loading plugin {} v{}", name, plugin.version());

        if let Err(e) = plugin.register_handlers(self.events(), self.context()).await {
            error!("❌ Plugin {} failed to register handlers: {}", name, e);
            return Err(e.into());
        }

        if let Err(e) = plugin.on_init(self.context()).await {
            error!("❌ Plugin {} failed to initialize: {}", name, e);
            return Err(e.into());
        }

        self.events()
            .emit_core(
                "plugin_loaded",
                &PluginLoadedEvent {
                    plugin_name: name.clone(),
                    version: plugin.version().to_string(),
                    timestamp: current_timestamp(),
                },
            )
            .await?;

        self.plugins.push(plugin);
        info!("🔌 Plugin {} loaded", name);
        Ok(())
    }

    /// Places `prefab` in the world on behalf of `builder` and emits
    /// `core:entity_built`.
    ///
    /// `secondary_action` reports whether the builder held the secondary
    /// action input while placing.
    pub async fn build_entity(
        &self,
        builder: Option<PlayerId>,
        prefab: &str,
        position: Vec3,
        rotation: Quat,
        secondary_action: bool,
    ) -> Result<EntityId, HostError> {
        let world = self.world();
        let entity_id = world
            .create_entity(prefab, position, rotation, true)
            .ok_or_else(|| HostError::UnknownPrefab(prefab.to_string()))?;
        world.spawn_entity(entity_id);

        self.events()
            .emit_core(
                "entity_built",
                &EntityBuiltEvent {
                    builder,
                    entity_id,
                    prefab: prefab.to_string(),
                    position,
                    rotation,
                    secondary_action,
                    timestamp: current_timestamp(),
                },
            )
            .await?;

        Ok(entity_id)
    }

    /// Advances one tick, running the work deferred during the previous one.
    pub fn tick(&mut self) -> usize {
        self.ticks += 1;
        self.context.scheduler.run_pending()
    }

    /// Ticks at the configured interval until `shutdown` is initiated.
    pub async fn run(&mut self, shutdown: ShutdownState) {
        let mut interval = tokio::time::interval(self.tick_interval);
        info!("⏱️ Tick loop started ({:?} per tick)", self.tick_interval);

        while !shutdown.is_shutdown_initiated() {
            interval.tick().await;
            self.tick();
        }

        info!("⏱️ Tick loop stopped after {} ticks", self.ticks);
    }

    /// Shuts every plugin down in reverse load order.
    ///
    /// Plugin shutdown errors are logged and do not stop the others.
    pub async fn shutdown(&mut self) {
        while let Some(mut plugin) = self.plugins.pop() {
            let name = plugin.name().to_string();
            if let Err(e) = plugin.on_shutdown(self.context()).await {
                error!("❌ Plugin {} failed to shut down cleanly: {}", name, e);
            }

            let unloaded = PluginUnloadedEvent {
                plugin_name: name.clone(),
                timestamp: current_timestamp(),
            };
            if let Err(e) = self.events().emit_core("plugin_unloaded", &unloaded).await {
                warn!("⚠️ Could not announce unload of {}: {}", name, e);
            }
            info!("🔌 Plugin {} unloaded", name);
        }
    }
}
