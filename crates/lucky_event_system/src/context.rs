//! # Server Context Interface
//!
//! The context is the bridge between plugin code and the host. It hands out
//! the event system, the permission registry, the world, the tick scheduler
//! and the directory plugins keep their configuration files in.
//!
//! Every service sits behind a narrow trait so tests can swap in doubles.

use crate::permissions::PermissionRegistry;
use crate::scheduler::TickScheduler;
use crate::system::EventSystem;
use crate::world::World;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

/// Server context interface providing access to core host services.
///
/// # Examples
///
/// ```rust,no_run
/// use lucky_event_system::{ServerContext, LogLevel, PluginError};
/// use std::sync::Arc;
///
/// async fn example_plugin_init(context: Arc<dyn ServerContext>) -> Result<(), PluginError> {
///     let events = context.events();
///     context.log(LogLevel::Info, "Barrel plugin initialized");
///     let config_path = context.config_dir().join("Barrel.json");
///     Ok(())
/// }
/// ```
pub trait ServerContext: Send + Sync + Debug {
    /// Returns the event system shared by the host and all plugins.
    fn events(&self) -> Arc<EventSystem>;

    /// Logs a message with the specified level through the host's logger.
    fn log(&self, level: LogLevel, message: &str);

    /// Returns the host permission registry.
    fn permissions(&self) -> Arc<dyn PermissionRegistry>;

    /// Returns the world plugins may mutate from deferred callbacks.
    fn world(&self) -> Arc<dyn World>;

    /// Returns the scheduler used to defer work to the next tick.
    fn scheduler(&self) -> TickScheduler;

    /// Directory holding plugin configuration files.
    fn config_dir(&self) -> PathBuf;
}

/// Enumeration of log levels for structured logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Critical errors that may affect system stability
    Error,
    /// Warning conditions that should be investigated
    Warn,
    /// General informational messages
    Info,
    /// Detailed information for debugging
    Debug,
    /// Very detailed trace information
    Trace,
}
