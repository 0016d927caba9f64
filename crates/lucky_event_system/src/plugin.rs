//! # Plugin System Interface
//!
//! Plugins implement [`SimplePlugin`] and are driven by the host through a
//! fixed lifecycle:
//!
//! 1. **Creation** - Plugin instance created via `new()`
//! 2. **Handler Registration** - `register_handlers()` subscribes to events
//! 3. **Initialization** - `on_init()` loads configuration and state
//! 4. **Operation** - Normal event processing
//! 5. **Shutdown** - `on_shutdown()` releases state
//!
//! Handlers registered in step 2 may receive events only after step 3 has
//! completed; plugins that load state in `on_init` should ignore events that
//! arrive while that state is absent.

use crate::context::ServerContext;
use crate::system::EventSystem;
use async_trait::async_trait;
use std::sync::Arc;

/// Safe, high-level plugin trait.
///
/// # Examples
///
/// ```rust,no_run
/// use lucky_event_system::*;
/// use std::sync::Arc;
///
/// struct AuditPlugin;
///
/// #[async_trait]
/// impl SimplePlugin for AuditPlugin {
///     fn name(&self) -> &str { "audit" }
///     fn version(&self) -> &str { "1.0.0" }
///
///     async fn register_handlers(&mut self, events: Arc<EventSystem>, _context: Arc<dyn ServerContext>) -> Result<(), PluginError> {
///         events.on_core("entity_built", |event: EntityBuiltEvent| {
///             println!("{} was built", event.entity_id);
///             Ok(())
///         }).await.map_err(|e| PluginError::InitializationFailed(e.to_string()))?;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait SimplePlugin: Send + Sync + 'static {
    /// Returns the name of this plugin.
    ///
    /// The name should be unique and stable across versions. It's used for
    /// permission ownership and logging.
    fn name(&self) -> &str;

    /// Returns the version string of this plugin (semantic versioning).
    fn version(&self) -> &str;

    /// Registers event handlers and host-side resources such as permissions.
    async fn register_handlers(&mut self, events: Arc<EventSystem>, context: Arc<dyn ServerContext>) -> Result<(), PluginError>;

    /// Initialize the plugin with server context.
    ///
    /// Failed initialization prevents the plugin from loading.
    async fn on_init(&mut self, _context: Arc<dyn ServerContext>) -> Result<(), PluginError> {
        Ok(())
    }

    /// Shutdown the plugin gracefully.
    ///
    /// Shutdown errors are logged but don't prevent unloading.
    async fn on_shutdown(&mut self, _context: Arc<dyn ServerContext>) -> Result<(), PluginError> {
        Ok(())
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during plugin operations.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Plugin initialization failed during startup
    #[error("Plugin initialization failed: {0}")]
    InitializationFailed(String),
    /// Error occurred during plugin execution
    #[error("Plugin execution error: {0}")]
    ExecutionError(String),
    /// Requested plugin was not found
    #[error("Plugin not found: {0}")]
    NotFound(String),
    /// Runtime error such as panic or system failure
    #[error("Plugin runtime error: {0}")]
    Runtime(String),
}
