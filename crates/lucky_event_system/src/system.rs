//! Core EventSystem implementation.
//!
//! Handlers are stored in a lock-free [`DashMap`] keyed by `core:<event_name>`.
//! Emission serializes the event once and fans it out to every handler
//! concurrently; a failing handler is logged and does not affect the others.

use crate::events::{Event, EventError, EventHandler, TypedEventHandler};
use dashmap::DashMap;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info};

/// The central hub routing events from the host to plugin handlers.
pub struct EventSystem {
    handlers: DashMap<String, Vec<Arc<dyn EventHandler>>>,
    events_emitted: AtomicU64,
}

impl std::fmt::Debug for EventSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSystem")
            .field("handlers", &self.handlers.len())
            .field("events_emitted", &self.events_emitted.load(Ordering::Relaxed))
            .finish()
    }
}

impl EventSystem {
    /// Creates a new event system with no registered handlers.
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
            events_emitted: AtomicU64::new(0),
        }
    }

    /// Registers a handler for core server events.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lucky_event_system::{EventSystem, EntityBuiltEvent};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let events = EventSystem::new();
    /// events.on_core("entity_built", |event: EntityBuiltEvent| {
    ///     println!("{} placed {}", event.entity_id, event.prefab);
    ///     Ok(())
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn on_core<T, F>(&self, event_name: &str, handler: F) -> Result<(), EventError>
    where
        T: Event + 'static,
        F: Fn(T) -> Result<(), EventError> + Send + Sync + 'static,
    {
        let event_key = format!("core:{event_name}");
        let handler_name = format!("{}::{}", event_key, T::type_name());
        let handler: Arc<dyn EventHandler> = Arc::new(TypedEventHandler::new(handler_name, handler));

        self.handlers
            .entry(event_key.clone())
            .or_insert_with(Vec::new)
            .push(handler);

        info!("📝 Registered handler for {}", event_key);
        Ok(())
    }

    /// Emits a core event to all registered handlers.
    pub async fn emit_core<T>(&self, event_name: &str, event: &T) -> Result<(), EventError>
    where
        T: Event,
    {
        let event_key = format!("core:{event_name}");
        self.emit_event(&event_key, event).await
    }

    /// Number of handlers registered for `core:<event_name>`.
    pub fn core_handler_count(&self, event_name: &str) -> usize {
        self.handlers
            .get(&format!("core:{event_name}"))
            .map(|entry| entry.value().len())
            .unwrap_or(0)
    }

    /// Total number of events emitted since creation.
    pub fn events_emitted(&self) -> u64 {
        self.events_emitted.load(Ordering::Relaxed)
    }

    async fn emit_event<T>(&self, event_key: &str, event: &T) -> Result<(), EventError>
    where
        T: Event,
    {
        let data: Arc<[u8]> = Arc::from(event.serialize()?);

        // Clone the handler list so no map guard is held across awaits.
        let event_handlers = self.handlers.get(event_key).map(|entry| entry.value().clone());
        self.events_emitted.fetch_add(1, Ordering::Relaxed);

        let Some(event_handlers) = event_handlers else {
            return Ok(());
        };

        debug!("📤 Emitting {} to {} handlers", event_key, event_handlers.len());

        let mut futures = FuturesUnordered::new();
        for handler in event_handlers.iter() {
            let data = data.clone();
            let handler = handler.clone();
            futures.push(async move {
                if let Err(e) = handler.handle(&data).await {
                    error!("❌ Handler {} failed: {}", handler.handler_name(), e);
                }
            });
        }
        while futures.next().await.is_some() {}

        Ok(())
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new()
    }
}
