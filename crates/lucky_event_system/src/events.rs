//! # Event Traits and Core Events
//!
//! This module defines the event infrastructure used by the host and its
//! plugins: the [`Event`] trait, handler abstractions, the error type, and
//! the world events the host emits.
//!
//! Any `Serialize + DeserializeOwned` type is an event through the blanket
//! implementation, so new event types only need the usual derives.

use crate::types::{EntityId, PlayerId, Quat, Vec3};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{any::{Any, TypeId}, fmt::Debug};

// ============================================================================
// Event Traits and Core Infrastructure
// ============================================================================

/// Core trait that all events must implement.
///
/// Events are serialized once on emission and decoded by each handler, which
/// keeps handlers independent of the emitter's concrete type.
pub trait Event: Send + Sync + Any + std::fmt::Debug {
    /// Returns the type name of this event for debugging and routing.
    fn type_name() -> &'static str
    where
        Self: Sized;

    /// Serializes the event to bytes.
    fn serialize(&self) -> Result<Vec<u8>, EventError>;

    /// Deserializes an event from bytes.
    fn deserialize(data: &[u8]) -> Result<Self, EventError>
    where
        Self: Sized;

    /// Returns a reference to this event as `&dyn Any` for dynamic typing.
    fn as_any(&self) -> &dyn Any;
}

impl<T> Event for T
where
    T: Serialize + DeserializeOwned + Send + Sync + Any + std::fmt::Debug + 'static,
{
    fn type_name() -> &'static str {
        std::any::type_name::<T>()
    }

    fn serialize(&self) -> Result<Vec<u8>, EventError> {
        serde_json::to_vec(self).map_err(|e| {
            tracing::error!(
                "🔴 Event serialization failed for type '{}': {} (event debug: {:?})",
                Self::type_name(),
                e,
                self
            );
            EventError::Serialization(e)
        })
    }

    fn deserialize(data: &[u8]) -> Result<Self, EventError> {
        serde_json::from_slice(data).map_err(|e| {
            tracing::error!(
                "🔴 Event deserialization failed for type '{}': {} (data length: {} bytes)",
                Self::type_name(),
                e,
                data.len()
            );
            EventError::Deserialization(e)
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Handler trait for processing serialized events.
///
/// Most users register closures through [`EventSystem::on_core`](crate::EventSystem::on_core)
/// instead of implementing this directly.
#[async_trait]
pub trait EventHandler: Send + Sync + 'static + Debug {
    /// Handles an event from serialized data.
    async fn handle(&self, data: &[u8]) -> Result<(), EventError>;

    /// Returns the TypeId of the event type this handler expects.
    fn expected_type_id(&self) -> TypeId;

    /// Returns a human-readable name for this handler for debugging.
    fn handler_name(&self) -> &str;
}

/// Type-safe wrapper turning a closure over `T` into an [`EventHandler`].
pub struct TypedEventHandler<T, F>
where
    T: Event,
    F: Fn(T) -> Result<(), EventError> + Send + Sync,
{
    handler: F,
    name: String,
    _phantom: std::marker::PhantomData<T>,
}

impl<T, F> std::fmt::Debug for TypedEventHandler<T, F>
where
    T: Event,
    F: Fn(T) -> Result<(), EventError> + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedEventHandler")
            .field("name", &self.name)
            .finish()
    }
}

impl<T, F> TypedEventHandler<T, F>
where
    T: Event,
    F: Fn(T) -> Result<(), EventError> + Send + Sync,
{
    /// Creates a new typed event handler.
    pub fn new(name: String, handler: F) -> Self {
        Self {
            handler,
            name,
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<T, F> EventHandler for TypedEventHandler<T, F>
where
    T: Event,
    F: Fn(T) -> Result<(), EventError> + Send + Sync + 'static,
{
    async fn handle(&self, data: &[u8]) -> Result<(), EventError> {
        match T::deserialize(data) {
            Ok(event) => (self.handler)(event),
            Err(e) => {
                // Type mismatch between emitter and handler: skip rather than fail the emit.
                tracing::warn!(
                    "🟡 EventHandler '{}' (expects type '{}'): Deserialization failed - {}. Handler skipped.",
                    self.name,
                    std::any::type_name::<T>(),
                    e
                );
                Ok(())
            }
        }
    }

    fn expected_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn handler_name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Core World Events
// ============================================================================

/// Emitted after a player places (builds) an object in the world.
///
/// The host emits this as `core:entity_built` once the entity has been created
/// and spawned. Handlers must not mutate the world while handling it; use the
/// [`TickScheduler`](crate::TickScheduler) to defer changes to the next tick.
///
/// # Examples
///
/// ```rust
/// use lucky_event_system::*;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let events = create_lucky_event_system();
/// events.emit_core("entity_built", &EntityBuiltEvent {
///     builder: Some(PlayerId::new()),
///     entity_id: EntityId(7),
///     prefab: "assets/prefabs/deployable/woodenbox/box.wooden.prefab".to_string(),
///     position: Vec3::new(10.0, 0.0, -4.0),
///     rotation: Quat::identity(),
///     secondary_action: false,
///     timestamp: current_timestamp(),
/// }).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityBuiltEvent {
    /// Player who placed the object; `None` when the owner could not be resolved
    pub builder: Option<PlayerId>,
    /// Handle of the placed object
    pub entity_id: EntityId,
    /// Prefab path of the placed object
    pub prefab: String,
    /// World position at placement
    pub position: Vec3,
    /// World rotation at placement
    pub rotation: Quat,
    /// Whether the builder held the secondary action input while placing
    pub secondary_action: bool,
    /// Unix timestamp in seconds
    pub timestamp: u64,
}

/// Emitted after a plugin finished loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginLoadedEvent {
    pub plugin_name: String,
    pub version: String,
    pub timestamp: u64,
}

/// Emitted after a plugin was shut down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginUnloadedEvent {
    pub plugin_name: String,
    pub timestamp: u64,
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised while registering, emitting or handling events.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// Serialization failed when converting event to bytes
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Deserialization failed when converting bytes to event
    #[error("Deserialization error: {0}")]
    Deserialization(serde_json::Error),
    /// Handler execution failed during event processing
    #[error("Handler execution error: {0}")]
    HandlerExecution(String),
}
