//! World mutation contract.
//!
//! Only called from deferred (next-tick) callbacks, never from inside an
//! event handler.

use crate::types::{EntityId, Quat, Vec3};

/// How an entity leaves the world when destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyMode {
    /// Removed without effects
    None,
    /// Broken apart with gibs
    Gib,
}

/// Entity creation and destruction as exposed by the host.
pub trait World: Send + Sync + std::fmt::Debug {
    /// Returns true while `entity` is alive.
    fn entity_exists(&self, entity: EntityId) -> bool;

    /// Destroys `entity`; returns false when it was already gone.
    fn destroy_entity(&self, entity: EntityId, mode: DestroyMode) -> bool;

    /// Creates (but does not spawn) an entity from `prefab`.
    ///
    /// Returns `None` for unknown prefabs or when creation fails.
    fn create_entity(&self, prefab: &str, position: Vec3, rotation: Quat, wake_up: bool) -> Option<EntityId>;

    /// Spawns a previously created entity into the world.
    fn spawn_entity(&self, entity: EntityId) -> bool;
}
