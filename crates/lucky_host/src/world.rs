//! In-memory world used by the host and its tests.

use dashmap::DashMap;
use lucky_event_system::{DestroyMode, EntityId, Quat, Vec3, World};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// An entity as tracked by [`MemoryWorld`].
#[derive(Debug, Clone, PartialEq)]
pub struct WorldEntity {
    pub prefab: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub awake: bool,
    pub spawned: bool,
}

/// Thread-safe entity store.
///
/// With a prefab catalog only listed prefabs can be created; without one any
/// prefab is accepted.
#[derive(Debug)]
pub struct MemoryWorld {
    entities: DashMap<EntityId, WorldEntity>,
    destroyed: DashMap<EntityId, DestroyMode>,
    catalog: Option<HashSet<String>>,
    next_id: AtomicU64,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self {
            entities: DashMap::new(),
            destroyed: DashMap::new(),
            catalog: None,
            next_id: AtomicU64::new(1),
        }
    }

    /// Creates a world that only knows the given prefabs.
    pub fn with_catalog<I, S>(prefabs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            catalog: Some(prefabs.into_iter().map(Into::into).collect()),
            ..Self::new()
        }
    }

    /// Snapshot of a live entity.
    pub fn entity(&self, id: EntityId) -> Option<WorldEntity> {
        self.entities.get(&id).map(|entry| entry.value().clone())
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Live, spawned entities sorted by id.
    pub fn spawned_entities(&self) -> Vec<(EntityId, WorldEntity)> {
        let mut spawned: Vec<_> = self
            .entities
            .iter()
            .filter(|entry| entry.value().spawned)
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        spawned.sort_by_key(|(id, _)| *id);
        spawned
    }

    /// How `id` was destroyed, if it was.
    pub fn destroy_mode(&self, id: EntityId) -> Option<DestroyMode> {
        self.destroyed.get(&id).map(|entry| *entry.value())
    }

    fn knows(&self, prefab: &str) -> bool {
        self.catalog.as_ref().map_or(true, |catalog| catalog.contains(prefab))
    }
}

impl Default for MemoryWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl World for MemoryWorld {
    fn entity_exists(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    fn destroy_entity(&self, entity: EntityId, mode: DestroyMode) -> bool {
        if self.entities.remove(&entity).is_none() {
            return false;
        }
        self.destroyed.insert(entity, mode);
        debug!("🌍 Destroyed {} ({:?})", entity, mode);
        true
    }

    fn create_entity(&self, prefab: &str, position: Vec3, rotation: Quat, wake_up: bool) -> Option<EntityId> {
        if !self.knows(prefab) {
            return None;
        }

        let id = EntityId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entities.insert(
            id,
            WorldEntity {
                prefab: prefab.to_string(),
                position,
                rotation,
                awake: wake_up,
                spawned: false,
            },
        );
        Some(id)
    }

    fn spawn_entity(&self, entity: EntityId) -> bool {
        match self.entities.get_mut(&entity) {
            Some(mut entry) => {
                entry.spawned = true;
                debug!("🌍 Spawned {} ({})", entity, entry.prefab);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_spawn_destroy() {
        let world = MemoryWorld::new();
        let id = world
            .create_entity("crate.prefab", Vec3::new(1.0, 0.0, 1.0), Quat::identity(), true)
            .unwrap();

        assert!(world.entity_exists(id));
        assert!(!world.entity(id).unwrap().spawned);
        assert!(world.spawned_entities().is_empty());

        assert!(world.spawn_entity(id));
        assert_eq!(world.spawned_entities().len(), 1);

        assert!(world.destroy_entity(id, DestroyMode::Gib));
        assert!(!world.entity_exists(id));
        assert_eq!(world.destroy_mode(id), Some(DestroyMode::Gib));
        assert!(!world.destroy_entity(id, DestroyMode::Gib));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let world = MemoryWorld::new();
        let first = world.create_entity("a", Vec3::zero(), Quat::identity(), false).unwrap();
        world.destroy_entity(first, DestroyMode::None);
        let second = world.create_entity("a", Vec3::zero(), Quat::identity(), false).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_catalog_rejects_unknown_prefabs() {
        let world = MemoryWorld::with_catalog(["known.prefab"]);

        assert!(world.create_entity("known.prefab", Vec3::zero(), Quat::identity(), true).is_some());
        assert!(world.create_entity("unknown.prefab", Vec3::zero(), Quat::identity(), true).is_none());
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn test_spawn_unknown_entity_fails() {
        let world = MemoryWorld::new();
        assert!(!world.spawn_entity(EntityId(404)));
    }
}
