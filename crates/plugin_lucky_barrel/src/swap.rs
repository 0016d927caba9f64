//! Next-tick execution of a [`BarrelSwap`].

use crate::decision::BarrelSwap;
use lucky_event_system::{DestroyMode, EntityId, World};
use tracing::{debug, info};

/// What happened when a swap ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The placed barrel was gone before the tick; nothing changed
    OriginalGone,
    /// Original destroyed and replacement spawned
    Spawned(EntityId),
    /// Original destroyed but the replacement prefab could not be created
    CreateFailed,
    /// Original destroyed, replacement created but refused to spawn
    SpawnFailed(EntityId),
}

/// Destroys the placed barrel and spawns its replacement at the same transform.
///
/// Both steps are best effort; a failed creation leaves the original destroyed.
pub fn execute_swap(world: &dyn World, swap: &BarrelSwap) -> SwapOutcome {
    if !world.entity_exists(swap.original) {
        debug!("🛢️ {} vanished before its swap, skipping", swap.original);
        return SwapOutcome::OriginalGone;
    }

    world.destroy_entity(swap.original, DestroyMode::Gib);

    let Some(barrel) = world.create_entity(&swap.replacement, swap.position, swap.rotation, true) else {
        debug!("🛢️ Could not create '{}' for {}", swap.replacement, swap.original);
        return SwapOutcome::CreateFailed;
    };

    if !world.spawn_entity(barrel) {
        debug!("🛢️ Created {} ('{}') but it failed to spawn", barrel, swap.replacement);
        return SwapOutcome::SpawnFailed(barrel);
    }

    info!("🛢️ {} turned into '{}' ({})", swap.original, swap.replacement, barrel);
    SwapOutcome::Spawned(barrel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucky_event_system::{Quat, Vec3};
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingWorld {
        alive: Mutex<HashSet<EntityId>>,
        calls: Mutex<Vec<String>>,
        known_prefabs: Vec<&'static str>,
        refuse_spawn: bool,
    }

    impl World for RecordingWorld {
        fn entity_exists(&self, entity: EntityId) -> bool {
            self.alive.lock().unwrap().contains(&entity)
        }

        fn destroy_entity(&self, entity: EntityId, mode: DestroyMode) -> bool {
            self.calls.lock().unwrap().push(format!("destroy {} {:?}", entity.0, mode));
            self.alive.lock().unwrap().remove(&entity)
        }

        fn create_entity(&self, prefab: &str, _position: Vec3, _rotation: Quat, wake_up: bool) -> Option<EntityId> {
            self.calls.lock().unwrap().push(format!("create {prefab} {wake_up}"));
            self.known_prefabs.iter().any(|known| *known == prefab).then_some(EntityId(100))
        }

        fn spawn_entity(&self, entity: EntityId) -> bool {
            self.calls.lock().unwrap().push(format!("spawn {}", entity.0));
            !self.refuse_spawn
        }
    }

    fn swap(replacement: &str) -> BarrelSwap {
        BarrelSwap {
            original: EntityId(1),
            replacement: replacement.to_string(),
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::identity(),
        }
    }

    fn world_with_original(known_prefabs: Vec<&'static str>) -> RecordingWorld {
        let world = RecordingWorld {
            known_prefabs,
            ..Default::default()
        };
        world.alive.lock().unwrap().insert(EntityId(1));
        world
    }

    #[test]
    fn test_destroys_then_creates_then_spawns() {
        let world = world_with_original(vec!["loot.prefab"]);

        assert_eq!(execute_swap(&world, &swap("loot.prefab")), SwapOutcome::Spawned(EntityId(100)));
        assert_eq!(
            *world.calls.lock().unwrap(),
            vec!["destroy 1 Gib", "create loot.prefab true", "spawn 100"]
        );
    }

    #[test]
    fn test_skips_when_original_is_gone() {
        let world = RecordingWorld::default();

        assert_eq!(execute_swap(&world, &swap("loot.prefab")), SwapOutcome::OriginalGone);
        assert!(world.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_prefab_is_silent_no_op() {
        let world = world_with_original(vec![]);

        assert_eq!(execute_swap(&world, &swap("missing.prefab")), SwapOutcome::CreateFailed);
        assert!(!world.entity_exists(EntityId(1)));
        assert_eq!(world.calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_spawn_refusal_is_reported() {
        let mut world = world_with_original(vec!["loot.prefab"]);
        world.refuse_spawn = true;

        assert_eq!(execute_swap(&world, &swap("loot.prefab")), SwapOutcome::SpawnFailed(EntityId(100)));
    }
}
