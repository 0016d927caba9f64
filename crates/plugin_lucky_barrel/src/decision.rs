//! Replacement decision for freshly built entities.
//!
//! [`evaluate_construction`] is pure apart from its dice: it never touches the
//! world. A positive decision is returned as a [`BarrelSwap`] that the caller
//! executes on the next tick.

use crate::config::LuckyBarrelConfig;
use crate::dice::Dice;
use lucky_event_system::{EntityBuiltEvent, EntityId, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The only prefab this plugin reacts to.
pub const STORAGE_BARREL_PREFAB: &str = "assets/prefabs/misc/decor_dlc/storagebarrel/storage_barrel_b.prefab";

/// Deferred destroy-and-spawn produced by a positive decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarrelSwap {
    /// The placed storage barrel to destroy
    pub original: EntityId,
    /// Prefab chosen from the configured candidates
    pub replacement: String,
    pub position: Vec3,
    pub rotation: Quat,
}

/// Decides whether the entity described by `event` turns into a loot barrel.
///
/// Guards run in order and the first failure returns `None`:
///
/// 1. the event names a builder
/// 2. the builder holds the use permission (`has_use_permission`)
/// 3. with `always_turn_into_loot_barrel` unset the builder must have held the
///    secondary action; with it set a `0..100` roll must land below
///    `chance_to_spawn_loot_barrel`
/// 4. the placed prefab is [`STORAGE_BARREL_PREFAB`]
///
/// The replacement is then drawn uniformly from the candidate list.
pub fn evaluate_construction(
    event: &EntityBuiltEvent,
    has_use_permission: bool,
    config: &LuckyBarrelConfig,
    dice: &dyn Dice,
) -> Option<BarrelSwap> {
    event.builder?;

    if !has_use_permission {
        return None;
    }

    if !config.always_turn_into_loot_barrel && !event.secondary_action {
        return None;
    }

    if config.always_turn_into_loot_barrel && !chance_succeeded(config.chance_to_spawn_loot_barrel, dice) {
        return None;
    }

    if event.prefab != STORAGE_BARREL_PREFAB {
        return None;
    }

    let replacement = pick_replacement(&config.loot_barrel_prefabs, dice)?;

    Some(BarrelSwap {
        original: event.entity_id,
        replacement,
        position: event.position,
        rotation: event.rotation,
    })
}

fn chance_succeeded(chance: i32, dice: &dyn Dice) -> bool {
    i64::from(dice.roll_percent()) < i64::from(chance)
}

fn pick_replacement(candidates: &[String], dice: &dyn Dice) -> Option<String> {
    if candidates.is_empty() {
        return None;
    }
    // Clamp so a misbehaving dice cannot index out of bounds.
    let index = dice.pick(candidates.len()).min(candidates.len() - 1);
    candidates.get(index).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::SeededDice;
    use lucky_event_system::PlayerId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Dice returning a fixed roll and pick, counting how often it was rolled.
    struct FixedDice {
        roll: u32,
        pick: usize,
        rolls: AtomicUsize,
    }

    impl FixedDice {
        fn new(roll: u32, pick: usize) -> Self {
            Self { roll, pick, rolls: AtomicUsize::new(0) }
        }
    }

    impl Dice for FixedDice {
        fn roll_percent(&self) -> u32 {
            self.rolls.fetch_add(1, Ordering::SeqCst);
            self.roll
        }

        fn pick(&self, _len: usize) -> usize {
            self.pick
        }
    }

    fn config(always: bool, chance: i32, candidates: &[&str]) -> LuckyBarrelConfig {
        LuckyBarrelConfig {
            version: "1.0.0".to_string(),
            always_turn_into_loot_barrel: always,
            chance_to_spawn_loot_barrel: chance,
            loot_barrel_prefabs: candidates.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn barrel_event(secondary_action: bool) -> EntityBuiltEvent {
        EntityBuiltEvent {
            builder: Some(PlayerId::new()),
            entity_id: EntityId(11),
            prefab: STORAGE_BARREL_PREFAB.to_string(),
            position: Vec3::new(12.5, 3.0, -40.0),
            rotation: Quat::from_yaw_degrees(30.0),
            secondary_action,
            timestamp: 0,
        }
    }

    #[test]
    fn test_roll_below_chance_replaces_with_original_transform() {
        let event = barrel_event(false);
        let dice = FixedDice::new(49, 1);

        let swap = evaluate_construction(&event, true, &config(true, 50, &["A", "B"]), &dice).unwrap();

        assert_eq!(swap.original, EntityId(11));
        assert_eq!(swap.replacement, "B");
        assert_eq!(swap.position, event.position);
        assert_eq!(swap.rotation, event.rotation);
    }

    #[test]
    fn test_roll_equal_to_chance_does_not_replace() {
        let dice = FixedDice::new(50, 0);
        assert!(evaluate_construction(&barrel_event(false), true, &config(true, 50, &["A", "B"]), &dice).is_none());
    }

    #[test]
    fn test_zero_chance_never_replaces() {
        let cfg = config(true, 0, &["A"]);
        for roll in 0..100 {
            let dice = FixedDice::new(roll, 0);
            assert!(evaluate_construction(&barrel_event(true), true, &cfg, &dice).is_none());
        }
    }

    #[test]
    fn test_full_chance_always_replaces() {
        let cfg = config(true, 100, &["A"]);
        for roll in 0..100 {
            let dice = FixedDice::new(roll, 0);
            assert!(evaluate_construction(&barrel_event(false), true, &cfg, &dice).is_some());
        }
    }

    #[test]
    fn test_signal_mode_requires_secondary_action_and_ignores_chance() {
        let dice = FixedDice::new(99, 0);
        for chance in [0, 50, 100] {
            let cfg = config(false, chance, &["A"]);
            assert!(evaluate_construction(&barrel_event(true), true, &cfg, &dice).is_some());
            assert!(evaluate_construction(&barrel_event(false), true, &cfg, &dice).is_none());
        }
        assert_eq!(dice.rolls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_chance_mode_ignores_secondary_action() {
        let dice = FixedDice::new(10, 0);
        let cfg = config(true, 50, &["A"]);
        assert!(evaluate_construction(&barrel_event(false), true, &cfg, &dice).is_some());
        assert!(evaluate_construction(&barrel_event(true), true, &cfg, &dice).is_some());
    }

    #[test]
    fn test_without_permission_never_replaces() {
        let dice = FixedDice::new(0, 0);
        for cfg in [config(true, 100, &["A"]), config(false, 100, &["A"])] {
            assert!(evaluate_construction(&barrel_event(true), false, &cfg, &dice).is_none());
        }
        assert_eq!(dice.rolls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_missing_builder_never_replaces() {
        let mut event = barrel_event(true);
        event.builder = None;
        let dice = FixedDice::new(0, 0);
        assert!(evaluate_construction(&event, true, &config(true, 100, &["A"]), &dice).is_none());
    }

    #[test]
    fn test_other_prefab_never_replaces() {
        let mut event = barrel_event(true);
        event.prefab = "assets/prefabs/misc/decor_dlc/storagebarrel/storage_barrel_c.prefab".to_string();
        let dice = FixedDice::new(0, 0);

        for cfg in [config(true, 100, &["A"]), config(false, 100, &["A"])] {
            assert!(evaluate_construction(&event, true, &cfg, &dice).is_none());
        }
    }

    #[test]
    fn test_selection_is_always_a_candidate() {
        let candidates = ["A", "B", "C"];
        let cfg = config(true, 100, &candidates);
        let dice = SeededDice::new(1234);

        for _ in 0..300 {
            let swap = evaluate_construction(&barrel_event(false), true, &cfg, &dice).unwrap();
            assert!(candidates.contains(&swap.replacement.as_str()));
        }
    }

    #[test]
    fn test_empty_candidate_list_yields_no_swap() {
        let dice = FixedDice::new(0, 0);
        assert!(evaluate_construction(&barrel_event(false), true, &config(true, 100, &[]), &dice).is_none());
    }

    #[test]
    fn test_out_of_range_pick_is_clamped() {
        let dice = FixedDice::new(0, 17);
        let swap = evaluate_construction(&barrel_event(false), true, &config(true, 100, &["A", "B"]), &dice).unwrap();
        assert_eq!(swap.replacement, "B");
    }
}
