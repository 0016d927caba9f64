//! In-memory permission registry.

use dashmap::DashMap;
use lucky_event_system::{PermissionRegistry, PlayerId};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Permission registry keeping registrations and per-player grants in memory.
#[derive(Debug, Default)]
pub struct MemoryPermissions {
    /// permission name -> owning plugin
    registered: DashMap<String, String>,
    grants: DashMap<PlayerId, HashSet<String>>,
}

impl MemoryPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `permission` to `player`.
    ///
    /// Returns false when the permission has not been registered.
    pub fn grant(&self, player: PlayerId, permission: &str) -> bool {
        if !self.registered.contains_key(permission) {
            warn!("🔐 Cannot grant unregistered permission '{}' to {}", permission, player);
            return false;
        }
        self.grants
            .entry(player)
            .or_default()
            .insert(permission.to_string());
        true
    }

    /// Revokes `permission` from `player`; returns whether it was held.
    pub fn revoke(&self, player: PlayerId, permission: &str) -> bool {
        self.grants
            .get_mut(&player)
            .map_or(false, |mut held| held.remove(permission))
    }

    /// Plugin that registered `permission`.
    pub fn owner_of(&self, permission: &str) -> Option<String> {
        self.registered.get(permission).map(|entry| entry.value().clone())
    }
}

impl PermissionRegistry for MemoryPermissions {
    fn register_permission(&self, permission: &str, owner: &str) {
        if self.registered.contains_key(permission) {
            return;
        }
        self.registered.insert(permission.to_string(), owner.to_string());
        debug!("🔐 Registered permission '{}' for {}", permission, owner);
    }

    fn is_registered(&self, permission: &str) -> bool {
        self.registered.contains_key(permission)
    }

    fn user_has_permission(&self, player: PlayerId, permission: &str) -> bool {
        self.is_registered(permission)
            && self
                .grants
                .get(&player)
                .map_or(false, |held| held.contains(permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_requires_registration() {
        let permissions = MemoryPermissions::new();
        let player = PlayerId::new();

        assert!(!permissions.grant(player, "luckybarrel.use"));
        assert!(!permissions.user_has_permission(player, "luckybarrel.use"));

        permissions.register_permission("luckybarrel.use", "LuckyBarrel");
        assert!(permissions.grant(player, "luckybarrel.use"));
        assert!(permissions.user_has_permission(player, "luckybarrel.use"));
        assert!(!permissions.user_has_permission(PlayerId::new(), "luckybarrel.use"));
    }

    #[test]
    fn test_revoke() {
        let permissions = MemoryPermissions::new();
        let player = PlayerId::new();
        permissions.register_permission("luckybarrel.use", "LuckyBarrel");
        permissions.grant(player, "luckybarrel.use");

        assert!(permissions.revoke(player, "luckybarrel.use"));
        assert!(!permissions.revoke(player, "luckybarrel.use"));
        assert!(!permissions.user_has_permission(player, "luckybarrel.use"));
    }

    #[test]
    fn test_first_registration_keeps_ownership() {
        let permissions = MemoryPermissions::new();
        permissions.register_permission("shared.use", "First");
        permissions.register_permission("shared.use", "Second");

        assert_eq!(permissions.owner_of("shared.use").as_deref(), Some("First"));
        assert!(permissions.is_registered("shared.use"));
    }
}
