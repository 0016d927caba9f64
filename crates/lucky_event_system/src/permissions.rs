//! Permission registry contract.
//!
//! Permissions are plain dotted strings (`"<plugin>.<capability>"`) that a
//! plugin registers once and then checks per player.

use crate::types::PlayerId;

/// Host-side registry of named permissions.
pub trait PermissionRegistry: Send + Sync + std::fmt::Debug {
    /// Declares `permission` as owned by the plugin `owner`.
    ///
    /// Registering an already known permission is a no-op.
    fn register_permission(&self, permission: &str, owner: &str);

    /// Returns true when `permission` has been registered by some plugin.
    fn is_registered(&self, permission: &str) -> bool;

    /// Returns true when `player` holds `permission`.
    ///
    /// Unregistered permissions are never held.
    fn user_has_permission(&self, player: PlayerId, permission: &str) -> bool;
}
