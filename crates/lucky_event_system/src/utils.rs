//! # Utility Functions

use crate::system::EventSystem;
use std::sync::Arc;

/// Returns the current Unix timestamp in seconds.
///
/// A clock set before the Unix epoch yields 0.
pub fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Creates a new shared event system instance.
pub fn create_lucky_event_system() -> Arc<EventSystem> {
    Arc::new(EventSystem::new())
}
