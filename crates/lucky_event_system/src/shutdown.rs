//! Shutdown coordination between the host tick loop and its owner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Shared shutdown flag. Clones observe the same state.
#[derive(Debug, Clone)]
pub struct ShutdownState {
    shutdown_initiated: Arc<AtomicBool>,
}

impl ShutdownState {
    pub fn new() -> Self {
        Self {
            shutdown_initiated: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns true once shutdown has been initiated; no further ticks should run.
    pub fn is_shutdown_initiated(&self) -> bool {
        self.shutdown_initiated.load(Ordering::Acquire)
    }

    /// Initiates shutdown.
    pub fn initiate_shutdown(&self) {
        self.shutdown_initiated.store(true, Ordering::Release);
        info!("🛑 Shutdown initiated - tick loop will stop");
    }
}

impl Default for ShutdownState {
    fn default() -> Self {
        Self::new()
    }
}
