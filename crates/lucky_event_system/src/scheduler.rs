//! One-shot next-tick scheduling.
//!
//! Event handlers run while the world is mid-dispatch, so anything that
//! creates or destroys entities is queued here and executed by the host at
//! the start of the following tick.

use crossbeam::channel::{unbounded, Receiver, Sender};
use tracing::{debug, warn};

type Task = Box<dyn FnOnce() + Send + 'static>;

/// Queue of callbacks deferred to the next host tick.
///
/// Cloning yields another handle onto the same queue.
#[derive(Clone)]
pub struct TickScheduler {
    sender: Sender<Task>,
    receiver: Receiver<Task>,
}

impl std::fmt::Debug for TickScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}

impl TickScheduler {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Queues `task` to run exactly once on the next tick.
    pub fn next_tick<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        // Both ends live in `self`, so the channel cannot be disconnected here.
        if self.sender.send(Box::new(task)).is_err() {
            warn!("⏱️ Tick queue disconnected, dropping deferred task");
        }
    }

    /// Number of callbacks waiting for the next tick.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Runs the callbacks queued before this call and returns how many ran.
    ///
    /// Callbacks queued by the callbacks themselves wait for the next call.
    pub fn run_pending(&self) -> usize {
        let due = self.receiver.len();
        let mut ran = 0;
        for _ in 0..due {
            match self.receiver.try_recv() {
                Ok(task) => {
                    task();
                    ran += 1;
                }
                Err(_) => break,
            }
        }
        if ran > 0 {
            debug!("⏱️ Ran {} deferred tasks", ran);
        }
        ran
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}
