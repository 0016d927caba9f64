//! Random draws used by the replacement decision.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Source of the two uniform draws a placement needs.
pub trait Dice: Send + Sync {
    /// Uniform integer in `0..100`.
    fn roll_percent(&self) -> u32;

    /// Uniform index in `0..len`. Callers guarantee `len > 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Draws from the calling thread's RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDice;

impl Dice for ThreadDice {
    fn roll_percent(&self) -> u32 {
        rand::thread_rng().gen_range(0..100)
    }

    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible dice backed by a seeded [`StdRng`].
#[derive(Debug)]
pub struct SeededDice {
    rng: Mutex<StdRng>,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }
}

impl Dice for SeededDice {
    fn roll_percent(&self) -> u32 {
        self.with_rng(|rng| rng.gen_range(0..100))
    }

    fn pick(&self, len: usize) -> usize {
        self.with_rng(|rng| rng.gen_range(0..len))
    }
}
