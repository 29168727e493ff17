//! Uniform path selection.

use crate::core::random::RandomSource;
use crate::core::types::PathId;

/// Chooses one path id per execution, uniformly over `[0, count)`.
///
/// Consecutive draws are independent from the caller's point of view; the
/// selector keeps no history beyond the state of its random source.
pub struct Selector {
    count: usize,
    rng: Box<dyn RandomSource>,
}

impl Selector {
    /// Build a selector over `count` paths. `count` must be non-zero.
    pub fn new(count: usize, rng: Box<dyn RandomSource>) -> Self {
        debug_assert!(count > 0, "selector over empty registry");
        Self { count, rng }
    }

    pub fn choose(&mut self) -> PathId {
        PathId::new(self.rng.below(self.count))
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }
}
