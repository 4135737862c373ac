//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! The whole simulation consumes a single `SimRng` seeded from one `u64`.
//! It is passed explicitly (`&mut SimRng`) to the graph builder, the location
//! model, and the disease model; there is no global or thread-local source.
//! Because agents are always visited in arena order, the same seed and the
//! same config reproduce every tick bit-for-bit.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.
///
/// Single consumer, no synchronisation.  Every draw the simulation makes
/// goes through one of the three methods below, so the draw order is the
/// call order.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.0);
    }

    /// Pick `amount` distinct indices from `0..len` without replacement.
    ///
    /// Uses a partial Fisher-Yates shuffle, so only `amount` swaps are made.
    /// Asking for more than `len` is not an error: the request is clamped
    /// and every index is returned (in random order).
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        let amount = amount.min(len);
        let mut pool: Vec<usize> = (0..len).collect();
        let (chosen, _rest) = pool.partial_shuffle(&mut self.0, amount);
        chosen.to_vec()
    }
}
