//! Deterministic random streams.
//!
//! # Determinism strategy
//!
//! A replication is strictly sequential, so it draws everything from a
//! single `SimRng`.  Replication `i` of a batch is seeded by:
//!
//!   seed = base_seed XOR ((i + 1) * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive replication indices across the seed space.
//! The seed depends only on the index, never on which worker thread picks
//! the replication up, so a batch is reproducible at any worker count.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Replication-level RNG.
///
/// Not `Sync`: each replication owns its stream outright.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed for replication `index` of a batch rooted at `base_seed`.
    pub fn replication_seed(base_seed: u64, index: usize) -> u64 {
        base_seed ^ (index as u64 + 1).wrapping_mul(MIXING_CONSTANT)
    }

    /// Expose the inner `SmallRng` for use with `rand_distr` distributions.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element; `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// `amount` distinct indices drawn uniformly from `0..length`.
    ///
    /// `amount` is capped at `length`.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.0, length, amount.min(length)).into_vec()
    }
}
