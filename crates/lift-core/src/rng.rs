//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! A whole run draws from one `SmallRng` seeded by `BuildingConfig::rng_seed`.
//! The cooperative scheduler executes exactly one process at a time in a
//! fixed order, so the sequence of draws (and therefore every destination
//! floor) is reproducible from the seed alone.
//!
//! Independent replications take their seeds from
//! [`SimRng::replication_seed`], spreading seeds with the 64-bit golden-ratio
//! constant so that replication `k` never shares a stream with replication
//! `k + 1`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG.
///
/// Used only from the single-threaded scheduler.  Parallel replications each
/// build their own `SimRng` from a replication seed.
#[derive(Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed for replication `k` of a run rooted at `seed`, without consuming
    /// any RNG state.
    #[inline]
    pub fn replication_seed(seed: u64, k: u64) -> u64 {
        seed ^ k.wrapping_mul(MIXING_CONSTANT)
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
}
