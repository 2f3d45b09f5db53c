//! Deterministic per-cyclist and simulation-level RNG wrappers.
//!
//! Each cyclist gets its own independent `SmallRng` seeded by
//!
//!   seed = global_seed XOR (cyclist_id * MIXING_CONSTANT)
//!
//! so sampled parameters for cyclist `i` do not depend on how many cyclists
//! were sampled before it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::CyclistId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── CyclistRng ────────────────────────────────────────────────────────────────

/// Per-cyclist deterministic RNG.
pub struct CyclistRng(SmallRng);

impl CyclistRng {
    /// Seed deterministically from the run's global seed and a cyclist ID.
    pub fn new(global_seed: u64, cyclist: CyclistId) -> Self {
        let seed = global_seed ^ (cyclist.0 as u64).wrapping_mul(MIXING_CONSTANT);
        CyclistRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global draws (departure times, etc.).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
