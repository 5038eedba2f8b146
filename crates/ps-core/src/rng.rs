//! Deterministic per-agent and simulation-level RNG wrappers.
//!
//! Each agent owns a `SmallRng` seeded with
//! `global_seed XOR (agent_id * MIXING_CONSTANT)`, where the constant is the
//! 64-bit fractional golden ratio.  Detection draws come from the searcher's
//! own stream, so the outcome of one encounter never depends on how many
//! other encounters were evaluated first.
//!
//! `SimRng` serves the single-threaded global draws: zone seeding, relaxation
//! jitter, noise permutations and traveller entries.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Shared sampling surface for both wrappers.
macro_rules! rng_methods {
    ($name:ident) => {
        impl $name {
            /// Uniform `f64` in `[0, 1)`.
            #[inline]
            pub fn unit(&mut self) -> f64 {
                self.0.r#gen::<f64>()
            }

            /// Uniform in `[lo, hi)`; returns `lo` when the range is empty.
            #[inline]
            pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
                if hi > lo { self.0.gen_range(lo..hi) } else { lo }
            }

            /// Symmetric noise in `[-amplitude, amplitude]`; zero amplitude
            /// draws nothing.
            #[inline]
            pub fn jitter(&mut self, amplitude: f64) -> f64 {
                if amplitude > 0.0 {
                    self.0.gen_range(-amplitude..=amplitude)
                } else {
                    0.0
                }
            }

            /// `true` with probability `p` (clamped to [0, 1]).
            #[inline]
            pub fn gen_bool(&mut self, p: f64) -> bool {
                self.0.gen_bool(p.clamp(0.0, 1.0))
            }

            /// Shuffle a slice in place (Fisher-Yates).
            #[inline]
            pub fn shuffle<T>(&mut self, slice: &mut [T]) {
                use rand::seq::SliceRandom;
                slice.shuffle(&mut self.0);
            }
        }
    };
}

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.  Kept in a `Vec` parallel to the agent arena.
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }
}

rng_methods!(AgentRng);

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG.  Used only from the single-threaded tick phases.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent child stream, e.g. one per subsystem.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }
}

rng_methods!(SimRng);
