//! Batch leg simulation: the advisor picks targets, automated throws play
//! them through the full pipeline, rayon runs legs in parallel.

pub mod engine;
pub mod fast_prng;

pub use engine::{estimate_hit_rate, simulate_batch, simulate_leg, LegResult, SimulationResult};
pub use fast_prng::SplitMix64;
