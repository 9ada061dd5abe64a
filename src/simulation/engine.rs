//! Leg simulation engine — plays 501 legs with the advisor choosing every
//! target and skill-rated automated throws executing them.
//!
//! Each leg runs the real pipeline: stance (centered), collisions against
//! the darts already up this turn, wire deflection, classification, and the
//! double-out bust rules. Batches run legs in parallel, one seeded
//! generator per leg, so results are reproducible at any thread count.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::Instant;

use crate::advisor::suggest_x01;
use crate::constants::{SKILL_ERROR_SCALE, X01_START};
use crate::game::{DartEvent, X01Game};
use crate::geometry::{classify, target_center};
use crate::oche::OcheStance;
use crate::simulation::fast_prng::SplitMix64;
use crate::throw::throw_automated;
use crate::types::{BoardPoint, DartsContext, Target};

/// Safety cap: a leg that runs this long is recorded as-is. Unreachable in
/// practice even at skill 0.
const MAX_DARTS_PER_LEG: i32 = 10_000;

/// One finished (or capped) leg.
#[derive(Debug, Clone)]
pub struct LegResult {
    pub darts: i32,
    pub turns: i32,
    /// The winning dart's shorthand, `None` for a capped leg.
    pub checkout: Option<String>,
}

/// Aggregates of a batch of legs.
pub struct SimulationResult {
    pub darts: Vec<i32>,
    pub mean: f64,
    pub std_dev: f64,
    pub min: i32,
    pub max: i32,
    pub median: i32,
    /// Standard scoring-rate stat: points per three darts.
    pub three_dart_average: f64,
    pub elapsed: std::time::Duration,
}

/// Play one 501 leg. The advisor is consulted before every dart with the
/// live score and darts remaining; throws run through the full pipeline.
pub fn simulate_leg(ctx: &DartsContext, skill: i32, rng: &mut SmallRng) -> LegResult {
    let mut game = X01Game::new();
    let stance = OcheStance::new();
    let mut checkout = None;

    while !game.finished() && game.total_darts() < MAX_DARTS_PER_LEG {
        let suggestion = suggest_x01(&ctx.checkouts, game.score(), game.darts_remaining());
        let aim = target_center(suggestion.target).unwrap_or(BoardPoint::CENTER);
        let outcome = throw_automated(aim, skill, &stance, game.board_darts(), rng);
        if game.apply_dart(outcome.position, outcome.hit) == DartEvent::Won {
            checkout = Some(
                Target::new(outcome.hit.segment, outcome.hit.ring).code(),
            );
        }
    }

    LegResult { darts: game.total_darts(), turns: game.turns_completed(), checkout }
}

/// Play `legs` legs in parallel, each from its own seeded generator
/// (`seed + leg index`), and aggregate the dart counts.
pub fn simulate_batch(ctx: &DartsContext, legs: usize, skill: i32, seed: u64) -> SimulationResult {
    if legs == 0 {
        return SimulationResult {
            darts: Vec::new(),
            mean: 0.0,
            std_dev: 0.0,
            min: 0,
            max: 0,
            median: 0,
            three_dart_average: 0.0,
            elapsed: std::time::Duration::ZERO,
        };
    }

    let start = Instant::now();

    let mut darts: Vec<i32> = (0..legs)
        .into_par_iter()
        .map(|i| {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i as u64));
            simulate_leg(ctx, skill, &mut rng).darts
        })
        .collect();

    let elapsed = start.elapsed();

    let sum: f64 = darts.iter().map(|&d| d as f64).sum();
    let mean = sum / legs as f64;
    let variance: f64 =
        darts.iter().map(|&d| (d as f64 - mean).powi(2)).sum::<f64>() / legs as f64;
    let std_dev = variance.sqrt();
    let min = *darts.iter().min().unwrap_or(&0);
    let max = *darts.iter().max().unwrap_or(&0);

    darts.sort_unstable();
    let median = darts[legs / 2];

    let three_dart_average =
        if mean > 0.0 { X01_START as f64 * 3.0 / mean } else { 0.0 };

    SimulationResult { darts, mean, std_dev, min, max, median, three_dart_average, elapsed }
}

/// Cheap single-target estimator: sample `trials` raw landings around the
/// target's aim point at the skill's error spread and count exact hits.
/// No stance, collision, or wire effects — pure aim-and-scatter.
pub fn estimate_hit_rate(target: Target, skill: i32, trials: usize, seed: u64) -> f64 {
    let Some(aim) = target_center(target) else {
        return 0.0;
    };
    let error_range = (100 - skill.clamp(0, 100)) as f64 * SKILL_ERROR_SCALE;

    let mut rng = SplitMix64::new(seed);
    let mut hits = 0usize;
    for _ in 0..trials {
        let (dx, dy) = rng.offset_pair(error_range);
        let hit = classify(BoardPoint::new(aim.x + dx, aim.y + dy));
        if hit.segment == target.segment && hit.ring == target.ring {
            hits += 1;
        }
    }
    hits as f64 / trials as f64
}
