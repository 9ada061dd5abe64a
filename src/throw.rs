//! The per-dart pipeline: physics, stance adjustment, collision, wire
//! deflection, and classification composed in that fixed order.
//!
//! Two entry points produce the raw landing — a swipe gesture through the
//! full physics model, or a skill-rated automated throw — and both feed the
//! same resolution chain. All randomness comes from the caller's generator,
//! so a seed replays the whole throw.

use rand::Rng;
use serde::Serialize;

use crate::collision::{check_collision, check_wire_deflection, CollisionEvent};
use crate::geometry::classify;
use crate::oche::OcheStance;
use crate::physics::{calculate_landing, simulate_throw, swipe_quality};
use crate::swipe::NormalizedSwipe;
use crate::types::{BoardPoint, DartOnBoard, Difficulty, Hit, ThrowBaseline};

/// Everything that happened to one dart between release and rest.
#[derive(Debug, Clone, Serialize)]
pub struct ThrowOutcome {
    /// Where the physics model put the dart before any adjustment.
    pub raw_landing: BoardPoint,
    /// After the stance adjustment.
    pub adjusted: BoardPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collision: Option<CollisionEvent>,
    pub wire_deflected: bool,
    /// Final resting position, classified into `hit`.
    pub position: BoardPoint,
    pub hit: Hit,
    /// Gesture quality 0..=100; absent for automated throws.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swipe_quality: Option<i32>,
}

/// Throw from a swipe gesture.
pub fn throw_swipe(
    swipe: &NormalizedSwipe,
    target: BoardPoint,
    difficulty: Difficulty,
    baseline: &ThrowBaseline,
    stance: &OcheStance,
    darts: &[DartOnBoard],
    rng: &mut impl Rng,
) -> ThrowOutcome {
    let raw = calculate_landing(swipe, target, difficulty, baseline, rng);
    let mut outcome = resolve_flight(raw, stance, darts, rng);
    outcome.swipe_quality = Some(swipe_quality(swipe));
    outcome
}

/// Automated throw at a skill rating (bots, batch simulation).
pub fn throw_automated(
    target: BoardPoint,
    skill: i32,
    stance: &OcheStance,
    darts: &[DartOnBoard],
    rng: &mut impl Rng,
) -> ThrowOutcome {
    let raw = simulate_throw(target, skill, rng);
    resolve_flight(raw, stance, darts, rng)
}

/// Run a raw landing through stance, collision, wire, and classification.
fn resolve_flight(
    raw: BoardPoint,
    stance: &OcheStance,
    darts: &[DartOnBoard],
    rng: &mut impl Rng,
) -> ThrowOutcome {
    let adjusted = stance.adjust(raw);

    let collision = check_collision(adjusted, darts, rng);
    let after_collision = collision.map_or(adjusted, |c| c.position);

    let wire = check_wire_deflection(after_collision, rng);
    let position = wire.unwrap_or(after_collision);

    ThrowOutcome {
        raw_landing: raw,
        adjusted,
        collision,
        wire_deflected: wire.is_some(),
        position,
        hit: classify(position),
        swipe_quality: None,
    }
}
