//! Swipe gesture analysis: a timed pointer path reduced to the four
//! quantities the throw physics consumes.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// One sampled pointer position. `t` is in milliseconds from any fixed
/// origin; only differences matter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipePoint {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

/// Raw metrics of a completed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipeMetrics {
    /// Total arc length of the path.
    pub path_length: f64,
    /// Milliseconds from first to last sample.
    pub duration_ms: f64,
    /// Units per second over the whole path.
    pub speed: f64,
    /// Mean perpendicular distance of interior samples from the straight
    /// start-to-end line. 0 means perfectly straight.
    pub straightness: f64,
    /// Signed end-minus-start x displacement.
    pub horizontal_deviation: f64,
    /// False for paths too short to be a deliberate throw.
    pub valid: bool,
}

/// Metrics scaled to the physics model's input ranges. Speed and length are
/// clamped to [0, 1]; straightness saturates at 1; horizontal deviation
/// passes through raw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSwipe {
    pub speed: f64,
    pub length: f64,
    pub straightness: f64,
    pub horizontal_deviation: f64,
}

/// Reduce a sampled path to its metrics. Returns `None` for fewer than two
/// samples; a degenerate-but-present path yields `valid: false` instead.
pub fn analyze(points: &[SwipePoint]) -> Option<SwipeMetrics> {
    if points.len() < 2 {
        return None;
    }

    let mut path_length = 0.0;
    for pair in points.windows(2) {
        let dx = pair[1].x - pair[0].x;
        let dy = pair[1].y - pair[0].y;
        path_length += (dx * dx + dy * dy).sqrt();
    }

    let first = points[0];
    let last = points[points.len() - 1];
    let duration_ms = last.t - first.t;
    let speed = if duration_ms > 0.0 { path_length / duration_ms * 1000.0 } else { 0.0 };

    Some(SwipeMetrics {
        path_length,
        duration_ms,
        speed,
        straightness: mean_line_deviation(points),
        horizontal_deviation: last.x - first.x,
        valid: path_length >= MIN_SWIPE_LENGTH * 0.5,
    })
}

/// Mean perpendicular distance of interior points from the start-to-end
/// line. Paths with fewer than three points, or with coincident endpoints,
/// count as straight.
fn mean_line_deviation(points: &[SwipePoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let start = points[0];
    let end = points[points.len() - 1];
    let line_length = ((end.x - start.x).powi(2) + (end.y - start.y).powi(2)).sqrt();
    if line_length < 1.0 {
        return 0.0;
    }

    let mut total = 0.0;
    for p in &points[1..points.len() - 1] {
        let numerator = ((end.y - start.y) * p.x - (end.x - start.x) * p.y + end.x * start.y
            - end.y * start.x)
            .abs();
        total += numerator / line_length;
    }
    total / (points.len() - 2) as f64
}

/// Scale raw metrics into the physics model's input space.
pub fn normalize(metrics: &SwipeMetrics) -> NormalizedSwipe {
    let (speed_min, speed_max) = SWIPE_SPEED_RANGE;
    let (len_min, len_max) = SWIPE_LENGTH_RANGE;
    NormalizedSwipe {
        speed: ((metrics.speed - speed_min) / (speed_max - speed_min)).clamp(0.0, 1.0),
        length: ((metrics.path_length - len_min) / (len_max - len_min)).clamp(0.0, 1.0),
        straightness: (metrics.straightness / SWIPE_STRAIGHTNESS_FULL_SCALE).min(1.0),
        horizontal_deviation: metrics.horizontal_deviation,
    }
}
