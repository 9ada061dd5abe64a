//! Pure board geometry: point classification and aim-point computation.
//!
//! The two directions are inverses over scoring locations:
//! `classify(target_center(t))` recovers `t`'s segment and ring for every
//! segment/ring pair, and bull targets collapse to the board center.

use crate::constants::*;
use crate::types::{BoardPoint, Hit, Ring, Target};

/// Classify a landing point into the hit it scores.
///
/// Checks, in order: off the board entirely, inner bull, outer bull, then
/// wedge angle + radial band. Ring boundaries are inclusive on the scoring
/// side, so a dart at exactly 340 units is a double, not a miss.
pub fn classify(point: BoardPoint) -> Hit {
    let distance = point.radius();

    if distance > DOUBLE_OUTER_RADIUS {
        return Hit::MISS;
    }
    if distance <= BULL_INNER_RADIUS {
        return Hit::new(50, Ring::DoubleBull);
    }
    if distance <= BULL_OUTER_RADIUS {
        return Hit::new(25, Ring::SingleBull);
    }

    let segment = segment_at_angle(point.y.atan2(point.x));
    let ring = if distance >= DOUBLE_INNER_RADIUS {
        Ring::Double
    } else if (TREBLE_INNER_RADIUS..=TREBLE_OUTER_RADIUS).contains(&distance) {
        Ring::Treble
    } else if distance < TREBLE_INNER_RADIUS {
        Ring::InnerSingle
    } else {
        Ring::OuterSingle
    };

    Hit::new(segment, ring)
}

/// Segment value of the wedge containing `angle` (an `atan2` result).
fn segment_at_angle(angle: f64) -> i32 {
    let mut a = angle - SEGMENT_START_ANGLE;
    if a < 0.0 {
        a += std::f64::consts::TAU;
    }
    let index = ((a / SEGMENT_ANGLE) as usize) % SEGMENT_COUNT;
    SEGMENTS[index]
}

/// The point to aim at for a target: the radial midpoint of the ring at the
/// wedge's angular center. Bull targets return the board center. `None` for
/// a miss ring or a segment not on the board.
pub fn target_center(target: Target) -> Option<BoardPoint> {
    match target.ring {
        Ring::DoubleBull | Ring::SingleBull => return Some(BoardPoint::CENTER),
        Ring::Miss => return None,
        _ => {}
    }

    let index = segment_index(target.segment)?;
    let angle = SEGMENT_START_ANGLE + index as f64 * SEGMENT_ANGLE + SEGMENT_ANGLE / 2.0;
    let radius = match target.ring {
        Ring::Double => (DOUBLE_OUTER_RADIUS + DOUBLE_INNER_RADIUS) / 2.0,
        Ring::Treble => (TREBLE_OUTER_RADIUS + TREBLE_INNER_RADIUS) / 2.0,
        Ring::InnerSingle => (TREBLE_INNER_RADIUS + BULL_OUTER_RADIUS) / 2.0,
        // Plain single shots aim at the wider band between treble and double.
        _ => (DOUBLE_INNER_RADIUS + TREBLE_OUTER_RADIUS) / 2.0,
    };

    Some(BoardPoint::new(angle.cos() * radius, angle.sin() * radius))
}

/// Distance from a point to the nearest wire: the six ring circles and the
/// twenty radial divider lines (measured to the full diameter each pair of
/// opposite wires forms).
pub fn nearest_wire_distance(point: BoardPoint) -> f64 {
    let distance = point.radius();
    let angle = point.y.atan2(point.x);

    let rings = [
        BULL_INNER_RADIUS,
        BULL_OUTER_RADIUS,
        TREBLE_INNER_RADIUS,
        TREBLE_OUTER_RADIUS,
        DOUBLE_INNER_RADIUS,
        DOUBLE_OUTER_RADIUS,
    ];
    let mut nearest = f64::INFINITY;
    for r in rings {
        nearest = nearest.min((distance - r).abs());
    }

    for i in 0..SEGMENT_COUNT {
        let wire_angle = SEGMENT_START_ANGLE + i as f64 * SEGMENT_ANGLE;
        let mut diff = (angle - wire_angle).abs();
        if diff > std::f64::consts::PI {
            diff = std::f64::consts::TAU - diff;
        }
        nearest = nearest.min(distance * diff.sin());
    }

    nearest
}

/// The angular neighbors of a segment, as (left, right) seen from the
/// player. Missing a wedge laterally lands in one of these.
pub fn adjacent_segments(segment: i32) -> Option<(i32, i32)> {
    let index = segment_index(segment)?;
    let left = SEGMENTS[(index + SEGMENT_COUNT - 1) % SEGMENT_COUNT];
    let right = SEGMENTS[(index + 1) % SEGMENT_COUNT];
    Some((left, right))
}
