//! Board geometry, physics tuning, and game-rule constants.
//!
//! All lengths are in board units: the playable board spans a radius of
//! [`DOUBLE_OUTER_RADIUS`] = 340 from the center. Coordinates everywhere in
//! this crate are Cartesian offsets from the board center, +x right, +y down.

/// Segment values clockwise from the top of the board.
///
/// Index 0 is the 20-wedge straddling vertical; each wedge spans
/// [`SEGMENT_ANGLE`] radians. The alternating high/low layout is the
/// regulation one, so angular neighbors of 20 are 1 and 5.
pub const SEGMENTS: [i32; SEGMENT_COUNT] = [
    20, 1, 18, 4, 13, 6, 10, 15, 2, 17, 3, 19, 7, 16, 8, 11, 14, 9, 12, 5,
];

/// Number of radial wedges on a regulation board.
pub const SEGMENT_COUNT: usize = 20;

/// Angular width of one wedge: 2π / 20 = 18°.
pub const SEGMENT_ANGLE: f64 = std::f64::consts::TAU / SEGMENT_COUNT as f64;

/// Angle of the leading edge of wedge 0 (the 20), measured like `atan2`:
/// straight up is −π/2, so the wedge straddles vertical.
pub const SEGMENT_START_ANGLE: f64 = -std::f64::consts::FRAC_PI_2 - SEGMENT_ANGLE / 2.0;

/// Outer edge of the double ring; beyond this is a miss.
pub const DOUBLE_OUTER_RADIUS: f64 = 340.0;

/// Inner edge of the double ring.
pub const DOUBLE_INNER_RADIUS: f64 = 320.0;

/// Outer edge of the treble ring.
pub const TREBLE_OUTER_RADIUS: f64 = 210.0;

/// Inner edge of the treble ring.
pub const TREBLE_INNER_RADIUS: f64 = 190.0;

/// Outer bull (the 25 ring).
pub const BULL_OUTER_RADIUS: f64 = 32.0;

/// Inner bull (the 50). Regulation 12.7 mm scaled to board units.
pub const BULL_INNER_RADIUS: f64 = 12.7;

/// Half-width of the dividing wires; a dart landing this close to a ring or
/// wedge boundary may deflect.
pub const WIRE_WIDTH: f64 = 1.5;

// ── Swipe gesture ───────────────────────────────────────────────────────────

/// Minimum path length for a full-strength swipe; paths shorter than half
/// this are rejected as accidental touches.
pub const MIN_SWIPE_LENGTH: f64 = 30.0;

/// Swipe speed (units/second) mapped to normalized 0.0 and 1.0.
pub const SWIPE_SPEED_RANGE: (f64, f64) = (200.0, 2500.0);

/// Swipe path length mapped to normalized 0.0 and 1.0.
pub const SWIPE_LENGTH_RANGE: (f64, f64) = (30.0, 300.0);

/// Mean perpendicular wobble that normalizes to 1.0 (maximally crooked).
pub const SWIPE_STRAIGHTNESS_FULL_SCALE: f64 = 50.0;

// ── Throw physics ───────────────────────────────────────────────────────────

/// Normalized swipe speed that produces zero speed error.
pub const OPTIMAL_SPEED: f64 = 0.6;

/// Normalized swipe length that produces zero vertical release error.
pub const OPTIMAL_LENGTH: f64 = 0.5;

/// Board units of vertical error per unit of normalized release deviation.
pub const RELEASE_ERROR_SCALE: f64 = 120.0;

/// Fraction of raw horizontal gesture deviation carried into the throw.
pub const STRAIGHTNESS_PENALTY: f64 = 0.5;

/// Board units of uniform error per skill point below 100 in automated
/// throws ([`crate::physics::simulate_throw`]).
pub const SKILL_ERROR_SCALE: f64 = 1.5;

// ── Oche (throwing line) ────────────────────────────────────────────────────

/// Full lateral width of the oche; offsets are clamped to ± half of this.
pub const OCHE_WIDTH: f64 = 200.0;

/// Perpendicular distance from the oche to the board plane.
pub const OCHE_BASE_DISTANCE: f64 = 400.0;

/// Error-multiplier growth per unit of normalized lateral offset, applied
/// ×10 (full offset costs +3% accuracy).
pub const OCHE_ANGLE_PENALTY: f64 = 0.003;

/// Horizontal aim bias per unit of raw offset (throwing from the right
/// pushes darts left).
pub const OCHE_BIAS_PER_UNIT: f64 = -0.1;

/// Board units of horizontal shift per unit tangent of the stance angle.
pub const OCHE_ANGLE_SHIFT_SCALE: f64 = 50.0;

// ── Collision & deflection ──────────────────────────────────────────────────

/// Dart shaft radius; landing within two of these of another dart's center
/// can drive the tip into its shaft.
pub const DART_SHAFT_RADIUS: f64 = 2.0;

/// Dart barrel radius.
pub const DART_BARREL_RADIUS: f64 = 4.0;

/// Dart flight (fin) radius.
pub const DART_FLIGHT_RADIUS: f64 = 12.0;

/// Probability of landing inside another dart's shaft (a "robin hood").
pub const ROBIN_HOOD_CHANCE: f64 = 0.02;

/// Probability of glancing off another dart's barrel when inside barrel range.
pub const BARREL_CONTACT_CHANCE: f64 = 0.20;

/// Probability of clipping another dart's flight when inside flight range.
pub const FLIGHT_CLIP_CHANCE: f64 = 0.10;

/// Probability of deflecting when the dart lands within [`WIRE_WIDTH`] of a
/// ring or wedge wire.
pub const WIRE_DEFLECT_CHANCE: f64 = 0.08;

// ── Game rules ──────────────────────────────────────────────────────────────

/// Starting score for the standard x01 game.
pub const X01_START: i32 = 501;

/// Darts thrown per turn.
pub const DARTS_PER_TURN: i32 = 3;

/// Highest score finishable with three darts (T20 T20 Bull).
pub const MAX_CHECKOUT: i32 = 170;

/// Scores in [2, 170] with no finishing path.
pub const BOGEY_NUMBERS: [i32; 7] = [169, 168, 166, 165, 163, 162, 159];

/// Doubles worth leaving, best first. D20 and D16 lead because a missed
/// double there still leaves an even number.
pub const PREFERRED_FINISHES: [i32; 6] = [40, 32, 36, 24, 16, 8];

/// Cricket numbers in priority order; 25 is the bull.
pub const CRICKET_NUMBERS: [i32; 7] = [20, 19, 18, 17, 16, 15, 25];

/// Marks required to close a cricket number.
pub const CRICKET_MARKS_TO_CLOSE: i32 = 3;

// ── Calibration ─────────────────────────────────────────────────────────────

/// Practice throws required before a baseline is computed.
pub const CALIBRATION_THROWS: usize = 20;

/// Grouping radius that maps to consistency 0.
pub const CONSISTENCY_FULL_SCALE: f64 = 100.0;

/// Wedge index (0..20) of a segment value, or `None` for non-segment scores.
#[inline(always)]
pub fn segment_index(segment: i32) -> Option<usize> {
    SEGMENTS.iter().position(|&s| s == segment)
}

/// Whether `score` is one of the seven unfinishable numbers.
#[inline(always)]
pub fn is_bogey(score: i32) -> bool {
    BOGEY_NUMBERS.contains(&score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_layout_is_regulation() {
        assert_eq!(SEGMENTS.len(), SEGMENT_COUNT);
        let mut seen = [false; 21];
        for &s in &SEGMENTS {
            assert!((1..=20).contains(&s));
            assert!(!seen[s as usize], "segment {s} repeated");
            seen[s as usize] = true;
        }
        // Angular neighbors of 20 on a regulation board.
        assert_eq!(SEGMENTS[1], 1);
        assert_eq!(SEGMENTS[SEGMENT_COUNT - 1], 5);
    }

    #[test]
    fn segment_index_inverts_layout() {
        for (i, &s) in SEGMENTS.iter().enumerate() {
            assert_eq!(segment_index(s), Some(i));
        }
        assert_eq!(segment_index(0), None);
        assert_eq!(segment_index(25), None);
    }

    #[test]
    fn rings_are_ordered() {
        assert!(BULL_INNER_RADIUS < BULL_OUTER_RADIUS);
        assert!(BULL_OUTER_RADIUS < TREBLE_INNER_RADIUS);
        assert!(TREBLE_INNER_RADIUS < TREBLE_OUTER_RADIUS);
        assert!(TREBLE_OUTER_RADIUS < DOUBLE_INNER_RADIUS);
        assert!(DOUBLE_INNER_RADIUS < DOUBLE_OUTER_RADIUS);
    }

    #[test]
    fn bogeys_have_no_three_dart_path() {
        // 159..170 minus the finishable {160, 161, 164, 167, 170}.
        for s in [159, 162, 163, 165, 166, 168, 169] {
            assert!(is_bogey(s));
        }
        for s in [158, 160, 161, 164, 167, 170] {
            assert!(!is_bogey(s));
        }
    }
}
