//! Dart-to-dart collision and wire deflection.
//!
//! An incoming dart is tested against the darts already on the board in
//! insertion order; per dart the contact zones are tested nearest first
//! (shaft, barrel, flight), each with its own probability draw, and the
//! first successful draw decides the outcome. A dart that survives all of
//! that can still clip a divider wire on the way in.

use rand::Rng;
use serde::Serialize;

use crate::constants::*;
use crate::geometry;
use crate::types::{BoardPoint, DartOnBoard};

/// What part of the struck dart the incoming dart hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionKind {
    /// Tip buried in an existing dart's shaft; the incoming dart bounces
    /// anywhere.
    RobinHood,
    /// Glancing blow off the barrel; continues roughly outward from the
    /// struck dart.
    Barrel,
    /// Clipped the flight; small push off the original line.
    Flight,
}

impl CollisionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CollisionKind::RobinHood => "robin-hood",
            CollisionKind::Barrel => "barrel",
            CollisionKind::Flight => "flight",
        }
    }
}

/// A resolved collision: which dart was struck and where the incoming dart
/// ended up. The deflected position may be off the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CollisionEvent {
    pub kind: CollisionKind,
    /// Index into the board-dart slice of the dart that was struck.
    pub struck_index: usize,
    pub position: BoardPoint,
}

/// Test an incoming dart against the darts on the board.
///
/// Returns the first collision, or `None` when the dart seats cleanly.
/// Draws from `rng` only for zones the landing point is actually inside,
/// so sparse boards consume no randomness.
pub fn check_collision(
    landing: BoardPoint,
    darts: &[DartOnBoard],
    rng: &mut impl Rng,
) -> Option<CollisionEvent> {
    for (struck_index, dart) in darts.iter().enumerate() {
        let distance = landing.distance_to(dart.position);

        if distance < DART_SHAFT_RADIUS * 2.0 && rng.random::<f64>() < ROBIN_HOOD_CHANCE {
            return Some(CollisionEvent {
                kind: CollisionKind::RobinHood,
                struck_index,
                position: robin_hood_deflection(dart.position, rng),
            });
        }
        if distance < DART_BARREL_RADIUS * 3.0 && rng.random::<f64>() < BARREL_CONTACT_CHANCE {
            return Some(CollisionEvent {
                kind: CollisionKind::Barrel,
                struck_index,
                position: barrel_deflection(landing, dart.position, rng),
            });
        }
        if distance < DART_FLIGHT_RADIUS * 2.0 && rng.random::<f64>() < FLIGHT_CLIP_CHANCE {
            return Some(CollisionEvent {
                kind: CollisionKind::Flight,
                struck_index,
                position: flight_deflection(landing, dart.position, rng),
            });
        }
    }
    None
}

/// The dart ricochets off the buried tip in a random direction, well clear
/// of the struck dart.
fn robin_hood_deflection(struck: BoardPoint, rng: &mut impl Rng) -> BoardPoint {
    let angle = rng.random::<f64>() * std::f64::consts::TAU;
    let distance = 30.0 + rng.random::<f64>() * 50.0;
    BoardPoint::new(struck.x + angle.cos() * distance, struck.y + angle.sin() * distance)
}

/// Deflect outward from the struck dart, roughly along the line it came in
/// on, perturbed up to a quarter radian.
fn barrel_deflection(landing: BoardPoint, struck: BoardPoint, rng: &mut impl Rng) -> BoardPoint {
    let mut angle = (landing.y - struck.y).atan2(landing.x - struck.x);
    angle += (rng.random::<f64>() - 0.5) * 0.5;
    let distance = 15.0 + rng.random::<f64>() * 25.0;
    BoardPoint::new(struck.x + angle.cos() * distance, struck.y + angle.sin() * distance)
}

/// A flight clip barely changes course: a short push from where the dart
/// would have landed, nearly along its incoming line.
fn flight_deflection(landing: BoardPoint, struck: BoardPoint, rng: &mut impl Rng) -> BoardPoint {
    let mut angle = (landing.y - struck.y).atan2(landing.x - struck.x);
    angle += (rng.random::<f64>() - 0.5) * 0.3;
    let distance = 10.0 + rng.random::<f64>() * 15.0;
    BoardPoint::new(landing.x + angle.cos() * distance, landing.y + angle.sin() * distance)
}

/// A dart seating within a wire's width of a ring or divider can skitter
/// off it. Only on-board points deflect; the result may leave the board.
pub fn check_wire_deflection(position: BoardPoint, rng: &mut impl Rng) -> Option<BoardPoint> {
    if !geometry::classify(position).on_board() {
        return None;
    }
    if geometry::nearest_wire_distance(position) >= WIRE_WIDTH {
        return None;
    }
    if rng.random::<f64>() >= WIRE_DEFLECT_CHANCE {
        return None;
    }

    let radial = position.y.atan2(position.x);
    let side = if rng.random::<f64>() < 0.5 { 1.0 } else { -1.0 };
    let angle = radial + side * 0.3;
    let distance = 15.0 + rng.random::<f64>() * 20.0;
    Some(BoardPoint::new(
        position.x + angle.cos() * distance,
        position.y + angle.sin() * distance,
    ))
}

/// Risk (0..=100) that aiming at `point` disturbs a dart already on the
/// board: banded by distance to the nearest dart.
pub fn collision_risk(point: BoardPoint, darts: &[DartOnBoard]) -> i32 {
    let mut risk = 0;
    for dart in darts {
        let d = point.distance_to(dart.position);
        let band = if d < 10.0 {
            90
        } else if d < 20.0 {
            70
        } else if d < 30.0 {
            50
        } else if d < 40.0 {
            30
        } else if d < 50.0 {
            10
        } else {
            0
        };
        risk = risk.max(band);
    }
    risk
}

/// Look for a nearby aim point with strictly lower collision risk.
///
/// Only engages when the current risk is at least 30; scans three radii by
/// eight compass directions and keeps the best on-board candidate. `None`
/// when nothing beats the current spot.
pub fn safe_alternative(point: BoardPoint, darts: &[DartOnBoard]) -> Option<BoardPoint> {
    let current = collision_risk(point, darts);
    if current < 30 {
        return None;
    }

    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
    let angles = [
        0.0,
        FRAC_PI_4,
        FRAC_PI_2,
        3.0 * FRAC_PI_4,
        PI,
        -3.0 * FRAC_PI_4,
        -FRAC_PI_2,
        -FRAC_PI_4,
    ];

    let mut best = None;
    let mut lowest = current;
    for distance in [15.0, 25.0, 35.0] {
        for angle in angles {
            let candidate = BoardPoint::new(
                point.x + angle.cos() * distance,
                point.y + angle.sin() * distance,
            );
            if !geometry::classify(candidate).on_board() {
                continue;
            }
            let risk = collision_risk(candidate, darts);
            if risk < lowest {
                lowest = risk;
                best = Some(candidate);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Hit;
    use rand::RngCore;

    /// Every draw comes out near 1.0: probability checks always fail.
    struct NeverRng;
    impl RngCore for NeverRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }
        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0xff);
        }
    }

    /// Every draw comes out 0.0: probability checks always pass, angles and
    /// magnitudes take their minimum values.
    struct AlwaysRng;
    impl RngCore for AlwaysRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
    }

    /// Replays a fixed word sequence.
    struct SeqRng {
        words: Vec<u64>,
        at: usize,
    }
    impl SeqRng {
        fn new(words: Vec<u64>) -> Self {
            SeqRng { words, at: 0 }
        }
    }
    impl RngCore for SeqRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }
        fn next_u64(&mut self) -> u64 {
            let w = self.words[self.at % self.words.len()];
            self.at += 1;
            w
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
    }

    fn dart_at(x: f64, y: f64) -> DartOnBoard {
        let position = BoardPoint::new(x, y);
        DartOnBoard { position, hit: geometry::classify(position) }
    }

    #[test]
    fn clean_board_never_collides() {
        let mut rng = AlwaysRng;
        assert_eq!(check_collision(BoardPoint::new(0.0, -200.0), &[], &mut rng), None);
    }

    #[test]
    fn forced_draws_never_collide_when_out_of_range() {
        let darts = [dart_at(100.0, 0.0)];
        let mut rng = AlwaysRng;
        // 25 units away: outside shaft, barrel, and flight zones.
        assert_eq!(check_collision(BoardPoint::new(125.0, 0.0), &darts, &mut rng), None);
    }

    #[test]
    fn unlucky_draws_pass_through_a_crowded_board() {
        let darts = [dart_at(100.0, 0.0), dart_at(101.0, 0.0), dart_at(100.0, 1.0)];
        let mut rng = NeverRng;
        assert_eq!(check_collision(BoardPoint::new(100.0, 0.5), &darts, &mut rng), None);
    }

    #[test]
    fn robin_hood_bounces_off_the_first_dart_in_insertion_order() {
        // Both darts are within shaft range; the earlier one must be struck
        // even though the later one is closer.
        let darts = [dart_at(100.0, 2.0), dart_at(100.0, 0.1)];
        let landing = BoardPoint::new(100.0, 0.0);
        let mut rng = AlwaysRng;
        let event = check_collision(landing, &darts, &mut rng).unwrap();
        assert_eq!(event.kind, CollisionKind::RobinHood);
        assert_eq!(event.struck_index, 0);
        let bounce = event.position.distance_to(darts[0].position);
        assert!((30.0..=80.0).contains(&bounce), "bounce distance {bounce}");
    }

    #[test]
    fn failed_shaft_draw_falls_through_to_barrel() {
        let darts = [dart_at(100.0, 0.0)];
        let landing = BoardPoint::new(102.0, 0.0);
        // First word fails the robin-hood draw, second passes the barrel
        // draw, the rest zero the angle perturbation and magnitude.
        let mut rng = SeqRng::new(vec![u64::MAX, 0, 0, 0]);
        let event = check_collision(landing, &darts, &mut rng).unwrap();
        assert_eq!(event.kind, CollisionKind::Barrel);
        let push = event.position.distance_to(darts[0].position);
        assert!((15.0..=40.0).contains(&push), "barrel push {push}");
    }

    #[test]
    fn flight_clip_pushes_from_the_landing_point() {
        let darts = [dart_at(100.0, 0.0)];
        let landing = BoardPoint::new(118.0, 0.0);
        // Outside shaft and barrel zones, inside the flight zone.
        let mut rng = AlwaysRng;
        let event = check_collision(landing, &darts, &mut rng).unwrap();
        assert_eq!(event.kind, CollisionKind::Flight);
        let push = event.position.distance_to(landing);
        assert!((10.0..=25.0).contains(&push), "flight push {push}");
    }

    #[test]
    fn degenerate_overlap_still_deflects() {
        let darts = [dart_at(50.0, 50.0)];
        let landing = BoardPoint::new(50.0, 50.0);
        let mut rng = SeqRng::new(vec![u64::MAX, 0, 0, 0]);
        let event = check_collision(landing, &darts, &mut rng).unwrap();
        // atan2(0, 0) is 0: the push direction defaults to +x.
        assert_eq!(event.kind, CollisionKind::Barrel);
        assert!(event.position.x > landing.x);
    }

    #[test]
    fn wire_deflection_only_near_wires() {
        let mut rng = AlwaysRng;
        // Center of the treble band: 10 units from the nearest ring wire.
        assert_eq!(check_wire_deflection(BoardPoint::new(0.0, -200.0), &mut rng), None);
        // Just inside the outer double wire.
        let seated = BoardPoint::new(0.0, -339.5);
        let deflected = check_wire_deflection(seated, &mut rng).unwrap();
        let push = deflected.distance_to(seated);
        assert!((15.0..=35.0).contains(&push), "wire push {push}");
    }

    #[test]
    fn wire_deflection_ignores_missed_darts() {
        let mut rng = AlwaysRng;
        assert_eq!(check_wire_deflection(BoardPoint::new(0.0, -341.0), &mut rng), None);
    }

    #[test]
    fn risk_bands_by_distance() {
        let target = BoardPoint::new(0.0, -200.0);
        for (off, expected) in
            [(5.0, 90), (15.0, 70), (25.0, 50), (35.0, 30), (45.0, 10), (60.0, 0)]
        {
            let darts = [dart_at(off, -200.0)];
            assert_eq!(collision_risk(target, &darts), expected, "offset {off}");
        }
    }

    #[test]
    fn risk_takes_the_worst_dart() {
        let target = BoardPoint::new(0.0, -200.0);
        let darts = [dart_at(45.0, -200.0), dart_at(5.0, -200.0)];
        assert_eq!(collision_risk(target, &darts), 90);
    }

    #[test]
    fn low_risk_keeps_the_original_target() {
        let darts = [dart_at(45.0, -200.0)];
        assert_eq!(safe_alternative(BoardPoint::new(0.0, -200.0), &darts), None);
    }

    #[test]
    fn crowded_target_moves_somewhere_safer() {
        let target = BoardPoint::new(0.0, -200.0);
        let darts = [dart_at(0.0, -200.0)];
        let alt = safe_alternative(target, &darts).unwrap();
        assert!(collision_risk(alt, &darts) < collision_risk(target, &darts));
        assert!(geometry::classify(alt).on_board());
    }

    #[test]
    fn alternatives_never_leave_the_board() {
        // A dart sitting on the target right at the board edge: every
        // surviving candidate must still be on the board.
        let target = BoardPoint::new(0.0, -338.0);
        let darts = [dart_at(0.0, -338.0)];
        if let Some(alt) = safe_alternative(target, &darts) {
            assert!(geometry::classify(alt).on_board());
            assert!(collision_risk(alt, &darts) < 90);
        }
    }

    #[test]
    fn dart_on_board_keeps_its_hit() {
        let d = dart_at(0.0, -200.0);
        assert_eq!(d.hit, Hit::new(20, crate::types::Ring::Treble));
    }
}
