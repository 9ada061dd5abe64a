//! Core data types shared across the engine.

use serde::{Deserialize, Serialize};

use crate::checkouts::CheckoutTable;
use crate::constants::*;

/// A Cartesian point relative to the board center, in board units.
/// +x is right, +y is down (screen convention), matching `atan2` angles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoardPoint {
    pub x: f64,
    pub y: f64,
}

impl BoardPoint {
    /// The board center (and the inner bull).
    pub const CENTER: BoardPoint = BoardPoint { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        BoardPoint { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance_to(&self, other: BoardPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Distance from the board center.
    #[inline]
    pub fn radius(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// The scoring band a point falls in.
///
/// `InnerSingle` is the band between the bull and the treble ring,
/// `OuterSingle` between treble and double. Aimed single shots (`S20`)
/// target the outer band, which is the wider of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ring {
    Miss,
    InnerSingle,
    OuterSingle,
    Treble,
    Double,
    SingleBull,
    DoubleBull,
}

impl Ring {
    /// Score multiplier for this band. Bulls carry their value in the
    /// segment number, so their multiplier is 1.
    pub fn multiplier(self) -> i32 {
        match self {
            Ring::Miss => 0,
            Ring::Treble => 3,
            Ring::Double => 2,
            _ => 1,
        }
    }

    /// Radial width of the band, used for coarse hit-probability estimates.
    /// Single targets use the outer band width.
    pub fn width(self) -> f64 {
        match self {
            Ring::DoubleBull => BULL_INNER_RADIUS * 2.0,
            Ring::SingleBull => (BULL_OUTER_RADIUS - BULL_INNER_RADIUS) * 2.0,
            Ring::Treble => TREBLE_OUTER_RADIUS - TREBLE_INNER_RADIUS,
            Ring::Double => DOUBLE_OUTER_RADIUS - DOUBLE_INNER_RADIUS,
            Ring::InnerSingle | Ring::OuterSingle => DOUBLE_INNER_RADIUS - TREBLE_OUTER_RADIUS,
            Ring::Miss => 50.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Ring::Miss => "miss",
            Ring::InnerSingle => "inner-single",
            Ring::OuterSingle => "outer-single",
            Ring::Treble => "treble",
            Ring::Double => "double",
            Ring::SingleBull => "single-bull",
            Ring::DoubleBull => "double-bull",
        }
    }

    /// Whether a dart in this band finishes a double-out game.
    pub fn finishes_leg(self) -> bool {
        matches!(self, Ring::Double | Ring::DoubleBull)
    }
}

/// A classified landing: which segment and band, and the points scored.
///
/// Invariant: `score == segment * multiplier`, with the bulls represented as
/// segment 25 / 50 at multiplier 1. A miss is segment 0, multiplier 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub segment: i32,
    pub ring: Ring,
    pub multiplier: i32,
    pub score: i32,
}

impl Hit {
    /// Build a hit from segment and ring, deriving multiplier and score.
    pub fn new(segment: i32, ring: Ring) -> Self {
        let (segment, multiplier) = match ring {
            Ring::Miss => (0, 0),
            Ring::DoubleBull => (50, 1),
            Ring::SingleBull => (25, 1),
            _ => {
                debug_assert!((1..=20).contains(&segment));
                (segment, ring.multiplier())
            }
        };
        Hit { segment, ring, multiplier, score: segment * multiplier }
    }

    pub const MISS: Hit = Hit { segment: 0, ring: Ring::Miss, multiplier: 0, score: 0 };

    /// Whether the dart landed in a scoring band.
    pub fn on_board(&self) -> bool {
        self.ring != Ring::Miss
    }
}

/// An aim target: a segment and the band to hit it in.
///
/// Displayed and parsed in the standard shorthand: `T20`, `D16`, `S10`,
/// `25` (outer bull), `Bull` (inner bull).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub segment: i32,
    pub ring: Ring,
}

impl Target {
    pub fn new(segment: i32, ring: Ring) -> Self {
        Target { segment, ring }
    }

    pub const BULL: Target = Target { segment: 50, ring: Ring::DoubleBull };
    pub const OUTER_BULL: Target = Target { segment: 25, ring: Ring::SingleBull };

    pub fn treble(segment: i32) -> Self {
        Target { segment, ring: Ring::Treble }
    }

    pub fn double(segment: i32) -> Self {
        Target { segment, ring: Ring::Double }
    }

    pub fn single(segment: i32) -> Self {
        Target { segment, ring: Ring::OuterSingle }
    }

    /// Points scored by hitting this target exactly.
    pub fn score(self) -> i32 {
        match self.ring {
            Ring::DoubleBull => 50,
            Ring::SingleBull => 25,
            ring => self.segment * ring.multiplier(),
        }
    }

    /// Standard shorthand code for this target.
    pub fn code(self) -> String {
        match self.ring {
            Ring::DoubleBull => "Bull".to_string(),
            Ring::SingleBull => "25".to_string(),
            Ring::Treble => format!("T{}", self.segment),
            Ring::Double => format!("D{}", self.segment),
            _ => format!("S{}", self.segment),
        }
    }

    /// Parse a shorthand code. Returns `None` for malformed codes or
    /// segments outside 1..=20.
    pub fn parse(code: &str) -> Option<Target> {
        match code {
            "Bull" | "BULL" | "bull" | "D25" => return Some(Target::BULL),
            "25" | "S25" => return Some(Target::OUTER_BULL),
            _ => {}
        }
        let (ring, digits) = if let Some(rest) = code.strip_prefix('T') {
            (Ring::Treble, rest)
        } else if let Some(rest) = code.strip_prefix('D') {
            (Ring::Double, rest)
        } else if let Some(rest) = code.strip_prefix('S') {
            (Ring::OuterSingle, rest)
        } else {
            return None;
        };
        let segment: i32 = digits.parse().ok()?;
        if !(1..=20).contains(&segment) {
            return None;
        }
        Some(Target { segment, ring })
    }
}

/// A dart resting on the board for the remainder of the turn.
/// Insertion order is load-bearing: collision checks walk darts oldest
/// first, and the first collision wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DartOnBoard {
    pub position: BoardPoint,
    pub hit: Hit,
}

/// A player's measured throwing profile, built from a calibration session.
///
/// `natural_drift` and `vertical_bias` are the centroid's offset from the
/// aim point; the physics model subtracts them so a calibrated player's
/// average throw lands on target. Immutable once built; recalibration
/// replaces the whole value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrowBaseline {
    pub centroid: BoardPoint,
    pub grouping_radius: f64,
    pub natural_drift: f64,
    pub vertical_bias: f64,
    /// 0 (wild) to 100 (dead consistent).
    pub consistency: i32,
}

impl ThrowBaseline {
    /// Profile assumed before any calibration: centered, middling spread.
    pub fn neutral() -> Self {
        ThrowBaseline {
            centroid: BoardPoint::CENTER,
            grouping_radius: 50.0,
            natural_drift: 0.0,
            vertical_bias: 0.0,
            consistency: 50,
        }
    }
}

impl Default for ThrowBaseline {
    fn default() -> Self {
        ThrowBaseline::neutral()
    }
}

/// Throw difficulty preset, controlling how forgiving the physics model is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Pro,
}

/// Physics tolerances for one difficulty preset. Errors are divided by the
/// tolerances, so smaller values punish the same gesture flaw harder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub speed: f64,
    pub release: f64,
    pub straightness: f64,
    /// Half-width of the uniform jitter added to every throw, board units.
    pub random_error: f64,
}

impl Difficulty {
    pub fn tolerances(self) -> Tolerances {
        match self {
            Difficulty::Easy => Tolerances { speed: 0.4, release: 0.5, straightness: 20.0, random_error: 25.0 },
            Difficulty::Medium => Tolerances { speed: 0.25, release: 0.3, straightness: 10.0, random_error: 15.0 },
            Difficulty::Hard => Tolerances { speed: 0.15, release: 0.15, straightness: 5.0, random_error: 8.0 },
            Difficulty::Pro => Tolerances { speed: 0.05, release: 0.05, straightness: 2.0, random_error: 3.0 },
        }
    }

    /// Scale factor applied to base success rates in tips.
    pub fn success_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 1.5,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 0.7,
            Difficulty::Pro => 0.5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Pro => "pro",
        }
    }

    pub fn parse(s: &str) -> Option<Difficulty> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "pro" => Some(Difficulty::Pro),
            _ => None,
        }
    }
}

/// Shared engine context: the checkout table and the constant strategy data
/// built from it. Build once at startup and share (the server wraps it in an
/// `Arc`). All lookups after construction are read-only.
pub struct DartsContext {
    pub checkouts: CheckoutTable,
}

impl DartsContext {
    pub fn new() -> Self {
        DartsContext { checkouts: CheckoutTable::new() }
    }
}

impl Default for DartsContext {
    fn default() -> Self {
        DartsContext::new()
    }
}
