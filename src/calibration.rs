//! Throw calibration: a fixed-size practice session aimed at one target,
//! reduced to a [`ThrowBaseline`] and a readable tendency report.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::swipe::SwipeMetrics;
use crate::types::{BoardPoint, ThrowBaseline};

/// A systematic pattern detected in a calibration session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tendency {
    TightGrouping,
    WideGrouping,
    DriftsLeft,
    DriftsRight,
    ThrowsHigh,
    ThrowsLow,
    SteadyPace,
    ErraticPace,
    CleanRelease,
    CrookedRelease,
}

impl Tendency {
    /// Whether this pattern helps (true) or hurts (false).
    pub fn is_strength(self) -> bool {
        matches!(self, Tendency::TightGrouping | Tendency::SteadyPace | Tendency::CleanRelease)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tendency::TightGrouping => "tight grouping",
            Tendency::WideGrouping => "wide grouping",
            Tendency::DriftsLeft => "drifts left",
            Tendency::DriftsRight => "drifts right",
            Tendency::ThrowsHigh => "throws high",
            Tendency::ThrowsLow => "throws low",
            Tendency::SteadyPace => "steady pace",
            Tendency::ErraticPace => "erratic pace",
            Tendency::CleanRelease => "clean release",
            Tendency::CrookedRelease => "crooked release",
        }
    }
}

/// Full output of a calibration session: the baseline the physics model
/// consumes plus gesture aggregates and detected tendencies.
#[derive(Debug, Clone, Serialize)]
pub struct CalibrationReport {
    pub baseline: ThrowBaseline,
    pub throws: usize,
    pub avg_speed: f64,
    pub avg_length: f64,
    pub avg_straightness: f64,
    /// Standard deviation of swipe speed across the session.
    pub speed_spread: f64,
    pub tendencies: Vec<Tendency>,
}

/// An in-progress calibration session. Record throws until
/// [`CalibrationSession::complete`], then take the baseline or report.
/// An under-filled (even empty) session still yields a usable baseline.
#[derive(Debug, Clone)]
pub struct CalibrationSession {
    target: BoardPoint,
    landings: Vec<BoardPoint>,
    swipes: Vec<SwipeMetrics>,
}

impl CalibrationSession {
    /// Session aimed at an arbitrary point.
    pub fn new(target: BoardPoint) -> Self {
        CalibrationSession { target, landings: Vec::new(), swipes: Vec::new() }
    }

    /// Standard session: twenty throws at the bull.
    pub fn at_center() -> Self {
        CalibrationSession::new(BoardPoint::CENTER)
    }

    pub fn target(&self) -> BoardPoint {
        self.target
    }

    /// Record a throw with its gesture.
    pub fn record(&mut self, landing: BoardPoint, swipe: SwipeMetrics) {
        self.landings.push(landing);
        self.swipes.push(swipe);
    }

    /// Record a throw with no gesture attached (automated throws).
    pub fn record_landing(&mut self, landing: BoardPoint) {
        self.landings.push(landing);
    }

    pub fn throws(&self) -> usize {
        self.landings.len()
    }

    pub fn complete(&self) -> bool {
        self.landings.len() >= CALIBRATION_THROWS
    }

    pub fn remaining(&self) -> usize {
        CALIBRATION_THROWS.saturating_sub(self.landings.len())
    }

    /// Reduce the recorded landings to a baseline. With nothing recorded,
    /// returns the neutral profile centered on the session target.
    pub fn baseline(&self) -> ThrowBaseline {
        if self.landings.is_empty() {
            return ThrowBaseline { centroid: self.target, ..ThrowBaseline::neutral() };
        }

        let n = self.landings.len() as f64;
        let centroid = BoardPoint::new(
            self.landings.iter().map(|p| p.x).sum::<f64>() / n,
            self.landings.iter().map(|p| p.y).sum::<f64>() / n,
        );

        // RMS distance from the centroid, so outliers count more than a
        // plain mean would give them.
        let mean_sq =
            self.landings.iter().map(|p| p.distance_to(centroid).powi(2)).sum::<f64>() / n;
        let grouping_radius = mean_sq.sqrt();

        let consistency =
            (100.0 - grouping_radius / CONSISTENCY_FULL_SCALE * 100.0).max(0.0).round() as i32;

        ThrowBaseline {
            centroid,
            grouping_radius,
            natural_drift: centroid.x - self.target.x,
            vertical_bias: centroid.y - self.target.y,
            consistency,
        }
    }

    /// Baseline plus gesture aggregates and tendency detection.
    pub fn report(&self) -> CalibrationReport {
        let baseline = self.baseline();

        let (avg_speed, avg_length, avg_straightness, speed_spread) = if self.swipes.is_empty() {
            // Assumed mid-range gesture profile when no swipes were captured.
            (1500.0, 250.0, 15.0, 300.0)
        } else {
            let n = self.swipes.len() as f64;
            let avg_speed = self.swipes.iter().map(|s| s.speed).sum::<f64>() / n;
            let avg_length = self.swipes.iter().map(|s| s.path_length).sum::<f64>() / n;
            let avg_straightness = self.swipes.iter().map(|s| s.straightness).sum::<f64>() / n;
            let spread = (self.swipes.iter().map(|s| (s.speed - avg_speed).powi(2)).sum::<f64>()
                / n)
                .sqrt();
            (avg_speed, avg_length, avg_straightness, spread)
        };

        let mut tendencies = Vec::new();
        if baseline.grouping_radius < 30.0 {
            tendencies.push(Tendency::TightGrouping);
        } else if baseline.grouping_radius > 80.0 {
            tendencies.push(Tendency::WideGrouping);
        }
        if baseline.natural_drift > 30.0 {
            tendencies.push(Tendency::DriftsRight);
        } else if baseline.natural_drift < -30.0 {
            tendencies.push(Tendency::DriftsLeft);
        }
        // +y is down: a positive bias means the darts land low.
        if baseline.vertical_bias > 30.0 {
            tendencies.push(Tendency::ThrowsLow);
        } else if baseline.vertical_bias < -30.0 {
            tendencies.push(Tendency::ThrowsHigh);
        }
        if speed_spread < 200.0 {
            tendencies.push(Tendency::SteadyPace);
        } else if speed_spread > 400.0 {
            tendencies.push(Tendency::ErraticPace);
        }
        if avg_straightness < 10.0 {
            tendencies.push(Tendency::CleanRelease);
        } else if avg_straightness > 25.0 {
            tendencies.push(Tendency::CrookedRelease);
        }

        CalibrationReport {
            baseline,
            throws: self.landings.len(),
            avg_speed,
            avg_length,
            avg_straightness,
            speed_spread,
            tendencies,
        }
    }
}
