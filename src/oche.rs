//! Oche stance model: standing off-center lengthens the throw and skews it.
//!
//! The offset is lateral, in board units, positive to the player's right.
//! Standing right of center pushes darts left (the dominant eye lines up
//! across the body) and slightly magnifies every error.

use crate::constants::*;
use crate::types::BoardPoint;

/// Multipliers and biases derived from the current stance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StanceAdjustments {
    /// Throwing distance relative to a centered stance (>= 1).
    pub power_multiplier: f64,
    /// Scales the throw's deviation from the board center.
    pub error_multiplier: f64,
    /// Flat horizontal push opposite the offset.
    pub horizontal_bias: f64,
    /// Horizontal shift from the stance angle's tangent.
    pub angle_shift: f64,
}

/// Where the player stands on the throwing line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OcheStance {
    offset: f64,
}

impl OcheStance {
    /// Centered stance: `adjust` is the identity.
    pub fn new() -> Self {
        OcheStance { offset: 0.0 }
    }

    /// Move along the line. Clamped to the oche's physical width.
    pub fn set_offset(&mut self, offset: f64) {
        let half = OCHE_WIDTH / 2.0;
        self.offset = offset.clamp(-half, half);
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Offset scaled to [-1, 1].
    pub fn normalized(&self) -> f64 {
        self.offset / (OCHE_WIDTH / 2.0)
    }

    /// Actual dart flight distance from this stance.
    pub fn throwing_distance(&self) -> f64 {
        (OCHE_BASE_DISTANCE * OCHE_BASE_DISTANCE + self.offset * self.offset).sqrt()
    }

    /// Horizontal angle to the board center. Zero when centered, positive
    /// when standing left (throwing rightward).
    pub fn throwing_angle(&self) -> f64 {
        (-self.offset).atan2(OCHE_BASE_DISTANCE)
    }

    pub fn adjustments(&self) -> StanceAdjustments {
        StanceAdjustments {
            power_multiplier: self.throwing_distance() / OCHE_BASE_DISTANCE,
            error_multiplier: 1.0 + self.normalized().abs() * OCHE_ANGLE_PENALTY * 10.0,
            horizontal_bias: self.offset * OCHE_BIAS_PER_UNIT,
            angle_shift: self.throwing_angle().tan() * OCHE_ANGLE_SHIFT_SCALE,
        }
    }

    /// Apply the stance to a raw landing point: deviation from center is
    /// magnified, and the two horizontal skews are added.
    pub fn adjust(&self, point: BoardPoint) -> BoardPoint {
        let adj = self.adjustments();
        BoardPoint::new(
            point.x * adj.error_multiplier + adj.horizontal_bias + adj.angle_shift,
            point.y * adj.error_multiplier,
        )
    }
}

impl Default for OcheStance {
    fn default() -> Self {
        OcheStance::new()
    }
}
