//! Tip formatting: one advisor suggestion rendered at four detail levels.
//!
//! Levels only add fields; the underlying suggestion never changes. Level 1
//! is target and points, 2 adds the reasoning and the full path, 3 adds
//! miss analysis and any wedge play for the score, 4 adds an estimated
//! success rate for the target at the current difficulty.

use serde::Serialize;

use crate::advisor::{wedge_shot, MissScenario, Suggestion};
use crate::checkouts::is_checkout;
use crate::types::{Difficulty, Ring, Target};

/// How much of the suggestion to surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipLevel {
    Basic,
    Intermediate,
    Advanced,
    Pro,
}

impl TipLevel {
    /// Parse the numeric 1..=4 scale. `None` outside it.
    pub fn from_number(level: i32) -> Option<TipLevel> {
        match level {
            1 => Some(TipLevel::Basic),
            2 => Some(TipLevel::Intermediate),
            3 => Some(TipLevel::Advanced),
            4 => Some(TipLevel::Pro),
            _ => None,
        }
    }

    pub fn number(self) -> i32 {
        match self {
            TipLevel::Basic => 1,
            TipLevel::Intermediate => 2,
            TipLevel::Advanced => 3,
            TipLevel::Pro => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TipLevel::Basic => "Basic",
            TipLevel::Intermediate => "Intermediate",
            TipLevel::Advanced => "Advanced",
            TipLevel::Pro => "Pro",
        }
    }
}

/// One step of a rendered checkout path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub target: String,
    pub points: i32,
}

/// A miss scenario rendered for display, flagged good when the leave is a
/// real checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissLine {
    pub direction: &'static str,
    pub description: String,
    pub is_good: bool,
}

/// A wedge play rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WedgeLine {
    pub label: &'static str,
    pub reason: &'static str,
    pub outcomes: Vec<String>,
}

/// The formatted tip. Fields beyond the target are populated per level.
#[derive(Debug, Clone, Serialize)]
pub struct Tip {
    pub level: i32,
    pub level_name: &'static str,
    pub target: String,
    pub target_display: String,
    pub points: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_steps: Option<Vec<PathStep>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wedge: Option<WedgeLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub miss_analysis: Option<Vec<MissLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_rate: Option<i32>,
}

/// Long-form name for a target: `Treble 20`, `Bullseye (50)`.
pub fn target_display(target: Target) -> String {
    match target.ring {
        Ring::DoubleBull => "Bullseye (50)".to_string(),
        Ring::SingleBull => "Outer Bull (25)".to_string(),
        Ring::Treble => format!("Treble {}", target.segment),
        Ring::Double => format!("Double {}", target.segment),
        _ => format!("Single {}", target.segment),
    }
}

/// Base success rate for a ring, before the difficulty multiplier. Rough
/// recreational-player percentages.
fn base_success_rate(ring: Ring) -> f64 {
    match ring {
        Ring::Treble => 15.0,
        Ring::Double => 25.0,
        Ring::InnerSingle => 50.0,
        Ring::OuterSingle => 55.0,
        Ring::DoubleBull => 5.0,
        Ring::SingleBull => 15.0,
        Ring::Miss => 30.0,
    }
}

/// Estimated chance (percent) of hitting the target at a difficulty.
pub fn estimated_success_rate(target: Target, difficulty: Difficulty) -> i32 {
    (base_success_rate(target.ring) * difficulty.success_multiplier()).round() as i32
}

/// Render a suggestion at a detail level. `score` is the remaining score
/// the suggestion was computed for (the wedge table is keyed on it);
/// `difficulty` only affects the level-4 success estimate.
pub fn format_tip(
    suggestion: &Suggestion,
    score: i32,
    level: TipLevel,
    difficulty: Difficulty,
) -> Tip {
    let mut tip = Tip {
        level: level.number(),
        level_name: level.name(),
        target: suggestion.target.code(),
        target_display: target_display(suggestion.target),
        points: suggestion.target.score(),
        reason: None,
        path: None,
        path_steps: None,
        wedge: None,
        miss_analysis: None,
        success_rate: None,
    };

    if level >= TipLevel::Intermediate {
        tip.reason = Some(suggestion.reason.clone());
        if let Some(path) = &suggestion.full_path {
            tip.path = Some(path.join(" -> "));
            tip.path_steps = Some(
                path.iter()
                    .map(|code| PathStep {
                        target: code.clone(),
                        points: Target::parse(code).map_or(0, Target::score),
                    })
                    .collect(),
            );
        }
    }

    if level >= TipLevel::Advanced {
        if let Some(wedge) = wedge_shot(score) {
            tip.wedge = Some(WedgeLine {
                label: wedge.label,
                reason: wedge.reason,
                outcomes: wedge
                    .outcomes
                    .iter()
                    .map(|o| format!("{} -> leaves {} ({})", o.hit, o.leaves, o.result))
                    .collect(),
            });
        }
        if !suggestion.miss_analysis.is_empty() {
            tip.miss_analysis =
                Some(suggestion.miss_analysis.iter().map(miss_line).collect());
        }
    }

    if level >= TipLevel::Pro {
        tip.success_rate = Some(estimated_success_rate(suggestion.target, difficulty));
    }

    tip
}

fn miss_line(scenario: &MissScenario) -> MissLine {
    MissLine {
        direction: scenario.direction,
        description: format!(
            "Miss {}: {} ({}) -> leaves {}",
            scenario.direction, scenario.hit, scenario.score, scenario.leaves
        ),
        is_good: is_checkout(scenario.leaves),
    }
}
