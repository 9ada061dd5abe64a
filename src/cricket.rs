//! Cricket scoring and the cricket shot advisor.
//!
//! Marks accumulate per number (20 down to 15 plus the bull); three close a
//! number, and further marks score points only while the opponent still has
//! it open. The advisor picks a strategy by comparing point totals: ahead
//! means shut down the opponent's scoring, behind means score, tied means
//! weigh the board.

use serde::Serialize;

use crate::constants::{CRICKET_MARKS_TO_CLOSE, CRICKET_NUMBERS};
use crate::types::{Hit, Target};

/// Index of a cricket number in priority order, or `None` for non-cricket
/// segments. The bull is 25.
fn number_index(number: i32) -> Option<usize> {
    CRICKET_NUMBERS.iter().position(|&n| n == number)
}

/// Points per scoring mark on a number.
fn point_value(number: i32) -> i32 {
    number
}

/// Aim point for a cricket number: the treble for 15..=20, the inner bull
/// for 25 (two marks per dart beats one).
pub fn target_for(number: i32) -> Target {
    if number == 25 {
        Target::BULL
    } else {
        Target::treble(number)
    }
}

/// One player's side of a cricket game: marks per number plus points.
/// Stored marks cap at three; overflow converts to points at apply time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CricketState {
    marks: [i32; CRICKET_NUMBERS.len()],
    pub points: i32,
}

impl CricketState {
    pub fn new() -> Self {
        CricketState::default()
    }

    /// Test/setup helper: a state with the given marks (in the priority
    /// order 20 19 18 17 16 15 25) and points. Marks are capped at three.
    pub fn with_marks(marks: [i32; CRICKET_NUMBERS.len()], points: i32) -> Self {
        let mut capped = marks;
        for m in &mut capped {
            *m = (*m).clamp(0, CRICKET_MARKS_TO_CLOSE);
        }
        CricketState { marks: capped, points }
    }

    /// Marks on a number (0..=3). Non-cricket numbers report zero.
    pub fn marks(&self, number: i32) -> i32 {
        number_index(number).map_or(0, |i| self.marks[i])
    }

    pub fn is_closed(&self, number: i32) -> bool {
        self.marks(number) >= CRICKET_MARKS_TO_CLOSE
    }

    pub fn all_closed(&self) -> bool {
        self.marks.iter().all(|&m| m >= CRICKET_MARKS_TO_CLOSE)
    }

    /// Apply a hit. Marks past the third score points against an opponent
    /// who still has the number open. Returns the marks and points awarded.
    pub fn apply(&mut self, hit: Hit, opponent: &CricketState) -> MarkResult {
        let analysis = analyze_hit(hit);
        let Some(number) = analysis.number else {
            return MarkResult { number: None, marks: 0, points: 0 };
        };
        let index = number_index(number).unwrap();

        let before = self.marks[index];
        let after = before + analysis.marks;
        self.marks[index] = after.min(CRICKET_MARKS_TO_CLOSE);

        let overflow = (after - CRICKET_MARKS_TO_CLOSE).max(0);
        let points = if overflow > 0 && !opponent.is_closed(number) {
            overflow * point_value(number)
        } else {
            0
        };
        self.points += points;

        MarkResult { number: Some(number), marks: analysis.marks, points }
    }
}

/// Marks and points awarded by one dart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkResult {
    pub number: Option<i32>,
    pub marks: i32,
    pub points: i32,
}

/// What a hit means in cricket terms, independent of game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkAnalysis {
    pub is_cricket: bool,
    pub number: Option<i32>,
    pub marks: i32,
    pub description: String,
}

/// Classify a hit for cricket: 15..=20 score their multiplier in marks, the
/// outer bull one mark, the inner bull two, everything else nothing.
pub fn analyze_hit(hit: Hit) -> MarkAnalysis {
    if (15..=20).contains(&hit.segment) {
        let marks = hit.multiplier;
        let plural = if marks > 1 { "s" } else { "" };
        return MarkAnalysis {
            is_cricket: true,
            number: Some(hit.segment),
            marks,
            description: format!("{marks} mark{plural} on {}", hit.segment),
        };
    }
    if hit.segment == 50 {
        return MarkAnalysis {
            is_cricket: true,
            number: Some(25),
            marks: 2,
            description: "Double Bull (2 marks)".to_string(),
        };
    }
    if hit.segment == 25 {
        return MarkAnalysis {
            is_cricket: true,
            number: Some(25),
            marks: 1,
            description: "Single Bull (1 mark)".to_string(),
        };
    }
    MarkAnalysis {
        is_cricket: false,
        number: None,
        marks: 0,
        description: format!("{} - not a cricket number", hit.segment),
    }
}

/// Marks per round, the standard cricket rate stat. Two decimals.
pub fn marks_per_round(total_marks: i32, rounds: i32) -> f64 {
    if rounds == 0 {
        return 0.0;
    }
    (total_marks as f64 / rounds as f64 * 100.0).round() / 100.0
}

/// Win check: everything closed, and not behind on points when there is an
/// opponent.
pub fn check_win(player: &CricketState, opponent: Option<&CricketState>) -> bool {
    if !player.all_closed() {
        return false;
    }
    opponent.is_none_or(|o| player.points >= o.points)
}

/// The posture the advisor takes, chosen by point difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CricketStrategy {
    Solo,
    Defensive,
    Offensive,
    Balanced,
}

impl CricketStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            CricketStrategy::Solo => "solo",
            CricketStrategy::Defensive => "defensive",
            CricketStrategy::Offensive => "offensive",
            CricketStrategy::Balanced => "balanced",
        }
    }
}

/// Why a number was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CricketSuggestionKind {
    /// Closing numbers in priority order.
    Close,
    /// Shut an opponent's scoring number.
    CloseDefensive,
    /// One mark from closing a number the opponent scores on.
    CloseUrgent,
    /// Score on an own open number.
    Score,
    /// Open a number neither side has closed.
    Open,
    /// Finish a number already underway.
    Progress,
    /// Everything closed.
    Complete,
}

impl CricketSuggestionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CricketSuggestionKind::Close => "close",
            CricketSuggestionKind::CloseDefensive => "close_defensive",
            CricketSuggestionKind::CloseUrgent => "close_urgent",
            CricketSuggestionKind::Score => "score",
            CricketSuggestionKind::Open => "open",
            CricketSuggestionKind::Progress => "progress",
            CricketSuggestionKind::Complete => "complete",
        }
    }
}

/// The cricket advisor's verdict.
#[derive(Debug, Clone, Serialize)]
pub struct CricketSuggestion {
    pub target: Target,
    pub kind: CricketSuggestionKind,
    pub strategy: CricketStrategy,
    pub number: Option<i32>,
    pub marks_needed: i32,
    pub reason: String,
}

fn number_name(number: i32) -> String {
    if number == 25 {
        "Bulls".to_string()
    } else {
        number.to_string()
    }
}

/// Which posture applies: solo with no opponent, otherwise by point lead.
pub fn strategy_for(player: &CricketState, opponent: Option<&CricketState>) -> CricketStrategy {
    let Some(opponent) = opponent else {
        return CricketStrategy::Solo;
    };
    match player.points - opponent.points {
        d if d > 0 => CricketStrategy::Defensive,
        d if d < 0 => CricketStrategy::Offensive,
        _ => CricketStrategy::Balanced,
    }
}

/// The cricket advisor entry point. Always returns a suggestion; a fully
/// closed board falls through to a `Complete` call on the bull.
pub fn suggest_cricket(
    player: &CricketState,
    opponent: Option<&CricketState>,
    darts_remaining: i32,
) -> CricketSuggestion {
    match strategy_for(player, opponent) {
        CricketStrategy::Solo => suggest_solo(player, CricketStrategy::Solo),
        CricketStrategy::Defensive => {
            suggest_defensive(player, opponent.unwrap(), darts_remaining)
        }
        CricketStrategy::Offensive => suggest_offensive(player, opponent.unwrap()),
        CricketStrategy::Balanced => suggest_balanced(player, opponent.unwrap()),
    }
}

/// No opponent: close in priority order, highest value first.
fn suggest_solo(player: &CricketState, strategy: CricketStrategy) -> CricketSuggestion {
    for &number in &CRICKET_NUMBERS {
        let marks = player.marks(number);
        if marks < CRICKET_MARKS_TO_CLOSE {
            let needed = CRICKET_MARKS_TO_CLOSE - marks;
            let plural = if needed > 1 { "s" } else { "" };
            return CricketSuggestion {
                target: target_for(number),
                kind: CricketSuggestionKind::Close,
                strategy,
                number: Some(number),
                marks_needed: needed,
                reason: format!("Close {} (need {needed} mark{plural})", number_name(number)),
            };
        }
    }
    CricketSuggestion {
        target: target_for(25),
        kind: CricketSuggestionKind::Complete,
        strategy,
        number: None,
        marks_needed: 0,
        reason: "All numbers closed! Game complete.".to_string(),
    }
}

/// Ahead on points: take away the opponent's highest-value scoring number.
fn suggest_defensive(
    player: &CricketState,
    opponent: &CricketState,
    darts_remaining: i32,
) -> CricketSuggestion {
    // Numbers open for them to score on: they closed it, we have not.
    let threat = CRICKET_NUMBERS
        .iter()
        .copied()
        .filter(|&n| opponent.is_closed(n) && !player.is_closed(n))
        .max_by_key(|&n| point_value(n));

    if let Some(number) = threat {
        let needed = CRICKET_MARKS_TO_CLOSE - player.marks(number);
        let name = number_name(number);
        let reason = if needed <= darts_remaining {
            format!("Close their {name} to stop their scoring")
        } else {
            format!("Work on closing {name} (they're scoring {}/mark)", point_value(number))
        };
        return CricketSuggestion {
            target: target_for(number),
            kind: CricketSuggestionKind::CloseDefensive,
            strategy: CricketStrategy::Defensive,
            number: Some(number),
            marks_needed: needed,
            reason,
        };
    }

    suggest_progress(player, CricketStrategy::Defensive)
}

/// Behind on points: score on the highest-value number open for us alone.
fn suggest_offensive(player: &CricketState, opponent: &CricketState) -> CricketSuggestion {
    let points_needed = opponent.points - player.points;

    let scoring = CRICKET_NUMBERS
        .iter()
        .copied()
        .filter(|&n| player.is_closed(n) && !opponent.is_closed(n))
        .max_by_key(|&n| point_value(n));

    if let Some(number) = scoring {
        let value = point_value(number);
        let marks_to_tie = (points_needed + value - 1) / value;
        return CricketSuggestion {
            target: target_for(number),
            kind: CricketSuggestionKind::Score,
            strategy: CricketStrategy::Offensive,
            number: Some(number),
            marks_needed: 0,
            reason: format!(
                "Score on {} ({value}/mark, need ~{marks_to_tie} to tie)",
                number_name(number)
            ),
        };
    }

    suggest_opening(player, opponent)
}

/// Tied: close any own two-mark number the opponent still scores on, else
/// take the best weighted opportunity on the open board.
fn suggest_balanced(player: &CricketState, opponent: &CricketState) -> CricketSuggestion {
    for &number in &CRICKET_NUMBERS {
        if player.marks(number) == 2 && opponent.is_closed(number) {
            return CricketSuggestion {
                target: target_for(number),
                kind: CricketSuggestionKind::CloseUrgent,
                strategy: CricketStrategy::Balanced,
                number: Some(number),
                marks_needed: 1,
                reason: format!(
                    "Close {} - you're at 2 marks and they can score",
                    number_name(number)
                ),
            };
        }
    }

    // Weighted opportunity: value, progress toward closing, urgency when
    // the opponent can score.
    let best = CRICKET_NUMBERS
        .iter()
        .copied()
        .filter(|&n| !player.is_closed(n))
        .max_by_key(|&n| {
            let mut weight = point_value(n) + player.marks(n) * 10;
            if opponent.is_closed(n) {
                weight += 20;
            }
            weight
        });

    if let Some(number) = best {
        let marks = player.marks(number);
        return CricketSuggestion {
            target: target_for(number),
            kind: CricketSuggestionKind::Progress,
            strategy: CricketStrategy::Balanced,
            number: Some(number),
            marks_needed: CRICKET_MARKS_TO_CLOSE - marks,
            reason: format!(
                "Work on {} ({marks}/{CRICKET_MARKS_TO_CLOSE} marks)",
                number_name(number)
            ),
        };
    }

    suggest_solo(player, CricketStrategy::Balanced)
}

/// Nothing to score on yet: open the highest number neither side has closed.
fn suggest_opening(player: &CricketState, opponent: &CricketState) -> CricketSuggestion {
    for &number in &CRICKET_NUMBERS {
        if !player.is_closed(number) && !opponent.is_closed(number) {
            return CricketSuggestion {
                target: target_for(number),
                kind: CricketSuggestionKind::Open,
                strategy: CricketStrategy::Offensive,
                number: Some(number),
                marks_needed: CRICKET_MARKS_TO_CLOSE - player.marks(number),
                reason: format!("Open {} for scoring potential", number_name(number)),
            };
        }
    }
    suggest_solo(player, CricketStrategy::Offensive)
}

/// Nothing to defend: finish the own number closest to closing.
fn suggest_progress(player: &CricketState, strategy: CricketStrategy) -> CricketSuggestion {
    let best = CRICKET_NUMBERS
        .iter()
        .copied()
        .filter(|&n| !player.is_closed(n))
        .max_by_key(|&n| player.marks(n));

    if let Some(number) = best {
        let marks = player.marks(number);
        return CricketSuggestion {
            target: target_for(number),
            kind: CricketSuggestionKind::Close,
            strategy,
            number: Some(number),
            marks_needed: CRICKET_MARKS_TO_CLOSE - marks,
            reason: format!(
                "Finish closing {} ({marks}/{CRICKET_MARKS_TO_CLOSE})",
                number_name(number)
            ),
        };
    }
    suggest_solo(player, strategy)
}

/// Where a player stands on a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberStatus {
    pub number: i32,
    pub marks: i32,
}

/// Closed/open breakdown of one side of the board.
#[derive(Debug, Clone, Serialize)]
pub struct CricketStatus {
    pub closed: Vec<i32>,
    pub open: Vec<NumberStatus>,
    pub points: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_diff: Option<i32>,
}

pub fn status(player: &CricketState, opponent: Option<&CricketState>) -> CricketStatus {
    let mut closed = Vec::new();
    let mut open = Vec::new();
    for &number in &CRICKET_NUMBERS {
        if player.is_closed(number) {
            closed.push(number);
        } else {
            open.push(NumberStatus { number, marks: player.marks(number) });
        }
    }
    CricketStatus {
        closed,
        open,
        points: player.points,
        point_diff: opponent.map(|o| player.points - o.points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Ring;

    fn treble(segment: i32) -> Hit {
        Hit::new(segment, Ring::Treble)
    }

    #[test]
    fn marks_per_hit() {
        assert_eq!(analyze_hit(treble(20)).marks, 3);
        assert_eq!(analyze_hit(Hit::new(15, Ring::OuterSingle)).marks, 1);
        assert_eq!(analyze_hit(Hit::new(15, Ring::Double)).marks, 2);
        assert_eq!(analyze_hit(Hit::new(50, Ring::DoubleBull)).marks, 2);
        assert_eq!(analyze_hit(Hit::new(25, Ring::SingleBull)).marks, 1);
        let off = analyze_hit(Hit::new(14, Ring::Treble));
        assert!(!off.is_cricket);
        assert_eq!(off.marks, 0);
        assert!(!analyze_hit(Hit::MISS).is_cricket);
    }

    #[test]
    fn bull_marks_map_to_25() {
        assert_eq!(analyze_hit(Hit::new(50, Ring::DoubleBull)).number, Some(25));
        assert_eq!(analyze_hit(Hit::new(25, Ring::SingleBull)).number, Some(25));
    }

    #[test]
    fn overflow_marks_score_only_while_opponent_is_open() {
        let open = CricketState::new();
        let mut closed_20 = CricketState::new();
        closed_20.apply(treble(20), &open);
        assert!(closed_20.is_closed(20));

        // T20 on an already-closed 20: three scoring marks.
        let mut player = closed_20;
        let r = player.apply(treble(20), &open);
        assert_eq!(r.points, 60);
        assert_eq!(player.points, 60);

        // Same dart against an opponent who closed 20: nothing.
        let mut player = closed_20;
        let r = player.apply(treble(20), &closed_20);
        assert_eq!(r.points, 0);
        assert_eq!(player.points, 0);
    }

    #[test]
    fn partial_overflow_splits_closing_and_scoring_marks() {
        let open = CricketState::new();
        let mut player = CricketState::with_marks([2, 0, 0, 0, 0, 0, 0], 0);
        // Two marks close, one scores.
        let r = player.apply(Hit::new(20, Ring::Treble), &open);
        assert!(player.is_closed(20));
        assert_eq!(r.points, 20);
    }

    #[test]
    fn stored_marks_cap_at_three() {
        let open = CricketState::new();
        let mut player = CricketState::new();
        player.apply(treble(19), &open);
        player.apply(treble(19), &open);
        assert_eq!(player.marks(19), 3);
        assert_eq!(player.points, 57);
    }

    #[test]
    fn mpr_rounds_to_two_decimals() {
        assert_eq!(marks_per_round(0, 0), 0.0);
        assert_eq!(marks_per_round(9, 3), 3.0);
        assert_eq!(marks_per_round(10, 3), 3.33);
        assert_eq!(marks_per_round(7, 3), 2.33);
    }

    #[test]
    fn win_requires_all_closed_and_not_behind() {
        let full = CricketState::with_marks([3; 7], 0);
        let empty = CricketState::new();
        assert!(check_win(&full, None));
        assert!(!check_win(&empty, None));
        let rich = CricketState::with_marks([0; 7], 100);
        assert!(!check_win(&full, Some(&rich)));
        let tied = CricketState::with_marks([0; 7], 0);
        assert!(check_win(&full, Some(&tied)));
    }

    #[test]
    fn solo_closes_in_priority_order() {
        let s = suggest_cricket(&CricketState::new(), None, 3);
        assert_eq!(s.kind, CricketSuggestionKind::Close);
        assert_eq!(s.strategy, CricketStrategy::Solo);
        assert_eq!(s.number, Some(20));
        assert_eq!(s.target, Target::treble(20));
        assert_eq!(s.marks_needed, 3);

        let part = CricketState::with_marks([3, 3, 1, 0, 0, 0, 0], 0);
        let s = suggest_cricket(&part, None, 3);
        assert_eq!(s.number, Some(18));
        assert_eq!(s.marks_needed, 2);
    }

    #[test]
    fn solo_complete_when_everything_is_closed() {
        let full = CricketState::with_marks([3; 7], 0);
        let s = suggest_cricket(&full, None, 3);
        assert_eq!(s.kind, CricketSuggestionKind::Complete);
        assert_eq!(s.target, Target::BULL);
    }

    #[test]
    fn ahead_closes_the_opponents_best_scoring_number() {
        let player = CricketState::with_marks([0; 7], 50);
        // Opponent has 18 and 19 closed; 19 is worth more.
        let opponent = CricketState::with_marks([0, 3, 3, 0, 0, 0, 0], 10);
        let s = suggest_cricket(&player, Some(&opponent), 3);
        assert_eq!(s.strategy, CricketStrategy::Defensive);
        assert_eq!(s.kind, CricketSuggestionKind::CloseDefensive);
        assert_eq!(s.number, Some(19));
        assert_eq!(s.marks_needed, 3);
    }

    #[test]
    fn ahead_with_no_threats_makes_progress() {
        let player = CricketState::with_marks([3, 2, 0, 0, 0, 0, 0], 50);
        let opponent = CricketState::with_marks([0; 7], 10);
        let s = suggest_cricket(&player, Some(&opponent), 3);
        assert_eq!(s.kind, CricketSuggestionKind::Close);
        // 19 is at two marks, closest to closing.
        assert_eq!(s.number, Some(19));
        assert_eq!(s.marks_needed, 1);
    }

    #[test]
    fn behind_scores_on_own_open_numbers() {
        // Player closed 20 and 16; opponent has neither.
        let player = CricketState::with_marks([3, 0, 0, 0, 3, 0, 0], 0);
        let opponent = CricketState::with_marks([0; 7], 45);
        let s = suggest_cricket(&player, Some(&opponent), 3);
        assert_eq!(s.strategy, CricketStrategy::Offensive);
        assert_eq!(s.kind, CricketSuggestionKind::Score);
        assert_eq!(s.number, Some(20));
        // 45 points down at 20 a mark: three to tie.
        assert!(s.reason.contains("~3 to tie"));
    }

    #[test]
    fn behind_with_nothing_open_opens_the_highest_mutual_number() {
        let player = CricketState::with_marks([3, 0, 0, 0, 0, 0, 0], 0);
        // Opponent also closed 20, so it scores nothing; 19 is open for both.
        let opponent = CricketState::with_marks([3, 0, 0, 0, 0, 0, 0], 30);
        let s = suggest_cricket(&player, Some(&opponent), 3);
        assert_eq!(s.kind, CricketSuggestionKind::Open);
        assert_eq!(s.number, Some(19));
    }

    #[test]
    fn tied_urgently_closes_a_two_mark_threat() {
        let player = CricketState::with_marks([0, 0, 2, 0, 0, 0, 0], 20);
        let opponent = CricketState::with_marks([0, 0, 3, 0, 0, 0, 0], 20);
        let s = suggest_cricket(&player, Some(&opponent), 3);
        assert_eq!(s.strategy, CricketStrategy::Balanced);
        assert_eq!(s.kind, CricketSuggestionKind::CloseUrgent);
        assert_eq!(s.number, Some(18));
        assert_eq!(s.marks_needed, 1);
    }

    #[test]
    fn tied_weighs_value_progress_and_urgency() {
        // 20 open with no marks (weight 20); 15 at two marks with the
        // opponent closed on it (15 + 20 + 20 = 55).
        let player = CricketState::with_marks([0, 3, 3, 3, 3, 1, 3], 0);
        let opponent = CricketState::with_marks([0, 0, 0, 0, 0, 3, 0], 0);
        let s = suggest_cricket(&player, Some(&opponent), 3);
        assert_eq!(s.kind, CricketSuggestionKind::Progress);
        assert_eq!(s.number, Some(15));
    }

    #[test]
    fn status_splits_closed_and_open() {
        let player = CricketState::with_marks([3, 1, 0, 0, 0, 0, 3], 40);
        let opponent = CricketState::with_marks([0; 7], 15);
        let st = status(&player, Some(&opponent));
        assert_eq!(st.closed, vec![20, 25]);
        assert_eq!(st.open.len(), 5);
        assert_eq!(st.open[0], NumberStatus { number: 19, marks: 1 });
        assert_eq!(st.points, 40);
        assert_eq!(st.point_diff, Some(25));
        assert_eq!(status(&player, None).point_diff, None);
    }
}
