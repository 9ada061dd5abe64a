//! The checkout chart: for every finishable score from 2 to 170, the
//! standard path to a double, plus the bogey set and target-code helpers.
//!
//! The chart is static data validated at construction: every path sums to
//! its score and ends on a double or the bull. Scores 159, 162, 163, 165,
//! 166, 168 and 169 have no three-dart finish and are absent by design.

use crate::constants::{is_bogey, MAX_CHECKOUT};
use crate::types::Target;

/// One row of the chart. `path` holds the parsed targets in throw order;
/// `codes` the equivalent shorthand for display.
#[derive(Debug, Clone)]
pub struct CheckoutEntry {
    pub darts_required: i32,
    pub path: Vec<Target>,
    pub codes: &'static [&'static str],
    pub description: &'static str,
}

/// The chart indexed by score. Build once; lookups are array reads.
pub struct CheckoutTable {
    entries: Vec<Option<CheckoutEntry>>,
}

impl CheckoutTable {
    pub fn new() -> Self {
        let mut entries: Vec<Option<CheckoutEntry>> =
            (0..=MAX_CHECKOUT).map(|_| None).collect();

        for &(score, darts_required, codes, description) in CHECKOUT_DATA {
            let path: Vec<Target> = codes
                .iter()
                .map(|&code| {
                    Target::parse(code)
                        .unwrap_or_else(|| panic!("malformed checkout code {code} at {score}"))
                })
                .collect();

            debug_assert!(is_checkout(score), "chart row {score} out of range");
            debug_assert_eq!(path.len() as i32, darts_required, "chart row {score}");
            debug_assert_eq!(
                path.iter().map(|t| t.score()).sum::<i32>(),
                score,
                "chart row {score} does not sum"
            );
            debug_assert!(
                path.last().is_some_and(|t| t.ring.finishes_leg()),
                "chart row {score} does not end on a double"
            );

            entries[score as usize] =
                Some(CheckoutEntry { darts_required, path, codes, description });
        }

        CheckoutTable { entries }
    }

    /// The chart row for a score, if one exists. Bogeys and scores outside
    /// [2, 170] return `None`.
    pub fn entry(&self, score: i32) -> Option<&CheckoutEntry> {
        if !(0..=MAX_CHECKOUT).contains(&score) {
            return None;
        }
        self.entries[score as usize].as_ref()
    }

    /// All rows, ascending by score.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &CheckoutEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(score, entry)| entry.as_ref().map(|e| (score as i32, e)))
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CheckoutTable {
    fn default() -> Self {
        CheckoutTable::new()
    }
}

/// Whether a score can be finished within three darts: in range and not a
/// bogey.
pub fn is_checkout(score: i32) -> bool {
    (2..=MAX_CHECKOUT).contains(&score) && !is_bogey(score)
}

/// (score, darts required, path codes, description), descending.
const CHECKOUT_DATA: &[(i32, i32, &[&str], &str)] = &[
    (170, 3, &["T20", "T20", "Bull"], "The big fish - T20, T20, Bull"),
    (167, 3, &["T20", "T19", "Bull"], "T20, T19, Bull"),
    (164, 3, &["T20", "T18", "Bull"], "T20, T18, Bull"),
    (161, 3, &["T20", "T17", "Bull"], "T20, T17, Bull"),
    (160, 3, &["T20", "T20", "D20"], "Two tops and double top"),
    (158, 3, &["T20", "T20", "D19"], "T20, T20, D19"),
    (157, 3, &["T20", "T19", "D20"], "T20, T19, D20"),
    (156, 3, &["T20", "T20", "D18"], "T20, T20, D18"),
    (155, 3, &["T20", "T19", "D19"], "T20, T19, D19"),
    (154, 3, &["T20", "T18", "D20"], "T20, T18, D20"),
    (153, 3, &["T20", "T19", "D18"], "T20, T19, D18"),
    (152, 3, &["T20", "T20", "D16"], "T20, T20, D16"),
    (151, 3, &["T20", "T17", "D20"], "T20, T17, D20"),
    (150, 3, &["T20", "T18", "D18"], "T20, T18, D18"),
    (149, 3, &["T20", "T19", "D16"], "T20, T19, D16"),
    (148, 3, &["T20", "T20", "D14"], "T20, T20, D14"),
    (147, 3, &["T20", "T17", "D18"], "T20, T17, D18"),
    (146, 3, &["T20", "T18", "D16"], "T20, T18, D16"),
    (145, 3, &["T20", "T19", "D14"], "T20, T19, D14"),
    (144, 3, &["T20", "T20", "D12"], "T20, T20, D12"),
    (143, 3, &["T20", "T17", "D16"], "T20, T17, D16"),
    (142, 3, &["T20", "T14", "D20"], "T20, T14, D20"),
    (141, 3, &["T20", "T19", "D12"], "T20, T19, D12"),
    (140, 3, &["T20", "T20", "D10"], "T20, T20, D10"),
    (139, 3, &["T20", "T13", "D20"], "T20, T13, D20"),
    (138, 3, &["T20", "T18", "D12"], "T20, T18, D12"),
    (137, 3, &["T20", "T19", "D10"], "T20, T19, D10"),
    (136, 3, &["T20", "T20", "D8"], "T20, T20, D8"),
    (135, 3, &["T20", "T17", "D12"], "T20, T17, D12"),
    (134, 3, &["T20", "T14", "D16"], "T20, T14, D16"),
    (133, 3, &["T20", "T19", "D8"], "T20, T19, D8"),
    (132, 3, &["T20", "T16", "D12"], "T20, T16, D12 (or Bull, Bull, Bull)"),
    (131, 3, &["T20", "T13", "D16"], "T20, T13, D16"),
    (130, 3, &["T20", "T18", "D8"], "T20, T18, D8"),
    (129, 3, &["T19", "T16", "D12"], "T19, T16, D12"),
    (128, 3, &["T18", "T14", "D16"], "T18, T14, D16"),
    (127, 3, &["T20", "T17", "D8"], "T20, T17, D8"),
    (126, 3, &["T19", "T19", "D6"], "T19, T19, D6"),
    (125, 3, &["T20", "T15", "D10"], "T20, T15, D10 (or 25, T20, D20)"),
    (124, 3, &["T20", "T14", "D11"], "T20, T14, D11"),
    (123, 3, &["T19", "T16", "D9"], "T19, T16, D9"),
    (122, 3, &["T18", "T18", "D7"], "T18, T18, D7"),
    (121, 3, &["T20", "T11", "D14"], "T20, T11, D14"),
    (120, 3, &["T20", "S20", "D20"], "T20, S20, D20"),
    (119, 3, &["T19", "T12", "D13"], "T19, T12, D13"),
    (118, 3, &["T20", "S18", "D20"], "T20, S18, D20"),
    (117, 3, &["T20", "S17", "D20"], "T20, S17, D20"),
    (116, 3, &["T20", "S16", "D20"], "T20, S16, D20"),
    (115, 3, &["T20", "S15", "D20"], "T20, S15, D20"),
    (114, 3, &["T20", "S14", "D20"], "T20, S14, D20"),
    (113, 3, &["T20", "S13", "D20"], "T20, S13, D20"),
    (112, 3, &["T20", "S12", "D20"], "T20, S12, D20"),
    (111, 3, &["T20", "S11", "D20"], "T20, S11, D20"),
    (110, 2, &["T20", "Bull"], "T20, Bull (or T20, S10, D20)"),
    (109, 3, &["T20", "S9", "D20"], "T20, S9, D20"),
    (108, 3, &["T20", "S8", "D20"], "T20, S8, D20"),
    (107, 3, &["T19", "S10", "D20"], "T19, S10, D20"),
    (106, 3, &["T20", "S6", "D20"], "T20, S6, D20"),
    (105, 3, &["T20", "S5", "D20"], "T20, S5, D20"),
    (104, 3, &["T18", "S10", "D20"], "T18, S10, D20"),
    (103, 3, &["T19", "S6", "D20"], "T19, S6, D20"),
    (102, 3, &["T20", "S2", "D20"], "T20, S2, D20"),
    (101, 3, &["T17", "S10", "D20"], "T17, S10, D20"),
    (100, 2, &["T20", "D20"], "T20, D20"),
    (99, 3, &["T19", "S10", "D16"], "T19, S10, D16"),
    (98, 2, &["T20", "D19"], "T20, D19"),
    (97, 2, &["T19", "D20"], "T19, D20"),
    (96, 2, &["T20", "D18"], "T20, D18"),
    (95, 2, &["T19", "D19"], "T19, D19 (or T15, Bull)"),
    (94, 2, &["T18", "D20"], "T18, D20"),
    (93, 2, &["T19", "D18"], "T19, D18"),
    (92, 2, &["T20", "D16"], "T20, D16"),
    (91, 2, &["T17", "D20"], "T17, D20"),
    (90, 2, &["T20", "D15"], "T20, D15 (or T18, D18)"),
    (89, 2, &["T19", "D16"], "T19, D16"),
    (88, 2, &["T20", "D14"], "T20, D14"),
    (87, 2, &["T17", "D18"], "T17, D18"),
    (86, 2, &["T18", "D16"], "T18, D16"),
    (85, 2, &["T15", "D20"], "T15, D20"),
    (84, 2, &["T20", "D12"], "T20, D12"),
    (83, 2, &["T17", "D16"], "T17, D16"),
    (82, 2, &["T14", "D20"], "T14, D20 (or Bull, D16)"),
    (81, 2, &["T19", "D12"], "T19, D12"),
    (80, 2, &["T20", "D10"], "T20, D10"),
    (79, 2, &["T19", "D11"], "T19, D11 (or T13, D20)"),
    (78, 2, &["T18", "D12"], "T18, D12"),
    (77, 2, &["T19", "D10"], "T19, D10"),
    (76, 2, &["T20", "D8"], "T20, D8"),
    (75, 2, &["T17", "D12"], "T17, D12"),
    (74, 2, &["T14", "D16"], "T14, D16"),
    (73, 2, &["T19", "D8"], "T19, D8"),
    (72, 2, &["T16", "D12"], "T16, D12"),
    (71, 2, &["T13", "D16"], "T13, D16"),
    (70, 2, &["T18", "D8"], "T18, D8 (or T10, D20)"),
    (69, 2, &["T19", "D6"], "T19, D6"),
    (68, 2, &["T20", "D4"], "T20, D4 (or T16, D10)"),
    (67, 2, &["T17", "D8"], "T17, D8"),
    (66, 2, &["T10", "D18"], "T10, D18"),
    (65, 2, &["T19", "D4"], "T19, D4 (or T15, D10)"),
    (64, 2, &["T16", "D8"], "T16, D8"),
    (63, 2, &["T13", "D12"], "T13, D12"),
    (62, 2, &["T10", "D16"], "T10, D16"),
    (61, 2, &["T15", "D8"], "T15, D8"),
    (60, 2, &["S20", "D20"], "S20, D20"),
    (59, 2, &["S19", "D20"], "S19, D20"),
    (58, 2, &["S18", "D20"], "S18, D20"),
    (57, 2, &["S17", "D20"], "S17, D20"),
    (56, 2, &["T16", "D4"], "T16, D4 (or S16, D20)"),
    (55, 2, &["S15", "D20"], "S15, D20"),
    (54, 2, &["S14", "D20"], "S14, D20"),
    (53, 2, &["S13", "D20"], "S13, D20"),
    (52, 2, &["S12", "D20"], "S12, D20 (or T12, D8)"),
    (51, 2, &["S11", "D20"], "S11, D20"),
    (50, 1, &["Bull"], "Bullseye!"),
    (49, 2, &["S9", "D20"], "S9, D20"),
    (48, 2, &["S8", "D20"], "S8, D20"),
    (47, 2, &["S7", "D20"], "S7, D20"),
    (46, 2, &["S6", "D20"], "S6, D20 (or S10, D18)"),
    (45, 2, &["S5", "D20"], "S5, D20 (or S13, D16)"),
    (44, 2, &["S4", "D20"], "S4, D20 (or S12, D16)"),
    (43, 2, &["S3", "D20"], "S3, D20 (or S11, D16)"),
    (42, 2, &["S10", "D16"], "S10, D16 (or S2, D20)"),
    (41, 2, &["S9", "D16"], "S9, D16"),
    (40, 1, &["D20"], "Double 20 - tops!"),
    (39, 2, &["S7", "D16"], "S7, D16 (or S19, D10)"),
    (38, 1, &["D19"], "Double 19"),
    (37, 2, &["S5", "D16"], "S5, D16 (or S17, D10)"),
    (36, 1, &["D18"], "Double 18"),
    (35, 2, &["S3", "D16"], "S3, D16"),
    (34, 1, &["D17"], "Double 17"),
    (33, 2, &["S1", "D16"], "S1, D16 (or S17, D8)"),
    (32, 1, &["D16"], "Double 16 - favorite finish!"),
    (31, 2, &["S15", "D8"], "S15, D8 (or S7, D12)"),
    (30, 1, &["D15"], "Double 15"),
    (29, 2, &["S13", "D8"], "S13, D8"),
    (28, 1, &["D14"], "Double 14"),
    (27, 2, &["S11", "D8"], "S11, D8 (or S19, D4)"),
    (26, 1, &["D13"], "Double 13"),
    (25, 2, &["S9", "D8"], "S9, D8 (or S17, D4)"),
    (24, 1, &["D12"], "Double 12"),
    (23, 2, &["S7", "D8"], "S7, D8 (or S15, D4)"),
    (22, 1, &["D11"], "Double 11"),
    (21, 2, &["S5", "D8"], "S5, D8 (or S13, D4)"),
    (20, 1, &["D10"], "Double 10"),
    (19, 2, &["S3", "D8"], "S3, D8 (or S11, D4)"),
    (18, 1, &["D9"], "Double 9"),
    (17, 2, &["S1", "D8"], "S1, D8 (or S9, D4)"),
    (16, 1, &["D8"], "Double 8"),
    (15, 2, &["S7", "D4"], "S7, D4"),
    (14, 1, &["D7"], "Double 7"),
    (13, 2, &["S5", "D4"], "S5, D4"),
    (12, 1, &["D6"], "Double 6"),
    (11, 2, &["S3", "D4"], "S3, D4"),
    (10, 1, &["D5"], "Double 5"),
    (9, 2, &["S1", "D4"], "S1, D4"),
    (8, 1, &["D4"], "Double 4"),
    (7, 2, &["S3", "D2"], "S3, D2"),
    (6, 1, &["D3"], "Double 3"),
    (5, 2, &["S1", "D2"], "S1, D2"),
    (4, 1, &["D2"], "Double 2"),
    (3, 2, &["S1", "D1"], "S1, D1"),
    (2, 1, &["D1"], "Double 1 - madhouse!"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BOGEY_NUMBERS;
    use crate::types::Ring;

    #[test]
    fn every_finishable_score_has_a_row() {
        let table = CheckoutTable::new();
        for score in 2..=MAX_CHECKOUT {
            if is_bogey(score) {
                assert!(table.entry(score).is_none(), "{score} is a bogey");
            } else {
                assert!(table.entry(score).is_some(), "{score} missing from chart");
            }
        }
        assert_eq!(table.len(), 162);
    }

    #[test]
    fn out_of_range_scores_have_no_row() {
        let table = CheckoutTable::new();
        for score in [-5, 0, 1, 171, 180, 501] {
            assert!(table.entry(score).is_none(), "{score}");
        }
    }

    #[test]
    fn paths_sum_and_finish_on_a_double() {
        let table = CheckoutTable::new();
        for (score, entry) in table.iter() {
            let sum: i32 = entry.path.iter().map(|t| t.score()).sum();
            assert_eq!(sum, score, "path for {score} sums to {sum}");
            assert!(
                entry.path.last().unwrap().ring.finishes_leg(),
                "path for {score} ends on {:?}",
                entry.path.last().unwrap()
            );
            assert_eq!(entry.path.len() as i32, entry.darts_required, "{score}");
            assert!((1..=3).contains(&entry.darts_required), "{score}");
        }
    }

    #[test]
    fn known_rows() {
        let table = CheckoutTable::new();
        assert_eq!(table.entry(170).unwrap().codes, ["T20", "T20", "Bull"]);
        assert_eq!(table.entry(50).unwrap().codes, ["Bull"]);
        assert_eq!(table.entry(50).unwrap().darts_required, 1);
        assert_eq!(table.entry(40).unwrap().codes, ["D20"]);
        assert_eq!(table.entry(2).unwrap().codes, ["D1"]);
        assert_eq!(table.entry(100).unwrap().codes, ["T20", "D20"]);
    }

    #[test]
    fn ninety_nine_needs_three_darts() {
        // No two-dart finish exists for 99: the treble leaves an odd
        // remainder above D20 range either way.
        let table = CheckoutTable::new();
        let entry = table.entry(99).unwrap();
        assert_eq!(entry.darts_required, 3);
        assert_eq!(entry.codes, ["T19", "S10", "D16"]);
    }

    #[test]
    fn is_checkout_matches_range_and_bogeys() {
        assert!(is_checkout(2));
        assert!(is_checkout(170));
        assert!(is_checkout(99));
        assert!(!is_checkout(1));
        assert!(!is_checkout(0));
        assert!(!is_checkout(171));
        for &b in &BOGEY_NUMBERS {
            assert!(!is_checkout(b));
        }
    }

    #[test]
    fn one_dart_rows_are_doubles_or_bull() {
        let table = CheckoutTable::new();
        for (score, entry) in table.iter() {
            if entry.darts_required == 1 {
                assert!(score == 50 || (score % 2 == 0 && score <= 40), "{score}");
                assert_eq!(entry.path.len(), 1);
            }
        }
        // Every even score up to 40, plus the bull, finishes in one dart.
        for score in (2..=40).step_by(2) {
            assert_eq!(table.entry(score).unwrap().darts_required, 1, "{score}");
        }
        assert_eq!(table.entry(50).unwrap().darts_required, 1);
    }
}
