//! Exhaustive validation of the checkout chart.

use darts::checkouts::{is_checkout, CheckoutTable};
use darts::constants::{is_bogey, BOGEY_NUMBERS, MAX_CHECKOUT};
use darts::types::Target;

#[test]
fn every_non_bogey_score_has_an_entry() {
    let table = CheckoutTable::new();
    for score in 2..=MAX_CHECKOUT {
        if is_bogey(score) {
            assert!(table.entry(score).is_none(), "bogey {score} has an entry");
        } else {
            assert!(table.entry(score).is_some(), "score {score} missing");
        }
    }
    // 169 scores in [2, 170], minus the 7 bogeys.
    assert_eq!(table.len(), 162);
}

#[test]
fn out_of_range_scores_have_no_entry() {
    let table = CheckoutTable::new();
    for score in [-5, 0, 1, 171, 180, 501] {
        assert!(table.entry(score).is_none(), "score {score}");
        assert!(!is_checkout(score), "score {score}");
    }
}

#[test]
fn every_path_sums_to_its_score() {
    let table = CheckoutTable::new();
    for (score, entry) in table.iter() {
        let sum: i32 = entry.path.iter().map(|t| t.score()).sum();
        assert_eq!(sum, score, "path for {score} sums to {sum}");
    }
}

#[test]
fn every_path_ends_on_a_double() {
    let table = CheckoutTable::new();
    for (score, entry) in table.iter() {
        let last = entry.path.last().unwrap();
        assert!(
            last.ring.finishes_leg(),
            "path for {score} ends on {}",
            last.code()
        );
    }
}

#[test]
fn darts_required_matches_the_path() {
    let table = CheckoutTable::new();
    for (score, entry) in table.iter() {
        assert_eq!(
            entry.darts_required,
            entry.path.len() as i32,
            "score {score}"
        );
        assert!((1..=3).contains(&entry.darts_required), "score {score}");
        assert_eq!(entry.codes.len(), entry.path.len(), "score {score}");
    }
}

#[test]
fn codes_parse_back_to_the_path() {
    let table = CheckoutTable::new();
    for (score, entry) in table.iter() {
        for (code, target) in entry.codes.iter().zip(&entry.path) {
            assert_eq!(Target::parse(code).as_ref(), Some(target), "score {score}");
        }
        assert!(!entry.description.is_empty(), "score {score}");
    }
}

#[test]
fn one_dart_finishes_are_exactly_the_doubles_and_the_bull() {
    let table = CheckoutTable::new();
    let mut one_dart: Vec<i32> = table
        .iter()
        .filter(|(_, e)| e.darts_required == 1)
        .map(|(s, _)| s)
        .collect();
    one_dart.sort_unstable();
    let mut expected: Vec<i32> = (1..=20).map(|s| s * 2).collect();
    expected.push(50);
    assert_eq!(one_dart, expected);
}

#[test]
fn bogey_set_is_the_seven_classics() {
    assert_eq!(BOGEY_NUMBERS.len(), 7);
    for &score in &[169, 168, 166, 165, 163, 162, 159] {
        assert!(is_bogey(score), "{score}");
    }
    assert!(!is_bogey(167));
    assert!(!is_bogey(170));
}

#[test]
fn landmark_checkouts() {
    let table = CheckoutTable::new();
    assert_eq!(table.entry(170).unwrap().codes, &["T20", "T20", "Bull"]);
    assert_eq!(table.entry(167).unwrap().codes, &["T20", "T19", "Bull"]);
    assert_eq!(table.entry(99).unwrap().codes, &["T19", "S10", "D16"]);
    let fish_and_chips = table.entry(110).unwrap();
    assert_eq!(fish_and_chips.codes, &["T20", "Bull"]);
    assert_eq!(fish_and_chips.darts_required, 2);
    assert_eq!(table.entry(40).unwrap().codes, &["D20"]);
    assert_eq!(table.entry(2).unwrap().codes, &["D1"]);
    assert_eq!(table.entry(50).unwrap().codes, &["Bull"]);
}
