//! Turn and game state for x01 and cricket play.
//!
//! The x01 game owns the per-turn dart list the collision resolver reads:
//! darts accumulate in insertion order during a turn and are cleared when
//! the turn ends, however it ends. Bust semantics are double-out: going
//! below zero, leaving exactly one, or reaching zero on anything but a
//! double (or the inner bull) reverts the whole turn.

use crate::constants::{DARTS_PER_TURN, X01_START};
use crate::cricket::{marks_per_round, CricketState, MarkResult};
use crate::types::{BoardPoint, DartOnBoard, Hit};

/// What one dart did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DartEvent {
    /// Scored; the turn continues.
    Scored,
    /// Third dart of the turn; score stands, turn over.
    TurnOver,
    /// Turn reverted to its starting score and ended.
    Bust,
    /// Reached exactly zero on a finishing dart.
    Won,
}

/// A single-player x01 leg.
#[derive(Debug, Clone)]
pub struct X01Game {
    score: i32,
    turn_start_score: i32,
    darts_this_turn: i32,
    total_darts: i32,
    turns_completed: i32,
    turn_hits: Vec<Hit>,
    board_darts: Vec<DartOnBoard>,
    finished: bool,
}

impl X01Game {
    /// Standard 501 leg.
    pub fn new() -> Self {
        X01Game::from_score(X01_START)
    }

    /// A leg from an arbitrary starting score (301, practice positions).
    pub fn from_score(start: i32) -> Self {
        debug_assert!(start >= 2);
        X01Game {
            score: start,
            turn_start_score: start,
            darts_this_turn: 0,
            total_darts: 0,
            turns_completed: 0,
            turn_hits: Vec::with_capacity(DARTS_PER_TURN as usize),
            board_darts: Vec::with_capacity(DARTS_PER_TURN as usize),
            finished: false,
        }
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn darts_remaining(&self) -> i32 {
        DARTS_PER_TURN - self.darts_this_turn
    }

    pub fn total_darts(&self) -> i32 {
        self.total_darts
    }

    /// Turns fully played (a won turn counts even if cut short).
    pub fn turns_completed(&self) -> i32 {
        self.turns_completed
    }

    /// Points scored so far this turn.
    pub fn turn_score(&self) -> i32 {
        self.turn_start_score - self.score
    }

    /// Hits thrown this turn, in order.
    pub fn turn_hits(&self) -> &[Hit] {
        &self.turn_hits
    }

    /// Darts physically on the board this turn, in insertion order. Feed
    /// this to the collision resolver before each throw.
    pub fn board_darts(&self) -> &[DartOnBoard] {
        &self.board_darts
    }

    /// Apply a classified dart. Board darts, bust reversion, and turn
    /// rollover are all handled here; the caller only throws.
    pub fn apply_dart(&mut self, position: BoardPoint, hit: Hit) -> DartEvent {
        debug_assert!(!self.finished, "dart applied to a finished leg");

        self.total_darts += 1;
        self.darts_this_turn += 1;
        self.turn_hits.push(hit);
        if hit.on_board() {
            self.board_darts.push(DartOnBoard { position, hit });
        }

        let new_score = self.score - hit.score;
        let bust =
            new_score < 0 || new_score == 1 || (new_score == 0 && !hit.ring.finishes_leg());
        if bust {
            self.score = self.turn_start_score;
            self.end_turn();
            return DartEvent::Bust;
        }

        self.score = new_score;
        if new_score == 0 {
            self.finished = true;
            self.turns_completed += 1;
            return DartEvent::Won;
        }
        if self.darts_this_turn >= DARTS_PER_TURN {
            self.end_turn();
            return DartEvent::TurnOver;
        }
        DartEvent::Scored
    }

    fn end_turn(&mut self) {
        self.turns_completed += 1;
        self.darts_this_turn = 0;
        self.turn_start_score = self.score;
        self.turn_hits.clear();
        self.board_darts.clear();
    }
}

impl Default for X01Game {
    fn default() -> Self {
        X01Game::new()
    }
}

/// A cricket leg from the throwing player's side: own and opponent marks,
/// round counting for MPR, and the same per-turn board-dart lifecycle.
#[derive(Debug, Clone, Default)]
pub struct CricketGame {
    pub player: CricketState,
    pub opponent: CricketState,
    darts_this_turn: i32,
    rounds: i32,
    total_marks: i32,
    board_darts: Vec<DartOnBoard>,
}

impl CricketGame {
    pub fn new() -> Self {
        CricketGame::default()
    }

    pub fn darts_remaining(&self) -> i32 {
        DARTS_PER_TURN - self.darts_this_turn
    }

    pub fn rounds(&self) -> i32 {
        self.rounds
    }

    pub fn board_darts(&self) -> &[DartOnBoard] {
        &self.board_darts
    }

    /// Marks per round over the rounds thrown so far.
    pub fn mpr(&self) -> f64 {
        marks_per_round(self.total_marks, self.rounds)
    }

    /// Apply one of the player's darts and roll the turn over after three.
    pub fn apply_dart(&mut self, position: BoardPoint, hit: Hit) -> MarkResult {
        if hit.on_board() {
            self.board_darts.push(DartOnBoard { position, hit });
        }
        let result = self.player.apply(hit, &self.opponent);
        self.total_marks += result.marks;

        self.darts_this_turn += 1;
        if self.darts_this_turn >= DARTS_PER_TURN {
            self.darts_this_turn = 0;
            self.rounds += 1;
            self.board_darts.clear();
        }
        result
    }
}
