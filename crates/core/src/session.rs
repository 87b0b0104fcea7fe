//! Session - the state of one game from start to game over
//!
//! A session exclusively owns its board. It is created by the controller on
//! "start game", mutated by committed swaps and countdown ticks, and dropped on
//! "return to menu" or replaced on "play again".

use crate::board::Board;
use crate::types::{GameMode, Position, TIMER_INTERVAL_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) mode: GameMode,
    pub(crate) score: u32,
    /// Seconds left (timed) or moves left (move-limited)
    pub(crate) remaining: u32,
    pub(crate) selection: Option<Position>,
    pub(crate) board: Board,
    pub(crate) terminal: bool,
    /// Milliseconds accumulated towards the next countdown step
    pub(crate) clock_ms: u32,
}

impl Session {
    pub(crate) fn new(mode: GameMode, remaining: u32, board: Board) -> Self {
        Self {
            mode,
            score: 0,
            remaining,
            selection: None,
            board,
            terminal: false,
            clock_ms: 0,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn selection(&self) -> Option<Position> {
        self.selection
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whether the session has reached game over
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Apply a committed swap's settled board and score
    ///
    /// Spends one move in move-limited mode and ends the session when the
    /// last move is used.
    pub(crate) fn commit(&mut self, board: Board, score_delta: u32) {
        self.board = board;
        self.score = self.score.saturating_add(score_delta);
        self.selection = None;

        if self.mode == GameMode::MoveLimited {
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                self.terminal = true;
            }
        }
    }

    /// Advance the countdown by `elapsed_ms`
    ///
    /// Returns the number of whole seconds consumed. Only timed sessions count
    /// down; reaching zero ends the session.
    pub(crate) fn advance_clock(&mut self, elapsed_ms: u32) -> u32 {
        if self.mode != GameMode::Timed || self.terminal {
            return 0;
        }

        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms);
        let mut steps = 0;
        while self.clock_ms >= TIMER_INTERVAL_MS && self.remaining > 0 {
            self.clock_ms -= TIMER_INTERVAL_MS;
            self.remaining -= 1;
            steps += 1;
        }
        if self.remaining == 0 {
            self.terminal = true;
            self.clock_ms = 0;
        }
        steps
    }
}
