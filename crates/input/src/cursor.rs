//! Board cursor.

use crate::types::{Direction, Position, GRID_SIZE};

/// Highlighted cell, always on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: Position,
}

impl Cursor {
    pub fn new() -> Self {
        let mid = (GRID_SIZE / 2) as u8;
        Self {
            pos: Position::new(mid, mid),
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn step(&mut self, direction: Direction) {
        self.pos = self.pos.step(direction);
    }

    /// Jump to `pos`; off-board positions are ignored
    pub fn jump(&mut self, pos: Position) {
        if pos.in_bounds() {
            self.pos = pos;
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}
