//! Snapshot - the outbound state a presentation layer renders
//!
//! Read after every intent or tick. Plain data, serializable, and reusable
//! across frames through [`GameState::snapshot_into`](crate::GameState::snapshot_into).

use serde::{Deserialize, Serialize};

use crate::types::{GameMode, GamePhase, Position, Tile, GRID_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub mode: Option<GameMode>,
    /// Tiles by `[row][col]`; `None` in the menu
    pub board: Option<[[Tile; GRID_SIZE]; GRID_SIZE]>,
    pub score: u32,
    /// Seconds (timed) or moves (move-limited) left
    pub remaining: u32,
    pub selection: Option<Position>,
    pub busy: bool,
}

impl GameSnapshot {
    /// Whether select intents would currently be accepted
    pub fn accepts_input(&self) -> bool {
        self.phase == GamePhase::Playing && !self.busy
    }

    /// Tile at `pos`, if a board is present and `pos` is on it
    pub fn tile(&self, pos: Position) -> Option<Tile> {
        if !pos.in_bounds() {
            return None;
        }
        self.board
            .as_ref()
            .map(|grid| grid[pos.row as usize][pos.col as usize])
    }
}
