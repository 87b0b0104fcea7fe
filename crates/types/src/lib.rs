//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! Everything here is plain data, usable from the engine, the terminal
//! front end, or any other presentation layer that consumes snapshots.
//!
//! # Board Dimensions
//!
//! The board is a square grid of [`GRID_SIZE`] x [`GRID_SIZE`] cells,
//! addressed by `(row, col)` with `(0, 0)` at the top-left corner.
//!
//! # Session Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TIME_LIMIT_SECS` | 60 | Starting seconds in timed mode |
//! | `MOVE_LIMIT` | 20 | Starting moves in move-limited mode |
//! | `TIMER_INTERVAL_MS` | 1000 | One countdown step in timed mode |
//! | `MAX_CASCADE_PASSES` | 100 | Safety cap on clear/refill passes |
//! | `CASCADE_STEP_MS` | 300 | Presentation delay per staged pass |
//!
//! # Scoring
//!
//! Each cascade pass that clears `n` distinct cells scores
//! `n * POINTS_PER_TILE + max(0, n - MIN_RUN) * BONUS_PER_EXTRA_TILE`.
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{GameMode, Position, TileKind, GRID_SIZE};
//!
//! let kind = TileKind::from_str("RED").unwrap();
//! assert_eq!(kind, TileKind::Red);
//!
//! assert!(Position::new(3, 4).is_adjacent(Position::new(3, 5)));
//! assert!(!Position::new(3, 4).is_adjacent(Position::new(4, 5)));
//!
//! assert_eq!(GameMode::from_str("moves"), Some(GameMode::MoveLimited));
//! assert_eq!(GRID_SIZE, 8);
//! ```

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Board side length in cells
pub const GRID_SIZE: usize = 8;

/// Total number of cells on the board
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// Number of distinct tile kinds
pub const TILE_KIND_COUNT: usize = 5;

/// Starting seconds for a timed session
pub const TIME_LIMIT_SECS: u32 = 60;

/// Starting moves for a move-limited session
pub const MOVE_LIMIT: u32 = 20;

/// Length of one countdown step in timed mode (ms)
pub const TIMER_INTERVAL_MS: u32 = 1000;

/// Points for every cleared cell
pub const POINTS_PER_TILE: u32 = 10;

/// Bonus for every cleared cell beyond the third in a single pass
pub const BONUS_PER_EXTRA_TILE: u32 = 5;

/// Upper bound on clear/refill passes before the resolver gives up
pub const MAX_CASCADE_PASSES: u32 = 100;

/// Delay between staged cascade passes in the terminal front end (ms)
pub const CASCADE_STEP_MS: u32 = 300;

/// Fixed timestep of the terminal front end (ms)
pub const FRAME_MS: u32 = 16;

// Match sets are stored as a 64-bit mask, one bit per cell.
const _: () = assert!(CELL_COUNT <= 64);

/// The five candy kinds
///
/// The kind is the unit of matching equality. Colors and glyphs are chosen by
/// the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl TileKind {
    /// Every kind, in index order
    pub const ALL: [TileKind; TILE_KIND_COUNT] = [
        TileKind::Red,
        TileKind::Blue,
        TileKind::Green,
        TileKind::Yellow,
        TileKind::Purple,
    ];

    /// Stable index in `0..TILE_KIND_COUNT`
    pub fn index(self) -> usize {
        match self {
            TileKind::Red => 0,
            TileKind::Blue => 1,
            TileKind::Green => 2,
            TileKind::Yellow => 3,
            TileKind::Purple => 4,
        }
    }

    /// Inverse of [`TileKind::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_str("purple"), Some(TileKind::Purple));
    /// assert_eq!(TileKind::from_str("Blue"), Some(TileKind::Blue));
    /// assert_eq!(TileKind::from_str("orange"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(TileKind::Red),
            "blue" => Some(TileKind::Blue),
            "green" => Some(TileKind::Green),
            "yellow" => Some(TileKind::Yellow),
            "purple" => Some(TileKind::Purple),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Red => "red",
            TileKind::Blue => "blue",
            TileKind::Green => "green",
            TileKind::Yellow => "yellow",
            TileKind::Purple => "purple",
        }
    }
}

/// Opaque tile identity
///
/// Carries no game meaning. A renderer may use it to key persistent
/// elements across redraws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u64);

/// A single candy on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub id: TileId,
}

impl Tile {
    pub fn new(kind: TileKind, id: TileId) -> Self {
        Self { kind, id }
    }
}

/// A cell address on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Whether the position lies inside the grid
    pub fn in_bounds(&self) -> bool {
        (self.row as usize) < GRID_SIZE && (self.col as usize) < GRID_SIZE
    }

    /// Row-major flat index, or `None` when out of bounds
    #[inline(always)]
    pub fn index(&self) -> Option<usize> {
        if !self.in_bounds() {
            return None;
        }
        Some(self.row as usize * GRID_SIZE + self.col as usize)
    }

    /// Inverse of [`Position::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= CELL_COUNT {
            return None;
        }
        Some(Self::new((index / GRID_SIZE) as u8, (index % GRID_SIZE) as u8))
    }

    /// Orthogonal adjacency: exactly one coordinate differs, by exactly one
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::Position;
    ///
    /// let p = Position::new(2, 2);
    /// assert!(p.is_adjacent(Position::new(1, 2)));
    /// assert!(!p.is_adjacent(Position::new(3, 3)));
    /// assert!(!p.is_adjacent(p));
    /// ```
    pub fn is_adjacent(&self, other: Position) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
    }

    /// Neighbour one step in `direction`, clamped to the grid
    pub fn step(&self, direction: Direction) -> Self {
        let max = (GRID_SIZE - 1) as u8;
        match direction {
            Direction::Up => Self::new(self.row.saturating_sub(1), self.col),
            Direction::Down => Self::new(self.row.saturating_add(1).min(max), self.col),
            Direction::Left => Self::new(self.row, self.col.saturating_sub(1)),
            Direction::Right => Self::new(self.row, self.col.saturating_add(1).min(max)),
        }
    }
}

/// Cardinal directions on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Session resource model
///
/// - **Timed**: the session ends when the countdown reaches zero
/// - **MoveLimited**: the session ends when the last move is spent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    Timed,
    MoveLimited,
}

impl GameMode {
    /// Parse mode from string
    ///
    /// Accepts "timed", "moves" and "moveLimited" (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "timed" => Some(GameMode::Timed),
            "moves" | "movelimited" => Some(GameMode::MoveLimited),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Timed => "timed",
            GameMode::MoveLimited => "moveLimited",
        }
    }
}

/// Top-level controller state
///
/// `Menu -> Playing -> GameOver`, with `Playing -> Menu`,
/// `GameOver -> Playing` and `GameOver -> Menu` also allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    GameOver,
}

/// Player intents accepted by the session controller
///
/// The periodic countdown is driven separately through `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameAction {
    /// Start a new session in the given mode
    Start { mode: GameMode },
    /// Select a cell, or swap it with the current selection
    Select { position: Position },
    /// Restart with the mode of the session that just ended
    PlayAgain,
    /// Discard the session and go back to the menu
    ReturnToMenu,
}

/// Engine errors
///
/// Only precondition violations are errors. Rejected swaps and intents that
/// arrive in the wrong phase are ordinary outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    #[display("position ({row}, {col}) is outside the board")]
    OutOfBounds { row: u8, col: u8 },
}

impl EngineError {
    pub fn out_of_bounds(pos: Position) -> Self {
        EngineError::OutOfBounds {
            row: pos.row,
            col: pos.col,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_defaults() {
        assert_eq!(GRID_SIZE, 8);
        assert_eq!(TILE_KIND_COUNT, 5);
        assert_eq!(TIME_LIMIT_SECS, 60);
        assert_eq!(MOVE_LIMIT, 20);
        assert_eq!(POINTS_PER_TILE, 10);
        assert_eq!(BONUS_PER_EXTRA_TILE, 5);
    }

    #[test]
    fn test_tile_kind_index_roundtrip() {
        for (i, kind) in TileKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(TileKind::from_index(i), Some(*kind));
            assert_eq!(TileKind::from_str(kind.as_str()), Some(*kind));
        }
        assert_eq!(TileKind::from_index(TILE_KIND_COUNT), None);
    }

    #[test]
    fn test_position_index() {
        assert_eq!(Position::new(0, 0).index(), Some(0));
        assert_eq!(Position::new(0, 7).index(), Some(7));
        assert_eq!(Position::new(1, 0).index(), Some(8));
        assert_eq!(Position::new(7, 7).index(), Some(63));
        assert_eq!(Position::new(8, 0).index(), None);
        assert_eq!(Position::new(0, 8).index(), None);
        assert_eq!(Position::from_index(63), Some(Position::new(7, 7)));
        assert_eq!(Position::from_index(64), None);
    }

    #[test]
    fn test_adjacency() {
        let p = Position::new(4, 4);
        assert!(p.is_adjacent(Position::new(4, 5)));
        assert!(p.is_adjacent(Position::new(4, 3)));
        assert!(p.is_adjacent(Position::new(3, 4)));
        assert!(p.is_adjacent(Position::new(5, 4)));

        assert!(!p.is_adjacent(Position::new(5, 5)));
        assert!(!p.is_adjacent(Position::new(4, 6)));
        assert!(!p.is_adjacent(p));
    }

    #[test]
    fn test_step_clamps_to_grid() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.step(Direction::Up), corner);
        assert_eq!(corner.step(Direction::Left), corner);
        assert_eq!(corner.step(Direction::Down), Position::new(1, 0));

        let far = Position::new(7, 7);
        assert_eq!(far.step(Direction::Right), far);
        assert_eq!(far.step(Direction::Down), far);
    }

    #[test]
    fn test_error_display() {
        let err = EngineError::out_of_bounds(Position::new(9, 2));
        assert_eq!(err.to_string(), "position (9, 2) is outside the board");
    }
}
