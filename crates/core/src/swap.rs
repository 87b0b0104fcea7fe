//! Swap validation
//!
//! A swap is valid when the board it produces contains at least one match.
//! Validation works on a copy; the caller's board is never touched.

use crate::board::Board;
use crate::matcher::has_match;
use crate::types::{EngineError, Position, GRID_SIZE};

/// Whether swapping `a` and `b` would create a match
///
/// Adjacency is not checked here; the session controller enforces it.
pub fn is_valid_swap(board: &Board, a: Position, b: Position) -> Result<bool, EngineError> {
    let swapped = board.swap_cells(a, b)?;
    Ok(has_match(&swapped))
}

/// First adjacent swap that would create a match
///
/// Scans row-major, trying the right neighbour before the one below.
pub fn find_valid_swap(board: &Board) -> Option<(Position, Position)> {
    let last = GRID_SIZE as u8 - 1;
    for row in 0..=last {
        for col in 0..=last {
            let here = Position::new(row, col);
            let right = (col < last).then(|| Position::new(row, col + 1));
            let down = (row < last).then(|| Position::new(row + 1, col));

            for other in [right, down].into_iter().flatten() {
                if board.get(here).map(|t| t.kind) == board.get(other).map(|t| t.kind) {
                    continue;
                }
                if matches!(is_valid_swap(board, here, other), Ok(true)) {
                    return Some((here, other));
                }
            }
        }
    }
    None
}

/// Whether the player has any move at all
pub fn has_valid_swap(board: &Board) -> bool {
    find_valid_swap(board).is_some()
}
