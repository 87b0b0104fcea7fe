//! Cascade resolution
//!
//! Clear -> gravity -> refill -> rescan, until the board is quiescent.
//!
//! Each pass removes every matched cell at once. Per column, surviving tiles
//! keep their relative order and settle at the bottom; the gap left at the top
//! is filled with fresh random tiles. Fresh tiles can form new matches, so the
//! loop rescans after every pass.
//!
//! Termination is only probabilistic. The loop is bounded by a pass limit; when
//! it trips, the current board is returned as final and a warning is logged.

use arrayvec::ArrayVec;
use tracing::{trace, warn};

use crate::board::Board;
use crate::matcher::{find_matches, MatchSet};
use crate::rng::TileSource;
use crate::scoring::pass_score;
use crate::types::{Tile, CELL_COUNT, GRID_SIZE, MAX_CASCADE_PASSES};

/// One clear-and-refill step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadePass {
    /// Cells cleared in this pass
    pub cleared: MatchSet,
    /// Points awarded for this pass
    pub points: u32,
    /// Board after gravity and refill
    pub board: Board,
}

/// Result of resolving a board to quiescence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeOutcome {
    /// Board the resolver started from
    pub start: Board,
    /// Every pass, in order
    pub passes: Vec<CascadePass>,
    /// Final board (quiescent unless `capped`)
    pub board: Board,
    /// Sum of `points` over all passes
    pub score_delta: u32,
    /// The pass limit was hit before the board settled
    pub capped: bool,
}

impl CascadeOutcome {
    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    /// Total cells cleared across all passes
    pub fn cleared_count(&self) -> usize {
        self.passes.iter().map(|p| p.cleared.len()).sum()
    }
}

/// Resolve with the default pass limit
pub fn resolve_cascade(board: &Board, tiles: &mut TileSource) -> CascadeOutcome {
    resolve_cascade_with_limit(board, tiles, MAX_CASCADE_PASSES)
}

/// Resolve, giving up after `max_passes` passes
pub fn resolve_cascade_with_limit(
    board: &Board,
    tiles: &mut TileSource,
    max_passes: u32,
) -> CascadeOutcome {
    let mut current = board.clone();
    let mut passes = Vec::new();
    let mut score_delta: u32 = 0;
    let mut capped = false;

    loop {
        let cleared = find_matches(&current);
        if cleared.is_empty() {
            break;
        }
        if passes.len() as u32 >= max_passes {
            warn!(
                max_passes,
                pending = cleared.len(),
                "cascade pass limit reached; keeping current board"
            );
            capped = true;
            break;
        }

        let points = pass_score(cleared.len());
        score_delta = score_delta.saturating_add(points);
        current = collapse_and_refill(&current, &cleared, tiles);

        trace!(
            pass = passes.len() + 1,
            cleared = cleared.len(),
            points,
            "cascade pass"
        );
        passes.push(CascadePass {
            cleared,
            points,
            board: current.clone(),
        });
    }

    CascadeOutcome {
        start: board.clone(),
        passes,
        board: current,
        score_delta,
        capped,
    }
}

/// Remove `cleared`, drop survivors to the bottom, refill from the top
///
/// Columns are independent. Survivors keep their top-to-bottom order.
pub fn collapse_and_refill(board: &Board, cleared: &MatchSet, tiles: &mut TileSource) -> Board {
    let mut cells: [Tile; CELL_COUNT] = board.to_cells();

    for col in 0..GRID_SIZE {
        let survivors: ArrayVec<Tile, GRID_SIZE> = (0..GRID_SIZE)
            .filter(|&row| !cleared.contains_cell(row, col))
            .map(|row| board.tile_at(row, col))
            .collect();

        let gap = GRID_SIZE - survivors.len();
        for row in 0..gap {
            cells[row * GRID_SIZE + col] = tiles.next_tile();
        }
        for (offset, tile) in survivors.into_iter().enumerate() {
            cells[(gap + offset) * GRID_SIZE + col] = tile;
        }
    }

    Board::from_cells(cells)
}
