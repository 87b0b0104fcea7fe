//! Match detection
//!
//! Scans every row left to right and every column top to bottom, tracking the
//! current run of equal kinds. A run closes on a kind change or at the board
//! edge; runs of `MIN_RUN` or more contribute all of their cells. The union is
//! kept as a bitmask so a cell on both a horizontal and a vertical run is
//! counted once.

use crate::board::Board;
use crate::types::{Position, CELL_COUNT, GRID_SIZE, MIN_RUN};

/// Set of matched positions, one bit per cell (row-major)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MatchSet {
    bits: u64,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `pos`; out-of-bounds positions are ignored
    pub fn insert(&mut self, pos: Position) {
        if let Some(idx) = pos.index() {
            self.bits |= 1 << idx;
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.index().is_some_and(|idx| self.bits & (1 << idx) != 0)
    }

    #[inline(always)]
    pub(crate) fn contains_cell(&self, row: usize, col: usize) -> bool {
        self.bits & (1 << (row * GRID_SIZE + col)) != 0
    }

    /// Number of distinct matched cells
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Matched positions in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        (0..CELL_COUNT)
            .filter(|&idx| self.bits & (1 << idx) != 0)
            .filter_map(Position::from_index)
    }
}

impl FromIterator<Position> for MatchSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut set = MatchSet::new();
        for pos in iter {
            set.insert(pos);
        }
        set
    }
}

/// Find every cell that belongs to a horizontal or vertical run of 3+
pub fn find_matches(board: &Board) -> MatchSet {
    let mut set = MatchSet::new();

    for row in 0..GRID_SIZE {
        scan_line(&mut set, |i| (row, i), |r, c| board.kind_at(r, c));
    }
    for col in 0..GRID_SIZE {
        scan_line(&mut set, |i| (i, col), |r, c| board.kind_at(r, c));
    }

    set
}

/// Whether the board has at least one match (quiescence check)
pub fn has_match(board: &Board) -> bool {
    !find_matches(board).is_empty()
}

/// Single linear pass over one line of the grid
///
/// `cell` maps the offset along the line to (row, col).
fn scan_line<K: PartialEq>(
    set: &mut MatchSet,
    cell: impl Fn(usize) -> (usize, usize),
    kind: impl Fn(usize, usize) -> K,
) {
    let mut run_start = 0;
    for i in 1..=GRID_SIZE {
        let closes = i == GRID_SIZE || {
            let (r0, c0) = cell(run_start);
            let (r1, c1) = cell(i);
            kind(r0, c0) != kind(r1, c1)
        };
        if !closes {
            continue;
        }
        if i - run_start >= MIN_RUN {
            for j in run_start..i {
                let (r, c) = cell(j);
                set.insert(Position::new(r as u8, c as u8));
            }
        }
        run_start = i;
    }
}
