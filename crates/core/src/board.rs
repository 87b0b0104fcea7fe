//! Board module - the candy grid
//!
//! The board is an 8x8 grid where every cell always holds exactly one tile.
//! Uses a flat row-major array for cache locality; index = row * GRID_SIZE + col.
//!
//! Boards are values: operations that change the layout return a new board and
//! leave the receiver untouched, so a caller can hold on to the previous state
//! (for staging or for validation) without worrying about aliasing.

use crate::rng::TileSource;
use crate::types::{EngineError, Position, Tile, TileKind, CELL_COUNT, GRID_SIZE};

/// The game board - GRID_SIZE x GRID_SIZE tiles in flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of tiles, row-major order (row * GRID_SIZE + col)
    cells: [Tile; CELL_COUNT],
}

impl Board {
    /// Fill every cell with an independently drawn random tile
    ///
    /// Initial matches are allowed; the cascade resolver clears them.
    pub fn generate(tiles: &mut TileSource) -> Self {
        Self {
            cells: std::array::from_fn(|_| tiles.next_tile()),
        }
    }

    /// Build a board from an explicit kind layout, with fresh ids
    pub fn from_kinds(kinds: &[[TileKind; GRID_SIZE]; GRID_SIZE], tiles: &mut TileSource) -> Self {
        Self {
            cells: std::array::from_fn(|idx| tiles.tile_of(kinds[idx / GRID_SIZE][idx % GRID_SIZE])),
        }
    }

    pub(crate) fn from_cells(cells: [Tile; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub(crate) fn to_cells(&self) -> [Tile; CELL_COUNT] {
        self.cells
    }

    /// Board side length
    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    /// Get tile at `pos`, `None` if out of bounds
    pub fn get(&self, pos: Position) -> Option<Tile> {
        pos.index().map(|idx| self.cells[idx])
    }

    /// Kind at (row, col); callers guarantee bounds
    #[inline(always)]
    pub(crate) fn kind_at(&self, row: usize, col: usize) -> TileKind {
        self.cells[row * GRID_SIZE + col].kind
    }

    #[inline(always)]
    pub(crate) fn tile_at(&self, row: usize, col: usize) -> Tile {
        self.cells[row * GRID_SIZE + col]
    }

    /// Return a copy with the tiles at `a` and `b` exchanged
    ///
    /// The receiver is left unmodified. Either position being off the board is
    /// a precondition violation.
    pub fn swap_cells(&self, a: Position, b: Position) -> Result<Board, EngineError> {
        let ia = a.index().ok_or(EngineError::out_of_bounds(a))?;
        let ib = b.index().ok_or(EngineError::out_of_bounds(b))?;

        let mut next = self.clone();
        next.cells.swap(ia, ib);
        Ok(next)
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> &[Tile] {
        &self.cells
    }

    /// Tiles of one row, left to right
    pub fn row(&self, row: usize) -> &[Tile] {
        let start = row * GRID_SIZE;
        &self.cells[start..start + GRID_SIZE]
    }

    /// Copy tiles into a 2D grid (renderers and snapshots)
    pub fn write_grid(&self, out: &mut [[Tile; GRID_SIZE]; GRID_SIZE]) {
        for (row, out_row) in out.iter_mut().enumerate() {
            out_row.copy_from_slice(self.row(row));
        }
    }

    pub fn to_grid(&self) -> [[Tile; GRID_SIZE]; GRID_SIZE] {
        let mut grid = [[self.cells[0]; GRID_SIZE]; GRID_SIZE];
        self.write_grid(&mut grid);
        grid
    }

    /// Kind layout, row-major
    pub fn to_kinds(&self) -> [[TileKind; GRID_SIZE]; GRID_SIZE] {
        std::array::from_fn(|row| std::array::from_fn(|col| self.kind_at(row, col)))
    }
}
