//! Board, matcher and swap rules through the public API

use std::collections::HashSet;

use tui_match3::core::{find_matches, find_valid_swap, has_match, is_valid_swap, Board, TileSource};
use tui_match3::types::{EngineError, Position, TileKind, CELL_COUNT, GRID_SIZE};

type Kinds = [[TileKind; GRID_SIZE]; GRID_SIZE];

/// No two equal neighbours in any row or column
fn quiet_kinds() -> Kinds {
    std::array::from_fn(|r| std::array::from_fn(|c| TileKind::ALL[(r + 2 * c) % 5]))
}

fn board_of(kinds: &Kinds) -> Board {
    Board::from_kinds(kinds, &mut TileSource::seeded(77))
}

#[test]
fn test_generated_board_is_full() {
    let mut tiles = TileSource::seeded(1);
    let board = Board::generate(&mut tiles);

    assert_eq!(board.size(), GRID_SIZE);
    assert_eq!(board.tiles().len(), CELL_COUNT);
    for row in 0..GRID_SIZE as u8 {
        for col in 0..GRID_SIZE as u8 {
            assert!(board.get(Position::new(row, col)).is_some());
        }
    }
    let ids: HashSet<_> = board.tiles().iter().map(|t| t.id).collect();
    assert_eq!(ids.len(), CELL_COUNT);
}

#[test]
fn test_same_seed_same_board() {
    let a = Board::generate(&mut TileSource::seeded(42));
    let b = Board::generate(&mut TileSource::seeded(42));
    assert_eq!(a, b);
}

#[test]
fn test_get_out_of_bounds() {
    let board = board_of(&quiet_kinds());
    assert_eq!(board.get(Position::new(8, 0)), None);
    assert_eq!(board.get(Position::new(0, 8)), None);
}

#[test]
fn test_swap_cells_rejects_off_board() {
    let board = board_of(&quiet_kinds());
    assert_eq!(
        board.swap_cells(Position::new(7, 7), Position::new(7, 8)),
        Err(EngineError::OutOfBounds { row: 7, col: 8 })
    );
}

#[test]
fn test_quiet_board_has_no_matches() {
    let board = board_of(&quiet_kinds());
    assert!(find_matches(&board).is_empty());
    assert!(!has_match(&board));
}

#[test]
fn test_vertical_run_at_bottom_edge() {
    let mut kinds = quiet_kinds();
    for row in 5..8 {
        kinds[row][6] = TileKind::Yellow;
    }
    // The cell above closes the run.
    kinds[4][6] = TileKind::Red;
    let board = board_of(&kinds);

    let matches = find_matches(&board);
    let expected: HashSet<_> = (5..8).map(|r| Position::new(r, 6)).collect();
    let got: HashSet<_> = matches.iter().collect();
    assert_eq!(got, expected);
    assert_eq!(matches.len(), 3);
}

#[test]
fn test_l_shape_counts_shared_cell_once() {
    let mut kinds = quiet_kinds();
    // Row 7, cols 0..3 and column 0, rows 5..8 meet at (7, 0).
    kinds[7][0] = TileKind::Green;
    kinds[7][1] = TileKind::Green;
    kinds[7][2] = TileKind::Green;
    kinds[5][0] = TileKind::Green;
    kinds[6][0] = TileKind::Green;
    let board = board_of(&kinds);

    let matches = find_matches(&board);
    assert!(matches.contains(Position::new(7, 0)));
    assert!(matches.contains(Position::new(5, 0)));
    assert!(matches.contains(Position::new(7, 2)));
    assert_eq!(
        matches.len(),
        matches.iter().collect::<HashSet<_>>().len(),
        "match set has no duplicates"
    );
}

#[test]
fn test_swap_validation() {
    let mut kinds = quiet_kinds();
    kinds[0][0] = TileKind::Red;
    kinds[0][1] = TileKind::Red;
    kinds[0][3] = TileKind::Red;
    let board = board_of(&kinds);
    let before = board.clone();

    // Bringing (0,3) into (0,2) completes R R R.
    assert_eq!(is_valid_swap(&board, Position::new(0, 2), Position::new(0, 3)), Ok(true));
    // Adjacency is left to the controller; a distant red also completes the run.
    assert_eq!(is_valid_swap(&board, Position::new(0, 2), Position::new(2, 4)), Ok(true));
    // Adjacent but no run.
    assert_eq!(is_valid_swap(&board, Position::new(4, 4), Position::new(4, 5)), Ok(false));
    // Off board.
    assert!(is_valid_swap(&board, Position::new(0, 7), Position::new(0, 8)).is_err());

    assert_eq!(board, before, "validation never mutates the board");
}

#[test]
fn test_find_valid_swap_points_at_a_real_move() {
    let mut kinds = quiet_kinds();
    kinds[0][0] = TileKind::Red;
    kinds[0][1] = TileKind::Red;
    kinds[0][3] = TileKind::Red;
    let board = board_of(&kinds);

    let (a, b) = find_valid_swap(&board).expect("layout has a move");
    assert!(a.is_adjacent(b));
    assert_eq!(is_valid_swap(&board, a, b), Ok(true));

    assert_eq!(find_valid_swap(&board_of(&quiet_kinds())), None);
}
