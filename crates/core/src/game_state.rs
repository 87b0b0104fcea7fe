//! Game state module - the session controller
//!
//! Owns the tile source, the optional current session, and the busy lock. All
//! player intents enter here; the board, matcher, and cascade modules are
//! called as pure functions over snapshots of the session's board.
//!
//! Phase is derived from the session: no session means `Menu`, a terminal
//! session means `GameOver`, anything else is `Playing`.

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::cascade::{resolve_cascade_with_limit, CascadeOutcome};
use crate::config::GameConfig;
use crate::rng::TileSource;
use crate::session::Session;
use crate::snapshot::GameSnapshot;
use crate::matcher::has_match;
use crate::swap::has_valid_swap;
use crate::types::{GameAction, GameMode, GamePhase, Position};

/// Attempts at regenerating a board that has no valid swap
const STUCK_BOARD_RETRIES: u32 = 32;

/// What a select intent did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Intent dropped: not playing, busy, or off the board
    Ignored,
    /// First tile selected (or selection moved to a non-adjacent tile)
    Selected(Position),
    /// The selected tile was picked again and released
    Deselected,
    /// Adjacent swap that would not match; selection cleared
    Rejected,
    /// Swap committed and resolved
    Swapped(SwapReport),
}

/// Effects of a committed swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReport {
    pub from: Position,
    pub to: Position,
    pub score_delta: u32,
    pub passes: usize,
    /// Cells cleared over all passes
    pub cleared: usize,
    /// The settled board had no move left and was replaced
    pub regenerated: bool,
    pub game_over: bool,
}

/// Complete controller state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    tiles: TileSource,
    session: Option<Session>,
    /// Mode of the most recent session (for play-again)
    last_mode: Option<GameMode>,
    /// Cascade held for presentation while the busy lock is set
    staged: Option<CascadeOutcome>,
    busy: bool,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        let tiles = TileSource::new(config.seed);
        Self {
            config,
            tiles,
            session: None,
            last_mode: None,
            staged: None,
            busy: false,
        }
    }

    /// Default rules with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameConfig::seeded(seed))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        match &self.session {
            None => GamePhase::Menu,
            Some(s) if s.terminal => GamePhase::GameOver,
            Some(_) => GamePhase::Playing,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn board(&self) -> Option<&Board> {
        self.session.as_ref().map(|s| &s.board)
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.session.as_ref().map(|s| s.mode)
    }

    pub fn score(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.score)
    }

    pub fn remaining(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.remaining)
    }

    pub fn selection(&self) -> Option<Position> {
        self.session.as_ref().and_then(|s| s.selection)
    }

    /// Whether select intents are currently dropped
    pub fn busy(&self) -> bool {
        self.busy
    }

    /// Cascade awaiting presentation, if any
    pub fn staged_cascade(&self) -> Option<&CascadeOutcome> {
        self.staged.as_ref()
    }

    /// Start a new session. Valid from `Menu` or `GameOver`.
    pub fn start_game(&mut self, mode: GameMode) -> bool {
        if self.phase() == GamePhase::Playing {
            return false;
        }

        let board = self.fresh_board();
        let remaining = self.config.starting_remaining(mode);
        self.session = Some(Session::new(mode, remaining, board));
        self.last_mode = Some(mode);
        self.release_lock();

        info!(mode = mode.as_str(), remaining, "game started");
        true
    }

    /// Restart with the previous session's mode. Valid from `GameOver`.
    pub fn play_again(&mut self) -> bool {
        if self.phase() != GamePhase::GameOver {
            return false;
        }
        match self.last_mode {
            Some(mode) => self.start_game(mode),
            None => false,
        }
    }

    /// Discard the session. Valid from `Playing` or `GameOver`.
    pub fn return_to_menu(&mut self) -> bool {
        if self.session.take().is_none() {
            return false;
        }
        self.release_lock();
        debug!("returned to menu");
        true
    }

    /// Select a tile, or swap it with the current selection
    pub fn select(&mut self, pos: Position) -> SelectOutcome {
        if self.busy || self.phase() != GamePhase::Playing || !pos.in_bounds() {
            return SelectOutcome::Ignored;
        }
        let Some(session) = self.session.as_mut() else {
            return SelectOutcome::Ignored;
        };

        let first = match session.selection {
            None => {
                session.selection = Some(pos);
                return SelectOutcome::Selected(pos);
            }
            Some(first) if first == pos => {
                session.selection = None;
                return SelectOutcome::Deselected;
            }
            Some(first) if !first.is_adjacent(pos) => {
                session.selection = Some(pos);
                return SelectOutcome::Selected(pos);
            }
            Some(first) => first,
        };

        // Both positions are on the board here.
        let Ok(swapped) = session.board.swap_cells(first, pos) else {
            return SelectOutcome::Ignored;
        };
        if !has_match(&swapped) {
            session.selection = None;
            debug!(?first, ?pos, "swap rejected");
            return SelectOutcome::Rejected;
        }

        self.commit_swap(first, pos, swapped)
    }

    /// Advance the countdown. The busy lock does not pause it.
    ///
    /// Returns true if the visible state changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase() != GamePhase::Playing {
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let steps = session.advance_clock(elapsed_ms);
        if session.terminal {
            info!(score = session.score, "time up");
        }
        steps > 0
    }

    /// Release the busy lock after the presenter has shown the cascade
    pub fn finish_staging(&mut self) -> Option<CascadeOutcome> {
        let staged = self.staged.take();
        self.busy = false;
        staged
    }

    /// Dispatch an intent
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start { mode } => self.start_game(mode),
            GameAction::Select { position } => self.select(position) != SelectOutcome::Ignored,
            GameAction::PlayAgain => self.play_again(),
            GameAction::ReturnToMenu => self.return_to_menu(),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.phase = self.phase();
        out.busy = self.busy;
        match &self.session {
            Some(s) => {
                out.mode = Some(s.mode);
                out.score = s.score;
                out.remaining = s.remaining;
                out.selection = s.selection;
                match &mut out.board {
                    Some(grid) => s.board.write_grid(grid),
                    None => out.board = Some(s.board.to_grid()),
                }
            }
            None => {
                out.mode = None;
                out.score = 0;
                out.remaining = 0;
                out.selection = None;
                out.board = None;
            }
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn commit_swap(&mut self, from: Position, to: Position, swapped: Board) -> SelectOutcome {
        let outcome = resolve_cascade_with_limit(
            &swapped,
            &mut self.tiles,
            self.config.max_cascade_passes,
        );
        let score_delta = outcome.score_delta;
        let passes = outcome.pass_count();
        let cleared = outcome.cleared_count();

        let (settled, regenerated) = self.settle_playable(outcome.board.clone());

        let Some(session) = self.session.as_mut() else {
            return SelectOutcome::Ignored;
        };
        session.commit(settled, score_delta);
        let game_over = session.terminal;

        debug!(
            ?from,
            ?to,
            score_delta,
            passes,
            score = session.score,
            remaining = session.remaining,
            "swap committed"
        );
        if game_over {
            info!(score = session.score, "out of moves");
        }

        if self.config.stage_cascades {
            self.staged = Some(outcome);
            self.busy = true;
        }

        SelectOutcome::Swapped(SwapReport {
            from,
            to,
            score_delta,
            passes,
            cleared,
            regenerated,
            game_over,
        })
    }

    /// Keep `board` if it has a move, otherwise swap in a fresh one
    ///
    /// Returns the playable board and whether it was regenerated. No score is
    /// awarded for the replacement's pre-clear.
    fn settle_playable(&mut self, board: Board) -> (Board, bool) {
        if has_valid_swap(&board) {
            return (board, false);
        }
        warn!("no valid swap left; regenerating board");
        (self.fresh_board(), true)
    }

    /// Generate and pre-resolve a board the player can move on
    ///
    /// Score from the pre-clear is discarded.
    fn fresh_board(&mut self) -> Board {
        let mut board = self.settled_board();
        for _ in 0..STUCK_BOARD_RETRIES {
            if has_valid_swap(&board) {
                break;
            }
            board = self.settled_board();
        }
        board
    }

    fn settled_board(&mut self) -> Board {
        let generated = Board::generate(&mut self.tiles);
        let outcome =
            resolve_cascade_with_limit(&generated, &mut self.tiles, self.config.max_cascade_passes);
        debug!(
            passes = outcome.pass_count(),
            discarded = outcome.score_delta,
            "initial board settled"
        );
        outcome.board
    }

    fn release_lock(&mut self) {
        self.staged = None;
        self.busy = false;
    }

    #[cfg(test)]
    pub(crate) fn install_board(&mut self, board: Board) {
        if let Some(session) = self.session.as_mut() {
            session.board = board;
        }
    }

    #[cfg(test)]
    pub(crate) fn tiles_mut(&mut self) -> &mut TileSource {
        &mut self.tiles
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TileKind, GRID_SIZE};

    fn quiet_kinds() -> [[TileKind; GRID_SIZE]; GRID_SIZE] {
        std::array::from_fn(|r| std::array::from_fn(|c| TileKind::ALL[(r + 2 * c) % 5]))
    }

    /// Swapping (0,2) and (0,3) lines up three reds in row 0.
    fn one_move_kinds() -> [[TileKind; GRID_SIZE]; GRID_SIZE] {
        let mut kinds = quiet_kinds();
        kinds[0][0] = TileKind::Red;
        kinds[0][1] = TileKind::Red;
        kinds[0][3] = TileKind::Red;
        kinds
    }

    const A: Position = Position::new(0, 2);
    const B: Position = Position::new(0, 3);

    fn playing(mode: GameMode, config: GameConfig) -> GameState {
        let mut state = GameState::new(config);
        assert!(state.start_game(mode));
        let board = Board::from_kinds(&one_move_kinds(), state.tiles_mut());
        state.install_board(board);
        state
    }

    fn reinstall(state: &mut GameState) {
        let board = Board::from_kinds(&one_move_kinds(), state.tiles_mut());
        state.install_board(board);
    }

    #[test]
    fn test_new_state_is_menu() {
        let state = GameState::with_seed(1);
        assert_eq!(state.phase(), GamePhase::Menu);
        assert!(state.session().is_none());
        assert!(!state.busy());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_start_game_sets_up_quiescent_board() {
        let mut state = GameState::with_seed(12345);
        assert!(state.start_game(GameMode::MoveLimited));

        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.remaining(), 20);
        // Pre-clear points never reach the visible score.
        assert_eq!(state.score(), 0);
        assert_eq!(state.selection(), None);
        let board = state.board().unwrap();
        assert!(!has_match(board));
        assert!(has_valid_swap(board));
    }

    #[test]
    fn test_start_rejected_while_playing() {
        let mut state = GameState::with_seed(1);
        assert!(state.start_game(GameMode::Timed));
        assert!(!state.start_game(GameMode::MoveLimited));
        assert_eq!(state.mode(), Some(GameMode::Timed));
    }

    #[test]
    fn test_select_then_deselect() {
        let mut state = playing(GameMode::MoveLimited, GameConfig::seeded(1));
        assert_eq!(state.select(A), SelectOutcome::Selected(A));
        assert_eq!(state.selection(), Some(A));
        assert_eq!(state.select(A), SelectOutcome::Deselected);
        assert_eq!(state.selection(), None);
    }

    #[test]
    fn test_non_adjacent_moves_selection() {
        let mut state = playing(GameMode::MoveLimited, GameConfig::seeded(1));
        let far = Position::new(5, 5);
        state.select(A);
        assert_eq!(state.select(far), SelectOutcome::Selected(far));
        assert_eq!(state.selection(), Some(far));
        assert_eq!(state.remaining(), 20);
    }

    #[test]
    fn test_rejected_swap_changes_nothing_but_selection() {
        let mut state = playing(GameMode::MoveLimited, GameConfig::seeded(1));
        let quiet = Board::from_kinds(&quiet_kinds(), state.tiles_mut());
        state.install_board(quiet.clone());

        state.select(Position::new(4, 4));
        assert_eq!(state.select(Position::new(4, 5)), SelectOutcome::Rejected);
        assert_eq!(state.selection(), None);
        assert_eq!(state.score(), 0);
        assert_eq!(state.remaining(), 20);
        assert_eq!(state.board(), Some(&quiet));
    }

    #[test]
    fn test_valid_swap_scores_and_spends_move() {
        let mut state = playing(GameMode::MoveLimited, GameConfig::seeded(1));
        state.select(A);
        let outcome = state.select(B);

        let SelectOutcome::Swapped(report) = outcome else {
            panic!("expected a committed swap, got {outcome:?}");
        };
        assert!(report.score_delta >= 30);
        assert!(report.passes >= 1);
        assert_eq!(state.score(), report.score_delta);
        assert_eq!(state.remaining(), 19);
        assert_eq!(state.selection(), None);
        assert!(!has_match(state.board().unwrap()));
        assert!(!state.busy());
    }

    #[test]
    fn test_twenty_swaps_end_move_limited_game() {
        let mut state = playing(GameMode::MoveLimited, GameConfig::seeded(7));
        for n in 1..=20u32 {
            reinstall(&mut state);
            state.select(A);
            assert!(matches!(state.select(B), SelectOutcome::Swapped(_)));
            assert_eq!(state.remaining(), 20 - n);
        }
        assert_eq!(state.phase(), GamePhase::GameOver);

        // Further intents are ignored.
        assert_eq!(state.select(A), SelectOutcome::Ignored);
    }

    #[test]
    fn test_stuck_board_is_regenerated() {
        let mut state = playing(GameMode::MoveLimited, GameConfig::seeded(6));
        let stuck = Board::from_kinds(&quiet_kinds(), state.tiles_mut());
        assert!(!has_valid_swap(&stuck));

        let (board, regenerated) = state.settle_playable(stuck.clone());
        assert!(regenerated);
        assert_ne!(board, stuck);
        assert!(has_valid_swap(&board));
        assert!(!has_match(&board));
        assert_eq!(state.score(), 0);
        assert_eq!(state.remaining(), 20);
    }

    #[test]
    fn test_playable_board_is_kept() {
        let mut state = playing(GameMode::MoveLimited, GameConfig::seeded(6));
        let movable = Board::from_kinds(&one_move_kinds(), state.tiles_mut());

        let (board, regenerated) = state.settle_playable(movable.clone());
        assert!(!regenerated);
        assert_eq!(board, movable);
    }

    #[test]
    fn test_swap_report_counts_cleared_cells() {
        let mut state = playing(GameMode::MoveLimited, GameConfig::seeded(1));
        state.select(A);
        let SelectOutcome::Swapped(report) = state.select(B) else {
            panic!("expected a committed swap");
        };
        assert!(report.cleared >= 3);
        assert!(has_valid_swap(state.board().unwrap()));
    }

    #[test]
    fn test_timed_game_ends_after_sixty_ticks() {
        let mut state = GameState::with_seed(3);
        state.start_game(GameMode::Timed);
        assert_eq!(state.remaining(), 60);

        for _ in 0..59 {
            assert!(state.tick(1000));
        }
        assert_eq!(state.phase(), GamePhase::Playing);
        assert!(state.tick(1000));
        assert_eq!(state.remaining(), 0);
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert!(!state.tick(1000));
    }

    #[test]
    fn test_timed_swap_does_not_spend_time() {
        let mut state = playing(GameMode::Timed, GameConfig::seeded(2));
        state.select(A);
        assert!(matches!(state.select(B), SelectOutcome::Swapped(_)));
        assert_eq!(state.remaining(), 60);
    }

    #[test]
    fn test_staging_holds_busy_lock() {
        let config = GameConfig {
            stage_cascades: true,
            ..GameConfig::seeded(5)
        };
        let mut state = playing(GameMode::Timed, config);
        state.select(A);
        let SelectOutcome::Swapped(report) = state.select(B) else {
            panic!("expected a committed swap");
        };

        assert!(state.busy());
        let staged = state.staged_cascade().expect("cascade staged");
        assert_eq!(staged.score_delta, report.score_delta);
        // Effects are already applied while busy.
        assert_eq!(state.score(), report.score_delta);

        // Intents are dropped, the clock keeps running.
        assert_eq!(state.select(Position::new(1, 1)), SelectOutcome::Ignored);
        assert_eq!(state.selection(), None);
        assert!(state.tick(1000));
        assert_eq!(state.remaining(), 59);

        assert!(state.finish_staging().is_some());
        assert!(!state.busy());
        assert_eq!(
            state.select(Position::new(1, 1)),
            SelectOutcome::Selected(Position::new(1, 1))
        );
    }

    #[test]
    fn test_return_to_menu_and_play_again() {
        let mut state = GameState::with_seed(9);
        assert!(!state.return_to_menu());
        assert!(!state.play_again());

        state.start_game(GameMode::Timed);
        assert!(!state.play_again());
        assert!(state.tick(60_000));
        assert_eq!(state.phase(), GamePhase::GameOver);

        assert!(state.play_again());
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.mode(), Some(GameMode::Timed));
        assert_eq!(state.remaining(), 60);
        assert_eq!(state.score(), 0);

        assert!(state.return_to_menu());
        assert_eq!(state.phase(), GamePhase::Menu);
        assert!(state.board().is_none());
    }

    #[test]
    fn test_out_of_bounds_select_is_ignored() {
        let mut state = playing(GameMode::MoveLimited, GameConfig::seeded(1));
        assert_eq!(state.select(Position::new(8, 0)), SelectOutcome::Ignored);
        assert_eq!(state.selection(), None);
    }

    #[test]
    fn test_select_in_menu_is_ignored() {
        let mut state = GameState::with_seed(1);
        assert_eq!(state.select(A), SelectOutcome::Ignored);
    }

    #[test]
    fn test_apply_action_dispatch() {
        let mut state = GameState::with_seed(4);
        assert!(state.apply_action(GameAction::Start {
            mode: GameMode::MoveLimited
        }));
        assert!(state.apply_action(GameAction::Select { position: A }));
        assert_eq!(state.selection(), Some(A));
        assert!(state.apply_action(GameAction::ReturnToMenu));
        assert_eq!(state.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_snapshot_reflects_session() {
        let mut state = playing(GameMode::MoveLimited, GameConfig::seeded(1));
        state.select(A);
        let snap = state.snapshot();

        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.mode, Some(GameMode::MoveLimited));
        assert_eq!(snap.remaining, 20);
        assert_eq!(snap.selection, Some(A));
        assert_eq!(snap.board, Some(state.board().unwrap().to_grid()));

        state.return_to_menu();
        let mut reused = snap;
        state.snapshot_into(&mut reused);
        assert_eq!(reused, GameSnapshot::default());
    }
}
