//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the match-3 rules, the session state machine, and the
//! snapshot handed to presentation layers. It has **no dependencies** on UI,
//! terminal, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is a function over a board value
//! - **Portable**: Can drive a terminal, GUI, or headless front end
//!
//! # Module Structure
//!
//! - [`board`]: 8x8 grid of tiles; generation, cloning, swapping
//! - [`matcher`]: Horizontal/vertical run detection
//! - [`swap`]: Swap validation and move search
//! - [`cascade`]: Clear, gravity, refill, rescan until quiescent
//! - [`scoring`]: Points per cascade pass
//! - [`rng`]: Random tiles with unique identities
//! - [`session`]: One game from start to game over
//! - [`game_state`]: The session controller (phases, intents, busy lock)
//! - [`snapshot`]: Outbound observable state
//! - [`config`]: Rule limits and environment overrides
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{GameState, SelectOutcome};
//! use tui_match3_types::{GameMode, GamePhase, Position};
//!
//! let mut game = GameState::with_seed(12345);
//! game.start_game(GameMode::MoveLimited);
//! assert_eq!(game.phase(), GamePhase::Playing);
//! assert_eq!(game.remaining(), 20);
//!
//! // Selecting the first tile never commits anything.
//! let outcome = game.select(Position::new(0, 0));
//! assert_eq!(outcome, SelectOutcome::Selected(Position::new(0, 0)));
//! assert_eq!(game.score(), 0);
//! ```
//!
//! # Timing
//!
//! The engine does not model real time beyond the timed-mode countdown:
//! call [`GameState::tick`](game_state::GameState::tick) with elapsed
//! milliseconds and it spends one second per `TIMER_INTERVAL_MS`. Cascades
//! resolve synchronously; a front end that wants to animate them enables
//! `stage_cascades` and releases the busy lock with `finish_staging`.

pub mod board;
pub mod cascade;
pub mod config;
pub mod game_state;
pub mod matcher;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod swap;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use cascade::{resolve_cascade, resolve_cascade_with_limit, CascadeOutcome, CascadePass};
pub use config::GameConfig;
pub use game_state::{GameState, SelectOutcome, SwapReport};
pub use matcher::{find_matches, has_match, MatchSet};
pub use rng::TileSource;
pub use scoring::pass_score;
pub use session::Session;
pub use snapshot::GameSnapshot;
pub use swap::{find_valid_swap, has_valid_swap, is_valid_swap};
