//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal play: the game view draws a snapshot
//! into a framebuffer, and the renderer flushes framebuffers to the terminal,
//! emitting only what changed since the previous frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_look, GameView, Hud, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};
