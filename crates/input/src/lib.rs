//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`KeyCommand`]s and keeps the board
//! cursor. Only `Confirm` touches the engine, as a select intent at the
//! cursor; everything else is navigation or a phase-level action.

pub mod cursor;
pub mod map;

pub use tui_match3_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, should_quit, KeyCommand};
