//! Key mapping from terminal events to commands.

use crate::types::{Direction, GameAction, GameMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Move the board cursor
    Move(Direction),
    /// Select (or swap) the tile under the cursor
    Confirm,
    /// Jump the cursor to a tile that has a valid swap
    Hint,
    /// Phase-level intent forwarded to the engine as-is
    Action(GameAction),
}

/// Map keyboard input to commands.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyCommand> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(KeyCommand::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(KeyCommand::Move(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(KeyCommand::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(KeyCommand::Move(Direction::Down))
        }

        // Selection
        KeyCode::Char(' ') | KeyCode::Enter => Some(KeyCommand::Confirm),
        KeyCode::Char('?') => Some(KeyCommand::Hint),

        // Session
        KeyCode::Char('t') | KeyCode::Char('T') => Some(KeyCommand::Action(GameAction::Start {
            mode: GameMode::Timed,
        })),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(KeyCommand::Action(GameAction::Start {
            mode: GameMode::MoveLimited,
        })),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyCommand::Action(GameAction::PlayAgain)),
        KeyCode::Esc => Some(KeyCommand::Action(GameAction::ReturnToMenu)),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
