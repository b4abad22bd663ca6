//! Key mapping from terminal events to session commands.

use crate::cursor::Direction;
use crate::types::SessionAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the front-end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Move the tile cursor
    Move(Direction),
    /// Click the tile under the cursor
    Select,
    /// Session-level action
    Action(SessionAction),
    /// Show or hide the key help
    Help,
    /// Leave pause or close the help overlay
    Resume,
    /// Turn the bell on or off
    ToggleSound,
    /// Switch to the next table colour
    CycleTheme,
}

/// Map keyboard input to commands.
pub fn handle_key_event(key: KeyEvent) -> Option<InputCommand> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputCommand::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputCommand::Move(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(InputCommand::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(InputCommand::Move(Direction::Down))
        }

        // Click
        KeyCode::Enter | KeyCode::Char('x') | KeyCode::Char('X') => Some(InputCommand::Select),

        // Actions
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
            Some(InputCommand::Action(SessionAction::TogglePause))
        }
        KeyCode::Char('u') | KeyCode::Char('U') => Some(InputCommand::Action(SessionAction::Undo)),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(InputCommand::Action(SessionAction::Hint)),
        KeyCode::Char('m') | KeyCode::Char('M') => {
            Some(InputCommand::Action(SessionAction::Shuffle))
        }
        KeyCode::Char('n') | KeyCode::Char('N') => {
            Some(InputCommand::Action(SessionAction::NewGame))
        }
        KeyCode::Char(']') => Some(InputCommand::Action(SessionAction::NextLayout)),
        KeyCode::Char('[') => Some(InputCommand::Action(SessionAction::PrevLayout)),

        KeyCode::Char('b') | KeyCode::Char('B') => Some(InputCommand::ToggleSound),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(InputCommand::CycleTheme),

        KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') => Some(InputCommand::Help),
        KeyCode::Esc => Some(InputCommand::Resume),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
