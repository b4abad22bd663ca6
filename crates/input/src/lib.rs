//! Terminal input module (session-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`InputCommand`]s and keeps a keyboard cursor that walks between
//! the tiles still on the board.

pub mod cursor;
pub mod map;

pub use mahjong_types as types;

pub use cursor::{Direction, TileCursor};
pub use map::{handle_key_event, should_quit, InputCommand};
