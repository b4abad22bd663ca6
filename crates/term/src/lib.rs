//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal play. It avoids
//! widget toolkits and renders into a simple framebuffer that is diffed and
//! flushed to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw straight from a `SessionSnapshot`, never from live board state
//! - Allow precise control over tile proportions (columns per grid unit)

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use mahjong_core as core;
pub use mahjong_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{face_label, GameView, HudState, Theme, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
