//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the Mahjong solitaire rules, the session lifecycle and
//! the settings blob. Apart from [`settings::SettingsStore`] it performs no I/O
//! and knows nothing about terminals, which makes it:
//!
//! - **Deterministic**: Same seed deals the same board
//! - **Testable**: Layouts, catalog and randomness are injected collaborators
//! - **Portable**: Any front-end can drive a [`Session`] and draw its snapshot
//!
//! # Module Structure
//!
//! - [`board`]: tile arena, free-tile rule, matching, undo, shuffle, hints
//! - [`catalog`]: the 144-tile set, match rules and display glyphs
//! - [`layouts`]: built-in layouts (turtle, dragon, castle, pyramid)
//! - [`rng`]: seedable LCG and the [`rng::Shuffler`] seam
//! - [`session`]: idle / running / paused / won / lost lifecycle and clock
//! - [`settings`]: persisted theme, layout, sound flag and best times
//! - [`snapshot`]: render view consumed by front-ends
//!
//! # Game Rules
//!
//! - A tile is **free** when nothing in play rests on it and its left or right
//!   side on the same layer is open
//! - Two free tiles **match** when they are the same kind; any season matches
//!   any season and any flower matches any flower
//! - Removing every tile **wins**; a match that leaves tiles but no free
//!   matching pair **loses** (a reshuffle may bring the game back)
//!
//! # Example
//!
//! ```
//! use mahjong_core::{Session, Settings};
//! use mahjong_types::SessionState;
//!
//! let mut session = Session::with_seed(12345, Settings::default());
//! session.new_game();
//! assert_eq!(session.state(), SessionState::Running);
//! assert_eq!(session.remaining(), 60);
//!
//! // Ask for a hint and play it.
//! if session.hint() {
//!     let pair = session.board().hinted().to_vec();
//!     session.select(pair[0]);
//!     session.select(pair[1]);
//!     assert_eq!(session.remaining(), 58);
//! }
//! ```
//!
//! # Timing
//!
//! Call [`Session::tick`](session::Session::tick) with the wall-clock time
//! elapsed since the last call. Time only counts while the game is running.

pub mod board;
pub mod catalog;
pub mod layouts;
pub mod rng;
pub mod session;
pub mod settings;
pub mod snapshot;

pub use mahjong_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, SelectionOutcome, Tile, MAX_TILES};
pub use catalog::{can_match, generate_tile_set, symbol, symbol_for, StandardCatalog, TileSource};
pub use layouts::{get_layout, BuiltinLayouts, FixedLayout, LayoutName, LayoutSource};
pub use rng::{ScriptedRng, Shuffler, SimpleRng};
pub use session::{format_time, Session};
pub use settings::{Settings, SettingsError, SettingsStore};
pub use snapshot::{Extent, SessionSnapshot, TileView};
