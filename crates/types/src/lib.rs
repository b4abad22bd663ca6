//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (rules engine, session control, terminal rendering).
//!
//! # Grid Coordinates
//!
//! Tile positions live on a 3D integer grid:
//!
//! - **x / y**: 2 units per tile width, so horizontally adjacent tiles differ by exactly 2
//! - **z**: stacking layer, 0 is the table
//!
//! A half-offset tile (odd x or y) still overlaps the tiles within 1 unit of it.
//!
//! # Tile Set
//!
//! | Family | Kinds | Copies |
//! |--------|-------|--------|
//! | Dots, Bamboo, Characters | 9 each | 4 |
//! | Winds | 4 | 4 |
//! | Dragons | 3 | 4 |
//! | Seasons | 4 | 1 |
//! | Flowers | 4 | 1 |
//!
//! 34 standard kinds × 4 + 8 special kinds × 1 = 144 tiles.
//!
//! # Examples
//!
//! ```
//! use mahjong_types::{TileKind, Suit, Wind, SessionAction};
//!
//! let kind = TileKind::from_str("do3").unwrap();
//! assert_eq!(kind, TileKind::Suited(Suit::Dots, 3));
//! assert_eq!(kind.short_name(), "do3");
//!
//! assert_eq!(TileKind::from_str("wi_east"), Some(TileKind::Wind(Wind::East)));
//! assert_eq!(TileKind::from_str("nonsense"), None);
//!
//! assert_eq!(SessionAction::from_str("undo"), Some(SessionAction::Undo));
//! ```

use std::fmt;

/// Number of tiles in a full catalog.
pub const TILE_SET_SIZE: usize = 144;

/// Copies of each standard kind.
pub const STANDARD_COPIES: u8 = 4;

/// Grid units between the centres of two side-by-side tiles.
pub const GRID_STEP: i16 = 2;

/// Session clock granularity in milliseconds (1 second display refresh).
pub const TICK_MS: u32 = 1000;

/// Input poll cadence of the terminal loop in milliseconds.
pub const FRAME_MS: u32 = 50;

/// How long a feedback message ("MATCH", "BLOCKED", ...) stays on screen.
pub const FLASH_MS: u32 = 1200;

/// Glyph shown for a kind the catalog does not know.
pub const PLACEHOLDER_GLYPH: char = '🀫';


/// The three numbered suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Dots,
    Bamboo,
    Characters,
}

impl Suit {
    pub const ALL: [Suit; 3] = [Suit::Dots, Suit::Bamboo, Suit::Characters];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Wind {
    East,
    South,
    West,
    North,
}

impl Wind {
    pub const ALL: [Wind; 4] = [Wind::East, Wind::South, Wind::West, Wind::North];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dragon {
    Red,
    Green,
    White,
}

impl Dragon {
    pub const ALL: [Dragon; 3] = [Dragon::Red, Dragon::Green, Dragon::White];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flower {
    Plum,
    Orchid,
    Chrysanthemum,
    Bamboo,
}

impl Flower {
    pub const ALL: [Flower; 4] = [
        Flower::Plum,
        Flower::Orchid,
        Flower::Chrysanthemum,
        Flower::Bamboo,
    ];
}

/// Kind of a tile - what it shows and what it matches.
///
/// Suited ranks are 1..=9. A rank outside that range is representable but is
/// not a catalog kind; [`TileKind::is_valid`] reports it and the catalog shows
/// the placeholder glyph for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileKind {
    Suited(Suit, u8),
    Wind(Wind),
    Dragon(Dragon),
    Season(Season),
    Flower(Flower),
}

impl TileKind {
    /// All 42 catalog kinds, standard kinds first, in catalog order.
    pub const ALL: [TileKind; 42] = [
        TileKind::Suited(Suit::Dots, 1),
        TileKind::Suited(Suit::Dots, 2),
        TileKind::Suited(Suit::Dots, 3),
        TileKind::Suited(Suit::Dots, 4),
        TileKind::Suited(Suit::Dots, 5),
        TileKind::Suited(Suit::Dots, 6),
        TileKind::Suited(Suit::Dots, 7),
        TileKind::Suited(Suit::Dots, 8),
        TileKind::Suited(Suit::Dots, 9),
        TileKind::Suited(Suit::Bamboo, 1),
        TileKind::Suited(Suit::Bamboo, 2),
        TileKind::Suited(Suit::Bamboo, 3),
        TileKind::Suited(Suit::Bamboo, 4),
        TileKind::Suited(Suit::Bamboo, 5),
        TileKind::Suited(Suit::Bamboo, 6),
        TileKind::Suited(Suit::Bamboo, 7),
        TileKind::Suited(Suit::Bamboo, 8),
        TileKind::Suited(Suit::Bamboo, 9),
        TileKind::Suited(Suit::Characters, 1),
        TileKind::Suited(Suit::Characters, 2),
        TileKind::Suited(Suit::Characters, 3),
        TileKind::Suited(Suit::Characters, 4),
        TileKind::Suited(Suit::Characters, 5),
        TileKind::Suited(Suit::Characters, 6),
        TileKind::Suited(Suit::Characters, 7),
        TileKind::Suited(Suit::Characters, 8),
        TileKind::Suited(Suit::Characters, 9),
        TileKind::Wind(Wind::East),
        TileKind::Wind(Wind::South),
        TileKind::Wind(Wind::West),
        TileKind::Wind(Wind::North),
        TileKind::Dragon(Dragon::Red),
        TileKind::Dragon(Dragon::Green),
        TileKind::Dragon(Dragon::White),
        TileKind::Season(Season::Spring),
        TileKind::Season(Season::Summer),
        TileKind::Season(Season::Fall),
        TileKind::Season(Season::Winter),
        TileKind::Flower(Flower::Plum),
        TileKind::Flower(Flower::Orchid),
        TileKind::Flower(Flower::Chrysanthemum),
        TileKind::Flower(Flower::Bamboo),
    ];

    /// Parse a kind from its short name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use mahjong_types::{TileKind, Dragon, Flower};
    ///
    /// assert_eq!(TileKind::from_str("dr_red"), Some(TileKind::Dragon(Dragon::Red)));
    /// assert_eq!(TileKind::from_str("FL_PLUM"), Some(TileKind::Flower(Flower::Plum)));
    /// assert_eq!(TileKind::from_str("do0"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.short_name() == lower)
    }

    /// Short identifier, e.g. `do1`, `wi_east`, `se_spring`.
    ///
    /// Out-of-range suited ranks render as `??`.
    pub fn short_name(&self) -> &'static str {
        const DOTS: [&str; 9] = ["do1", "do2", "do3", "do4", "do5", "do6", "do7", "do8", "do9"];
        const BAMBOO: [&str; 9] = ["ba1", "ba2", "ba3", "ba4", "ba5", "ba6", "ba7", "ba8", "ba9"];
        const CHARS: [&str; 9] = ["ch1", "ch2", "ch3", "ch4", "ch5", "ch6", "ch7", "ch8", "ch9"];

        match *self {
            TileKind::Suited(suit, rank) => {
                let table = match suit {
                    Suit::Dots => &DOTS,
                    Suit::Bamboo => &BAMBOO,
                    Suit::Characters => &CHARS,
                };
                match rank {
                    1..=9 => table[(rank - 1) as usize],
                    _ => "??",
                }
            }
            TileKind::Wind(Wind::East) => "wi_east",
            TileKind::Wind(Wind::South) => "wi_south",
            TileKind::Wind(Wind::West) => "wi_west",
            TileKind::Wind(Wind::North) => "wi_north",
            TileKind::Dragon(Dragon::Red) => "dr_red",
            TileKind::Dragon(Dragon::Green) => "dr_green",
            TileKind::Dragon(Dragon::White) => "dr_white",
            TileKind::Season(Season::Spring) => "se_spring",
            TileKind::Season(Season::Summer) => "se_summer",
            TileKind::Season(Season::Fall) => "se_fall",
            TileKind::Season(Season::Winter) => "se_winter",
            TileKind::Flower(Flower::Plum) => "fl_plum",
            TileKind::Flower(Flower::Orchid) => "fl_orchid",
            TileKind::Flower(Flower::Chrysanthemum) => "fl_chrysanthemum",
            TileKind::Flower(Flower::Bamboo) => "fl_bamboo",
        }
    }

    /// True for kinds that exist in the catalog.
    pub fn is_valid(&self) -> bool {
        match *self {
            TileKind::Suited(_, rank) => (1..=9).contains(&rank),
            _ => true,
        }
    }

    /// Seasons and flowers: one copy each in the catalog.
    pub fn is_special(&self) -> bool {
        matches!(self, TileKind::Season(_) | TileKind::Flower(_))
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Unique identity of a physical tile: its kind plus which copy it is.
///
/// Special kinds have a single copy and display without the copy suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId {
    pub kind: TileKind,
    pub copy: u8,
}

impl TileId {
    pub fn new(kind: TileKind, copy: u8) -> Self {
        Self { kind, copy }
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_special() {
            write!(f, "{}", self.kind.short_name())
        } else {
            write!(f, "{}_{}", self.kind.short_name(), self.copy)
        }
    }
}

/// Grid position of a tile slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Drawing order: bottom layer first, then top-to-bottom rows, then left-to-right.
    pub fn render_key(&self) -> (i16, i16, i16) {
        (self.z, self.y, self.x)
    }
}

/// Opaque handle to a tile slot on a board.
///
/// Handles are only meaningful for the board that issued them and become
/// stale when that board is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileRef(pub u16);

impl TileRef {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Feedback event produced by a board interaction.
///
/// The front-end maps these to sound and visual cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardEvent {
    /// Clicked a picked or blocked tile
    Invalid,
    /// Selection changed (including toggling it off)
    Select,
    /// A pair was removed
    Match,
    /// No tiles remain
    Won,
    /// Tiles remain but no free pair matches
    Lost,
}

impl BoardEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardEvent::Invalid => "invalid",
            BoardEvent::Select => "select",
            BoardEvent::Match => "match",
            BoardEvent::Won => "won",
            BoardEvent::Lost => "lost",
        }
    }

    /// Whether the event ends the game.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BoardEvent::Won | BoardEvent::Lost)
    }
}

/// Lifecycle state of a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    Paused,
    Won,
    Lost,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Running => "running",
            SessionState::Paused => "paused",
            SessionState::Won => "won",
            SessionState::Lost => "lost",
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, SessionState::Won | SessionState::Lost)
    }
}

/// Session-level actions that can be applied from any front-end.
///
/// Tile clicks are not actions; they go through `Session::select` with a
/// [`TileRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// Deal a fresh board on the current layout
    NewGame,
    /// Pause when running, resume when paused
    TogglePause,
    /// Put back the last removed pair
    Undo,
    /// Redistribute the remaining tiles
    Shuffle,
    /// Highlight one matching free pair
    Hint,
    /// Switch to the next layout (restarts a game in progress)
    NextLayout,
    /// Switch to the previous layout
    PrevLayout,
}

impl SessionAction {
    /// Parse action from string (case-insensitive camelCase)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "newgame" => Some(SessionAction::NewGame),
            "togglepause" | "pause" => Some(SessionAction::TogglePause),
            "undo" => Some(SessionAction::Undo),
            "shuffle" => Some(SessionAction::Shuffle),
            "hint" => Some(SessionAction::Hint),
            "nextlayout" => Some(SessionAction::NextLayout),
            "prevlayout" => Some(SessionAction::PrevLayout),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionAction::NewGame => "newGame",
            SessionAction::TogglePause => "togglePause",
            SessionAction::Undo => "undo",
            SessionAction::Shuffle => "shuffle",
            SessionAction::Hint => "hint",
            SessionAction::NextLayout => "nextLayout",
            SessionAction::PrevLayout => "prevLayout",
        }
    }
}
