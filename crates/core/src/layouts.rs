//! Layout module - named 3D tile arrangements
//!
//! Every layout is a fixed, hand-authored point set on a 2-unit grid: tiles that
//! sit side by side differ by exactly 2 in x (or y). The free-tile rule in
//! [`crate::board`] relies on that spacing.
//!
//! Layouts are pure data. Unknown names fall back to the turtle.

use crate::types::Position;

/// Layer patterns for the dragon, one row per y, one column per x.
const DRAGON_PATTERN: [[[u8; 10]; 9]; 3] = [
    [
        [0, 0, 0, 1, 1, 1, 1, 0, 0, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 0, 0],
        [0, 1, 1, 1, 1, 1, 1, 1, 1, 0],
        [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        [0, 1, 1, 1, 1, 1, 1, 1, 1, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 0, 0],
        [0, 0, 0, 1, 1, 1, 1, 0, 0, 0],
    ],
    [
        [0, 0, 0, 0, 1, 1, 0, 0, 0, 0],
        [0, 0, 0, 1, 1, 1, 1, 0, 0, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 0, 0],
        [0, 1, 1, 1, 1, 1, 1, 1, 1, 0],
        [0, 1, 1, 1, 1, 1, 1, 1, 1, 0],
        [0, 1, 1, 1, 1, 1, 1, 1, 1, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 0, 0],
        [0, 0, 0, 1, 1, 1, 1, 0, 0, 0],
        [0, 0, 0, 0, 1, 1, 0, 0, 0, 0],
    ],
    [
        [0, 0, 0, 0, 0, 1, 0, 0, 0, 0],
        [0, 0, 0, 0, 1, 1, 1, 0, 0, 0],
        [0, 0, 0, 1, 1, 1, 1, 1, 0, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 1, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 1, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 1, 0],
        [0, 0, 0, 1, 1, 1, 1, 1, 0, 0],
        [0, 0, 0, 0, 1, 1, 1, 0, 0, 0],
        [0, 0, 0, 0, 0, 1, 0, 0, 0, 0],
    ],
];

/// (side length in tiles, offset in grid units) per pyramid layer, bottom first.
const PYRAMID_LAYERS: [(i16, i16); 4] = [(7, 0), (5, 2), (3, 4), (1, 6)];

/// The built-in layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutName {
    #[default]
    Turtle,
    Dragon,
    Castle,
    Pyramid,
}

impl LayoutName {
    pub const ALL: [LayoutName; 4] = [
        LayoutName::Turtle,
        LayoutName::Dragon,
        LayoutName::Castle,
        LayoutName::Pyramid,
    ];

    /// Parse layout name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "turtle" => Some(LayoutName::Turtle),
            "dragon" => Some(LayoutName::Dragon),
            "castle" => Some(LayoutName::Castle),
            "pyramid" => Some(LayoutName::Pyramid),
            _ => None,
        }
    }

    /// Resolve a name, falling back to the default layout.
    pub fn resolve(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutName::Turtle => "turtle",
            LayoutName::Dragon => "dragon",
            LayoutName::Castle => "castle",
            LayoutName::Pyramid => "pyramid",
        }
    }

    /// Next layout in menu order (wraps around).
    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Previous layout in menu order (wraps around).
    pub fn prev(&self) -> Self {
        let i = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Build the point set for this layout.
    pub fn positions(&self) -> Vec<Position> {
        match self {
            LayoutName::Turtle => turtle(),
            LayoutName::Dragon => dragon(),
            LayoutName::Castle => castle(),
            LayoutName::Pyramid => pyramid(),
        }
    }
}

/// Get the positions for a named layout. Unknown names give the turtle.
pub fn get_layout(name: &str) -> Vec<Position> {
    LayoutName::resolve(name).positions()
}

/// Source of layout point sets, injected into the board.
pub trait LayoutSource {
    fn positions(&self, name: &str) -> Vec<Position>;
}

/// The four built-in layouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLayouts;

impl LayoutSource for BuiltinLayouts {
    fn positions(&self, name: &str) -> Vec<Position> {
        get_layout(name)
    }
}

/// A single fixed point set regardless of the requested name.
///
/// Handy for custom boards and for tests that need a known arrangement.
#[derive(Debug, Clone, Default)]
pub struct FixedLayout(pub Vec<Position>);

impl LayoutSource for FixedLayout {
    fn positions(&self, _name: &str) -> Vec<Position> {
        self.0.clone()
    }
}

fn turtle() -> Vec<Position> {
    let mut positions = Vec::with_capacity(60);

    for x in (2..=12).step_by(2) {
        for y in (2..=12).step_by(2) {
            positions.push(Position::new(x, y, 0));
        }
    }

    for x in (4..=10).step_by(2) {
        for y in (4..=10).step_by(2) {
            positions.push(Position::new(x, y, 1));
        }
    }

    for x in (6..=8).step_by(2) {
        for y in (6..=8).step_by(2) {
            positions.push(Position::new(x, y, 2));
        }
    }

    // Head and tail.
    positions.push(Position::new(0, 6, 0));
    positions.push(Position::new(0, 8, 0));
    positions.push(Position::new(14, 6, 0));
    positions.push(Position::new(14, 8, 0));

    positions
}

fn dragon() -> Vec<Position> {
    let mut positions = Vec::with_capacity(153);
    for (z, layer) in DRAGON_PATTERN.iter().enumerate() {
        for (y, row) in layer.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell == 1 {
                    positions.push(Position::new(x as i16 * 2, y as i16 * 2, z as i16));
                }
            }
        }
    }
    positions
}

fn castle() -> Vec<Position> {
    let mut positions = Vec::with_capacity(74);

    // Walls.
    for x in (0..=16).step_by(2) {
        positions.push(Position::new(x, 0, 0));
        positions.push(Position::new(x, 14, 0));
    }
    for y in (2..=12).step_by(2) {
        positions.push(Position::new(0, y, 0));
        positions.push(Position::new(16, y, 0));
    }

    // Courtyard.
    for x in (4..=12).step_by(2) {
        for y in (4..=10).step_by(2) {
            positions.push(Position::new(x, y, 0));
        }
    }

    // Towers.
    for z in 1..=3 {
        positions.push(Position::new(2, 2, z));
        positions.push(Position::new(14, 2, z));
        positions.push(Position::new(2, 12, z));
        positions.push(Position::new(14, 12, z));
    }

    // Keep.
    for z in 1..=2 {
        for x in (6..=10).step_by(2) {
            for y in (6..=8).step_by(2) {
                positions.push(Position::new(x, y, z));
            }
        }
    }

    positions
}

fn pyramid() -> Vec<Position> {
    let mut positions = Vec::with_capacity(84);
    for (z, &(size, offset)) in PYRAMID_LAYERS.iter().enumerate() {
        for x in (offset..offset + size * 2).step_by(2) {
            for y in (offset..offset + size * 2).step_by(2) {
                positions.push(Position::new(x, y, z as i16));
            }
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_layout_sizes() {
        assert_eq!(get_layout("turtle").len(), 60);
        assert_eq!(get_layout("dragon").len(), 153);
        assert_eq!(get_layout("castle").len(), 74);
        assert_eq!(get_layout("pyramid").len(), 84);
    }

    #[test]
    fn test_unknown_layout_falls_back_to_turtle() {
        assert_eq!(get_layout("spaceship"), get_layout("turtle"));
        assert_eq!(get_layout(""), get_layout("turtle"));
    }

    #[test]
    fn test_layouts_are_deterministic() {
        for name in LayoutName::ALL {
            assert_eq!(name.positions(), name.positions());
        }
    }

    #[test]
    fn test_layouts_have_no_duplicate_slots() {
        for name in LayoutName::ALL {
            let positions = name.positions();
            let unique: HashSet<_> = positions.iter().copied().collect();
            assert_eq!(unique.len(), positions.len(), "{}", name.as_str());
        }
    }

    #[test]
    fn test_layouts_use_even_grid() {
        for name in LayoutName::ALL {
            for p in name.positions() {
                assert_eq!(p.x % 2, 0, "{} {:?}", name.as_str(), p);
                assert_eq!(p.y % 2, 0, "{} {:?}", name.as_str(), p);
                assert!(p.z >= 0);
            }
        }
    }

    #[test]
    fn test_layout_cycle_wraps() {
        assert_eq!(LayoutName::Turtle.next(), LayoutName::Dragon);
        assert_eq!(LayoutName::Pyramid.next(), LayoutName::Turtle);
        assert_eq!(LayoutName::Turtle.prev(), LayoutName::Pyramid);
        for name in LayoutName::ALL {
            assert_eq!(name.next().prev(), name);
        }
    }

    #[test]
    fn test_layout_names_parse() {
        assert_eq!(LayoutName::from_str("Dragon"), Some(LayoutName::Dragon));
        assert_eq!(LayoutName::from_str(" castle "), Some(LayoutName::Castle));
        assert_eq!(LayoutName::resolve("bogus"), LayoutName::Turtle);
        for name in LayoutName::ALL {
            assert_eq!(LayoutName::from_str(name.as_str()), Some(name));
        }
    }

    #[test]
    fn test_pyramid_apex() {
        let positions = get_layout("pyramid");
        let top: Vec<_> = positions.iter().filter(|p| p.z == 3).collect();
        assert_eq!(top, vec![&Position::new(6, 6, 3)]);
    }
}
