//! Tile catalog - the 144-tile set, display glyphs and match rules
//!
//! Two tiles match when they are the same kind. Seasons and flowers are
//! wildcard groups: any season matches any other season, and any flower matches
//! any other flower. A season never matches a flower.

use crate::types::{
    Dragon, Flower, Season, Suit, TileId, TileKind, Wind, PLACEHOLDER_GLYPH, STANDARD_COPIES,
    TILE_SET_SIZE,
};

/// Wildcard group a kind belongs to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchGroup {
    Seasons,
    Flowers,
}

impl MatchGroup {
    pub fn of(kind: TileKind) -> Option<Self> {
        match kind {
            TileKind::Season(_) => Some(MatchGroup::Seasons),
            TileKind::Flower(_) => Some(MatchGroup::Flowers),
            _ => None,
        }
    }
}

/// Whether two kinds can be removed together.
pub fn kinds_match(a: TileKind, b: TileKind) -> bool {
    if a == b {
        return true;
    }
    match (MatchGroup::of(a), MatchGroup::of(b)) {
        (Some(ga), Some(gb)) => ga == gb,
        _ => false,
    }
}

/// Whether two tiles can be removed together.
pub fn can_match(a: &TileId, b: &TileId) -> bool {
    kinds_match(a.kind, b.kind)
}

/// Unicode Mahjong glyph for a kind, or the placeholder for a non-catalog kind.
pub fn symbol(kind: TileKind) -> char {
    const DOTS: [char; 9] = ['🀙', '🀚', '🀛', '🀜', '🀝', '🀞', '🀟', '🀠', '🀡'];
    const BAMBOO: [char; 9] = ['🀐', '🀑', '🀒', '🀓', '🀔', '🀕', '🀖', '🀗', '🀘'];
    const CHARS: [char; 9] = ['🀇', '🀈', '🀉', '🀊', '🀋', '🀌', '🀍', '🀎', '🀏'];

    match kind {
        TileKind::Suited(suit, rank @ 1..=9) => {
            let table = match suit {
                Suit::Dots => &DOTS,
                Suit::Bamboo => &BAMBOO,
                Suit::Characters => &CHARS,
            };
            table[(rank - 1) as usize]
        }
        TileKind::Suited(_, _) => PLACEHOLDER_GLYPH,
        TileKind::Wind(Wind::East) => '🀀',
        TileKind::Wind(Wind::South) => '🀁',
        TileKind::Wind(Wind::West) => '🀂',
        TileKind::Wind(Wind::North) => '🀃',
        TileKind::Dragon(Dragon::Red) => '🀄',
        TileKind::Dragon(Dragon::Green) => '🀅',
        TileKind::Dragon(Dragon::White) => '🀆',
        TileKind::Season(Season::Spring) => '🀦',
        TileKind::Season(Season::Summer) => '🀧',
        TileKind::Season(Season::Fall) => '🀨',
        TileKind::Season(Season::Winter) => '🀩',
        TileKind::Flower(Flower::Plum) => '🀢',
        TileKind::Flower(Flower::Orchid) => '🀣',
        TileKind::Flower(Flower::Chrysanthemum) => '🀤',
        TileKind::Flower(Flower::Bamboo) => '🀥',
    }
}

/// Glyph for a kind given by short name (`do1`, `wi_east`, ...).
pub fn symbol_for(name: &str) -> char {
    TileKind::from_str(name)
        .map(symbol)
        .unwrap_or(PLACEHOLDER_GLYPH)
}

/// Build the full tile set in catalog order: 4 copies of every standard kind,
/// then one of every season and flower.
pub fn generate_tile_set() -> Vec<TileId> {
    let mut tiles = Vec::with_capacity(TILE_SET_SIZE);

    for kind in TileKind::ALL.iter().filter(|k| !k.is_special()) {
        for copy in 0..STANDARD_COPIES {
            tiles.push(TileId::new(*kind, copy));
        }
    }

    for kind in TileKind::ALL.iter().filter(|k| k.is_special()) {
        tiles.push(TileId::new(*kind, 0));
    }

    tiles
}

/// Source of tiles and match rules, injected into the board.
pub trait TileSource {
    fn generate_tile_set(&self) -> Vec<TileId>;

    fn can_match(&self, a: &TileId, b: &TileId) -> bool;

    fn symbol(&self, kind: TileKind) -> char;
}

/// The standard 144-tile catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCatalog;

impl TileSource for StandardCatalog {
    fn generate_tile_set(&self) -> Vec<TileId> {
        generate_tile_set()
    }

    fn can_match(&self, a: &TileId, b: &TileId) -> bool {
        can_match(a, b)
    }

    fn symbol(&self, kind: TileKind) -> char {
        symbol(kind)
    }
}
