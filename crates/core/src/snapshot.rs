use crate::layouts::LayoutName;
use crate::types::{Position, SessionState, TileId, TileRef};

/// Render view of one tile still in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileView {
    pub tile: TileRef,
    pub id: TileId,
    pub pos: Position,
    pub glyph: char,
    pub free: bool,
    pub selected: bool,
    pub hinted: bool,
}

/// Grid bounds of a dealt board, picked tiles included, so the drawing does not
/// shift as tiles are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent {
    pub min_x: i16,
    pub min_y: i16,
    pub max_x: i16,
    pub max_y: i16,
    pub max_z: i16,
}

impl Extent {
    pub fn of(positions: impl IntoIterator<Item = Position>) -> Option<Self> {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let init = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
            max_z: first.z,
        };
        Some(iter.fold(init, |e, p| Self {
            min_x: e.min_x.min(p.x),
            min_y: e.min_y.min(p.y),
            max_x: e.max_x.max(p.x),
            max_y: e.max_y.max(p.y),
            max_z: e.max_z.max(p.z),
        }))
    }

    /// Width in grid units, counting the 2-unit footprint of the last tile.
    pub fn width(&self) -> i16 {
        self.max_x - self.min_x + 2
    }

    pub fn height(&self) -> i16 {
        self.max_y - self.min_y + 2
    }
}

/// Everything a front-end needs to draw one frame.
///
/// `tiles` holds only unpicked tiles, already in drawing order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    pub tiles: Vec<TileView>,
    pub extent: Option<Extent>,
    pub state: SessionState,
    pub layout: LayoutName,
    pub game_id: u32,
    pub elapsed_ms: u64,
    pub best_ms: Option<u64>,
    pub remaining: usize,
    pub free: usize,
    pub can_undo: bool,
    pub has_moves: bool,
    pub sound_enabled: bool,
    pub theme: String,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            tiles: Vec::new(),
            extent: None,
            state: SessionState::Idle,
            layout: LayoutName::default(),
            game_id: 0,
            elapsed_ms: 0,
            best_ms: None,
            remaining: 0,
            free: 0,
            can_undo: false,
            has_moves: false,
            sound_enabled: true,
            theme: String::new(),
        }
    }
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.extent = None;
        self.state = SessionState::Idle;
        self.layout = LayoutName::default();
        self.game_id = 0;
        self.elapsed_ms = 0;
        self.best_ms = None;
        self.remaining = 0;
        self.free = 0;
        self.can_undo = false;
        self.has_moves = false;
        self.sound_enabled = true;
        self.theme.clear();
    }

    /// True while clicks are accepted.
    pub fn playable(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn view(&self, tile: TileRef) -> Option<&TileView> {
        self.tiles.iter().find(|t| t.tile == tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind;

    fn view(i: u16, x: i16, y: i16) -> TileView {
        TileView {
            tile: TileRef(i),
            id: TileId::new(TileKind::ALL[0], 0),
            pos: Position::new(x, y, 0),
            glyph: '🀙',
            free: true,
            selected: false,
            hinted: false,
        }
    }

    #[test]
    fn test_extent() {
        assert_eq!(Extent::of(Vec::new()), None);
        let e = Extent::of([
            Position::new(4, 2, 0),
            Position::new(-2, 8, 3),
            Position::new(10, 0, 1),
        ])
        .unwrap();
        assert_eq!((e.min_x, e.min_y, e.max_x, e.max_y, e.max_z), (-2, 0, 10, 8, 3));
        assert_eq!(e.width(), 14);
        assert_eq!(e.height(), 10);
    }

    #[test]
    fn test_view_lookup() {
        let mut s = SessionSnapshot::default();
        s.tiles.push(view(0, 4, 2));
        s.tiles.push(view(1, -2, 8));
        assert_eq!(s.view(TileRef(1)).map(|t| t.pos.x), Some(-2));
        assert!(s.view(TileRef(7)).is_none());
    }

    #[test]
    fn test_clear_resets() {
        let mut s = SessionSnapshot::default();
        s.tiles.push(view(0, 0, 0));
        s.extent = Extent::of([Position::new(0, 0, 0)]);
        s.state = SessionState::Won;
        s.theme.push_str("red");
        s.clear();
        assert_eq!(s, SessionSnapshot::default());
        assert!(!s.playable());
    }
}
