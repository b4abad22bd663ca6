//! Keyboard cursor over the tiles still on the board.
//!
//! The cursor only lands on the top tile of each stack: a tile whose `(x, y)`
//! is shared by a higher tile cannot be reached. Moving picks the nearest
//! reachable tile in the requested direction, weighting sideways drift twice as
//! heavily as distance along the axis.

use crate::types::{Position, TileRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Signed distance along the axis and absolute sideways drift from `from` to `to`.
    fn offsets(self, from: Position, to: Position) -> (i32, i32) {
        let dx = to.x as i32 - from.x as i32;
        let dy = to.y as i32 - from.y as i32;
        match self {
            Direction::Left => (-dx, dy.abs()),
            Direction::Right => (dx, dy.abs()),
            Direction::Up => (-dy, dx.abs()),
            Direction::Down => (dy, dx.abs()),
        }
    }
}

/// Tracks which tile the keyboard points at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileCursor {
    current: Option<TileRef>,
}

impl TileCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<TileRef> {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Keep the cursor on a reachable tile.
    ///
    /// If the current tile is gone or buried, jump to the top-left reachable one.
    pub fn sync(&mut self, tiles: &[(TileRef, Position)]) -> Option<TileRef> {
        let keep = self
            .current
            .and_then(|cur| tiles.iter().find(|(r, _)| *r == cur))
            .filter(|(_, pos)| is_reachable(tiles, *pos))
            .map(|(r, _)| *r);

        self.current = keep.or_else(|| {
            reachable(tiles)
                .min_by_key(|(_, pos)| (pos.y, pos.x))
                .map(|(r, _)| r)
        });
        self.current
    }

    /// Move toward `dir`. Stays put when nothing lies that way.
    pub fn step(&mut self, tiles: &[(TileRef, Position)], dir: Direction) -> Option<TileRef> {
        let from = self.sync(tiles).and_then(|cur| position_of(tiles, cur))?;

        let best = reachable(tiles)
            .filter_map(|(r, pos)| {
                let (along, drift) = dir.offsets(from, pos);
                (along > 0).then_some((along + 2 * drift, drift, r))
            })
            .min_by_key(|&(score, drift, r)| (score, drift, r.0));

        if let Some((_, _, r)) = best {
            self.current = Some(r);
        }
        self.current
    }

    /// Point at a specific tile (e.g. after a hint).
    pub fn jump_to(&mut self, tiles: &[(TileRef, Position)], tile: TileRef) -> bool {
        match position_of(tiles, tile) {
            Some(pos) if is_reachable(tiles, pos) => {
                self.current = Some(tile);
                true
            }
            _ => false,
        }
    }
}

fn position_of(tiles: &[(TileRef, Position)], tile: TileRef) -> Option<Position> {
    tiles.iter().find(|(r, _)| *r == tile).map(|(_, p)| *p)
}

fn is_reachable(tiles: &[(TileRef, Position)], pos: Position) -> bool {
    !tiles
        .iter()
        .any(|(_, p)| p.x == pos.x && p.y == pos.y && p.z > pos.z)
}

fn reachable(tiles: &[(TileRef, Position)]) -> impl Iterator<Item = (TileRef, Position)> + '_ {
    tiles
        .iter()
        .copied()
        .filter(move |(_, pos)| is_reachable(tiles, *pos))
}
