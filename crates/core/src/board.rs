//! Board module - tile arena, free-tile rule, matching, undo, shuffle and hints
//!
//! Tiles live in a flat arena and are addressed by [`TileRef`]. Tile order in
//! the arena carries no gameplay meaning; [`Board::render_order`] gives the
//! (z, y, x) drawing order.
//!
//! Free-tile status is never cached. It depends on the live `picked` state of
//! the neighbours, so every query recomputes it.

use arrayvec::ArrayVec;

use crate::catalog::{StandardCatalog, TileSource};
use crate::layouts::{BuiltinLayouts, LayoutName, LayoutSource};
use crate::rng::{Shuffler, SimpleRng};
use crate::types::{BoardEvent, Position, TileId, TileKind, TileRef, GRID_STEP};

/// Events produced by one selection. A match can be followed by a terminal event.
pub type SelectionOutcome = ArrayVec<BoardEvent, 2>;

/// One physical tile on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub pos: Position,
    pub picked: bool,
    pub selected: bool,
    pub hinted: bool,
}

impl Tile {
    pub fn new(id: TileId, pos: Position) -> Self {
        Self {
            id,
            pos,
            picked: false,
            selected: false,
            hinted: false,
        }
    }

    pub fn kind(&self) -> TileKind {
        self.id.kind
    }

    /// True if `other` rests on this tile: one layer up, overlapping within 1 unit.
    fn is_covered_by(&self, other: &Tile) -> bool {
        other.pos.z == self.pos.z + 1
            && (other.pos.x - self.pos.x).abs() <= 1
            && (other.pos.y - self.pos.y).abs() <= 1
    }

    /// True if `other` sits directly beside this tile, `dx` grid units away on the same layer.
    fn is_beside(&self, other: &Tile, dx: i16) -> bool {
        other.pos.z == self.pos.z
            && other.pos.x == self.pos.x + dx
            && (other.pos.y - self.pos.y).abs() <= 1
    }
}

/// Largest arena a [`TileRef`] can address.
pub const MAX_TILES: usize = u16::MAX as usize + 1;

/// The board engine.
///
/// Collaborators are injected: a layout source, a tile catalog and a random
/// source. The defaults are the built-in layouts, the standard catalog and
/// the LCG.
#[derive(Debug, Clone)]
pub struct Board<L = BuiltinLayouts, C = StandardCatalog, R = SimpleRng> {
    layouts: L,
    catalog: C,
    rng: R,
    layout_name: String,
    tiles: Vec<Tile>,
    selected: Option<TileRef>,
    hinted: ArrayVec<TileRef, 2>,
    undo_stack: Vec<[TileRef; 2]>,
}

impl Board {
    /// Standard board with the built-in collaborators and a seeded RNG.
    ///
    /// The board is empty until [`Board::initialize`] is called.
    pub fn with_seed(seed: u32) -> Self {
        Self::new(BuiltinLayouts, StandardCatalog, SimpleRng::new(seed))
    }
}

impl<L: LayoutSource, C: TileSource, R: Shuffler> Board<L, C, R> {
    /// Create an empty board with explicit collaborators.
    pub fn new(layouts: L, catalog: C, rng: R) -> Self {
        Self {
            layouts,
            catalog,
            rng,
            layout_name: LayoutName::default().as_str().to_string(),
            tiles: Vec::new(),
            selected: None,
            hinted: ArrayVec::new(),
            undo_stack: Vec::new(),
        }
    }

    /// Deal a new board for the named layout.
    ///
    /// The fresh tile set is shuffled and zipped with the layout positions up
    /// to the shorter of the two; the rest is dropped. Unknown names deal the
    /// default layout and are reported under its name.
    pub fn initialize(&mut self, layout_name: &str) {
        let positions = self.layouts.positions(layout_name);
        let mut tile_set = self.catalog.generate_tile_set();
        self.rng.shuffle(&mut tile_set);

        self.clear();
        self.layout_name = LayoutName::resolve(layout_name).as_str().to_string();
        self.tiles = positions
            .into_iter()
            .zip(tile_set)
            .take(MAX_TILES)
            .map(|(pos, id)| Tile::new(id, pos))
            .collect();
    }

    /// Replace the board with explicit placements (no shuffle).
    ///
    /// At most [`MAX_TILES`] placements are kept.
    pub fn load_placements(&mut self, placements: impl IntoIterator<Item = (TileId, Position)>) {
        self.clear();
        self.tiles = placements
            .into_iter()
            .take(MAX_TILES)
            .map(|(id, pos)| Tile::new(id, pos))
            .collect();
    }

    /// Drop every tile along with selection, hints and history.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.selected = None;
        self.hinted.clear();
        self.undo_stack.clear();
    }

    pub fn layout_name(&self) -> &str {
        &self.layout_name
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, tile: TileRef) -> Option<&Tile> {
        self.tiles.get(tile.index())
    }

    pub fn selected(&self) -> Option<TileRef> {
        self.selected
    }

    pub fn hinted(&self) -> &[TileRef] {
        &self.hinted
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Iterate refs of all tiles (picked or not) in arena order.
    pub fn refs(&self) -> impl Iterator<Item = TileRef> + '_ {
        (0..self.tiles.len()).map(|i| TileRef(i as u16))
    }

    /// Refs sorted bottom layer first, then by row, then by column.
    pub fn render_order(&self) -> Vec<TileRef> {
        let mut order: Vec<TileRef> = self.refs().collect();
        order.sort_by_key(|r| self.tiles[r.index()].pos.render_key());
        order
    }

    /// Free-tile rule.
    ///
    /// A tile is free when it is in play, nothing in play rests on it, and at
    /// least one of its left or right sides on the same layer is open.
    pub fn is_free(&self, tile: TileRef) -> bool {
        let Some(target) = self.tile(tile) else {
            return false;
        };
        if target.picked {
            return false;
        }

        let live = || self.tiles.iter().filter(|t| !t.picked);

        if live().any(|t| target.is_covered_by(t)) {
            return false;
        }

        let left_blocked = live().any(|t| target.is_beside(t, -GRID_STEP));
        let right_blocked = live().any(|t| target.is_beside(t, GRID_STEP));

        !left_blocked || !right_blocked
    }

    /// Tiles still in play that are free, in arena order.
    pub fn free_tiles(&self) -> Vec<TileRef> {
        self.refs().filter(|&r| self.is_free(r)).collect()
    }

    /// Tiles still in play, in arena order.
    pub fn remaining_tiles(&self) -> Vec<TileRef> {
        self.refs()
            .filter(|r| !self.tiles[r.index()].picked)
            .collect()
    }

    pub fn remaining_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.picked).count()
    }

    pub fn free_count(&self) -> usize {
        self.refs().filter(|&r| self.is_free(r)).count()
    }

    /// Tiles removed so far (always even).
    pub fn removed_count(&self) -> usize {
        self.undo_stack.len() * 2
    }

    /// Apply a click on `tile`.
    ///
    /// Returns the feedback events in order: `Invalid`, `Select`, or `Match`
    /// optionally followed by `Won` (no tiles left) or `Lost` (tiles left but
    /// no free pair matches).
    pub fn handle_selection(&mut self, tile: TileRef) -> SelectionOutcome {
        let mut events = SelectionOutcome::new();

        if !self.is_free(tile) {
            events.push(BoardEvent::Invalid);
            return events;
        }

        if self.selected == Some(tile) {
            self.clear_selection();
            events.push(BoardEvent::Select);
            return events;
        }

        let matched = match self.selected {
            Some(prev) => self
                .catalog
                .can_match(&self.tiles[prev.index()].id, &self.tiles[tile.index()].id),
            None => false,
        };

        match (self.selected, matched) {
            (Some(prev), true) => {
                self.remove_pair(prev, tile);
                self.clear_selection();
                self.clear_hints();
                events.push(BoardEvent::Match);

                if self.remaining_count() == 0 {
                    events.push(BoardEvent::Won);
                } else if !self.has_valid_moves() {
                    events.push(BoardEvent::Lost);
                }
            }
            _ => {
                self.clear_selection();
                self.select(tile);
                events.push(BoardEvent::Select);
            }
        }

        events
    }

    fn select(&mut self, tile: TileRef) {
        self.tiles[tile.index()].selected = true;
        self.selected = Some(tile);
    }

    pub fn clear_selection(&mut self) {
        if let Some(prev) = self.selected.take() {
            self.tiles[prev.index()].selected = false;
        }
    }

    pub fn clear_hints(&mut self) {
        for r in self.hinted.drain(..) {
            self.tiles[r.index()].hinted = false;
        }
    }

    fn remove_pair(&mut self, a: TileRef, b: TileRef) {
        self.undo_stack.push([a, b]);
        for r in [a, b] {
            let t = &mut self.tiles[r.index()];
            t.picked = true;
            t.selected = false;
            t.hinted = false;
        }
    }

    /// Put the most recently removed pair back.
    ///
    /// Returns false when there is nothing to undo. Selection and hints are not
    /// restored, but a selection or hint that the returning pair now covers or
    /// blocks is dropped so that both always point at free tiles.
    pub fn undo(&mut self) -> bool {
        let Some([a, b]) = self.undo_stack.pop() else {
            return false;
        };

        self.tiles[a.index()].picked = false;
        self.tiles[b.index()].picked = false;

        if let Some(sel) = self.selected {
            if !self.is_free(sel) {
                self.clear_selection();
            }
        }
        if self.hinted.iter().any(|&r| !self.is_free(r)) {
            self.clear_hints();
        }

        true
    }

    /// Redistribute the identities of the tiles in play over their current slots.
    ///
    /// Positions never move and picked tiles stay removed. Selection and hints
    /// are cleared.
    pub fn shuffle(&mut self) {
        let remaining = self.remaining_tiles();
        let mut ids: Vec<TileId> = remaining
            .iter()
            .map(|r| self.tiles[r.index()].id)
            .collect();
        self.rng.shuffle(&mut ids);

        for (r, id) in remaining.iter().zip(ids) {
            self.tiles[r.index()].id = id;
        }

        self.clear_selection();
        self.clear_hints();
    }

    /// First matching pair among free tiles, scanning i < j in arena order.
    pub fn find_hint(&self) -> Option<(TileRef, TileRef)> {
        let free = self.free_tiles();
        for (i, &a) in free.iter().enumerate() {
            for &b in &free[i + 1..] {
                if self
                    .catalog
                    .can_match(&self.tiles[a.index()].id, &self.tiles[b.index()].id)
                {
                    return Some((a, b));
                }
            }
        }
        None
    }

    /// Highlight the first matching free pair. Returns false if there is none.
    pub fn hint(&mut self) -> bool {
        self.clear_hints();
        let Some((a, b)) = self.find_hint() else {
            return false;
        };
        for r in [a, b] {
            self.tiles[r.index()].hinted = true;
            self.hinted.push(r);
        }
        true
    }

    /// Whether any matching free pair exists.
    pub fn has_valid_moves(&self) -> bool {
        self.find_hint().is_some()
    }

    /// Glyph for a tile, via the injected catalog.
    pub fn symbol(&self, tile: TileRef) -> Option<char> {
        self.tile(tile).map(|t| self.catalog.symbol(t.kind()))
    }

    /// Mutable tile access for crafting scenarios in tests.
    #[cfg(test)]
    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }
}

impl<L: LayoutSource + Default, C: TileSource, R: Shuffler> Board<L, C, R> {
    /// Board holding exactly `placements`, with a default layout source.
    pub fn from_placements(
        catalog: C,
        rng: R,
        placements: impl IntoIterator<Item = (TileId, Position)>,
    ) -> Self {
        let mut board = Self::new(L::default(), catalog, rng);
        board.load_placements(placements);
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::with_seed(1)
    }
}
