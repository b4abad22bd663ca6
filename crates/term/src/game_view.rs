//! GameView: maps a [`SessionSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! One grid unit is `unit_w` columns by `unit_h` rows, so a tile (2×2 units)
//! covers `2 * unit_w` by `2 * unit_h` cells. Each layer is drawn one column
//! left and one row up from the layer below so stacks read as height.

use crate::core::{format_time, SessionSnapshot, TileView};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    Dragon, Flower, Season, SessionState, Suit, TileKind, TileRef, Wind, GRID_STEP,
};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Front-end state that lives outside the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HudState<'a> {
    /// Tile under the keyboard cursor.
    pub cursor: Option<TileRef>,
    pub show_help: bool,
    /// Short feedback line (e.g. "MATCH"), shown while it lasts.
    pub flash: Option<&'a str>,
}

/// Table colours picked by the `theme` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub table: Rgb,
    pub frame: Rgb,
    pub tile: Rgb,
    pub edge: Rgb,
}

impl Theme {
    /// Theme names in cycling order.
    pub const NAMES: [&'static str; 4] = ["green", "blue", "red", "dark"];

    /// Name after `current`, wrapping; unknown names restart the cycle.
    pub fn next_name(current: &str) -> &'static str {
        let current = current.trim().to_lowercase();
        match Self::NAMES.iter().position(|n| *n == current) {
            Some(i) => Self::NAMES[(i + 1) % Self::NAMES.len()],
            None => Self::NAMES[0],
        }
    }

    /// Palette for a theme name; unknown names get the green table.
    pub fn named(name: &str) -> Self {
        let table = match name.trim().to_lowercase().as_str() {
            "blue" => Rgb::new(22, 40, 78),
            "red" => Rgb::new(84, 26, 28),
            "dark" => Rgb::new(24, 24, 30),
            _ => Rgb::new(18, 68, 40),
        };
        Self {
            table,
            frame: Rgb::new(190, 190, 170),
            tile: Rgb::new(214, 206, 182),
            edge: Rgb::new(120, 104, 80),
        }
    }
}

const SELECTED_BG: Rgb = Rgb::new(236, 200, 70);
const HINTED_BG: Rgb = Rgb::new(110, 200, 220);
const PANEL_W: u16 = 18;

const KEY_HELP: [&str; 12] = [
    "arrows/wasd  move",
    "enter/x      select",
    "t            hint",
    "u            undo",
    "m            shuffle",
    "n            new game",
    "[ ]          layout",
    "p/space      pause",
    "b            sound",
    "c            theme",
    "esc          close",
    "q            quit",
];

/// A lightweight terminal renderer for the Mahjong board.
pub struct GameView {
    unit_w: u16,
    unit_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 3x1 gives a tile of 6x2 cells, close to a real tile's proportions.
        Self {
            unit_w: 3,
            unit_h: 1,
        }
    }
}

/// Where the board sits on screen for one frame.
#[derive(Debug, Clone, Copy)]
struct Placement {
    frame_x: u16,
    frame_y: u16,
    frame_w: u16,
    frame_h: u16,
    min_x: i16,
    min_y: i16,
    max_z: i16,
}

impl GameView {
    pub fn new(unit_w: u16, unit_h: u16) -> Self {
        Self {
            unit_w: unit_w.max(1),
            unit_h: unit_h.max(1),
        }
    }

    fn tile_w(&self) -> u16 {
        GRID_STEP as u16 * self.unit_w
    }

    fn tile_h(&self) -> u16 {
        GRID_STEP as u16 * self.unit_h
    }

    fn placement(&self, snap: &SessionSnapshot, viewport: Viewport) -> Placement {
        let extent = snap.extent.unwrap_or_default();
        let depth = extent.max_z.max(0) as u16;
        let board_w = extent.width().max(0) as u16 * self.unit_w + depth;
        let board_h = extent.height().max(0) as u16 * self.unit_h + depth;
        let frame_w = board_w + 4;
        let frame_h = board_h + 2;

        let usable_w = viewport.width.saturating_sub(PANEL_W + 2);
        Placement {
            frame_x: usable_w.saturating_sub(frame_w) / 2,
            frame_y: viewport.height.saturating_sub(1).saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
            min_x: extent.min_x,
            min_y: extent.min_y,
            max_z: extent.max_z.max(0),
        }
    }

    /// Top-left cell of a tile, or None when it would land off the left/top edge.
    fn tile_origin(&self, p: &Placement, t: &TileView) -> Option<(u16, u16)> {
        let col = (p.frame_x + 2) as i32
            + (p.max_z - t.pos.z) as i32
            + (t.pos.x - p.min_x) as i32 * self.unit_w as i32;
        let row = (p.frame_y + 1) as i32
            + (p.max_z - t.pos.z) as i32
            + (t.pos.y - p.min_y) as i32 * self.unit_h as i32;
        Some((u16::try_from(col).ok()?, u16::try_from(row).ok()?))
    }

    /// Render the session into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames and only resize it when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        hud: &HudState<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        let theme = Theme::named(&snap.theme);
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(theme.frame, theme.table).cell(' '));

        let p = self.placement(snap, viewport);
        let border = CellStyle::new(theme.frame, theme.table);
        self.draw_border(fb, p.frame_x, p.frame_y, p.frame_w, p.frame_h, border);

        // Hide the board while paused.
        if snap.state != SessionState::Paused {
            for t in &snap.tiles {
                self.draw_tile(fb, &p, t, &theme, hud.cursor == Some(t.tile));
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, &p, &theme);
        self.draw_key_bar(fb, viewport, &theme);

        let mid_x = p.frame_x;
        let mid_w = p.frame_w;
        let mid_y = p.frame_y.saturating_add(p.frame_h / 2);
        if hud.show_help {
            self.draw_help(fb, &p, &theme);
        } else {
            match snap.state {
                SessionState::Idle => {
                    self.draw_banner(fb, mid_x, mid_w, mid_y, &["MAHJONG", "press n to deal"]);
                }
                SessionState::Paused => {
                    self.draw_banner(fb, mid_x, mid_w, mid_y, &["PAUSED", "p or esc to resume"]);
                }
                SessionState::Won => {
                    let time = format!("solved in {}", format_time(snap.elapsed_ms));
                    let best = if snap.best_ms == Some(snap.elapsed_ms) {
                        "NEW BEST"
                    } else {
                        "n for a new game"
                    };
                    self.draw_banner(fb, mid_x, mid_w, mid_y, &["YOU WIN", &time, best]);
                }
                SessionState::Lost => {
                    self.draw_banner(
                        fb,
                        mid_x,
                        mid_w,
                        mid_y,
                        &["NO MORE MOVES", "m shuffle  n new game"],
                    );
                }
                SessionState::Running => {}
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, hud: &HudState<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    /// Tile drawn at screen cell `(col, row)`, topmost first.
    pub fn hit_test(
        &self,
        snap: &SessionSnapshot,
        viewport: Viewport,
        col: u16,
        row: u16,
    ) -> Option<TileRef> {
        if snap.state == SessionState::Paused {
            return None;
        }
        let p = self.placement(snap, viewport);
        snap.tiles.iter().rev().find_map(|t| {
            let (x, y) = self.tile_origin(&p, t)?;
            let inside =
                col >= x && col < x + self.tile_w() && row >= y && row < y + self.tile_h();
            inside.then_some(t.tile)
        })
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '╭', style);
        fb.put_char(x + w - 1, y, '╮', style);
        fb.put_char(x, y + h - 1, '╰', style);
        fb.put_char(x + w - 1, y + h - 1, '╯', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        p: &Placement,
        t: &TileView,
        theme: &Theme,
        under_cursor: bool,
    ) {
        let Some((x, y)) = self.tile_origin(p, t) else {
            return;
        };

        // Higher layers are lighter so stacks read at a glance.
        let lift = (t.pos.z.max(0) as u8).saturating_mul(10);
        let bg = if t.selected {
            SELECTED_BG
        } else if t.hinted {
            HINTED_BG
        } else {
            theme.tile.lighten(lift)
        };

        let body = CellStyle::new(theme.edge, bg);
        let body = if t.free || t.selected || t.hinted {
            body
        } else {
            body.dim()
        };
        fb.fill_rect(x, y, self.tile_w(), self.tile_h(), ' ', body);

        let edge = if under_cursor { '▶' } else { '▏' };
        let edge_style = if under_cursor { body.bold() } else { body };
        for dy in 0..self.tile_h() {
            fb.put_char(x, y + dy, edge, edge_style);
        }

        let face = CellStyle {
            fg: face_color(t.id.kind),
            bold: t.free,
            ..body
        };
        let [a, b] = face_label(t.id.kind);
        fb.put_char(x + 2, y, a, face);
        fb.put_char(x + 3, y, b, face);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        hud: &HudState<'_>,
        viewport: Viewport,
        p: &Placement,
        theme: &Theme,
    ) {
        let panel_x = p.frame_x.saturating_add(p.frame_w).saturating_add(2);
        if panel_x.saturating_add(8) >= viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(235, 235, 220), theme.table).bold();
        let value = CellStyle::new(Rgb::new(210, 210, 200), theme.table);
        let dim = value.dim();

        let mut y = p.frame_y;
        let mut field = |fb: &mut FrameBuffer, name: &str, text: &str| {
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x, y.saturating_add(1), text, value);
            y = y.saturating_add(3);
        };

        field(fb, "LAYOUT", snap.layout.as_str());
        field(fb, "TIME", &format_time(snap.elapsed_ms));
        let best = snap.best_ms.map(format_time);
        field(fb, "BEST", best.as_deref().unwrap_or("--:--"));

        fb.put_str(panel_x, y, "TILES", label);
        let end = fb.put_u32(panel_x, y + 1, snap.remaining as u32, value);
        let end = fb.put_str(end, y + 1, " free ", dim);
        fb.put_u32(end, y + 1, snap.free as u32, value);
        y = y.saturating_add(3);

        let moves = match snap.state {
            SessionState::Idle => "-",
            _ if snap.has_moves => "available",
            _ => "none",
        };
        fb.put_str(panel_x, y, "MOVES", label);
        fb.put_str(panel_x, y + 1, moves, value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "SOUND", label);
        let end = fb.put_str(
            panel_x + 6,
            y,
            if snap.sound_enabled { "on" } else { "off" },
            value,
        );
        if snap.can_undo {
            fb.put_str(end + 2, y, "undo", dim);
        }
        y = y.saturating_add(2);

        if let Some(view) = hud.cursor.and_then(|c| snap.view(c)) {
            fb.put_str(panel_x, y, &view.id.to_string(), value);
            // Glyphs can be double width; keep them last on the line.
            let end = fb.put_str(panel_x + 12, y, " ", value);
            fb.put_char(end, y, view.glyph, value);
            y = y.saturating_add(2);
        }

        if let Some(msg) = hud.flash {
            fb.put_str(panel_x, y, msg, label);
        }
    }

    fn draw_key_bar(&self, fb: &mut FrameBuffer, viewport: Viewport, theme: &Theme) {
        if viewport.height == 0 {
            return;
        }
        let style = CellStyle::new(Rgb::new(200, 200, 190), theme.table).dim();
        fb.put_str(
            1,
            viewport.height - 1,
            "x select  t hint  u undo  m shuffle  n new  [ ] layout  p pause  ? help  q quit",
            style,
        );
    }

    fn draw_help(&self, fb: &mut FrameBuffer, p: &Placement, theme: &Theme) {
        let w = KEY_HELP.iter().map(|l| l.len() as u16).max().unwrap_or(0) + 4;
        let h = KEY_HELP.len() as u16 + 2;
        let x = p.frame_x.saturating_add(p.frame_w.saturating_sub(w) / 2);
        let y = p.frame_y.saturating_add(p.frame_h.saturating_sub(h) / 2);

        let style = CellStyle::new(Rgb::new(240, 240, 230), Rgb::new(20, 20, 24));
        fb.fill_rect(x, y, w, h, ' ', style);
        self.draw_border(fb, x, y, w, h, CellStyle { fg: theme.frame, ..style });
        for (i, line) in KEY_HELP.iter().enumerate() {
            fb.put_str(x + 2, y + 1 + i as u16, line, style);
        }
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, x: u16, w: u16, mid_y: u16, lines: &[&str]) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let inner = lines.iter().map(|l| l.chars().count() as u16).max().unwrap_or(0) + 4;
        let top = mid_y.saturating_sub(lines.len() as u16 / 2);
        let box_x = x.saturating_add(w.saturating_sub(inner) / 2);

        for (i, line) in lines.iter().enumerate() {
            let row = top + i as u16;
            fb.fill_rect(box_x, row, inner, 1, ' ', style);
            fb.put_str_centered(box_x, inner, row, line, style);
        }
    }
}

/// Two-character face for a tile kind (rank and suit, or an abbreviation).
pub fn face_label(kind: TileKind) -> [char; 2] {
    match kind {
        TileKind::Suited(suit, rank) => {
            let digit = char::from_digit(rank as u32, 10).unwrap_or('?');
            let suit = match suit {
                Suit::Dots => 'o',
                Suit::Bamboo => 'b',
                Suit::Characters => 'c',
            };
            [digit, suit]
        }
        TileKind::Wind(Wind::East) => ['E', 'w'],
        TileKind::Wind(Wind::South) => ['S', 'w'],
        TileKind::Wind(Wind::West) => ['W', 'w'],
        TileKind::Wind(Wind::North) => ['N', 'w'],
        TileKind::Dragon(Dragon::Red) => ['R', 'd'],
        TileKind::Dragon(Dragon::Green) => ['G', 'd'],
        TileKind::Dragon(Dragon::White) => ['W', 'd'],
        TileKind::Season(Season::Spring) => ['S', 'p'],
        TileKind::Season(Season::Summer) => ['S', 'u'],
        TileKind::Season(Season::Fall) => ['F', 'a'],
        TileKind::Season(Season::Winter) => ['W', 'i'],
        TileKind::Flower(Flower::Plum) => ['P', 'l'],
        TileKind::Flower(Flower::Orchid) => ['O', 'r'],
        TileKind::Flower(Flower::Chrysanthemum) => ['C', 'h'],
        TileKind::Flower(Flower::Bamboo) => ['B', 'm'],
    }
}

fn face_color(kind: TileKind) -> Rgb {
    match kind {
        TileKind::Suited(Suit::Dots, _) => Rgb::new(178, 40, 40),
        TileKind::Suited(Suit::Bamboo, _) => Rgb::new(30, 120, 50),
        TileKind::Suited(Suit::Characters, _) => Rgb::new(30, 60, 160),
        TileKind::Wind(_) => Rgb::new(30, 30, 30),
        TileKind::Dragon(Dragon::Red) => Rgb::new(200, 20, 20),
        TileKind::Dragon(Dragon::Green) => Rgb::new(20, 140, 40),
        TileKind::Dragon(Dragon::White) => Rgb::new(90, 90, 110),
        TileKind::Season(_) => Rgb::new(190, 110, 10),
        TileKind::Flower(_) => Rgb::new(140, 50, 150),
    }
}
