//! Session module - game lifecycle, elapsed-time clock and settings
//!
//! The session owns one [`Board`] and drives it through the
//! idle → running ⇄ paused → won / lost lifecycle. It never touches tile state
//! itself; every gameplay change goes through a board method.
//!
//! Time is advanced by the caller with [`Session::tick`]. The clock only runs
//! while the session is `Running`, and starting or stopping it twice is a no-op.
//!
//! Settings changes are kept in memory and flagged dirty; the front-end decides
//! when and where to write them (see [`crate::settings::SettingsStore`]).

use crate::board::{Board, SelectionOutcome};
use crate::catalog::{StandardCatalog, TileSource};
use crate::layouts::{BuiltinLayouts, LayoutName, LayoutSource};
use crate::rng::{Shuffler, SimpleRng};
use crate::settings::Settings;
use crate::snapshot::{Extent, SessionSnapshot, TileView};
use crate::types::{BoardEvent, SessionAction, SessionState, TileRef};

/// Complete play session
#[derive(Debug, Clone)]
pub struct Session<L = BuiltinLayouts, C = StandardCatalog, R = SimpleRng> {
    board: Board<L, C, R>,
    settings: Settings,
    layout: LayoutName,
    state: SessionState,
    elapsed_ms: u64,
    timer_running: bool,
    /// Most recent feedback event (consumed by the front-end).
    last_event: Option<BoardEvent>,
    settings_dirty: bool,
    /// Monotonic game counter (increments on every new deal).
    game_id: u32,
}

impl Session {
    /// Standard session with a seeded board and the given settings.
    pub fn with_seed(seed: u32, settings: Settings) -> Self {
        Self::new(Board::with_seed(seed), settings)
    }
}

impl<L: LayoutSource, C: TileSource, R: Shuffler> Session<L, C, R> {
    pub fn new(board: Board<L, C, R>, settings: Settings) -> Self {
        let layout = LayoutName::resolve(&settings.layout);
        Self {
            board,
            settings,
            layout,
            state: SessionState::Idle,
            elapsed_ms: 0,
            timer_running: false,
            last_event: None,
            settings_dirty: false,
            game_id: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn board(&self) -> &Board<L, C, R> {
        &self.board
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn layout(&self) -> LayoutName {
        self.layout
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn remaining(&self) -> usize {
        self.board.remaining_count()
    }

    pub fn free(&self) -> usize {
        self.board.free_count()
    }

    pub fn can_undo(&self) -> bool {
        self.board.can_undo()
    }

    pub fn best_time(&self, layout: LayoutName) -> Option<u64> {
        self.settings.best_time(layout.as_str())
    }

    /// Take and clear the last feedback event.
    pub fn take_last_event(&mut self) -> Option<BoardEvent> {
        self.last_event.take()
    }

    /// Take and clear the "settings changed" flag.
    pub fn take_settings_dirty(&mut self) -> bool {
        std::mem::take(&mut self.settings_dirty)
    }

    /// Deal a fresh board on the current layout and start the clock from zero.
    pub fn new_game(&mut self) {
        self.board.initialize(self.layout.as_str());
        self.game_id = self.game_id.wrapping_add(1);
        self.state = SessionState::Running;
        self.elapsed_ms = 0;
        self.last_event = None;
        self.start_timer();
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            SessionState::Running => self.pause(),
            SessionState::Paused => self.resume(),
            _ => false,
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        self.state = SessionState::Paused;
        self.stop_timer();
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != SessionState::Paused {
            return false;
        }
        self.state = SessionState::Running;
        self.start_timer();
        true
    }

    fn start_timer(&mut self) {
        self.timer_running = true;
    }

    fn stop_timer(&mut self) {
        self.timer_running = false;
    }

    /// Advance the clock. Returns true if time was counted.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.timer_running || self.state != SessionState::Running {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms as u64);
        true
    }

    /// Click a tile. Ignored unless the game is running.
    pub fn select(&mut self, tile: TileRef) -> SelectionOutcome {
        if self.state != SessionState::Running {
            return SelectionOutcome::new();
        }

        let events = self.board.handle_selection(tile);
        for &event in &events {
            match event {
                BoardEvent::Won => self.game_won(),
                BoardEvent::Lost => self.game_lost(),
                _ => {}
            }
            self.last_event = Some(event);
        }
        events
    }

    fn game_won(&mut self) {
        self.state = SessionState::Won;
        self.stop_timer();
        if self
            .settings
            .record_time(self.layout.as_str(), self.elapsed_ms)
        {
            self.settings_dirty = true;
        }
    }

    fn game_lost(&mut self) {
        self.state = SessionState::Lost;
        self.stop_timer();
    }

    pub fn undo(&mut self) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        self.board.undo()
    }

    /// Reshuffle the tiles in play.
    ///
    /// Also allowed from `Lost`: if the reshuffled board has a move again the
    /// game resumes where it stopped.
    pub fn shuffle(&mut self) -> bool {
        match self.state {
            SessionState::Running => {
                self.board.shuffle();
                true
            }
            SessionState::Lost => {
                self.board.shuffle();
                if self.board.has_valid_moves() {
                    self.state = SessionState::Running;
                    self.start_timer();
                }
                true
            }
            _ => false,
        }
    }

    pub fn hint(&mut self) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        self.board.hint()
    }

    /// Whether a free matching pair exists right now.
    pub fn has_valid_moves(&self) -> bool {
        self.board.has_valid_moves()
    }

    /// Switch layout, persist the choice, and redeal if a game has started.
    pub fn set_layout(&mut self, layout: LayoutName) {
        self.layout = layout;
        self.settings.layout = layout.as_str().to_string();
        self.settings_dirty = true;
        if self.state != SessionState::Idle {
            self.new_game();
        }
    }

    pub fn set_theme(&mut self, theme: &str) {
        self.settings.theme = theme.to_string();
        self.settings_dirty = true;
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.settings.sound_enabled = !self.settings.sound_enabled;
        self.settings_dirty = true;
        self.settings.sound_enabled
    }

    /// Apply a front-end action. Returns true if it had an effect.
    pub fn apply_action(&mut self, action: SessionAction) -> bool {
        match action {
            SessionAction::NewGame => {
                self.new_game();
                true
            }
            SessionAction::TogglePause => self.toggle_pause(),
            SessionAction::Undo => self.undo(),
            SessionAction::Shuffle => self.shuffle(),
            SessionAction::Hint => self.hint(),
            SessionAction::NextLayout => {
                self.set_layout(self.layout.next());
                true
            }
            SessionAction::PrevLayout => {
                self.set_layout(self.layout.prev());
                true
            }
        }
    }

    /// Fill `out` with the render view of the current session, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.tiles.clear();
        for r in self.board.render_order() {
            let Some(tile) = self.board.tile(r) else {
                continue;
            };
            if tile.picked {
                continue;
            }
            out.tiles.push(TileView {
                tile: r,
                id: tile.id,
                pos: tile.pos,
                glyph: self.board.catalog().symbol(tile.kind()),
                free: self.board.is_free(r),
                selected: tile.selected,
                hinted: tile.hinted,
            });
        }

        out.extent = Extent::of(self.board.tiles().iter().map(|t| t.pos));
        out.state = self.state;
        out.layout = self.layout;
        out.game_id = self.game_id;
        out.elapsed_ms = self.elapsed_ms;
        out.best_ms = self.best_time(self.layout);
        out.remaining = out.tiles.len();
        out.free = out.tiles.iter().filter(|t| t.free).count();
        out.can_undo = self.board.can_undo();
        out.has_moves = self.board.has_valid_moves();
        out.sound_enabled = self.settings.sound_enabled;
        out.theme.clear();
        out.theme.push_str(&self.settings.theme);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

/// Format milliseconds as `mm:ss`.
pub fn format_time(ms: u64) -> String {
    let seconds = ms / 1000;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
