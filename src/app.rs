//! Front-end state machine: turns input commands into session calls.
//!
//! `App` owns the session plus the bits of state that only matter to a
//! terminal player (cursor, help overlay, feedback message). It performs no
//! I/O, so the binary is a thin loop around it.

use crate::core::{LayoutSource, Session, SessionSnapshot, Shuffler, TileSource};
use crate::input::{InputCommand, TileCursor};
use crate::term::{HudState, Theme};
use crate::types::{BoardEvent, Position, SessionAction, SessionState, TileRef, FLASH_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flash {
    text: &'static str,
    remaining_ms: u32,
}

/// Terminal front-end state around one [`Session`].
pub struct App<L, C, R> {
    session: Session<L, C, R>,
    cursor: TileCursor,
    show_help: bool,
    /// The help overlay paused the game and owes it a resume.
    help_paused: bool,
    flash: Option<Flash>,
    snap: SessionSnapshot,
    /// Reachable-tile input for the cursor, rebuilt on every refresh.
    spots: Vec<(TileRef, Position)>,
}

impl<L: LayoutSource, C: TileSource, R: Shuffler> App<L, C, R> {
    pub fn new(session: Session<L, C, R>) -> Self {
        let mut app = Self {
            session,
            cursor: TileCursor::new(),
            show_help: false,
            help_paused: false,
            flash: None,
            snap: SessionSnapshot::default(),
            spots: Vec::new(),
        };
        app.refresh();
        app
    }

    pub fn session(&self) -> &Session<L, C, R> {
        &self.session
    }

    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snap
    }

    pub fn cursor(&self) -> Option<TileRef> {
        self.cursor.current()
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn flash_text(&self) -> Option<&'static str> {
        self.flash.map(|f| f.text)
    }

    pub fn hud(&self) -> HudState<'static> {
        HudState {
            cursor: self.cursor.current(),
            show_help: self.show_help,
            flash: self.flash_text(),
        }
    }

    /// Whether settings changed since the last call (the caller saves them).
    pub fn take_settings_dirty(&mut self) -> bool {
        self.session.take_settings_dirty()
    }

    /// Apply one input command. Returns the board event it produced, if any.
    pub fn handle(&mut self, cmd: InputCommand) -> Option<BoardEvent> {
        match cmd {
            InputCommand::Help => {
                if self.show_help {
                    self.close_help();
                } else {
                    self.open_help();
                }
            }
            InputCommand::Resume => {
                if self.show_help {
                    self.close_help();
                } else {
                    self.session.resume();
                }
            }
            InputCommand::Move(dir) => {
                self.cursor.step(&self.spots, dir);
            }
            InputCommand::Select => {
                if let Some(tile) = self.cursor.current() {
                    return self.click(tile);
                }
            }
            InputCommand::Action(action) => self.action(action),
            InputCommand::ToggleSound => {
                let on = self.session.toggle_sound();
                self.show_flash(if on { "SOUND ON" } else { "SOUND OFF" });
            }
            InputCommand::CycleTheme => {
                let next = Theme::next_name(&self.session.settings().theme);
                self.session.set_theme(next);
            }
        }
        self.refresh();
        None
    }

    /// Click a tile (keyboard select or mouse).
    ///
    /// While help is shown the click only dismisses it.
    pub fn click(&mut self, tile: TileRef) -> Option<BoardEvent> {
        if self.dismiss_help() {
            return None;
        }
        if self.session.state() != SessionState::Running {
            return None;
        }
        self.cursor.jump_to(&self.spots, tile);
        self.session.select(tile);
        let event = self.session.take_last_event();
        if let Some(text) = event.and_then(event_text) {
            self.show_flash(text);
        }
        self.refresh();
        event
    }

    /// Close the help overlay if it is shown. Returns true if it was.
    pub fn dismiss_help(&mut self) -> bool {
        if !self.show_help {
            return false;
        }
        self.close_help();
        self.refresh();
        true
    }

    fn open_help(&mut self) {
        self.show_help = true;
        self.help_paused = self.session.pause();
    }

    fn close_help(&mut self) {
        self.show_help = false;
        if std::mem::take(&mut self.help_paused) {
            self.session.resume();
        }
    }

    fn action(&mut self, action: SessionAction) {
        if matches!(
            action,
            SessionAction::NewGame | SessionAction::NextLayout | SessionAction::PrevLayout
        ) {
            self.cursor.reset();
            self.flash = None;
        }
        // An explicit pause or a fresh deal takes over from the overlay.
        if matches!(
            action,
            SessionAction::TogglePause
                | SessionAction::NewGame
                | SessionAction::NextLayout
                | SessionAction::PrevLayout
        ) {
            self.help_paused = false;
        }

        let applied = self.session.apply_action(action);
        match action {
            SessionAction::Hint if applied => {
                self.refresh();
                if let Some(&first) = self.session.board().hinted().first() {
                    self.cursor.jump_to(&self.spots, first);
                }
            }
            SessionAction::Hint if self.session.state() == SessionState::Running => {
                self.show_flash("NO HINT");
            }
            SessionAction::Undo if !applied && self.session.state() == SessionState::Running => {
                self.show_flash("NOTHING TO UNDO");
            }
            SessionAction::Shuffle if applied => {
                self.show_flash(if self.session.has_valid_moves() {
                    "SHUFFLED"
                } else {
                    "STILL STUCK"
                });
            }
            _ => {}
        }
    }

    /// Advance front-end timers.
    pub fn advance(&mut self, elapsed_ms: u32) {
        if let Some(flash) = self.flash.as_mut() {
            flash.remaining_ms = flash.remaining_ms.saturating_sub(elapsed_ms);
            if flash.remaining_ms == 0 {
                self.flash = None;
            }
        }
    }

    /// Advance the session clock. Returns true if time was counted.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let counted = self.session.tick(elapsed_ms);
        if counted {
            self.snap.elapsed_ms = self.session.elapsed_ms();
        }
        counted
    }

    fn show_flash(&mut self, text: &'static str) {
        self.flash = Some(Flash {
            text,
            remaining_ms: FLASH_MS,
        });
    }

    /// Rebuild the snapshot and keep the cursor on a reachable tile.
    pub fn refresh(&mut self) {
        self.session.snapshot_into(&mut self.snap);
        self.spots.clear();
        self.spots.extend(self.snap.tiles.iter().map(|t| (t.tile, t.pos)));
        self.cursor.sync(&self.spots);
    }
}

fn event_text(event: BoardEvent) -> Option<&'static str> {
    match event {
        BoardEvent::Invalid => Some("BLOCKED"),
        BoardEvent::Select => None,
        BoardEvent::Match => Some("MATCH"),
        BoardEvent::Won => Some("SOLVED"),
        BoardEvent::Lost => Some("STUCK"),
    }
}

/// Whether an event deserves the bell.
pub fn rings_bell(event: BoardEvent) -> bool {
    !matches!(event, BoardEvent::Select)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, FixedLayout, ScriptedRng, Settings, StandardCatalog};
    use crate::input::Direction;

    type TestApp = App<FixedLayout, StandardCatalog, ScriptedRng>;

    /// Catalog order deals do1 x4 then do2 x4 under an identity shuffle.
    fn app(n: i16) -> TestApp {
        let positions = (0..n).map(|i| Position::new(i * 4, 0, 0)).collect();
        let board = Board::new(FixedLayout(positions), StandardCatalog, ScriptedRng::identity());
        App::new(Session::new(board, Settings::default()))
    }

    #[test]
    fn test_idle_has_no_cursor() {
        let a = app(2);
        assert_eq!(a.cursor(), None);
        assert_eq!(a.snapshot().state, SessionState::Idle);
    }

    #[test]
    fn test_keyboard_match_flow() {
        let mut a = app(4);
        a.handle(InputCommand::Action(SessionAction::NewGame));
        assert_eq!(a.cursor(), Some(TileRef(0)));

        assert_eq!(a.handle(InputCommand::Select), Some(BoardEvent::Select));
        assert_eq!(a.session().board().selected(), Some(TileRef(0)));

        a.handle(InputCommand::Move(Direction::Right));
        assert_eq!(a.cursor(), Some(TileRef(1)));

        let ev = a.click(TileRef(1));
        assert_eq!(ev, Some(BoardEvent::Match));
        assert_eq!(a.flash_text(), Some("MATCH"));
        assert_eq!(a.snapshot().remaining, 2);
        // Cursor moved off the removed tile.
        assert_eq!(a.cursor(), Some(TileRef(2)));
    }

    #[test]
    fn test_win_and_flash_expiry() {
        let mut a = app(2);
        a.handle(InputCommand::Action(SessionAction::NewGame));
        a.click(TileRef(0));
        assert_eq!(a.click(TileRef(1)), Some(BoardEvent::Won));
        assert_eq!(a.snapshot().state, SessionState::Won);
        assert_eq!(a.flash_text(), Some("SOLVED"));
        assert_eq!(a.cursor(), None);

        a.advance(FLASH_MS - 1);
        assert!(a.flash_text().is_some());
        a.advance(1);
        assert_eq!(a.flash_text(), None);
        assert!(a.take_settings_dirty());
    }

    #[test]
    fn test_help_and_resume() {
        let mut a = app(2);
        a.handle(InputCommand::Action(SessionAction::NewGame));
        a.handle(InputCommand::Action(SessionAction::TogglePause));
        a.handle(InputCommand::Help);
        assert!(a.show_help());

        // First Esc closes help, second resumes.
        a.handle(InputCommand::Resume);
        assert!(!a.show_help());
        assert_eq!(a.session().state(), SessionState::Paused);
        a.handle(InputCommand::Resume);
        assert_eq!(a.session().state(), SessionState::Running);
    }

    #[test]
    fn test_help_stops_the_clock_while_open() {
        let mut a = app(2);
        a.handle(InputCommand::Action(SessionAction::NewGame));
        assert!(a.tick(500));

        a.handle(InputCommand::Help);
        assert!(a.show_help());
        assert_eq!(a.session().state(), SessionState::Paused);
        assert!(!a.tick(1000));

        a.handle(InputCommand::Help);
        assert_eq!(a.session().state(), SessionState::Running);
        assert!(a.tick(250));
        assert_eq!(a.session().elapsed_ms(), 750);

        // Esc closes the overlay and resumes the same way.
        a.handle(InputCommand::Help);
        assert!(!a.tick(1000));
        a.handle(InputCommand::Resume);
        assert!(!a.show_help());
        assert_eq!(a.session().state(), SessionState::Running);
        assert_eq!(a.session().elapsed_ms(), 750);
    }

    #[test]
    fn test_help_keeps_a_manual_pause() {
        let mut a = app(2);
        a.handle(InputCommand::Action(SessionAction::NewGame));
        a.handle(InputCommand::Help);
        // Unpause then pause again by hand while help is up.
        a.handle(InputCommand::Action(SessionAction::TogglePause));
        a.handle(InputCommand::Action(SessionAction::TogglePause));
        a.handle(InputCommand::Help);
        assert!(!a.show_help());
        assert_eq!(a.session().state(), SessionState::Paused);
    }

    #[test]
    fn test_click_behind_help_only_dismisses_it() {
        let mut a = app(2);
        a.handle(InputCommand::Action(SessionAction::NewGame));
        a.handle(InputCommand::Help);

        assert_eq!(a.click(TileRef(0)), None);
        assert!(!a.show_help());
        assert_eq!(a.session().board().selected(), None);
        assert_eq!(a.session().state(), SessionState::Running);

        assert_eq!(a.click(TileRef(0)), Some(BoardEvent::Select));
    }

    #[test]
    fn test_hint_moves_cursor() {
        let mut a = app(6);
        a.handle(InputCommand::Action(SessionAction::NewGame));
        a.handle(InputCommand::Move(Direction::Right));
        a.handle(InputCommand::Move(Direction::Right));
        assert_eq!(a.cursor(), Some(TileRef(2)));
        a.handle(InputCommand::Action(SessionAction::Hint));
        assert_eq!(a.cursor(), Some(TileRef(0)));
        assert!(a.snapshot().tiles[0].hinted);
    }

    #[test]
    fn test_undo_feedback() {
        let mut a = app(4);
        a.handle(InputCommand::Action(SessionAction::NewGame));
        a.handle(InputCommand::Action(SessionAction::Undo));
        assert_eq!(a.flash_text(), Some("NOTHING TO UNDO"));
    }

    #[test]
    fn test_sound_and_theme_commands() {
        let mut a = app(2);
        a.handle(InputCommand::ToggleSound);
        assert_eq!(a.flash_text(), Some("SOUND OFF"));
        assert!(!a.snapshot().sound_enabled);
        a.handle(InputCommand::CycleTheme);
        assert_eq!(a.snapshot().theme, "blue");
        assert!(a.take_settings_dirty());
    }

    #[test]
    fn test_clicks_ignored_unless_running() {
        let mut a = app(2);
        assert_eq!(a.click(TileRef(0)), None);
        a.handle(InputCommand::Action(SessionAction::NewGame));
        a.handle(InputCommand::Action(SessionAction::TogglePause));
        assert_eq!(a.click(TileRef(0)), None);
        assert_eq!(a.session().board().selected(), None);
    }

    #[test]
    fn test_tick_updates_clock() {
        let mut a = app(2);
        assert!(!a.tick(1000));
        a.handle(InputCommand::Action(SessionAction::NewGame));
        assert!(a.tick(1000));
        assert_eq!(a.snapshot().elapsed_ms, 1000);
    }

    #[test]
    fn test_bell_events() {
        assert!(rings_bell(BoardEvent::Match));
        assert!(rings_bell(BoardEvent::Invalid));
        assert!(!rings_bell(BoardEvent::Select));
    }
}
