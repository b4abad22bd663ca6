//! Terminal Mahjong solitaire runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer.
//! Diagnostics are collected while the alternate screen is up and written to
//! stderr after the terminal is restored.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};

use mahjong_tui::app::rings_bell;
use mahjong_tui::core::{LayoutSource, Session, SettingsStore, Shuffler, TileSource};
use mahjong_tui::input::{handle_key_event, should_quit};
use mahjong_tui::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use mahjong_tui::types::{FRAME_MS, TICK_MS};
use mahjong_tui::{App, AppConfig};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    let store = SettingsStore::new(&config.settings_dir);
    let mut log = Vec::new();

    let mut settings = match store.try_load() {
        Ok(settings) => settings,
        Err(e) => {
            if store.path().exists() {
                log.push(format!(
                    "[Settings] ignoring {}: {}",
                    store.path().display(),
                    e
                ));
            }
            Default::default()
        }
    };
    if let Some(layout) = config.layout {
        settings.layout = layout.as_str().to_string();
    }

    let mut session = Session::with_seed(config.seed, settings);
    session.new_game();
    let mut app = App::new(session);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app, &store, &mut log);

    // Always try to restore terminal state.
    let _ = term.exit();
    for line in &log {
        eprintln!("{}", line);
    }
    result
}

fn run<L, C, R>(
    term: &mut TerminalRenderer,
    app: &mut App<L, C, R>,
    store: &SettingsStore,
    log: &mut Vec<String>,
) -> Result<()>
where
    L: LayoutSource,
    C: TileSource,
    R: Shuffler,
{
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(TICK_MS as u64);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let mut last_frame = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let frame_duration = Duration::from_millis(FRAME_MS as u64);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        // Render.
        let hud = app.hud();
        let fingerprint = {
            let mut hasher = DefaultHasher::new();
            app.snapshot().hash(&mut hasher);
            hud.hash(&mut hasher);
            (w, h).hash(&mut hasher);
            hasher.finish()
        };
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, fingerprint, true) {
            view.render_into(app.snapshot(), &hud, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next frame.
        let timeout = frame_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            let produced = match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        break;
                    }
                    handle_key_event(key).and_then(|cmd| app.handle(cmd))
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    if app.dismiss_help() {
                        None
                    } else {
                        view.hit_test(app.snapshot(), viewport, mouse.column, mouse.row)
                            .and_then(|tile| app.click(tile))
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    throttle.reset();
                    None
                }
                _ => None,
            };

            if let Some(event) = produced {
                if app.snapshot().sound_enabled && rings_bell(event) {
                    term.bell()?;
                }
            }

            if app.take_settings_dirty() {
                if let Err(e) = store.save(app.session().settings()) {
                    log.push(format!("[Settings] save failed: {}", e));
                }
            }
        }

        // Frame timers.
        if last_frame.elapsed() >= frame_duration {
            app.advance(last_frame.elapsed().as_millis() as u32);
            last_frame = Instant::now();
        }

        // Clock.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            app.tick(TICK_MS);
        }
    }

    Ok(())
}
