use std::collections::HashSet;

use mahjong_tui::core::{LayoutName, Session, Settings};
use mahjong_tui::input::InputCommand;
use mahjong_tui::term::{FrameBuffer, GameView, HudState, Viewport};
use mahjong_tui::types::{SessionAction, SessionState};
use mahjong_tui::App;

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn running(layout: LayoutName) -> Session {
    let settings = Settings {
        layout: layout.as_str().to_string(),
        ..Settings::default()
    };
    let mut session = Session::with_seed(31, settings);
    session.new_game();
    session
}

#[test]
fn every_layout_renders_inside_a_large_terminal() {
    let view = GameView::default();
    let vp = Viewport::new(160, 60);
    for layout in LayoutName::ALL {
        let snap = running(layout).snapshot();
        let fb = view.render(&snap, &HudState::default(), vp);
        assert_eq!((fb.width(), fb.height()), (160, 60));
        let text = screen_text(&fb);
        assert!(
            text.contains(layout.as_str()),
            "{} missing from panel",
            layout.as_str()
        );
    }
}

#[test]
fn top_layer_tiles_are_all_clickable() {
    let view = GameView::default();
    let vp = Viewport::new(160, 60);
    let snap = running(LayoutName::Pyramid).snapshot();
    let max_z = snap.tiles.iter().map(|t| t.pos.z).max().unwrap();

    let mut hit = HashSet::new();
    for row in 0..vp.height {
        for col in 0..vp.width {
            if let Some(tile) = view.hit_test(&snap, vp, col, row) {
                assert!(snap.view(tile).is_some());
                hit.insert(tile);
            }
        }
    }

    for t in snap.tiles.iter().filter(|t| t.pos.z == max_z) {
        assert!(hit.contains(&t.tile), "{} not clickable", t.id);
    }
}

#[test]
fn mouse_click_on_a_free_tile_selects_it() {
    let view = GameView::default();
    let vp = Viewport::new(160, 60);
    let mut app = App::new(running(LayoutName::Turtle));
    app.refresh();

    let target = app
        .snapshot()
        .tiles
        .iter()
        .rev()
        .find(|t| t.free)
        .map(|t| t.tile)
        .unwrap();

    let cell = (0..vp.height)
        .flat_map(|row| (0..vp.width).map(move |col| (col, row)))
        .find(|&(col, row)| view.hit_test(app.snapshot(), vp, col, row) == Some(target))
        .unwrap();

    let clicked = view.hit_test(app.snapshot(), vp, cell.0, cell.1).unwrap();
    app.click(clicked);
    assert_eq!(app.session().board().selected(), Some(target));
    assert!(app.snapshot().view(target).unwrap().selected);
}

#[test]
fn pause_hides_the_board_from_the_mouse() {
    let view = GameView::default();
    let vp = Viewport::new(160, 60);
    let mut app = App::new(running(LayoutName::Castle));
    app.handle(InputCommand::Action(SessionAction::TogglePause));
    assert_eq!(app.snapshot().state, SessionState::Paused);

    for row in 0..vp.height {
        for col in 0..vp.width {
            assert_eq!(view.hit_test(app.snapshot(), vp, col, row), None);
        }
    }

    let fb = view.render(app.snapshot(), &app.hud(), vp);
    assert!(screen_text(&fb).contains("PAUSED"));
}

#[test]
fn help_overlay_covers_the_board_until_dismissed() {
    let view = GameView::default();
    let vp = Viewport::new(160, 60);
    let mut app = App::new(running(LayoutName::Turtle));
    app.handle(InputCommand::Help);
    assert_eq!(app.snapshot().state, SessionState::Paused);

    let cells = (0..vp.height).flat_map(|row| (0..vp.width).map(move |col| (col, row)));
    for (col, row) in cells {
        assert_eq!(view.hit_test(app.snapshot(), vp, col, row), None);
    }

    assert!(app.dismiss_help());
    assert!(!app.dismiss_help());
    assert_eq!(app.snapshot().state, SessionState::Running);
    assert!(app.session().board().selected().is_none());
}
