//! Board scenarios driven through the public API.

use mahjong_tui::core::{Board, FixedLayout, ScriptedRng, StandardCatalog};
use mahjong_tui::types::{BoardEvent, Position, TileId, TileKind, TileRef};

type TestBoard = Board<FixedLayout, StandardCatalog, ScriptedRng>;

fn kind(name: &str) -> TileKind {
    TileKind::from_str(name).unwrap()
}

fn board_with(placements: &[(&str, (i16, i16, i16))]) -> TestBoard {
    TestBoard::from_placements(
        StandardCatalog,
        ScriptedRng::identity(),
        placements.iter().enumerate().map(|(i, (name, (x, y, z)))| {
            (TileId::new(kind(name), i as u8), Position::new(*x, *y, *z))
        }),
    )
}

#[test]
fn test_two_tile_board_is_won_in_one_match() {
    let mut board = board_with(&[("do1", (0, 0, 0)), ("do1", (2, 0, 0))]);

    assert_eq!(board.handle_selection(TileRef(0)).as_slice(), &[BoardEvent::Select]);
    assert_eq!(
        board.handle_selection(TileRef(1)).as_slice(),
        &[BoardEvent::Match, BoardEvent::Won]
    );
    assert_eq!(board.remaining_count(), 0);
    assert_eq!(board.removed_count(), 2);
}

#[test]
fn test_row_of_three_only_ends_are_free() {
    let board = board_with(&[
        ("do1", (0, 0, 0)),
        ("do2", (2, 0, 0)),
        ("do1", (4, 0, 0)),
    ]);

    assert!(board.is_free(TileRef(0)));
    assert!(!board.is_free(TileRef(1)));
    assert!(board.is_free(TileRef(2)));
    assert_eq!(board.free_tiles(), vec![TileRef(0), TileRef(2)]);
}

#[test]
fn test_removing_an_end_frees_the_middle() {
    let mut board = board_with(&[
        ("do1", (0, 0, 0)),
        ("do2", (2, 0, 0)),
        ("do1", (4, 0, 0)),
        ("do2", (8, 0, 0)),
    ]);

    board.handle_selection(TileRef(0));
    let events = board.handle_selection(TileRef(2));
    assert_eq!(events.as_slice(), &[BoardEvent::Match]);
    assert!(board.is_free(TileRef(1)));
    assert!(board.has_valid_moves());
}

#[test]
fn test_stacked_tile_blocks_the_one_below() {
    let mut board = board_with(&[
        ("wi_east", (0, 0, 0)),
        ("wi_east", (0, 0, 1)),
        ("dr_red", (6, 0, 0)),
        ("dr_red", (10, 0, 0)),
    ]);

    assert!(!board.is_free(TileRef(0)));
    assert_eq!(
        board.handle_selection(TileRef(0)).as_slice(),
        &[BoardEvent::Invalid]
    );
    assert_eq!(board.selected(), None);

    // Clearing the red dragons leaves the stacked winds, one on the other.
    board.handle_selection(TileRef(2));
    let events = board.handle_selection(TileRef(3));
    assert_eq!(events.as_slice(), &[BoardEvent::Match, BoardEvent::Lost]);
}

#[test]
fn test_column_of_three_frees_from_the_top_down() {
    let mut board = board_with(&[
        ("do5", (4, 4, 0)),
        ("ba2", (4, 4, 1)),
        ("ba1", (4, 4, 2)),
        ("ba1", (10, 4, 0)),
        ("ba2", (14, 4, 0)),
    ]);

    assert!(!board.is_free(TileRef(0)));
    assert!(!board.is_free(TileRef(1)));
    assert!(board.is_free(TileRef(2)));

    board.handle_selection(TileRef(2));
    board.handle_selection(TileRef(3));
    assert!(!board.is_free(TileRef(0)));
    assert!(board.is_free(TileRef(1)));

    board.handle_selection(TileRef(1));
    let events = board.handle_selection(TileRef(4));
    assert!(board.is_free(TileRef(0)));
    // The bottom tile is left with nothing to pair it with.
    assert_eq!(events.as_slice(), &[BoardEvent::Match, BoardEvent::Lost]);
}

#[test]
fn test_full_deal_uses_the_whole_catalog() {
    let mut board = Board::with_seed(77);
    board.initialize("dragon");

    let mut counts = std::collections::HashMap::new();
    for t in board.tiles() {
        *counts.entry(t.kind()).or_insert(0) += 1;
    }
    assert_eq!(counts.len(), TileKind::ALL.len());
    for kind in TileKind::ALL {
        let expected = if kind.is_special() { 1 } else { 4 };
        assert_eq!(counts[&kind], expected, "{}", kind);
    }
}

#[test]
fn test_wildcard_pairs_match_within_group_only() {
    let mut board = board_with(&[
        ("se_spring", (0, 0, 0)),
        ("fl_plum", (4, 0, 0)),
        ("se_winter", (8, 0, 0)),
        ("fl_bamboo", (12, 0, 0)),
    ]);

    board.handle_selection(TileRef(0));
    assert_eq!(
        board.handle_selection(TileRef(1)).as_slice(),
        &[BoardEvent::Select]
    );
    assert_eq!(board.selected(), Some(TileRef(1)));
    assert_eq!(
        board.handle_selection(TileRef(3)).as_slice(),
        &[BoardEvent::Match]
    );
    board.handle_selection(TileRef(0));
    assert_eq!(
        board.handle_selection(TileRef(2)).as_slice(),
        &[BoardEvent::Match, BoardEvent::Won]
    );
}

#[test]
fn test_hint_finds_the_only_pair() {
    let mut board = board_with(&[
        ("ba3", (0, 0, 0)),
        ("ch7", (4, 0, 0)),
        ("ba5", (8, 0, 0)),
        ("ch7", (12, 0, 0)),
    ]);

    assert_eq!(board.find_hint(), Some((TileRef(1), TileRef(3))));
    assert!(board.hint());
    assert_eq!(board.hinted(), &[TileRef(1), TileRef(3)]);
}

#[test]
fn test_hint_reports_none_when_stuck() {
    let mut board = board_with(&[("ba3", (0, 0, 0)), ("ch7", (4, 0, 0))]);
    assert_eq!(board.find_hint(), None);
    assert!(!board.hint());
    assert!(board.hinted().is_empty());
    assert!(!board.has_valid_moves());
}

#[test]
fn test_undo_puts_the_pair_back_where_it_was() {
    let mut board = board_with(&[
        ("do9", (0, 0, 0)),
        ("do9", (2, 0, 0)),
        ("do4", (6, 0, 0)),
        ("do4", (10, 0, 0)),
    ]);
    let before: Vec<_> = board.tiles().to_vec();

    board.handle_selection(TileRef(0));
    board.handle_selection(TileRef(1));
    assert!(board.can_undo());
    assert_eq!(board.remaining_count(), 2);

    assert!(board.undo());
    assert!(!board.undo());
    assert_eq!(board.remaining_count(), 4);
    assert_eq!(board.tiles(), before.as_slice());
}

#[test]
fn test_shuffle_only_moves_identities() {
    let mut board = Board::new(FixedLayout::default(), StandardCatalog, ScriptedRng::new(vec![0, 1, 0]));
    board.load_placements(
        ["do1", "do1", "do2", "do2", "do3", "do3"]
            .iter()
            .enumerate()
            .map(|(i, name)| (TileId::new(kind(name), i as u8), Position::new(i as i16 * 4, 0, 0))),
    );
    board.handle_selection(TileRef(0));
    board.handle_selection(TileRef(1));

    let positions: Vec<_> = board.tiles().iter().map(|t| t.pos).collect();
    let mut ids: Vec<_> = board.tiles().iter().map(|t| t.id).collect();
    ids.sort();
    let live_before: Vec<_> = board.tiles()[2..].iter().map(|t| t.id).collect();

    board.shuffle();

    let after_positions: Vec<_> = board.tiles().iter().map(|t| t.pos).collect();
    let mut after_ids: Vec<_> = board.tiles().iter().map(|t| t.id).collect();
    after_ids.sort();
    let live_after: Vec<_> = board.tiles()[2..].iter().map(|t| t.id).collect();

    assert_eq!(positions, after_positions);
    assert_eq!(ids, after_ids);
    assert_ne!(live_before, live_after);
    assert!(board.tiles()[0].picked);
    assert!(board.tiles()[1].picked);
    assert_eq!(board.remaining_count(), 4);
}

#[test]
fn test_seeded_boards_are_reproducible() {
    let mut a = Board::with_seed(2024);
    let mut b = Board::with_seed(2024);
    a.initialize("dragon");
    b.initialize("dragon");
    assert_eq!(a.tiles(), b.tiles());
    assert_eq!(a.tiles().len(), 144);
    assert_eq!(a.layout_name(), "dragon");
}
