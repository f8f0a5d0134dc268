//! Integration tests: pointer gestures driven through the editor
//! (seat-editor ↔ seat-core).

use pretty_assertions::assert_eq;
use seat_core::{DeskId, DeskKind, Position};
use seat_editor::{Editor, ToolKind};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn editor_with(n: usize) -> (Editor, Vec<DeskId>) {
    let mut editor = Editor::default();
    let ids = editor.add_desks(n);
    (editor, ids)
}

fn marquee(editor: &mut Editor, from: (f32, f32), to: (f32, f32)) {
    editor.pointer_down(from.0, from.1).unwrap();
    editor.pointer_move(to.0, to.1).unwrap();
    editor.pointer_up(to.0, to.1).unwrap();
    editor.background_click();
    editor.tick();
}

fn position(editor: &Editor, id: DeskId) -> Position {
    editor.store().desk(id).unwrap().position
}

// ─── Marquee ────────────────────────────────────────────────────────────

#[test]
fn marquee_touching_a_desk_edge_selects_it() {
    init_logging();
    let (mut editor, ids) = editor_with(3);
    // Desk 1 occupies (125,0)-(225,50); the box only shares its bottom edge.
    // Dragging up-left exercises normalization.
    editor.pointer_down(225.0, 60.0).unwrap();
    editor.pointer_up(125.0, 50.0).unwrap();
    assert_eq!(editor.store().selection(), &[ids[1]]);
}

#[test]
fn empty_marquee_clears_previous_selection() {
    let (mut editor, ids) = editor_with(2);
    editor.click_desk(ids[0]).unwrap();
    editor.click_desk(ids[1]).unwrap();

    marquee(&mut editor, (600.0, 600.0), (700.0, 700.0));
    assert!(editor.store().selection().is_empty());
}

#[test]
fn marquee_collects_in_collection_order() {
    let (mut editor, ids) = editor_with(8);
    // Covers the first two columns of both rows.
    marquee(&mut editor, (-10.0, -10.0), (130.0, 80.0));
    assert_eq!(
        editor.store().selection(),
        &[ids[0], ids[1], ids[6], ids[7]]
    );
}

#[test]
fn trailing_click_after_marquee_is_suppressed_once() {
    let (mut editor, ids) = editor_with(2);
    editor.pointer_down(-10.0, -10.0).unwrap();
    editor.pointer_up(300.0, 300.0).unwrap();
    assert!(editor.is_background_click_suppressed());

    assert!(!editor.background_click());
    assert_eq!(editor.store().selection(), &[ids[0], ids[1]]);

    editor.tick();
    assert!(editor.background_click());
    assert!(editor.store().selection().is_empty());
}

#[test]
fn tick_drops_unused_suppression() {
    let (mut editor, ids) = editor_with(1);
    marquee(&mut editor, (-5.0, -5.0), (50.0, 50.0));
    assert_eq!(editor.store().selection(), &[ids[0]]);

    editor.pointer_down(400.0, 400.0).unwrap();
    editor.pointer_up(410.0, 410.0).unwrap();
    editor.tick();
    assert!(editor.background_click());
}

// ─── Drag ───────────────────────────────────────────────────────────────

#[test]
fn dragging_selection_moves_every_desk_by_the_same_snapped_vector() {
    let (mut editor, ids) = editor_with(3);
    editor.store_mut().move_desks(&[ids[2]], 0.0, 150.0).unwrap();
    marquee(&mut editor, (-10.0, -10.0), (400.0, 400.0));
    assert_eq!(editor.store().selection().len(), 3);
    let before: Vec<Position> = ids.iter().map(|id| position(&editor, *id)).collect();

    // Grab desk 1 and drop it (37, 61) away: snaps to (25, 50).
    editor.pointer_down(150.0, 20.0).unwrap();
    assert_eq!(editor.active_gesture(), Some(ToolKind::Drag));
    editor.pointer_move(170.0, 50.0).unwrap();
    editor.pointer_up(187.0, 81.0).unwrap();

    for (id, start) in ids.iter().zip(&before) {
        assert_eq!(position(&editor, *id), start.offset(25.0, 50.0));
    }
    assert_eq!(editor.store().selection().len(), 3);
}

#[test]
fn dragging_an_unselected_desk_moves_only_it() {
    let (mut editor, ids) = editor_with(3);
    editor.click_desk(ids[0]).unwrap();
    editor.click_desk(ids[1]).unwrap();

    editor.pointer_down(260.0, 10.0).unwrap();
    editor.pointer_up(260.0, 110.0).unwrap();

    assert_eq!(position(&editor, ids[2]), Position::new(250.0, 100.0));
    assert_eq!(position(&editor, ids[0]), Position::ORIGIN);
    assert_eq!(position(&editor, ids[1]), Position::new(125.0, 0.0));
    assert_eq!(editor.store().selection(), &[ids[0], ids[1]]);
}

#[test]
fn later_desk_wins_the_press_when_nothing_is_selected() {
    let (mut editor, ids) = editor_with(2);
    // Stack desk 1 on top of desk 0.
    editor.store_mut().move_desks(&[ids[1]], -125.0, 0.0).unwrap();
    editor.pointer_down(50.0, 25.0).unwrap();
    assert_eq!(editor.drag_payload(), &[ids[1]]);
}

#[test]
fn selected_desk_wins_the_press_over_a_later_unselected_one() {
    let (mut editor, ids) = editor_with(3);
    // Desk 1 now overlaps the right half of desk 0.
    editor.store_mut().move_desks(&[ids[1]], -75.0, 0.0).unwrap();
    editor.click_desk(ids[0]).unwrap();
    editor.click_desk(ids[2]).unwrap();

    editor.pointer_down(75.0, 25.0).unwrap();
    assert_eq!(editor.drag_payload(), &[ids[0], ids[2]]);

    editor.pointer_up(75.0, 75.0).unwrap();
    assert_eq!(position(&editor, ids[0]), Position::new(0.0, 50.0));
    assert_eq!(position(&editor, ids[1]), Position::new(50.0, 0.0));
    assert_eq!(position(&editor, ids[2]), Position::new(250.0, 50.0));
}

#[test]
fn second_press_during_drag_is_ignored() {
    let (mut editor, ids) = editor_with(2);
    editor.pointer_down(10.0, 10.0).unwrap();
    assert!(!editor.pointer_down(140.0, 10.0).unwrap());
    assert_eq!(editor.drag_payload(), &[ids[0]]);

    editor.pointer_up(60.0, 10.0).unwrap();
    assert_eq!(position(&editor, ids[0]), Position::new(50.0, 0.0));
    assert_eq!(position(&editor, ids[1]), Position::new(125.0, 0.0));
}

#[test]
fn second_press_during_marquee_is_ignored() {
    let (mut editor, ids) = editor_with(1);
    editor.pointer_down(300.0, 300.0).unwrap();
    assert!(!editor.pointer_down(10.0, 10.0).unwrap());
    assert_eq!(editor.active_gesture(), Some(ToolKind::Marquee));
    assert!(editor.drag_payload().is_empty());

    editor.pointer_up(-1.0, -1.0).unwrap();
    assert_eq!(editor.store().selection(), &[ids[0]]);
}

#[test]
fn cancelled_drag_leaves_desks_in_place() {
    let (mut editor, ids) = editor_with(1);
    editor.pointer_down(10.0, 10.0).unwrap();
    editor.pointer_move(400.0, 400.0).unwrap();
    editor.pointer_cancel().unwrap();

    assert_eq!(position(&editor, ids[0]), Position::ORIGIN);
    assert_eq!(editor.active_gesture(), None);
}

#[test]
fn cancelled_marquee_commits_at_last_point() {
    let (mut editor, ids) = editor_with(2);
    editor.pointer_down(-10.0, -10.0).unwrap();
    editor.pointer_move(20.0, 20.0).unwrap();
    editor.pointer_cancel().unwrap();

    assert_eq!(editor.store().selection(), &[ids[0]]);
    assert!(editor.marquee_rect().is_none());
}

// ─── Coordinates ────────────────────────────────────────────────────────

#[test]
fn client_coordinates_are_translated_by_canvas_origin() {
    let (mut editor, ids) = editor_with(2);
    editor.set_canvas_origin(200.0, 100.0);

    // Client (335, 110) is canvas (135, 10): inside desk 1, not desk 0.
    editor.pointer_down(335.0, 110.0).unwrap();
    assert_eq!(editor.drag_payload(), &[ids[1]]);
    editor.pointer_up(335.0, 135.0).unwrap();
    assert_eq!(position(&editor, ids[1]), Position::new(125.0, 25.0));

    editor.pointer_down(700.0, 400.0).unwrap();
    editor.pointer_move(650.0, 380.0).unwrap();
    let rect = editor.marquee_rect().unwrap();
    assert_eq!((rect.left, rect.top), (450.0, 280.0));
    assert_eq!((rect.right, rect.bottom), (500.0, 300.0));
}

// ─── End to end ─────────────────────────────────────────────────────────

#[test]
fn add_marquee_group_remove_walkthrough() {
    init_logging();
    let mut editor = Editor::default();
    let id1 = editor.add_desk(DeskKind::Student);
    let id2 = editor.add_desk(DeskKind::Student);
    assert_eq!(position(&editor, id1), Position::new(0.0, 0.0));
    assert_eq!(position(&editor, id2), Position::new(125.0, 0.0));

    // Start on the empty corner so the press does not grab desk 1.
    editor.pointer_down(300.0, 300.0).unwrap();
    editor.pointer_move(0.0, 0.0).unwrap();
    editor.pointer_up(0.0, 0.0).unwrap();
    assert!(!editor.background_click());
    assert_eq!(editor.store().selection(), &[id1, id2]);

    let gid = editor.group_selected("Front").unwrap();
    assert_eq!(editor.store().desk(id1).unwrap().group_id, Some(gid));
    assert_eq!(editor.store().desk(id2).unwrap().group_id, Some(gid));

    editor.click_desk(id1).unwrap();
    assert_eq!(editor.remove_selected().unwrap(), 1);
    assert_eq!(editor.store().group(gid).unwrap().desk_ids.as_slice(), &[id2]);
}
