#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;

const TOL: f64 = 0.0625;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn setup() -> (OverlayStore, OverlayKey) {
    let mut store = OverlayStore::new();
    let key = store.draw_rect("edit", "r1", Rect::new(1.0, 1.0, 2.0, 1.0));
    (store, key)
}

fn active_editor(store: &OverlayStore, key: &OverlayKey) -> TransformEditor {
    let mut editor = TransformEditor::new();
    assert!(editor.start_drawing(store, key.clone(), None));
    editor
}

fn current_rect(store: &OverlayStore, key: &OverlayKey) -> Rect {
    store.get(key).and_then(Overlay::rect).unwrap()
}

// =============================================================
// Session lifecycle
// =============================================================

#[test]
fn new_editor_is_inactive() {
    let editor = TransformEditor::new();
    assert!(!editor.is_active());
    assert!(editor.target().is_none());
}

#[test]
fn start_drawing_activates_session() {
    let (store, key) = setup();
    let editor = active_editor(&store, &key);
    assert!(editor.is_active());
    assert_eq!(editor.target(), Some(&key));
    assert!(editor.is_target(store.get(&key).unwrap()));
}

#[test]
fn start_drawing_rejects_missing_overlay() {
    let (store, _) = setup();
    let mut editor = TransformEditor::new();
    assert!(!editor.start_drawing(&store, OverlayKey::new("edit", "missing"), None));
    assert!(!editor.is_active());
}

#[test]
fn start_drawing_rejects_lines() {
    let mut store = OverlayStore::new();
    let key = store.draw_line("edit", "l", pt(0.0, 0.0), pt(1.0, 1.0), 1.0);
    let mut editor = TransformEditor::new();
    assert!(!editor.start_drawing(&store, key, None));
}

#[test]
fn end_drawing_clears_session() {
    let (store, key) = setup();
    let mut editor = active_editor(&store, &key);
    editor.on_press(&store, pt(1.0, 1.0), TOL);
    editor.end_drawing();
    assert!(!editor.is_active());
    assert!(!editor.is_dragging());
}

#[test]
fn new_session_replaces_previous_target() {
    let (mut store, first) = setup();
    let second = store.draw_rect("edit", "r2", Rect::new(5.0, 5.0, 1.0, 1.0));
    let mut editor = active_editor(&store, &first);
    assert!(editor.start_drawing(&store, second.clone(), None));
    assert_eq!(editor.target(), Some(&second));
    assert!(!editor.is_target(store.get(&first).unwrap()));
}

// =============================================================
// Inactive handlers are no-ops
// =============================================================

#[test]
fn handlers_without_target_return_none() {
    let (mut store, key) = setup();
    let mut editor = TransformEditor::new();
    assert!(editor.on_press(&store, pt(1.0, 1.0), TOL).is_none());
    assert!(editor.on_drag(&mut store, pt(0.0, 0.0)).is_none());
    assert!(editor.on_release(&store).is_none());
    assert_eq!(current_rect(&store, &key), Rect::new(1.0, 1.0, 2.0, 1.0));
}

#[test]
fn press_outside_target_does_not_start_drag() {
    let (store, key) = setup();
    let mut editor = active_editor(&store, &key);
    assert!(editor.on_press(&store, pt(10.0, 10.0), TOL).is_none());
    assert!(!editor.is_dragging());
}

#[test]
fn hidden_target_is_not_grabbable() {
    let (mut store, key) = setup();
    let mut editor = active_editor(&store, &key);
    store.set_visible(&key, false);
    assert!(editor.on_press(&store, pt(2.0, 1.5), TOL).is_none());
}

// =============================================================
// Press / drag / release
// =============================================================

#[test]
fn drag_corner_resizes_against_opposite_anchor() {
    let (mut store, key) = setup();
    let mut editor = active_editor(&store, &key);
    assert_eq!(editor.on_press(&store, pt(3.0, 2.0), TOL), Some(HitZone::BottomRight));
    let rect = editor.on_drag(&mut store, pt(4.0, 3.0)).unwrap();
    assert_eq!(rect, Rect::new(1.0, 1.0, 3.0, 2.0));
    assert_eq!(current_rect(&store, &key), rect);
}

#[test]
fn drag_center_moves_without_resizing() {
    let (mut store, key) = setup();
    let mut editor = active_editor(&store, &key);
    assert_eq!(editor.on_press(&store, pt(2.0, 1.5), TOL), Some(HitZone::Center));
    editor.on_drag(&mut store, pt(2.5, 1.25));
    assert_eq!(current_rect(&store, &key), Rect::new(1.5, 0.75, 2.0, 1.0));
}

#[test]
fn dragged_corner_lands_on_pointer() {
    let (mut store, key) = setup();
    let mut editor = active_editor(&store, &key);
    // Press inside the tolerance but off the exact corner (3, 2).
    assert_eq!(editor.on_press(&store, pt(3.04, 2.03), TOL), Some(HitZone::BottomRight));
    editor.on_drag(&mut store, pt(4.0, 3.0));
    let rect = current_rect(&store, &key);
    assert_eq!((rect.right(), rect.bottom()), (4.0, 3.0));
    assert_eq!((rect.x, rect.y), (1.0, 1.0));
}

#[test]
fn dragged_edge_lands_on_pointer() {
    let (mut store, key) = setup();
    let mut editor = active_editor(&store, &key);
    assert_eq!(editor.on_press(&store, pt(0.97, 1.5), TOL), Some(HitZone::Left));
    editor.on_drag(&mut store, pt(0.5, 1.8));
    assert_eq!(current_rect(&store, &key), Rect::new(0.5, 1.0, 2.5, 1.0));
}

#[test]
fn center_drag_is_relative_to_press_origin() {
    let (mut store, key) = setup();
    let mut editor = active_editor(&store, &key);
    editor.on_press(&store, pt(2.0, 1.5), TOL);
    editor.on_drag(&mut store, pt(3.0, 1.5));
    editor.on_drag(&mut store, pt(2.5, 1.5));
    // Second drag is measured from the press point, not the previous drag.
    assert_eq!(current_rect(&store, &key), Rect::new(1.5, 1.0, 2.0, 1.0));
}

#[test]
fn release_invokes_hook_with_edited_overlay() {
    let (mut store, key) = setup();
    let seen: Rc<RefCell<Vec<Rect>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut editor = TransformEditor::new();
    let hook: FinishHook = Box::new(move |o: &Overlay| sink.borrow_mut().extend(o.rect()));
    assert!(editor.start_drawing(&store, key.clone(), Some(hook)));

    editor.on_press(&store, pt(1.0, 1.5), TOL);
    editor.on_drag(&mut store, pt(0.5, 1.5));
    let finished = editor.on_release(&store).unwrap();

    assert_eq!(finished.id, "r1");
    assert_eq!(*seen.borrow(), vec![Rect::new(0.5, 1.0, 2.5, 1.0)]);
    // Session stays active for further edits.
    assert!(editor.is_active());
    assert!(!editor.is_dragging());
}

#[test]
fn release_without_press_does_not_call_hook() {
    let (store, key) = setup();
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let mut editor = TransformEditor::new();
    editor.start_drawing(&store, key, Some(Box::new(move |_: &Overlay| *counter.borrow_mut() += 1)));
    assert!(editor.on_release(&store).is_none());
    assert_eq!(*calls.borrow(), 0);
}

// =============================================================
// resize
// =============================================================

#[test]
fn resize_edges_touch_one_axis() {
    let orig = Rect::new(0.0, 0.0, 4.0, 2.0);
    let start = pt(0.0, 0.0);
    assert_eq!(resize(&orig, HitZone::Top, start, pt(9.0, 1.0)), Rect::new(0.0, 1.0, 4.0, 1.0));
    assert_eq!(resize(&orig, HitZone::Bottom, start, pt(9.0, 1.5)), Rect::new(0.0, 0.0, 4.0, 1.5));
    assert_eq!(resize(&orig, HitZone::Left, start, pt(1.0, 9.0)), Rect::new(1.0, 0.0, 3.0, 2.0));
    assert_eq!(resize(&orig, HitZone::Right, start, pt(5.0, 9.0)), Rect::new(0.0, 0.0, 5.0, 2.0));
}

#[test]
fn resize_past_anchor_never_inverts() {
    let orig = Rect::new(0.0, 0.0, 2.0, 2.0);
    let start = pt(2.0, 2.0);
    for zone in HitZone::CORNERS.into_iter().chain(HitZone::EDGES) {
        for pointer in [pt(-5.0, -5.0), pt(7.0, -3.0), pt(-1.0, 9.0), pt(2.0, 2.0)] {
            let r = resize(&orig, zone, start, pointer);
            assert!(r.width >= 0.0 && r.height >= 0.0, "{zone:?} {pointer:?} -> {r:?}");
        }
    }
}

#[test]
fn resize_corner_flips_over_anchor() {
    let orig = Rect::new(0.0, 0.0, 2.0, 2.0);
    // Drag the bottom-right corner 3 units left and up, past the top-left anchor.
    let r = resize(&orig, HitZone::BottomRight, pt(2.0, 2.0), pt(-1.0, -1.0));
    assert_eq!(r, Rect::new(-1.0, -1.0, 1.0, 1.0));
}

#[test]
fn resize_top_left_keeps_bottom_right() {
    let orig = Rect::new(1.0, 1.0, 2.0, 2.0);
    let r = resize(&orig, HitZone::TopLeft, pt(1.0, 1.0), pt(0.5, 2.0));
    assert_eq!(r, Rect::new(0.5, 2.0, 2.5, 1.0));
    assert_eq!(r.right(), 3.0);
    assert_eq!(r.bottom(), 3.0);
}
