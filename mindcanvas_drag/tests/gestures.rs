// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole gestures against a real store and a panned, offset viewport.

use kurbo::{Point, Rect, Size, Vec2};
use mindcanvas_drag::{DragContext, DragController, DragPhase, Modifiers, PointerEvent};
use mindcanvas_elements::{ElementKind, ElementStore, NewElement, StoreEvent};
use mindcanvas_view2d::ViewState;

fn view() -> ViewState {
    let mut view = ViewState::new();
    view.set_canvas_size(Size::new(1000.0, 800.0));
    view.set_container_size(Size::new(1000.0, 800.0));
    view.set_offset(Vec2::new(-500.0, 0.0));
    view
}

#[test]
fn plain_then_modifier_click_builds_selection() {
    let mut store = ElementStore::new();
    let x = store
        .create(NewElement::new(ElementKind::Title, Point::new(0.0, 0.0)))
        .unwrap();
    let y = store
        .create(NewElement::new(ElementKind::Title, Point::new(50.0, 0.0)))
        .unwrap();
    let view = view();
    let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
    let mut drag = DragController::default();
    let mut cx = DragContext::new(&mut store, &view, viewport);

    drag.pointer_down(&mut cx, Some(x), PointerEvent::new(Point::new(10.0, 10.0), 0));
    drag.pointer_up(&mut cx, PointerEvent::new(Point::new(10.0, 10.0), 5));
    assert_eq!(cx.store.selection().items(), &[x]);

    let ctrl = PointerEvent::new(Point::new(60.0, 10.0), 10).with_modifiers(Modifiers::CTRL);
    drag.pointer_down(&mut cx, Some(y), ctrl);
    drag.pointer_up(&mut cx, ctrl);
    assert_eq!(cx.store.selection().items(), &[x, y]);

    // A modifier press that deselects its target does not start a drag.
    let meta = PointerEvent::new(Point::new(60.0, 10.0), 20).with_modifiers(Modifiers::META);
    assert!(!drag.pointer_down(&mut cx, Some(y), meta));
    assert_eq!(drag.phase(), DragPhase::Idle);
    assert_eq!(cx.store.selection().items(), &[x]);
}

#[test]
fn drag_through_offset_viewport_emits_batched_moves() {
    let mut store = ElementStore::new();
    let a = store
        .create(NewElement::new(ElementKind::Markdown, Point::new(600.0, 100.0)))
        .unwrap();
    store.take_events();
    let view = view();
    // Canvas element placed 20px from the window edge.
    let viewport = Rect::new(20.0, 0.0, 1020.0, 800.0);
    let mut drag = DragController::default();
    let mut cx = DragContext::new(&mut store, &view, viewport);

    // Canvas x = (client - 20 + 500) / 1, so client 120 is canvas 600.
    drag.pointer_down(&mut cx, Some(a), PointerEvent::new(Point::new(120.0, 100.0), 0));
    drag.pointer_move(&mut cx, PointerEvent::new(Point::new(130.0, 100.0), 16));
    drag.pointer_move(&mut cx, PointerEvent::new(Point::new(135.0, 100.0), 20));
    assert!(drag.pointer_up(&mut cx, PointerEvent::new(Point::new(140.0, 100.0), 24)));

    assert_eq!(cx.store.get_position(a), Some(Point::new(620.0, 100.0)));
    let moves = cx
        .store
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, StoreEvent::Moved(_)))
        .count();
    assert_eq!(moves, 2, "one leading write plus the release write");
}

#[test]
fn second_press_restarts_the_session() {
    let mut store = ElementStore::new();
    let a = store
        .create(NewElement::new(ElementKind::Text, Point::ZERO))
        .unwrap();
    let b = store
        .create(NewElement::new(ElementKind::Text, Point::new(100.0, 0.0)))
        .unwrap();
    let view = ViewState::new();
    let viewport = Rect::new(0.0, 0.0, 400.0, 400.0);
    let mut drag = DragController::default();
    let mut cx = DragContext::new(&mut store, &view, viewport);

    drag.pointer_down(&mut cx, Some(a), PointerEvent::new(Point::ZERO, 0));
    drag.pointer_move(&mut cx, PointerEvent::new(Point::new(40.0, 0.0), 20));
    assert!(drag.is_dragging());

    drag.pointer_down(&mut cx, Some(b), PointerEvent::new(Point::new(100.0, 0.0), 30));
    assert_eq!(drag.phase(), DragPhase::Armed);
    assert_eq!(drag.session().map(|s| s.target()), Some(b));
    assert_eq!(drag.session().map(|s| s.anchors().len()), Some(1));
    // The first drag kept its last written position.
    assert_eq!(cx.store.get_position(a), Some(Point::new(40.0, 0.0)));
}
