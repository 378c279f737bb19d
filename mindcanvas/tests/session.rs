// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A host session driven end to end through the facade.

use kurbo::{Point, Rect, Size, Vec2};
use mindcanvas::drag::{DragPhase, Modifiers, PointerEvent};
use mindcanvas::elements::{ElementKind, StoreEvent};
use mindcanvas::persist::{
    CanvasStorage, FileBackend, MemoryBackend, STORAGE_KEY, StorageBackend,
};
use mindcanvas::{Canvas, CanvasConfig};

fn mount(canvas: &mut Canvas, now: u64) {
    canvas.resize(
        Rect::new(0.0, 0.0, 800.0, 600.0),
        Size::new(800.0, 600.0),
        now,
    );
    canvas.tick(now + canvas.config().recompute_debounce_ms);
}

#[test]
fn drag_then_autosave_then_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = CanvasStorage::new(FileBackend::new(dir.path()));

    let mut canvas = Canvas::default();
    mount(&mut canvas, 0);
    let title = canvas
        .create_title(Point::new(100.0, 100.0), Some("Roadmap"))
        .unwrap();
    let note = canvas
        .create_markdown(Point::new(100.0, 200.0), Some("# Q3"))
        .unwrap();
    canvas.take_events();

    // Select both, then drag the title; the note follows.
    assert!(canvas.pointer_down(Some(title), PointerEvent::new(Point::new(110.0, 110.0), 100)));
    canvas.pointer_up(PointerEvent::new(Point::new(110.0, 110.0), 110));
    assert!(!canvas.on_click());
    canvas.tick(120);
    assert!(canvas.pointer_down(
        Some(note),
        PointerEvent::new(Point::new(105.0, 205.0), 200).with_modifiers(Modifiers::CTRL),
    ));
    assert_eq!(canvas.store().selection().len(), 2);

    assert!(canvas.pointer_move(PointerEvent::new(Point::new(155.0, 225.0), 220)));
    assert!(canvas.pointer_up(PointerEvent::new(Point::new(205.0, 255.0), 230)));
    assert!(canvas.on_click());

    assert_eq!(canvas.store().get_position(title), Some(Point::new(200.0, 150.0)));
    assert_eq!(canvas.store().get_position(note), Some(Point::new(200.0, 250.0)));
    assert!(
        canvas
            .take_events()
            .iter()
            .any(|event| matches!(event, StoreEvent::Moved(ids) if ids.len() == 2))
    );

    // Nothing is due until the edits have been quiet for the debounce.
    let due = canvas.config().autosave_debounce_ms;
    assert!(!canvas.tick(240).save_due);
    assert!(canvas.tick(240 + due).save_due);
    canvas.save(&mut storage).unwrap();
    assert!(!canvas.has_pending_save());

    let mut reopened = Canvas::default();
    mount(&mut reopened, 0);
    assert!(reopened.load(&mut storage, 1_000));
    assert_eq!(reopened.store().tree_order(), canvas.store().tree_order());
    assert_eq!(reopened.store().get_position(note), Some(Point::new(200.0, 250.0)));
    assert!(reopened.store().selection().is_empty());

    // Bounds are rebuilt after the load.
    reopened.tick(1_000 + reopened.config().recompute_debounce_ms);
    assert_eq!(reopened.visible_ids().len(), 2);
}

#[test]
fn view_survives_reload() {
    let mut storage = CanvasStorage::new(MemoryBackend::new());
    let mut canvas = Canvas::default();
    mount(&mut canvas, 0);
    canvas.pan_by(Vec2::new(-250.0, 40.0), 100);
    canvas.zoom_about(Point::new(400.0, 300.0), 2.0, 110);
    canvas.save(&mut storage).unwrap();

    let mut reopened = Canvas::default();
    assert!(reopened.load(&mut storage, 0));
    assert_eq!(reopened.view().offset(), canvas.view().offset());
    assert_eq!(reopened.view().scale(), 2.0);
}

#[test]
fn invalid_record_is_discarded_and_state_kept() {
    let mut storage = CanvasStorage::new(MemoryBackend::new());
    storage
        .backend_mut()
        .save(
            STORAGE_KEY,
            r#"{"elements":[],"rootIds":[],"viewState":{"offsetX":0,"offsetY":0,"scale":0}}"#,
        )
        .unwrap();

    let mut canvas = Canvas::default();
    let kept = canvas.create_title(Point::ZERO, None).unwrap();
    assert!(!canvas.load(&mut storage, 0));
    assert!(canvas.store().contains(kept));
    assert_eq!(storage.backend().load(STORAGE_KEY).unwrap(), None);

    // Nothing stored at all is just "no record".
    assert!(!canvas.load(&mut storage, 0));
}

#[test]
fn generated_elements_are_culled_by_the_preload_area() {
    let config = CanvasConfig {
        preload_margin: 0.0,
        ..CanvasConfig::default()
    };
    let mut canvas = Canvas::new(config);
    mount(&mut canvas, 0);
    let ids = canvas.generate_test_elements(200, 20_000.0, 3);
    assert_eq!(ids.len(), 600);

    let visible = canvas.visible_ids_by_type(&ElementKind::Text);
    let bounds = canvas.area().preload_bounds().unwrap();
    assert!(visible.len() < 200);
    for id in visible {
        let pt = canvas.store().get_position(id).unwrap();
        assert!(pt.x >= bounds.x0 && pt.x <= bounds.x1, "{pt:?} outside {bounds:?}");
        assert!(pt.y >= bounds.y0 && pt.y <= bounds.y1, "{pt:?} outside {bounds:?}");
    }
}

#[test]
fn load_ends_a_drag_in_progress() {
    let mut storage = CanvasStorage::new(MemoryBackend::new());
    let mut canvas = Canvas::default();
    mount(&mut canvas, 0);
    let a = canvas.create_title(Point::new(100.0, 100.0), None).unwrap();
    canvas.save(&mut storage).unwrap();

    canvas.pointer_down(Some(a), PointerEvent::new(Point::new(110.0, 110.0), 100));
    assert!(canvas.pointer_move(PointerEvent::new(Point::new(310.0, 110.0), 120)));
    assert_eq!(canvas.store().get_position(a), Some(Point::new(300.0, 100.0)));

    assert!(canvas.load(&mut storage, 130));
    assert_eq!(canvas.store().get_position(a), Some(Point::new(100.0, 100.0)));
    assert_eq!(canvas.drag().phase(), DragPhase::Idle);
    assert!(!canvas.drag().captures_pointer());

    // Later input from the old gesture leaves the loaded positions alone.
    assert!(!canvas.pointer_move(PointerEvent::new(Point::new(510.0, 110.0), 140)));
    assert!(!canvas.tick(200).drag_moved);
    assert!(!canvas.pointer_up(PointerEvent::new(Point::new(510.0, 110.0), 210)));
    assert!(!canvas.on_click());
    assert_eq!(canvas.store().get_position(a), Some(Point::new(100.0, 100.0)));
}

#[test]
fn clear_all_ends_a_drag_in_progress() {
    let mut canvas = Canvas::default();
    mount(&mut canvas, 0);
    let a = canvas.create_title(Point::new(100.0, 100.0), None).unwrap();
    canvas.pointer_down(Some(a), PointerEvent::new(Point::new(110.0, 110.0), 100));
    canvas.pointer_move(PointerEvent::new(Point::new(310.0, 110.0), 120));
    assert!(canvas.drag().captures_pointer());

    canvas.clear_all();
    assert!(!canvas.drag().captures_pointer());
    assert!(canvas.drag().session().is_none());
    assert!(canvas.store().is_empty());

    let b = canvas.create_title(Point::new(100.0, 100.0), None).unwrap();
    assert!(!canvas.pointer_move(PointerEvent::new(Point::new(510.0, 110.0), 140)));
    assert!(!canvas.pointer_up(PointerEvent::new(Point::new(510.0, 110.0), 150)));
    assert_eq!(canvas.store().get_position(b), Some(Point::new(100.0, 100.0)));
}
