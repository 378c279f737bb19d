// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless editing session.
//!
//! Mounts a canvas, fills it with sample notes, pans and zooms, drags a
//! selection, and autosaves to a JSON file, printing what the host would
//! render at each step.
//!
//! Run:
//! - `cargo run -p mindcanvas_demos --bin headless_session`
//! - `RUST_LOG=mindcanvas=debug cargo run -p mindcanvas_demos --bin headless_session`

use kurbo::{Point, Rect, Size, Vec2};
use mindcanvas::drag::{Modifiers, PointerEvent};
use mindcanvas::elements::ElementKind;
use mindcanvas::persist::{CanvasStorage, FileBackend};
use mindcanvas::{Canvas, CanvasConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var("MINDCANVAS_CONFIG") {
        Ok(text) => CanvasConfig::from_json(&text).unwrap_or_else(|err| {
            tracing::warn!(%err, "ignoring MINDCANVAS_CONFIG");
            CanvasConfig::default()
        }),
        Err(_) => CanvasConfig::default(),
    };
    println!("config: {}", serde_json::to_string(&config).unwrap_or_default());

    let dir = std::env::temp_dir().join("mindcanvas_demo");
    let mut storage = CanvasStorage::new(FileBackend::new(&dir));
    let mut canvas = Canvas::new(config);
    let mut now = 0;

    canvas.resize(
        Rect::new(0.0, 40.0, 1280.0, 760.0),
        Size::new(1280.0, 720.0),
        now,
    );
    if canvas.load(&mut storage, now) {
        println!("restored {} elements from {}", canvas.store().len(), dir.display());
    } else {
        canvas.generate_test_elements(100, 8000.0, 7);
        println!("generated {} elements", canvas.store().len());
    }
    now += 100;
    canvas.tick(now);
    report(&canvas, "mounted");

    // Pan right by half a screen, then zoom out around the pointer.
    canvas.pan_by(Vec2::new(-640.0, 0.0), now);
    canvas.zoom_about(Point::new(640.0, 400.0), 0.5, now);
    now += 100;
    canvas.tick(now);
    report(&canvas, "panned and zoomed out");

    // Add a title at the window center and drag it together with a second
    // element, as a user would with Ctrl held.
    let center = canvas.window_center();
    let title = match canvas.create_title(center, Some("Dragged")) {
        Ok(id) => id,
        Err(err) => {
            eprintln!("create failed: {err}");
            return;
        }
    };
    let press = canvas.canvas_to_pixel(center);
    canvas.pointer_down(Some(title), PointerEvent::new(press, now));
    if let Some(&other) = canvas
        .visible_ids_by_type(&ElementKind::Markdown)
        .first()
    {
        let at = canvas.canvas_to_pixel(canvas.store().get_position(other).unwrap_or_default());
        canvas.pointer_up(PointerEvent::new(press, now + 5));
        canvas.pointer_down(
            Some(other),
            PointerEvent::new(at, now + 10).with_modifiers(Modifiers::CTRL),
        );
    }
    for step in 1..=10 {
        let t = now + 10 + step * 8;
        let client = press + Vec2::new(step as f64 * 12.0, step as f64 * 4.0);
        canvas.pointer_move(PointerEvent::new(client, t));
        canvas.tick(t);
    }
    now += 200;
    canvas.pointer_up(PointerEvent::new(press + Vec2::new(120.0, 40.0), now));
    println!(
        "dragged {} element(s); title now at {:?}",
        canvas.store().selection().len(),
        canvas.store().get_position(title)
    );

    // Let the autosave debounce run out.
    loop {
        now += 50;
        if canvas.tick(now).save_due {
            break;
        }
    }
    match canvas.save(&mut storage) {
        Ok(()) => println!("saved to {}", dir.display()),
        Err(err) => eprintln!("save failed: {err}"),
    }
}

fn report(canvas: &Canvas, label: &str) {
    let view = canvas.view().debug_info();
    println!(
        "{label}: scale {:.2}, {} of {} elements render-eligible, preload {:?}",
        view.scale,
        canvas.visible_ids().len(),
        canvas.store().len(),
        canvas.area().preload_bounds(),
    );
}
