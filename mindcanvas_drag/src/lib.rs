// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mind Canvas Drag: pointer-driven selection and multi-element dragging.
//!
//! [`DragController`] is a small state machine, **Idle → Armed → Dragging →
//! Idle**, fed with raw pointer events in client pixels:
//!
//! - **pointer down** on an element resolves the selection (plain press
//!   selects only that element, Ctrl/Command toggles it) and snapshots every
//!   selected element's start position and its offset from the pointer.
//! - **pointer move** within the threshold (5 px by default) writes nothing.
//!   Past it, every anchored element follows the pointer through
//!   [`ElementStore::batch_update_positions`](mindcanvas_elements::ElementStore::batch_update_positions),
//!   throttled to one write per 16 ms. A throttled move is flushed by
//!   [`DragController::tick`].
//! - **pointer up** writes the final position and remembers that the gesture
//!   was a drag until the next tick, so the click that browsers deliver after
//!   the release can be ignored with [`DragController::on_click`].
//!
//! The controller borrows its collaborators per event through a
//! [`DragContext`] instead of holding them.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use mindcanvas_drag::{DragContext, DragController, PointerEvent};
//! use mindcanvas_elements::ElementStore;
//! use mindcanvas_view2d::ViewState;
//!
//! let mut store = ElementStore::new();
//! let note = store.create_markdown(Point::new(100.0, 100.0), None).unwrap();
//! let view = ViewState::new();
//! let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
//!
//! let mut drag = DragController::default();
//! let mut cx = DragContext::new(&mut store, &view, viewport);
//! drag.pointer_down(&mut cx, Some(note), PointerEvent::new(Point::new(110.0, 110.0), 0));
//! drag.pointer_move(&mut cx, PointerEvent::new(Point::new(160.0, 130.0), 20));
//! assert!(drag.pointer_up(&mut cx, PointerEvent::new(Point::new(160.0, 130.0), 40)));
//!
//! // The click after a drag is suppressed.
//! assert!(drag.on_click());
//! assert_eq!(store.get_position(note), Some(Point::new(150.0, 120.0)));
//! ```

mod controller;
mod pointer;

pub use controller::{
    DragAnchor, DragConfig, DragContext, DragController, DragPhase, DragSession,
};
pub use pointer::{Modifiers, PointerEvent, PointerTrack};
