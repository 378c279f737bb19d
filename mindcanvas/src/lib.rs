// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mind Canvas: the core of an infinite-canvas note and mind-map editor.
//!
//! This crate wires the building blocks together behind one [`Canvas`]:
//!
//! - [`view2d`]: pan/zoom state and pixel ↔ canvas conversions.
//! - [`area`]: visible and preload bounds, used to decide which elements are
//!   eligible for rendering.
//! - [`elements`]: the element store, its parent/child tree, and selection.
//! - [`drag`]: pointer-driven selection and multi-element dragging.
//! - [`persist`]: JSON snapshots, storage backends, and autosave.
//! - [`timing`]: the debounce, throttle, and interval helpers the others use.
//!
//! The canvas renders nothing and owns no clock. A host forwards pointer
//! input, reports surface sizes, passes millisecond timestamps, and calls
//! [`Canvas::tick`] from its event loop.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use mindcanvas::{Canvas, CanvasConfig};
//! use mindcanvas::elements::ElementKind;
//! use mindcanvas::persist::{CanvasStorage, MemoryBackend};
//!
//! let mut canvas = Canvas::new(CanvasConfig::default());
//! canvas.resize(Rect::new(0.0, 0.0, 800.0, 600.0), Size::new(800.0, 600.0), 0);
//!
//! let center = canvas.window_center();
//! let title = canvas.create_title(center, Some("Ideas")).unwrap();
//!
//! // Bounds are recomputed after a short debounce.
//! canvas.tick(50);
//! assert_eq!(canvas.visible_ids_by_type(&ElementKind::Title), vec![title]);
//!
//! let mut storage = CanvasStorage::new(MemoryBackend::new());
//! canvas.save(&mut storage).unwrap();
//!
//! let mut reopened = Canvas::default();
//! assert!(reopened.load(&mut storage, 0));
//! assert_eq!(reopened.store().len(), 1);
//! ```

mod canvas;
mod config;
mod testdata;

pub use canvas::{Canvas, TickReport};
pub use config::CanvasConfig;
pub use testdata::generate_test_elements;

pub use mindcanvas_area as area;
pub use mindcanvas_drag as drag;
pub use mindcanvas_elements as elements;
pub use mindcanvas_persist as persist;
pub use mindcanvas_timing as timing;
pub use mindcanvas_view2d as view2d;
