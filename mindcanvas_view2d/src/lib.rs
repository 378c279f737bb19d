// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mind Canvas View 2D: pan/zoom state and coordinate conversion.
//!
//! This crate provides the headless camera model for an infinite canvas whose
//! element positions live in an unbounded **canvas logical space**, while
//! pointer input arrives in **viewport pixel space**. It focuses on:
//! - [`ViewState`]: pan offset, uniform zoom scale, and cached surface sizes.
//! - Pure conversions between pixel and canvas coordinates.
//! - The canvas point under the viewport center, used to place new elements.
//!
//! It does **not** own any elements or rendering. Callers are expected to:
//! - Feed gesture input into [`ViewState::pan_by`] / [`ViewState::zoom_about`].
//! - Refresh [`ViewState::set_canvas_size`] / [`ViewState::set_container_size`]
//!   on mount and resize only, never per frame.
//! - Compare [`ViewState::revision`] to notice changes cheaply.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use mindcanvas_view2d::{ViewState, canvas_to_pixel, pixel_to_canvas};
//!
//! let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
//! let mut view = ViewState::new();
//! view.set_scale(2.0);
//!
//! let canvas = pixel_to_canvas(Point::new(200.0, 100.0), viewport, &view);
//! assert_eq!(canvas, Point::new(100.0, 50.0));
//!
//! let back = canvas_to_pixel(canvas, viewport, &view);
//! assert_eq!(back, Point::new(200.0, 100.0));
//!
//! // Panning shifts the canvas under the pointer.
//! view.pan_by(Vec2::new(-500.0, 0.0));
//! let canvas = pixel_to_canvas(Point::new(50.0, 100.0), viewport, &view);
//! assert_eq!(canvas.x, 275.0);
//! ```
//!
//! ## Design notes
//!
//! - Zoom is uniform and axis aligned; there is no rotation.
//! - `scale > 0` is enforced when the scale is set, so the conversions can
//!   divide by it unconditionally.
//!
//! This crate is `no_std`.

#![no_std]

mod transform;
mod view_state;

pub use transform::{
    canvas_to_pixel, center_relative_to_canvas, pixel_to_canvas, window_center_in_canvas,
};
pub use view_state::{ViewState, ViewStateDebugInfo};
