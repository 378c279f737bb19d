// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure conversions between viewport pixel space and canvas logical space.

use kurbo::{Point, Rect, Size};

use crate::ViewState;

/// Converts a pointer position in viewport pixels into canvas coordinates.
///
/// `viewport` is the pixel rectangle of the drawing surface; only its origin
/// participates. The mapping is
/// `canvas = (pixel - viewport.origin - offset) / scale` per axis.
#[must_use]
pub fn pixel_to_canvas(pixel: Point, viewport: Rect, view: &ViewState) -> Point {
    let offset = view.offset();
    let scale = view.scale();
    Point::new(
        (pixel.x - viewport.x0 - offset.x) / scale,
        (pixel.y - viewport.y0 - offset.y) / scale,
    )
}

/// Converts a canvas position into viewport pixel coordinates.
///
/// This is the inverse of [`pixel_to_canvas`] for the same `viewport` and view.
#[must_use]
pub fn canvas_to_pixel(canvas: Point, viewport: Rect, view: &ViewState) -> Point {
    let offset = view.offset();
    let scale = view.scale();
    Point::new(
        canvas.x * scale + offset.x + viewport.x0,
        canvas.y * scale + offset.y + viewport.y0,
    )
}

/// Returns the canvas point currently shown at the center of the viewport.
///
/// Newly created elements are placed here. The result is
/// `canvas_size / 2 - offset / scale` per axis, or the origin while the
/// canvas size is still unknown.
#[must_use]
pub fn window_center_in_canvas(view: &ViewState, canvas_size: Size) -> Point {
    if canvas_size.width <= 0.0 || canvas_size.height <= 0.0 {
        return Point::ZERO;
    }
    let offset = view.offset();
    let scale = view.scale();
    Point::new(
        canvas_size.width / 2.0 - offset.x / scale,
        canvas_size.height / 2.0 - offset.y / scale,
    )
}

/// Maps a client position to canvas space relative to the viewport center.
///
/// This is the mapping used by cursor tracking: the distance from the center
/// of `viewport`, divided by the scale, added to [`window_center_in_canvas`].
#[must_use]
pub fn center_relative_to_canvas(client: Point, viewport: Rect, view: &ViewState) -> Point {
    let center = window_center_in_canvas(view, view.canvas_size());
    let from_center = client - viewport.center();
    center + from_center / view.scale()
}
