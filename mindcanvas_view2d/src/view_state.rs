// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::transform::pixel_to_canvas;

/// Pan/zoom state of the canvas.
///
/// `ViewState` tracks the pixel offset of the canvas logical origin, a uniform
/// zoom factor, and cached pixel sizes of the drawing surface and its
/// container. It can be used to:
/// - Pan by a pixel delta and zoom around an anchor pixel.
/// - Reset to the origin, or jump so that a canvas point sits at the center.
/// - Detect changes through a monotonically increasing revision.
///
/// The scale is always finite and positive: every setter clamps into the
/// configured limits and ignores non-positive or non-finite input.
#[derive(Clone, Debug)]
pub struct ViewState {
    offset: Vec2,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
    canvas_size: Size,
    container_size: Size,
    revision: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// Creates a view at the origin with no zoom.
    ///
    /// - Initial offset is zero and scale is `1.0`.
    /// - Scale is clamped to the range `[1e-3, 1e3]` by default.
    /// - Canvas and container sizes start unknown (zero).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            min_scale: 1e-3,
            max_scale: 1e3,
            canvas_size: Size::ZERO,
            container_size: Size::ZERO,
            revision: 0,
        }
    }

    /// Returns the pixel offset of the canvas origin.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Returns the current zoom factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the cached drawing-surface size in pixels.
    #[must_use]
    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Returns the cached viewport-container size in pixels.
    #[must_use]
    pub fn container_size(&self) -> Size {
        self.container_size
    }

    /// Returns the configured `(min, max)` zoom limits.
    #[must_use]
    pub fn scale_limits(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Returns a counter that is bumped whenever any field changes.
    ///
    /// No-op calls (for example, setting the current scale again) leave it
    /// unchanged.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The range is normalized so that `min <= max`, and non-positive bounds
    /// are ignored. The current scale is clamped into the new range.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        if !(min_scale > 0.0 && max_scale.is_finite()) {
            return;
        }
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.set_scale(self.scale);
    }

    /// Sets the pan offset in pixels.
    pub fn set_offset(&mut self, offset: Vec2) {
        if self.offset == offset || !offset.is_finite() {
            return;
        }
        self.offset = offset;
        self.bump();
    }

    /// Pans the view by a delta in pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.set_offset(self.offset + delta);
    }

    /// Sets the zoom factor, clamping it into the configured range.
    ///
    /// Non-positive and non-finite values are rejected so that the scale is
    /// always safe to divide by.
    pub fn set_scale(&mut self, scale: f64) {
        if !(scale > 0.0 && scale.is_finite()) {
            return;
        }
        let clamped = scale.clamp(self.min_scale, self.max_scale);
        if (self.scale - clamped).abs() < f64::EPSILON {
            return;
        }
        self.scale = clamped;
        self.bump();
    }

    /// Restores both offset and scale in one step, as done when loading a
    /// saved view.
    pub fn set_view(&mut self, offset: Vec2, scale: f64) {
        self.set_offset(offset);
        self.set_scale(scale);
    }

    /// Zooms by `factor` around a pointer position in viewport pixels.
    ///
    /// The canvas point under `anchor` stays under `anchor` as far as the
    /// clamped scale allows.
    pub fn zoom_about(&mut self, anchor: Point, viewport: Rect, factor: f64) {
        if !(factor > 0.0 && factor.is_finite()) {
            return;
        }
        let old_scale = self.scale;
        let new_scale = (old_scale * factor).clamp(self.min_scale, self.max_scale);
        if (new_scale - old_scale).abs() < f64::EPSILON {
            return;
        }

        let anchor_canvas = pixel_to_canvas(anchor, viewport, self);
        self.scale = new_scale;
        let offset = anchor - viewport.origin() - anchor_canvas.to_vec2() * new_scale;
        self.offset = offset;
        self.bump();
    }

    /// Resets the view to the origin with no zoom.
    pub fn reset(&mut self) {
        self.set_view(Vec2::ZERO, 1.0);
    }

    /// Pans so that `canvas_pt` is shown at the center of the viewport.
    ///
    /// This is the inverse of [`crate::window_center_in_canvas`]. It is a no-op
    /// while the canvas size is unknown.
    pub fn jump_to(&mut self, canvas_pt: Point) {
        let size = self.canvas_size;
        if size.width <= 0.0 || size.height <= 0.0 {
            return;
        }
        let center = Vec2::new(size.width / 2.0, size.height / 2.0);
        self.set_offset((center - canvas_pt.to_vec2()) * self.scale);
    }

    /// Records the drawing-surface size in pixels.
    pub fn set_canvas_size(&mut self, size: Size) {
        if self.canvas_size != size {
            self.canvas_size = size;
            self.bump();
        }
    }

    /// Records the viewport-container size in pixels.
    pub fn set_container_size(&mut self, size: Size) {
        if self.container_size != size {
            self.container_size = size;
            self.bump();
        }
    }

    /// Returns the affine transform mapping canvas coordinates into viewport
    /// pixels for the given viewport rectangle.
    ///
    /// Renderers can apply this directly to the element layer.
    #[must_use]
    pub fn canvas_to_pixel_transform(&self, viewport: Rect) -> Affine {
        // Canvas → pixel: scale, then translate by offset and viewport origin.
        Affine::translate(viewport.origin().to_vec2() + self.offset) * Affine::scale(self.scale)
    }

    /// Snapshot of the current view state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewStateDebugInfo {
        ViewStateDebugInfo {
            offset: self.offset,
            scale: self.scale,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            canvas_size: self.canvas_size,
            container_size: self.container_size,
            revision: self.revision,
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Debug snapshot of a [`ViewState`].
#[derive(Clone, Copy, Debug)]
pub struct ViewStateDebugInfo {
    /// Pixel offset of the canvas origin.
    pub offset: Vec2,
    /// Current zoom factor.
    pub scale: f64,
    /// Minimum zoom factor.
    pub min_scale: f64,
    /// Maximum zoom factor.
    pub max_scale: f64,
    /// Cached drawing-surface size.
    pub canvas_size: Size,
    /// Cached viewport-container size.
    pub container_size: Size,
    /// Change counter.
    pub revision: u64,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::ViewState;
    use crate::{canvas_to_pixel, pixel_to_canvas, window_center_in_canvas};

    #[test]
    fn new_view_is_identity() {
        let view = ViewState::new();
        assert_eq!(view.offset(), Vec2::ZERO);
        assert_eq!(view.scale(), 1.0);
        assert_eq!(view.revision(), 0);
    }

    #[test]
    fn scale_rejects_zero_negative_and_nan() {
        let mut view = ViewState::new();
        view.set_scale(0.0);
        view.set_scale(-2.0);
        view.set_scale(f64::NAN);
        assert_eq!(view.scale(), 1.0);
        assert_eq!(view.revision(), 0);
    }

    #[test]
    fn scale_is_clamped_to_limits() {
        let mut view = ViewState::new();
        view.set_scale_limits(5.0, 0.1);
        assert_eq!(view.scale_limits(), (0.1, 5.0));
        view.set_scale(50.0);
        assert_eq!(view.scale(), 5.0);
        view.set_scale(0.01);
        assert_eq!(view.scale(), 0.1);
    }

    #[test]
    fn zoom_about_keeps_anchor_fixed() {
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        let mut view = ViewState::new();
        view.set_offset(Vec2::new(30.0, -20.0));

        let anchor = Point::new(400.0, 300.0);
        let before = pixel_to_canvas(anchor, viewport, &view);
        view.zoom_about(anchor, viewport, 2.0);
        let after = pixel_to_canvas(anchor, viewport, &view);

        assert_eq!(view.scale(), 2.0);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn zoom_about_ignores_bad_factor() {
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        let mut view = ViewState::new();
        view.zoom_about(Point::ZERO, viewport, 0.0);
        view.zoom_about(Point::ZERO, viewport, -1.0);
        assert_eq!(view.scale(), 1.0);
    }

    #[test]
    fn jump_to_centers_point() {
        let mut view = ViewState::new();
        view.set_canvas_size(Size::new(2000.0, 1000.0));
        view.set_scale(2.0);
        let target = Point::new(-300.0, 40.0);
        view.jump_to(target);
        let center = window_center_in_canvas(&view, view.canvas_size());
        assert!((center.x - target.x).abs() < 1e-9);
        assert!((center.y - target.y).abs() < 1e-9);
    }

    #[test]
    fn reset_returns_to_origin() {
        let mut view = ViewState::new();
        view.set_view(Vec2::new(12.0, 34.0), 3.0);
        view.reset();
        assert_eq!(view.offset(), Vec2::ZERO);
        assert_eq!(view.scale(), 1.0);
    }

    #[test]
    fn revision_only_bumps_on_change() {
        let mut view = ViewState::new();
        view.set_container_size(Size::new(10.0, 10.0));
        assert_eq!(view.revision(), 1);
        view.set_container_size(Size::new(10.0, 10.0));
        view.pan_by(Vec2::ZERO);
        assert_eq!(view.revision(), 1);
        view.pan_by(Vec2::new(1.0, 0.0));
        assert_eq!(view.revision(), 2);
    }

    #[test]
    fn affine_matches_free_conversion() {
        let viewport = Rect::new(10.0, 20.0, 810.0, 620.0);
        let mut view = ViewState::new();
        view.set_view(Vec2::new(-70.0, 15.0), 1.5);
        let pt = Point::new(123.0, -45.0);
        let via_affine = view.canvas_to_pixel_transform(viewport) * pt;
        let via_fn = canvas_to_pixel(pt, viewport, &view);
        assert!((via_affine.x - via_fn.x).abs() < 1e-9);
        assert!((via_affine.y - via_fn.y).abs() < 1e-9);
    }
}
