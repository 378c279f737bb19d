// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};
use mindcanvas_timing::{Debouncer, Interval};
use mindcanvas_view2d::ViewState;

/// Tuning for an [`AreaTracker`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaConfig {
    /// Canvas-space margin added around the visible bounds on every edge.
    pub margin: f64,
    /// Quiet period before a view change triggers a recompute, in milliseconds.
    pub recompute_debounce_ms: u64,
    /// Period of the preload reclaim timer, in milliseconds.
    pub reclaim_interval_ms: u64,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            margin: 1000.0,
            recompute_debounce_ms: 50,
            reclaim_interval_ms: 30_000,
        }
    }
}

/// What a call to [`AreaTracker::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AreaUpdate {
    /// The debounced recompute ran.
    pub recomputed: bool,
    /// The reclaim timer fired.
    pub reclaimed: bool,
    /// The preload bounds changed, so render eligibility may have changed.
    pub preload_changed: bool,
}

/// Computes the canvas-space rectangle shown by the viewport container.
///
/// The canvas center maps to the container center when the offset is zero:
/// each edge is `canvas_center ± container / 2 / scale - offset / scale`.
/// Returns `None` while either cached size is still unknown.
#[must_use]
pub fn visible_bounds(view: &ViewState) -> Option<Rect> {
    let canvas = view.canvas_size();
    let container = view.container_size();
    if canvas.width <= 0.0 || canvas.height <= 0.0 {
        return None;
    }
    if container.width <= 0.0 || container.height <= 0.0 {
        return None;
    }

    let scale = view.scale();
    let offset = view.offset();
    let center_x = canvas.width / 2.0 - offset.x / scale;
    let center_y = canvas.height / 2.0 - offset.y / scale;
    let half_w = container.width / 2.0 / scale;
    let half_h = container.height / 2.0 / scale;
    Some(Rect::new(
        center_x - half_w,
        center_y - half_h,
        center_x + half_w,
        center_y + half_h,
    ))
}

/// Tracks visible and preload bounds for a [`ViewState`].
///
/// ## Preload policy
///
/// - Uninitialized until the first successful recompute, which seeds it with
///   the visible bounds expanded by the margin.
/// - Each later recompute checks the four edges independently. An edge moves
///   out to `visible edge ± margin` only when the visible edge has crossed
///   it; edges never move in on this path.
/// - The reclaim timer resets it to `visible ± margin`, bounding its growth.
///
/// Because the growth path only ever expands, the preload bounds contain the
/// visible bounds after every recompute.
#[derive(Clone, Debug)]
pub struct AreaTracker {
    margin: f64,
    visible: Option<Rect>,
    preload: Option<Rect>,
    recompute: Debouncer,
    reclaim: Interval,
    seen_view_revision: Option<u64>,
    revision: u64,
}

impl AreaTracker {
    /// Creates a tracker with no bounds yet.
    #[must_use]
    pub fn new(config: AreaConfig) -> Self {
        Self {
            margin: config.margin.max(0.0),
            visible: None,
            preload: None,
            recompute: Debouncer::new(config.recompute_debounce_ms),
            reclaim: Interval::new(config.reclaim_interval_ms),
            seen_view_revision: None,
            revision: 0,
        }
    }

    /// Returns the preload margin.
    #[must_use]
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Returns the visible bounds from the last successful recompute.
    #[must_use]
    pub fn visible_bounds(&self) -> Option<Rect> {
        self.visible
    }

    /// Returns the preload bounds, or `None` before the first recompute.
    #[must_use]
    pub fn preload_bounds(&self) -> Option<Rect> {
        self.preload
    }

    /// Returns a counter bumped whenever the preload bounds change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if a debounced recompute is waiting.
    #[must_use]
    pub fn is_recompute_pending(&self) -> bool {
        self.recompute.is_pending()
    }

    /// Notes the current view; schedules a recompute if it changed since the
    /// last observation.
    ///
    /// Also starts the reclaim timer on first use.
    pub fn observe(&mut self, view: &ViewState, now: u64) {
        if !self.reclaim.is_running() {
            self.reclaim.start(now);
        }
        let revision = view.revision();
        if self.seen_view_revision != Some(revision) {
            self.seen_view_revision = Some(revision);
            self.recompute.schedule(now);
        }
    }

    /// Runs the debounced recompute and the reclaim timer if they are due.
    pub fn tick(&mut self, view: &ViewState, now: u64) -> AreaUpdate {
        let mut update = AreaUpdate::default();
        if self.recompute.poll(now) {
            update.recomputed = true;
            update.preload_changed |= self.recompute_now(view);
        }
        if self.reclaim.poll(now) {
            update.reclaimed = true;
            update.preload_changed |= self.reclaim_now();
        }
        update
    }

    /// Recomputes the bounds immediately, bypassing the debounce.
    ///
    /// Returns `true` if the preload bounds changed. Unknown surface sizes
    /// leave all bounds untouched.
    pub fn recompute_now(&mut self, view: &ViewState) -> bool {
        let Some(visible) = visible_bounds(view) else {
            tracing::trace!("surface size unknown, keeping previous bounds");
            return false;
        };
        self.visible = Some(visible);

        let expanded = visible.inflate(self.margin, self.margin);
        let Some(current) = self.preload else {
            tracing::debug!(?expanded, "preload bounds initialized");
            self.set_preload(expanded);
            return true;
        };

        let mut next = current;
        if visible.x0 < current.x0 {
            next.x0 = expanded.x0;
        }
        if visible.x1 > current.x1 {
            next.x1 = expanded.x1;
        }
        if visible.y0 < current.y0 {
            next.y0 = expanded.y0;
        }
        if visible.y1 > current.y1 {
            next.y1 = expanded.y1;
        }

        if next == current {
            return false;
        }
        tracing::debug!(?next, "preload bounds grew");
        self.set_preload(next);
        true
    }

    /// Resets the preload bounds to the visible bounds plus the margin.
    ///
    /// This is a no-op before the visible bounds are known. Returns `true` if
    /// the preload bounds changed.
    pub fn reclaim_now(&mut self) -> bool {
        let Some(visible) = self.visible else {
            return false;
        };
        let reclaimed = visible.inflate(self.margin, self.margin);
        if self.preload == Some(reclaimed) {
            return false;
        }
        tracing::debug!(?reclaimed, "preload bounds reclaimed");
        self.set_preload(reclaimed);
        true
    }

    /// Returns `true` if a canvas point lies inside the preload bounds.
    ///
    /// Edges are inclusive. Nothing is eligible before the first recompute.
    #[must_use]
    pub fn is_in_preload_area(&self, pt: Point) -> bool {
        match self.preload {
            Some(bounds) => {
                pt.x >= bounds.x0 && pt.x <= bounds.x1 && pt.y >= bounds.y0 && pt.y <= bounds.y1
            }
            None => false,
        }
    }

    /// Forgets all bounds, as after loading a different canvas.
    pub fn invalidate(&mut self) {
        self.visible = None;
        self.preload = None;
        self.seen_view_revision = None;
        self.recompute.cancel();
        self.revision = self.revision.wrapping_add(1);
    }

    fn set_preload(&mut self, bounds: Rect) {
        self.preload = Some(bounds);
        self.revision = self.revision.wrapping_add(1);
    }
}
