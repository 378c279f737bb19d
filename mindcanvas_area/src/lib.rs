// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mind Canvas Area: visible and preload bounds for spatial culling.
//!
//! The canvas may hold thousands of elements, most of them far off screen.
//! [`AreaTracker`] keeps two canvas-space rectangles derived from a
//! [`ViewState`]:
//!
//! - **Visible bounds**: exactly what the viewport container shows at the
//!   current pan/zoom.
//! - **Preload bounds**: a superset grown by a fixed margin, used as the
//!   render-eligibility test ([`AreaTracker::is_in_preload_area`]). It only ever
//!   grows while the user pans, so elements do not flicker in and out at the
//!   viewport edge, and a slow reclaim timer shrinks it back.
//!
//! Recomputation is debounced: the host calls [`AreaTracker::observe`] after
//! view changes and [`AreaTracker::tick`] from its event loop.
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use mindcanvas_area::{AreaConfig, AreaTracker};
//! use mindcanvas_view2d::ViewState;
//!
//! let mut view = ViewState::new();
//! view.set_canvas_size(Size::new(2000.0, 2000.0));
//! view.set_container_size(Size::new(800.0, 600.0));
//!
//! let mut area = AreaTracker::new(AreaConfig::default());
//! assert!(!area.is_in_preload_area(Point::new(1000.0, 1000.0)));
//!
//! area.observe(&view, 0);
//! area.tick(&view, 50);
//! assert!(area.is_in_preload_area(Point::new(1000.0, 1000.0)));
//!
//! // Panning far to the left grows the right edge only after the debounce.
//! view.pan_by(Vec2::new(-5000.0, 0.0));
//! area.observe(&view, 60);
//! assert!(!area.is_in_preload_area(Point::new(6000.0, 1000.0)));
//! area.tick(&view, 110);
//! assert!(area.is_in_preload_area(Point::new(6000.0, 1000.0)));
//! ```

mod tracker;

pub use tracker::{AreaConfig, AreaTracker, AreaUpdate, visible_bounds};
