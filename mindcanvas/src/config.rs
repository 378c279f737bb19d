// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use mindcanvas_area::AreaConfig;
use mindcanvas_drag::DragConfig;
use serde::{Deserialize, Serialize};

/// Tuning for a [`Canvas`](crate::Canvas).
///
/// Every field has a default, so a host config file only needs the values it
/// changes:
///
/// ```rust
/// use mindcanvas::CanvasConfig;
///
/// let config = CanvasConfig::from_json(r#"{ "preloadMargin": 500 }"#).unwrap();
/// assert_eq!(config.preload_margin, 500.0);
/// assert_eq!(config.drag_throttle_ms, 16);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Canvas units added around the visible bounds for the preload area.
    pub preload_margin: f64,
    /// Quiet period before a view change recomputes the bounds.
    pub recompute_debounce_ms: u64,
    /// Period of the preload reclaim timer.
    pub reclaim_interval_ms: u64,
    /// Pointer travel in pixels before a press becomes a drag.
    pub drag_threshold: f64,
    /// Minimum time between position writes while dragging.
    pub drag_throttle_ms: u64,
    /// Quiet period after the last change before autosaving.
    pub autosave_debounce_ms: u64,
    /// Smallest allowed zoom.
    pub min_scale: f64,
    /// Largest allowed zoom.
    pub max_scale: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            preload_margin: 1000.0,
            recompute_debounce_ms: 50,
            reclaim_interval_ms: 30_000,
            drag_threshold: 5.0,
            drag_throttle_ms: 16,
            autosave_debounce_ms: 300,
            min_scale: 0.1,
            max_scale: 5.0,
        }
    }
}

impl CanvasConfig {
    /// Parses a config from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns the decoder error for malformed JSON or mistyped fields.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The area tracker part of this config.
    #[must_use]
    pub fn area(&self) -> AreaConfig {
        AreaConfig {
            margin: self.preload_margin,
            recompute_debounce_ms: self.recompute_debounce_ms,
            reclaim_interval_ms: self.reclaim_interval_ms,
        }
    }

    /// The drag controller part of this config.
    #[must_use]
    pub fn drag(&self) -> DragConfig {
        DragConfig {
            threshold: self.drag_threshold,
            throttle_ms: self.drag_throttle_ms,
        }
    }
}
