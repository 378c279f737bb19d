// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The persisted canvas record.

use kurbo::Vec2;
use mindcanvas_elements::{Element, ElementId, ElementStore};
use mindcanvas_view2d::ViewState;
use serde::{Deserialize, Serialize};

use crate::error::{PersistError, Result};

/// Pan and zoom as stored in a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedView {
    /// Horizontal pixel offset of the canvas origin.
    pub offset_x: f64,
    /// Vertical pixel offset of the canvas origin.
    pub offset_y: f64,
    /// Zoom factor.
    pub scale: f64,
}

impl Default for SavedView {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }
}

impl From<&ViewState> for SavedView {
    fn from(view: &ViewState) -> Self {
        let offset = view.offset();
        Self {
            offset_x: offset.x,
            offset_y: offset.y,
            scale: view.scale(),
        }
    }
}

/// One complete saved canvas: elements, root order, and view.
///
/// Encoded as `{ "elements": [...], "rootIds": [...], "viewState": {...} }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSnapshot {
    /// Every element, in tree pre-order.
    pub elements: Vec<Element>,
    /// Root ids in display order.
    pub root_ids: Vec<ElementId>,
    /// Pan and zoom.
    #[serde(default)]
    pub view_state: SavedView,
}

impl CanvasSnapshot {
    /// Captures the current state of `store` and `view`.
    #[must_use]
    pub fn capture(store: &ElementStore, view: &ViewState) -> Self {
        let elements = store
            .tree_order()
            .into_iter()
            .filter_map(|id| store.get(id).cloned())
            .collect();
        Self {
            elements,
            root_ids: store.root_ids().to_vec(),
            view_state: SavedView::from(view),
        }
    }

    /// Replaces the contents of `store` and the pan/zoom of `view`.
    ///
    /// Nothing is changed unless the whole snapshot is valid.
    ///
    /// # Errors
    ///
    /// - [`PersistError::InvalidView`] for a non-positive or non-finite scale.
    /// - [`PersistError::Invalid`] if the elements do not form a valid tree.
    pub fn apply(self, store: &mut ElementStore, view: &mut ViewState) -> Result<()> {
        let saved = self.view_state;
        if !(saved.scale > 0.0 && saved.scale.is_finite()) {
            return Err(PersistError::InvalidView { scale: saved.scale });
        }
        store.restore(self.elements, self.root_ids)?;
        view.set_view(Vec2::new(saved.offset_x, saved.offset_y), saved.scale);
        Ok(())
    }

    /// Encodes the snapshot as JSON.
    ///
    /// # Errors
    ///
    /// [`PersistError::Json`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// [`PersistError::Json`] if the text is not a valid record.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
