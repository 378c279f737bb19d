// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element record and the value types used to create and patch it.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::id::ElementId;
use crate::kind::ElementKind;

/// Presentation attributes of an element.
///
/// The store never interprets these; they are handed to the renderer as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Font size in CSS pixels.
    pub font_size: f64,
    /// Foreground color, as a CSS color string.
    pub color: String,
    /// Optional background color, as a CSS color string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl Style {
    /// Creates a style with no background color.
    #[must_use]
    pub fn new(font_size: f64, color: impl Into<String>) -> Self {
        Self {
            font_size,
            color: color.into(),
            background_color: None,
        }
    }

    /// Returns this style with the given background color.
    #[must_use]
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }
}

/// One element placed on the canvas.
///
/// The tree links (`parent_id`, `children`) are maintained by the
/// [`ElementStore`](crate::ElementStore) and can only be changed through it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique, immutable identifier.
    pub id: ElementId,
    /// Element kind.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Canvas-space x coordinate.
    pub x: f64,
    /// Canvas-space y coordinate.
    pub y: f64,
    /// Opaque content (plain text or markdown).
    pub content: String,
    /// Presentation attributes.
    pub style: Style,
    /// Parent element, or `None` for a root element.
    #[serde(default)]
    pub parent_id: Option<ElementId>,
    /// Ordered child ids.
    #[serde(default)]
    pub children: Vec<ElementId>,
    /// Stacking order.
    #[serde(default = "default_z_index")]
    pub z_index: i32,
    /// Locked elements are not movable by the user.
    #[serde(default)]
    pub is_locked: bool,
    /// Hidden elements stay in the tree but are not drawn.
    #[serde(default = "default_true")]
    pub is_show: bool,
    /// Whether the directory panel shows this element's children.
    #[serde(default)]
    pub is_expanded: bool,
    /// Creation time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_at: u64,
}

fn default_z_index() -> i32 {
    1
}

fn default_true() -> bool {
    true
}

impl Element {
    /// Returns the element's canvas position.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns `true` if this element has no parent.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Parameters for creating an element.
///
/// Anything left unset falls back to the defaults registered for the kind.
#[derive(Clone, Debug, PartialEq)]
pub struct NewElement {
    pub(crate) kind: ElementKind,
    pub(crate) position: Point,
    pub(crate) parent: Option<ElementId>,
    pub(crate) content: Option<String>,
    pub(crate) style: Option<Style>,
    pub(crate) z_index: Option<i32>,
}

impl NewElement {
    /// Starts a new element of `kind` at `position`.
    #[must_use]
    pub fn new(kind: ElementKind, position: Point) -> Self {
        Self {
            kind,
            position,
            parent: None,
            content: None,
            style: None,
            z_index: None,
        }
    }

    /// A title element using the heading style (24px, dark grey).
    #[must_use]
    pub fn title(position: Point) -> Self {
        Self::new(ElementKind::Title, position).with_style(Style::new(24.0, "#333"))
    }

    /// A markdown element using the document style (14px, mid grey).
    #[must_use]
    pub fn markdown(position: Point) -> Self {
        Self::new(ElementKind::Markdown, position).with_style(Style::new(14.0, "#666"))
    }

    /// Sets the parent element.
    #[must_use]
    pub fn with_parent(mut self, parent: ElementId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the parent element, or clears it with `None`.
    #[must_use]
    pub fn with_parent_opt(mut self, parent: Option<ElementId>) -> Self {
        self.parent = parent;
        self
    }

    /// Sets the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets the style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Sets the stacking order.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    /// Returns the requested kind.
    #[must_use]
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Returns the requested parent.
    #[must_use]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }
}

/// A partial update merged over an existing element.
///
/// Identity and tree links are not patchable; use
/// [`Directory`](crate::Directory) to reparent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementPatch {
    /// New x coordinate.
    pub x: Option<f64>,
    /// New y coordinate.
    pub y: Option<f64>,
    /// New content.
    pub content: Option<String>,
    /// New style.
    pub style: Option<Style>,
    /// New stacking order.
    pub z_index: Option<i32>,
    /// New lock state.
    pub is_locked: Option<bool>,
    /// New visibility.
    pub is_show: Option<bool>,
    /// New expansion state.
    pub is_expanded: Option<bool>,
}

impl ElementPatch {
    /// A patch that only moves the element.
    #[must_use]
    pub fn position(position: Point) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            ..Self::default()
        }
    }

    /// A patch that only replaces the content.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Returns `true` if the patch sets nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns `true` if the patch sets a coordinate and nothing else.
    pub(crate) fn is_position_only(&self) -> bool {
        (self.x.is_some() || self.y.is_some())
            && self.content.is_none()
            && self.style.is_none()
            && self.z_index.is_none()
            && self.is_locked.is_none()
            && self.is_show.is_none()
            && self.is_expanded.is_none()
    }

    /// Merges the patch into `element`, returning `true` if any field changed.
    pub(crate) fn apply(self, element: &mut Element) -> bool {
        let mut changed = false;
        if let Some(x) = self.x {
            changed |= element.x != x;
            element.x = x;
        }
        if let Some(y) = self.y {
            changed |= element.y != y;
            element.y = y;
        }
        if let Some(content) = self.content {
            changed |= element.content != content;
            element.content = content;
        }
        if let Some(style) = self.style {
            changed |= element.style != style;
            element.style = style;
        }
        if let Some(z_index) = self.z_index {
            changed |= element.z_index != z_index;
            element.z_index = z_index;
        }
        if let Some(is_locked) = self.is_locked {
            changed |= element.is_locked != is_locked;
            element.is_locked = is_locked;
        }
        if let Some(is_show) = self.is_show {
            changed |= element.is_show != is_show;
            element.is_show = is_show;
        }
        if let Some(is_expanded) = self.is_expanded {
            changed |= element.is_expanded != is_expanded;
            element.is_expanded = is_expanded;
        }
        changed
    }
}

/// One entry of a batched position update.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionUpdate {
    /// Element to move.
    pub id: ElementId,
    /// New canvas position.
    pub position: Point,
}

impl PositionUpdate {
    /// Creates a position update.
    #[must_use]
    pub const fn new(id: ElementId, position: Point) -> Self {
        Self { id, position }
    }
}
