// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::id::ElementId;

/// A change notification emitted by the [`ElementStore`](crate::ElementStore).
///
/// Events are queued in mutation order and drained with
/// [`ElementStore::take_events`](crate::ElementStore::take_events).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    /// An element was created.
    Created(ElementId),
    /// Fields of an element changed. A change to coordinates alone is
    /// reported as [`StoreEvent::Moved`] instead.
    Updated(ElementId),
    /// Elements were moved on the canvas.
    Moved(Vec<ElementId>),
    /// An element and its whole subtree were removed, listed in pre-order.
    Deleted(Vec<ElementId>),
    /// An element changed its place in the directory tree.
    Reparented(ElementId),
    /// The selection changed.
    SelectionChanged,
    /// Everything was replaced (clear or restore).
    Reset,
}
