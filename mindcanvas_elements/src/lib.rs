// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mind Canvas Elements: the canonical element store.
//!
//! This crate owns every element placed on the canvas: its identity, canvas
//! position, opaque content, style, and its place in the parent/child
//! directory tree. It provides:
//!
//! - [`ElementStore`]: create/update/delete, high-frequency position updates,
//!   visibility-filtered queries, and the current [`Selection`].
//! - [`KindRegistry`]: the type → default content/style table used by the
//!   element factory. Built-in kinds are title, markdown, and text; hosts can
//!   register more.
//! - [`Directory`]: reparenting moves (before, after, as child) that keep
//!   sibling order and never introduce a cycle.
//! - [`DirectoryCursor`]: which element new children go under, and which
//!   element's children the directory panel lists.
//!
//! Every mutation is visible immediately and is reported through
//! [`ElementStore::take_events`] and [`ElementStore::revision`], so renderers,
//! viewport filters, and autosave can subscribe without sharing the store.
//!
//! ## Tree invariants
//!
//! - Every id in a `children` list names a live element whose `parent_id`
//!   points back at the owner.
//! - Root elements are exactly those with no parent, listed in
//!   [`ElementStore::root_ids`] in display order.
//! - No element is its own ancestor.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use mindcanvas_elements::{Directory, ElementKind, ElementStore, NewElement};
//!
//! let mut store = ElementStore::new();
//! let chapter = store.create_title(Point::new(100.0, 100.0), None).unwrap();
//! let notes = store
//!     .create(NewElement::new(ElementKind::Markdown, Point::new(140.0, 180.0)).with_parent(chapter))
//!     .unwrap();
//! assert_eq!(store.children(chapter), Some(&[notes][..]));
//!
//! // A parent can never become a child of its own descendant.
//! assert!(Directory::new(&mut store).move_as_child(chapter, notes).is_err());
//!
//! // Deleting a parent removes its whole subtree.
//! store.delete(chapter).unwrap();
//! assert!(store.is_empty());
//! ```

mod directory;
mod element;
mod error;
mod event;
mod id;
mod kind;
mod selection;
mod store;

pub use directory::{Directory, DirectoryCursor};
pub use element::{Element, ElementPatch, NewElement, PositionUpdate, Style};
pub use error::{MoveError, StoreError};
pub use event::StoreEvent;
pub use id::ElementId;
pub use kind::{ElementKind, KindDefaults, KindRegistry};
pub use selection::Selection;
pub use store::ElementStore;
