// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mind Canvas Persist: saving and restoring a canvas.
//!
//! A canvas is saved as one JSON record under the fixed key
//! [`STORAGE_KEY`] (`"canvasState"`):
//!
//! ```json
//! { "elements": [ ... ], "rootIds": [ ... ], "viewState": { "offsetX": 0, "offsetY": 0, "scale": 1 } }
//! ```
//!
//! - [`CanvasSnapshot`] captures an [`ElementStore`](mindcanvas_elements::ElementStore)
//!   plus a [`ViewState`](mindcanvas_view2d::ViewState) and applies them back.
//!   Applying validates the whole record first; loading replaces, it never merges.
//! - [`StorageBackend`] is the key/value seam, with [`MemoryBackend`] and
//!   [`FileBackend`] implementations.
//! - [`CanvasStorage`] puts the two together. Its [`CanvasStorage::load`]
//!   treats an unreadable or corrupted record as "nothing saved" and discards it.
//! - [`AutoSave`] debounces saves against store and view revisions, so a
//!   burst of edits produces one write.
//!
//! ```rust
//! use kurbo::Point;
//! use mindcanvas_elements::ElementStore;
//! use mindcanvas_persist::{CanvasSnapshot, CanvasStorage, MemoryBackend};
//! use mindcanvas_view2d::ViewState;
//!
//! let mut store = ElementStore::new();
//! store.create_title(Point::new(0.0, 0.0), Some("Plan")).unwrap();
//! let view = ViewState::new();
//!
//! let mut storage = CanvasStorage::new(MemoryBackend::new());
//! storage.save(&CanvasSnapshot::capture(&store, &view)).unwrap();
//!
//! let mut restored = ElementStore::new();
//! let mut restored_view = ViewState::new();
//! storage
//!     .load()
//!     .unwrap()
//!     .apply(&mut restored, &mut restored_view)
//!     .unwrap();
//! assert_eq!(restored.len(), 1);
//! ```

mod autosave;
mod backend;
mod error;
mod snapshot;
mod storage;

pub use autosave::AutoSave;
pub use backend::{FileBackend, MemoryBackend, STORAGE_KEY, StorageBackend};
pub use error::{PersistError, Result};
pub use snapshot::{CanvasSnapshot, SavedView};
pub use storage::CanvasStorage;
