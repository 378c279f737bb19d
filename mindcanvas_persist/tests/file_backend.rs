// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The JSON file backend against a real temporary directory.

use kurbo::{Point, Vec2};
use mindcanvas_elements::{ElementKind, ElementStore, NewElement};
use mindcanvas_persist::{
    CanvasSnapshot, CanvasStorage, FileBackend, STORAGE_KEY, StorageBackend,
};
use mindcanvas_view2d::ViewState;

#[test]
fn record_survives_a_new_backend_instance() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ElementStore::new();
    let root = store.create_title(Point::new(10.0, 10.0), Some("Root")).unwrap();
    store
        .create(NewElement::new(ElementKind::Markdown, Point::new(30.0, 60.0)).with_parent(root))
        .unwrap();
    let mut view = ViewState::new();
    view.set_view(Vec2::new(120.0, -80.0), 0.75);

    let mut storage = CanvasStorage::new(FileBackend::new(dir.path().join("state")));
    storage
        .save(&CanvasSnapshot::capture(&store, &view))
        .unwrap();
    assert!(dir.path().join("state/canvasState.json").exists());

    let mut reopened = CanvasStorage::new(FileBackend::new(dir.path().join("state")));
    let mut loaded = ElementStore::new();
    let mut loaded_view = ViewState::new();
    reopened
        .load()
        .unwrap()
        .apply(&mut loaded, &mut loaded_view)
        .unwrap();
    assert_eq!(loaded.tree_order(), store.tree_order());
    assert_eq!(loaded_view.offset(), Vec2::new(120.0, -80.0));
    assert_eq!(loaded_view.scale(), 0.75);
}

#[test]
fn save_is_last_write_wins_and_clear_removes() {
    let dir = tempfile::tempdir().unwrap();
    let mut backend = FileBackend::new(dir.path());
    backend.save(STORAGE_KEY, "first").unwrap();
    backend.save(STORAGE_KEY, "second").unwrap();
    assert_eq!(backend.load(STORAGE_KEY).unwrap().as_deref(), Some("second"));
    assert!(!dir.path().join("canvasState.json.tmp").exists());

    backend.clear(STORAGE_KEY).unwrap();
    assert_eq!(backend.load(STORAGE_KEY).unwrap(), None);
    backend.clear(STORAGE_KEY).unwrap();
}

#[test]
fn corrupted_file_is_discarded_on_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("canvasState.json"), "[1, 2").unwrap();
    let mut storage = CanvasStorage::new(FileBackend::new(dir.path()));

    assert_eq!(storage.load(), None);
    assert!(!storage.backend().path_for(STORAGE_KEY).exists());
}
