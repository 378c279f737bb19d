// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};
use mindcanvas_area::{AreaTracker, AreaUpdate};
use mindcanvas_drag::{DragContext, DragController, PointerEvent};
use mindcanvas_elements::{
    Directory, DirectoryCursor, ElementId, ElementKind, ElementPatch, ElementStore, NewElement,
    StoreError, StoreEvent,
};
use mindcanvas_persist::{AutoSave, CanvasSnapshot, CanvasStorage, StorageBackend};
use mindcanvas_view2d::{
    ViewState, canvas_to_pixel, center_relative_to_canvas, pixel_to_canvas,
    window_center_in_canvas,
};
use tracing::{debug, warn};

use crate::config::CanvasConfig;
use crate::testdata;

/// What a call to [`Canvas::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Area tracker activity.
    pub area: AreaUpdate,
    /// A throttled drag move was written.
    pub drag_moved: bool,
    /// Changes have settled and the host should call [`Canvas::save`].
    pub save_due: bool,
}

/// One canvas: view, culling, elements, directory, and drag, wired together.
///
/// The canvas owns no clock. The host forwards input, passes millisecond
/// timestamps, and calls [`Canvas::tick`] from its event loop.
#[derive(Debug)]
pub struct Canvas {
    config: CanvasConfig,
    view: ViewState,
    viewport: Rect,
    area: AreaTracker,
    store: ElementStore,
    cursor: DirectoryCursor,
    drag: DragController,
    autosave: AutoSave,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl Canvas {
    /// Creates an empty canvas.
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        let mut view = ViewState::new();
        view.set_scale_limits(config.min_scale, config.max_scale);
        let mut autosave = AutoSave::new(config.autosave_debounce_ms);
        let store = ElementStore::new();
        autosave.mark_saved(store.revision(), view.revision());
        Self {
            area: AreaTracker::new(config.area()),
            drag: DragController::new(config.drag()),
            viewport: Rect::ZERO,
            cursor: DirectoryCursor::new(),
            store,
            view,
            autosave,
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Returns the pan/zoom state.
    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Returns the canvas rectangle in client pixels.
    #[must_use]
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Returns the visible/preload tracker.
    #[must_use]
    pub fn area(&self) -> &AreaTracker {
        &self.area
    }

    /// Returns the element store.
    #[must_use]
    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    /// Returns the element store for direct edits.
    pub fn store_mut(&mut self) -> &mut ElementStore {
        &mut self.store
    }

    /// Returns the directory cursor.
    #[must_use]
    pub fn cursor(&self) -> &DirectoryCursor {
        &self.cursor
    }

    /// Returns the directory cursor for changing the selected directory.
    pub fn cursor_mut(&mut self) -> &mut DirectoryCursor {
        &mut self.cursor
    }

    /// Returns the drag controller.
    #[must_use]
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    // --- view -----------------------------------------------------------

    /// Records the canvas rectangle (client pixels) and the container size.
    ///
    /// Call on mount and on every resize; sizes are cached, not re-measured.
    pub fn resize(&mut self, viewport: Rect, container: Size, now: u64) {
        self.viewport = viewport;
        self.view.set_canvas_size(viewport.size());
        self.view.set_container_size(container);
        self.area.observe(&self.view, now);
    }

    /// Pans by a pixel delta.
    pub fn pan_by(&mut self, delta: Vec2, now: u64) {
        self.view.pan_by(delta);
        self.area.observe(&self.view, now);
    }

    /// Zooms by `factor` keeping the canvas point under `anchor` (client
    /// pixels) fixed. The scale is clamped to the configured limits.
    pub fn zoom_about(&mut self, anchor: Point, factor: f64, now: u64) {
        self.view.zoom_about(anchor, self.viewport, factor);
        self.area.observe(&self.view, now);
    }

    /// Returns to offset zero and scale one.
    pub fn reset_view(&mut self, now: u64) {
        self.view.reset();
        self.area.observe(&self.view, now);
    }

    /// Pans so that `target` (canvas units) sits at the center of the canvas.
    pub fn jump_to(&mut self, target: Point, now: u64) {
        self.view.jump_to(target);
        self.area.observe(&self.view, now);
    }

    /// Maps a client pixel to canvas units.
    #[must_use]
    pub fn pixel_to_canvas(&self, client: Point) -> Point {
        pixel_to_canvas(client, self.viewport, &self.view)
    }

    /// Maps canvas units to a client pixel.
    #[must_use]
    pub fn canvas_to_pixel(&self, canvas: Point) -> Point {
        canvas_to_pixel(canvas, self.viewport, &self.view)
    }

    /// Returns the canvas point shown at the center of the canvas.
    #[must_use]
    pub fn window_center(&self) -> Point {
        window_center_in_canvas(&self.view, self.view.canvas_size())
    }

    /// Maps a client pixel to canvas units relative to the window center, as
    /// the cursor readout does.
    #[must_use]
    pub fn cursor_position(&self, client: Point) -> Point {
        center_relative_to_canvas(client, self.viewport, &self.view)
    }

    // --- render eligibility ---------------------------------------------

    /// Returns `true` if a canvas point is inside the preload area.
    #[must_use]
    pub fn is_render_eligible(&self, pt: Point) -> bool {
        self.area.is_in_preload_area(pt)
    }

    /// Returns render-eligible ids of `kind`, in paint order.
    #[must_use]
    pub fn visible_ids_by_type(&self, kind: &ElementKind) -> Vec<ElementId> {
        self.store
            .visible_ids_by_type(kind, |pt| self.area.is_in_preload_area(pt))
    }

    /// Returns every render-eligible id, in paint order.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<ElementId> {
        self.store
            .visible_ids(|pt| self.area.is_in_preload_area(pt))
    }

    // --- elements -------------------------------------------------------

    /// Creates an element under the cursor's insert parent.
    ///
    /// # Errors
    ///
    /// See [`ElementStore::create`].
    pub fn create(
        &mut self,
        kind: ElementKind,
        position: Point,
        content: Option<&str>,
    ) -> Result<ElementId, StoreError> {
        let mut new = NewElement::new(kind, position);
        if let Some(content) = content {
            new = new.with_content(content);
        }
        self.create_with(new)
    }

    /// Creates a title element under the cursor's insert parent.
    ///
    /// # Errors
    ///
    /// See [`ElementStore::create`].
    pub fn create_title(
        &mut self,
        position: Point,
        content: Option<&str>,
    ) -> Result<ElementId, StoreError> {
        let mut new = NewElement::title(position);
        if let Some(content) = content {
            new = new.with_content(content);
        }
        self.create_with(new)
    }

    /// Creates a markdown element under the cursor's insert parent.
    ///
    /// # Errors
    ///
    /// See [`ElementStore::create`].
    pub fn create_markdown(
        &mut self,
        position: Point,
        content: Option<&str>,
    ) -> Result<ElementId, StoreError> {
        let mut new = NewElement::markdown(position);
        if let Some(content) = content {
            new = new.with_content(content);
        }
        self.create_with(new)
    }

    fn create_with(&mut self, new: NewElement) -> Result<ElementId, StoreError> {
        self.cursor.prune(&self.store);
        let parent = new.parent().or(self.cursor.insert_parent());
        self.store.create(new.with_parent_opt(parent))
    }

    /// Merges a partial update into an element.
    ///
    /// # Errors
    ///
    /// See [`ElementStore::update`].
    pub fn update(&mut self, id: ElementId, patch: ElementPatch) -> Result<bool, StoreError> {
        self.store.update(id, patch)
    }

    /// Deletes an element and its subtree.
    ///
    /// # Errors
    ///
    /// See [`ElementStore::delete`].
    pub fn delete(&mut self, id: ElementId) -> Result<Vec<ElementId>, StoreError> {
        let removed = self.store.delete(id)?;
        self.cursor.prune(&self.store);
        Ok(removed)
    }

    /// Deletes every selected element and its subtree.
    pub fn delete_selected(&mut self) -> Vec<ElementId> {
        let removed = self.store.delete_selected();
        self.cursor.prune(&self.store);
        removed
    }

    /// Removes every element, ending any gesture in progress.
    pub fn clear_all(&mut self) {
        self.drag.reset();
        self.store.clear_all();
        self.cursor = DirectoryCursor::new();
    }

    /// Fills the canvas with `count` elements of every kind around the
    /// canvas center. See [`generate_test_elements`](crate::generate_test_elements).
    pub fn generate_test_elements(&mut self, count: usize, range: f64, seed: u64) -> Vec<ElementId> {
        let size = self.view.canvas_size();
        let center = Point::new(size.width / 2.0, size.height / 2.0);
        testdata::generate_test_elements(&mut self.store, center, count, range, seed)
    }

    /// Drains the store's change events.
    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        self.store.take_events()
    }

    // --- directory ------------------------------------------------------

    /// Returns the tree mutator.
    pub fn directory(&mut self) -> Directory<'_> {
        Directory::new(&mut self.store)
    }

    /// Returns the ids the directory panel lists.
    #[must_use]
    pub fn directory_listing(&self) -> &[ElementId] {
        self.cursor.listing(&self.store)
    }

    // --- pointer input --------------------------------------------------

    /// Forwards a pointer press on `target` (`None` for the background).
    pub fn pointer_down(&mut self, target: Option<ElementId>, event: PointerEvent) -> bool {
        let mut cx = DragContext::new(&mut self.store, &self.view, self.viewport);
        self.drag.pointer_down(&mut cx, target, event)
    }

    /// Forwards pointer motion. Returns `true` if elements moved.
    pub fn pointer_move(&mut self, event: PointerEvent) -> bool {
        let mut cx = DragContext::new(&mut self.store, &self.view, self.viewport);
        self.drag.pointer_move(&mut cx, event)
    }

    /// Forwards a pointer release. Returns `true` if it ended a drag.
    pub fn pointer_up(&mut self, event: PointerEvent) -> bool {
        let mut cx = DragContext::new(&mut self.store, &self.view, self.viewport);
        self.drag.pointer_up(&mut cx, event)
    }

    /// Forwards a click. Returns `true` if it must be ignored because it
    /// ended a drag.
    pub fn on_click(&mut self) -> bool {
        self.drag.on_click()
    }

    /// Aborts the current drag, restoring start positions.
    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel(&mut self.store)
    }

    // --- timers and persistence -----------------------------------------

    /// Runs every due timer: drag trailing move, debounced recompute,
    /// reclaim, and the autosave debounce.
    pub fn tick(&mut self, now: u64) -> TickReport {
        let drag_moved = {
            let mut cx = DragContext::new(&mut self.store, &self.view, self.viewport);
            self.drag.tick(&mut cx, now)
        };
        self.area.observe(&self.view, now);
        let area = self.area.tick(&self.view, now);
        self.autosave
            .observe(self.store.revision(), self.view.revision(), now);
        let save_due = self.autosave.poll(now);
        TickReport {
            area,
            drag_moved,
            save_due,
        }
    }

    /// Returns `true` if unsaved changes are waiting for the autosave delay.
    #[must_use]
    pub fn has_pending_save(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Captures the current state.
    #[must_use]
    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot::capture(&self.store, &self.view)
    }

    /// Writes the current state to `storage`.
    ///
    /// # Errors
    ///
    /// Encoding or backend failures. The canvas keeps running either way.
    pub fn save<B: StorageBackend>(
        &mut self,
        storage: &mut CanvasStorage<B>,
    ) -> mindcanvas_persist::Result<()> {
        storage.save(&self.snapshot())?;
        self.autosave
            .mark_saved(self.store.revision(), self.view.revision());
        Ok(())
    }

    /// Replaces the canvas with the record in `storage`.
    ///
    /// Returns `false` and keeps the current state when nothing usable is
    /// stored; an invalid record is discarded.
    pub fn load<B: StorageBackend>(&mut self, storage: &mut CanvasStorage<B>, now: u64) -> bool {
        let Some(snapshot) = storage.load() else {
            return false;
        };
        if let Err(err) = snapshot.apply(&mut self.store, &mut self.view) {
            warn!(%err, "saved canvas rejected; discarding it");
            storage.discard();
            return false;
        }
        self.drag.reset();
        self.cursor = DirectoryCursor::new();
        self.area.invalidate();
        self.area.observe(&self.view, now);
        self.autosave
            .mark_saved(self.store.revision(), self.view.revision());
        debug!(elements = self.store.len(), "canvas loaded");
        true
    }
}
