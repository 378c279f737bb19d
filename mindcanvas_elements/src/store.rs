// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The canonical element collection.

use hashbrown::{HashMap, HashSet};
use kurbo::Point;
use tracing::{debug, trace, warn};

use crate::element::{Element, ElementPatch, NewElement, PositionUpdate};
use crate::error::StoreError;
use crate::event::StoreEvent;
use crate::id::ElementId;
use crate::kind::{ElementKind, KindRegistry};
use crate::selection::Selection;

/// Owns every element, the root sequence, and the selection.
///
/// The store is the single writer of element state. Each successful mutation
/// bumps [`revision`](Self::revision) and queues a [`StoreEvent`]; rejected
/// operations change nothing and are logged.
#[derive(Clone, Debug, Default)]
pub struct ElementStore {
    elements: HashMap<ElementId, Element>,
    root_ids: Vec<ElementId>,
    selection: Selection,
    registry: KindRegistry,
    events: Vec<StoreEvent>,
    revision: u64,
}

impl ElementStore {
    /// Creates an empty store with the built-in kinds registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store using `registry` for creation defaults.
    #[must_use]
    pub fn with_registry(registry: KindRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    /// Returns the kind registry.
    #[must_use]
    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    /// Returns the kind registry for registering more kinds.
    pub fn registry_mut(&mut self) -> &mut KindRegistry {
        &mut self.registry
    }

    // --- creation -------------------------------------------------------

    /// Creates an element, filling unset fields from the kind's defaults.
    ///
    /// A child is appended to its parent's `children`; an element without a
    /// parent is appended to the root sequence.
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnknownKind`] if the kind has no registered defaults.
    /// - [`StoreError::UnknownParent`] if the requested parent does not exist.
    pub fn create(&mut self, new: NewElement) -> Result<ElementId, StoreError> {
        let Some(defaults) = self.registry.get(&new.kind) else {
            warn!(kind = %new.kind, "create rejected: unregistered element kind");
            return Err(StoreError::UnknownKind(new.kind));
        };
        if let Some(parent) = new.parent
            && !self.elements.contains_key(&parent)
        {
            warn!(%parent, "create rejected: parent does not exist");
            return Err(StoreError::UnknownParent(parent));
        }

        let id = ElementId::new_random();
        let element = Element {
            id,
            content: new.content.unwrap_or_else(|| defaults.content.clone()),
            style: new.style.unwrap_or_else(|| defaults.style.clone()),
            kind: new.kind,
            x: new.position.x,
            y: new.position.y,
            parent_id: new.parent,
            children: Vec::new(),
            z_index: new.z_index.unwrap_or(1),
            is_locked: false,
            is_show: true,
            is_expanded: false,
            created_at: now_millis(),
        };
        match new.parent {
            Some(parent) => {
                if let Some(owner) = self.elements.get_mut(&parent) {
                    owner.children.push(id);
                }
            }
            None => self.root_ids.push(id),
        }
        trace!(%id, kind = %element.kind, "element created");
        self.elements.insert(id, element);
        self.emit(StoreEvent::Created(id));
        Ok(id)
    }

    /// Creates a root title element with the heading style.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownKind`] if the title kind is not registered.
    pub fn create_title(
        &mut self,
        position: Point,
        content: Option<&str>,
    ) -> Result<ElementId, StoreError> {
        let mut new = NewElement::title(position);
        new.content = content.map(Into::into);
        self.create(new)
    }

    /// Creates a root markdown element with the document style.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownKind`] if the markdown kind is not registered.
    pub fn create_markdown(
        &mut self,
        position: Point,
        content: Option<&str>,
    ) -> Result<ElementId, StoreError> {
        let mut new = NewElement::markdown(position);
        new.content = content.map(Into::into);
        self.create(new)
    }

    // --- mutation -------------------------------------------------------

    /// Merges `patch` into the element.
    ///
    /// Returns whether anything changed. A patch that only sets coordinates
    /// is reported as [`StoreEvent::Moved`], any other change as
    /// [`StoreEvent::Updated`].
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownElement`] if `id` does not exist.
    pub fn update(&mut self, id: ElementId, patch: ElementPatch) -> Result<bool, StoreError> {
        let Some(element) = self.elements.get_mut(&id) else {
            debug!(%id, "update ignored: unknown element");
            return Err(StoreError::UnknownElement(id));
        };
        let moves_only = patch.is_position_only();
        let changed = patch.apply(element);
        if changed {
            self.emit(if moves_only {
                StoreEvent::Moved(vec![id])
            } else {
                StoreEvent::Updated(id)
            });
        }
        Ok(changed)
    }

    /// Moves one element. Returns `false` if `id` does not exist.
    pub fn update_position(&mut self, id: ElementId, position: Point) -> bool {
        let Some(element) = self.elements.get_mut(&id) else {
            debug!(%id, "position update ignored: unknown element");
            return false;
        };
        if element.x != position.x || element.y != position.y {
            element.x = position.x;
            element.y = position.y;
            self.emit(StoreEvent::Moved(vec![id]));
        }
        true
    }

    /// Moves many elements at once, emitting a single notification.
    ///
    /// Unknown ids are skipped. Returns how many updates were applied.
    pub fn batch_update_positions(&mut self, updates: &[PositionUpdate]) -> usize {
        let mut applied = 0;
        let mut moved = Vec::new();
        for update in updates {
            let Some(element) = self.elements.get_mut(&update.id) else {
                trace!(id = %update.id, "batch position update skipped unknown element");
                continue;
            };
            applied += 1;
            if element.x != update.position.x || element.y != update.position.y {
                element.x = update.position.x;
                element.y = update.position.y;
                moved.push(update.id);
            }
        }
        if !moved.is_empty() {
            self.emit(StoreEvent::Moved(moved));
        }
        applied
    }

    // --- deletion -------------------------------------------------------

    /// Removes `id` and all of its descendants.
    ///
    /// The id is excised from its former parent's `children` (or the root
    /// sequence), and every removed id leaves the selection. Returns the
    /// removed ids in pre-order.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownElement`] if `id` does not exist.
    pub fn delete(&mut self, id: ElementId) -> Result<Vec<ElementId>, StoreError> {
        if !self.elements.contains_key(&id) {
            debug!(%id, "delete ignored: unknown element");
            return Err(StoreError::UnknownElement(id));
        }
        self.detach(id);

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(element) = self.elements.remove(&next) else {
                continue;
            };
            removed.push(next);
            stack.extend(element.children.iter().rev().copied());
        }

        let gone: HashSet<ElementId> = removed.iter().copied().collect();
        if self.selection.retain(|selected| !gone.contains(&selected)) {
            self.emit(StoreEvent::SelectionChanged);
        }
        debug!(%id, count = removed.len(), "subtree deleted");
        self.emit(StoreEvent::Deleted(removed.clone()));
        Ok(removed)
    }

    /// Deletes every selected element (with its subtree) and clears the
    /// selection. Returns all removed ids.
    pub fn delete_selected(&mut self) -> Vec<ElementId> {
        let selected = self.selection.items().to_vec();
        let mut removed = Vec::new();
        for id in selected {
            // Already gone when an ancestor was selected too.
            if self.elements.contains_key(&id)
                && let Ok(ids) = self.delete(id)
            {
                removed.extend(ids);
            }
        }
        if self.selection.clear() {
            self.emit(StoreEvent::SelectionChanged);
        }
        removed
    }

    /// Removes every element and clears the root sequence and selection.
    pub fn clear_all(&mut self) {
        if self.elements.is_empty() && self.selection.is_empty() {
            return;
        }
        self.elements.clear();
        self.root_ids.clear();
        self.selection.clear();
        debug!("all elements cleared");
        self.emit(StoreEvent::Reset);
    }

    // --- queries --------------------------------------------------------

    /// Returns the element with `id`.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Returns the position of `id`, or `None` if it does not exist.
    #[must_use]
    pub fn get_position(&self, id: ElementId) -> Option<Point> {
        self.elements.get(&id).map(Element::position)
    }

    /// Returns `true` if `id` exists.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the store holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates all elements in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> + '_ {
        self.elements.values()
    }

    /// Returns the root ids in display order.
    #[must_use]
    pub fn root_ids(&self) -> &[ElementId] {
        &self.root_ids
    }

    /// Returns the ordered children of `id`, or `None` if it does not exist.
    #[must_use]
    pub fn children(&self, id: ElementId) -> Option<&[ElementId]> {
        self.elements.get(&id).map(|e| e.children.as_slice())
    }

    /// Returns the parent of `id`, if it exists and is not a root.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(&id).and_then(|e| e.parent_id)
    }

    /// Returns every id in depth-first pre-order, roots first.
    #[must_use]
    pub fn tree_order(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.elements.len());
        let mut stack: Vec<ElementId> = self.root_ids.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(element) = self.elements.get(&id) {
                out.push(id);
                stack.extend(element.children.iter().rev().copied());
            }
        }
        out
    }

    /// Returns all ids of `kind`, regardless of visibility.
    #[must_use]
    pub fn ids_by_type(&self, kind: &ElementKind) -> Vec<ElementId> {
        self.collect_sorted(|e| &e.kind == kind)
    }

    /// Returns ids of `kind` whose position passes `is_visible`.
    ///
    /// Results are ordered by z-index, then creation time, so the renderer
    /// can paint them front to back in sequence.
    #[must_use]
    pub fn visible_ids_by_type(
        &self,
        kind: &ElementKind,
        is_visible: impl Fn(Point) -> bool,
    ) -> Vec<ElementId> {
        self.collect_sorted(|e| is_visible(e.position()) && &e.kind == kind)
    }

    /// Returns ids of every kind whose position passes `is_visible`.
    #[must_use]
    pub fn visible_ids(&self, is_visible: impl Fn(Point) -> bool) -> Vec<ElementId> {
        self.collect_sorted(|e| is_visible(e.position()))
    }

    fn collect_sorted(&self, mut keep: impl FnMut(&Element) -> bool) -> Vec<ElementId> {
        let mut hits: Vec<&Element> = self.elements.values().filter(|e| keep(*e)).collect();
        hits.sort_unstable_by(|a, b| {
            (a.z_index, a.created_at, a.id).cmp(&(b.z_index, b.created_at, b.id))
        });
        hits.into_iter().map(|e| e.id).collect()
    }

    // --- selection ------------------------------------------------------

    /// Returns the current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Applies a click on `id`: a plain click selects only `id`, an additive
    /// click toggles it. Returns whether `id` is selected afterwards.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownElement`] if `id` does not exist.
    pub fn toggle_selection(&mut self, id: ElementId, additive: bool) -> Result<bool, StoreError> {
        if !self.elements.contains_key(&id) {
            debug!(%id, "selection ignored: unknown element");
            return Err(StoreError::UnknownElement(id));
        }
        let before = self.selection.revision();
        let selected = if additive {
            self.selection.toggle(id)
        } else {
            self.selection.select_only(id);
            true
        };
        if self.selection.revision() != before {
            self.emit(StoreEvent::SelectionChanged);
        }
        Ok(selected)
    }

    /// Clears the selection. Returns `true` if anything was selected.
    pub fn clear_selection(&mut self) -> bool {
        let changed = self.selection.clear();
        if changed {
            self.emit(StoreEvent::SelectionChanged);
        }
        changed
    }

    // --- notification ---------------------------------------------------

    /// Drains the queued change events in mutation order.
    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        core::mem::take(&mut self.events)
    }

    /// Returns the revision counter, bumped on every effective mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // --- persistence ----------------------------------------------------

    /// Replaces the whole collection with `elements` and `root_ids`.
    ///
    /// The input is validated first; on error the store is left untouched.
    /// The selection is cleared.
    ///
    /// # Errors
    ///
    /// [`StoreError::CorruptTree`] if the input breaks a tree invariant.
    pub fn restore(
        &mut self,
        elements: Vec<Element>,
        root_ids: Vec<ElementId>,
    ) -> Result<(), StoreError> {
        let mut map = HashMap::with_capacity(elements.len());
        for element in elements {
            if map.insert(element.id, element).is_some() {
                return Err(StoreError::CorruptTree("duplicate element id"));
            }
        }
        check_tree(&map, &root_ids).map_err(StoreError::CorruptTree)?;

        self.elements = map;
        self.root_ids = root_ids;
        self.selection.clear();
        debug!(count = self.elements.len(), "elements restored");
        self.emit(StoreEvent::Reset);
        Ok(())
    }

    /// Checks every tree invariant.
    ///
    /// # Errors
    ///
    /// [`StoreError::CorruptTree`] naming the first violation found.
    pub fn validate(&self) -> Result<(), StoreError> {
        check_tree(&self.elements, &self.root_ids).map_err(StoreError::CorruptTree)
    }

    // --- tree plumbing for `Directory` ----------------------------------

    /// Returns `true` if `ancestor` is `node` or lies on its parent chain.
    pub(crate) fn is_ancestor_or_self(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        // Bounded by the element count so a corrupt chain cannot loop forever.
        for _ in 0..=self.elements.len() {
            match current {
                Some(id) if id == ancestor => return true,
                Some(id) => current = self.parent(id),
                None => return false,
            }
        }
        false
    }

    /// Splices `id` out of its parent's children or the root sequence.
    ///
    /// The element itself keeps its stale `parent_id` until reattached.
    pub(crate) fn detach(&mut self, id: ElementId) {
        match self.parent(id) {
            Some(parent) => {
                if let Some(owner) = self.elements.get_mut(&parent) {
                    owner.children.retain(|child| *child != id);
                }
            }
            None => self.root_ids.retain(|root| *root != id),
        }
    }

    /// Returns the sibling list that holds `id`.
    pub(crate) fn siblings(&self, parent: Option<ElementId>) -> Option<&[ElementId]> {
        match parent {
            Some(parent) => self.children(parent),
            None => Some(&self.root_ids),
        }
    }

    /// Inserts a detached `id` under `parent` at `index` (clamped to the end).
    pub(crate) fn attach(&mut self, id: ElementId, parent: Option<ElementId>, index: usize) {
        let list = match parent {
            Some(parent) => match self.elements.get_mut(&parent) {
                Some(owner) => &mut owner.children,
                None => return,
            },
            None => &mut self.root_ids,
        };
        let index = index.min(list.len());
        list.insert(index, id);
        if let Some(element) = self.elements.get_mut(&id) {
            element.parent_id = parent;
        }
    }

    pub(crate) fn set_expanded(&mut self, id: ElementId) {
        if let Some(element) = self.elements.get_mut(&id)
            && !element.is_expanded
        {
            element.is_expanded = true;
            self.emit(StoreEvent::Updated(id));
        }
    }

    pub(crate) fn emit(&mut self, event: StoreEvent) {
        self.events.push(event);
        self.revision = self.revision.wrapping_add(1);
    }
}

fn check_tree(
    elements: &HashMap<ElementId, Element>,
    root_ids: &[ElementId],
) -> Result<(), &'static str> {
    for root in root_ids {
        match elements.get(root) {
            None => return Err("root id names a missing element"),
            Some(element) if element.parent_id.is_some() => {
                return Err("root element has a parent");
            }
            Some(_) => {}
        }
    }
    for element in elements.values() {
        for child in &element.children {
            match elements.get(child) {
                None => return Err("child id names a missing element"),
                Some(c) if c.parent_id != Some(element.id) => {
                    return Err("child does not point back at its parent");
                }
                Some(_) => {}
            }
        }
    }

    // Every element reachable exactly once from the roots: no cycles, no
    // orphans, no id listed twice.
    let mut seen: HashSet<ElementId> = HashSet::with_capacity(elements.len());
    let mut stack: Vec<ElementId> = root_ids.to_vec();
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            return Err("element listed more than once");
        }
        if let Some(element) = elements.get(&id) {
            stack.extend(element.children.iter().copied());
        }
    }
    if seen.len() != elements.len() {
        return Err("element unreachable from the roots");
    }
    Ok(())
}

fn now_millis() -> u64 {
    web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
