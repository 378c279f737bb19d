// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directory tree moves and the directory panel cursor.

use tracing::debug;

use crate::error::MoveError;
use crate::event::StoreEvent;
use crate::id::ElementId;
use crate::store::ElementStore;

/// Reparenting operations over an [`ElementStore`].
///
/// Every move validates first and then runs detach followed by insert, so a
/// rejected move leaves the tree exactly as it was.
#[derive(Debug)]
pub struct Directory<'a> {
    store: &'a mut ElementStore,
}

#[derive(Copy, Clone)]
enum Placement {
    Before,
    After,
}

impl<'a> Directory<'a> {
    /// Wraps `store` for tree moves.
    pub fn new(store: &'a mut ElementStore) -> Self {
        Self { store }
    }

    /// Moves `source` to sit immediately before `target`, under `target`'s
    /// parent.
    ///
    /// # Errors
    ///
    /// See [`MoveError`]. `target` inside the subtree of `source` is
    /// rejected as a cycle.
    pub fn move_before(&mut self, source: ElementId, target: ElementId) -> Result<(), MoveError> {
        self.move_beside(source, target, Placement::Before)
    }

    /// Moves `source` to sit immediately after `target`, under `target`'s
    /// parent.
    ///
    /// # Errors
    ///
    /// See [`MoveError`].
    pub fn move_after(&mut self, source: ElementId, target: ElementId) -> Result<(), MoveError> {
        self.move_beside(source, target, Placement::After)
    }

    /// Moves `source` to the end of `target`'s children and expands `target`.
    ///
    /// # Errors
    ///
    /// [`MoveError::WouldCreateCycle`] if `target` is a descendant of
    /// `source`; otherwise see [`MoveError`].
    pub fn move_as_child(&mut self, source: ElementId, target: ElementId) -> Result<(), MoveError> {
        self.check_pair(source, target)?;
        if self.store.is_ancestor_or_self(source, target) {
            debug!(%source, %target, "move rejected: target lies inside the moved subtree");
            return Err(MoveError::WouldCreateCycle { source, target });
        }

        self.store.detach(source);
        self.store.attach(source, Some(target), usize::MAX);
        self.store.set_expanded(target);
        self.store.emit(StoreEvent::Reparented(source));
        Ok(())
    }

    /// Returns `true` if `ancestor` is a proper ancestor of `node`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: ElementId, node: ElementId) -> bool {
        ancestor != node && self.store.is_ancestor_or_self(ancestor, node)
    }

    fn move_beside(
        &mut self,
        source: ElementId,
        target: ElementId,
        placement: Placement,
    ) -> Result<(), MoveError> {
        self.check_pair(source, target)?;
        // The new parent is target's parent, which must not sit under source.
        if self.store.is_ancestor_or_self(source, target) {
            debug!(%source, %target, "move rejected: target lies inside the moved subtree");
            return Err(MoveError::WouldCreateCycle { source, target });
        }

        let parent = self.store.parent(target);
        self.store.detach(source);
        // Looked up after detaching so the index accounts for source leaving
        // the same list.
        let index = self
            .store
            .siblings(parent)
            .and_then(|list| list.iter().position(|id| *id == target))
            .map_or(usize::MAX, |at| match placement {
                Placement::Before => at,
                Placement::After => at + 1,
            });
        self.store.attach(source, parent, index);
        self.store.emit(StoreEvent::Reparented(source));
        Ok(())
    }

    fn check_pair(&self, source: ElementId, target: ElementId) -> Result<(), MoveError> {
        if source == target {
            debug!(%source, "move rejected: source equals target");
            return Err(MoveError::SameElement(source));
        }
        for id in [source, target] {
            if !self.store.contains(id) {
                debug!(%id, "move rejected: unknown element");
                return Err(MoveError::UnknownElement(id));
            }
        }
        Ok(())
    }
}

/// Which part of the tree the directory panel works on.
///
/// `insert_parent` is the element new elements are created under (`None`
/// creates root elements). `shown_parent` is the element whose children the
/// panel lists (`None` lists the root sequence).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectoryCursor {
    insert_parent: Option<ElementId>,
    shown_parent: Option<ElementId>,
}

impl DirectoryCursor {
    /// Creates a cursor at the root.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            insert_parent: None,
            shown_parent: None,
        }
    }

    /// Returns the parent for newly created elements.
    #[must_use]
    pub fn insert_parent(&self) -> Option<ElementId> {
        self.insert_parent
    }

    /// Returns the element whose children are listed.
    #[must_use]
    pub fn shown_parent(&self) -> Option<ElementId> {
        self.shown_parent
    }

    /// Sets the parent for newly created elements.
    pub fn set_insert_parent(&mut self, parent: Option<ElementId>) {
        self.insert_parent = parent;
    }

    /// Sets the element whose children are listed.
    pub fn set_shown_parent(&mut self, parent: Option<ElementId>) {
        self.shown_parent = parent;
    }

    /// Resets both selections that name elements no longer in `store`.
    ///
    /// Returns `true` if anything was reset.
    pub fn prune(&mut self, store: &ElementStore) -> bool {
        let mut changed = false;
        for slot in [&mut self.insert_parent, &mut self.shown_parent] {
            if slot.is_some_and(|id| !store.contains(id)) {
                *slot = None;
                changed = true;
            }
        }
        changed
    }

    /// Returns the ids the directory panel lists.
    ///
    /// A shown parent that no longer exists lists nothing.
    #[must_use]
    pub fn listing<'s>(&self, store: &'s ElementStore) -> &'s [ElementId] {
        match self.shown_parent {
            None => store.root_ids(),
            Some(parent) => store.children(parent).unwrap_or(&[]),
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{Directory, DirectoryCursor};
    use crate::{ElementId, ElementKind, ElementStore, MoveError, NewElement};

    fn node(store: &mut ElementStore, parent: Option<ElementId>) -> ElementId {
        store
            .create(NewElement::new(ElementKind::Title, Point::ZERO).with_parent_opt(parent))
            .unwrap()
    }

    #[test]
    fn move_before_and_after_reorder_roots() {
        let mut store = ElementStore::new();
        let a = node(&mut store, None);
        let b = node(&mut store, None);
        let c = node(&mut store, None);

        Directory::new(&mut store).move_before(c, a).unwrap();
        assert_eq!(store.root_ids(), &[c, a, b]);

        Directory::new(&mut store).move_after(c, b).unwrap();
        assert_eq!(store.root_ids(), &[a, b, c]);

        // Moving right after the previous sibling is a no-op in effect.
        Directory::new(&mut store).move_after(b, a).unwrap();
        assert_eq!(store.root_ids(), &[a, b, c]);
        store.validate().unwrap();
    }

    #[test]
    fn move_before_adopts_target_parent() {
        let mut store = ElementStore::new();
        let p = node(&mut store, None);
        let c1 = node(&mut store, Some(p));
        let loose = node(&mut store, None);

        Directory::new(&mut store).move_before(loose, c1).unwrap();
        assert_eq!(store.children(p), Some(&[loose, c1][..]));
        assert_eq!(store.parent(loose), Some(p));
        assert_eq!(store.root_ids(), &[p]);
        store.validate().unwrap();
    }

    #[test]
    fn move_as_child_appends_and_expands() {
        let mut store = ElementStore::new();
        let p = node(&mut store, None);
        let existing = node(&mut store, Some(p));
        let s = node(&mut store, None);

        Directory::new(&mut store).move_as_child(s, p).unwrap();
        assert_eq!(store.children(p), Some(&[existing, s][..]));
        assert!(store.get(p).unwrap().is_expanded);
        assert_eq!(store.root_ids(), &[p]);
    }

    #[test]
    fn rejected_moves_leave_tree_untouched() {
        let mut store = ElementStore::new();
        let p = node(&mut store, None);
        let c = node(&mut store, Some(p));
        let g = node(&mut store, Some(c));
        let ghost = ElementId::from_u128(404);
        let before = store.clone();
        let rev = store.revision();

        let mut dir = Directory::new(&mut store);
        assert_eq!(dir.move_as_child(p, p), Err(MoveError::SameElement(p)));
        assert_eq!(
            dir.move_as_child(p, g),
            Err(MoveError::WouldCreateCycle { source: p, target: g })
        );
        assert_eq!(
            dir.move_before(p, c),
            Err(MoveError::WouldCreateCycle { source: p, target: c })
        );
        assert_eq!(dir.move_after(ghost, p), Err(MoveError::UnknownElement(ghost)));
        assert!(dir.is_ancestor(p, g));
        assert!(!dir.is_ancestor(g, p));

        assert_eq!(store.revision(), rev);
        assert_eq!(store.tree_order(), before.tree_order());
        assert_eq!(store.children(p), before.children(p));
    }

    #[test]
    fn cursor_lists_roots_or_children_and_prunes() {
        let mut store = ElementStore::new();
        let p = node(&mut store, None);
        let c = node(&mut store, Some(p));
        let mut cursor = DirectoryCursor::new();
        assert_eq!(cursor.listing(&store), &[p]);

        cursor.set_shown_parent(Some(p));
        cursor.set_insert_parent(Some(c));
        assert_eq!(cursor.listing(&store), &[c]);

        store.delete(c).unwrap();
        assert!(cursor.prune(&store));
        assert_eq!(cursor.insert_parent(), None);
        assert_eq!(cursor.shown_parent(), Some(p));
        assert!(cursor.listing(&store).is_empty());
        assert!(!cursor.prune(&store));
    }
}
