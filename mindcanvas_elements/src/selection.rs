// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The set of selected elements.

use crate::id::ElementId;

/// The current selection: a set of element ids plus the primary (most
/// recently added) element and a revision counter.
///
/// Ids keep insertion order, so a drag session snapshots anchors in the order
/// the user picked the elements. The revision bumps only when the contents or
/// the primary actually change.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    items: Vec<ElementId>,
    primary: Option<usize>,
    revision: u64,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            primary: None,
            revision: 0,
        }
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of selected elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the selected ids in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[ElementId] {
        &self.items
    }

    /// Iterates the selected ids.
    pub fn iter(&self) -> core::slice::Iter<'_, ElementId> {
        self.items.iter()
    }

    /// Returns the most recently added element, if any.
    pub(crate) fn primary(&self) -> Option<ElementId> {
        self.primary.map(|idx| self.items[idx])
    }

    /// Returns the revision counter.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if `id` is selected.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.items.contains(&id)
    }

    /// Replaces the selection with exactly `id` (plain click).
    ///
    /// Returns `true` if the selection changed.
    pub fn select_only(&mut self, id: ElementId) -> bool {
        if self.items.as_slice() == [id] {
            return false;
        }
        self.items.clear();
        self.items.push(id);
        self.primary = Some(0);
        self.bump_revision();
        true
    }

    /// Adds `id` if absent or removes it if present (modifier click).
    ///
    /// Returns `true` if `id` is selected afterwards.
    pub fn toggle(&mut self, id: ElementId) -> bool {
        if let Some(idx) = self.position_of(id) {
            self.remove_at(idx);
            self.bump_revision();
            false
        } else {
            self.items.push(id);
            self.primary = Some(self.items.len() - 1);
            self.bump_revision();
            true
        }
    }

    /// Keeps only ids for which `keep` returns `true`.
    ///
    /// Returns `true` if anything was removed.
    pub fn retain(&mut self, mut keep: impl FnMut(ElementId) -> bool) -> bool {
        let primary = self.primary();
        let before = self.items.len();
        self.items.retain(|id| keep(*id));
        if self.items.len() == before {
            return false;
        }
        self.primary = primary.and_then(|p| self.position_of(p));
        if self.primary.is_none() && !self.items.is_empty() {
            self.primary = Some(self.items.len() - 1);
        }
        self.bump_revision();
        true
    }

    /// Deselects everything. Returns `true` if anything was selected.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        self.primary = None;
        self.bump_revision();
        true
    }

    fn position_of(&self, id: ElementId) -> Option<usize> {
        self.items.iter().position(|item| *item == id)
    }

    fn remove_at(&mut self, idx: usize) {
        self.items.remove(idx);
        self.primary = match self.primary {
            _ if self.items.is_empty() => None,
            Some(p) if p == idx => Some(self.items.len() - 1),
            Some(p) if p > idx => Some(p - 1),
            other => other,
        };
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;
    use crate::ElementId;

    fn id(n: u128) -> ElementId {
        ElementId::from_u128(n)
    }

    #[test]
    fn plain_click_replaces_and_modifier_click_extends() {
        let mut selection = Selection::new();
        selection.select_only(id(1));
        assert_eq!(selection.items(), &[id(1)]);

        selection.toggle(id(2));
        assert_eq!(selection.items(), &[id(1), id(2)]);
        assert_eq!(selection.primary(), Some(id(2)));

        selection.select_only(id(3));
        assert_eq!(selection.items(), &[id(3)]);
    }

    #[test]
    fn toggle_twice_restores_previous_contents() {
        let mut selection = Selection::new();
        selection.select_only(id(1));
        assert!(selection.toggle(id(2)));
        assert!(!selection.toggle(id(2)));
        assert_eq!(selection.items(), &[id(1)]);
        assert_eq!(selection.primary(), Some(id(1)));
    }

    #[test]
    fn revision_bumps_only_on_change() {
        let mut selection = Selection::new();
        assert!(!selection.clear());
        assert_eq!(selection.revision(), 0);

        assert!(selection.select_only(id(1)));
        let rev = selection.revision();
        assert!(!selection.select_only(id(1)));
        assert!(!selection.retain(|_| true));
        assert_eq!(selection.revision(), rev);

        selection.toggle(id(2));
        assert!(selection.revision() > rev);
    }

    #[test]
    fn retain_drops_ids_and_repairs_primary() {
        let mut selection = Selection::new();
        selection.toggle(id(1));
        selection.toggle(id(2));
        selection.toggle(id(3));
        assert_eq!(selection.primary(), Some(id(3)));

        assert!(selection.retain(|x| x != id(3)));
        assert_eq!(selection.items(), &[id(1), id(2)]);
        assert_eq!(selection.primary(), Some(id(2)));
        assert!(!selection.retain(|_| true));

        selection.retain(|_| false);
        assert!(selection.is_empty());
        assert_eq!(selection.primary(), None);
    }
}
