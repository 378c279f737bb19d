// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree invariants under deletion and random directory moves.

use kurbo::Point;
use mindcanvas_elements::{Directory, ElementId, ElementKind, ElementStore, NewElement};
use proptest::prelude::*;

fn node(store: &mut ElementStore, parent: Option<ElementId>) -> ElementId {
    store
        .create(NewElement::new(ElementKind::Title, Point::ZERO).with_parent_opt(parent))
        .unwrap()
}

#[test]
fn deleting_parent_removes_whole_subtree() {
    let mut store = ElementStore::new();
    let p = node(&mut store, None);
    let c1 = node(&mut store, Some(p));
    let c2 = node(&mut store, Some(p));
    let g1 = node(&mut store, Some(c1));
    let sibling = node(&mut store, None);
    store.toggle_selection(g1, false).unwrap();
    store.toggle_selection(sibling, true).unwrap();

    let removed = store.delete(p).unwrap();
    assert_eq!(removed, vec![p, c1, g1, c2]);
    for id in [p, c1, c2, g1] {
        assert!(!store.contains(id), "{id} should be gone");
        assert!(!store.selection().contains(id), "{id} still selected");
        assert!(!store.root_ids().contains(&id), "{id} still a root");
    }
    assert_eq!(store.root_ids(), &[sibling]);
    assert_eq!(store.len(), 1);
    store.validate().unwrap();
}

#[test]
fn move_before_twice_equals_once() {
    let mut store = ElementStore::new();
    let p = node(&mut store, None);
    let a = node(&mut store, Some(p));
    let b = node(&mut store, Some(p));
    let c = node(&mut store, Some(p));

    Directory::new(&mut store).move_before(c, a).unwrap();
    let once = store.children(p).unwrap().to_vec();
    Directory::new(&mut store).move_before(c, a).unwrap();
    assert_eq!(store.children(p).unwrap(), once.as_slice());
    assert_eq!(once, vec![c, a, b]);
}

#[derive(Clone, Debug)]
enum Op {
    Before(usize, usize),
    After(usize, usize),
    AsChild(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    let pair = (0_usize..12, 0_usize..12);
    prop_oneof![
        pair.clone().prop_map(|(s, t)| Op::Before(s, t)),
        pair.clone().prop_map(|(s, t)| Op::After(s, t)),
        pair.prop_map(|(s, t)| Op::AsChild(s, t)),
    ]
}

proptest! {
    #[test]
    fn random_moves_keep_the_tree_valid(ops in prop::collection::vec(op(), 1..60)) {
        let mut store = ElementStore::new();
        let ids: Vec<ElementId> = (0..12).map(|_| node(&mut store, None)).collect();

        for op in ops {
            let before = store.tree_order();
            let rev = store.revision();
            let mut dir = Directory::new(&mut store);
            let result = match op {
                Op::Before(s, t) => dir.move_before(ids[s], ids[t]),
                Op::After(s, t) => dir.move_after(ids[s], ids[t]),
                Op::AsChild(s, t) => dir.move_as_child(ids[s], ids[t]),
            };
            if result.is_err() {
                prop_assert_eq!(store.revision(), rev);
                prop_assert_eq!(store.tree_order(), before);
            }
            prop_assert!(store.validate().is_ok());
            prop_assert_eq!(store.tree_order().len(), ids.len());
        }
    }
}
