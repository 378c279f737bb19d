// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic sample data for demos and benchmarks.

use kurbo::Point;
use mindcanvas_elements::{ElementId, ElementStore, NewElement};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Scatters `count` root elements of every registered kind uniformly inside
/// a `range` × `range` square centered on `center`.
///
/// The same `seed` always yields the same positions. Returns the created ids
/// grouped by kind, in registration order.
pub fn generate_test_elements(
    store: &mut ElementStore,
    center: Point,
    count: usize,
    range: f64,
    seed: u64,
) -> Vec<ElementId> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let range = if range.is_finite() { range.max(0.0) } else { 0.0 };
    let kinds: Vec<_> = store.registry().kinds().cloned().collect();
    let mut ids = Vec::with_capacity(kinds.len() * count);

    for kind in kinds {
        for n in 1..=count {
            let x = center.x + rng.random::<f64>() * range - range / 2.0;
            let y = center.y + rng.random::<f64>() * range - range / 2.0;
            let new = NewElement::new(kind.clone(), Point::new(x, y))
                .with_content(format!("Test {kind} {n}"));
            if let Ok(id) = store.create(new) {
                ids.push(id);
            }
        }
    }
    tracing::debug!(count = ids.len(), seed, "generated test elements");
    ids
}
