// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Point;
use mindcanvas::generate_test_elements;
use mindcanvas_elements::{ElementId, ElementKind, ElementStore, NewElement, PositionUpdate};

fn bench_batch_update_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("store/batch_update_positions");

    // One drag frame moving `len` selected elements.
    for len in [1usize, 16, 256, 4_096] {
        let mut store = ElementStore::new();
        let ids = generate_test_elements(&mut store, Point::ZERO, len, 5_000.0, 9);
        let ids: Vec<_> = ids.into_iter().take(len).collect();
        let mut frame = 0.0;
        group.throughput(Throughput::Elements(len as u64));
        group.bench_function(BenchmarkId::from_parameter(len), |b| {
            b.iter(|| {
                frame += 1.0;
                let updates: Vec<_> = ids
                    .iter()
                    .map(|id| PositionUpdate::new(*id, Point::new(frame, frame)))
                    .collect();
                black_box(store.batch_update_positions(&updates));
                store.take_events();
            });
        });
    }
    group.finish();
}

/// Builds a chain of `depth` levels, each with `fanout` leaf children.
fn deep_tree(depth: usize, fanout: usize) -> (ElementStore, ElementId) {
    let mut store = ElementStore::new();
    let mut parent = None;
    let mut root = None;
    for _ in 0..depth {
        let Ok(node) = store.create(
            NewElement::new(ElementKind::Title, Point::ZERO).with_parent_opt(parent),
        ) else {
            break;
        };
        root.get_or_insert(node);
        for _ in 0..fanout {
            let _ = store.create(
                NewElement::new(ElementKind::Text, Point::new(1.0, 1.0))
                    .with_parent(node),
            );
        }
        parent = Some(node);
    }
    let root = root.unwrap_or_else(|| panic!("empty tree"));
    (store, root)
}

fn bench_delete_subtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("store/delete_subtree");
    for depth in [16usize, 256, 2_048] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter_batched(
                || deep_tree(depth, 4),
                |(mut store, root)| black_box(store.delete(root)),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_batch_update_positions, bench_delete_subtree);
criterion_main!(benches);
