// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use mindcanvas::generate_test_elements;
use mindcanvas_area::{AreaConfig, AreaTracker};
use mindcanvas_elements::{ElementKind, ElementStore};
use mindcanvas_view2d::ViewState;

fn sized_view() -> ViewState {
    let mut view = ViewState::new();
    view.set_canvas_size(Size::new(1280.0, 720.0));
    view.set_container_size(Size::new(1280.0, 720.0));
    view
}

fn bench_visible_ids_by_type(c: &mut Criterion) {
    let mut group = c.benchmark_group("culling/visible_ids_by_type");
    let view = sized_view();
    let mut area = AreaTracker::new(AreaConfig::default());
    area.recompute_now(&view);

    // Elements are spread over a square ten screens wide, so most are culled.
    for per_kind in [100usize, 1_000, 10_000] {
        let mut store = ElementStore::new();
        generate_test_elements(&mut store, Point::new(640.0, 360.0), per_kind, 12_800.0, 1);
        group.throughput(Throughput::Elements(per_kind as u64));
        group.bench_with_input(BenchmarkId::from_parameter(per_kind), &store, |b, store| {
            b.iter(|| {
                black_box(
                    store.visible_ids_by_type(&ElementKind::Markdown, |pt| {
                        area.is_in_preload_area(pt)
                    }),
                )
            });
        });
    }
    group.finish();
}

fn bench_pan_recompute(c: &mut Criterion) {
    c.bench_function("culling/pan_and_recompute", |b| {
        let mut view = sized_view();
        let mut area = AreaTracker::new(AreaConfig::default());
        area.recompute_now(&view);
        let mut step = 0_u32;
        b.iter(|| {
            step = step.wrapping_add(1);
            // Pan in a loop so the preload area both grows and gets reclaimed.
            let dx = if step % 64 < 32 { -40.0 } else { 40.0 };
            view.pan_by(Vec2::new(dx, 0.0));
            area.recompute_now(&view);
            if step % 256 == 0 {
                area.reclaim_now();
            }
            black_box(area.preload_bounds())
        });
    });
}

criterion_group!(benches, bench_visible_ids_by_type, bench_pan_recompute);
criterion_main!(benches);
