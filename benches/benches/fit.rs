// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Affine, Point, Rect, Size};
use mapframe_view::fit::{FitOptions, fit_bounds};
use mapframe_view::geometry::{transform_rect_bounds, union_bounds};
use mapframe_view::{EngineOptions, TransitionKind, ViewportEngine};

fn boxes(count: usize) -> Vec<Rect> {
    (0..count)
        .map(|i| {
            let x = (i % 40) as f64 * 50.0;
            let y = (i / 40) as f64 * 25.0;
            Rect::new(x, y, x + 30.0, y + 15.0)
        })
        .collect()
}

fn bench_fit_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit/fit_bounds");
    let viewport = Size::new(1280.0, 720.0);
    let options = FitOptions::default();

    // Selections are usually small, but a select-all share link can hold hundreds.
    for count in [1_usize, 30, 100, 1_000] {
        let input = boxes(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| black_box(fit_bounds(black_box(input), viewport, &options)));
        });
    }

    group.finish();
}

fn bench_manifest_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit/transformed_union");
    let affine = Affine::translate((120.0, 40.0)) * Affine::rotate(0.3) * Affine::scale(1.5);

    for count in [100_usize, 1_000, 10_000] {
        let input = boxes(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| {
                black_box(union_bounds(
                    input.iter().map(|r| transform_rect_bounds(affine, *r)),
                ))
            });
        });
    }

    group.finish();
}

fn bench_reframe_animation(c: &mut Criterion) {
    c.bench_function("fit/reframe_750ms_at_60fps", |b| {
        let viewport = Size::new(800.0, 600.0);
        let target = fit_bounds(
            &[Rect::new(1600.0, 700.0, 1800.0, 850.0)],
            viewport,
            &FitOptions::default(),
        )
        .unwrap();
        b.iter(|| {
            let mut engine = ViewportEngine::new(EngineOptions::default());
            engine.initialize(Size::new(2000.0, 1000.0), viewport);
            engine.animate_to(target, 750, TransitionKind::Reframe);
            let mut now = 0;
            while engine.is_animating() {
                now += 16;
                engine.tick(now);
            }
            black_box(engine.view_to_content_point(Point::new(400.0, 300.0)))
        });
    });
}

criterion_group!(
    benches,
    bench_fit_bounds,
    bench_manifest_bounds,
    bench_reframe_animation
);
criterion_main!(benches);
