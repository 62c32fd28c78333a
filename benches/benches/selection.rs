// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use mapframe_selection::{SelectionMachine, SelectionPolicy, codec};

fn ids(len: usize) -> Vec<String> {
    (0..len).map(|i| format!("click-{i}")).collect()
}

fn bench_hydrate(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/hydrate");

    // Hydration de-duplicates by linear scan; this tracks how far that holds up.
    for len in [8_usize, 30, 100, 1_000] {
        let value = codec::encode(ids(len)).unwrap_or_default();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &value, |b, value| {
            b.iter_batched(
                || SelectionMachine::<String>::new(SelectionPolicy::Multi, None),
                |mut machine| {
                    machine.hydrate(codec::decode(value));
                    black_box(machine);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_toggle_to_cap(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/toggle_to_cap");

    for cap in [30_usize, 100] {
        let keys = ids(cap + 10);
        group.throughput(Throughput::Elements(keys.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(cap), &keys, |b, keys| {
            b.iter_batched(
                || SelectionMachine::<String>::new(SelectionPolicy::Multi, Some(cap)),
                |mut machine| {
                    for key in keys {
                        black_box(machine.toggle(key.clone()));
                    }
                    black_box(codec::encode(machine.ids()))
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hydrate, bench_toggle_to_cap);
criterion_main!(benches);
