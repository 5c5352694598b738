// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the preview-navigation hot paths.
//!
//! Measures the pure state transitions the UI performs on every keypress
//! or progress event: wrap-around navigation and blended batch progress.

use criterion::{criterion_group, criterion_main, Criterion};
use lazy_photos::photo_navigation::PhotoNavigator;
use lazy_photos::upload::batch_percent;
use std::hint::black_box;

/// Benchmark a full wrap-around cycle over a large collection.
fn bench_navigation_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("preview_navigation");

    group.bench_function("next_full_cycle_1000", |b| {
        b.iter(|| {
            let mut navigator = PhotoNavigator::new();
            navigator.set_count(1000);
            navigator.open(0);
            for _ in 0..1000 {
                black_box(navigator.next());
            }
            black_box(navigator.selected())
        });
    });

    group.bench_function("previous_wraps_from_first", |b| {
        b.iter(|| {
            let mut navigator = PhotoNavigator::new();
            navigator.set_count(1000);
            navigator.open(0);
            black_box(navigator.previous())
        });
    });

    group.finish();
}

/// Benchmark the aggregate-progress blend across a simulated batch.
fn bench_batch_percent(c: &mut Criterion) {
    let mut group = c.benchmark_group("preview_navigation");

    group.bench_function("batch_percent_100x100", |b| {
        b.iter(|| {
            let mut last = 0u8;
            for index in 0..100usize {
                for percent in 0..=100u8 {
                    last = batch_percent(black_box(index), 100, black_box(percent));
                }
            }
            black_box(last)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_navigation_cycle, bench_batch_percent);
criterion_main!(benches);
