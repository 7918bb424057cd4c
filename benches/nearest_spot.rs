// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for click handling on crowded frames.
//!
//! Measures the performance of:
//! - Nearest spot lookup in a single frame
//! - A full single click through the edit controller

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use spot_lens::display::{ClickEvent, HyperStack, SpotEditController, StackView};
use spot_lens::domain::{Calibration, Spot, SpotCollection};
use std::hint::black_box;

/// Builds a frame holding `count` spots laid out on a grid.
fn crowded_frame(count: usize) -> SpotCollection {
    let side = (count as f32).sqrt().ceil() as usize;
    let mut spots = SpotCollection::new();
    for i in 0..count {
        let x = (i % side) as f32 * 4.0;
        let y = (i / side) as f32 * 4.0;
        spots.add(Spot::new([x, y, 0.0]), 0);
    }
    spots
}

fn bench_closest_spot(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_spot");

    for count in [100, 1_000, 10_000] {
        let spots = crowded_frame(count);
        group.bench_with_input(BenchmarkId::new("closest_spot", count), &spots, |b, spots| {
            b.iter(|| black_box(spots.closest_spot(black_box([57.3, 41.9, 0.0]), 0)));
        });
    }

    group.finish();
}

fn bench_single_click(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_spot");

    let spots = crowded_frame(1_000);
    let stack = HyperStack::blank("bench", 512, 512, 1, 1).expect("valid stack");
    let view = StackView::new(stack);
    let mut controller = SpotEditController::new(Calibration::default(), 2.0);

    group.bench_function("single_click", |b| {
        b.iter(|| {
            let effects =
                controller.handle_click(&ClickEvent::single(57.0, 41.0), &view, &spots);
            black_box(effects);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_closest_spot, bench_single_click);
criterion_main!(benches);
