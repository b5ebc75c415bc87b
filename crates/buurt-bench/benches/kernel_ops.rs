//! Criterion micro-benchmarks for kernel construction and single-point scatter.

use std::hint::black_box;

use buurt_bench::accumulator;
use buurt_core::{CellRounding, Point};
use buurt_grid::{DistanceWeights, GridAccumulator, Kernel};
use criterion::{criterion_group, criterion_main, Criterion};

/// Benchmark: build the 11x11 matrix from the reference table.
fn bench_kernel_build(c: &mut Criterion) {
    let table = DistanceWeights::default();
    c.bench_function("kernel_build", |b| {
        b.iter(|| black_box(Kernel::from_weights(black_box(&table))));
    });
}

/// Benchmark: sum every kernel weight via `weight(dx, dy)`.
fn bench_kernel_lookup(c: &mut Criterion) {
    let kernel = Kernel::default();
    c.bench_function("kernel_lookup_121", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for dy in -5..=5 {
                for dx in -5..=5 {
                    sum += kernel.weight(dx, dy);
                }
            }
            black_box(sum)
        });
    });
}

/// Benchmark: scatter 1000 points onto one preallocated grid.
fn bench_scatter_1k(c: &mut Criterion) {
    let acc: GridAccumulator = accumulator(1);
    let points: Vec<Point> = (0..1000)
        .map(|i| Point::new(100 * (i % 40), 100 * (i / 40), 1.0))
        .collect();
    let bounds = acc.compute_bounds(&points).unwrap();

    c.bench_function("scatter_1k", |b| {
        b.iter(|| {
            let mut grid = acc.allocate(&bounds).unwrap();
            for p in &points {
                grid.scatter(acc.kernel(), p, CellRounding::HalfUp).unwrap();
            }
            black_box(grid.total())
        });
    });
}

criterion_group!(
    benches,
    bench_kernel_build,
    bench_kernel_lookup,
    bench_scatter_1k
);
criterion_main!(benches);
