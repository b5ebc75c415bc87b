//! Criterion benchmarks for the full accumulate and write pass.

use std::hint::black_box;

use buurt_bench::{accumulator, dense_profile, reference_profile, stress_profile};
use buurt_io::{GridWriter, OutputFormat};
use criterion::{criterion_group, criterion_main, Criterion};

/// Benchmark: bounds + allocate + scatter for the reference profile.
fn bench_accumulate_reference(c: &mut Criterion) {
    let points = reference_profile();
    let acc = accumulator(1);
    c.bench_function("accumulate_reference", |b| {
        b.iter(|| black_box(acc.accumulate(&points).unwrap()));
    });
}

/// Benchmark: dense profile, sequential vs. four partitions.
fn bench_accumulate_dense(c: &mut Criterion) {
    let points = dense_profile();
    let mut group = c.benchmark_group("accumulate_dense");
    for threads in [1, 4] {
        let acc = accumulator(threads);
        group.bench_function(format!("threads_{threads}"), |b| {
            b.iter(|| black_box(acc.accumulate(&points).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark: stress profile with four partitions.
fn bench_accumulate_stress(c: &mut Criterion) {
    let points = stress_profile();
    let acc = accumulator(4);
    let mut group = c.benchmark_group("accumulate_stress");
    group.sample_size(10);
    group.bench_function("threads_4", |b| {
        b.iter(|| black_box(acc.accumulate(&points).unwrap()));
    });
    group.finish();
}

/// Benchmark: render the reference grid to an in-memory sink.
fn bench_write_reference(c: &mut Criterion) {
    let grid = accumulator(1).accumulate(&reference_profile()).unwrap();
    c.bench_function("write_reference", |b| {
        b.iter(|| {
            let mut writer = GridWriter::new(Vec::with_capacity(1 << 20), OutputFormat::default());
            black_box(writer.write_grid(&grid).unwrap())
        });
    });
}

criterion_group!(
    benches,
    bench_accumulate_reference,
    bench_accumulate_dense,
    bench_accumulate_stress,
    bench_write_reference
);
criterion_main!(benches);
