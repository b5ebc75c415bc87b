//! Benchmark profiles for the buurt raster pipeline.
//!
//! - [`reference_profile`]: 2 000 points spread over Amsterdam
//! - [`stress_profile`]: 50 000 points over the same extent
//! - [`dense_profile`]: 10 000 points packed into a 2 km square

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use buurt_core::Point;
use buurt_grid::{AccumulatorConfig, GridAccumulator, Kernel};
use buurt_test_utils::{amsterdam_points, seeded_points};

/// Seed shared by every profile.
pub const BENCH_SEED: u64 = 42;

/// 2 000 points over the Amsterdam extent (~250 x 180 cells).
pub fn reference_profile() -> Vec<Point> {
    amsterdam_points(BENCH_SEED, 2_000)
}

/// 50 000 points over the Amsterdam extent.
pub fn stress_profile() -> Vec<Point> {
    amsterdam_points(BENCH_SEED, 50_000)
}

/// 10 000 points in a 2 km square, so most footprints overlap.
pub fn dense_profile() -> Vec<Point> {
    seeded_points(BENCH_SEED, 10_000, (120_000, 122_000), (486_000, 488_000))
}

/// Accumulator with the reference kernel and `threads` partitions.
pub fn accumulator(threads: usize) -> GridAccumulator {
    let config = AccumulatorConfig {
        threads,
        ..Default::default()
    };
    match GridAccumulator::new(Kernel::default(), config) {
        Ok(acc) => acc,
        Err(e) => panic!("bench accumulator config rejected: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_have_expected_sizes() {
        assert_eq!(reference_profile().len(), 2_000);
        assert_eq!(dense_profile().len(), 10_000);
    }

    #[test]
    fn reference_profile_accumulates() {
        let grid = accumulator(1).accumulate(&reference_profile()).unwrap();
        assert!(grid.width() > 250 && grid.height() > 180);
    }
}
