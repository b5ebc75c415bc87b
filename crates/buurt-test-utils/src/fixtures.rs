//! Reusable point-set fixtures.
//!
//! - [`single_point`]: one point at `(500, 500)` with score 10.
//! - [`far_apart_pair`]: two points whose kernel footprints never overlap.
//! - [`seeded_points`]: `n` pseudo-random points inside an extent.
//! - [`SAMPLE_CSV`]: a three-row input table in the legacy format.

use buurt_core::Point;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Extent (min, max) of Amsterdam in RD New coordinates, roughly.
pub const AMSTERDAM_X: (i64, i64) = (110_000, 135_000);
pub const AMSTERDAM_Y: (i64, i64) = (476_000, 494_000);

/// Single point at cell `(5, 5)` with score 10.
pub fn single_point() -> Point {
    Point::new(500, 500, 10.0)
}

/// Two points 30 cells apart on the x axis, scores 10 and 4.
pub fn far_apart_pair() -> [Point; 2] {
    [Point::new(500, 500, 10.0), Point::new(3_500, 500, 4.0)]
}

/// `n` deterministic points uniformly inside `x` / `y` with scores in
/// `[-1, 5)`.
pub fn seeded_points(seed: u64, n: usize, x: (i64, i64), y: (i64, i64)) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Point::new(
                rng.random_range(x.0..=x.1),
                rng.random_range(y.0..=y.1),
                rng.random_range(-1.0..5.0),
            )
        })
        .collect()
}

/// `n` deterministic points spread over [`AMSTERDAM_X`] / [`AMSTERDAM_Y`].
pub fn amsterdam_points(seed: u64, n: usize) -> Vec<Point> {
    seeded_points(seed, n, AMSTERDAM_X, AMSTERDAM_Y)
}

/// Legacy-format input: BOM, quoted header, padded separators, comma
/// decimals.
pub const SAMPLE_CSV: &str = "\u{feff}\"ZAAKNAAM\" ; XCOORD;YCOORD;WERKOPP;score_maartje;m2_score;impact_factor\n\
\"Snackbar \"\"De Hoek\"\"\";500;500;40;1,5;0,25;10\n\
Bakkerij;3500 ; 500;120;2;0,5;4,0\n\
\n\
Viskraam;4200;1800;;3;1;0,5\n";
