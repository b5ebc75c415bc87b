//! Circular distance-weight kernel.
//!
//! The kernel is an 11x11 matrix indexed by offset `(dx, dy)` in
//! `[-5, 5] x [-5, 5]`. Each entry is looked up from a six-entry
//! [`DistanceWeights`] table by the rounded Euclidean distance
//! `round(sqrt(dx² + dy²))`; offsets whose rounded distance exceeds the
//! table stay zero.
//!
//! # Construction
//!
//! ```
//! use buurt_grid::Kernel;
//!
//! let kernel = Kernel::builder()
//!     .weights(&[1.0, 0.7, 0.3, 0.0, 0.0, 0.0])
//!     .build()
//!     .unwrap();
//! assert_eq!(kernel.weight(0, 0), 1.0);
//! assert_eq!(kernel.weight(1, 1), 0.7);
//! assert_eq!(kernel.weight(5, 5), 0.0);
//! ```

use std::fmt;

use buurt_core::{GridError, KERNEL_RADIUS};
use tracing::debug;

/// Side length of the kernel matrix.
pub const KERNEL_SIZE: usize = (2 * KERNEL_RADIUS + 1) as usize;

/// Validated distance-to-weight lookup table.
///
/// Index `d` holds the weight for cells at rounded distance `d` from the
/// center. Entries are finite, non-negative and non-increasing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceWeights([f64; DistanceWeights::LEN]);

impl DistanceWeights {
    /// Number of table entries (distances `0..=KERNEL_RADIUS`).
    pub const LEN: usize = KERNEL_RADIUS as usize + 1;

    /// Reference falloff: full weight at the center, zero from distance 3.
    pub const REFERENCE: [f64; Self::LEN] = [1.0, 0.7, 0.3, 0.0, 0.0, 0.0];

    /// Validate a weight table.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidKernel`] if the table does not have
    /// exactly [`LEN`](Self::LEN) entries, or an entry is non-finite,
    /// negative, or larger than the entry before it.
    pub fn new(table: &[f64]) -> Result<Self, GridError> {
        let arr: [f64; Self::LEN] = table.try_into().map_err(|_| GridError::InvalidKernel {
            reason: format!("expected {} weights, got {}", Self::LEN, table.len()),
        })?;
        for (d, &w) in arr.iter().enumerate() {
            if !w.is_finite() || w < 0.0 {
                return Err(GridError::InvalidKernel {
                    reason: format!("weight at distance {d} must be finite and >= 0, got {w}"),
                });
            }
            if d > 0 && w > arr[d - 1] {
                return Err(GridError::InvalidKernel {
                    reason: format!(
                        "weights must be non-increasing: distance {d} has {w} > {}",
                        arr[d - 1]
                    ),
                });
            }
        }
        Ok(Self(arr))
    }

    /// Weight for rounded distance `d`, zero beyond the table.
    pub fn get(&self, d: usize) -> f64 {
        self.0.get(d).copied().unwrap_or(0.0)
    }
}

impl Default for DistanceWeights {
    fn default() -> Self {
        Self(Self::REFERENCE)
    }
}

impl fmt::Display for DistanceWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// One non-zero kernel entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tap {
    /// Column offset from the center cell.
    pub dx: i64,
    /// Row offset from the center cell.
    pub dy: i64,
    /// Weight applied to the point's score.
    pub weight: f64,
}

/// Immutable 11x11 weight matrix.
///
/// Besides the dense matrix, the kernel keeps the list of non-zero
/// [`Tap`]s so scatter can skip zero entries without testing them.
#[derive(Clone, Debug)]
pub struct Kernel {
    weights: [[f64; KERNEL_SIZE]; KERNEL_SIZE],
    taps: Vec<Tap>,
}

/// Rounded Euclidean distance of an offset, as a table index.
pub(crate) fn distance_index(dx: i64, dy: i64) -> usize {
    (((dx * dx + dy * dy) as f64).sqrt().round()) as usize
}

impl Kernel {
    /// Create a builder seeded with [`DistanceWeights::REFERENCE`].
    pub fn builder() -> KernelBuilder {
        KernelBuilder {
            weights: DistanceWeights::REFERENCE.to_vec(),
        }
    }

    /// Build the kernel from an already validated table.
    pub fn from_weights(table: &DistanceWeights) -> Self {
        let mut weights = [[0.0; KERNEL_SIZE]; KERNEL_SIZE];
        let mut taps = Vec::new();
        for dy in -KERNEL_RADIUS..=KERNEL_RADIUS {
            for dx in -KERNEL_RADIUS..=KERNEL_RADIUS {
                let l = distance_index(dx, dy);
                if l > KERNEL_RADIUS as usize {
                    continue;
                }
                let w = table.get(l);
                weights[(dy + KERNEL_RADIUS) as usize][(dx + KERNEL_RADIUS) as usize] = w;
                if w != 0.0 {
                    taps.push(Tap { dx, dy, weight: w });
                }
            }
        }
        debug!(weights = %table, taps = taps.len(), "built distance kernel");
        Self { weights, taps }
    }

    /// Weight at offset `(dx, dy)`; zero outside the footprint.
    pub fn weight(&self, dx: i64, dy: i64) -> f64 {
        let r = KERNEL_RADIUS.unsigned_abs();
        if dx.unsigned_abs() > r || dy.unsigned_abs() > r {
            return 0.0;
        }
        self.weights[(dy + KERNEL_RADIUS) as usize][(dx + KERNEL_RADIUS) as usize]
    }

    /// Non-zero entries in row-major order.
    pub fn taps(&self) -> &[Tap] {
        &self.taps
    }

    /// Kernel radius in cells.
    pub fn radius(&self) -> i64 {
        KERNEL_RADIUS
    }

    /// Dense matrix, `[dy + radius][dx + radius]`.
    pub fn matrix(&self) -> &[[f64; KERNEL_SIZE]; KERNEL_SIZE] {
        &self.weights
    }

    /// Sum of all weights: the total mass one unit of score spreads.
    pub fn total_weight(&self) -> f64 {
        self.taps.iter().map(|t| t.weight).sum()
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::from_weights(&DistanceWeights::default())
    }
}

/// Builder for [`Kernel`].
///
/// Defaults: `weights = DistanceWeights::REFERENCE`.
pub struct KernelBuilder {
    weights: Vec<f64>,
}

impl KernelBuilder {
    /// Set the distance-weight table (one entry per rounded distance 0..=5).
    pub fn weights(mut self, weights: &[f64]) -> Self {
        self.weights = weights.to_vec();
        self
    }

    /// Validate the table and build the kernel.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidKernel`] if the table is rejected by
    /// [`DistanceWeights::new`].
    pub fn build(self) -> Result<Kernel, GridError> {
        let table = DistanceWeights::new(&self.weights)?;
        Ok(Kernel::from_weights(&table))
    }
}
