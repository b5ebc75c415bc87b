//! Grid accumulation engine for buurt.
//!
//! Turns a set of [`Point`](buurt_core::Point)s into a smoothed raster:
//!
//! 1. [`KernelBuilder`] precomputes an 11x11 [`Kernel`] from a six-entry
//!    [`DistanceWeights`] table.
//! 2. [`GridAccumulator::compute_bounds`] derives the padded
//!    [`BoundingBox`](buurt_core::BoundingBox) of the input.
//! 3. [`GridAccumulator::allocate`] creates a zeroed [`Grid`] for that box,
//!    refusing sizes above [`AccumulatorConfig::max_cells`].
//! 4. [`GridAccumulator::scatter`] adds `weight * score` around each point.
//!
//! [`GridAccumulator::accumulate`] runs all four steps, optionally
//! partitioning the scatter pass across threads.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod accumulator;
pub mod config;
pub mod grid;
pub mod kernel;

pub use accumulator::GridAccumulator;
pub use config::{AccumulatorConfig, ConfigError};
pub use grid::Grid;
pub use kernel::{DistanceWeights, Kernel, KernelBuilder, Tap, KERNEL_SIZE};
