//! Core types for the buurt point-to-raster converter.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! planar grid geometry shared by the rest of the workspace: input
//! [`Point`]s, [`CellCoord`]s, the [`BoundingBox`] of a conversion run,
//! the [`CellRounding`] rule that maps coordinates to cells, and the
//! [`GridError`] type.
//!
//! # Grid geometry
//!
//! All coordinates live on a single planar grid with square cells of
//! [`CELL_SIZE`] coordinate units. A point contributes to the cells within
//! [`KERNEL_RADIUS`] of its home cell; bounding boxes are padded by
//! [`BOUNDS_MARGIN`] cells so that footprint never leaves the grid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bounds;
pub mod error;
pub mod point;
pub mod rounding;

pub use bounds::BoundingBox;
pub use error::GridError;
pub use point::{CellCoord, Point};
pub use rounding::CellRounding;

/// Edge length of one grid cell, in coordinate units.
pub const CELL_SIZE: i64 = 100;

/// Kernel radius in cells. The kernel footprint is
/// `(2 * KERNEL_RADIUS + 1)` cells on each side.
pub const KERNEL_RADIUS: i64 = 5;

/// Padding (in cells) added on every side of the point extent.
pub const BOUNDS_MARGIN: i64 = KERNEL_RADIUS + 1;
