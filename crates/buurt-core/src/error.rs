//! Error types for grid accumulation.

use std::error::Error;
use std::fmt;

use crate::bounds::BoundingBox;
use crate::point::{CellCoord, Point};

/// Errors from bounding, allocating, or scattering onto a grid.
///
/// None of these are transient: each aborts the conversion run.
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// No points were supplied, so there is no extent to bound.
    EmptyInput,
    /// The grid for the requested bounds exceeds the configured ceiling.
    GridTooLarge {
        /// Requested number of columns.
        width: i64,
        /// Requested number of rows.
        height: i64,
        /// Requested cell count (all live grids for a partitioned scatter),
        /// `None` if it overflows `usize`.
        requested: Option<usize>,
        /// Configured maximum cell count.
        limit: usize,
    },
    /// A scatter target fell outside the allocated grid. Indicates the grid
    /// was built from a different point set than the one being scattered.
    IndexOutOfRange {
        /// The offending point.
        point: Point,
        /// Its home cell.
        cell: CellCoord,
        /// Bounds of the grid being written.
        bounds: BoundingBox,
    },
    /// The distance-weight table was rejected.
    InvalidKernel {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "no input points to bound"),
            Self::GridTooLarge {
                width,
                height,
                requested,
                limit,
            } => match requested {
                Some(n) => write!(
                    f,
                    "grid {width}x{height} ({n} cells) exceeds limit of {limit} cells"
                ),
                None => write!(
                    f,
                    "grid {width}x{height} overflows addressable size (limit {limit} cells)"
                ),
            },
            Self::IndexOutOfRange {
                point,
                cell,
                bounds,
            } => {
                write!(
                    f,
                    "point {point} (cell {cell}) scatters outside grid bounds {bounds}"
                )
            }
            Self::InvalidKernel { reason } => write!(f, "invalid kernel: {reason}"),
        }
    }
}

impl Error for GridError {}
