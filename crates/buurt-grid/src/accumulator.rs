//! Bounds → allocate → scatter pipeline.
//!
//! [`GridAccumulator`] owns a [`Kernel`] and an [`AccumulatorConfig`] and
//! runs the single forward pass that turns points into a [`Grid`]:
//!
//! ```
//! use buurt_core::{CellCoord, Point};
//! use buurt_grid::{AccumulatorConfig, GridAccumulator, Kernel};
//!
//! let acc = GridAccumulator::new(Kernel::default(), AccumulatorConfig::default()).unwrap();
//! let grid = acc.accumulate(&[Point::new(500, 500, 10.0)]).unwrap();
//! assert_eq!(grid.at_cell(CellCoord::new(5, 5)), Some(10.0));
//! assert_eq!(grid.at_cell(CellCoord::new(6, 6)), Some(7.0));
//! ```
//!
//! # Parallel scatter
//!
//! Many points touch the same cells, so scatter cannot write one shared
//! grid from several threads. With `threads > 1` the points are split into
//! `threads` contiguous chunks on the rayon pool; each chunk is scattered
//! into a private grid with the same bounds and the private grids are
//! reduced into the result. Peak memory is `threads + 1` grids, and that
//! whole amount is charged against [`AccumulatorConfig::max_cells`].

use buurt_core::{BoundingBox, GridError, Point};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::{AccumulatorConfig, ConfigError};
use crate::grid::Grid;
use crate::kernel::Kernel;

/// Converts points into an accumulated score grid.
#[derive(Clone, Debug)]
pub struct GridAccumulator {
    kernel: Kernel,
    config: AccumulatorConfig,
}

impl GridAccumulator {
    /// Create an accumulator, validating `config`.
    pub fn new(kernel: Kernel, config: AccumulatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { kernel, config })
    }

    /// The kernel used for scatter.
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// The active configuration.
    pub fn config(&self) -> &AccumulatorConfig {
        &self.config
    }

    /// Padded bounding box of `points`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyInput`] if `points` is empty.
    pub fn compute_bounds(&self, points: &[Point]) -> Result<BoundingBox, GridError> {
        let bounds = BoundingBox::enclosing(points)?;
        debug!(%bounds, points = points.len(), "computed bounds");
        Ok(bounds)
    }

    /// Allocate a zeroed grid for `bounds`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::GridTooLarge`] if the cell count exceeds
    /// [`AccumulatorConfig::max_cells`] or does not fit in memory at all.
    pub fn allocate(&self, bounds: &BoundingBox) -> Result<Grid, GridError> {
        let too_large = |requested| GridError::GridTooLarge {
            width: bounds.width(),
            height: bounds.height(),
            requested,
            limit: self.config.max_cells,
        };
        let cells = bounds.cell_count().ok_or_else(|| too_large(None))?;
        if cells > self.config.max_cells {
            return Err(too_large(Some(cells)));
        }
        let (w, h) = (bounds.width() as usize, bounds.height() as usize);
        debug!(w, h, cells, "allocating grid");
        Ok(Grid::zeroed(*bounds, w, h))
    }

    /// Scatter one point onto `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfRange`] if the point's footprint is
    /// not inside `grid`; the grid is left unchanged.
    pub fn scatter(&self, grid: &mut Grid, point: &Point) -> Result<(), GridError> {
        grid.scatter(&self.kernel, point, self.config.rounding)
    }

    /// Scatter every point onto `grid`.
    ///
    /// All footprints are checked before the first write, so on error the
    /// grid is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfRange`] for the first point whose
    /// footprint falls outside `grid`, and [`GridError::GridTooLarge`] if
    /// the partition grids would not fit in the cell ceiling.
    pub fn scatter_all(&self, grid: &mut Grid, points: &[Point]) -> Result<(), GridError> {
        let radius = self.kernel.radius();
        for p in points {
            let home = p.home_cell(self.config.rounding);
            if !grid.bounds().contains_footprint(home, radius) {
                return Err(GridError::IndexOutOfRange {
                    point: *p,
                    cell: home,
                    bounds: *grid.bounds(),
                });
            }
        }

        let partitions = self.config.threads.min(points.len()).max(1);
        if partitions == 1 {
            for p in points {
                self.scatter(grid, p)?;
            }
            return Ok(());
        }
        self.check_partition_budget(grid.bounds(), partitions)?;

        let chunk_len = points.len().div_ceil(partitions);
        let bounds = *grid.bounds();
        let (w, h) = (grid.width(), grid.height());
        debug!(partitions, chunk_len, "scattering partitions");
        let reduced = points
            .par_chunks(chunk_len)
            .map(|chunk| -> Result<Grid, GridError> {
                let mut local = Grid::zeroed(bounds, w, h);
                for p in chunk {
                    self.scatter(&mut local, p)?;
                }
                Ok(local)
            })
            .try_reduce_with(|mut acc: Grid, part: Grid| {
                let merged = acc.merge(&part);
                debug_assert!(merged, "partial grid bounds diverged");
                Ok(acc)
            });
        if let Some(partial) = reduced {
            let merged = grid.merge(&partial?);
            debug_assert!(merged, "partial grid bounds diverged");
        }
        Ok(())
    }

    /// Reject a partitioned scatter whose live grids exceed `max_cells`.
    ///
    /// Partitioning keeps one private grid per partition alive next to the
    /// result grid.
    fn check_partition_budget(
        &self,
        bounds: &BoundingBox,
        partitions: usize,
    ) -> Result<(), GridError> {
        let live = bounds
            .cell_count()
            .and_then(|cells| cells.checked_mul(partitions + 1));
        match live {
            Some(n) if n <= self.config.max_cells => Ok(()),
            requested => Err(GridError::GridTooLarge {
                width: bounds.width(),
                height: bounds.height(),
                requested,
                limit: self.config.max_cells,
            }),
        }
    }

    /// Run the full pass: bounds, allocate, scatter every point.
    ///
    /// # Errors
    ///
    /// Propagates [`GridError::EmptyInput`] and [`GridError::GridTooLarge`].
    pub fn accumulate(&self, points: &[Point]) -> Result<Grid, GridError> {
        let bounds = self.compute_bounds(points)?;
        let mut grid = self.allocate(&bounds)?;
        self.scatter_all(&mut grid, points)?;
        info!(
            points = points.len(),
            width = grid.width(),
            height = grid.height(),
            threads = self.config.threads,
            "accumulated grid"
        );
        Ok(grid)
    }
}
