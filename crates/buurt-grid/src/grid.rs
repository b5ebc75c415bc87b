//! Dense result grid.

use buurt_core::{BoundingBox, CellCoord, CellRounding, GridError, Point};

use crate::kernel::Kernel;

/// Zero-initialised 2D grid of accumulated scores, stored row-major.
///
/// Row `r` holds cells with `y = bounds.bottom + r`; column `c` holds
/// `x = bounds.left + c`. The grid never changes size after allocation.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    bounds: BoundingBox,
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Grid {
    /// Allocate a zeroed grid covering `bounds`.
    ///
    /// No size ceiling is applied here; use
    /// [`GridAccumulator::allocate`](crate::GridAccumulator::allocate) for
    /// the checked path.
    pub(crate) fn zeroed(bounds: BoundingBox, width: usize, height: usize) -> Self {
        Self {
            bounds,
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Bounds this grid was allocated for.
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// X offset of column 0, in cell units.
    pub fn left(&self) -> i64 {
        self.bounds.left
    }

    /// Y offset of row 0, in cell units.
    pub fn bottom(&self) -> i64 {
        self.bounds.bottom
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Value at `(row, col)`, or `None` if out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.data[row * self.width + col])
    }

    /// Value at a cell given in cell units, or `None` if outside the grid.
    pub fn at_cell(&self, cell: CellCoord) -> Option<f64> {
        let (row, col) = self.bounds.grid_index(cell)?;
        self.get(row, col)
    }

    /// Iterate rows from `bottom` upward.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.width)
    }

    /// All values, row-major.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Sum of all cells.
    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Scatter-add one point: `grid[home + (dx, dy)] += weight * score`
    /// for every non-zero kernel tap.
    ///
    /// The whole footprint is checked before anything is written, so a
    /// rejected point leaves the grid untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfRange`] if any footprint cell falls
    /// outside the grid.
    pub fn scatter(
        &mut self,
        kernel: &Kernel,
        point: &Point,
        rounding: CellRounding,
    ) -> Result<(), GridError> {
        let home = point.home_cell(rounding);
        if !self.bounds.contains_footprint(home, kernel.radius()) {
            return Err(GridError::IndexOutOfRange {
                point: *point,
                cell: home,
                bounds: self.bounds,
            });
        }
        let grid_x = (home.x - self.bounds.left) as usize;
        let grid_y = (home.y - self.bounds.bottom) as usize;
        for tap in kernel.taps() {
            let row = grid_y.wrapping_add_signed(tap.dy as isize);
            let col = grid_x.wrapping_add_signed(tap.dx as isize);
            self.data[row * self.width + col] += tap.weight * point.score;
        }
        Ok(())
    }

    /// Add `other` into this grid cell by cell.
    ///
    /// Returns `false` (and leaves `self` unchanged) if the bounds differ.
    pub fn merge(&mut self, other: &Grid) -> bool {
        if self.bounds != other.bounds {
            return false;
        }
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a += b;
        }
        true
    }
}
