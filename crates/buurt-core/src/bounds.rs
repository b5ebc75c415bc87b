//! Bounding box of a conversion run, in cell units.

use std::fmt;

use crate::error::GridError;
use crate::point::{CellCoord, Point};
use crate::rounding::{ceil_cell, floor_cell};
use crate::BOUNDS_MARGIN;

/// Half-open cell extent `[left, right) x [bottom, top)`.
///
/// Built once from the raw point extent: the minimum edge is snapped down
/// and the maximum edge snapped up to the cell grid, then both are pushed
/// outward by [`BOUNDS_MARGIN`] cells. For every input point the home cell
/// plus the kernel radius therefore lies strictly inside the box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    /// First column (inclusive), cell units.
    pub left: i64,
    /// Last column (exclusive), cell units.
    pub right: i64,
    /// First row (inclusive), cell units.
    pub bottom: i64,
    /// Last row (exclusive), cell units.
    pub top: i64,
}

impl BoundingBox {
    /// Derive the padded box from a raw coordinate extent.
    pub fn from_extent(min_x: i64, max_x: i64, min_y: i64, max_y: i64) -> Self {
        Self {
            left: floor_cell(min_x) - BOUNDS_MARGIN,
            right: ceil_cell(max_x) + BOUNDS_MARGIN,
            bottom: floor_cell(min_y) - BOUNDS_MARGIN,
            top: ceil_cell(max_y) + BOUNDS_MARGIN,
        }
    }

    /// Scan `points` once and derive the padded box around them.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyInput`] if `points` is empty.
    pub fn enclosing(points: &[Point]) -> Result<Self, GridError> {
        let first = points.first().ok_or(GridError::EmptyInput)?;
        let (mut min_x, mut max_x) = (first.x, first.x);
        let (mut min_y, mut max_y) = (first.y, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        Ok(Self::from_extent(min_x, max_x, min_y, max_y))
    }

    /// Number of columns.
    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    /// Number of rows.
    pub fn height(&self) -> i64 {
        self.top - self.bottom
    }

    /// Total cell count, or `None` if it does not fit in `usize`.
    pub fn cell_count(&self) -> Option<usize> {
        let w = usize::try_from(self.width()).ok()?;
        let h = usize::try_from(self.height()).ok()?;
        w.checked_mul(h)
    }

    /// Whether `cell` lies inside the box.
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.x >= self.left && cell.x < self.right && cell.y >= self.bottom && cell.y < self.top
    }

    /// Whether every cell within `radius` of `cell` lies inside the box.
    pub fn contains_footprint(&self, cell: CellCoord, radius: i64) -> bool {
        self.contains(cell.offset(-radius, -radius)) && self.contains(cell.offset(radius, radius))
    }

    /// Map a cell to its `(row, col)` grid index, or `None` if outside.
    pub fn grid_index(&self, cell: CellCoord) -> Option<(usize, usize)> {
        if !self.contains(cell) {
            return None;
        }
        Some(((cell.y - self.bottom) as usize, (cell.x - self.left) as usize))
    }

    /// Map a `(row, col)` grid index back to cell units.
    pub fn cell_at(&self, row: usize, col: usize) -> CellCoord {
        CellCoord {
            x: self.left + col as i64,
            y: self.bottom + row as i64,
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x [{}, {}) y [{}, {})",
            self.left, self.right, self.bottom, self.top
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounding::CellRounding;
    use crate::KERNEL_RADIUS;
    use proptest::prelude::*;

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(BoundingBox::enclosing(&[]), Err(GridError::EmptyInput));
    }

    #[test]
    fn single_point_box_is_non_empty() {
        let b = BoundingBox::enclosing(&[Point::new(500, 500, 1.0)]).unwrap();
        assert_eq!(
            b,
            BoundingBox {
                left: -1,
                right: 11,
                bottom: -1,
                top: 11
            }
        );
        assert!(b.width() > 0);
        assert!(b.height() > 0);
        assert_eq!(b.cell_count(), Some(144));
    }

    #[test]
    fn matches_legacy_snap_for_positive_coords() {
        let pts = [Point::new(121_001, 487_120, 1.0), Point::new(125_999, 490_001, 1.0)];
        let b = BoundingBox::enclosing(&pts).unwrap();
        assert_eq!(b.left, 121_001 / 100 - 6);
        assert_eq!(b.right, (125_999 + 99) / 100 + 6);
        assert_eq!(b.bottom, 487_120 / 100 - 6);
        assert_eq!(b.top, (490_001 + 99) / 100 + 6);
    }

    #[test]
    fn grid_index_round_trip() {
        let b = BoundingBox::from_extent(0, 1000, 0, 500);
        let cell = CellCoord::new(3, 2);
        let (row, col) = b.grid_index(cell).unwrap();
        assert_eq!(b.cell_at(row, col), cell);
        assert_eq!(b.grid_index(CellCoord::new(b.right, 0)), None);
        assert_eq!(b.grid_index(CellCoord::new(0, b.bottom - 1)), None);
    }

    proptest! {
        #[test]
        fn every_footprint_fits(
            coords in prop::collection::vec(
                (-1_000_000i64..1_000_000, -1_000_000i64..1_000_000),
                1..40,
            ),
        ) {
            let points: Vec<Point> = coords.iter().map(|&(x, y)| Point::new(x, y, 1.0)).collect();
            let b = BoundingBox::enclosing(&points).unwrap();
            prop_assert!(b.right > b.left);
            prop_assert!(b.top > b.bottom);
            for rounding in [CellRounding::HalfUp, CellRounding::HalfEven] {
                for p in &points {
                    let home = p.home_cell(rounding);
                    prop_assert!(b.contains_footprint(home, KERNEL_RADIUS));
                    prop_assert!(home.x - KERNEL_RADIUS > b.left);
                    prop_assert!(home.y - KERNEL_RADIUS > b.bottom);
                }
            }
        }
    }
}
