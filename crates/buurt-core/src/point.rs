//! Input points and grid cell coordinates.

use std::fmt;

use crate::rounding::CellRounding;

/// A geolocated measurement: a planar coordinate plus the score to spread.
///
/// Any `i64` coordinate is accepted; points far apart simply produce a
/// grid that the accumulator refuses as too large.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// X coordinate in coordinate units (e.g. meters).
    pub x: i64,
    /// Y coordinate in coordinate units.
    pub y: i64,
    /// Value distributed onto the grid around this point.
    pub score: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: i64, y: i64, score: f64) -> Self {
        Self { x, y, score }
    }

    /// The cell this point's coordinate rounds to under `rounding`.
    pub fn home_cell(&self, rounding: CellRounding) -> CellCoord {
        CellCoord {
            x: rounding.to_cell(self.x),
            y: rounding.to_cell(self.y),
        }
    }

    /// Return a copy of this point with its score multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            score: self.score * factor,
            ..*self
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) score={}", self.x, self.y, self.score)
    }
}

/// A cell position in cell units (coordinate divided by the cell size).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    /// Column in cell units.
    pub x: i64,
    /// Row in cell units.
    pub y: i64,
}

impl CellCoord {
    /// Create a new cell coordinate.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The cell displaced by `(dx, dy)`.
    pub fn offset(&self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_cell_rounds_each_axis() {
        let p = Point::new(549, 550, 1.0);
        assert_eq!(p.home_cell(CellRounding::HalfUp), CellCoord::new(5, 6));
    }

    #[test]
    fn home_cell_of_extreme_point() {
        let p = Point::new(i64::MIN, i64::MAX, 1.0);
        let cell = p.home_cell(CellRounding::HalfUp);
        assert_eq!(cell, CellCoord::new(i64::MIN / 100, i64::MAX / 100));
    }

    #[test]
    fn scaled_keeps_position() {
        let p = Point::new(120, -40, 2.5).scaled(2.0);
        assert_eq!(p, Point::new(120, -40, 5.0));
    }

    #[test]
    fn offset_moves_both_axes() {
        assert_eq!(CellCoord::new(3, 4).offset(-5, 5), CellCoord::new(-2, 9));
    }
}
