//! Mapping of raw coordinates onto grid cells.
//!
//! All divisions here are Euclidean, so negative coordinates snap the same
//! way as positive ones instead of truncating toward zero. Rounding works
//! on quotient and remainder, so every `i64` maps to a cell without
//! overflow.

use crate::CELL_SIZE;

/// Rule used to pick a point's home cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellRounding {
    /// Ties go up: `floor((v + CELL_SIZE / 2) / CELL_SIZE)`.
    #[default]
    HalfUp,
    /// Ties go to the even cell.
    HalfEven,
}

impl CellRounding {
    /// Round a coordinate to the nearest cell index.
    pub fn to_cell(self, v: i64) -> i64 {
        let q = v.div_euclid(CELL_SIZE);
        let r = v.rem_euclid(CELL_SIZE);
        let half = CELL_SIZE / 2;
        let up = match self {
            Self::HalfUp => r >= half,
            Self::HalfEven => r > half || (r == half && q.rem_euclid(2) == 1),
        };
        q + i64::from(up)
    }
}

/// Largest cell index whose lower edge is at or below `v`.
pub fn floor_cell(v: i64) -> i64 {
    v.div_euclid(CELL_SIZE)
}

/// Smallest cell index whose lower edge is at or above `v`.
pub fn ceil_cell(v: i64) -> i64 {
    v.div_euclid(CELL_SIZE) + i64::from(v.rem_euclid(CELL_SIZE) != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn half_up_matches_legacy_for_non_negative() {
        for v in [0i64, 49, 50, 99, 100, 149, 150, 12_345, 487_650] {
            assert_eq!(CellRounding::HalfUp.to_cell(v), (v + 50) / 100);
        }
    }

    #[test]
    fn half_up_negative() {
        assert_eq!(CellRounding::HalfUp.to_cell(-49), 0);
        assert_eq!(CellRounding::HalfUp.to_cell(-50), 0);
        assert_eq!(CellRounding::HalfUp.to_cell(-51), -1);
        assert_eq!(CellRounding::HalfUp.to_cell(-150), -1);
    }

    #[test]
    fn half_even_ties() {
        assert_eq!(CellRounding::HalfEven.to_cell(50), 0);
        assert_eq!(CellRounding::HalfEven.to_cell(150), 2);
        assert_eq!(CellRounding::HalfEven.to_cell(250), 2);
        assert_eq!(CellRounding::HalfEven.to_cell(-50), 0);
        assert_eq!(CellRounding::HalfEven.to_cell(-150), -2);
        assert_eq!(CellRounding::HalfEven.to_cell(151), 2);
        assert_eq!(CellRounding::HalfEven.to_cell(149), 1);
    }

    #[test]
    fn floor_and_ceil() {
        assert_eq!(floor_cell(199), 1);
        assert_eq!(ceil_cell(199), 2);
        assert_eq!(floor_cell(200), 2);
        assert_eq!(ceil_cell(200), 2);
        assert_eq!(floor_cell(-1), -1);
        assert_eq!(ceil_cell(-1), 0);
        assert_eq!(ceil_cell(-100), -1);
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        for rounding in [CellRounding::HalfUp, CellRounding::HalfEven] {
            // MAX ends in ...07 and MIN in ...08, so both round toward zero.
            assert_eq!(rounding.to_cell(i64::MAX), i64::MAX / 100);
            assert_eq!(rounding.to_cell(i64::MIN), i64::MIN / 100);
        }
        assert_eq!(ceil_cell(i64::MAX), i64::MAX / 100 + 1);
        assert_eq!(floor_cell(i64::MIN), i64::MIN / 100 - 1);
    }

    fn arb_rounding() -> impl Strategy<Value = CellRounding> {
        prop_oneof![Just(CellRounding::HalfUp), Just(CellRounding::HalfEven)]
    }

    proptest! {
        #[test]
        fn home_cell_between_floor_and_ceil(
            v in -10_000_000i64..10_000_000,
            rounding in arb_rounding(),
        ) {
            let cell = rounding.to_cell(v);
            prop_assert!(cell >= floor_cell(v));
            prop_assert!(cell <= ceil_cell(v));
        }

        #[test]
        fn home_cell_is_nearest(v in -10_000_000i64..10_000_000, rounding in arb_rounding()) {
            let cell = rounding.to_cell(v);
            prop_assert!((cell * CELL_SIZE - v).abs() <= CELL_SIZE / 2);
        }
    }
}
