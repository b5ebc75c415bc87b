//! Accumulator configuration parameters.

use std::error::Error;
use std::fmt;

use buurt_core::CellRounding;

/// Configuration for [`GridAccumulator`](crate::GridAccumulator).
///
/// Validated at construction; all values are immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccumulatorConfig {
    /// Maximum number of grid cells a single run may hold at once. With
    /// `threads > 1` this covers the result grid plus one private grid per
    /// partition.
    ///
    /// Default: 50_000_000 (400MB of `f64`).
    pub max_cells: usize,

    /// Rule mapping a point's coordinate to its home cell.
    ///
    /// Default: [`CellRounding::HalfUp`].
    pub rounding: CellRounding,

    /// Number of scatter partitions. `1` runs the plain sequential loop;
    /// larger values scatter disjoint point chunks into private grids on
    /// the rayon pool and sum them afterwards.
    ///
    /// Default: 1.
    pub threads: usize,
}

impl AccumulatorConfig {
    /// Default cell ceiling.
    pub const DEFAULT_MAX_CELLS: usize = 50_000_000;

    /// Default scatter partition count.
    pub const DEFAULT_THREADS: usize = 1;

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cells == 0 {
            return Err(ConfigError::ZeroMaxCells);
        }
        if self.threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        Ok(())
    }
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            max_cells: Self::DEFAULT_MAX_CELLS,
            rounding: CellRounding::default(),
            threads: Self::DEFAULT_THREADS,
        }
    }
}

/// Errors detected by [`AccumulatorConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_cells` is zero, so no grid could ever be allocated.
    ZeroMaxCells,
    /// `threads` is zero.
    ZeroThreads,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxCells => write!(f, "max_cells must be at least 1"),
            Self::ZeroThreads => write!(f, "threads must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = AccumulatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_cells, AccumulatorConfig::DEFAULT_MAX_CELLS);
        assert_eq!(config.threads, 1);
    }

    #[test]
    fn zero_max_cells_rejected() {
        let config = AccumulatorConfig {
            max_cells: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxCells));
    }

    #[test]
    fn zero_threads_rejected() {
        let config = AccumulatorConfig {
            threads: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroThreads));
    }
}
