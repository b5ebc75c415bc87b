//! buurt: turn geolocated point scores into a smoothed neighbourhood raster.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the buurt sub-crates and wires them into a single file-to-file
//! [`convert`] pass. The `buurt` binary is a thin command-line wrapper
//! around it.
//!
//! # Quick start
//!
//! ```rust
//! use buurt::prelude::*;
//!
//! let table = "XCOORD;YCOORD;impact_factor\n500;500;10\n";
//! let points = read_points(table.as_bytes(), ScoreColumn::ImpactFactor).unwrap();
//!
//! let acc = GridAccumulator::new(Kernel::default(), AccumulatorConfig::default()).unwrap();
//! let grid = acc.accumulate(&points).unwrap();
//!
//! let mut writer = GridWriter::new(Vec::new(), OutputFormat::default());
//! writer.write_grid(&grid).unwrap();
//! let text = String::from_utf8(writer.into_inner()).unwrap();
//! assert!(text.contains("E0005N0005;10,00"));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `buurt-core` | points, cells, bounds, rounding, `GridError` |
//! | [`grid`] | `buurt-grid` | kernel, grid, accumulator |
//! | [`io`] | `buurt-io` | outlet table reader, grid writer |
//! | [`pipeline`] | this crate | [`convert`] and [`ConvertOptions`] |

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod pipeline;

/// Core types (re-export of `buurt-core`).
pub mod types {
    pub use buurt_core::*;
}

/// Kernel and accumulation (re-export of `buurt-grid`).
pub mod grid {
    pub use buurt_grid::*;
}

/// Reading and writing (re-export of `buurt-io`).
pub mod io {
    pub use buurt_io::*;
}

pub use pipeline::{convert, ConvertError, ConvertOptions, ConvertSummary};

/// The types needed for a typical conversion.
pub mod prelude {
    pub use buurt_core::{BoundingBox, CellCoord, CellRounding, GridError, Point};
    pub use buurt_grid::{AccumulatorConfig, Grid, GridAccumulator, Kernel, KernelBuilder};
    pub use buurt_io::{
        read_points, DecimalSeparator, GridWriter, OutputFormat, ScoreColumn,
    };

    pub use crate::pipeline::{convert, ConvertOptions};
}
