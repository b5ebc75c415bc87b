//! Input and output stages for buurt.
//!
//! - [`reader`]: parses the `;`-separated outlet table into [`FoodOutlet`]
//!   records through an explicit [`schema`], then into
//!   [`Point`](buurt_core::Point)s.
//! - [`writer`]: streams a [`Grid`](buurt_grid::Grid) as sparse
//!   `E{x}N{y};{score}` lines, with the decimal separator passed in as
//!   part of the [`OutputFormat`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod reader;
pub mod schema;
pub mod writer;

pub use error::{ReadError, WriteError};
pub use reader::{read_outlets, read_points, split_fields};
pub use schema::{Column, FoodOutlet, HeaderMap, ScoreColumn};
pub use writer::{DecimalSeparator, GridWriter, OutputFormat, WriteSummary};
