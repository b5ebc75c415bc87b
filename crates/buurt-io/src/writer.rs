//! Sparse text writer for accumulated grids.
//!
//! Output is a header line followed by one `E{x:04}N{y:04};{score}` line
//! per cell whose absolute value reaches [`OutputFormat::threshold`].
//! `x` and `y` are cell-unit coordinates (grid index plus the grid's
//! `left` / `bottom` offset); rows are written bottom to top, each row left
//! to right. The score has two decimals and uses the configured
//! [`DecimalSeparator`]. It is rounded half away from zero on the shortest
//! decimal form of the value, so `0.125` prints as `0,13` just like the
//! legacy converter, where plain `{:.2}` would print `0,12`.

use std::io::Write;

use buurt_grid::Grid;
use tracing::info;

use crate::error::WriteError;

/// Decimal separator used when printing scores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecimalSeparator {
    /// `12,34`: byte-compatible with the legacy consumers.
    #[default]
    Comma,
    /// `12.34`.
    Period,
}

impl DecimalSeparator {
    /// The separator character.
    pub fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Period => '.',
        }
    }
}

/// Output formatting parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputFormat {
    /// Decimal separator for scores. Default: [`DecimalSeparator::Comma`].
    pub decimal_separator: DecimalSeparator,
    /// Inclusive lower cutoff on `|value|`; smaller cells are omitted.
    /// Default: `0.001`.
    pub threshold: f64,
    /// First line of the file. Default: `C28992R100;score`.
    pub header: String,
}

impl OutputFormat {
    /// Default sparsity cutoff.
    pub const DEFAULT_THRESHOLD: f64 = 0.001;

    /// Default header: RD New (EPSG:28992) at 100 m resolution.
    pub const DEFAULT_HEADER: &'static str = "C28992R100;score";

    /// Whether a cell with `value` is written.
    pub fn includes(&self, value: f64) -> bool {
        value.abs() >= self.threshold
    }

    /// Format a score with two decimals and the configured separator.
    pub fn format_score(&self, value: f64) -> String {
        round_half_up(value, SCORE_DECIMALS, self.decimal_separator.as_char())
    }

    /// Key for the cell at `(x, y)` in cell units.
    pub fn cell_key(x: i64, y: i64) -> String {
        format!("E{x:04}N{y:04}")
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self {
            decimal_separator: DecimalSeparator::default(),
            threshold: Self::DEFAULT_THRESHOLD,
            header: Self::DEFAULT_HEADER.to_string(),
        }
    }
}

const SCORE_DECIMALS: usize = 2;

/// Round the shortest decimal form of `value` to `decimals` places, ties
/// away from zero.
fn round_half_up(value: f64, decimals: usize, separator: char) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(decimals))
        .collect();
    if frac_part.as_bytes().get(decimals).is_some_and(|&d| d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|&d| char::from(d)));
    if decimals > 0 {
        out.push(separator);
        out.extend(digits[split..].iter().map(|&d| char::from(d)));
    }
    out
}

/// Counts reported after writing a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Cells inspected.
    pub cells_visited: usize,
    /// Cell lines written (excluding the header).
    pub lines_written: usize,
}

/// Writes grids to any `Write` sink.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production code
/// can use `BufWriter<File>`.
///
/// ```
/// use buurt_core::Point;
/// use buurt_grid::{AccumulatorConfig, GridAccumulator, Kernel};
/// use buurt_io::{GridWriter, OutputFormat};
///
/// let acc = GridAccumulator::new(Kernel::default(), AccumulatorConfig::default()).unwrap();
/// let grid = acc.accumulate(&[Point::new(500, 500, 10.0)]).unwrap();
///
/// let mut writer = GridWriter::new(Vec::new(), OutputFormat::default());
/// let summary = writer.write_grid(&grid).unwrap();
/// assert_eq!(summary.lines_written, 21);
/// let text = String::from_utf8(writer.into_inner()).unwrap();
/// assert!(text.starts_with("C28992R100;score\n"));
/// assert!(text.contains("E0005N0005;10,00\n"));
/// ```
pub struct GridWriter<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> GridWriter<W> {
    /// Create a writer with the given format.
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    /// Write the header and every included cell of `grid`, then flush.
    pub fn write_grid(&mut self, grid: &Grid) -> Result<WriteSummary, WriteError> {
        writeln!(self.writer, "{}", self.format.header)?;
        let mut summary = WriteSummary::default();
        for (row, values) in grid.rows().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                summary.cells_visited += 1;
                if !self.format.includes(value) {
                    continue;
                }
                let cell = grid.bounds().cell_at(row, col);
                writeln!(
                    self.writer,
                    "{};{}",
                    OutputFormat::cell_key(cell.x, cell.y),
                    self.format.format_score(value)
                )?;
                summary.lines_written += 1;
            }
        }
        self.writer.flush()?;
        info!(
            cells = summary.cells_visited,
            lines = summary.lines_written,
            "wrote grid"
        );
        Ok(summary)
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
