//! File-to-file conversion pass.
//!
//! [`convert`] reads the outlet table, accumulates the grid, and writes it.
//! The grid is fully built before the output is touched, and the output is
//! written to a sibling `.partial` file that is renamed into place only
//! after a successful flush. A failed run never leaves a truncated output.

use std::error::Error;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use buurt_core::{BoundingBox, GridError};
use buurt_grid::{AccumulatorConfig, ConfigError, Grid, GridAccumulator, Kernel};
use buurt_io::{
    read_points, GridWriter, OutputFormat, ReadError, ScoreColumn, WriteError, WriteSummary,
};
use tracing::{debug, info};

/// Everything that parameterises one conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvertOptions {
    /// Input column used as the point score.
    pub score_column: ScoreColumn,
    /// Distance-weight table for the kernel.
    pub weights: Vec<f64>,
    /// Accumulator limits, rounding and parallelism.
    pub accumulator: AccumulatorConfig,
    /// Output formatting.
    pub format: OutputFormat,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            score_column: ScoreColumn::default(),
            weights: buurt_grid::DistanceWeights::REFERENCE.to_vec(),
            accumulator: AccumulatorConfig::default(),
            format: OutputFormat::default(),
        }
    }
}

/// What a successful conversion produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvertSummary {
    /// Points read from the input.
    pub records: usize,
    /// Bounds of the accumulated grid, in cell units.
    pub bounds: BoundingBox,
    /// Writer counts.
    pub written: WriteSummary,
}

/// Errors from [`convert`].
#[derive(Debug)]
pub enum ConvertError {
    /// The input path is not an existing file.
    InputNotFound {
        /// The path given.
        path: PathBuf,
    },
    /// Opening, creating or renaming a file failed.
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The input table could not be parsed.
    Read(ReadError),
    /// The accumulator configuration is invalid.
    Config(ConfigError),
    /// Kernel construction or accumulation failed.
    Grid(GridError),
    /// Writing the grid failed.
    Write(WriteError),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputNotFound { path } => write!(f, "{} is not an input file", path.display()),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Read(e) => write!(f, "reading input: {e}"),
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Grid(e) => write!(f, "accumulating grid: {e}"),
            Self::Write(e) => write!(f, "writing output: {e}"),
        }
    }
}

impl Error for ConvertError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InputNotFound { .. } => None,
            Self::Io { source, .. } => Some(source),
            Self::Read(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Write(e) => Some(e),
        }
    }
}

impl From<ReadError> for ConvertError {
    fn from(e: ReadError) -> Self {
        Self::Read(e)
    }
}

impl From<ConfigError> for ConvertError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GridError> for ConvertError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<WriteError> for ConvertError {
    fn from(e: WriteError) -> Self {
        Self::Write(e)
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> ConvertError + '_ {
    move |source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    output.with_file_name(name)
}

/// Convert the outlet table at `input` into a raster file at `output`.
///
/// Parent directories of `output` are created as needed.
///
/// # Errors
///
/// Returns [`ConvertError`] for a missing input, a malformed table, an
/// invalid kernel or configuration, an empty or oversized grid, or any
/// file-system failure. `output` is left untouched on error.
pub fn convert(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConvertSummary, ConvertError> {
    if !input.is_file() {
        return Err(ConvertError::InputNotFound {
            path: input.to_path_buf(),
        });
    }
    let file = File::open(input).map_err(io_err(input))?;
    let points = read_points(BufReader::new(file), options.score_column)?;
    info!(records = points.len(), input = %input.display(), "records found");

    let kernel = Kernel::builder().weights(&options.weights).build()?;
    let accumulator = GridAccumulator::new(kernel, options.accumulator.clone())?;
    let grid = accumulator.accumulate(&points)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    let partial = partial_path(output);
    debug!(path = %partial.display(), "writing partial output");
    let written = write_partial(&partial, &grid, &options.format).inspect_err(|_| {
        let _ = fs::remove_file(&partial);
    })?;
    fs::rename(&partial, output).map_err(io_err(output))?;

    Ok(ConvertSummary {
        records: points.len(),
        bounds: *grid.bounds(),
        written,
    })
}

fn write_partial(
    path: &Path,
    grid: &Grid,
    format: &OutputFormat,
) -> Result<WriteSummary, ConvertError> {
    let file = File::create(path).map_err(io_err(path))?;
    let mut writer = GridWriter::new(BufWriter::new(file), format.clone());
    Ok(writer.write_grid(grid)?)
}
