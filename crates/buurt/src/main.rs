//! buurt CLI.
//!
//! Converts a `;`-separated table of food outlets (RD New coordinates plus
//! scores) into a 100 m raster of neighbourhood impact.
//!
//! ```text
//! buurt <tabel.csv> <output.csv> [--score-column impact-factor] [--decimal comma]
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use buurt::{convert, ConvertOptions};
use buurt_core::CellRounding;
use buurt_grid::AccumulatorConfig;
use buurt_io::{DecimalSeparator, OutputFormat, ScoreColumn};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "buurt")]
#[command(version)]
#[command(about = "Convert food-outlet locations into a neighbourhood impact raster")]
struct Cli {
    /// Input table (`;`-separated, header on the first line)
    input: PathBuf,

    /// Output raster file
    output: PathBuf,

    /// Column used as the point score
    #[arg(long, value_enum, default_value_t = ScoreArg::ImpactFactor)]
    score_column: ScoreArg,

    /// Decimal separator for scores in the output
    #[arg(long, value_enum, default_value_t = DecimalArg::Comma)]
    decimal: DecimalArg,

    /// Kernel weights by rounded distance 0..=5 (comma-separated)
    #[arg(long, value_delimiter = ',', default_value = "1,0.7,0.3,0,0,0")]
    weights: Vec<f64>,

    /// Rounding rule for a point's home cell
    #[arg(long, value_enum, default_value_t = RoundingArg::HalfUp)]
    rounding: RoundingArg,

    /// Refuse grids with more cells than this
    #[arg(long, default_value_t = AccumulatorConfig::DEFAULT_MAX_CELLS)]
    max_cells: usize,

    /// Scatter partitions (1 = sequential); each holds a grid within --max-cells
    #[arg(long, default_value_t = AccumulatorConfig::DEFAULT_THREADS)]
    threads: usize,

    /// Omit cells whose absolute score is below this
    #[arg(long, default_value_t = OutputFormat::DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScoreArg {
    ImpactFactor,
    ScoreMaartje,
    M2Score,
}

impl From<ScoreArg> for ScoreColumn {
    fn from(arg: ScoreArg) -> Self {
        match arg {
            ScoreArg::ImpactFactor => ScoreColumn::ImpactFactor,
            ScoreArg::ScoreMaartje => ScoreColumn::ScoreMaartje,
            ScoreArg::M2Score => ScoreColumn::M2Score,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DecimalArg {
    Comma,
    Period,
}

impl From<DecimalArg> for DecimalSeparator {
    fn from(arg: DecimalArg) -> Self {
        match arg {
            DecimalArg::Comma => DecimalSeparator::Comma,
            DecimalArg::Period => DecimalSeparator::Period,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RoundingArg {
    HalfUp,
    HalfEven,
}

impl From<RoundingArg> for CellRounding {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::HalfUp => CellRounding::HalfUp,
            RoundingArg::HalfEven => CellRounding::HalfEven,
        }
    }
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            score_column: self.score_column.into(),
            weights: self.weights.clone(),
            accumulator: AccumulatorConfig {
                max_cells: self.max_cells,
                rounding: self.rounding.into(),
                threads: self.threads,
            },
            format: OutputFormat {
                decimal_separator: self.decimal.into(),
                threshold: self.threshold,
                ..Default::default()
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let summary = convert(&cli.input, &cli.output, &cli.options()).with_context(|| {
        format!(
            "converting {} to {}",
            cli.input.display(),
            cli.output.display()
        )
    })?;

    info!(
        records = summary.records,
        width = summary.bounds.width(),
        height = summary.bounds.height(),
        cells = summary.written.cells_visited,
        lines = summary.written.lines_written,
        output = %cli.output.display(),
        "done"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_map_to_reference_options() {
        let cli = Cli::parse_from(["buurt", "in.csv", "out.csv"]);
        assert_eq!(cli.options(), ConvertOptions::default());
    }

    #[test]
    fn flags_map_to_options() {
        let cli = Cli::parse_from([
            "buurt",
            "in.csv",
            "out.csv",
            "--score-column",
            "m2-score",
            "--decimal",
            "period",
            "--weights",
            "1,0.5,0.25,0.1,0,0",
            "--rounding",
            "half-even",
            "--threads",
            "4",
            "--max-cells",
            "1000",
            "--threshold",
            "0.5",
        ]);
        let o = cli.options();
        assert_eq!(o.score_column, ScoreColumn::M2Score);
        assert_eq!(o.format.decimal_separator, DecimalSeparator::Period);
        assert_eq!(o.format.threshold, 0.5);
        assert_eq!(o.weights, vec![1.0, 0.5, 0.25, 0.1, 0.0, 0.0]);
        assert_eq!(o.accumulator.rounding, CellRounding::HalfEven);
        assert_eq!(o.accumulator.threads, 4);
        assert_eq!(o.accumulator.max_cells, 1000);
    }
}
