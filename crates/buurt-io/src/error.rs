//! Error types for reading and writing.

use std::fmt;
use std::io;

/// Errors from parsing the input table.
#[derive(Debug)]
pub enum ReadError {
    /// An I/O error occurred while reading.
    Io(io::Error),
    /// The input has no header line.
    MissingHeader,
    /// A column the schema requires is absent from the header.
    MissingColumn {
        /// Header name of the missing column.
        column: &'static str,
    },
    /// A row has too few fields to reach a required column.
    ShortRow {
        /// 1-based line number.
        line: usize,
        /// Number of header columns.
        expected: usize,
        /// Number of fields found on the line.
        found: usize,
    },
    /// A required field is empty.
    MissingValue {
        /// 1-based line number.
        line: usize,
        /// Header name of the column.
        column: &'static str,
    },
    /// A numeric field could not be parsed.
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// Header name of the column.
        column: &'static str,
        /// The raw field text.
        value: String,
    },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MissingHeader => write!(f, "input has no header line"),
            Self::MissingColumn { column } => write!(f, "missing required column '{column}'"),
            Self::ShortRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {line}: expected {expected} fields, found {found}"
            ),
            Self::MissingValue { line, column } => {
                write!(f, "line {line}: empty value for required column '{column}'")
            }
            Self::InvalidNumber {
                line,
                column,
                value,
            } => write!(f, "line {line}: column '{column}' is not a number: {value:?}"),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReadError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Errors from writing a grid.
#[derive(Debug)]
pub enum WriteError {
    /// An I/O error occurred while writing.
    Io(io::Error),
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for WriteError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
