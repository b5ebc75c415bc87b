//! Reader for the `;`-separated outlet table.
//!
//! Format rules:
//!
//! - the first line is the header; every later non-blank line is a row;
//! - fields are separated by `;`, whitespace around separators is ignored;
//! - U+FEFF byte-order marks are dropped wherever they appear;
//! - a field wrapped in double quotes is unquoted, with `""` read as `"`;
//! - numeric fields accept `,` as the decimal separator.
//!
//! Separators inside quoted fields are not supported.

use std::io::BufRead;

use buurt_core::Point;
use tracing::{debug, info, warn};

use crate::error::ReadError;
use crate::schema::{Column, FoodOutlet, HeaderMap, ScoreColumn};

/// Coordinates beyond this magnitude are rejected as malformed.
pub const MAX_COORDINATE: i64 = 1_000_000_000_000;

/// Split one line into cleaned fields.
pub fn split_fields(line: &str) -> Vec<String> {
    line.trim()
        .split(';')
        .map(|part| {
            let part: String = part.chars().filter(|&c| c != '\u{feff}').collect();
            let part = part.trim();
            match part
                .strip_prefix('"')
                .and_then(|inner| inner.strip_suffix('"'))
            {
                Some(inner) => inner.replace("\"\"", "\""),
                None => part.to_string(),
            }
        })
        .collect()
}

struct RowParser<'a> {
    map: &'a HeaderMap,
    fields: Vec<String>,
    line: usize,
}

impl RowParser<'_> {
    fn optional(&self, column: Column) -> Option<&str> {
        let i = self.map.position(column)?;
        self.fields
            .get(i)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    fn required(&self, column: Column) -> Result<&str, ReadError> {
        let i = self
            .map
            .position(column)
            .ok_or(ReadError::MissingColumn {
                column: column.header(),
            })?;
        let raw = self.fields.get(i).ok_or(ReadError::ShortRow {
            line: self.line,
            expected: self.map.width(),
            found: self.fields.len(),
        })?;
        if raw.is_empty() {
            return Err(ReadError::MissingValue {
                line: self.line,
                column: column.header(),
            });
        }
        Ok(raw.as_str())
    }

    fn real(&self, column: Column, raw: &str) -> Result<f64, ReadError> {
        raw.replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.invalid(column, raw))
    }

    fn integer(&self, column: Column, raw: &str) -> Result<i64, ReadError> {
        let v = match raw.parse::<i64>() {
            Ok(v) => v,
            Err(_) => {
                let f = self.real(column, raw)?;
                if f.abs() > MAX_COORDINATE as f64 {
                    return Err(self.invalid(column, raw));
                }
                f.round() as i64
            }
        };
        Ok(v)
    }

    fn coordinate(&self, column: Column) -> Result<i64, ReadError> {
        let raw = self.required(column)?;
        let v = self.integer(column, raw)?;
        if v.abs() > MAX_COORDINATE {
            return Err(self.invalid(column, raw));
        }
        Ok(v)
    }

    fn optional_real(&self, column: Column) -> Result<Option<f64>, ReadError> {
        self.optional(column)
            .map(|raw| self.real(column, raw))
            .transpose()
    }

    fn invalid(&self, column: Column, raw: &str) -> ReadError {
        ReadError::InvalidNumber {
            line: self.line,
            column: column.header(),
            value: raw.to_string(),
        }
    }

    fn outlet(&self, score: ScoreColumn) -> Result<FoodOutlet, ReadError> {
        let score_column = score.column();
        self.real(score_column, self.required(score_column)?)?;
        Ok(FoodOutlet {
            name: self.optional(Column::Name).map(str::to_string),
            x: self.coordinate(Column::X)?,
            y: self.coordinate(Column::Y)?,
            floor_area: self
                .optional(Column::FloorArea)
                .map(|raw| self.integer(Column::FloorArea, raw))
                .transpose()?,
            score_maartje: self.optional_real(Column::ScoreMaartje)?,
            m2_score: self.optional_real(Column::M2Score)?,
            impact_factor: self.optional_real(Column::ImpactFactor)?,
        })
    }
}

/// Parse every row of the outlet table.
///
/// `score` names the column that must be present and numeric on every row.
///
/// # Errors
///
/// Returns [`ReadError::MissingHeader`] on empty input,
/// [`ReadError::MissingColumn`] if `XCOORD`, `YCOORD` or the score column
/// is not in the header, and a line-numbered error for the first bad row.
pub fn read_outlets<R: BufRead>(
    input: R,
    score: ScoreColumn,
) -> Result<Vec<FoodOutlet>, ReadError> {
    let mut lines = input.lines();
    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(ReadError::MissingHeader),
    };
    let headers = split_fields(&header);
    if headers.iter().all(|h| h.is_empty()) {
        return Err(ReadError::MissingHeader);
    }
    let map = HeaderMap::from_headers(&headers);
    for column in [Column::X, Column::Y, score.column()] {
        if map.position(column).is_none() {
            return Err(ReadError::MissingColumn {
                column: column.header(),
            });
        }
    }
    debug!(columns = map.width(), missing = ?map.missing(), "bound header");

    let mut outlets = Vec::new();
    let mut blank = 0usize;
    for (i, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            blank += 1;
            continue;
        }
        let row = RowParser {
            map: &map,
            fields: split_fields(&line),
            line: i + 2,
        };
        outlets.push(row.outlet(score)?);
    }
    if blank > 0 {
        warn!(blank, "skipped blank lines");
    }
    info!(records = outlets.len(), "read outlet table");
    Ok(outlets)
}

/// Parse the outlet table straight into points scored by `score`.
///
/// # Errors
///
/// Same as [`read_outlets`].
pub fn read_points<R: BufRead>(input: R, score: ScoreColumn) -> Result<Vec<Point>, ReadError> {
    let outlets = read_outlets(input, score)?;
    Ok(outlets
        .iter()
        .filter_map(|o| o.to_point(score))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use buurt_test_utils::SAMPLE_CSV;
    use proptest::prelude::*;

    fn read(text: &str) -> Result<Vec<FoodOutlet>, ReadError> {
        read_outlets(text.as_bytes(), ScoreColumn::ImpactFactor)
    }

    #[test]
    fn split_trims_and_unquotes() {
        assert_eq!(
            split_fields(" a ; \"b\"\"c\"\" \" ;c;; "),
            vec!["a", "b\"c\" ", "c", "", ""]
        );
    }

    #[test]
    fn split_drops_bom() {
        assert_eq!(split_fields("\u{feff}XCOORD;Y\u{feff}"), vec!["XCOORD", "Y"]);
    }

    #[test]
    fn reads_sample_table() {
        let outlets = read(SAMPLE_CSV).unwrap();
        assert_eq!(outlets.len(), 3);

        let first = &outlets[0];
        assert_eq!(first.name.as_deref(), Some("Snackbar \"De Hoek\""));
        assert_eq!((first.x, first.y), (500, 500));
        assert_eq!(first.floor_area, Some(40));
        assert_eq!(first.score_maartje, Some(1.5));
        assert_eq!(first.m2_score, Some(0.25));
        assert_eq!(first.impact_factor, Some(10.0));

        assert_eq!((outlets[1].x, outlets[1].y), (3500, 500));
        assert_eq!(outlets[1].impact_factor, Some(4.0));
        assert_eq!(outlets[2].floor_area, None);
        assert_eq!(outlets[2].impact_factor, Some(0.5));
    }

    #[test]
    fn read_points_uses_selected_column() {
        let points = read_points(SAMPLE_CSV.as_bytes(), ScoreColumn::ScoreMaartje).unwrap();
        let scores: Vec<f64> = points.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![1.5, 2.0, 3.0]);
    }

    #[test]
    fn decimal_coordinates_are_rounded() {
        let outlets = read("XCOORD;YCOORD;impact_factor\n120,6;99.4;1\n").unwrap();
        assert_eq!((outlets[0].x, outlets[0].y), (121, 99));
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(matches!(read(""), Err(ReadError::MissingHeader)));
        assert!(matches!(read("  \n1;2;3\n"), Err(ReadError::MissingHeader)));
    }

    #[test]
    fn header_only_yields_no_rows() {
        assert_eq!(read("XCOORD;YCOORD;impact_factor\n").unwrap(), vec![]);
    }

    #[test]
    fn missing_required_column() {
        match read("XCOORD;impact_factor\n1;2\n") {
            Err(ReadError::MissingColumn { column }) => assert_eq!(column, "YCOORD"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
        match read_outlets("XCOORD;YCOORD;impact_factor\n".as_bytes(), ScoreColumn::M2Score) {
            Err(ReadError::MissingColumn { column }) => assert_eq!(column, "m2_score"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn short_row_reports_line() {
        match read("XCOORD;YCOORD;impact_factor\n1;2;3\n4;5\n") {
            Err(ReadError::ShortRow {
                line,
                expected,
                found,
            }) => assert_eq!((line, expected, found), (3, 3, 2)),
            other => panic!("expected ShortRow, got {other:?}"),
        }
    }

    #[test]
    fn empty_required_value() {
        match read("XCOORD;YCOORD;impact_factor\n1;;3\n") {
            Err(ReadError::MissingValue { line, column }) => {
                assert_eq!((line, column), (2, "YCOORD"))
            }
            other => panic!("expected MissingValue, got {other:?}"),
        }
    }

    #[test]
    fn invalid_numbers() {
        for (text, col) in [
            ("XCOORD;YCOORD;impact_factor\nabc;1;1\n", "XCOORD"),
            ("XCOORD;YCOORD;impact_factor\n1;1;NaN\n", "impact_factor"),
            ("XCOORD;YCOORD;impact_factor\n1;1e30;1\n", "YCOORD"),
            ("XCOORD;YCOORD;impact_factor;m2_score\n1;1;1;x\n", "m2_score"),
        ] {
            match read(text) {
                Err(ReadError::InvalidNumber { line, column, .. }) => {
                    assert_eq!((line, column), (2, col))
                }
                other => panic!("expected InvalidNumber for {text:?}, got {other:?}"),
            }
        }
    }

    proptest! {
        #[test]
        fn split_recovers_padded_fields(
            fields in prop::collection::vec("[A-Za-z0-9_,.]{0,8}", 1..10),
            pad in "[ \t]{0,3}",
        ) {
            let line = fields
                .iter()
                .map(|f| format!("{pad}{f}{pad}"))
                .collect::<Vec<_>>()
                .join(";");
            prop_assert_eq!(split_fields(&line), fields);
        }

        #[test]
        fn coordinates_round_trip(
            x in -MAX_COORDINATE..=MAX_COORDINATE,
            y in -1_000_000i64..1_000_000,
        ) {
            let text = format!("XCOORD;YCOORD;impact_factor\n{x};{y};1\n");
            let outlets = read(&text).unwrap();
            prop_assert_eq!((outlets[0].x, outlets[0].y), (x, y));
        }
    }
}
