//! Explicit column schema for the outlet table.
//!
//! Header names are bound to typed fields once, up front. Coordinate
//! columns and the selected score column are required; every other column
//! is optional and reads as `None` when absent or empty.

use std::fmt;

use buurt_core::Point;

/// Columns known to the schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    /// `ZAAKNAAM`: business name.
    Name,
    /// `XCOORD`: x coordinate, integer.
    X,
    /// `YCOORD`: y coordinate, integer.
    Y,
    /// `WERKOPP`: floor area, integer.
    FloorArea,
    /// `score_maartje`: auxiliary score.
    ScoreMaartje,
    /// `m2_score`: area-normalised score.
    M2Score,
    /// `impact_factor`: neighbourhood impact factor.
    ImpactFactor,
}

impl Column {
    /// Number of schema columns.
    pub const COUNT: usize = 7;

    /// Every column, in header order of the reference table.
    pub const ALL: [Column; Self::COUNT] = [
        Column::Name,
        Column::X,
        Column::Y,
        Column::FloorArea,
        Column::ScoreMaartje,
        Column::M2Score,
        Column::ImpactFactor,
    ];

    /// Header name of the column.
    pub fn header(self) -> &'static str {
        match self {
            Self::Name => "ZAAKNAAM",
            Self::X => "XCOORD",
            Self::Y => "YCOORD",
            Self::FloorArea => "WERKOPP",
            Self::ScoreMaartje => "score_maartje",
            Self::M2Score => "m2_score",
            Self::ImpactFactor => "impact_factor",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Which numeric column becomes [`Point::score`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScoreColumn {
    /// `impact_factor`.
    #[default]
    ImpactFactor,
    /// `score_maartje`.
    ScoreMaartje,
    /// `m2_score`.
    M2Score,
}

impl ScoreColumn {
    /// The schema column backing this score.
    pub fn column(self) -> Column {
        match self {
            Self::ImpactFactor => Column::ImpactFactor,
            Self::ScoreMaartje => Column::ScoreMaartje,
            Self::M2Score => Column::M2Score,
        }
    }
}

/// Header position of each schema column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderMap {
    positions: [Option<usize>; Column::COUNT],
    width: usize,
}

impl HeaderMap {
    /// Bind header names to columns. Unknown header names are ignored.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut positions = [None; Column::COUNT];
        for (i, h) in headers.iter().enumerate() {
            if let Some(slot) = Column::ALL.iter().position(|c| c.header() == h.as_ref()) {
                positions[slot].get_or_insert(i);
            }
        }
        Self {
            positions,
            width: headers.len(),
        }
    }

    /// Position of `column`, if the header has it.
    pub fn position(&self, column: Column) -> Option<usize> {
        let slot = Column::ALL.iter().position(|&c| c == column)?;
        self.positions[slot]
    }

    /// Number of header fields.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Columns of [`Column::ALL`] missing from the header.
    pub fn missing(&self) -> Vec<Column> {
        Column::ALL
            .iter()
            .copied()
            .filter(|&c| self.position(c).is_none())
            .collect()
    }
}

/// One parsed row of the outlet table.
#[derive(Clone, Debug, PartialEq)]
pub struct FoodOutlet {
    /// Business name.
    pub name: Option<String>,
    /// X coordinate.
    pub x: i64,
    /// Y coordinate.
    pub y: i64,
    /// Floor area.
    pub floor_area: Option<i64>,
    /// Auxiliary score.
    pub score_maartje: Option<f64>,
    /// Area-normalised score.
    pub m2_score: Option<f64>,
    /// Neighbourhood impact factor.
    pub impact_factor: Option<f64>,
}

impl FoodOutlet {
    /// Value of the chosen score column.
    pub fn score(&self, column: ScoreColumn) -> Option<f64> {
        match column {
            ScoreColumn::ImpactFactor => self.impact_factor,
            ScoreColumn::ScoreMaartje => self.score_maartje,
            ScoreColumn::M2Score => self.m2_score,
        }
    }

    /// Project onto a [`Point`] using `column` as the score.
    pub fn to_point(&self, column: ScoreColumn) -> Option<Point> {
        Some(Point::new(self.x, self.y, self.score(column)?))
    }
}
