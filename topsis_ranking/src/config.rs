// ********* Input data structures ***********

use snafu::Snafu;
use std::fmt::Display;

/// A single cell of a table, as produced by the readers.
///
/// The readers are responsible for inferring the type of each cell. The
/// validation pass then checks that the identifier column only contains
/// text and that the criteria only contain numbers.
#[derive(PartialEq, Debug, Clone)]
pub enum CellValue {
    Text(String),
    Number(f64),
    /// A missing value.
    Empty,
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{:?}", s),
            CellValue::Number(x) => write!(f, "{}", x),
            CellValue::Empty => write!(f, "an empty cell"),
        }
    }
}

/// A table before any validation: a header and some rows of typed cells.
#[derive(PartialEq, Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// One alternative (one row of the decision matrix).
#[derive(PartialEq, Debug, Clone)]
pub struct Alternative {
    pub name: String,
    /// Invariant: one value per criterion, all finite.
    pub values: Vec<f64>,
}

/// A validated decision table.
#[derive(PartialEq, Debug, Clone)]
pub struct DecisionTable {
    /// The header of the identifier column.
    pub identifier: String,
    /// The headers of the criteria columns, in order.
    pub criteria: Vec<String>,
    pub alternatives: Vec<Alternative>,
}

/// Whether higher or lower values of a criterion are preferred.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Impact {
    /// `+`
    Maximize,
    /// `-`
    Minimize,
}

impl Impact {
    /// Parses the symbol of an impact. Only `+` and `-` are accepted.
    pub fn parse(symbol: &str) -> Option<Impact> {
        match symbol {
            "+" => Some(Impact::Maximize),
            "-" => Some(Impact::Minimize),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Impact::Maximize => "+",
            Impact::Minimize => "-",
        }
    }

    /// The opposite direction.
    pub fn reversed(&self) -> Impact {
        match self {
            Impact::Maximize => Impact::Minimize,
            Impact::Minimize => Impact::Maximize,
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct Criterion {
    pub name: String,
    /// Strictly positive. The weights do not need to sum to 1.
    pub weight: f64,
    pub impact: Impact,
}

// ******** Output data structures *********

#[derive(PartialEq, Debug, Clone)]
pub struct RankedAlternative {
    pub name: String,
    pub values: Vec<f64>,
    /// Relative closeness to the ideal solution, in [0, 1].
    pub score: f64,
    /// 1 is the best rank. Tied scores may share a rank.
    pub rank: u32,
}

#[derive(PartialEq, Debug, Clone)]
pub struct TopsisResult {
    pub identifier: String,
    pub criteria: Vec<Criterion>,
    pub ideal_best: Vec<f64>,
    pub ideal_worst: Vec<f64>,
    /// In the order of the input rows.
    pub alternatives: Vec<RankedAlternative>,
}

// ********* Errors **********

/// The broad family of a ranking error.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ErrorKind {
    Shape,
    Type,
    Cardinality,
    Value,
    NumericDegeneracy,
}

/// Errors that prevent the ranking from completing.
///
/// Rows are numbered from 1, not counting the header.
#[derive(PartialEq, Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TopsisError {
    #[snafu(display(
        "Input must have at least 3 columns (1 for alternative names, 2 or more for numeric criteria), found {columns}"
    ))]
    TooFewColumns { columns: usize },

    #[snafu(display("Row {row} has {found} cells but the header has {expected} columns"))]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[snafu(display("Input does not contain any alternative to rank"))]
    NoAlternatives {},

    #[snafu(display(
        "The first column must contain alternative names as text (e.g. M1, M2), found {value} on row {row}"
    ))]
    IdentifierType { row: usize, value: String },

    #[snafu(display(
        "Columns from the 2nd to the last must contain numeric values, found {value} in column {column:?} on row {row}"
    ))]
    CriterionType {
        column: String,
        row: usize,
        value: String,
    },

    #[snafu(display(
        "Number of weights ({weights}) and impacts ({impacts}) must match the number of numeric criteria ({criteria})"
    ))]
    Cardinality {
        weights: usize,
        impacts: usize,
        criteria: usize,
    },

    #[snafu(display("Impacts must be '+' or '-' only, found {symbol:?} at position {position}"))]
    InvalidImpact { position: usize, symbol: String },

    #[snafu(display("Weights must be positive numbers, found {token:?} at position {position}"))]
    InvalidWeight { position: usize, token: String },

    #[snafu(display("Criterion {column:?} only contains zeros, it cannot be normalized"))]
    ZeroNormColumn { column: String },

    #[snafu(display(
        "Alternative {alternative:?} is both the ideal best and the ideal worst solution, its score is undefined"
    ))]
    IndeterminateScore { alternative: String },
}

impl TopsisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TopsisError::TooFewColumns { .. }
            | TopsisError::RaggedRow { .. }
            | TopsisError::NoAlternatives {} => ErrorKind::Shape,
            TopsisError::IdentifierType { .. } | TopsisError::CriterionType { .. } => {
                ErrorKind::Type
            }
            TopsisError::Cardinality { .. } => ErrorKind::Cardinality,
            TopsisError::InvalidImpact { .. } | TopsisError::InvalidWeight { .. } => {
                ErrorKind::Value
            }
            TopsisError::ZeroNormColumn { .. } | TopsisError::IndeterminateScore { .. } => {
                ErrorKind::NumericDegeneracy
            }
        }
    }
}
