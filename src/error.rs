//! Error types for a comparison run

use std::fmt;

use thiserror::Error;

/// Which of the two input tables an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSide {
    A,
    B,
}

impl fmt::Display for TableSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSide::A => write!(f, "table A"),
            TableSide::B => write!(f, "table B"),
        }
    }
}

/// Everything that can go wrong between reading the inputs and writing
/// the report artifacts.
///
/// Validation errors (`MissingInput`, `ShapeMismatch`, `HeaderMismatch`)
/// carry a complete human-readable account of the problem; callers are
/// expected to show them verbatim rather than inspect fields.
#[derive(Debug, Error)]
pub enum CompareError {
    /// A table parsed successfully but holds no data rows.
    #[error("missing input: {0}")]
    MissingInput(String),

    /// Row or column counts differ between the two tables.
    #[error("shape mismatch: table A is {rows_a}x{cols_a}, table B is {rows_b}x{cols_b}")]
    ShapeMismatch {
        rows_a: usize,
        cols_a: usize,
        rows_b: usize,
        cols_b: usize,
    },

    /// Headers are incompatible for the selected key mode.
    #[error("header mismatch: {0}")]
    HeaderMismatch(String),

    /// Input could not be read as a delimited table.
    #[error("parse error: {0}")]
    Parse(String),

    /// A key value occurred on more than one row of a single table.
    #[error("duplicate key '{key}' in {table}")]
    DuplicateKey { table: TableSide, key: String },

    /// A key resolved to zero or several rows in the other table.
    #[error("key '{key}' matched {found} row(s) in the other table, expected exactly one")]
    AmbiguousKey { key: String, found: usize },

    /// The comparison outcome and the assembled report disagree.
    #[error("inconsistent report: {0}")]
    ReportInternal(String),

    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
