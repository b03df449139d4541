//! In-memory table representation

use super::value::CellValue;

/// A parsed delimited table: ordered headers plus data rows.
///
/// Every row holds exactly one cell per header; the parser rejects
/// ragged input, so consumers may index rows by any valid column
/// position.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column names in file order
    pub headers: Vec<String>,
    /// Data rows, each in column order
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Create a table from headers and rows
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { headers, rows }
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}
