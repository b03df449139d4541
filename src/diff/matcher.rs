//! Key extraction and row lookup

use indexmap::IndexMap;

use crate::error::{CompareError, TableSide};
use crate::model::{CellValue, Table};

/// Outcome of resolving one key against a table.
#[derive(Debug, PartialEq)]
pub enum RowLookup<'t> {
    /// The key identifies exactly one row
    ExactlyOne(&'t [CellValue]),
    /// The key is absent from the table
    None,
    /// The key occurs on more than one row
    Multiple(Vec<&'t [CellValue]>),
}

/// Key for a row: the identifier cell in keyed mode, the 1-based row
/// position as a number otherwise.
pub fn row_key(row: &[CellValue], index: usize, key_column: Option<usize>) -> CellValue {
    match key_column {
        Some(col) => row.get(col).cloned().unwrap_or(CellValue::Missing),
        None => CellValue::Number((index + 1) as f64),
    }
}

/// Index from key value to the rows bearing it, in first-appearance
/// order.
pub struct KeyIndex<'t> {
    table: &'t Table,
    entries: IndexMap<CellValue, Vec<usize>>,
}

impl<'t> KeyIndex<'t> {
    /// Build the index over all rows of `table`.
    pub fn build(table: &'t Table, key_column: Option<usize>) -> Self {
        let mut entries: IndexMap<CellValue, Vec<usize>> = IndexMap::new();
        for (index, row) in table.rows.iter().enumerate() {
            let key = row_key(row, index, key_column);
            entries.entry(key).or_default().push(index);
        }
        Self { table, entries }
    }

    /// Fail if any key occurs on more than one row.
    pub fn ensure_unique(&self, side: TableSide) -> Result<(), CompareError> {
        for (key, positions) in &self.entries {
            if positions.len() > 1 {
                return Err(CompareError::DuplicateKey {
                    table: side,
                    key: key.display().into_owned(),
                });
            }
        }
        Ok(())
    }

    /// Resolve a key to the row(s) carrying it.
    pub fn lookup(&self, key: &CellValue) -> RowLookup<'t> {
        match self.entries.get(key) {
            None => RowLookup::None,
            Some(positions) if positions.len() == 1 => {
                RowLookup::ExactlyOne(&self.table.rows[positions[0]])
            }
            Some(positions) => RowLookup::Multiple(
                positions
                    .iter()
                    .map(|&i| self.table.rows[i].as_slice())
                    .collect(),
            ),
        }
    }
}
