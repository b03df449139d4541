//! Matching engine for comparing two tables row by row

mod matcher;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::KeyMode;
use crate::error::{CompareError, TableSide};
use crate::model::{CellValue, Table};

pub use matcher::{row_key, KeyIndex, RowLookup};

/// The two differing values of one field of one key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDiff {
    /// Value in table A
    pub value_a: CellValue,
    /// Value in table B
    pub value_b: CellValue,
}

/// Classification of one key's row pair
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// Every compared field is equal
    Matched,
    /// At least one field differs; diffs keyed by column name in
    /// table-A column order
    NonMatched(IndexMap<String, FieldDiff>),
}

/// Statistics about a comparison run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub rows_matched: usize,
    pub rows_non_matched: usize,
    pub fields_differing: usize,
    pub row_count: usize,
}

/// Result of comparing two tables
#[derive(Debug, Default, PartialEq)]
pub struct MatchReport {
    /// Keys whose rows agree on every field, in table-A row order
    pub matched: Vec<CellValue>,
    /// Keys with at least one differing field, in table-A row order
    pub non_matched: Vec<CellValue>,
    /// Field diffs per non-matched key
    pub field_diffs: IndexMap<CellValue, IndexMap<String, FieldDiff>>,
    /// Statistics
    pub stats: MatchStats,
}

impl MatchReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any row pair disagreed
    pub fn has_differences(&self) -> bool {
        !self.non_matched.is_empty()
    }
}

/// Main matching engine.
///
/// Construction resolves every compared column on both sides, so
/// column order may differ between the tables; comparison is by name.
pub struct MatchEngine<'t> {
    table_a: &'t Table,
    table_b: &'t Table,
    key_a: Option<usize>,
    key_b: Option<usize>,
    columns: Vec<ComparedColumn>,
}

/// One column compared across the pair, with its index on each side
struct ComparedColumn {
    name: String,
    index_a: usize,
    index_b: usize,
}

impl<'t> MatchEngine<'t> {
    /// Create an engine for a validated table pair.
    pub fn new(
        table_a: &'t Table,
        table_b: &'t Table,
        mode: &KeyMode,
    ) -> Result<Self, CompareError> {
        let (key_a, key_b) = match mode {
            KeyMode::Keyed(name) => {
                let key_a = table_a.column_index(name).ok_or_else(|| {
                    CompareError::HeaderMismatch(format!(
                        "key column '{name}' not found in table A"
                    ))
                })?;
                let key_b = table_b.column_index(name).ok_or_else(|| {
                    CompareError::HeaderMismatch(format!(
                        "key column '{name}' not found in table B"
                    ))
                })?;
                (Some(key_a), Some(key_b))
            }
            KeyMode::Positional => (None, None),
        };

        // The key column itself is never a compared field.
        let mut columns = Vec::new();
        for (index_a, name) in table_a.headers.iter().enumerate() {
            if Some(index_a) == key_a {
                continue;
            }
            let index_b = table_b.column_index(name).ok_or_else(|| {
                CompareError::HeaderMismatch(format!("column '{name}' not found in table B"))
            })?;
            columns.push(ComparedColumn {
                name: name.clone(),
                index_a,
                index_b,
            });
        }

        Ok(Self {
            table_a,
            table_b,
            key_a,
            key_b,
            columns,
        })
    }

    /// Compare the pair, walking table A's rows in order.
    ///
    /// Fails before any matching when a key repeats within either
    /// table, and on the first key that does not resolve to exactly
    /// one row of table B.
    pub fn compare(&self) -> Result<MatchReport, CompareError> {
        let index_a = KeyIndex::build(self.table_a, self.key_a);
        let index_b = KeyIndex::build(self.table_b, self.key_b);
        index_a.ensure_unique(TableSide::A)?;
        index_b.ensure_unique(TableSide::B)?;

        let mut report = MatchReport::new();
        report.stats.row_count = self.table_a.row_count();

        for (index, row_a) in self.table_a.rows.iter().enumerate() {
            let key = row_key(row_a, index, self.key_a);
            let row_b = match index_b.lookup(&key) {
                RowLookup::ExactlyOne(row_b) => row_b,
                RowLookup::None => {
                    return Err(CompareError::AmbiguousKey {
                        key: key.display().into_owned(),
                        found: 0,
                    });
                }
                RowLookup::Multiple(rows) => {
                    return Err(CompareError::AmbiguousKey {
                        key: key.display().into_owned(),
                        found: rows.len(),
                    });
                }
            };

            match self.classify(row_a, row_b) {
                MatchOutcome::Matched => {
                    debug!("key {}: rows match", key.display());
                    report.stats.rows_matched += 1;
                    report.matched.push(key);
                }
                MatchOutcome::NonMatched(diffs) => {
                    debug!("key {}: {} field(s) differ", key.display(), diffs.len());
                    report.stats.rows_non_matched += 1;
                    report.stats.fields_differing += diffs.len();
                    report.non_matched.push(key.clone());
                    report.field_diffs.insert(key, diffs);
                }
            }
        }

        Ok(report)
    }

    /// Compare one row pair field by field.
    pub fn classify(&self, row_a: &[CellValue], row_b: &[CellValue]) -> MatchOutcome {
        let mut diffs = IndexMap::new();
        for column in &self.columns {
            let value_a = row_a
                .get(column.index_a)
                .cloned()
                .unwrap_or(CellValue::Missing);
            let value_b = row_b
                .get(column.index_b)
                .cloned()
                .unwrap_or(CellValue::Missing);
            if value_a != value_b {
                diffs.insert(column.name.clone(), FieldDiff { value_a, value_b });
            }
        }
        if diffs.is_empty() {
            MatchOutcome::Matched
        } else {
            MatchOutcome::NonMatched(diffs)
        }
    }
}

/// Convenience function to compare two tables
pub fn compare_tables(
    table_a: &Table,
    table_b: &Table,
    mode: &KeyMode,
) -> Result<MatchReport, CompareError> {
    let engine = MatchEngine::new(table_a, table_b, mode)?;
    engine.compare()
}
