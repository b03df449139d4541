//! Review-sheet assembly: row interleaving, ordering, highlights

use crate::config::{Config, KeyMode};
use crate::diff::{row_key, MatchReport};
use crate::error::CompareError;
use crate::model::{CellValue, Table};

/// Annotator and source labels stamped onto report rows
#[derive(Debug, Clone)]
pub struct ReportLabels {
    pub initials_a: String,
    pub source_a: String,
    pub initials_b: String,
    pub source_b: String,
}

impl ReportLabels {
    /// Derive labels from a run configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            initials_a: config.initials_a.clone(),
            source_a: config.source_label_a(),
            initials_b: config.initials_b.clone(),
            source_b: config.source_label_b(),
        }
    }
}

/// A cell that receives the difference fill, in data-row coordinates
/// (the renderer shifts everything down one row for the header).
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub row: usize,
    pub column: usize,
    /// The differing value re-written with the fill
    pub value: CellValue,
}

/// An assembled review sheet, ready for rendering.
///
/// Non-matched rows appear in key order, the A row directly above its
/// B partner. The first three columns are the key, the annotator
/// initials, and the source label; the remaining columns are table A's
/// columns minus the key column.
#[derive(Debug)]
pub struct ReviewSheet {
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub highlights: Vec<Highlight>,
}

/// Assemble the review sheet for a finished comparison.
pub fn build_review_sheet(
    table_a: &Table,
    table_b: &Table,
    report: &MatchReport,
    mode: &KeyMode,
    labels: &ReportLabels,
) -> Result<ReviewSheet, CompareError> {
    let key_a = key_column_index(table_a, mode);
    let key_b = key_column_index(table_b, mode);

    // Data columns in table-A order, with each side's index.
    let mut names = Vec::new();
    let mut columns_a = Vec::new();
    let mut columns_b = Vec::new();
    for (index_a, name) in table_a.headers.iter().enumerate() {
        if Some(index_a) == key_a {
            continue;
        }
        let index_b = table_b.column_index(name).ok_or_else(|| {
            CompareError::ReportInternal(format!("column '{name}' has no counterpart in table B"))
        })?;
        names.push(name.clone());
        columns_a.push(index_a);
        columns_b.push(index_b);
    }

    let mut header = Vec::with_capacity(3 + names.len());
    header.push(mode.report_key_header().to_string());
    header.push("Initials".to_string());
    header.push("Source".to_string());
    header.extend(names);

    let mut rows = Vec::new();
    collect_side(
        table_a,
        key_a,
        &columns_a,
        report,
        &labels.initials_a,
        &labels.source_a,
        &mut rows,
    );
    collect_side(
        table_b,
        key_b,
        &columns_b,
        report,
        &labels.initials_b,
        &labels.source_b,
        &mut rows,
    );

    // Stable sort: equal keys keep A before B.
    rows.sort_by(|x, y| x[0].sort_cmp(&y[0]));

    if rows.len() != report.non_matched.len() * 2 {
        return Err(CompareError::ReportInternal(format!(
            "expected {} rows for {} non-matched keys, assembled {}",
            report.non_matched.len() * 2,
            report.non_matched.len(),
            rows.len()
        )));
    }

    // Each odd row closes a key pair; the fill covers the recorded
    // diff values on this row and the one above it.
    let mut highlights = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        if index % 2 == 0 {
            continue;
        }
        let key = &row[0];
        let diffs = report
            .field_diffs
            .get(key)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| {
                CompareError::ReportInternal(format!(
                    "key '{}' is non-matched but has no recorded field diffs",
                    key.display()
                ))
            })?;
        for (column, diff) in diffs {
            // The three leading slots may collide with user column
            // names; diff columns resolve against the data region only.
            let col = header[3..]
                .iter()
                .position(|h| h == column)
                .map(|i| i + 3)
                .ok_or_else(|| {
                    CompareError::ReportInternal(format!(
                        "diff column '{column}' is not a report column"
                    ))
                })?;
            highlights.push(Highlight {
                row: index - 1,
                column: col,
                value: diff.value_a.clone(),
            });
            highlights.push(Highlight {
                row: index,
                column: col,
                value: diff.value_b.clone(),
            });
        }
    }

    Ok(ReviewSheet {
        header,
        rows,
        highlights,
    })
}

fn key_column_index(table: &Table, mode: &KeyMode) -> Option<usize> {
    mode.key_column().and_then(|name| table.column_index(name))
}

fn collect_side(
    table: &Table,
    key_column: Option<usize>,
    columns: &[usize],
    report: &MatchReport,
    initials: &str,
    source: &str,
    rows: &mut Vec<Vec<CellValue>>,
) {
    for (index, row) in table.rows.iter().enumerate() {
        let key = row_key(row, index, key_column);
        if !report.field_diffs.contains_key(&key) {
            continue;
        }
        let mut out = Vec::with_capacity(3 + columns.len());
        out.push(key);
        out.push(CellValue::Text(initials.to_string()));
        out.push(CellValue::Text(source.to_string()));
        for &col in columns {
            out.push(row.get(col).cloned().unwrap_or(CellValue::Missing));
        }
        rows.push(out);
    }
}
