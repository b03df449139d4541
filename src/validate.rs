//! Pre-comparison validation of a table pair

use rustc_hash::FxHashSet;

use crate::config::KeyMode;
use crate::error::{CompareError, TableSide};
use crate::model::Table;

/// Check that two parsed tables can be compared under the given mode.
///
/// Checks run in a fixed order and the first failure wins: both tables
/// must have data rows, their shapes must agree, and their headers must
/// be compatible. Keyed mode only requires the key column on both
/// sides; positional mode requires set-equal headers.
pub fn validate(table_a: &Table, table_b: &Table, mode: &KeyMode) -> Result<(), CompareError> {
    ensure_has_rows(table_a, TableSide::A)?;
    ensure_has_rows(table_b, TableSide::B)?;

    if table_a.row_count() != table_b.row_count()
        || table_a.column_count() != table_b.column_count()
    {
        return Err(CompareError::ShapeMismatch {
            rows_a: table_a.row_count(),
            cols_a: table_a.column_count(),
            rows_b: table_b.row_count(),
            cols_b: table_b.column_count(),
        });
    }

    match mode {
        KeyMode::Keyed(key) => ensure_key_column(table_a, table_b, key),
        KeyMode::Positional => ensure_headers_match(table_a, table_b),
    }
}

fn ensure_has_rows(table: &Table, side: TableSide) -> Result<(), CompareError> {
    if table.row_count() == 0 {
        return Err(CompareError::MissingInput(format!(
            "{side} has no data rows"
        )));
    }
    Ok(())
}

fn ensure_key_column(table_a: &Table, table_b: &Table, key: &str) -> Result<(), CompareError> {
    let in_a = table_a.column_index(key).is_some();
    let in_b = table_b.column_index(key).is_some();
    let missing = match (in_a, in_b) {
        (true, true) => return Ok(()),
        (false, true) => "table A",
        (true, false) => "table B",
        (false, false) => "both tables",
    };
    Err(CompareError::HeaderMismatch(format!(
        "key column '{key}' not found in {missing}"
    )))
}

fn ensure_headers_match(table_a: &Table, table_b: &Table) -> Result<(), CompareError> {
    let set_a: FxHashSet<&str> = table_a.headers.iter().map(String::as_str).collect();
    let set_b: FxHashSet<&str> = table_b.headers.iter().map(String::as_str).collect();

    let only_in_a: Vec<&str> = table_a
        .headers
        .iter()
        .map(String::as_str)
        .filter(|h| !set_b.contains(h))
        .collect();
    let only_in_b: Vec<&str> = table_b
        .headers
        .iter()
        .map(String::as_str)
        .filter(|h| !set_a.contains(h))
        .collect();

    if only_in_a.is_empty() && only_in_b.is_empty() {
        return Ok(());
    }

    let mut parts = Vec::new();
    if !only_in_a.is_empty() {
        parts.push(format!("only in table A: {}", only_in_a.join(", ")));
    }
    if !only_in_b.is_empty() {
        parts.push(format!("only in table B: {}", only_in_b.join(", ")));
    }
    Err(CompareError::HeaderMismatch(parts.join("; ")))
}
