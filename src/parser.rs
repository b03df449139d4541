//! Delimited-text parsing into the table model

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rustc_hash::FxHashSet;

use crate::error::CompareError;
use crate::model::{CellValue, Table};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

/// Pick the delimiter for an input file: an explicit choice wins,
/// otherwise the file extension decides (tab for `.tsv`, comma else).
pub fn resolve_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

/// Pick the delimiter for an output file, falling back to the input
/// delimiter when the extension gives no hint.
pub fn resolve_output_delimiter(path: &Path, provided: Option<u8>, fallback: u8) -> u8 {
    if let Some(delim) = provided {
        return delim;
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        Some(ext) if ext.eq_ignore_ascii_case("csv") => DEFAULT_CSV_DELIMITER,
        _ => fallback,
    }
}

/// Parse a delimited file into a [`Table`].
pub fn parse_path(path: &Path, delimiter: u8) -> Result<Table, CompareError> {
    let file = File::open(path)?;
    parse_table(BufReader::new(file), delimiter)
}

/// Parse delimited text from any reader into a [`Table`].
///
/// The first record is the header row. Duplicate column names and
/// ragged rows are rejected, so the resulting table is rectangular and
/// addressable by column name.
pub fn parse_table<R: Read>(reader: R, delimiter: u8) -> Result<Table, CompareError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(false)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| CompareError::Parse(format!("failed to read headers: {e}")))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut seen = FxHashSet::default();
    for name in &headers {
        if !seen.insert(name.as_str()) {
            return Err(CompareError::Parse(format!(
                "duplicate column name '{name}'"
            )));
        }
    }

    let mut rows = Vec::new();
    for (line_num, result) in csv_reader.records().enumerate() {
        let record = result
            .map_err(|e| CompareError::Parse(format!("row {}: {e}", line_num + 2)))?; // +2 for 1-indexing and header
        let cells: Vec<CellValue> = record.iter().map(parse_cell).collect();
        rows.push(cells);
    }

    Ok(Table::new(headers, rows))
}

/// Parse a single field into a cell value.
///
/// Empty fields are missing. Fields that trim to a finite number are
/// numeric, with `-0` normalized to `0`; `nan` and `inf` literals
/// deliberately stay textual. All other fields are text, whitespace
/// preserved.
fn parse_cell(field: &str) -> CellValue {
    if field.is_empty() {
        return CellValue::Missing;
    }

    if let Ok(n) = field.trim().parse::<f64>() {
        if n.is_finite() {
            // -0 collapses into 0 like every other numeric rendering.
            return CellValue::Number(if n == 0.0 { 0.0 } else { n });
        }
    }

    CellValue::Text(field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell(""), CellValue::Missing);
        assert_eq!(parse_cell("42"), CellValue::Number(42.0));
        assert_eq!(parse_cell("1.0"), CellValue::Number(1.0));
        assert_eq!(parse_cell("001"), CellValue::Number(1.0));
        assert_eq!(parse_cell(" 2 "), CellValue::Number(2.0));
        assert_eq!(parse_cell("1e3"), CellValue::Number(1000.0));
        assert_eq!(parse_cell("hello"), CellValue::from("hello"));
        assert_eq!(parse_cell(" "), CellValue::from(" "));
        assert_eq!(parse_cell("nan"), CellValue::from("nan"));
        assert_eq!(parse_cell("inf"), CellValue::from("inf"));
    }

    #[test]
    fn test_negative_zero_parses_unsigned() {
        assert_eq!(parse_cell("-0").display(), "0");
        assert_eq!(parse_cell("-0.0").display(), "0");
    }

    #[test]
    fn test_parse_table() {
        let data = "id,val\n1,x\n2,\n";
        let table = parse_table(data.as_bytes(), b',').unwrap();
        assert_eq!(table.headers, vec!["id", "val"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0][0], CellValue::Number(1.0));
        assert_eq!(table.rows[0][1], CellValue::from("x"));
        assert_eq!(table.rows[1][1], CellValue::Missing);
    }

    #[test]
    fn test_tab_delimited() {
        let data = "id\tval\n1\tx\n";
        let table = parse_table(data.as_bytes(), b'\t').unwrap();
        assert_eq!(table.headers, vec!["id", "val"]);
        assert_eq!(table.rows[0][1], CellValue::from("x"));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let data = "a,b\n1,2\n3\n";
        let err = parse_table(data.as_bytes(), b',').unwrap_err();
        match err {
            CompareError::Parse(msg) => assert!(msg.starts_with("row 3:"), "unexpected: {msg}"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_header_rejected() {
        let data = "id,id\n1,2\n";
        let err = parse_table(data.as_bytes(), b',').unwrap_err();
        match err {
            CompareError::Parse(msg) => assert!(msg.contains("duplicate column name 'id'")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_delimiter() {
        assert_eq!(resolve_delimiter(Path::new("a.csv"), None), b',');
        assert_eq!(resolve_delimiter(Path::new("a.tsv"), None), b'\t');
        assert_eq!(resolve_delimiter(Path::new("a.txt"), None), b',');
        assert_eq!(resolve_delimiter(Path::new("a.tsv"), Some(b';')), b';');
    }

    #[test]
    fn test_resolve_output_delimiter() {
        assert_eq!(resolve_output_delimiter(Path::new("o.tsv"), None, b','), b'\t');
        assert_eq!(resolve_output_delimiter(Path::new("o.csv"), None, b'\t'), b',');
        assert_eq!(resolve_output_delimiter(Path::new("o.dat"), None, b';'), b';');
        assert_eq!(resolve_output_delimiter(Path::new("o.csv"), Some(b'|'), b','), b'|');
    }
}
