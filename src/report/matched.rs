//! Matched-rows delimited export

use rustc_hash::FxHashSet;

use crate::config::KeyMode;
use crate::diff::{row_key, MatchReport};
use crate::error::CompareError;
use crate::model::Table;

/// Export table A's matched rows as delimited bytes.
///
/// The output keeps table A's schema and row order untouched: the
/// header line, then one line per matched key. Positional keys are
/// never a real column, so nothing synthetic leaks into the export.
pub fn matched_export(
    table_a: &Table,
    report: &MatchReport,
    mode: &KeyMode,
    delimiter: u8,
) -> Result<Vec<u8>, CompareError> {
    let matched: FxHashSet<_> = report.matched.iter().collect();
    let key_column = mode
        .key_column()
        .and_then(|name| table_a.column_index(name));

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer.write_record(&table_a.headers)?;

    for (index, row) in table_a.rows.iter().enumerate() {
        let key = row_key(row, index, key_column);
        if !matched.contains(&key) {
            continue;
        }
        writer.write_record(row.iter().map(|v| v.display().into_owned()))?;
    }

    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| CompareError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::compare_tables;
    use crate::parser::parse_table;

    fn export(data_a: &str, data_b: &str, mode: &KeyMode) -> String {
        let a = parse_table(data_a.as_bytes(), b',').unwrap();
        let b = parse_table(data_b.as_bytes(), b',').unwrap();
        let report = compare_tables(&a, &b, mode).unwrap();
        String::from_utf8(matched_export(&a, &report, mode, b',').unwrap()).unwrap()
    }

    #[test]
    fn test_only_matched_rows_with_original_schema() {
        let out = export(
            "id,val\n1,x\n2,y\n",
            "id,val\n1,x\n2,z\n",
            &KeyMode::Keyed("id".into()),
        );
        assert_eq!(out, "id,val\n1,x\n");
    }

    #[test]
    fn test_positional_export_has_no_synthetic_column() {
        let out = export(
            "name,score\nann,1\nbob,2\ncal,3\n",
            "name,score\nann,1\nbob,2\ncal,9\n",
            &KeyMode::Positional,
        );
        assert_eq!(out, "name,score\nann,1\nbob,2\n");
    }

    #[test]
    fn test_missing_cells_export_as_empty_fields() {
        let out = export(
            "id,val\n1,\n2,y\n",
            "id,val\n1,\n2,z\n",
            &KeyMode::Keyed("id".into()),
        );
        assert_eq!(out, "id,val\n1,\n");
    }

    #[test]
    fn test_no_matches_exports_header_only() {
        let out = export(
            "id,val\n1,x\n",
            "id,val\n1,y\n",
            &KeyMode::Keyed("id".into()),
        );
        assert_eq!(out, "id,val\n");
    }

    #[test]
    fn test_tsv_export_delimiter() {
        let a = parse_table("id,val\n1,x\n".as_bytes(), b',').unwrap();
        let b = parse_table("id,val\n1,x\n".as_bytes(), b',').unwrap();
        let mode = KeyMode::Keyed("id".into());
        let report = compare_tables(&a, &b, &mode).unwrap();
        let out = String::from_utf8(matched_export(&a, &report, &mode, b'\t').unwrap()).unwrap();
        assert_eq!(out, "id\tval\n1\tx\n");
    }
}
