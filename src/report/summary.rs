//! Machine-readable run summary

use serde::Serialize;

use crate::config::Config;
use crate::diff::{MatchReport, MatchStats};

/// Serializable account of one comparison run
#[derive(Debug, Serialize)]
pub struct JsonSummary {
    table_a: String,
    table_b: String,
    key: String,
    stats: MatchStats,
    matched: Vec<String>,
    non_matched: Vec<JsonKeyDiffs>,
}

/// All field diffs of one non-matched key
#[derive(Debug, Serialize)]
struct JsonKeyDiffs {
    key: String,
    fields: Vec<JsonFieldDiff>,
}

#[derive(Debug, Serialize)]
struct JsonFieldDiff {
    column: String,
    value_a: serde_json::Value,
    value_b: serde_json::Value,
}

impl JsonSummary {
    /// Shape a finished report for serialization. Keys become display
    /// strings; list order follows the report.
    pub fn build(config: &Config, report: &MatchReport) -> Self {
        let non_matched = report
            .non_matched
            .iter()
            .map(|key| {
                let fields = report
                    .field_diffs
                    .get(key)
                    .map(|diffs| {
                        diffs
                            .iter()
                            .map(|(column, diff)| JsonFieldDiff {
                                column: column.clone(),
                                value_a: serde_json::json!(diff.value_a),
                                value_b: serde_json::json!(diff.value_b),
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                JsonKeyDiffs {
                    key: key.display().into_owned(),
                    fields,
                }
            })
            .collect();

        Self {
            table_a: config.table_a.display().to_string(),
            table_b: config.table_b.display().to_string(),
            key: config.key_mode.report_key_header().to_string(),
            stats: report.stats.clone(),
            matched: report
                .matched
                .iter()
                .map(|k| k.display().into_owned())
                .collect(),
            non_matched,
        }
    }
}
