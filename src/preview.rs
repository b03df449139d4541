//! Bordered text previews of parsed tables

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::model::Table;

/// Rows shown per preview
pub const PREVIEW_ROWS: usize = 4;

/// Render the first `limit` rows of a table as a bordered text block.
pub fn render_preview(table: &Table, limit: usize) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.headers.iter().cloned());
    for row in table.rows.iter().take(limit) {
        builder.push_record(row.iter().map(|v| v.display().into_owned()));
    }

    let mut rendered = builder.build();
    rendered.with(Style::sharp());
    rendered.to_string()
}
