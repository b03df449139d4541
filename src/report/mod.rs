//! Report artifacts: review spreadsheet, matched export, run summary

mod matched;
mod sheet;
mod summary;
mod workbook;

pub use matched::matched_export;
pub use sheet::{build_review_sheet, Highlight, ReportLabels, ReviewSheet};
pub use summary::JsonSummary;
pub use workbook::render_workbook;
