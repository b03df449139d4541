//! csvmatch - keyed comparison of delimited tables
//!
//! Compares two same-shaped delimited tables row by row, either on a
//! unique identifier column or by row position, and produces reviewer
//! artifacts: a delimited export of the matched rows and a spreadsheet
//! of the non-matched row pairs with differing cells highlighted.

pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod parser;
pub mod preview;
pub mod report;
pub mod validate;

pub use config::{Config, KeyMode};
pub use diff::MatchReport;
pub use error::CompareError;
pub use model::Table;
