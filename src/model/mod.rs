//! Data model for parsed tables

mod table;
mod value;

pub use table::Table;
pub use value::CellValue;
