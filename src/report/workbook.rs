//! XLSX rendering of an assembled review sheet

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};

use crate::error::CompareError;
use crate::model::CellValue;

use super::sheet::ReviewSheet;

/// Background fill applied to differing cells
const HIGHLIGHT_COLOR: Color = Color::RGB(0xFFC7CE);

/// Render a review sheet into workbook bytes.
///
/// The sheet lands on a single worksheet: bold header on row 0, data
/// rows below, and the recorded diff values re-written on top of their
/// cells with the highlight fill.
pub fn render_workbook(sheet: &ReviewSheet) -> Result<Vec<u8>, CompareError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let highlight_format = Format::new().set_background_color(HIGHLIGHT_COLOR);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Sheet1")?;

    for (col, title) in sheet.header.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, title, &header_format)?;
    }

    for (index, row) in sheet.rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            write_cell(worksheet, (index + 1) as u32, col as u16, value, None)?;
        }
    }

    for highlight in &sheet.highlights {
        write_cell(
            worksheet,
            (highlight.row + 1) as u32,
            highlight.column as u16,
            &highlight.value,
            Some(&highlight_format),
        )?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    format: Option<&Format>,
) -> Result<(), CompareError> {
    match (value, format) {
        (CellValue::Number(n), Some(f)) => {
            worksheet.write_number_with_format(row, col, *n, f)?;
        }
        (CellValue::Number(n), None) => {
            worksheet.write_number(row, col, *n)?;
        }
        (CellValue::Text(s), Some(f)) => {
            worksheet.write_string_with_format(row, col, s, f)?;
        }
        (CellValue::Text(s), None) => {
            worksheet.write_string(row, col, s)?;
        }
        (CellValue::Missing, Some(f)) => {
            worksheet.write_blank(row, col, f)?;
        }
        // An absent value with no format needs no cell at all.
        (CellValue::Missing, None) => {}
    }
    Ok(())
}
