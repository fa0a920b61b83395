use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::info;

use crate::matcher::ExtractedRow;

/// Header of the source-document column, always last.
const FILENAME_COLUMN: &str = "filename";

const SHEET_NAME: &str = "Billing Data";

/// Serialize rows to a single-sheet xlsx buffer: header row first, then one
/// data row per input row in input order. Column set is the union of row
/// labels in first-seen order, with the filename column last. Returns
/// `None` for empty input, which the caller must treat as a no-data
/// condition rather than an error.
pub fn build_spreadsheet(rows: &[ExtractedRow]) -> Result<Option<Vec<u8>>, XlsxError> {
    if rows.is_empty() {
        return Ok(None);
    }

    let columns = column_order(rows);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, label) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, label, &header_format)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, label) in columns.iter().enumerate() {
            let value = if label.as_str() == FILENAME_COLUMN {
                row.filename()
            } else {
                row.get(label).unwrap_or("")
            };
            worksheet.write_string((row_idx + 1) as u32, col_idx as u16, value)?;
        }
    }

    worksheet.set_freeze_panes(1, 0)?;

    let buffer = workbook.save_to_buffer()?;
    info!(
        rows = rows.len(),
        columns = columns.len(),
        bytes = buffer.len(),
        "Spreadsheet built"
    );
    Ok(Some(buffer))
}

/// Union of row labels in first-seen order, filename column last.
fn column_order(rows: &[ExtractedRow]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for (label, _) in row.fields() {
            if !columns.iter().any(|c| c == label) {
                columns.push(label.clone());
            }
        }
    }
    columns.push(FILENAME_COLUMN.to_string());
    columns
}
