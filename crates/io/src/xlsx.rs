// Excel export (xlsx only)
//
// One sheet named "Squares": a bold header row followed by one row per cell.
// Square ID and Capacity are written as numbers, everything else as text.

use std::path::Path;
use std::time::Instant;

use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use divspace_engine::cell::Cell;

use crate::table::{to_table, ExportRow, HEADERS};

/// Sheet name of the exported workbook
pub const SHEET_NAME: &str = "Squares";

/// Result of an Excel export operation
#[derive(Debug, Default)]
pub struct ExportResult {
    /// Data rows written (header excluded)
    pub rows_exported: usize,
    /// Time taken for export in milliseconds
    pub export_duration_ms: u128,
}

/// Column widths in characters, indexed like `HEADERS`
const COLUMN_WIDTHS: [f64; 6] = [10.0, 40.0, 10.0, 20.0, 10.0, 30.0];

/// Export cells to an XLSX workbook at `path`
///
/// # Returns
/// * `Ok(ExportResult)` - Export statistics
/// * `Err(String)` - Error message if export failed
pub fn export(cells: &[Cell], path: &Path) -> Result<ExportResult, String> {
    let start_time = Instant::now();
    let rows = to_table(cells);

    let mut xlsx_workbook = XlsxWorkbook::new();
    let worksheet = xlsx_workbook
        .add_worksheet()
        .set_name(SHEET_NAME)
        .map_err(|e| format!("Failed to create sheet '{}': {}", SHEET_NAME, e))?;

    write_header(worksheet)?;
    for (idx, row) in rows.iter().enumerate() {
        // Row 0 is the header
        write_row(worksheet, idx as u32 + 1, row)?;
    }

    xlsx_workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))?;

    let result = ExportResult {
        rows_exported: rows.len(),
        export_duration_ms: start_time.elapsed().as_millis(),
    };
    log::info!(
        "exported {} rows to {} in {} ms",
        result.rows_exported,
        path.display(),
        result.export_duration_ms
    );
    Ok(result)
}

fn write_header(worksheet: &mut Worksheet) -> Result<(), String> {
    let bold = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        let col16 = col as u16;
        worksheet
            .write_string_with_format(0, col16, *header, &bold)
            .map_err(|e| format!("Failed to write header '{}': {}", header, e))?;
        worksheet
            .set_column_width(col16, COLUMN_WIDTHS[col])
            .map_err(|e| format!("Failed to set width of column {}: {}", col, e))?;
    }
    Ok(())
}

fn write_row(worksheet: &mut Worksheet, row32: u32, row: &ExportRow) -> Result<(), String> {
    let err = |e: rust_xlsxwriter::XlsxError| format!("Failed to write row {}: {}", row32, e);

    worksheet.write_number(row32, 0, row.square_id as f64).map_err(err)?;
    worksheet.write_string(row32, 1, row.details.as_str()).map_err(err)?;
    worksheet.write_string(row32, 2, row.reserved).map_err(err)?;
    worksheet.write_string(row32, 3, row.reserved_by.as_str()).map_err(err)?;
    worksheet.write_number(row32, 4, row.capacity).map_err(err)?;
    worksheet.write_string(row32, 5, row.tags.as_str()).map_err(err)?;
    Ok(())
}
