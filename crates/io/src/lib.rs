// Export of a divisible space: tabular rows, Excel, CSV, JSON

pub mod csv;
pub mod json;
pub mod table;
pub mod xlsx;

use std::path::Path;

use divspace_engine::cell::Cell;

/// Container format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Guess the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" => Some(ExportFormat::Xlsx),
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

/// Write `cells` to `path` in `format`. Returns the number of data rows.
pub fn export(cells: &[Cell], path: &Path, format: ExportFormat) -> Result<usize, String> {
    match format {
        ExportFormat::Xlsx => self::xlsx::export(cells, path).map(|r| r.rows_exported),
        ExportFormat::Csv => self::csv::export(cells, path),
        ExportFormat::Json => self::json::export(cells, path),
    }
}
