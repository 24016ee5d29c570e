//! Export Serializer: cells to tabular rows.
//!
//! The column names and their order are the compatibility contract for
//! anyone consuming an export, whatever the container format.

use serde::Serialize;

use divspace_engine::cell::Cell;

/// Header row, in column order.
pub const HEADERS: [&str; 6] = ["Square ID", "Details", "Reserved", "Reserved By", "Capacity", "Tags"];

/// One exported row. Field order matches `HEADERS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    /// Cell id plus one
    #[serde(rename = "Square ID")]
    pub square_id: usize,
    #[serde(rename = "Details")]
    pub details: String,
    /// "Yes" or "No"
    #[serde(rename = "Reserved")]
    pub reserved: &'static str,
    #[serde(rename = "Reserved By")]
    pub reserved_by: String,
    #[serde(rename = "Capacity")]
    pub capacity: u32,
    /// Tags joined with ", "
    #[serde(rename = "Tags")]
    pub tags: String,
}

impl ExportRow {
    pub fn from_cell(cell: &Cell) -> Self {
        Self {
            square_id: cell.display_number(),
            details: cell.details.clone(),
            reserved: if cell.reserved { "Yes" } else { "No" },
            reserved_by: cell.reserved_by.clone(),
            capacity: cell.capacity,
            tags: cell.tags_display(),
        }
    }

    /// Values as display strings, in column order.
    pub fn values(&self) -> [String; 6] {
        [
            self.square_id.to_string(),
            self.details.clone(),
            self.reserved.to_string(),
            self.reserved_by.clone(),
            self.capacity.to_string(),
            self.tags.clone(),
        ]
    }
}

/// One row per cell, in the order given (id order for a grid).
pub fn to_table(cells: &[Cell]) -> Vec<ExportRow> {
    cells.iter().map(ExportRow::from_cell).collect()
}
