// CSV export

use std::io::Write;
use std::path::Path;

use divspace_engine::cell::Cell;

use crate::table::{to_table, HEADERS};

pub fn export(cells: &[Cell], path: &Path) -> Result<usize, String> {
    let file = std::fs::File::create(path)
        .map_err(|e| format!("cannot create {}: {}", path.display(), e))?;
    let rows = write_table(cells, file)?;
    log::info!("exported {} rows to {}", rows, path.display());
    Ok(rows)
}

/// Write the header and one record per cell. Returns the data row count.
pub fn write_table<W: Write>(cells: &[Cell], writer: W) -> Result<usize, String> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(HEADERS).map_err(|e| e.to_string())?;

    let rows = to_table(cells);
    for row in &rows {
        writer.write_record(row.values()).map_err(|e| e.to_string())?;
    }
    writer.flush().map_err(|e| e.to_string())?;
    Ok(rows.len())
}
