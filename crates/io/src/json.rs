// JSON export

use std::path::Path;
use std::fs::File;
use std::io::BufWriter;

use divspace_engine::cell::Cell;

use crate::table::to_table;

/// Export cells as a JSON array of objects keyed by the export headers
pub fn export(cells: &[Cell], path: &Path) -> Result<usize, String> {
    let file = File::create(path).map_err(|e| e.to_string())?;
    let writer = BufWriter::new(file);

    let rows = to_table(cells);
    serde_json::to_writer_pretty(writer, &rows).map_err(|e| e.to_string())?;

    log::info!("exported {} rows to {}", rows.len(), path.display());
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use divspace_engine::grid::Grid;

    #[test]
    fn test_json_export() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.json");

        let grid = Grid::initialize(1, 2).toggle_reservation(0, "Alice").unwrap();
        assert_eq!(export(grid.cells(), &path).unwrap(), 2);

        let content = fs::read_to_string(&path).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["Square ID"], 1);
        assert_eq!(parsed[0]["Reserved"], "Yes");
        assert_eq!(parsed[0]["Reserved By"], "Alice");
        assert_eq!(parsed[1]["Reserved"], "No");
        assert_eq!(parsed[1]["Capacity"], 1);
        assert_eq!(parsed[1]["Tags"], "");
    }
}
