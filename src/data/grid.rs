use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

use crate::analysis::LandcoverGrid;
use crate::error::DataError;

/// Read a classified raster exported as a header-less CSV matrix of integer classes.
pub fn read_grid<R: Read>(reader: R) -> Result<LandcoverGrid, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut width = None;
    let mut cells = Vec::new();
    let mut height = 0;
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let expected = *width.get_or_insert(record.len());
        if record.len() != expected {
            return Err(DataError::RaggedGrid {
                row,
                found: record.len(),
                expected,
            });
        }
        for (column, cell) in record.iter().enumerate() {
            let class = cell.parse::<i16>().map_err(|_| DataError::InvalidCell {
                row,
                column,
                value: cell.to_string(),
            })?;
            cells.push(class);
        }
        height += 1;
    }

    let no_rows = || DataError::NoRows {
        source_name: "landcover grid".to_string(),
    };
    let width = width.filter(|&w| w > 0).ok_or_else(no_rows)?;
    LandcoverGrid::new(width, height, cells).ok_or_else(no_rows)
}

pub fn load_grid(path: &Path) -> Result<LandcoverGrid> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open landcover grid: {}", path.display()))?;
    read_grid(BufReader::new(file))
        .with_context(|| format!("Failed to parse landcover grid: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_grid() {
        let grid = read_grid("1,2,3\n4,5,6\n".as_bytes()).unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.get(1, 2), Some(6));
    }

    #[test]
    fn test_ragged_and_invalid() {
        assert!(matches!(
            read_grid("1,2\n3\n".as_bytes()),
            Err(DataError::RaggedGrid { row: 1, found: 1, expected: 2 })
        ));
        assert!(matches!(
            read_grid("1,x\n".as_bytes()),
            Err(DataError::InvalidCell { row: 0, column: 1, .. })
        ));
    }
}
