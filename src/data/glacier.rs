use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

use crate::analysis::aggregate_years;
use crate::data::{csv_reader, parse_number};
use crate::domain::{Reducer, YearlySeries};
use crate::error::DataError;

const YEAR_COLUMN: &str = "Year";
const AREA_COLUMNS: &[&str] = &["Area_km2", "area_km2", "Total_Area_km2"];

/// Glacier outline inventory: one `(survey year, area km²)` row per polygon.
///
/// Reads the attribute table of the outline shapefile exported as CSV; polygon areas
/// are expected to be already projected and converted to km².
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlacierInventory {
    polygons: Vec<(i32, f64)>,
}

impl GlacierInventory {
    pub fn from_polygons(polygons: Vec<(i32, f64)>) -> Self {
        Self { polygons }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut reader = csv_reader(reader);
        let headers = reader.headers()?.clone();

        let year_idx = headers
            .iter()
            .position(|h| h == YEAR_COLUMN)
            .ok_or_else(|| DataError::MissingColumn {
                column: YEAR_COLUMN.to_string(),
                tried: YEAR_COLUMN.to_string(),
            })?;
        let area_idx = AREA_COLUMNS
            .iter()
            .find_map(|name| headers.iter().position(|h| h == *name))
            .ok_or_else(|| DataError::MissingColumn {
                column: "glacier area".to_string(),
                tried: AREA_COLUMNS.join(", "),
            })?;

        let mut polygons = Vec::new();
        for record in reader.records() {
            let record = record?;
            let year = record.get(year_idx).and_then(|y| y.trim().parse::<i32>().ok());
            let area = record.get(area_idx).and_then(parse_number);
            if let (Some(year), Some(area)) = (year, area) {
                polygons.push((year, area));
            }
        }
        Ok(Self { polygons })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open glacier inventory: {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse glacier inventory: {}", path.display()))
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Total glacier area per survey year; survey years without polygons are skipped.
    pub fn area_by_year(&self, survey_years: &[i32]) -> YearlySeries {
        aggregate_years(&self.polygons, Reducer::Sum).retain_years(survey_years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_by_year_sums_polygons() {
        let raw = "\
GLIMS_ID,Year,Area_km2
G1,1980,1.5
G2,1980,2.5
G3,1990,3.25
G4,1995,9.0
G5,2000,
G6,bad,4.0
";
        let inventory = GlacierInventory::from_reader(raw.as_bytes()).unwrap();
        let areas = inventory.area_by_year(&[1980, 1990, 2000, 2010]);
        assert_eq!(areas.points(), &[(1980, 4.0), (1990, 3.25)]);
    }

    #[test]
    fn test_missing_area_column() {
        let err = GlacierInventory::from_reader("Year,Perimeter\n1980,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { .. }));
    }
}
