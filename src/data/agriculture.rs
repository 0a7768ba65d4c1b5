use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

use crate::analysis::aggregate_years;
use crate::config::DEBUG_FLAGS;
use crate::data::{csv_reader, parse_number};
use crate::domain::{Reducer, YearlySeries};
use crate::error::DataError;
use crate::utils::fiscal_year_start;

/// Header fragments that mark stray metadata columns rather than fiscal years.
const METADATA_MARKERS: &[&str] = &["oid", "size"];

/// Crop production table, transposed so that each crop is a yearly column.
///
/// The export has crops down the first column and fiscal years ("1998/99") across the
/// header. Years are taken from the first four characters of each header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgricultureTable {
    years: Vec<i32>,
    crops: Vec<String>,
    // production[crop][year_idx], in '000 metric tons
    production: Vec<Vec<Option<f64>>>,
}

impl AgricultureTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut reader = csv_reader(reader);
        let headers = reader.headers()?.clone();

        // (column index, year) for every header that is a real fiscal year
        let mut year_columns: Vec<(usize, i32)> = Vec::new();
        for (idx, header) in headers.iter().enumerate().skip(1) {
            let lowered = header.to_lowercase();
            if METADATA_MARKERS.iter().any(|m| lowered.contains(m)) {
                continue;
            }
            match fiscal_year_start(header) {
                Some(year) => year_columns.push((idx, year)),
                None => log::warn!("Skipping agricultural column '{}': not a year", header),
            }
        }

        let mut crops = Vec::new();
        let mut production = Vec::new();
        for record in reader.records() {
            let record = record?;
            let Some(name) = record.get(0).filter(|n| !n.is_empty()) else {
                continue;
            };
            crops.push(name.to_string());
            production.push(
                year_columns
                    .iter()
                    .map(|&(idx, _)| record.get(idx).and_then(parse_number))
                    .collect(),
            );
        }

        if crops.is_empty() || year_columns.is_empty() {
            return Err(DataError::NoRows {
                source_name: "agricultural production table".to_string(),
            });
        }

        if DEBUG_FLAGS.print_cleaning {
            log::info!(
                "Agricultural table: {} crops x {} years",
                crops.len(),
                year_columns.len()
            );
        }

        Ok(Self {
            years: year_columns.into_iter().map(|(_, year)| year).collect(),
            crops,
            production,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open agricultural file: {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse agricultural file: {}", path.display()))
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn crops(&self) -> &[String] {
        &self.crops
    }

    /// Production of one crop per year, missing cells dropped.
    /// Repeated year labels are averaged.
    pub fn series(&self, crop: &str) -> Result<YearlySeries, DataError> {
        let idx = self
            .crops
            .iter()
            .position(|c| c == crop)
            .ok_or_else(|| DataError::UnknownCrop {
                crop: crop.to_string(),
            })?;

        let pairs: Vec<(i32, f64)> = self
            .years
            .iter()
            .zip(&self.production[idx])
            .filter_map(|(&year, value)| value.map(|v| (year, v)))
            .collect();
        Ok(aggregate_years(&pairs, Reducer::Mean))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "\
Crop,1998/99, 1999/00 ,2000/01,oid sha256:abc,size
Paddy,3710,4030,4216,x,1
Maize,1346,1445,,y,2
Wheat,1086,n/a,1184,z,3
";

    #[test]
    fn test_transpose_and_metadata_columns() {
        let table = AgricultureTable::from_reader(RAW.as_bytes()).unwrap();
        assert_eq!(table.years(), &[1998, 1999, 2000]);
        assert_eq!(table.crops(), &["Paddy", "Maize", "Wheat"]);
    }

    #[test]
    fn test_series_drops_missing_cells() {
        let table = AgricultureTable::from_reader(RAW.as_bytes()).unwrap();
        assert_eq!(
            table.series("Paddy").unwrap().points(),
            &[(1998, 3710.0), (1999, 4030.0), (2000, 4216.0)]
        );
        assert_eq!(
            table.series("Maize").unwrap().points(),
            &[(1998, 1346.0), (1999, 1445.0)]
        );
        assert_eq!(
            table.series("Wheat").unwrap().points(),
            &[(1998, 1086.0), (2000, 1184.0)]
        );
    }

    #[test]
    fn test_unknown_crop() {
        let table = AgricultureTable::from_reader(RAW.as_bytes()).unwrap();
        assert!(matches!(
            table.series("Barley"),
            Err(DataError::UnknownCrop { .. })
        ));
    }

    #[test]
    fn test_repeated_year_labels_are_averaged() {
        let raw = "Crop,2010/11,2010\nTea,10,20\n";
        let table = AgricultureTable::from_reader(raw.as_bytes()).unwrap();
        assert_eq!(table.series("Tea").unwrap().points(), &[(2010, 15.0)]);
    }
}
