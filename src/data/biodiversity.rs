use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;
use serde::Serialize;

use crate::analysis::aggregate_years;
use crate::data::{csv_reader, parse_number};
use crate::domain::{Reducer, YearlySeries};
use crate::error::DataError;

const SPECIES_COLUMN: &str = "Species";
const YEAR_COLUMN_PREFIX: &str = "threatened species_";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ThreatenedRecord {
    pub year: i32,
    pub species: String,
    pub count: f64,
}

/// Threatened species counts in long form, sorted by species then year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BiodiversityTable {
    records: Vec<ThreatenedRecord>,
}

/// Year of a `... threatened species_YYYY` header (case-insensitive, year last).
fn threatened_year(header: &str) -> Option<i32> {
    let lowered = header.trim().to_lowercase();
    let split = lowered.len().checked_sub(4)?;
    let (head, digits) = lowered.split_at_checked(split)?;
    if !head.ends_with(YEAR_COLUMN_PREFIX) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl BiodiversityTable {
    /// Melt the wide export into `(year, species, count)` rows. Only the
    /// `threatened species_YYYY` columns are kept; non-numeric counts are dropped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut reader = csv_reader(reader);
        let headers = reader.headers()?.clone();

        let species_idx = headers
            .iter()
            .position(|h| h == SPECIES_COLUMN)
            .ok_or_else(|| DataError::MissingColumn {
                column: SPECIES_COLUMN.to_string(),
                tried: SPECIES_COLUMN.to_string(),
            })?;

        let year_columns: Vec<(usize, i32)> = headers
            .iter()
            .enumerate()
            .filter_map(|(idx, header)| threatened_year(header).map(|year| (idx, year)))
            .collect();
        if year_columns.is_empty() {
            return Err(DataError::NoYearColumns);
        }

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record?;
            let Some(species) = record.get(species_idx).filter(|s| !s.is_empty()) else {
                continue;
            };
            for &(idx, year) in &year_columns {
                if let Some(count) = record.get(idx).and_then(parse_number) {
                    records.push(ThreatenedRecord {
                        year,
                        species: species.to_string(),
                        count,
                    });
                }
            }
        }

        records.sort_by(|a, b| a.species.cmp(&b.species).then(a.year.cmp(&b.year)));
        Ok(Self { records })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open biodiversity file: {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse biodiversity file: {}", path.display()))
    }

    pub fn records(&self) -> &[ThreatenedRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct species names in sorted order.
    pub fn species(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.species.clone())
            .dedup()
            .collect()
    }

    pub fn series(&self, species: &str) -> Result<YearlySeries, DataError> {
        let pairs: Vec<(i32, f64)> = self
            .records
            .iter()
            .filter(|r| r.species == species)
            .map(|r| (r.year, r.count))
            .collect();
        if pairs.is_empty() {
            return Err(DataError::UnknownSpecies {
                species: species.to_string(),
            });
        }
        Ok(aggregate_years(&pairs, Reducer::Mean))
    }
}
