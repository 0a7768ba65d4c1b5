//! Generic two-column loaders for ad-hoc series files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::{csv_reader, parse_number};
use crate::domain::TimePoint;
use crate::error::DataError;
use crate::utils::parse_date;

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, DataError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DataError::MissingColumn {
            column: name.to_string(),
            tried: headers.iter().collect::<Vec<_>>().join(", "),
        })
}

/// Dated observations from `date_column` / `value_column`.
/// Rows with an unparseable date or value are skipped.
pub fn read_time_points<R: Read>(
    reader: R,
    date_column: &str,
    value_column: &str,
) -> Result<Vec<TimePoint>, DataError> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();
    let date_idx = column_index(&headers, date_column)?;
    let value_idx = column_index(&headers, value_column)?;

    let mut points = Vec::new();
    for record in reader.records() {
        let record = record?;
        let date = record.get(date_idx).and_then(parse_date);
        let value = record.get(value_idx).and_then(parse_number);
        if let (Some(date), Some(value)) = (date, value) {
            points.push(TimePoint::new(date, value));
        }
    }
    Ok(points)
}

/// Year-tagged observations from `year_column` / `value_column`. Years may repeat.
pub fn read_year_values<R: Read>(
    reader: R,
    year_column: &str,
    value_column: &str,
) -> Result<Vec<(i32, f64)>, DataError> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();
    let year_idx = column_index(&headers, year_column)?;
    let value_idx = column_index(&headers, value_column)?;

    let mut pairs = Vec::new();
    for record in reader.records() {
        let record = record?;
        let year = record.get(year_idx).and_then(|y| y.parse::<i32>().ok());
        let value = record.get(value_idx).and_then(parse_number);
        if let (Some(year), Some(value)) = (year, value) {
            pairs.push((year, value));
        }
    }
    Ok(pairs)
}

pub fn load_time_points(path: &Path, date_column: &str, value_column: &str) -> Result<Vec<TimePoint>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    read_time_points(BufReader::new(file), date_column, value_column)
        .with_context(|| format!("Failed to read dated series from {}", path.display()))
}

pub fn load_year_values(path: &Path, year_column: &str, value_column: &str) -> Result<Vec<(i32, f64)>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    read_year_values(BufReader::new(file), year_column, value_column)
        .with_context(|| format!("Failed to read yearly series from {}", path.display()))
}
