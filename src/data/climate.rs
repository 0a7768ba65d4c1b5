use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use strum::IntoEnumIterator;

use crate::config::DEBUG_FLAGS;
use crate::data::{csv_reader, parse_number};
use crate::domain::{ClimateVariable, TimePoint};
use crate::error::DataError;
use crate::utils::{format_date, parse_date};

// ============================================================================
// ClimateTable: the daily climate export, one row per (station/district, day)
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClimateTable {
    dates: Vec<NaiveDate>,
    headers: Vec<String>,
    // Column-major: columns[c][row]
    columns: Vec<Vec<Option<f64>>>,
}

impl ClimateTable {
    pub const DATE_COLUMN: &'static str = "Date";

    /// Parse the raw export. Rows whose date cannot be parsed are dropped, numeric cells
    /// that are empty or malformed become missing, and columns with no numeric cell at
    /// all (district names and similar) are discarded.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut reader = csv_reader(reader);
        let header_record = reader.headers()?.clone();

        let date_idx = header_record
            .iter()
            .position(|h| h == Self::DATE_COLUMN)
            .ok_or_else(|| DataError::MissingColumn {
                column: Self::DATE_COLUMN.to_string(),
                tried: Self::DATE_COLUMN.to_string(),
            })?;
        let value_indices: Vec<usize> = (0..header_record.len()).filter(|&i| i != date_idx).collect();

        let mut dates = Vec::new();
        let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); value_indices.len()];
        let mut dropped_rows = 0usize;

        for record in reader.records() {
            let record = record?;
            let Some(date) = record.get(date_idx).and_then(parse_date) else {
                dropped_rows += 1;
                continue;
            };
            dates.push(date);
            for (column, &idx) in columns.iter_mut().zip(&value_indices) {
                column.push(record.get(idx).and_then(parse_number));
            }
        }

        if dates.is_empty() {
            return Err(DataError::NoRows {
                source_name: "daily climate export".to_string(),
            });
        }

        let mut headers = Vec::new();
        let mut numeric_columns = Vec::new();
        for (column, &idx) in columns.into_iter().zip(&value_indices) {
            if column.iter().any(Option::is_some) {
                headers.push(header_record[idx].to_string());
                numeric_columns.push(column);
            }
        }

        if DEBUG_FLAGS.print_cleaning && dropped_rows > 0 {
            log::info!(
                "Dropped {} climate rows with unparseable dates ({} kept)",
                dropped_rows,
                dates.len()
            );
        }

        Ok(Self {
            dates,
            headers,
            columns: numeric_columns,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open climate file: {}", path.display()))?;
        let table = Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse climate file: {}", path.display()))?;
        log::info!(
            "Loaded {} daily climate rows from {} (variables: {})",
            table.len(),
            path.display(),
            table
                .available_variables()
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(table)
    }

    /// Load and clean in one step.
    pub fn load_clean(path: &Path) -> Result<Self> {
        Ok(Self::load(path)?.clean())
    }

    /// Fill gaps forward then backward within each column (file order), then sort rows
    /// by date. A column only stays empty where it had no value at all.
    pub fn clean(mut self) -> Self {
        let mut filled = 0usize;
        for column in &mut self.columns {
            filled += fill_forward_backward(column);
        }

        let mut order: Vec<usize> = (0..self.dates.len()).collect();
        order.sort_by_key(|&i| self.dates[i]);
        self.dates = order.iter().map(|&i| self.dates[i]).collect();
        for column in &mut self.columns {
            *column = order.iter().map(|&i| column[i]).collect();
        }

        if DEBUG_FLAGS.print_cleaning && filled > 0 {
            log::info!("Filled {} missing climate cells", filled);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_variable(&self, variable: ClimateVariable) -> bool {
        self.column_index(variable).is_some()
    }

    /// Known variables that have a column in this table.
    pub fn available_variables(&self) -> Vec<ClimateVariable> {
        ClimateVariable::iter()
            .filter(|&variable| self.has_variable(variable))
            .collect()
    }

    fn column_index(&self, variable: ClimateVariable) -> Option<usize> {
        variable
            .column_aliases()
            .iter()
            .find_map(|alias| self.headers.iter().position(|h| h == alias))
    }

    pub fn column(&self, variable: ClimateVariable) -> Result<&[Option<f64>], DataError> {
        self.column_index(variable)
            .map(|idx| self.columns[idx].as_slice())
            .ok_or_else(|| DataError::MissingColumn {
                column: variable.to_string(),
                tried: variable.column_aliases().join(", "),
            })
    }

    /// Dated observations of one variable, skipping rows where it is missing.
    pub fn points(&self, variable: ClimateVariable) -> Result<Vec<TimePoint>, DataError> {
        let column = self.column(variable)?;
        Ok(self
            .dates
            .iter()
            .zip(column)
            .filter_map(|(&date, value)| value.map(|v| TimePoint::new(date, v)))
            .collect())
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), DataError> {
        let mut writer = csv::Writer::from_writer(writer);

        let mut header_row = vec![Self::DATE_COLUMN.to_string()];
        header_row.extend(self.headers.iter().cloned());
        writer.write_record(&header_row)?;

        for (row, date) in self.dates.iter().enumerate() {
            let mut record = vec![format_date(*date)];
            record.extend(
                self.columns
                    .iter()
                    .map(|column| column[row].map(|v| v.to_string()).unwrap_or_default()),
            );
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        self.write_csv(BufWriter::new(file))
            .context(format!("Failed to write climate table to: {}", path.display()))
    }
}

/// Forward fill then backward fill; returns how many cells were filled.
fn fill_forward_backward(column: &mut [Option<f64>]) -> usize {
    let mut filled = 0;

    let mut last = None;
    for cell in column.iter_mut() {
        match cell {
            Some(v) => last = Some(*v),
            None if last.is_some() => {
                *cell = last;
                filled += 1;
            }
            None => {}
        }
    }

    let mut next = None;
    for cell in column.iter_mut().rev() {
        match cell {
            Some(v) => next = Some(*v),
            None if next.is_some() => {
                *cell = next;
                filled += 1;
            }
            None => {}
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "\
Date,District,Temp_2m,Precip,MaxTemp_2m
2001-01-02,Kathmandu,12.5,0.0,18.0
not-a-date,Kathmandu,99.0,99.0,99.0
2001-01-01,Kathmandu,,3.5,17.0
2001-01-03,Kathmandu,14.0,,
2002-06-01,Kathmandu,25.0,120.0,31.0
";

    #[test]
    fn test_parse_drops_bad_dates_and_text_columns() {
        let table = ClimateTable::from_reader(RAW.as_bytes()).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.headers(), &["Temp_2m", "Precip", "MaxTemp_2m"]);
        assert_eq!(
            table.column(ClimateVariable::Temperature).unwrap(),
            &[Some(12.5), None, Some(14.0), Some(25.0)]
        );
    }

    #[test]
    fn test_clean_fills_and_sorts() {
        let table = ClimateTable::from_reader(RAW.as_bytes()).unwrap().clean();
        let first = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        assert_eq!(table.dates()[0], first);
        // Temp: file order [12.5, None, 14.0, 25.0] -> ffill -> [12.5, 12.5, 14.0, 25.0], then sorted
        assert_eq!(
            table.column(ClimateVariable::Temperature).unwrap(),
            &[Some(12.5), Some(12.5), Some(14.0), Some(25.0)]
        );
        assert!(
            table
                .column(ClimateVariable::Precipitation)
                .unwrap()
                .iter()
                .all(Option::is_some)
        );
    }

    #[test]
    fn test_backward_fill_at_start() {
        let mut column = vec![None, None, Some(2.0), None];
        assert_eq!(fill_forward_backward(&mut column), 3);
        assert_eq!(column, vec![Some(2.0), Some(2.0), Some(2.0), Some(2.0)]);

        let mut empty: Vec<Option<f64>> = vec![None, None];
        assert_eq!(fill_forward_backward(&mut empty), 0);
    }

    #[test]
    fn test_alias_resolution_and_missing_column() {
        let table = ClimateTable::from_reader(RAW.as_bytes()).unwrap();
        // "Precip" satisfies the precipitation variable
        assert!(table.has_variable(ClimateVariable::Precipitation));
        assert_eq!(
            table.available_variables(),
            vec![
                ClimateVariable::Temperature,
                ClimateVariable::MaxTemperature,
                ClimateVariable::Precipitation
            ]
        );
        let err = table.points(ClimateVariable::WindSpeed).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { .. }));
    }

    #[test]
    fn test_missing_date_column() {
        let err = ClimateTable::from_reader("Day,Temp_2m\n1,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { .. }));
    }

    #[test]
    fn test_write_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed").join("cleaned.csv");
        let table = ClimateTable::from_reader(RAW.as_bytes()).unwrap().clean();
        table.save(&path).unwrap();

        let reloaded = ClimateTable::load(&path).unwrap();
        assert_eq!(reloaded, table);
    }
}
