// Data loading and cleaning for the CSV exports behind each page
pub mod agriculture;
pub mod biodiversity;
pub mod climate;
pub mod glacier;
pub mod grid;
pub mod series_file;

// Re-export commonly used types
pub use agriculture::AgricultureTable;
pub use biodiversity::{BiodiversityTable, ThreatenedRecord};
pub use climate::ClimateTable;
pub use glacier::GlacierInventory;

use std::io::Read;

/// CSV reader shared by every loader: headers on, cells trimmed, ragged rows tolerated.
pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// Lenient numeric cell parse: empty, non-numeric and non-finite cells are missing.
pub(crate) fn parse_number(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("n/a"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }
}
