use crate::analysis::aggregate::aggregate;
use crate::domain::{Reducer, TimePoint, YearlySeries};

/// Per-year count of observations strictly above `threshold`.
///
/// Every year present in the input appears in the output, with 0 when nothing exceeded
/// the threshold, so yearly counts line up across variables.
pub fn count_extreme_days(points: &[TimePoint], threshold: f64) -> YearlySeries {
    let indicators: Vec<TimePoint> = points
        .iter()
        .map(|p| TimePoint::new(p.timestamp, if p.value > threshold { 1.0 } else { 0.0 }))
        .collect();
    aggregate(&indicators, Reducer::Sum)
}

/// Yearly maximum of a daily variable, restricted to `years`.
pub fn annual_maxima(points: &[TimePoint], years: &[i32]) -> YearlySeries {
    aggregate(points, Reducer::Max).retain_years(years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(year: i32, ordinal: u32, value: f64) -> TimePoint {
        TimePoint::new(NaiveDate::from_yo_opt(year, ordinal).unwrap(), value)
    }

    #[test]
    fn test_threshold_is_strict() {
        let points = vec![
            day(2001, 100, 40.0),
            day(2001, 101, 40.5),
            day(2001, 102, 41.0),
            day(2002, 150, 39.9),
        ];
        let counts = count_extreme_days(&points, 40.0);
        assert_eq!(counts.points(), &[(2001, 2.0), (2002, 0.0)]);
    }

    #[test]
    fn test_annual_maxima_for_survey_years() {
        let points = vec![
            day(1980, 10, 28.0),
            day(1980, 200, 35.5),
            day(1985, 200, 50.0),
            day(1990, 180, 33.0),
        ];
        let maxima = annual_maxima(&points, &[1980, 1990, 2000]);
        assert_eq!(maxima.points(), &[(1980, 35.5), (1990, 33.0)]);
    }
}
