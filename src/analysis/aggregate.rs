use std::collections::BTreeMap;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{Reducer, TimePoint, YearlySeries};

/// Collapse dated observations into one value per calendar year.
///
/// Groups are keyed by `timestamp.year()` and emitted in ascending year order.
/// An empty input yields an empty series.
pub fn aggregate(points: &[TimePoint], reducer: Reducer) -> YearlySeries {
    let pairs: Vec<(i32, f64)> = points.iter().map(|p| (p.year(), p.value)).collect();
    aggregate_years(&pairs, reducer)
}

/// Same grouping rule for observations that already carry a year.
pub fn aggregate_years(pairs: &[(i32, f64)], reducer: Reducer) -> YearlySeries {
    // BTreeMap keeps the groups sorted by year
    let mut groups: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for &(year, value) in pairs {
        groups.entry(year).or_default().push(value);
    }

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_aggregation {
        for (year, values) in &groups {
            log::debug!("aggregate[{}] {}: {} values", reducer, year, values.len());
        }
    }

    let points = groups
        .into_iter()
        .map(|(year, values)| (year, reducer.apply(&values)))
        .collect();
    YearlySeries::from_sorted_unchecked(points)
}
