use serde::Serialize;

use crate::error::{AnalysisError, AnalysisResult};
use crate::utils::maths_utils::min_max_indices;

/// One value per calendar year, strictly ascending by year.
///
/// The only ways in are [`YearlySeries::from_pairs`] (which sorts and rejects duplicate
/// years) and the aggregator, so the ordering invariant holds for every instance.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct YearlySeries {
    points: Vec<(i32, f64)>,
}

impl YearlySeries {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a series from `(year, value)` pairs in any order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (i32, f64)>) -> AnalysisResult<Self> {
        let mut points: Vec<(i32, f64)> = pairs.into_iter().collect();
        points.sort_by_key(|&(year, _)| year);
        if let Some(window) = points.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(AnalysisError::DuplicateYear { year: window[0].0 });
        }
        Ok(Self { points })
    }

    /// Caller guarantees `points` is strictly ascending by year.
    pub(crate) fn from_sorted_unchecked(points: Vec<(i32, f64)>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].0 < w[1].0));
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[(i32, f64)] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &(i32, f64)> {
        self.points.iter()
    }

    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|&(year, _)| year).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|&(_, value)| value).collect()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.points.first().map(|&(year, _)| year)
    }

    pub fn last_year(&self) -> Option<i32> {
        self.points.last().map(|&(year, _)| year)
    }

    pub fn value_at(&self, year: i32) -> Option<f64> {
        self.points
            .binary_search_by_key(&year, |&(y, _)| y)
            .ok()
            .map(|idx| self.points[idx].1)
    }

    /// Keep only the listed years (glacier survey years and the like).
    pub fn retain_years(&self, years: &[i32]) -> Self {
        Self {
            points: self
                .points
                .iter()
                .copied()
                .filter(|(year, _)| years.contains(year))
                .collect(),
        }
    }

    /// Entries with the largest and smallest value, in that order.
    pub fn extremes(&self) -> Option<((i32, f64), (i32, f64))> {
        if self.points.is_empty() {
            return None;
        }
        let (min_idx, max_idx) = min_max_indices(&self.values());
        Some((self.points[max_idx], self.points[min_idx]))
    }
}

impl<'a> IntoIterator for &'a YearlySeries {
    type Item = &'a (i32, f64);
    type IntoIter = std::slice::Iter<'a, (i32, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
