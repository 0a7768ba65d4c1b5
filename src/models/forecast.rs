use serde::Serialize;

use crate::domain::YearlySeries;

/// Fitted line `value = slope * year + intercept`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination of the fit over the observed years
    pub r_squared: f64,
}

impl TrendLine {
    pub fn predict(&self, year: i32) -> f64 {
        self.slope * year as f64 + self.intercept
    }
}

// ============================================================================
// ForecastResult: observed series plus the extrapolated trend
// ============================================================================

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastResult {
    pub observed: YearlySeries,
    pub trend: TrendLine,
    pub horizon_year: i32,
    /// One entry per year from the first observed year through the horizon
    pub predicted: Vec<(i32, f64)>,
}

impl ForecastResult {
    pub fn predicted_at(&self, year: i32) -> Option<f64> {
        let first = self.predicted.first()?.0;
        let offset = usize::try_from(year - first).ok()?;
        self.predicted.get(offset).map(|&(_, value)| value)
    }

    pub fn horizon_value(&self) -> Option<f64> {
        self.predicted_at(self.horizon_year)
    }

    /// Predictions strictly after the last observed year.
    pub fn future(&self) -> &[(i32, f64)] {
        let last = self.observed.last_year().unwrap_or(i32::MIN);
        let split = self.predicted.partition_point(|&(year, _)| year <= last);
        &self.predicted[split..]
    }
}
