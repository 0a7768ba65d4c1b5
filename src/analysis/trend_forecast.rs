//! Linear trend forecaster
//!
//! Fits `value = slope * year + intercept` by ordinary least squares over a
//! [`YearlySeries`] and extrapolates it year by year up to a horizon.
//!
//! ## When to Use
//!
//! - Yearly climate means, crop production totals and similar slowly drifting series
//! - A quick, interpretable "where is this heading" line
//!
//! Non-linear trends are not modelled.

use crate::config::ANALYSIS;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::YearlySeries;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{ForecastResult, TrendLine};
use crate::utils::maths_utils::is_constant;

/// Fit the OLS line of value against year.
///
/// Needs at least two distinct years. With exactly two the fit passes through both points.
pub fn fit_trend(series: &YearlySeries) -> AnalysisResult<TrendLine> {
    let required = ANALYSIS.forecast.min_distinct_years;
    if series.len() < required {
        return Err(AnalysisError::InsufficientData {
            required,
            actual: series.len(),
        });
    }

    let n = series.len() as f64;
    let mean_year = series.iter().map(|&(year, _)| year as f64).sum::<f64>() / n;
    let mean_value = series.iter().map(|&(_, value)| value).sum::<f64>() / n;

    // Centre on the mean year: raw years around 2000 squared lose precision
    let (sxx, sxy) = series
        .iter()
        .fold((0.0, 0.0), |(sxx, sxy), &(year, value)| {
            let dx = year as f64 - mean_year;
            (sxx + dx * dx, sxy + dx * (value - mean_value))
        });

    // Distinct years guarantee sxx > 0
    let slope = sxy / sxx;
    let intercept = mean_value - slope * mean_year;

    let ss_tot: f64 = series
        .iter()
        .map(|&(_, value)| (value - mean_value).powi(2))
        .sum();
    let ss_res: f64 = series
        .iter()
        .map(|&(year, value)| (value - (slope * year as f64 + intercept)).powi(2))
        .sum();
    // A flat series is fitted exactly by a flat line
    let r_squared = if is_constant(&series.values()) || ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_trend_fit {
        log::debug!(
            "trend fit over {} years: slope {:.6}, intercept {:.4}, r² {:.4}",
            series.len(),
            slope,
            intercept,
            r_squared
        );
    }

    Ok(TrendLine {
        slope,
        intercept,
        r_squared,
    })
}

/// Fit a trend and predict every year from the first observed year through `horizon_year`.
///
/// A horizon before the last observed year is allowed; predictions then stop at the
/// horizon. A horizon before the first observed year is an error.
pub fn forecast(series: &YearlySeries, horizon_year: i32) -> AnalysisResult<ForecastResult> {
    let trend = fit_trend(series)?;

    // fit_trend guarantees at least two entries
    let first_year = series.first_year().unwrap_or(horizon_year);
    if horizon_year < first_year {
        return Err(AnalysisError::InvalidHorizon {
            horizon: horizon_year,
            first_year,
        });
    }

    let predicted = (first_year..=horizon_year)
        .map(|year| (year, trend.predict(year)))
        .collect();

    Ok(ForecastResult {
        observed: series.clone(),
        trend,
        horizon_year,
        predicted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn series(pairs: &[(i32, f64)]) -> YearlySeries {
        YearlySeries::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_two_point_exact_extrapolation() {
        let result = forecast(&series(&[(2000, 10.0), (2010, 20.0)]), 2020).unwrap();
        assert_abs_diff_eq!(result.trend.slope, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.trend.intercept, -1990.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.horizon_value().unwrap(), 30.0, epsilon = 1e-9);
        assert_eq!(result.predicted.len(), 21);
        assert_eq!(result.predicted.first().unwrap().0, 2000);
        assert_eq!(result.predicted.last().unwrap().0, 2020);
    }

    #[test]
    fn test_noisy_fit_recovers_slope() {
        // y = 0.03 * year - 45 with alternating +/- 0.05 noise
        let pairs: Vec<(i32, f64)> = (1980..2020)
            .map(|y| {
                let noise = if y % 2 == 0 { 0.05 } else { -0.05 };
                (y, 0.03 * y as f64 - 45.0 + noise)
            })
            .collect();
        let trend = fit_trend(&series(&pairs)).unwrap();
        assert_abs_diff_eq!(trend.slope, 0.03, epsilon = 1e-3);
        assert!(trend.r_squared > 0.9);
    }

    #[test]
    fn test_r_squared_ignores_scale() {
        let shape = [1.0, 3.0, 2.0, 5.0, 1.5];
        let scaled = |factor: f64| {
            series(
                &shape
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| (2000 + i as i32, v * factor))
                    .collect::<Vec<_>>(),
            )
        };
        let unit = fit_trend(&scaled(1.0)).unwrap();
        let tiny = fit_trend(&scaled(1e-7)).unwrap();
        assert_abs_diff_eq!(unit.r_squared, 0.09, epsilon = 1e-9);
        assert_abs_diff_eq!(tiny.r_squared, unit.r_squared, epsilon = 1e-9);

        let flat = fit_trend(&series(&[(2000, 0.1), (2001, 0.1), (2002, 0.1)])).unwrap();
        assert_eq!(flat.r_squared, 1.0);
    }

    #[test]
    fn test_single_point_is_insufficient() {
        let err = forecast(&series(&[(2005, 1.0)]), 2030).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
        assert!(matches!(
            forecast(&YearlySeries::empty(), 2030),
            Err(AnalysisError::InsufficientData { actual: 0, .. })
        ));
    }

    #[test]
    fn test_horizon_before_first_year() {
        let err = forecast(&series(&[(2000, 1.0), (2001, 2.0)]), 1999).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InvalidHorizon {
                horizon: 1999,
                first_year: 2000
            }
        );
    }

    #[test]
    fn test_horizon_inside_observed_range() {
        let s = series(&[(2000, 1.0), (2005, 2.0), (2010, 3.0)]);
        let result = forecast(&s, 2004).unwrap();
        assert_eq!(result.predicted.len(), 5);
        assert_eq!(result.predicted.last().unwrap().0, 2004);
        assert!(result.future().is_empty());
    }

    #[test]
    fn test_future_and_lookup() {
        let s = series(&[(2000, 0.0), (2001, 1.0), (2002, 2.0)]);
        let result = forecast(&s, 2005).unwrap();
        let future: Vec<i32> = result.future().iter().map(|&(y, _)| y).collect();
        assert_eq!(future, vec![2003, 2004, 2005]);
        assert_abs_diff_eq!(result.predicted_at(2004).unwrap(), 4.0, epsilon = 1e-9);
        assert_eq!(result.predicted_at(1999), None);
        assert_eq!(result.predicted_at(2006), None);
    }

    #[test]
    fn test_repeatable() {
        let s = series(&[(1990, 3.2), (1995, 4.1), (2003, 3.9), (2011, 5.5)]);
        let a = forecast(&s, 2040).unwrap();
        let b = forecast(&s, 2040).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.trend.slope.to_bits(), b.trend.slope.to_bits());
    }
}
