use itertools::{EitherOrBoth, Itertools};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::config::ANALYSIS;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::YearlySeries;
use crate::models::{CorrelationResult, UndefinedReason};
use crate::utils::maths_utils::{is_constant, sample_covariance, sample_variance};

/// Inner join of two series on year: `(year, a_value, b_value)` for years present in both.
pub fn merge_on_year(a: &YearlySeries, b: &YearlySeries) -> Vec<(i32, f64, f64)> {
    // Both sides are sorted by year, so a single merge pass is enough
    a.iter()
        .merge_join_by(b.iter(), |left, right| left.0.cmp(&right.0))
        .filter_map(|entry| match entry {
            EitherOrBoth::Both(&(year, x), &(_, y)) => Some((year, x, y)),
            _ => None,
        })
        .collect()
}

/// Pearson correlation of the year-matched values of `a` and `b`.
///
/// Fewer than two shared years, or a constant side, gives `Undefined` rather than an error.
pub fn correlate(a: &YearlySeries, b: &YearlySeries) -> CorrelationResult {
    pearson(&merge_on_year(a, b), false)
}

/// As [`correlate`], also reporting the two-sided p-value for `r = 0`.
pub fn correlate_with_p_value(a: &YearlySeries, b: &YearlySeries) -> CorrelationResult {
    pearson(&merge_on_year(a, b), true)
}

/// Pearson r over already-merged rows.
pub fn pearson(rows: &[(i32, f64, f64)], with_p_value: bool) -> CorrelationResult {
    let paired = rows.len();

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_correlation_pairs {
        log::debug!(
            "correlating {} paired years: {}",
            paired,
            rows.iter().map(|(year, _, _)| year).join(", ")
        );
    }

    if paired < ANALYSIS.correlation.min_paired_points {
        return CorrelationResult::Undefined(UndefinedReason::TooFewPairs { paired });
    }

    let xs: Vec<f64> = rows.iter().map(|&(_, x, _)| x).collect();
    let ys: Vec<f64> = rows.iter().map(|&(_, _, y)| y).collect();

    // Checked on the values: a constant like 0.1 leaves a rounding-sized variance
    if is_constant(&xs) || is_constant(&ys) {
        return CorrelationResult::Undefined(UndefinedReason::ZeroVariance);
    }

    let (Some(var_x), Some(var_y), Some(cov)) = (
        sample_variance(&xs),
        sample_variance(&ys),
        sample_covariance(&xs, &ys),
    ) else {
        return CorrelationResult::Undefined(UndefinedReason::TooFewPairs { paired });
    };

    if var_x <= 0.0 || var_y <= 0.0 {
        return CorrelationResult::Undefined(UndefinedReason::ZeroVariance);
    }

    // Rounding can push |r| a hair past 1
    let r = (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0);
    let p_value = if with_p_value {
        two_sided_p_value(r, paired)
    } else {
        None
    };

    CorrelationResult::Defined { r, paired, p_value }
}

/// Two-sided p-value of `H0: r = 0` from Student's t with `n - 2` degrees of freedom.
/// `None` when there are no degrees of freedom left (n = 2).
pub fn two_sided_p_value(r: f64, n: usize) -> Option<f64> {
    if n <= 2 {
        return None;
    }
    if r.abs() >= 1.0 {
        return Some(0.0);
    }

    let df = (n - 2) as f64;
    let t_stat = r * (df / (1.0 - r * r)).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(t_dist) => Some((2.0 * (1.0 - t_dist.cdf(t_stat.abs()))).clamp(0.0, 1.0)),
        Err(e) => {
            log::warn!("Failed to create t-distribution with df {}: {}", df, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn series(pairs: &[(i32, f64)]) -> YearlySeries {
        YearlySeries::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_identical_series() {
        let s = series(&[(2000, 1.0), (2001, 2.0), (2002, 3.0), (2003, 4.0)]);
        let r = correlate(&s, &s).r().unwrap();
        assert_abs_diff_eq!(r, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_perfect_negative() {
        let a = series(&[(2000, 1.0), (2001, 2.0), (2002, 3.0)]);
        let b = series(&[(2000, 3.0), (2001, 2.0), (2002, 1.0)]);
        let r = correlate(&a, &b).r().unwrap();
        assert_abs_diff_eq!(r, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_single_overlap_is_undefined() {
        let a = series(&[(1980, 5.0), (1990, 4.0), (2000, 3.0)]);
        let b = series(&[(1990, 30.1), (1991, 30.5), (1992, 29.9)]);
        assert_eq!(
            correlate(&a, &b),
            CorrelationResult::Undefined(UndefinedReason::TooFewPairs { paired: 1 })
        );
        assert_eq!(
            correlate(&a, &YearlySeries::empty()),
            CorrelationResult::Undefined(UndefinedReason::TooFewPairs { paired: 0 })
        );
    }

    #[test]
    fn test_zero_variance_is_undefined() {
        let a = series(&[(2000, 7.0), (2001, 7.0), (2002, 7.0)]);
        let b = series(&[(2000, 1.0), (2001, 2.0), (2002, 4.0)]);
        assert_eq!(
            correlate(&a, &b),
            CorrelationResult::Undefined(UndefinedReason::ZeroVariance)
        );
    }

    #[test]
    fn test_inexact_constant_is_undefined() {
        let b = series(&[(2000, 0.0), (2001, 1.0), (2002, 2.0)]);
        for value in [0.1, 0.7, 12.7] {
            let a = series(&[(2000, value), (2001, value), (2002, value)]);
            assert_eq!(
                correlate(&a, &b),
                CorrelationResult::Undefined(UndefinedReason::ZeroVariance)
            );
        }

        let years: Vec<i32> = (2000..2010).collect();
        let flat = YearlySeries::from_pairs(years.iter().map(|&y| (y, 25.3))).unwrap();
        let rising = YearlySeries::from_pairs(years.iter().map(|&y| (y, y as f64))).unwrap();
        let result = correlate_with_p_value(&rising, &flat);
        assert_eq!(
            result,
            CorrelationResult::Undefined(UndefinedReason::ZeroVariance)
        );
        assert_eq!(result.p_value(), None);
    }

    #[test]
    fn test_only_shared_years_are_used() {
        // Extra years on either side must not influence r
        let a = series(&[(1999, 100.0), (2000, 1.0), (2001, 2.0), (2002, 3.0)]);
        let b = series(&[(2000, 2.0), (2001, 4.0), (2002, 6.0), (2003, -50.0)]);
        let merged = merge_on_year(&a, &b);
        assert_eq!(merged, vec![(2000, 1.0, 2.0), (2001, 2.0, 4.0), (2002, 3.0, 6.0)]);
        match correlate(&a, &b) {
            CorrelationResult::Defined { r, paired, p_value } => {
                assert_abs_diff_eq!(r, 1.0, epsilon = 1e-9);
                assert_eq!(paired, 3);
                assert_eq!(p_value, None);
            }
            other => panic!("expected a defined correlation, got {:?}", other),
        }
    }

    #[test]
    fn test_known_value_and_p_value() {
        // x = 1..5, y = [2, 4, 5, 4, 5]: r = 0.7745966692414834
        let a = series(&[(1, 1.0), (2, 2.0), (3, 3.0), (4, 4.0), (5, 5.0)]);
        let b = series(&[(1, 2.0), (2, 4.0), (3, 5.0), (4, 4.0), (5, 5.0)]);
        let result = correlate_with_p_value(&a, &b);
        assert_abs_diff_eq!(result.r().unwrap(), 0.7745966692414834, epsilon = 1e-12);
        // t = 2.1213 with 3 df, two-sided p ~= 0.1240
        assert_abs_diff_eq!(result.p_value().unwrap(), 0.1240, epsilon = 1e-3);
    }

    #[test]
    fn test_p_value_edges() {
        assert_eq!(two_sided_p_value(0.5, 2), None);
        assert_eq!(two_sided_p_value(1.0, 10), Some(0.0));
        assert_abs_diff_eq!(two_sided_p_value(0.0, 10).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_repeatable() {
        let a = series(&[(2000, 1.5), (2001, 2.7), (2002, 2.1), (2003, 3.9)]);
        let b = series(&[(2000, 9.0), (2001, 7.5), (2002, 8.1), (2003, 6.0)]);
        let first = correlate_with_p_value(&a, &b);
        let second = correlate_with_p_value(&a, &b);
        assert_eq!(first, second);
        assert_eq!(first.r().unwrap().to_bits(), second.r().unwrap().to_bits());
    }
}
