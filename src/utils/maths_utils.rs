use argminmax::ArgMinMax;

/// Arithmetic mean. Returns NaN for an empty slice (callers never group empty years).
pub fn mean(vec: &[f64]) -> f64 {
    if vec.is_empty() {
        return f64::NAN;
    }
    vec.iter().sum::<f64>() / vec.len() as f64
}

/// Largest value of a non-empty slice. NaNs are skipped.
pub fn get_max(vec: &[f64]) -> f64 {
    vec[vec.argmax()]
}

/// Indices of the smallest and largest values of a non-empty slice.
pub fn min_max_indices(vec: &[f64]) -> (usize, usize) {
    vec.argminmax()
}

/// True when every value equals the first. Empty slices count as constant.
pub fn is_constant(vec: &[f64]) -> bool {
    vec.iter().all(|&x| x == vec[0])
}

/// Sample variance (n - 1 denominator). Needs at least two values.
pub fn sample_variance(vec: &[f64]) -> Option<f64> {
    if vec.len() < 2 {
        return None;
    }
    let m = mean(vec);
    let sum_sq = vec.iter().map(|x| (x - m).powi(2)).sum::<f64>();
    Some(sum_sq / (vec.len() - 1) as f64)
}

/// Sample covariance (n - 1 denominator) of two equally long slices.
pub fn sample_covariance(xs: &[f64], ys: &[f64]) -> Option<f64> {
    debug_assert_eq!(xs.len(), ys.len());
    if xs.len() < 2 || xs.len() != ys.len() {
        return None;
    }
    let mx = mean(xs);
    let my = mean(ys);
    let sum = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mx) * (y - my))
        .sum::<f64>();
    Some(sum / (xs.len() - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mean_and_extrema() {
        let data = [3.0, 9.0, -1.0, 4.0];
        assert_abs_diff_eq!(mean(&data), 3.75);
        assert_eq!(get_max(&data), 9.0);
        assert_eq!(min_max_indices(&data), (2, 1));
    }

    #[test]
    fn test_sample_statistics() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        // sum of squared deviations = 5.0, n - 1 = 3
        assert_abs_diff_eq!(sample_variance(&xs).unwrap(), 5.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sample_covariance(&xs, &ys).unwrap(), 10.0 / 3.0, epsilon = 1e-12);
        assert!(sample_variance(&[1.0]).is_none());
    }

    #[test]
    fn test_is_constant() {
        assert!(is_constant(&[0.1, 0.1, 0.1]));
        assert!(is_constant(&[]));
        assert!(!is_constant(&[0.1, 0.1, 0.1000001]));
    }
}
