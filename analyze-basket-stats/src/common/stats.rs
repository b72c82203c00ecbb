//! Small numeric helpers shared across the analysis modules
//!
//! All helpers are total-order based and deterministic. Degenerate inputs
//! (empty slices, single elements) yield `0.0` rather than NaN so report
//! formatting never has to special-case them.

/// Arithmetic mean of the values, or `0.0` for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of the values (average of the two middle elements for an even
/// count), or `0.0` for an empty slice
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Most frequent value; ties are resolved to the smallest value
///
/// Returns `0.0` for an empty slice.
pub fn mode(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    // Equal values are adjacent after sorting; the longest run wins and a
    // strict comparison keeps the smallest value on ties.
    let mut best_value = sorted[0];
    let mut best_len = 0usize;
    let mut run_value = sorted[0];
    let mut run_len = 0usize;

    for &value in &sorted {
        if value == run_value {
            run_len += 1;
        } else {
            run_value = value;
            run_len = 1;
        }
        if run_len > best_len {
            best_len = run_len;
            best_value = run_value;
        }
    }
    best_value
}

/// Sample standard deviation (n - 1 denominator), or `0.0` when fewer than
/// two values are present
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Percentage share of `count` within `total`, or `0.0` when `total` is zero
pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[4.0]), 4.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[]), 0.0);
        assert_eq!(median(&[7.0]), 7.0);
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_mode_prefers_most_frequent() {
        assert_eq!(mode(&[1.0, 7.0, 7.0, 7.0, 30.0, 30.0]), 7.0);
    }

    #[test]
    fn test_mode_tie_resolves_to_smallest() {
        assert_eq!(mode(&[30.0, 7.0, 30.0, 7.0]), 7.0);
        assert_eq!(mode(&[5.0]), 5.0);
        assert_eq!(mode(&[]), 0.0);
    }

    #[test]
    fn test_sample_std_dev() {
        assert_eq!(sample_std_dev(&[]), 0.0);
        assert_eq!(sample_std_dev(&[42.0]), 0.0);
        // Hand-computed: values 2, 4, 4, 4, 5, 5, 7, 9 have sample variance 32/7
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let expected = (32.0f64 / 7.0).sqrt();
        assert!((sample_std_dev(&values) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(percent(4, 4), 100.0);
    }
}
