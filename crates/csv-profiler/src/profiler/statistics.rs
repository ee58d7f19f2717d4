//! Statistical analysis functions for column profiling.
//!
//! Numeric helpers work on values already sorted ascending (with
//! `f64::total_cmp`), which every caller in this crate guarantees.

use crate::types::{NumericMetrics, TextMetrics, TopValue};
use std::collections::HashMap;

/// Compute the numeric metric block from ascending-sorted values.
pub(crate) fn summarize_sorted(sorted: &[f64], outlier_multiplier: f64) -> NumericMetrics {
    let n = sorted.len();
    if n == 0 {
        return NumericMetrics::default();
    }

    let mean = arithmetic_mean(sorted);
    let mode = mode_sorted(sorted);
    let q1 = quantile_sorted(sorted, 0.25);
    let q3 = quantile_sorted(sorted, 0.75);
    // The spread of two finite quartiles can still exceed the f64 range.
    let iqr = match (q1, q3) {
        (Some(q1), Some(q3)) => Some(q3 - q1).filter(|iqr| iqr.is_finite()),
        _ => None,
    };

    let outlier_count = match (q1, q3, iqr) {
        (Some(q1), Some(q3), Some(iqr)) if n >= 4 => {
            Some(count_outliers(sorted, q1, q3, iqr, outlier_multiplier))
        }
        _ => None,
    };

    NumericMetrics {
        min: sorted.first().copied(),
        max: sorted.last().copied(),
        mean: Some(mean),
        median: median_sorted(sorted),
        mode: mode.map(|(value, _)| value),
        mode_count: mode.map(|(_, count)| count),
        std_dev: Some(population_std(sorted, mean)).filter(|std| std.is_finite()),
        q1,
        q3,
        iqr,
        outlier_count,
    }
}

/// Arithmetic mean of a non-empty slice.
///
/// Falls back to summing in units of the largest magnitude when the plain sum
/// overflows, so the result is finite for any finite input.
pub(crate) fn arithmetic_mean(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let sum = values.iter().sum::<f64>();
    if sum.is_finite() {
        return sum / n;
    }

    let scale = max_abs(values);
    values.iter().map(|v| v / scale).sum::<f64>() / n * scale
}

/// Largest absolute value, 0 for an empty slice.
fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

/// Median of sorted values; the mean of the two middle values for even `n`.
pub(crate) fn median_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 1 {
        Some(sorted[(n - 1) / 2])
    } else {
        Some(sorted[n / 2 - 1].midpoint(sorted[n / 2]))
    }
}

/// Linear-interpolation quantile at rank `p * (n - 1)`.
pub(crate) fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    let rank = p * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    if weight == 0.0 || lower == upper {
        return Some(sorted[lower]);
    }

    // Weighted sum rather than `lo + (hi - lo) * w`: the difference can overflow.
    Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
}

/// Most frequent value and its count; ties go to the smallest value.
pub(crate) fn mode_sorted(sorted: &[f64]) -> Option<(f64, usize)> {
    let mut best: Option<(f64, usize)> = None;
    let mut i = 0;

    while i < sorted.len() {
        let value = sorted[i];
        let run = sorted[i..].iter().take_while(|&&v| v == value).count();

        // Strictly greater keeps the earlier (smaller) value on ties.
        if best.is_none_or(|(_, count)| run > count) {
            best = Some((value, run));
        }
        i += run;
    }

    best
}

/// Population standard deviation (divides by `n`).
pub(crate) fn population_std(values: &[f64], mean: f64) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }

    let n = values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    if variance.is_finite() {
        return variance.sqrt();
    }

    // Squared deviations overflowed; work in units of the largest magnitude.
    let scale = max_abs(values);
    let scaled = values
        .iter()
        .map(|v| (v / scale - mean / scale).powi(2))
        .sum::<f64>()
        / n;
    scaled.sqrt() * scale
}

/// Count values outside `[q1 - k*iqr, q3 + k*iqr]`.
pub(crate) fn count_outliers(
    values: &[f64],
    q1: f64,
    q3: f64,
    iqr: f64,
    multiplier: f64,
) -> usize {
    let (lower, upper) = outlier_fences(q1, q3, iqr, multiplier);
    values.iter().filter(|&&v| v < lower || v > upper).count()
}

/// Lower and upper outlier fences.
pub(crate) fn outlier_fences(q1: f64, q3: f64, iqr: f64, multiplier: f64) -> (f64, f64) {
    (q1 - multiplier * iqr, q3 + multiplier * iqr)
}

/// Number of numerically distinct values (so `-0.0` and `0.0` count once).
pub(crate) fn distinct_count_sorted(sorted: &[f64]) -> usize {
    if sorted.is_empty() {
        return 0;
    }
    1 + sorted.windows(2).filter(|pair| pair[0] != pair[1]).count()
}

/// Top `k` values of a text column plus its distinct count.
pub(crate) fn summarize_text<'a>(
    values: impl IntoIterator<Item = &'a str>,
    k: usize,
) -> (TextMetrics, usize) {
    // value -> (count, first-seen position)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, position)).0 += 1;
    }

    let unique_count = counts.len();
    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.0.cmp(&a.1.0).then(a.1.1.cmp(&b.1.1)));

    let top_values = ranked
        .into_iter()
        .take(k)
        .map(|(value, (count, _))| TopValue {
            value: value.to_string(),
            count,
        })
        .collect();

    (TextMetrics { top_values }, unique_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(values: &[f64]) -> Vec<f64> {
        let mut v = values.to_vec();
        v.sort_by(f64::total_cmp);
        v
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn close(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1e-12
    }

    // ==================== quantile tests ====================

    #[test]
    fn test_quartiles_even_length() {
        let v = sorted(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert!(approx(quantile_sorted(&v, 0.25).unwrap(), 2.75));
        assert!(approx(quantile_sorted(&v, 0.75).unwrap(), 6.25));
    }

    #[test]
    fn test_quantile_exact_rank() {
        // n = 5: rank for Q1 is exactly 1.0
        let v = sorted(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        assert_eq!(quantile_sorted(&v, 0.25), Some(20.0));
        assert_eq!(quantile_sorted(&v, 0.75), Some(40.0));
    }

    #[test]
    fn test_quantile_single_and_empty() {
        assert_eq!(quantile_sorted(&[7.0], 0.25), Some(7.0));
        assert_eq!(quantile_sorted(&[], 0.25), None);
    }

    // ==================== median tests ====================

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median_sorted(&[1.0, 3.0, 9.0]), Some(3.0));
        assert_eq!(median_sorted(&[1.0, 3.0, 5.0, 9.0]), Some(4.0));
        assert_eq!(median_sorted(&[]), None);
    }

    // ==================== mode tests ====================

    #[test]
    fn test_mode_highest_frequency() {
        let v = sorted(&[3.0, 1.0, 3.0, 2.0, 3.0]);
        assert_eq!(mode_sorted(&v), Some((3.0, 3)));
    }

    #[test]
    fn test_mode_tie_breaks_to_smallest() {
        let v = sorted(&[5.0, 2.0, 5.0, 2.0, 9.0]);
        assert_eq!(mode_sorted(&v), Some((2.0, 2)));
    }

    #[test]
    fn test_mode_all_distinct_is_smallest() {
        let v = sorted(&[4.0, -1.0, 8.0]);
        assert_eq!(mode_sorted(&v), Some((-1.0, 1)));
    }

    #[test]
    fn test_mode_empty() {
        assert_eq!(mode_sorted(&[]), None);
    }

    // ==================== std tests ====================

    #[test]
    fn test_population_std() {
        // Mean = 5, squared deviations sum = 32, / 8 = 4
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(approx(population_std(&v, 5.0), 2.0));
    }

    #[test]
    fn test_population_std_single_value_is_zero() {
        assert_eq!(population_std(&[42.0], 42.0), 0.0);
    }

    // ==================== outlier tests ====================

    #[test]
    fn test_count_outliers_single_high_value() {
        let v = sorted(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
        let q1 = quantile_sorted(&v, 0.25).unwrap();
        let q3 = quantile_sorted(&v, 0.75).unwrap();
        assert!(approx(q1, 2.25));
        assert!(approx(q3, 4.75));
        assert_eq!(count_outliers(&v, q1, q3, q3 - q1, 1.5), 1);
    }

    #[test]
    fn test_count_outliers_zero_iqr() {
        let v = sorted(&[5.0, 5.0, 5.0, 5.0, 5.0]);
        assert_eq!(count_outliers(&v, 5.0, 5.0, 0.0, 1.5), 0);
    }

    // ==================== distinct tests ====================

    #[test]
    fn test_distinct_count_numeric_equality() {
        let v = sorted(&[1.0, 1.0, 2.0, -0.0, 0.0]);
        assert_eq!(distinct_count_sorted(&v), 3);
        assert_eq!(distinct_count_sorted(&[]), 0);
    }

    // ==================== summarize_sorted tests ====================

    #[test]
    fn test_summarize_sorted_full_block() {
        let v = sorted(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let metrics = summarize_sorted(&v, 1.5);

        assert_eq!(metrics.min, Some(1.0));
        assert_eq!(metrics.max, Some(8.0));
        assert_eq!(metrics.mean, Some(4.5));
        assert_eq!(metrics.median, Some(4.5));
        assert_eq!(metrics.mode, Some(1.0));
        assert_eq!(metrics.mode_count, Some(1));
        assert!(approx(metrics.iqr.unwrap(), 3.5));
        assert_eq!(metrics.outlier_count, Some(0));
    }

    #[test]
    fn test_summarize_sorted_empty_is_all_undefined() {
        assert_eq!(summarize_sorted(&[], 1.5), NumericMetrics::default());
    }

    #[test]
    fn test_summarize_sorted_small_sample_skips_outliers() {
        let metrics = summarize_sorted(&[1.0, 2.0, 100.0], 1.5);
        assert_eq!(metrics.outlier_count, None);
        assert!(metrics.q1.is_some());
    }

    #[test]
    fn test_summarize_sorted_huge_values_stay_finite() {
        let metrics = summarize_sorted(&[1e308, 1.5e308], 1.5);

        for value in [
            metrics.mean,
            metrics.median,
            metrics.std_dev,
            metrics.q1,
            metrics.q3,
            metrics.iqr,
        ] {
            assert!(value.is_some_and(f64::is_finite), "{:?}", metrics);
        }
        assert!(close(metrics.mean.unwrap(), 1.25e308));
        assert!(close(metrics.median.unwrap(), 1.25e308));
        assert!(close(metrics.std_dev.unwrap(), 0.25e308));
        assert!(close(metrics.q1.unwrap(), 1.125e308));
        assert!(close(metrics.q3.unwrap(), 1.375e308));
    }

    #[test]
    fn test_population_std_wide_range_stays_finite() {
        let v = [0.0, 1e200];
        let std = population_std(&v, arithmetic_mean(&v));
        assert!(std.is_finite());
        assert!(close(std, 5e199));
    }

    #[test]
    fn test_mean_of_mixed_sign_extremes() {
        assert_eq!(arithmetic_mean(&[-1.7e308, 1.7e308]), 0.0);
        assert!(close(arithmetic_mean(&[1.7e308, 1.7e308, 1.7e308]), 1.7e308));
    }

    #[test]
    fn test_iqr_beyond_range_is_undefined() {
        let metrics = summarize_sorted(&[-1.7e308, -1.7e308, 1.7e308, 1.7e308], 1.5);
        assert_eq!(metrics.iqr, None);
        assert_eq!(metrics.outlier_count, None);
        assert!(metrics.q1.is_some_and(f64::is_finite));
    }

    #[test]
    fn test_summarize_sorted_single_value() {
        let metrics = summarize_sorted(&[3.0], 1.5);
        assert_eq!(metrics.std_dev, Some(0.0));
        assert_eq!(metrics.median, Some(3.0));
        assert_eq!(metrics.q1, Some(3.0));
        assert_eq!(metrics.q3, Some(3.0));
    }

    // ==================== summarize_text tests ====================

    #[test]
    fn test_summarize_text_orders_by_frequency() {
        let values = ["b", "a", "a", "c", "a", "b"];
        let (metrics, unique) = summarize_text(values, 5);

        assert_eq!(unique, 3);
        let ranked: Vec<(&str, usize)> = metrics
            .top_values
            .iter()
            .map(|top| (top.value.as_str(), top.count))
            .collect();
        assert_eq!(ranked, vec![("a", 3), ("b", 2), ("c", 1)]);
    }

    #[test]
    fn test_summarize_text_ties_keep_first_seen_order() {
        let values = ["zeta", "alpha", "mid", "alpha", "zeta", "mid"];
        let (metrics, _) = summarize_text(values, 5);

        let order: Vec<&str> = metrics.top_values.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(order, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_summarize_text_truncates_to_k() {
        let values = ["a", "b", "c", "d", "e", "f", "g"];
        let (metrics, unique) = summarize_text(values, 5);

        assert_eq!(unique, 7);
        assert_eq!(metrics.top_values.len(), 5);
        assert_eq!(metrics.top_values[4].value, "e");
    }

    #[test]
    fn test_summarize_text_is_case_and_space_sensitive() {
        let values = ["Yes", "yes", "yes "];
        let (_, unique) = summarize_text(values, 5);
        assert_eq!(unique, 3);
    }

    #[test]
    fn test_summarize_text_empty() {
        let (metrics, unique) = summarize_text(std::iter::empty(), 5);
        assert_eq!(unique, 0);
        assert!(metrics.top_values.is_empty());
    }
}
