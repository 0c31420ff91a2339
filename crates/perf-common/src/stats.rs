//! Descriptive statistics over `f64` samples.
//!
//! Percentiles use linear interpolation between closest ranks, which is the
//! convention most analysis tooling defaults to, so thresholds line up with
//! what an analyst would compute by hand from the same column.

/// Returns the finite elements of `values`, preserving order.
pub fn finite_values(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Computes the `q`-th percentile (`0.0..=100.0`) of `values`.
///
/// Non-finite values are ignored. Returns `None` for an empty input or a
/// `q` outside the valid range.
///
/// # Examples
///
/// ```
/// use perf_common::percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile(&values, 50.0), Some(2.5));
/// assert_eq!(percentile(&values, 100.0), Some(4.0));
/// ```
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if !(0.0..=100.0).contains(&q) {
        return None;
    }
    let mut sorted = finite_values(values);
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Arithmetic mean of the finite elements, `None` when there are none.
pub fn mean(values: &[f64]) -> Option<f64> {
    let finite = finite_values(values);
    if finite.is_empty() {
        return None;
    }
    Some(finite.iter().sum::<f64>() / finite.len() as f64)
}

/// Population standard deviation (divisor `n`) of the finite elements.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let finite = finite_values(values);
    let center = mean(&finite)?;
    let variance =
        finite.iter().map(|v| (v - center).powi(2)).sum::<f64>() / finite.len() as f64;
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn percentile_interpolates_linearly() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(percentile(&values, 0.0), Some(10.0));
        assert_eq!(percentile(&values, 30.0), Some(22.0));
        assert_eq!(percentile(&values, 90.0), Some(46.0));
    }

    #[test]
    fn percentile_ignores_non_finite_and_order() {
        let values = [f64::NAN, 3.0, 1.0, f64::INFINITY, 2.0];
        assert_eq!(percentile(&values, 50.0), Some(2.0));
    }

    #[test]
    fn percentile_rejects_empty_and_out_of_range() {
        assert_eq!(percentile(&[], 50.0), None);
        assert_eq!(percentile(&[1.0], 101.0), None);
        assert_eq!(percentile(&[1.0], -0.5), None);
    }

    #[test]
    fn std_dev_uses_population_divisor() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), Some(5.0));
        assert_eq!(population_std_dev(&values), Some(2.0));
        assert_eq!(population_std_dev(&[f64::NAN]), None);
    }

    proptest! {
        #[test]
        fn percentile_stays_within_bounds(
            values in prop::collection::vec(-1e6f64..1e6, 1..64),
            q in 0.0f64..=100.0,
        ) {
            let p = percentile(&values, q).expect("non-empty finite input");
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(p >= min && p <= max);
        }
    }
}
