//! Shapiro-Wilk W test for normality.
//!
//! Implements Royston's (1995) approximation (algorithm AS R94), which
//! covers sample sizes from 3 to 5000. Larger samples are still computed,
//! but the p-value may be inaccurate and a warning is logged.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use statrs::distribution::{ContinuousCDF, Normal};
use tracing::warn;

use crate::error::ShapiroError;

/// Smallest sample the test is defined for.
pub const MIN_SAMPLE_SIZE: usize = 3;

/// Largest sample the p-value approximation is calibrated for.
pub const MAX_ACCURATE_SAMPLE_SIZE: usize = 5000;

const SMALL_RANGE: f64 = 1e-19;

// Polynomial coefficients from AS R94, lowest order first.
const G: [f64; 2] = [-2.273, 0.459];
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.5440, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];

/// Result of a Shapiro-Wilk test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilk {
    pub statistic: f64,
    pub p_value: f64,
}

/// Runs the Shapiro-Wilk test on `values`.
///
/// All values must be finite; filter NaN and infinities first. A sample
/// with zero range cannot be tested meaningfully and is reported as
/// `W = 1, p = 1`.
///
/// # Errors
///
/// Returns [`ShapiroError::InsufficientData`] for fewer than 3 values and
/// [`ShapiroError::NonFinite`] if any value is NaN or infinite.
pub fn shapiro_wilk(values: &[f64]) -> Result<ShapiroWilk, ShapiroError> {
    let n = values.len();
    if n < MIN_SAMPLE_SIZE {
        return Err(ShapiroError::InsufficientData(n));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ShapiroError::NonFinite);
    }
    if n > MAX_ACCURATE_SAMPLE_SIZE {
        warn!(n, "shapiro-wilk p-value may be inaccurate for n > 5000");
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let range = sorted[n - 1] - sorted[0];
    if range < SMALL_RANGE {
        warn!(n, "shapiro-wilk input has zero range");
        return Ok(ShapiroWilk {
            statistic: 1.0,
            p_value: 1.0,
        });
    }

    let normal = standard_normal()?;
    let a = coefficients(n, &normal);
    let statistic = w_statistic(&sorted, range, &a);
    let p_value = p_value(statistic, n, &normal);
    Ok(ShapiroWilk { statistic, p_value })
}

fn standard_normal() -> Result<Normal, ShapiroError> {
    Normal::new(0.0, 1.0).map_err(|e| ShapiroError::Distribution(e.to_string()))
}

/// Evaluates `c[0] + c[1] x + c[2] x^2 + ...`.
fn poly(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, coefficient| acc * x + coefficient)
}

/// Half of the antisymmetric weight vector, largest weight first.
fn coefficients(n: usize, normal: &Normal) -> Vec<f64> {
    let half = n / 2;
    if n == 3 {
        return vec![FRAC_1_SQRT_2];
    }

    let an = n as f64;
    let an25 = an + 0.25;
    let m: Vec<f64> = (1..=half)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / an25))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();

    let mut a = vec![0.0; half];
    let a1 = poly(&C1, rsn) - m[0] / ssumm2;
    a[0] = a1;
    let (first_scaled, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        a[1] = a2;
        let fac = ((summ2 - 2.0 * m[0].powi(2) - 2.0 * m[1].powi(2))
            / (1.0 - 2.0 * a1.powi(2) - 2.0 * a2.powi(2)))
        .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0].powi(2)) / (1.0 - 2.0 * a1.powi(2))).sqrt();
        (1, fac)
    };
    for i in first_scaled..half {
        a[i] = -m[i] / fac;
    }
    a
}

fn w_statistic(sorted: &[f64], range: f64, a: &[f64]) -> f64 {
    let n = sorted.len();
    // Scale by the range to keep the sums well conditioned.
    let scaled: Vec<f64> = sorted.iter().map(|v| v / range).collect();
    let mean = scaled.iter().sum::<f64>() / n as f64;
    let ssq: f64 = scaled.iter().map(|v| (v - mean).powi(2)).sum();
    let numerator: f64 = a
        .iter()
        .enumerate()
        .map(|(i, weight)| weight * (scaled[n - 1 - i] - scaled[i]))
        .sum();
    (numerator.powi(2) / ssq).min(1.0)
}

fn p_value(w: f64, n: usize, normal: &Normal) -> f64 {
    if w >= 1.0 {
        return 1.0;
    }
    if n == 3 {
        let p = 6.0 / PI * (w.sqrt().asin() - PI / 3.0);
        return p.clamp(0.0, 1.0);
    }

    let an = n as f64;
    let w1 = (1.0 - w).ln();
    let (y, mean, sd) = if n <= 11 {
        let gamma = poly(&G, an);
        if w1 >= gamma {
            return 1e-99;
        }
        (-(gamma - w1).ln(), poly(&C3, an), poly(&C4, an).exp())
    } else {
        let ln_n = an.ln();
        (w1, poly(&C5, ln_n), poly(&C6, ln_n).exp())
    };
    // Upper tail of N(mean, sd) at y.
    normal.cdf(-(y - mean) / sd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poly_evaluates_lowest_order_first() {
        assert_eq!(poly(&[1.0, 2.0, 3.0], 2.0), 17.0);
        assert_eq!(poly(&[4.0], 10.0), 4.0);
    }

    #[test]
    fn coefficients_are_normalized() {
        let normal = standard_normal().expect("standard normal");
        for n in [4usize, 5, 6, 11, 12, 50] {
            let a = coefficients(n, &normal);
            assert_eq!(a.len(), n / 2);
            let total: f64 = 2.0 * a.iter().map(|v| v * v).sum::<f64>();
            assert!((total - 1.0).abs() < 1e-6, "n={n}: sum of squares {total}");
            assert!(a.windows(2).all(|pair| pair[0] >= pair[1]), "n={n}: {a:?}");
        }
    }
}
