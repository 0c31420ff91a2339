//! Shapiro-Wilk reference values.

use perf_transform::{ShapiroError, shapiro_wilk};
use statrs::distribution::{ContinuousCDF, Normal};

#[test]
fn three_points_use_exact_distribution() {
    let evenly_spaced = shapiro_wilk(&[1.0, 2.0, 3.0]).expect("n = 3");
    assert!((evenly_spaced.statistic - 1.0).abs() < 1e-9);
    assert!((evenly_spaced.p_value - 1.0).abs() < 1e-9);

    let skewed = shapiro_wilk(&[1.0, 2.0, 4.0]).expect("n = 3");
    assert!((skewed.statistic - 27.0 / 28.0).abs() < 1e-6);
    assert!((skewed.p_value - 0.6369).abs() < 1e-3, "p = {}", skewed.p_value);
}

#[test]
fn uniform_grid_of_ten() {
    let sample: Vec<f64> = (1..=10).map(f64::from).collect();
    let result = shapiro_wilk(&sample).expect("n = 10");
    assert!((result.statistic - 0.9702).abs() < 1e-3, "W = {}", result.statistic);
    assert!((result.p_value - 0.8924).abs() < 5e-3, "p = {}", result.p_value);
}

#[test]
fn input_order_does_not_matter() {
    let ordered: Vec<f64> = (1..=10).map(f64::from).collect();
    let shuffled = [7.0, 2.0, 10.0, 1.0, 5.0, 9.0, 3.0, 8.0, 4.0, 6.0];
    assert_eq!(
        shapiro_wilk(&ordered).expect("ordered"),
        shapiro_wilk(&shuffled).expect("shuffled")
    );
}

#[test]
fn normal_scores_look_normal() {
    let normal = Normal::new(50.0, 8.0).expect("normal");
    let n = 40;
    let sample: Vec<f64> = (1..=n)
        .map(|i| normal.inverse_cdf((f64::from(i) - 0.375) / (f64::from(n) + 0.25)))
        .collect();
    let result = shapiro_wilk(&sample).expect("n = 40");
    assert!(result.statistic > 0.98, "W = {}", result.statistic);
    assert!(result.p_value > 0.5, "p = {}", result.p_value);
}

#[test]
fn heavy_skew_is_rejected() {
    let sample = [1.0, 1.0, 1.0, 2.0, 2.0, 3.0, 4.0, 6.0, 10.0, 20.0, 50.0, 120.0];
    let result = shapiro_wilk(&sample).expect("n = 12");
    assert!(result.statistic < 0.8, "W = {}", result.statistic);
    assert!(result.p_value < 0.05, "p = {}", result.p_value);
}

#[test]
fn constant_sample_reports_perfect_fit() {
    let result = shapiro_wilk(&[7.0; 5]).expect("constant");
    assert_eq!(result.statistic, 1.0);
    assert_eq!(result.p_value, 1.0);
}

#[test]
fn rejects_small_and_non_finite_input() {
    assert_eq!(shapiro_wilk(&[1.0, 2.0]), Err(ShapiroError::InsufficientData(2)));
    assert_eq!(shapiro_wilk(&[]), Err(ShapiroError::InsufficientData(0)));
    assert_eq!(
        shapiro_wilk(&[1.0, f64::NAN, 2.0, 3.0]),
        Err(ShapiroError::NonFinite)
    );
}

#[test]
fn results_stay_in_range() {
    let samples: [&[f64]; 4] = [
        &[0.1, 0.2, 0.25, 0.9],
        &[3.0, 3.0, 3.0, 3.0, 4.0],
        &[1.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 9.0],
        &[-5.0, 0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0, 40.0],
    ];
    for sample in samples {
        let result = shapiro_wilk(sample).expect("valid sample");
        assert!(result.statistic > 0.0 && result.statistic <= 1.0, "{result:?}");
        assert!((0.0..=1.0).contains(&result.p_value), "{result:?}");
    }
}
