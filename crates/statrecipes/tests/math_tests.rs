//! Tests for kernels, scale estimates, quantiles, distributions and linalg.
//!
//! ## Test Organization
//!
//! 1. **Kernels** - Weight functions and window weights
//! 2. **Scale and Quantiles** - Medians and empirical quantiles
//! 3. **Distributions** - Normal and Student-t critical values
//! 4. **Linear Algebra** - Least squares and normal matrix inverse

use approx::{assert_abs_diff_eq, assert_relative_eq};

use statrecipes::internals::math::distribution::{normal_critical, normal_quantile, t_critical};
use statrecipes::internals::math::kernel::WeightFunction;
use statrecipes::internals::math::linalg::{least_squares, normal_inverse, vandermonde};
use statrecipes::internals::math::quantile::{quantile_pair, quantile_sorted};
use statrecipes::internals::math::scaling::{ScalingMethod, median_inplace};
use statrecipes::internals::primitives::window::Window;

// ============================================================================
// Kernel Tests
// ============================================================================

/// Test kernel values at selected scaled distances.
#[test]
fn test_kernel_values() {
    assert_relative_eq!(WeightFunction::Tricube.compute_weight(0.5), 0.669921875);
    assert_relative_eq!(WeightFunction::Epanechnikov.compute_weight(0.5), 0.75);
    assert_relative_eq!(WeightFunction::Triangle.compute_weight(-0.25), 0.75);
    assert_relative_eq!(WeightFunction::Uniform.compute_weight(0.9), 1.0);

    // Bounded kernels vanish at the window edge; the Gaussian does not
    assert_eq!(WeightFunction::Tricube.compute_weight(1.0), 0.0);
    assert!(WeightFunction::Gaussian.compute_weight(1.0) > 0.0);
    assert!(!WeightFunction::Gaussian.is_bounded());
    assert_eq!(WeightFunction::default(), WeightFunction::Tricube);
}

/// Test window weights with and without robustness weights.
#[test]
fn test_window_weights() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0];
    let window = Window { left: 0, right: 4 };
    let mut weights = [0.0; 5];

    let sum = WeightFunction::Tricube.compute_window_weights(&x, window, 2.0, 2.0, None, &mut weights);
    assert_eq!(weights[2], 1.0);
    assert_eq!(weights[0], 0.0);
    assert_eq!(weights[4], 0.0);
    assert_relative_eq!(weights[1], 0.669921875);
    assert_relative_eq!(sum, 1.0 + 2.0 * 0.669921875);

    let robustness = [1.0, 0.5, 1.0, 0.0, 1.0];
    let sum = WeightFunction::Tricube.compute_window_weights(
        &x,
        window,
        2.0,
        2.0,
        Some(&robustness),
        &mut weights,
    );
    assert_relative_eq!(weights[1], 0.5 * 0.669921875);
    assert_eq!(weights[3], 0.0);
    assert_relative_eq!(sum, 1.0 + 0.5 * 0.669921875);
}

// ============================================================================
// Scale and Quantile Tests
// ============================================================================

/// Test quickselect medians and the scale estimates.
#[test]
fn test_median_and_scale() {
    assert_eq!(median_inplace(&mut [3.0, 1.0, 2.0]), 2.0);
    assert_eq!(median_inplace(&mut [4.0, 1.0, 3.0, 2.0]), 2.5);
    assert!(median_inplace::<f64>(&mut []).is_nan());

    assert_eq!(ScalingMethod::MAR.compute(&mut [-3.0, 1.0, 2.0]), 2.0);
    assert_eq!(ScalingMethod::MAD.compute(&mut [1.0, 2.0, 3.0, 4.0, 100.0]), 1.0);
    assert_eq!(ScalingMethod::Mean.compute(&mut [-1.0, 1.0, 4.0]), 2.0);
}

/// Test linear interpolation between order statistics.
#[test]
fn test_quantiles() {
    let sorted: Vec<f64> = (1..=10).map(f64::from).collect();

    assert_relative_eq!(quantile_sorted(&sorted, 0.025), 1.225, epsilon = 1e-12);
    assert_relative_eq!(quantile_sorted(&sorted, 0.975), 9.775, epsilon = 1e-12);
    assert_eq!(quantile_sorted(&sorted, 0.0), 1.0);
    assert_eq!(quantile_sorted(&sorted, 1.0), 10.0);
    assert_eq!(quantile_sorted(&[7.0], 0.3), 7.0);
    assert!(quantile_sorted::<f64>(&[], 0.5).is_nan());

    let mut shuffled = vec![5.0, 1.0, 4.0, 2.0, 3.0];
    let (lo, hi) = quantile_pair(&mut shuffled, 0.25, 0.75);
    assert_eq!((lo, hi), (2.0, 4.0));
}

// ============================================================================
// Distribution Tests
// ============================================================================

/// Test normal critical values.
#[test]
fn test_normal_critical() {
    assert_eq!(normal_critical(0.05), 1.960);
    assert_eq!(normal_critical(0.01), 2.576);
    assert_eq!(normal_critical(0.10), 1.645);
    assert_abs_diff_eq!(normal_critical(0.2), 1.281_551_565_5, epsilon = 1e-8);

    assert_abs_diff_eq!(normal_quantile(0.975), 1.959_963_985, epsilon = 1e-8);
    assert_abs_diff_eq!(normal_quantile(0.5), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(normal_quantile(0.001), -3.090_232_306, epsilon = 1e-7);
}

/// Test Student-t critical values.
#[test]
fn test_t_critical() {
    assert_abs_diff_eq!(t_critical(0.05, 10).unwrap(), 2.228_138_852, epsilon = 1e-6);
    assert_abs_diff_eq!(t_critical(0.05, 3).unwrap(), 3.182_446_305, epsilon = 1e-6);
    assert!(t_critical(0.05, 0).is_none());

    // Approaches the normal value for many degrees of freedom
    assert_abs_diff_eq!(t_critical(0.05, 1000).unwrap(), 1.96, epsilon = 5e-3);
}

// ============================================================================
// Linear Algebra Tests
// ============================================================================

/// Test that least squares recovers exact polynomial coefficients.
#[test]
fn test_least_squares_exact() {
    let u = [-1.0, -0.5, 0.0, 0.5, 1.0];
    let y: Vec<f64> = u.iter().map(|v| 1.0 - 2.0 * v + 0.5 * v * v).collect();

    let design = vandermonde(&u, 2);
    assert_eq!((design.nrows(), design.ncols()), (5, 3));

    let beta = least_squares(&design, &y).unwrap();
    assert_abs_diff_eq!(beta[0], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(beta[1], -2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(beta[2], 0.5, epsilon = 1e-12);
}

/// Test the inverse of the normal matrix.
#[test]
fn test_normal_inverse() {
    let u = [0.0, 1.0, 2.0];
    let design = vandermonde(&u, 1);

    // X^T X = [[3, 3], [3, 5]], inverse = [[5, -3], [-3, 3]] / 6
    let inv = normal_inverse(&design).unwrap();
    assert_abs_diff_eq!(inv[(0, 0)], 5.0 / 6.0, epsilon = 1e-12);
    assert_abs_diff_eq!(inv[(0, 1)], -0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(inv[(1, 1)], 0.5, epsilon = 1e-12);
}
