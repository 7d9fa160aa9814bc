//! Tests for the algorithms layer.
//!
//! ## Test Organization
//!
//! 1. **Local Regression** - Weighted line fits around a target
//! 2. **Robustness** - Residual reweighting
//! 3. **Interpolation** - Gap filling and grid mapping
//! 4. **Polynomial Fits** - Global least squares with covariance

use approx::{assert_abs_diff_eq, assert_relative_eq};

use statrecipes::internals::algorithms::interpolation::{interpolate_gap, interpolate_onto};
use statrecipes::internals::algorithms::polyfit::PolyFit;
use statrecipes::internals::algorithms::regression::{LinearFit, RegressionContext};
use statrecipes::internals::algorithms::robustness::RobustnessMethod;
use statrecipes::internals::math::kernel::WeightFunction;
use statrecipes::internals::primitives::errors::StatError;
use statrecipes::internals::primitives::window::Window;

// ============================================================================
// Local Regression Tests
// ============================================================================

/// Test that a weighted line through collinear points is exact.
#[test]
fn test_linear_fit_exact() {
    let x = [0.0, 1.0, 2.0, 3.0];
    let y = [1.0, 3.0, 5.0, 7.0];
    let w = [1.0, 0.5, 0.25, 1.0];

    let fit = LinearFit::fit_wls(&x, &y, &w, 3.0).unwrap();
    assert_abs_diff_eq!(fit.slope, 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(fit.intercept, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(fit.predict(10.0), 21.0, epsilon = 1e-10);

    assert!(LinearFit::fit_wls(&x, &y, &[0.0; 4], 3.0).is_none());
}

/// Test the same fit through the `f32` accumulation path.
#[test]
fn test_linear_fit_f32() {
    let x: Vec<f32> = (0..20).map(|i| i as f32).collect();
    let y: Vec<f32> = x.iter().map(|v| 0.5 * v - 2.0).collect();
    let w = vec![1.0f32; 20];

    let fit = LinearFit::fit_wls(&x, &y, &w, 19.0).unwrap();
    assert_abs_diff_eq!(fit.slope, 0.5, epsilon = 1e-4);
    assert_abs_diff_eq!(fit.intercept, -2.0, epsilon = 1e-3);
}

/// Test a local fit evaluated between sample points.
#[test]
fn test_regression_context_between_points() {
    let x: Vec<f64> = (0..10).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|v| 3.0 * v - 1.0).collect();
    let mut weights = vec![0.0; 10];

    let mut window = Window::initialize(0, 4, 10);
    window.recenter_on(&x, 4.5, 10);

    let mut ctx = RegressionContext {
        x: &x,
        y: &y,
        target: 4.5,
        window,
        robustness_weights: None,
        weights: &mut weights,
        weight_function: WeightFunction::Tricube,
    };
    assert_abs_diff_eq!(ctx.fit(), 12.5, epsilon = 1e-10);
}

/// Test the local mean fallback for a zero-radius window.
#[test]
fn test_regression_context_degenerate_window() {
    let x = [2.0, 2.0, 2.0];
    let y = [1.0, 2.0, 6.0];
    let mut weights = [0.0; 3];

    let mut ctx = RegressionContext {
        x: &x,
        y: &y,
        target: 2.0,
        window: Window { left: 0, right: 2 },
        robustness_weights: None,
        weights: &mut weights,
        weight_function: WeightFunction::Tricube,
    };
    assert_relative_eq!(ctx.fit(), 3.0);
}

// ============================================================================
// Robustness Tests
// ============================================================================

/// Test that a gross outlier is downweighted to zero.
#[test]
fn test_bisquare_rejects_outlier() {
    let residuals = [0.1, -0.2, 0.15, -0.1, 0.05, 50.0];
    let mut weights = [1.0; 6];
    let mut scratch = [0.0; 6];

    RobustnessMethod::Bisquare.apply_robustness_weights(&residuals, &mut weights, &mut scratch);

    assert_eq!(weights[5], 0.0);
    assert!(weights[..5].iter().all(|&w| w > 0.5 && w <= 1.0));
}

/// Test that zero residuals keep full weight.
#[test]
fn test_robustness_zero_residuals() {
    let residuals = [0.0; 4];
    let mut weights = [0.3; 4];
    let mut scratch = [0.0; 4];

    for method in [RobustnessMethod::Bisquare, RobustnessMethod::Huber, RobustnessMethod::Talwar] {
        method.apply_robustness_weights(&residuals, &mut weights, &mut scratch);
        assert!(weights.iter().all(|&w| w == 1.0), "{}", method.name());
    }
}

// ============================================================================
// Interpolation Tests
// ============================================================================

/// Test filling a gap between two fitted anchors.
#[test]
fn test_interpolate_gap() {
    let x = [0.0, 1.0, 2.0, 4.0];
    let mut y = [0.0, -1.0, -1.0, 8.0];

    interpolate_gap(&x, &mut y, 0, 3);
    assert_eq!(y, [0.0, 2.0, 4.0, 8.0]);
}

/// Test mapping a curve onto new abscissae, clamping outside its range.
#[test]
fn test_interpolate_onto() {
    let xp = [0.0, 1.0, 3.0];
    let fp = [0.0, 10.0, 30.0];

    let out = interpolate_onto(&xp, &fp, &[-1.0, 0.5, 2.0, 3.0, 5.0]);
    assert_eq!(out, vec![0.0, 5.0, 20.0, 30.0, 30.0]);

    let empty: Vec<f64> = interpolate_onto(&[], &[], &[1.0]);
    assert!(empty[0].is_nan());
}

// ============================================================================
// Polynomial Fit Tests
// ============================================================================

/// Test that an exact quadratic is recovered with vanishing standard errors.
#[test]
fn test_polyfit_exact_quadratic() {
    let x: Vec<f64> = (0..=10).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|v| 1.0 + 2.0 * v + 3.0 * v * v).collect();

    let fit = PolyFit::fit(&x, &y, 2).unwrap();
    assert_eq!(fit.order(), 2);
    assert_eq!(fit.n(), 11);
    assert_eq!(fit.dof(), 8);

    let coefficients = fit.coefficients();
    assert_abs_diff_eq!(coefficients[0], 1.0, epsilon = 1e-8);
    assert_abs_diff_eq!(coefficients[1], 2.0, epsilon = 1e-8);
    assert_abs_diff_eq!(coefficients[2], 3.0, epsilon = 1e-8);

    assert_relative_eq!(fit.predict(4.5), 1.0 + 9.0 + 60.75, max_relative = 1e-10);
    assert!(fit.residual_se() < 1e-8);
    assert!(fit.standard_error(5.0) < 1e-8);
}

/// Test the standard error of a straight-line fit against the closed form.
#[test]
fn test_polyfit_standard_error() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0];
    let y = [0.1, 0.9, 2.2, 2.8, 4.1];

    let fit = PolyFit::fit(&x, &y, 1).unwrap();

    // se(x0) = s * sqrt(1/n + (x0 - mean)^2 / Sxx)
    let s = fit.residual_se();
    let expected = s * (1.0 / 5.0 + (3.5f64 - 2.0).powi(2) / 10.0).sqrt();
    assert_relative_eq!(fit.standard_error(3.5), expected, max_relative = 1e-9);
}

/// Test that too few points are rejected.
#[test]
fn test_polyfit_too_few_points() {
    let err = PolyFit::fit(&[1.0, 2.0], &[1.0, 2.0], 2).unwrap_err();
    assert_eq!(err, StatError::TooFewPoints { got: 2, min: 3 });
}
