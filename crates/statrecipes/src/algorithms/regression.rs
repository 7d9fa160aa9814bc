//! Local weighted linear regression.
//!
//! ## Purpose
//!
//! This module provides the local fit behind LOWESS: kernel weights over a
//! nearest-neighbour window, optionally multiplied by robustness weights, feed
//! a weighted least squares line that is evaluated at a query value. The query
//! may be a sample point or an arbitrary grid value.
//!
//! ## Design notes
//!
//! * **SIMD**: The weighted sums are accumulated with `wide` vectors for
//!   `f64` and `f32` through the [`WLSSolver`] trait.
//! * **Degenerate windows**: A zero-radius window or an all-zero weight vector
//!   falls back to a (weighted) local mean.
//!
//! ## Invariants
//!
//! * The window lies within the sample and is non-empty.
//! * Returned estimates are finite whenever the inputs are finite.

// External dependencies
use core::fmt::Debug;
use num_traits::Float;
use wide::{f32x8, f64x2};

// Internal dependencies
use crate::math::kernel::WeightFunction;
use crate::primitives::window::Window;

// ============================================================================
// Generic Accumulation and Solving
// ============================================================================

/// Scalar accumulation for 1D weighted least squares.
#[inline]
pub fn accumulate_wls_scalar<T: Float>(x: &[T], y: &[T], weights: &[T]) -> (T, T, T, T, T) {
    let mut sum_w = T::zero();
    let mut sum_wx = T::zero();
    let mut sum_wy = T::zero();
    let mut sum_wxx = T::zero();
    let mut sum_wxy = T::zero();

    for ((&w, &xv), &yv) in weights.iter().zip(x).zip(y) {
        let wx = w * xv;
        sum_w = sum_w + w;
        sum_wx = sum_wx + wx;
        sum_wy = sum_wy + w * yv;
        sum_wxx = sum_wxx + wx * xv;
        sum_wxy = sum_wxy + wx * yv;
    }

    (sum_w, sum_wx, sum_wy, sum_wxx, sum_wxy)
}

/// Solve the 2x2 normal equations for slope, intercept and weighted means.
#[inline]
pub fn solve_wls_scalar<T: Float>(
    sum_w: T,
    sum_wx: T,
    sum_wy: T,
    sum_wxx: T,
    sum_wxy: T,
    tol: T,
) -> Option<(T, T, T, T)> {
    if sum_w <= T::zero() {
        return None;
    }

    let x_mean = sum_wx / sum_w;
    let y_mean = sum_wy / sum_w;
    let variance = sum_wxx - (sum_wx * sum_wx) / sum_w;

    if variance <= tol {
        return Some((T::zero(), y_mean, x_mean, y_mean));
    }

    let covariance = sum_wxy - (sum_wx * sum_wy) / sum_w;
    let slope = covariance / variance;
    let intercept = y_mean - slope * x_mean;

    Some((slope, intercept, x_mean, y_mean))
}

// ============================================================================
// Specialized Accumulation (SIMD)
// ============================================================================

/// SIMD accumulation for 1D weighted least squares (f64, two lanes).
#[inline]
pub fn accumulate_wls_simd_f64(x: &[f64], y: &[f64], weights: &[f64]) -> (f64, f64, f64, f64, f64) {
    let n = x.len().min(y.len()).min(weights.len());

    let mut s_w = f64x2::splat(0.0);
    let mut s_wx = f64x2::splat(0.0);
    let mut s_wy = f64x2::splat(0.0);
    let mut s_wxx = f64x2::splat(0.0);
    let mut s_wxy = f64x2::splat(0.0);

    let chunks = n / 2;
    for c in 0..chunks {
        let i = 2 * c;
        let w = f64x2::new([weights[i], weights[i + 1]]);
        let xv = f64x2::new([x[i], x[i + 1]]);
        let yv = f64x2::new([y[i], y[i + 1]]);

        let wx = w * xv;
        s_w += w;
        s_wx += wx;
        s_wy += w * yv;
        s_wxx += wx * xv;
        s_wxy += wx * yv;
    }

    let tail = chunks * 2;
    let (t_w, t_wx, t_wy, t_wxx, t_wxy) =
        accumulate_wls_scalar(&x[tail..n], &y[tail..n], &weights[tail..n]);

    (
        s_w.reduce_add() + t_w,
        s_wx.reduce_add() + t_wx,
        s_wy.reduce_add() + t_wy,
        s_wxx.reduce_add() + t_wxx,
        s_wxy.reduce_add() + t_wxy,
    )
}

/// SIMD accumulation for 1D weighted least squares (f32, eight lanes).
#[inline]
pub fn accumulate_wls_simd_f32(x: &[f32], y: &[f32], weights: &[f32]) -> (f32, f32, f32, f32, f32) {
    let n = x.len().min(y.len()).min(weights.len());

    let mut s_w = f32x8::splat(0.0);
    let mut s_wx = f32x8::splat(0.0);
    let mut s_wy = f32x8::splat(0.0);
    let mut s_wxx = f32x8::splat(0.0);
    let mut s_wxy = f32x8::splat(0.0);

    let lanes = |s: &[f32], i: usize| -> f32x8 {
        let mut a = [0.0f32; 8];
        a.copy_from_slice(&s[i..i + 8]);
        f32x8::new(a)
    };

    let chunks = n / 8;
    for c in 0..chunks {
        let i = 8 * c;
        let w = lanes(weights, i);
        let xv = lanes(x, i);
        let yv = lanes(y, i);

        let wx = w * xv;
        s_w += w;
        s_wx += wx;
        s_wy += w * yv;
        s_wxx += wx * xv;
        s_wxy += wx * yv;
    }

    let tail = chunks * 8;
    let (t_w, t_wx, t_wy, t_wxx, t_wxy) =
        accumulate_wls_scalar(&x[tail..n], &y[tail..n], &weights[tail..n]);

    (
        s_w.reduce_add() + t_w,
        s_wx.reduce_add() + t_wx,
        s_wy.reduce_add() + t_wy,
        s_wxx.reduce_add() + t_wxx,
        s_wxy.reduce_add() + t_wxy,
    )
}

// ============================================================================
// Solver Trait
// ============================================================================

/// Type-specific weighted least squares accumulation and solving.
pub trait WLSSolver: Float + Debug + Send + Sync + 'static {
    /// Accumulate weighted statistics.
    #[inline]
    fn accumulate_wls(x: &[Self], y: &[Self], weights: &[Self]) -> (Self, Self, Self, Self, Self) {
        accumulate_wls_scalar(x, y, weights)
    }

    /// Solve for coefficients.
    #[inline]
    fn solve_wls(
        sum_w: Self,
        sum_wx: Self,
        sum_wy: Self,
        sum_wxx: Self,
        sum_wxy: Self,
        tol: Self,
    ) -> Option<(Self, Self, Self, Self)> {
        solve_wls_scalar(sum_w, sum_wx, sum_wy, sum_wxx, sum_wxy, tol)
    }
}

impl WLSSolver for f64 {
    #[inline]
    fn accumulate_wls(x: &[f64], y: &[f64], weights: &[f64]) -> (f64, f64, f64, f64, f64) {
        accumulate_wls_simd_f64(x, y, weights)
    }
}

impl WLSSolver for f32 {
    #[inline]
    fn accumulate_wls(x: &[f32], y: &[f32], weights: &[f32]) -> (f32, f32, f32, f32, f32) {
        accumulate_wls_simd_f32(x, y, weights)
    }
}

// ============================================================================
// LinearFit
// ============================================================================

/// Linear regression fit result (slope and intercept).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit<T: Float> {
    /// Slope (beta_1)
    pub slope: T,

    /// Intercept (beta_0)
    pub intercept: T,
}

impl<T: Float> LinearFit<T> {
    /// Predict y for a given x.
    #[inline]
    pub fn predict(&self, x: T) -> T {
        self.intercept + self.slope * x
    }
}

impl<T: WLSSolver> LinearFit<T> {
    /// Fit weighted least squares; `None` when all weights are zero.
    pub fn fit_wls(x: &[T], y: &[T], weights: &[T], window_radius: T) -> Option<Self> {
        let (sum_w, sum_wx, sum_wy, sum_wxx, sum_wxy) = T::accumulate_wls(x, y, weights);

        let abs_tol = T::from(1e-7).unwrap_or_else(T::epsilon);
        let rel_tol = T::epsilon() * window_radius * window_radius;
        let tol = abs_tol.max(rel_tol);

        T::solve_wls(sum_w, sum_wx, sum_wy, sum_wxx, sum_wxy, tol)
            .map(|(slope, intercept, _, _)| Self { slope, intercept })
    }
}

// ============================================================================
// Regression Context
// ============================================================================

/// Everything needed to fit one local line and evaluate it at `target`.
pub struct RegressionContext<'a, T: Float> {
    /// Sorted x-values.
    pub x: &'a [T],

    /// Y-values matching `x`.
    pub y: &'a [T],

    /// Value at which the local line is evaluated.
    pub target: T,

    /// Nearest-neighbour window around `target`.
    pub window: Window,

    /// Robustness weights, or `None` on the first pass.
    pub robustness_weights: Option<&'a [T]>,

    /// Scratch buffer with the same length as `x`.
    pub weights: &'a mut [T],

    /// Distance kernel.
    pub weight_function: WeightFunction,
}

impl<T: WLSSolver> RegressionContext<'_, T> {
    /// Perform the local linear fit and evaluate it at `target`.
    pub fn fit(&mut self) -> T {
        let (left, right) = (self.window.left, self.window.right);
        let radius = self.window.max_distance(self.x, self.target);

        let weight_sum = self.weight_function.compute_window_weights(
            self.x,
            self.window,
            self.target,
            radius,
            self.robustness_weights,
            self.weights,
        );

        if weight_sum <= T::zero() || radius <= T::zero() {
            return self.local_mean();
        }

        let wx = &self.x[left..=right];
        let wy = &self.y[left..=right];
        let ww = &self.weights[left..=right];

        match LinearFit::fit_wls(wx, wy, ww, radius) {
            Some(model) => model.predict(self.target),
            None => self.local_mean(),
        }
    }

    // Robustness-weighted mean of the window, or the plain mean when every
    // weight vanished.
    fn local_mean(&self) -> T {
        let (left, right) = (self.window.left, self.window.right);
        let ys = &self.y[left..=right];

        if let Some(r) = self.robustness_weights {
            let (sw, swy) = ys
                .iter()
                .zip(&r[left..=right])
                .fold((T::zero(), T::zero()), |(sw, swy), (&y, &w)| {
                    (sw + w, swy + w * y)
                });
            if sw > T::zero() {
                return swy / sw;
            }
        }

        let n = T::from(ys.len()).unwrap_or_else(T::one);
        ys.iter().fold(T::zero(), |acc, &v| acc + v) / n
    }
}
