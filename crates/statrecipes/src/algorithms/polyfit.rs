//! Global least squares polynomial fits.
//!
//! ## Purpose
//!
//! This module fits a polynomial of a given order to a whole group of
//! observations and exposes the fitted curve together with the standard error
//! of the mean prediction, which the band builders turn into confidence
//! bands.
//!
//! ## Design notes
//!
//! * **Conditioning**: x is centered and scaled to [-1, 1] before building
//!   the Vandermonde matrix; predictions are invariant to this.
//! * **Covariance**: `(X^T X)^-1 * s^2` with `X` the design of the
//!   observations and `s^2 = RSS / max(1, n - order - 1)`.
//!
//! ## Invariants
//!
//! * `n > order` for every successful fit.
//! * Standard errors are finite and non-negative.

// External dependencies
use nalgebra::{DMatrix, DVector};

// Internal dependencies
use crate::math::linalg::{design_row, least_squares, normal_inverse, quadratic_form, vandermonde};
use crate::primitives::errors::StatError;

/// Fitted polynomial with coefficient covariance.
#[derive(Debug, Clone)]
pub struct PolyFit {
    order: usize,
    center: f64,
    scale: f64,
    coefficients: DVector<f64>,
    covariance: DMatrix<f64>,
    residual_se: f64,
    n: usize,
}

impl PolyFit {
    /// Fit a polynomial of `order` to finite observations.
    pub fn fit(x: &[f64], y: &[f64], order: usize) -> Result<Self, StatError> {
        let n = x.len();
        if n <= order {
            return Err(StatError::TooFewPoints {
                got: n,
                min: order + 1,
            });
        }

        let (lo, hi) = x
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let center = 0.5 * (lo + hi);
        let half_range = 0.5 * (hi - lo);
        let scale = if half_range > 0.0 { half_range } else { 1.0 };

        let u: Vec<f64> = x.iter().map(|&v| (v - center) / scale).collect();
        let design = vandermonde(&u, order);

        let beta = least_squares(&design, y).ok_or(StatError::SingularDesign { n, order })?;
        let coefficients = DVector::from_vec(beta);

        let fitted = &design * &coefficients;
        let rss: f64 = y
            .iter()
            .zip(fitted.iter())
            .map(|(&obs, &fit)| (obs - fit) * (obs - fit))
            .sum();
        let dof = n.saturating_sub(order + 1).max(1);
        let variance = rss / dof as f64;

        let covariance =
            normal_inverse(&design).ok_or(StatError::SingularDesign { n, order })? * variance;

        Ok(Self {
            order,
            center,
            scale,
            coefficients,
            covariance,
            residual_se: variance.sqrt(),
            n,
        })
    }

    /// Polynomial order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of observations used in the fit.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Residual degrees of freedom, `n - order - 1`.
    pub fn dof(&self) -> usize {
        self.n.saturating_sub(self.order + 1)
    }

    /// Residual standard error.
    pub fn residual_se(&self) -> f64 {
        self.residual_se
    }

    /// Fitted value at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.row(x).dot(&self.coefficients)
    }

    /// Standard error of the fitted mean at `x`.
    pub fn standard_error(&self, x: f64) -> f64 {
        quadratic_form(&self.row(x), &self.covariance).max(0.0).sqrt()
    }

    /// Coefficients in ascending powers of the raw x.
    ///
    /// Expands the scaled polynomial; intended for reporting.
    pub fn coefficients(&self) -> Vec<f64> {
        // p(x) = sum_j b_j ((x - c) / s)^j, expanded with binomial terms
        let k = self.order + 1;
        let mut out = vec![0.0; k];
        for j in 0..k {
            let b = self.coefficients[j] / self.scale.powi(j as i32);
            let mut binom = 1.0;
            for i in 0..=j {
                out[i] += b * binom * (-self.center).powi((j - i) as i32);
                binom = binom * (j - i) as f64 / (i + 1) as f64;
            }
        }
        out
    }

    fn row(&self, x: f64) -> DVector<f64> {
        design_row((x - self.center) / self.scale, self.order)
    }
}
