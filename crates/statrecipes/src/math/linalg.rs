//! Dense linear algebra for global polynomial fits.
//!
//! ## Purpose
//!
//! This module builds Vandermonde design matrices and solves the least squares
//! problems behind polynomial regression, including the inverse normal matrix
//! needed for coefficient covariance.
//!
//! ## Design notes
//!
//! * **Backend**: `nalgebra` dense matrices.
//! * **Coefficients**: SVD solve, which also handles rank-deficient designs.
//! * **Inverse**: QR solve against the identity, falling back to the
//!   pseudo-inverse.
//!
//! ## Non-goals
//!
//! * This module does not scale or center the abscissa; callers do.

// External dependencies
use nalgebra::{DMatrix, DVector};

/// Relative tolerance applied to the largest singular value.
const SINGULAR_TOL: f64 = f64::EPSILON * 100.0;

/// Design matrix with columns `1, u, u^2, ..., u^order`.
pub fn vandermonde(u: &[f64], order: usize) -> DMatrix<f64> {
    DMatrix::from_fn(u.len(), order + 1, |i, j| u[i].powi(j as i32))
}

/// Design row `[1, u, u^2, ..., u^order]`.
pub fn design_row(u: f64, order: usize) -> DVector<f64> {
    DVector::from_fn(order + 1, |j, _| u.powi(j as i32))
}

/// Least squares solution of `design * beta = y`.
pub fn least_squares(design: &DMatrix<f64>, y: &[f64]) -> Option<Vec<f64>> {
    let rhs = DVector::from_column_slice(y);
    let svd = design.clone().svd(true, true);
    let eps = SINGULAR_TOL * svd.singular_values.max();

    let beta: DVector<f64> = svd.solve(&rhs, eps).ok()?;
    if beta.iter().any(|b| !b.is_finite()) {
        return None;
    }
    Some(beta.as_slice().to_vec())
}

/// Inverse of the normal matrix `design^T * design`.
pub fn normal_inverse(design: &DMatrix<f64>) -> Option<DMatrix<f64>> {
    let xtx = design.transpose() * design;
    let k = xtx.nrows();

    if let Some(inv) = xtx.clone().qr().solve(&DMatrix::identity(k, k)) {
        if inv.iter().all(|v| v.is_finite()) {
            return Some(inv);
        }
    }

    xtx.pseudo_inverse(SINGULAR_TOL).ok()
}

/// Quadratic form `v^T * m * v`.
#[inline]
pub fn quadratic_form(v: &DVector<f64>, m: &DMatrix<f64>) -> f64 {
    (v.transpose() * m * v)[(0, 0)]
}
