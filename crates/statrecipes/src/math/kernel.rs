//! Kernel (weight) functions for local regression.
//!
//! ## Purpose
//!
//! This module provides kernel functions that map scaled distances to weights.
//! It controls the influence of neighbouring observations on a local fit.
//!
//! ## Design notes
//!
//! * **Normalization**: Maps distances u = |x - x_i| / radius to weights.
//! * **Thresholds**: Points within 0.1% of the radius get full weight; points
//!   beyond 99.9% get none.
//! * **Support**: Every kernel except Gaussian is bounded on [-1, 1].
//!
//! ## Invariants
//!
//! * Kernels are non-negative (K(u) >= 0) and symmetric (K(u) = K(-u)).
//! * Bounded kernels return exactly zero outside their support.
//!
//! ## Non-goals
//!
//! * This module does not perform weight normalization.
//! * This module does not select the window.

// External dependencies
use core::f64::consts::PI;
use num_traits::Float;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::primitives::window::Window;

/// Beyond this scaled distance the Gaussian kernel is treated as zero.
const GAUSSIAN_CUTOFF: f64 = 6.0;

// ============================================================================
// Weight Function Enum
// ============================================================================

/// Distance kernel for local regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightFunction {
    /// Cosine kernel: K(u) = cos(pi * u / 2) for |u| < 1.
    Cosine,

    /// Epanechnikov kernel: K(u) = (1 - u^2) for |u| < 1.
    Epanechnikov,

    /// Gaussian kernel: K(u) = exp(-u^2 / 2).
    Gaussian,

    /// Biweight (quartic) kernel: K(u) = (1 - u^2)^2 for |u| < 1.
    Biweight,

    /// Triangular kernel: K(u) = (1 - |u|) for |u| < 1.
    Triangle,

    /// Tricube kernel: K(u) = (1 - |u|^3)^3 for |u| < 1.
    ///
    /// This is the classic LOWESS kernel and the default.
    #[default]
    Tricube,

    /// Uniform kernel: K(u) = 1 for |u| < 1.
    Uniform,
}

impl WeightFunction {
    /// Get the name of the weight function.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            WeightFunction::Cosine => "Cosine",
            WeightFunction::Epanechnikov => "Epanechnikov",
            WeightFunction::Gaussian => "Gaussian",
            WeightFunction::Biweight => "Biweight",
            WeightFunction::Triangle => "Triangle",
            WeightFunction::Tricube => "Tricube",
            WeightFunction::Uniform => "Uniform",
        }
    }

    /// Returns `true` if the kernel vanishes outside [-1, 1].
    #[inline]
    pub fn is_bounded(&self) -> bool {
        !matches!(self, WeightFunction::Gaussian)
    }

    // ========================================================================
    // Weight Computation
    // ========================================================================

    /// Compute the unnormalized weight K(u) for a scaled distance.
    #[inline]
    pub fn compute_weight<T: Float>(&self, u: T) -> T {
        let abs_u = u.abs();

        if self.is_bounded() && abs_u >= T::one() {
            return T::zero();
        }

        match self {
            WeightFunction::Cosine => {
                let half_pi = T::from(PI / 2.0).unwrap_or_else(T::one);
                (half_pi * abs_u).cos()
            }

            WeightFunction::Epanechnikov => T::one() - abs_u * abs_u,

            WeightFunction::Gaussian => {
                let u_f64 = abs_u.to_f64().unwrap_or(f64::INFINITY);
                if u_f64 > GAUSSIAN_CUTOFF {
                    T::zero()
                } else {
                    T::from((-0.5 * u_f64 * u_f64).exp()).unwrap_or_else(T::zero)
                }
            }

            WeightFunction::Biweight => {
                let tmp = T::one() - abs_u * abs_u;
                tmp * tmp
            }

            WeightFunction::Triangle => T::one() - abs_u,

            WeightFunction::Tricube => {
                let tmp = T::one() - abs_u * abs_u * abs_u;
                tmp * tmp * tmp
            }

            WeightFunction::Uniform => T::one(),
        }
    }

    /// Fill `weights[window.left..=window.right]` with kernel weights around
    /// `target`, multiplied by the robustness weights when given.
    ///
    /// Returns the sum of the weights written.
    pub fn compute_window_weights<T: Float>(
        &self,
        x: &[T],
        window: Window,
        target: T,
        radius: T,
        robustness: Option<&[T]>,
        weights: &mut [T],
    ) -> T {
        let h1 = T::from(0.001).unwrap_or_else(T::zero) * radius;
        let h9 = T::from(0.999).unwrap_or_else(T::one) * radius;

        let mut sum = T::zero();
        for j in window.left..=window.right {
            let distance = (x[j] - target).abs();

            let w_k = if distance <= h1 {
                T::one()
            } else if distance > h9 && self.is_bounded() {
                T::zero()
            } else {
                self.compute_weight(distance / radius)
            };

            let w = match robustness {
                Some(r) => w_k * r[j],
                None => w_k,
            };
            weights[j] = w;
            sum = sum + w;
        }

        sum
    }
}
