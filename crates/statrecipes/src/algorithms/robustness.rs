//! Robustness weights for outlier downweighting.
//!
//! ## Purpose
//!
//! After each LOWESS pass the residuals at the sample points are turned into
//! robustness weights, which multiply the kernel weights of the next pass.
//!
//! ## Design notes
//!
//! * **Scale**: `median(|r|)`, falling back to `mean(|r|)` when the median
//!   collapses to (almost) zero.
//! * **Methods**: Bisquare (default, c = 6), Huber (c = 1.345) and
//!   Talwar (c = 2.5).
//!
//! ## Invariants
//!
//! * Robustness weights are in [0, 1].
//! * A zero scale (perfect fit) yields unit weights.
//!
//! ## Non-goals
//!
//! * This module does not compute residuals or decide the number of passes.

// External dependencies
use num_traits::Float;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::scaling::ScalingMethod;

// ============================================================================
// Robustness Method
// ============================================================================

/// Residual reweighting function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RobustnessMethod {
    /// Tukey's biweight with c = 6 on the median absolute residual.
    #[default]
    Bisquare,

    /// Huber weights; never rejects a point completely.
    Huber,

    /// Hard threshold; rejects points beyond the threshold.
    Talwar,
}

impl RobustnessMethod {
    /// Tuning constant for bisquare weights (Cleveland, 1979).
    const BISQUARE_C: f64 = 6.0;

    /// Tuning constant for Huber weights.
    const HUBER_C: f64 = 1.345;

    /// Tuning constant for Talwar weights.
    const TALWAR_C: f64 = 2.5;

    /// Median scale below this fraction of the mean absolute residual is
    /// replaced by the mean.
    const SCALE_THRESHOLD: f64 = 1e-7;

    /// Absolute floor for the scale.
    const MIN_SCALE: f64 = 1e-12;

    /// Get the name of the method.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bisquare => "Bisquare",
            Self::Huber => "Huber",
            Self::Talwar => "Talwar",
        }
    }

    /// Overwrite `weights` with robustness weights computed from `residuals`.
    ///
    /// `scratch` must have the same length as `residuals`.
    pub fn apply_robustness_weights<T: Float>(
        &self,
        residuals: &[T],
        weights: &mut [T],
        scratch: &mut [T],
    ) {
        if residuals.is_empty() {
            return;
        }

        let scale = Self::compute_scale(residuals, scratch);
        let c = T::from(match self {
            Self::Bisquare => Self::BISQUARE_C,
            Self::Huber => Self::HUBER_C,
            Self::Talwar => Self::TALWAR_C,
        })
        .unwrap_or_else(T::one);

        for (w, &r) in weights.iter_mut().zip(residuals) {
            *w = match self {
                Self::Bisquare => Self::bisquare_weight(r, scale, c),
                Self::Huber => Self::huber_weight(r, scale, c),
                Self::Talwar => Self::talwar_weight(r, scale, c),
            };
        }
    }

    // Median absolute residual with a mean absolute residual fallback.
    fn compute_scale<T: Float>(residuals: &[T], scratch: &mut [T]) -> T {
        scratch.copy_from_slice(residuals);
        let scale = ScalingMethod::MAR.compute(scratch);

        let n = T::from(residuals.len()).unwrap_or_else(T::one);
        let mean_abs = residuals.iter().fold(T::zero(), |acc, r| acc + r.abs()) / n;

        let relative = T::from(Self::SCALE_THRESHOLD).unwrap_or_else(T::zero) * mean_abs;
        let absolute = T::from(Self::MIN_SCALE).unwrap_or_else(T::zero);

        if scale <= relative.max(absolute) {
            mean_abs.max(scale)
        } else {
            scale
        }
    }

    /// Bisquare weight with `cmad = c * scale`:
    ///
    /// ```text
    /// w = 1                    if |r| <= 0.001 * cmad
    /// w = (1 - (r/cmad)^2)^2   if |r| <= 0.999 * cmad
    /// w = 0                    otherwise
    /// ```
    #[inline]
    fn bisquare_weight<T: Float>(residual: T, scale: T, c: T) -> T {
        if scale <= T::zero() {
            return T::one();
        }

        let cmad = scale * c;
        let r = residual.abs();

        if r <= T::from(0.001).unwrap_or_else(T::zero) * cmad {
            T::one()
        } else if r <= T::from(0.999).unwrap_or_else(T::one) * cmad {
            let u = r / cmad;
            let tmp = T::one() - u * u;
            tmp * tmp
        } else {
            T::zero()
        }
    }

    #[inline]
    fn huber_weight<T: Float>(residual: T, scale: T, c: T) -> T {
        if scale <= T::zero() {
            return T::one();
        }

        let u = (residual / scale).abs();
        if u <= c { T::one() } else { c / u }
    }

    #[inline]
    fn talwar_weight<T: Float>(residual: T, scale: T, c: T) -> T {
        if scale <= T::zero() {
            return T::one();
        }

        let u = (residual / scale).abs();
        if u <= c { T::one() } else { T::zero() }
    }
}
