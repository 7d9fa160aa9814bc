//! Robust scale estimation and order statistics.
//!
//! This module provides outlier-resistant scale estimates used to tune the
//! robustness weights, together with the quickselect median they rely on.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// Method for measuring the scale of residuals.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScalingMethod {
    // Median Absolute Residual: `median(|r|)`. Classic LOWESS choice.
    #[default]
    MAR,

    // Median Absolute Deviation: `median(|r - median(r)|)`.
    MAD,

    // Mean Absolute Residual: `mean(|r|)`.
    Mean,
}

impl ScalingMethod {
    // Compute the scale of `vals`; the slice is reordered in place.
    pub fn compute<T: Float>(&self, vals: &mut [T]) -> T {
        if vals.is_empty() {
            return T::zero();
        }

        match self {
            Self::MAR => {
                for val in vals.iter_mut() {
                    *val = val.abs();
                }
                median_inplace(vals)
            }
            Self::MAD => {
                let center = median_inplace(vals);
                for val in vals.iter_mut() {
                    *val = (*val - center).abs();
                }
                median_inplace(vals)
            }
            Self::Mean => {
                let n = T::from(vals.len()).unwrap_or_else(T::one);
                vals.iter().fold(T::zero(), |acc, v| acc + v.abs()) / n
            }
        }
    }
}

/// Median of `vals` using quickselect; the slice is reordered in place.
///
/// Returns NaN for an empty slice.
#[inline]
pub fn median_inplace<T: Float>(vals: &mut [T]) -> T {
    let n = vals.len();
    if n == 0 {
        return T::nan();
    }

    let mid = n / 2;
    vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let upper = vals[mid];

    if n % 2 == 1 {
        return upper;
    }

    // Even length: average with the largest value of the lower half
    let lower = vals[..mid]
        .iter()
        .copied()
        .fold(T::neg_infinity(), T::max);
    (lower + upper) / (T::one() + T::one())
}
