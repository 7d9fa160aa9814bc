//! Validation of stat configuration and data preconditions.
//!
//! ## Purpose
//!
//! This module checks builder parameters against their allowed ranges and
//! checks per-call data preconditions such as distinct-x support for the
//! smoothing fraction.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **No clamping**: Out-of-range values are rejected, never adjusted.
//!
//! ## Invariants
//!
//! * Validation is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not clean, sort or fit data.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::rolling::{Aggregation, WindowType};
use crate::primitives::errors::StatError;

/// Minimum points a local linear fit needs in its window (`k + 1`, `k = 2`).
pub const MIN_WINDOW_POINTS: usize = 3;

/// Upper bound on robustness iterations.
pub const MAX_ITERATIONS: usize = 1000;

// ============================================================================
// Validator
// ============================================================================

/// Static validation helpers shared by every builder and stat.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the smoothing fraction.
    pub fn validate_fraction<T: Float>(fraction: T) -> Result<(), StatError> {
        if !fraction.is_finite() || fraction <= T::zero() || fraction > T::one() {
            return Err(StatError::InvalidFraction(
                fraction.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the output grid size.
    pub fn validate_gridsize(gridsize: usize) -> Result<(), StatError> {
        if gridsize == 0 {
            return Err(StatError::InvalidGridsize(gridsize));
        }
        Ok(())
    }

    /// Validate the number of robustness iterations (0 means no reweighting).
    pub fn validate_iterations(iterations: usize) -> Result<(), StatError> {
        if iterations > MAX_ITERATIONS {
            return Err(StatError::InvalidIterations(iterations));
        }
        Ok(())
    }

    /// Validate the interpolation distance.
    pub fn validate_delta<T: Float>(delta: T) -> Result<(), StatError> {
        if !delta.is_finite() || delta < T::zero() {
            return Err(StatError::InvalidDelta(delta.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate the number of bootstrap resamples.
    pub fn validate_bootstrap(replicates: usize) -> Result<(), StatError> {
        if replicates == 0 {
            return Err(StatError::InvalidBootstrap(replicates));
        }
        Ok(())
    }

    /// Validate a confidence level.
    pub fn validate_confidence<T: Float>(level: T) -> Result<(), StatError> {
        if !level.is_finite() || level <= T::zero() || level >= T::one() {
            return Err(StatError::InvalidConfidence(
                level.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate a significance level.
    pub fn validate_alpha(alpha: f64) -> Result<(), StatError> {
        if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
            return Err(StatError::InvalidAlpha(alpha));
        }
        Ok(())
    }

    /// Validate a polynomial order.
    pub fn validate_order(order: usize) -> Result<(), StatError> {
        if order == 0 {
            return Err(StatError::InvalidOrder(order));
        }
        Ok(())
    }

    /// Validate a rolling window length and its aggregation.
    pub fn validate_rolling(
        window: usize,
        window_type: WindowType,
        agg: Aggregation,
    ) -> Result<(), StatError> {
        if window == 0 {
            return Err(StatError::InvalidWindow(window));
        }
        if let WindowType::Gaussian { std } = window_type {
            if !std.is_finite() || std <= 0.0 {
                return Err(StatError::InvalidWindowStd(std));
            }
        }
        if window_type.is_weighted() && !agg.supports_weights() {
            return Err(StatError::UnsupportedAggregation {
                agg: agg.name(),
                window: window_type.name(),
            });
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), StatError> {
        if let Some(param) = duplicate_param {
            return Err(StatError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }

    // ========================================================================
    // Data Validation
    // ========================================================================

    /// Validate that `distinct` x-values support the smoothing fraction.
    ///
    /// The window covers `fraction * distinct` points and must hold at least
    /// [`MIN_WINDOW_POINTS`], so the smallest admissible fraction is
    /// `3 / distinct`.
    pub fn validate_distinct_support<T: Float>(
        distinct: usize,
        fraction: T,
    ) -> Result<(), StatError> {
        if distinct == 0 {
            return Err(StatError::TooFewPoints {
                got: 0,
                min: MIN_WINDOW_POINTS,
            });
        }

        let frac = fraction.to_f64().unwrap_or(f64::NAN);
        let covered = frac * distinct as f64;
        if covered < MIN_WINDOW_POINTS as f64 - 1e-9 {
            return Err(StatError::InsufficientDistinctValues {
                distinct,
                fraction: frac,
                min_fraction: MIN_WINDOW_POINTS as f64 / distinct as f64,
            });
        }
        Ok(())
    }

    /// Validate that two columns have the same length.
    pub fn validate_lengths(column: &str, expected: usize, got: usize) -> Result<(), StatError> {
        if expected != got {
            return Err(StatError::LengthMismatch {
                column: column.to_string(),
                expected,
                got,
            });
        }
        Ok(())
    }
}
