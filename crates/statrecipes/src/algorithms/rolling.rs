//! Rolling-window aggregation over an ordered sequence.
//!
//! ## Purpose
//!
//! This module aggregates each value's neighbourhood of preceding values. The
//! neighbourhood is selected by a window length and a closing rule, optionally
//! tapered by a window shape (gaussian, triangular, hann).
//!
//! ## Design notes
//!
//! * **Closing rule**: For window length `w` at position `i`:
//!   `Right` covers `i-w+1..=i`, `Left` covers `i-w..=i-1`,
//!   `Both` covers `i-w..=i` and `Neither` covers `i-w+1..=i-1`.
//! * **Tapers**: A taper of the nominal span length is aligned with the
//!   window's last position; truncated windows at the start use its tail.
//! * **Missing values**: NaN entries are skipped; a window with fewer than
//!   `min_periods` valid values yields NaN.
//!
//! ## Invariants
//!
//! * Output has the same length as the input.
//! * Boxcar weights are all one, so weighted and plain statistics agree.
//!
//! ## Non-goals
//!
//! * This module does not support time-based (offset) windows.
//! * This module does not support centered windows.

// External dependencies
use core::f64::consts::PI;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::scaling::median_inplace;

// ============================================================================
// Configuration Types
// ============================================================================

/// Shape of the taper applied inside each window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WindowType {
    /// Equal weights.
    #[default]
    Boxcar,

    /// Gaussian taper with standard deviation `std` (in samples).
    Gaussian {
        /// Standard deviation of the taper.
        std: f64,
    },

    /// Triangular taper.
    Triangular,

    /// Hann (raised cosine) taper.
    Hann,
}

impl WindowType {
    /// Name of the window type.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Boxcar => "boxcar",
            Self::Gaussian { .. } => "gaussian",
            Self::Triangular => "triangular",
            Self::Hann => "hann",
        }
    }

    /// Returns `true` for tapers other than the boxcar.
    pub fn is_weighted(&self) -> bool {
        !matches!(self, Self::Boxcar)
    }

    /// Symmetric taper of length `m`.
    pub fn taper(&self, m: usize) -> Vec<f64> {
        if m == 0 {
            return Vec::new();
        }
        if m == 1 {
            return vec![1.0];
        }

        let mid = (m as f64 - 1.0) / 2.0;
        match self {
            Self::Boxcar => vec![1.0; m],
            Self::Gaussian { std } => (0..m)
                .map(|k| {
                    let d = (k as f64 - mid) / std;
                    (-0.5 * d * d).exp()
                })
                .collect(),
            Self::Triangular => {
                let denom = if m % 2 == 1 {
                    (m + 1) as f64
                } else {
                    m as f64
                };
                (0..m)
                    .map(|k| 1.0 - 2.0 * (k as f64 - mid).abs() / denom)
                    .collect()
            }
            Self::Hann => (0..m)
                .map(|k| 0.5 - 0.5 * (2.0 * PI * k as f64 / (m as f64 - 1.0)).cos())
                .collect(),
        }
    }
}

/// Statistic computed over each window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// (Weighted) mean.
    #[default]
    Mean,

    /// (Weighted) sum.
    Sum,

    /// Minimum.
    Min,

    /// Maximum.
    Max,

    /// Median.
    Median,

    /// (Weighted) sample standard deviation.
    Std,

    /// (Weighted) sample variance.
    Var,
}

impl Aggregation {
    /// Name of the aggregation.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Sum => "sum",
            Self::Min => "min",
            Self::Max => "max",
            Self::Median => "median",
            Self::Std => "std",
            Self::Var => "var",
        }
    }

    /// Returns `true` if the aggregation is defined for tapered windows.
    pub fn supports_weights(&self) -> bool {
        matches!(self, Self::Mean | Self::Sum | Self::Std | Self::Var)
    }
}

/// Which window endpoints are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Closed {
    /// Include the current position, exclude the oldest.
    Right,

    /// Include the oldest position, exclude the current.
    Left,

    /// Include both endpoints.
    Both,

    /// Exclude both endpoints.
    #[default]
    Neither,
}

impl Closed {
    // Offsets `(back, front)`: window covers `i - back ..= i - front`.
    fn offsets(&self, window: usize) -> (usize, usize) {
        match self {
            Self::Right => (window - 1, 0),
            Self::Left => (window, 1),
            Self::Both => (window, 0),
            Self::Neither => (window - 1, 1),
        }
    }
}

// ============================================================================
// Rolling Computation
// ============================================================================

/// Parameters of a rolling aggregation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollingSpec {
    /// Nominal window length (>= 1).
    pub window: usize,

    /// Taper shape.
    pub window_type: WindowType,

    /// Statistic.
    pub agg: Aggregation,

    /// Closing rule.
    pub closed: Closed,

    /// Minimum valid values for a non-NaN result.
    pub min_periods: usize,
}

/// Apply a rolling aggregation to `values`, preserving length and order.
pub fn rolling(values: &[f64], spec: &RollingSpec) -> Vec<f64> {
    let (back, front) = spec.closed.offsets(spec.window);
    let span = (back + 1).saturating_sub(front);
    let taper = spec.window_type.taper(span);

    let mut vals = Vec::with_capacity(span);
    let mut weights = Vec::with_capacity(span);

    (0..values.len())
        .map(|i| {
            vals.clear();
            weights.clear();

            if span == 0 || i < front {
                return f64::NAN;
            }
            let end = i - front;
            let start = i.saturating_sub(back);

            // Align the taper's last element with `end`
            let skip = span - (end - start + 1);
            for (k, &v) in values[start..=end].iter().enumerate() {
                if v.is_finite() {
                    vals.push(v);
                    weights.push(taper[skip + k]);
                }
            }

            if vals.len() < spec.min_periods.max(1) {
                return f64::NAN;
            }
            aggregate(spec.agg, &mut vals, &weights)
        })
        .collect()
}

fn aggregate(agg: Aggregation, vals: &mut [f64], weights: &[f64]) -> f64 {
    let sum_w: f64 = weights.iter().sum();
    let weighted_sum: f64 = vals.iter().zip(weights).map(|(v, w)| v * w).sum();

    match agg {
        Aggregation::Sum => weighted_sum,
        Aggregation::Mean => {
            if sum_w > 0.0 {
                weighted_sum / sum_w
            } else {
                f64::NAN
            }
        }
        Aggregation::Min => vals.iter().copied().fold(f64::INFINITY, f64::min),
        Aggregation::Max => vals.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        Aggregation::Median => median_inplace(vals),
        Aggregation::Var => weighted_variance(vals, weights, sum_w),
        Aggregation::Std => weighted_variance(vals, weights, sum_w).sqrt(),
    }
}

// Weighted sample variance `n / (n - 1) * sum(w (v - m)^2) / sum(w)`, which
// reduces to the usual ddof = 1 variance for unit weights.
fn weighted_variance(vals: &[f64], weights: &[f64], sum_w: f64) -> f64 {
    let n = weights.iter().filter(|&&w| w > 0.0).count();
    if n < 2 || sum_w <= 0.0 {
        return f64::NAN;
    }

    let mean = vals.iter().zip(weights).map(|(v, w)| v * w).sum::<f64>() / sum_w;
    let ss: f64 = vals
        .iter()
        .zip(weights)
        .map(|(v, w)| w * (v - mean) * (v - mean))
        .sum();

    let n = n as f64;
    ss / sum_w * n / (n - 1.0)
}
