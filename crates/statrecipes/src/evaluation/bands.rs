//! Confidence bands around a fitted curve.
//!
//! ## Purpose
//!
//! This module holds the band type shared by every stat and the analytic band
//! for global polynomial fits: `fit(x) +/- critical * se(x)`.
//!
//! ## Invariants
//!
//! * `lower` and `upper` have the same length as the grid.
//! * After [`ConfidenceBand::contain`], `lower <= estimate <= upper`.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::polyfit::PolyFit;

/// Lower and upper bounds aligned with an evaluation grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceBand<T> {
    /// Lower bound per grid point.
    pub lower: Vec<T>,

    /// Upper bound per grid point.
    pub upper: Vec<T>,
}

impl<T: Float> ConfidenceBand<T> {
    /// Number of grid points covered.
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// Check if the band is empty.
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Widen the band where needed so that it contains `estimate`.
    pub fn contain(mut self, estimate: &[T]) -> Self {
        for ((lo, hi), &y) in self
            .lower
            .iter_mut()
            .zip(self.upper.iter_mut())
            .zip(estimate)
        {
            *lo = lo.min(y);
            *hi = hi.max(y);
        }
        self
    }

    /// Check whether `estimate` lies inside the band everywhere.
    pub fn contains(&self, estimate: &[T]) -> bool {
        estimate
            .iter()
            .zip(self.lower.iter().zip(&self.upper))
            .all(|(&y, (&lo, &hi))| lo <= y && y <= hi)
    }
}

/// Band `fit(g) +/- critical * se(g)` for each grid value `g`.
pub fn polynomial_band(fit: &PolyFit, grid: &[f64], critical: f64) -> ConfidenceBand<f64> {
    let (lower, upper) = grid
        .iter()
        .map(|&g| {
            let y = fit.predict(g);
            let half = critical * fit.standard_error(g);
            (y - half, y + half)
        })
        .unzip();

    ConfidenceBand { lower, upper }
}
