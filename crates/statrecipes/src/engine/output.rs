//! Result type for LOWESS fits.
//!
//! ## Purpose
//!
//! This module defines [`LowessResult`], the grid-aligned output of a LOWESS
//! call: grid values, smoothed values and, when bootstrapping was
//! configured, the band bounds.
//!
//! ## Invariants
//!
//! * All populated vectors have the same length as the grid.
//! * The grid is ascending and evenly spaced.
//! * `lower <= y <= upper` wherever a band is present.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::ExecutorOutput;

// ============================================================================
// Result Structure
// ============================================================================

/// Smoothed curve on an evaluation grid.
#[derive(Debug, Clone, PartialEq)]
pub struct LowessResult<T> {
    /// Grid values (independent variable).
    pub x: Vec<T>,

    /// Smoothed values at the grid.
    pub y: Vec<T>,

    /// Lower band bound per grid point.
    pub lower: Option<Vec<T>>,

    /// Upper band bound per grid point.
    pub upper: Option<Vec<T>>,

    /// Observations used after dropping missing values.
    pub n_used: usize,

    /// Distinct x-values among them.
    pub distinct: usize,

    /// Smoothing fraction used for the fit.
    pub fraction_used: T,

    /// Number of bootstrap resamples, when a band was computed.
    pub replicates: Option<usize>,
}

impl<T: Float> LowessResult<T> {
    /// Assemble a result from executor output.
    pub fn from_output(out: ExecutorOutput<T>, fraction: T, replicates: Option<usize>) -> Self {
        let (lower, upper) = match out.band {
            Some(band) => (Some(band.lower), Some(band.upper)),
            None => (None, None),
        };
        let replicates = replicates.filter(|_| lower.is_some());

        Self {
            x: out.grid,
            y: out.fitted,
            lower,
            upper,
            n_used: out.n,
            distinct: out.distinct,
            fraction_used: fraction,
            replicates,
        }
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if the result holds no grid points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Check if a confidence band was computed.
    pub fn has_band(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for LowessResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points: {} ({} distinct x)", self.n_used, self.distinct)?;
        writeln!(f, "  Fraction:    {}", self.fraction_used)?;
        writeln!(f, "  Grid points: {}", self.x.len())?;
        if let Some(b) = self.replicates {
            writeln!(f, "  Bootstrap:   {} resamples", b)?;
        }
        writeln!(f)?;

        writeln!(f, "Smoothed Curve:")?;
        let has_band = self.has_band();

        write!(f, "{:>8} {:>12}", "X", "Y_smooth")?;
        if has_band {
            write!(f, " {:>12} {:>12}", "Band_Lower", "Band_Upper")?;
        }
        writeln!(f)?;
        writeln!(f, "{:-<width$}", "", width = if has_band { 47 } else { 21 })?;

        // Data rows (show first 10 and last 10 if more than 20 points)
        let n = self.x.len();
        let rows_to_show: Vec<usize> = if n <= 20 {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev_idx = 0;
        for (i, &idx) in rows_to_show.iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>8}", "...")?;
            }
            prev_idx = idx;

            write!(f, "{:>8.2} {:>12.6}", self.x[idx], self.y[idx])?;
            if let (Some(lower), Some(upper)) = (&self.lower, &self.upper) {
                write!(f, " {:>12.6} {:>12.6}", lower[idx], upper[idx])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
