//! Polynomial fit with an analytic confidence band.
//!
//! ## Purpose
//!
//! This module provides [`PolyFitWithCI`], a stat that fits a global
//! polynomial of a given order to each group and reports the curve over an
//! evenly spaced grid together with a normal-theory confidence band.
//!
//! ## Design notes
//!
//! * **Band**: `y +/- z * se(x)` with `z = Phi^-1(1 - alpha / 2)`.
//! * **Small groups**: A group with `n <= order` observations yields no rows.
//! * **Columns**: `x`, `y`, `ymin`, `ymax`, named after the orientation.
//!
//! ## Invariants
//!
//! * `ymin <= y <= ymax` at every grid point.

// External dependencies
use serde::{Deserialize, Serialize};
use tracing::debug;

// Internal dependencies
use crate::adapters::grouped::transform_curves;
use crate::adapters::standalone::Curve;
use crate::algorithms::polyfit::PolyFit;
use crate::engine::validator::Validator;
use crate::evaluation::bands::polynomial_band;
use crate::math::distribution::normal_critical;
use crate::primitives::errors::StatError;
use crate::primitives::frame::Frame;
use crate::primitives::grid::linspace;
use crate::primitives::sorting::drop_missing;
use crate::protocol::{GroupBy, Orient, Scales, Stat};

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for [`PolyFitWithCI`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyFitBuilder {
    /// Significance level of the band.
    pub alpha: Option<f64>,

    /// Polynomial order.
    pub order: Option<usize>,

    /// Number of output grid points.
    pub gridsize: Option<usize>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    #[serde(skip)]
    pub duplicate_param: Option<&'static str>,
}

impl PolyFitBuilder {
    /// Set the significance level (band coverage is `1 - alpha`).
    pub fn alpha(mut self, alpha: f64) -> Self {
        if self.alpha.is_some() {
            self.duplicate_param = Some("alpha");
        }
        self.alpha = Some(alpha);
        self
    }

    /// Set the polynomial order.
    pub fn order(mut self, order: usize) -> Self {
        if self.order.is_some() {
            self.duplicate_param = Some("order");
        }
        self.order = Some(order);
        self
    }

    /// Set the number of output grid points.
    pub fn gridsize(mut self, gridsize: usize) -> Self {
        if self.gridsize.is_some() {
            self.duplicate_param = Some("gridsize");
        }
        self.gridsize = Some(gridsize);
        self
    }

    /// Validate the configuration and build the stat.
    pub fn build(self) -> Result<PolyFitWithCI, StatError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let alpha = self.alpha.unwrap_or(0.05);
        let order = self.order.unwrap_or(2);
        let gridsize = self.gridsize.unwrap_or(100);

        Validator::validate_alpha(alpha)?;
        Validator::validate_order(order)?;
        Validator::validate_gridsize(gridsize)?;

        Ok(PolyFitWithCI {
            alpha,
            order,
            gridsize,
            critical: normal_critical(alpha),
        })
    }
}

// ============================================================================
// Stat
// ============================================================================

/// Polynomial fit with a normal-theory confidence band.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyFitWithCI {
    alpha: f64,
    order: usize,
    gridsize: usize,
    critical: f64,
}

impl PolyFitWithCI {
    /// Start configuring a polynomial fit (alpha 0.05, order 2, 100 grid points).
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> PolyFitBuilder {
        PolyFitBuilder::default()
    }

    /// Significance level.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Polynomial order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of grid points.
    pub fn gridsize(&self) -> usize {
        self.gridsize
    }

    /// Fit one group of observations.
    ///
    /// Pairs with a missing coordinate are dropped. Returns an empty curve
    /// (with band columns) when `n <= order`.
    pub fn fit_xy(&self, x: &[f64], y: &[f64]) -> Result<Curve, StatError> {
        Validator::validate_lengths("y", x.len(), y.len())?;
        let (x, y) = drop_missing(x, y);

        if x.len() <= self.order {
            debug!(n = x.len(), order = self.order, "too few points for polyfit, skipping group");
            return Ok(Curve::empty(true));
        }

        let fit = PolyFit::fit(&x, &y, self.order)?;
        let (lo, hi) = x
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let grid = linspace(lo, hi, self.gridsize);
        let fitted: Vec<f64> = grid.iter().map(|&g| fit.predict(g)).collect();
        let band = polynomial_band(&fit, &grid, self.critical);

        debug!(
            n = fit.n(),
            order = self.order,
            residual_se = fit.residual_se(),
            "fitted polynomial"
        );

        Ok(Curve {
            grid,
            fitted,
            band: Some(band),
        })
    }
}

impl Stat for PolyFitWithCI {
    fn transform(
        &self,
        data: &Frame,
        groupby: &GroupBy,
        orient: Orient,
        _scales: &Scales,
    ) -> Result<Frame, StatError> {
        transform_curves(data, groupby, orient, |x, y| self.fit_xy(x, y))
    }
}
