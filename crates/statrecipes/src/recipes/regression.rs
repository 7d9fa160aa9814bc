//! Least squares regression with a Student-t confidence band.
//!
//! ## Purpose
//!
//! This module provides [`RegressionWithCI`], a helper that fits an OLS
//! polynomial (a straight line by default) of one frame column on another
//! and returns ready-to-draw layers, and [`PolyFitCI`], the stat form of the
//! same fit.
//!
//! ## Design notes
//!
//! * **Band**: `y +/- t * se(x)` with `t` the two-sided Student-t critical
//!   value at `n - order - 1` degrees of freedom.
//! * **Degrees of freedom**: At least one residual degree of freedom is
//!   required, so a fit needs `n >= order + 2` observations.
//!
//! ## Invariants
//!
//! * The line, band and dots layers share the same column naming.

// External dependencies
use serde::{Deserialize, Serialize};
use tracing::debug;

// Internal dependencies
use crate::adapters::grouped::transform_curves;
use crate::adapters::standalone::Curve;
use crate::algorithms::polyfit::PolyFit;
use crate::engine::validator::Validator;
use crate::evaluation::bands::polynomial_band;
use crate::math::distribution::t_critical;
use crate::primitives::errors::StatError;
use crate::primitives::frame::Frame;
use crate::primitives::grid::linspace;
use crate::primitives::sorting::drop_missing;
use crate::protocol::{GroupBy, Orient, Scales, Stat};

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for [`RegressionWithCI`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegressionBuilder {
    /// Significance level of the band.
    pub alpha: Option<f64>,

    /// Also return the raw observations as a scatter layer.
    pub include_dots: Option<bool>,

    /// Polynomial order.
    pub order: Option<usize>,

    /// Number of output grid points.
    pub gridsize: Option<usize>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    #[serde(skip)]
    pub duplicate_param: Option<&'static str>,
}

impl RegressionBuilder {
    /// Set the significance level (band coverage is `1 - alpha`).
    pub fn alpha(mut self, alpha: f64) -> Self {
        if self.alpha.is_some() {
            self.duplicate_param = Some("alpha");
        }
        self.alpha = Some(alpha);
        self
    }

    /// Include the raw observations as a scatter layer.
    pub fn include_dots(mut self, include: bool) -> Self {
        if self.include_dots.is_some() {
            self.duplicate_param = Some("include_dots");
        }
        self.include_dots = Some(include);
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

    /// Validate the configuration and build the helper.
    pub fn build(self) -> Result<RegressionWithCI, StatError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let fit = PolyFitCIBuilder {
            alpha: self.alpha,
            order: self.order,
            gridsize: self.gridsize,
            duplicate_param: None,
        }
        .build()?;

        Ok(RegressionWithCI {
            fit,
            include_dots: self.include_dots.unwrap_or(false),
        })
    }
}

/// Fluent builder for the [`PolyFitCI`] stat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyFitCIBuilder {
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

impl PolyFitCIBuilder {
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
    pub fn build(self) -> Result<PolyFitCI, StatError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let fit = PolyFitCI {
            alpha: self.alpha.unwrap_or(0.05),
            order: self.order.unwrap_or(1),
            gridsize: self.gridsize.unwrap_or(100),
        };
        Validator::validate_alpha(fit.alpha)?;
        Validator::validate_order(fit.order)?;
        Validator::validate_gridsize(fit.gridsize)?;

        Ok(fit)
    }
}

// ============================================================================
// Stat Form
// ============================================================================

/// OLS polynomial fit with a Student-t confidence band, as a stat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolyFitCI {
    alpha: f64,
    order: usize,
    gridsize: usize,
}

impl PolyFitCI {
    /// Start configuring a fit (alpha 0.05, order 1, 100 grid points).
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> PolyFitCIBuilder {
        PolyFitCIBuilder::default()
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
    /// Pairs with a missing coordinate are dropped first.
    pub fn fit_xy(&self, x: &[f64], y: &[f64]) -> Result<Curve, StatError> {
        Validator::validate_lengths("y", x.len(), y.len())?;
        let (x, y) = drop_missing(x, y);

        let min = self.order + 2;
        if x.len() < min {
            return Err(StatError::TooFewPoints { got: x.len(), min });
        }

        let fit = PolyFit::fit(&x, &y, self.order)?;
        let critical = t_critical(self.alpha, fit.dof()).ok_or(StatError::TooFewPoints {
            got: x.len(),
            min,
        })?;

        let (lo, hi) = x
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let grid = linspace(lo, hi, self.gridsize);
        let fitted: Vec<f64> = grid.iter().map(|&g| fit.predict(g)).collect();
        let band = polynomial_band(&fit, &grid, critical);

        debug!(n = fit.n(), dof = fit.dof(), critical, "fitted regression");

        Ok(Curve {
            grid,
            fitted,
            band: Some(band),
        })
    }
}

impl Stat for PolyFitCI {
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

// ============================================================================
// Layered Helper
// ============================================================================

/// Frames ready to be drawn as separate layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Layers {
    /// Fitted curve: `x`, `y`.
    pub line: Frame,

    /// Confidence band: `x`, `ymin`, `ymax`.
    pub band: Frame,

    /// Raw observations: `x`, `y` (when requested).
    pub dots: Option<Frame>,
}

/// Regression of one frame column on another, split into drawable layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionWithCI {
    fit: PolyFitCI,
    include_dots: bool,
}

impl RegressionWithCI {
    /// Start configuring a regression (alpha 0.05, order 1, 100 grid points).
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> RegressionBuilder {
        RegressionBuilder::default()
    }

    /// The stat performing the fit.
    pub fn stat(&self) -> PolyFitCI {
        self.fit
    }

    /// Check if the scatter layer is returned.
    pub fn include_dots(&self) -> bool {
        self.include_dots
    }

    /// Regress `yvar` on `xvar` and return the line, band and dots layers.
    pub fn plot(&self, frame: &Frame, xvar: &str, yvar: &str) -> Result<Layers, StatError> {
        let (x, y) = drop_missing(frame.numeric(xvar)?, frame.numeric(yvar)?);
        let curve = self.fit.fit_xy(&x, &y)?;

        let line = Frame::new()
            .with_column("x", curve.grid.clone())?
            .with_column("y", curve.fitted)?;

        let mut band = Frame::new().with_column("x", curve.grid)?;
        if let Some(b) = curve.band {
            band.insert("ymin", b.lower)?;
            band.insert("ymax", b.upper)?;
        }

        let dots = if self.include_dots {
            Some(Frame::new().with_column("x", x)?.with_column("y", y)?)
        } else {
            None
        };

        Ok(Layers { line, band, dots })
    }
}
