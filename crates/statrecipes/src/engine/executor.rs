//! Execution engine for LOWESS smoothing over an evaluation grid.
//!
//! ## Purpose
//!
//! This module orchestrates a LOWESS call: it cleans and sorts the sample,
//! checks distinct-x support, runs the robustness passes at the sample
//! points, evaluates the final curve on an evenly spaced grid and, when
//! configured, bootstraps a percentile confidence band over the same grid.
//!
//! ## Design notes
//!
//! * **Robustness**: `iterations` passes at the sample points produce the
//!   robustness weights; the final curve is evaluated with them.
//! * **Delta**: Targets (sample points or grid values) within `delta` of the
//!   last fitted target are linearly interpolated instead of refit.
//! * **Shape**: A curve is either values on the grid or (x, y) pairs at the
//!   sample points; [`CurveShape::normalize`] resolves both to grid values.
//! * **Generics**: Generic over `Float` types through [`WLSSolver`].
//!
//! ## Invariants
//!
//! * Sample x-values are sorted before any pass.
//! * Window size is at least 2 (or `n`, if smaller) and at most `n`.
//! * Robustness weights are in [0, 1].
//!
//! ## Non-goals
//!
//! * This module does not build frames or handle grouping.
//! * This module does not validate configuration (handled by `validator`).

// External dependencies
use num_traits::Float;
use serde::{Deserialize, Serialize};
use tracing::debug;

// Internal dependencies
use crate::algorithms::interpolation::{interpolate_gap, interpolate_onto};
use crate::algorithms::regression::{RegressionContext, WLSSolver};
use crate::algorithms::robustness::RobustnessMethod;
use crate::engine::validator::Validator;
use crate::evaluation::bands::ConfidenceBand;
use crate::evaluation::bootstrap::{BootstrapConfig, bootstrap_band};
use crate::math::kernel::WeightFunction;
use crate::primitives::errors::StatError;
use crate::primitives::grid::linspace;
use crate::primitives::sorting::{SortedData, clean_and_sort};
use crate::primitives::window::Window;

// ============================================================================
// Configuration
// ============================================================================

/// Where the final curve is fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    /// Fit a local line at every grid value.
    #[default]
    Direct,

    /// Fit at the sample points and interpolate onto the grid.
    Interpolate,
}

/// Configuration for a LOWESS execution.
#[derive(Debug, Clone, PartialEq)]
pub struct LowessConfig<T> {
    /// Smoothing fraction (0, 1].
    pub fraction: T,

    /// Number of grid points.
    pub gridsize: usize,

    /// Interpolation distance.
    pub delta: T,

    /// Number of robustness passes (0 means no reweighting).
    pub iterations: usize,

    /// Distance kernel.
    pub weight_function: WeightFunction,

    /// Residual reweighting function.
    pub robustness_method: RobustnessMethod,

    /// Grid evaluation strategy.
    pub evaluation: EvaluationMode,

    /// Bootstrap band settings; `None` disables the band.
    pub bootstrap: Option<BootstrapConfig<T>>,
}

impl<T: Float> Default for LowessConfig<T> {
    fn default() -> Self {
        Self {
            fraction: T::from(0.2).unwrap_or_else(T::one),
            gridsize: 100,
            delta: T::zero(),
            iterations: 3,
            weight_function: WeightFunction::default(),
            robustness_method: RobustnessMethod::default(),
            evaluation: EvaluationMode::default(),
            bootstrap: None,
        }
    }
}

// ============================================================================
// Curve Shape
// ============================================================================

/// Raw curve returned by a fit, before alignment with the grid.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveShape<T> {
    /// One value per grid point.
    Column(Vec<T>),

    /// Fitted values at the (sorted) sample points.
    Paired {
        /// Sample x-values.
        x: Vec<T>,
        /// Fitted values.
        y: Vec<T>,
    },
}

impl<T: Float> CurveShape<T> {
    /// Resolve to one value per grid point.
    pub fn normalize(self, grid: &[T]) -> Result<Vec<T>, StatError> {
        let values = match self {
            Self::Column(values) => values,
            Self::Paired { x, y } => {
                if x.len() != y.len() {
                    return Err(StatError::DimensionMismatch {
                        expected: x.len(),
                        got: y.len(),
                    });
                }
                interpolate_onto(&x, &y, grid)
            }
        };

        if values.len() != grid.len() {
            return Err(StatError::DimensionMismatch {
                expected: grid.len(),
                got: values.len(),
            });
        }
        Ok(values)
    }
}

// ============================================================================
// Output
// ============================================================================

/// Result of a LOWESS execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorOutput<T> {
    /// Evaluation grid.
    pub grid: Vec<T>,

    /// Smoothed values on the grid.
    pub fitted: Vec<T>,

    /// Bootstrap band, when configured.
    pub band: Option<ConfidenceBand<T>>,

    /// Observations used after dropping missing values.
    pub n: usize,

    /// Distinct x-values among them.
    pub distinct: usize,

    /// Local window size.
    pub window_size: usize,
}

// ============================================================================
// Executor
// ============================================================================

/// Runs LOWESS passes for a fixed configuration.
#[derive(Debug, Clone, Copy)]
pub struct LowessExecutor<T> {
    fraction: T,
    delta: T,
    iterations: usize,
    weight_function: WeightFunction,
    robustness_method: RobustnessMethod,
    evaluation: EvaluationMode,
}

impl<T: WLSSolver> LowessExecutor<T> {
    /// Create an executor from a configuration.
    pub fn from_config(config: &LowessConfig<T>) -> Self {
        Self {
            fraction: config.fraction,
            delta: config.delta,
            iterations: config.iterations,
            weight_function: config.weight_function,
            robustness_method: config.robustness_method,
            evaluation: config.evaluation,
        }
    }

    // ========================================================================
    // Main Entry Point
    // ========================================================================

    /// Smooth raw observations onto a grid of `config.gridsize` points.
    ///
    /// Non-finite pairs are dropped first. Fails when the distinct x-values
    /// cannot support the smoothing fraction.
    pub fn run(x: &[T], y: &[T], config: &LowessConfig<T>) -> Result<ExecutorOutput<T>, StatError> {
        Validator::validate_lengths("y", x.len(), y.len())?;

        let sorted = clean_and_sort(x, y);
        let distinct = sorted.distinct_x();
        Validator::validate_distinct_support(distinct, config.fraction)?;

        let n = sorted.len();
        let executor = Self::from_config(config);
        let window_size = Window::calculate_span(n, config.fraction);
        let grid = linspace(sorted.x[0], sorted.x[n - 1], config.gridsize);

        debug!(
            n,
            distinct,
            window_size,
            gridsize = config.gridsize,
            iterations = config.iterations,
            "fitting lowess curve"
        );

        let fitted = executor.fit_curve(&sorted, &grid).normalize(&grid)?;

        let band = match &config.bootstrap {
            Some(boot) => Some(bootstrap_band(
                &sorted.x,
                &sorted.y,
                &fitted,
                boot,
                |resample: &SortedData<T>| executor.fit_curve(resample, &grid).normalize(&grid),
            )?),
            None => None,
        };

        Ok(ExecutorOutput {
            grid,
            fitted,
            band,
            n,
            distinct,
            window_size,
        })
    }

    // ========================================================================
    // Curve Evaluation
    // ========================================================================

    /// Fit a sorted sample and evaluate it according to the evaluation mode.
    pub fn fit_curve(&self, data: &SortedData<T>, grid: &[T]) -> CurveShape<T> {
        let (x, y) = (&data.x[..], &data.y[..]);
        let n = x.len();
        if n == 0 {
            return CurveShape::Column(Vec::new());
        }

        let window_size = Window::calculate_span(n, self.fraction);
        let mut weights = vec![T::zero(); n];
        let robustness = self.robustness_weights(x, y, window_size, &mut weights);

        match self.evaluation {
            EvaluationMode::Direct => CurveShape::Column(self.smooth_pass(
                x,
                y,
                grid,
                window_size,
                robustness.as_deref(),
                &mut weights,
            )),
            EvaluationMode::Interpolate => {
                let fitted =
                    self.smooth_pass(x, y, x, window_size, robustness.as_deref(), &mut weights);
                CurveShape::Paired {
                    x: x.to_vec(),
                    y: fitted,
                }
            }
        }
    }

    /// Robustness weights after `iterations` passes at the sample points.
    ///
    /// Returns `None` when no reweighting is configured.
    pub fn robustness_weights(
        &self,
        x: &[T],
        y: &[T],
        window_size: usize,
        weights: &mut [T],
    ) -> Option<Vec<T>> {
        if self.iterations == 0 {
            return None;
        }

        let n = x.len();
        let mut robustness = vec![T::one(); n];
        let mut residuals = vec![T::zero(); n];
        let mut scratch = vec![T::zero(); n];

        for iter in 0..self.iterations {
            let current = if iter == 0 { None } else { Some(&robustness[..]) };
            let fitted = self.smooth_pass(x, y, x, window_size, current, weights);

            for ((r, &obs), &fit) in residuals.iter_mut().zip(y).zip(&fitted) {
                *r = obs - fit;
            }
            self.robustness_method
                .apply_robustness_weights(&residuals, &mut robustness, &mut scratch);
        }

        Some(robustness)
    }

    // ========================================================================
    // Smoothing Pass
    // ========================================================================

    /// Evaluate the local fit at ascending `targets`, skipping targets within
    /// `delta` of the last fitted one.
    pub fn smooth_pass(
        &self,
        x: &[T],
        y: &[T],
        targets: &[T],
        window_size: usize,
        robustness: Option<&[T]>,
        weights: &mut [T],
    ) -> Vec<T> {
        let n = x.len();
        let m = targets.len();
        let mut out = vec![T::zero(); m];
        if m == 0 || n == 0 {
            return out;
        }

        let mut window = Window::initialize(0, window_size, n);
        out[0] = self.fit_at(x, y, targets[0], &mut window, robustness, weights);

        let mut last_fitted = 0usize;
        while last_fitted < m - 1 {
            let cutpoint = targets[last_fitted] + self.delta;

            // First index whose target lies beyond the cutpoint
            let next_idx =
                targets[last_fitted + 1..].partition_point(|&t| t <= cutpoint) + last_fitted + 1;

            // Tied targets share the fitted value
            let tied = targets[last_fitted];
            while last_fitted + 1 < next_idx.min(m) && targets[last_fitted + 1] == tied {
                out[last_fitted + 1] = out[last_fitted];
                last_fitted += 1;
            }

            let current = next_idx
                .saturating_sub(1)
                .max(last_fitted + 1)
                .min(m - 1);
            if current <= last_fitted {
                break;
            }

            out[current] = self.fit_at(x, y, targets[current], &mut window, robustness, weights);
            interpolate_gap(targets, &mut out, last_fitted, current);
            last_fitted = current;
        }

        out
    }

    fn fit_at(
        &self,
        x: &[T],
        y: &[T],
        target: T,
        window: &mut Window,
        robustness: Option<&[T]>,
        weights: &mut [T],
    ) -> T {
        window.recenter_on(x, target, x.len());

        let mut ctx = RegressionContext {
            x,
            y,
            target,
            window: *window,
            robustness_weights: robustness,
            weights,
            weight_function: self.weight_function,
        };
        ctx.fit()
    }
}
