//! High-level API for LOWESS smoothing.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry point of the LOWESS stat: a
//! fluent builder that validates every parameter at `build()` and the built
//! [`Lowess`] stat with its standalone and host-protocol entry points.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with defaults for every parameter.
//! * **Validated**: Configuration errors surface at `build()`, never at call time.
//! * **Explicit band**: A band is computed only when `bootstrap(n)` was set.
//! * **Serializable**: Builders round-trip through serde, so hosts can load
//!   stat settings from JSON.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a [`LowessBuilder`] via `Lowess::new()`.
//! 2. Chain configuration methods (`.fraction()`, `.gridsize()`, `.bootstrap()`, ...).
//! 3. Call `.build()` to validate and obtain a [`Lowess`] stat.
//! 4. Call `fit_xy`, `fit_columns`, `fit_frame` or `Stat::transform`.

// External dependencies
use num_traits::Float;
use serde::{Deserialize, Serialize};
use tracing::warn;

// Internal dependencies
use crate::adapters::grouped::{transform_curves, transform_curves_each};
use crate::adapters::input::StatInput;
use crate::adapters::standalone::{Curve, fit_inputs, frame_columns};
use crate::algorithms::regression::WLSSolver;
use crate::engine::executor::LowessConfig;
use crate::engine::validator::Validator;
use crate::evaluation::bootstrap::BootstrapConfig;
use crate::primitives::frame::Frame;
use crate::protocol::groupby::GroupKey;
use crate::protocol::{GroupBy, Orient, Scales, Stat};

// Publicly re-exported types
pub use crate::algorithms::robustness::RobustnessMethod;
pub use crate::engine::executor::EvaluationMode;
pub use crate::engine::output::LowessResult;
pub use crate::math::kernel::WeightFunction;
pub use crate::primitives::errors::{ErrorKind, StatError};

/// Default nominal coverage of the bootstrap band.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for the LOWESS stat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowessBuilder<T> {
    /// Smoothing fraction (0..1].
    pub fraction: Option<T>,

    /// Number of output grid points.
    pub gridsize: Option<usize>,

    /// Interpolation distance between fitted grid points.
    pub delta: Option<T>,

    /// Robustness iterations.
    pub iterations: Option<usize>,

    /// Number of bootstrap resamples; `None` disables the band.
    pub num_bootstrap: Option<usize>,

    /// Nominal coverage of the band.
    pub confidence_level: Option<T>,

    /// Seed of the bootstrap generator.
    pub seed: Option<u64>,

    /// Kernel weight function.
    pub weight_function: Option<WeightFunction>,

    /// Outlier downweighting method.
    pub robustness_method: Option<RobustnessMethod>,

    /// Grid evaluation strategy.
    pub evaluation: Option<EvaluationMode>,

    /// Run bootstrap replicates on the rayon pool.
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    #[serde(skip)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for LowessBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> LowessBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            fraction: None,
            gridsize: None,
            delta: None,
            iterations: None,
            num_bootstrap: None,
            confidence_level: None,
            seed: None,
            weight_function: None,
            robustness_method: None,
            evaluation: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set the smoothing fraction (bandwidth).
    pub fn fraction(mut self, fraction: T) -> Self {
        if self.fraction.is_some() {
            self.duplicate_param = Some("fraction");
        }
        self.fraction = Some(fraction);
        self
    }

    /// Set the number of evenly spaced output grid points.
    pub fn gridsize(mut self, gridsize: usize) -> Self {
        if self.gridsize.is_some() {
            self.duplicate_param = Some("gridsize");
        }
        self.gridsize = Some(gridsize);
        self
    }

    /// Set the delta parameter for interpolation between grid points.
    pub fn delta(mut self, delta: T) -> Self {
        if self.delta.is_some() {
            self.duplicate_param = Some("delta");
        }
        self.delta = Some(delta);
        self
    }

    /// Set the number of robustness iterations.
    pub fn iterations(mut self, iterations: usize) -> Self {
        if self.iterations.is_some() {
            self.duplicate_param = Some("iterations");
        }
        self.iterations = Some(iterations);
        self
    }

    /// Enable the bootstrap band with `num_bootstrap` resamples.
    pub fn bootstrap(mut self, num_bootstrap: usize) -> Self {
        if self.num_bootstrap.is_some() {
            self.duplicate_param = Some("num_bootstrap");
        }
        self.num_bootstrap = Some(num_bootstrap);
        self
    }

    /// Set the nominal coverage of the band (does not enable it).
    pub fn confidence_level(mut self, level: T) -> Self {
        if self.confidence_level.is_some() {
            self.duplicate_param = Some("confidence_level");
        }
        self.confidence_level = Some(level);
        self
    }

    /// Seed the bootstrap generator.
    pub fn seed(mut self, seed: u64) -> Self {
        if self.seed.is_some() {
            self.duplicate_param = Some("seed");
        }
        self.seed = Some(seed);
        self
    }

    /// Set the kernel weight function.
    pub fn weight_function(mut self, wf: WeightFunction) -> Self {
        if self.weight_function.is_some() {
            self.duplicate_param = Some("weight_function");
        }
        self.weight_function = Some(wf);
        self
    }

    /// Set the robustness weighting method.
    pub fn robustness_method(mut self, rm: RobustnessMethod) -> Self {
        if self.robustness_method.is_some() {
            self.duplicate_param = Some("robustness_method");
        }
        self.robustness_method = Some(rm);
        self
    }

    /// Set the grid evaluation strategy.
    pub fn evaluation(mut self, mode: EvaluationMode) -> Self {
        if self.evaluation.is_some() {
            self.duplicate_param = Some("evaluation");
        }
        self.evaluation = Some(mode);
        self
    }

    /// Run bootstrap replicates in parallel (requires feature `parallel`).
    pub fn parallel(mut self, parallel: bool) -> Self {
        if self.parallel.is_some() {
            self.duplicate_param = Some("parallel");
        }
        self.parallel = Some(parallel);
        self
    }

    /// Validate the configuration and build the stat.
    pub fn build(self) -> Result<Lowess<T>, StatError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let mut config = LowessConfig::default();

        if let Some(fraction) = self.fraction {
            Validator::validate_fraction(fraction)?;
            config.fraction = fraction;
        }
        if let Some(gridsize) = self.gridsize {
            Validator::validate_gridsize(gridsize)?;
            config.gridsize = gridsize;
        }
        if let Some(delta) = self.delta {
            Validator::validate_delta(delta)?;
            config.delta = delta;
        }
        if let Some(iterations) = self.iterations {
            Validator::validate_iterations(iterations)?;
            config.iterations = iterations;
        }
        if let Some(level) = self.confidence_level {
            Validator::validate_confidence(level)?;
        }
        if let Some(wf) = self.weight_function {
            config.weight_function = wf;
        }
        if let Some(rm) = self.robustness_method {
            config.robustness_method = rm;
        }
        if let Some(mode) = self.evaluation {
            config.evaluation = mode;
        }

        let confidence_level = match self.confidence_level {
            Some(level) => level,
            None => T::from(DEFAULT_CONFIDENCE_LEVEL).ok_or(StatError::InvalidConfidence(
                DEFAULT_CONFIDENCE_LEVEL,
            ))?,
        };

        config.bootstrap = match self.num_bootstrap {
            Some(replicates) => {
                Validator::validate_bootstrap(replicates)?;
                Some(BootstrapConfig {
                    replicates,
                    confidence_level,
                    seed: self.seed,
                    parallel: self.parallel.unwrap_or(false),
                })
            }
            None => {
                let level = confidence_level.to_f64().unwrap_or(f64::NAN);
                if self.confidence_level.is_some() && level != DEFAULT_CONFIDENCE_LEVEL {
                    warn!(
                        confidence_level = level,
                        "confidence_level has no effect without num_bootstrap; no band is computed"
                    );
                }
                None
            }
        };

        Ok(Lowess { config })
    }
}

// ============================================================================
// Lowess Stat
// ============================================================================

/// Validated LOWESS stat.
#[derive(Debug, Clone, PartialEq)]
pub struct Lowess<T> {
    config: LowessConfig<T>,
}

impl<T: Float> Lowess<T> {
    /// Start configuring a LOWESS stat.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> LowessBuilder<T> {
        LowessBuilder::new()
    }

    /// Validated configuration.
    pub fn config(&self) -> &LowessConfig<T> {
        &self.config
    }

    /// Check if calls compute a bootstrap band.
    pub fn has_band(&self) -> bool {
        self.config.bootstrap.is_some()
    }
}

impl<T: WLSSolver> Lowess<T> {
    /// Smooth `y` against `x`.
    ///
    /// Accepts slices, vectors and contiguous one-dimensional arrays. Pairs
    /// with a missing coordinate are dropped before fitting.
    pub fn fit_xy<I1, I2>(&self, x: &I1, y: &I2) -> Result<LowessResult<T>, StatError>
    where
        I1: StatInput<T> + ?Sized,
        I2: StatInput<T> + ?Sized,
    {
        fit_inputs(x, y, &self.config)
    }
}

impl Lowess<f64> {
    /// Smooth column `y_col` against column `x_col` of `frame`.
    ///
    /// Returns a frame with columns `x`, `y` and, when bootstrapping,
    /// `ymin` and `ymax`.
    pub fn fit_columns(&self, frame: &Frame, x_col: &str, y_col: &str) -> Result<Frame, StatError> {
        let (x, y) = frame_columns(frame, x_col, y_col)?;
        Curve::from(self.fit_xy(x, y)?).into_frame(Orient::X)
    }

    /// Smooth the `y` column of `frame` against its `x` column.
    pub fn fit_frame(&self, frame: &Frame) -> Result<Frame, StatError> {
        self.fit_columns(frame, "x", "y")
    }

    /// Fit each group independently and return every group's own result.
    pub fn transform_each(
        &self,
        data: &Frame,
        groupby: &GroupBy,
        orient: Orient,
    ) -> Result<Vec<(GroupKey, Result<Frame, StatError>)>, StatError> {
        transform_curves_each(data, groupby, orient, |x, y| {
            Ok(Curve::from(self.fit_xy(x, y)?))
        })
    }
}

impl Stat for Lowess<f64> {
    fn transform(
        &self,
        data: &Frame,
        groupby: &GroupBy,
        orient: Orient,
        _scales: &Scales,
    ) -> Result<Frame, StatError> {
        transform_curves(data, groupby, orient, |x, y| {
            Ok(Curve::from(self.fit_xy(x, y)?))
        })
    }
}
