//! Rolling-window move.
//!
//! ## Purpose
//!
//! This module provides [`Rolling`], a move that replaces the dependent
//! variable of each group with a rolling aggregate of itself.
//!
//! ## Design notes
//!
//! * **Per group**: Windows never cross group boundaries; within a group they
//!   follow frame order.
//! * **Shape**: Rows keep their positions; only the dependent column changes.
//!
//! ## Invariants
//!
//! * The output frame has the same rows and columns as the input.
//! * The independent column is passed through untouched.

// External dependencies
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::algorithms::rolling::{Aggregation, Closed, RollingSpec, WindowType, rolling};
use crate::engine::validator::Validator;
use crate::primitives::errors::StatError;
use crate::primitives::frame::Frame;
use crate::protocol::{GroupBy, Move, Orient, Scales};

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for [`Rolling`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollingBuilder {
    /// Window length.
    pub window: Option<usize>,

    /// Taper shape.
    pub window_type: Option<WindowType>,

    /// Statistic computed over each window.
    pub agg: Option<Aggregation>,

    /// Which endpoints each window includes.
    pub closed: Option<Closed>,

    /// Minimum valid values for a non-missing result.
    pub min_periods: Option<usize>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    #[serde(skip)]
    pub duplicate_param: Option<&'static str>,
}

impl RollingBuilder {
    /// Set the window length.
    pub fn window(mut self, window: usize) -> Self {
        if self.window.is_some() {
            self.duplicate_param = Some("window");
        }
        self.window = Some(window);
        self
    }

    /// Set the taper shape.
    pub fn window_type(mut self, window_type: WindowType) -> Self {
        if self.window_type.is_some() {
            self.duplicate_param = Some("window_type");
        }
        self.window_type = Some(window_type);
        self
    }

    /// Set the aggregation.
    pub fn agg(mut self, agg: Aggregation) -> Self {
        if self.agg.is_some() {
            self.duplicate_param = Some("agg");
        }
        self.agg = Some(agg);
        self
    }

    /// Set the closing rule.
    pub fn closed(mut self, closed: Closed) -> Self {
        if self.closed.is_some() {
            self.duplicate_param = Some("closed");
        }
        self.closed = Some(closed);
        self
    }

    /// Set the minimum number of valid values per window.
    pub fn min_periods(mut self, min_periods: usize) -> Self {
        if self.min_periods.is_some() {
            self.duplicate_param = Some("min_periods");
        }
        self.min_periods = Some(min_periods);
        self
    }

    /// Validate the configuration and build the move.
    pub fn build(self) -> Result<Rolling, StatError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let spec = RollingSpec {
            window: self.window.unwrap_or(2),
            window_type: self.window_type.unwrap_or_default(),
            agg: self.agg.unwrap_or_default(),
            closed: self.closed.unwrap_or_default(),
            min_periods: self.min_periods.unwrap_or(1),
        };
        Validator::validate_rolling(spec.window, spec.window_type, spec.agg)?;

        Ok(Rolling { spec })
    }
}

// ============================================================================
// Move
// ============================================================================

/// Rolling aggregation of the dependent variable within each group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rolling {
    spec: RollingSpec,
}

impl Rolling {
    /// Start configuring a rolling move (window 2, boxcar mean, closed neither).
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> RollingBuilder {
        RollingBuilder::default()
    }

    /// Validated window parameters.
    pub fn spec(&self) -> &RollingSpec {
        &self.spec
    }

    /// Roll a single sequence of values.
    pub fn apply(&self, values: &[f64]) -> Vec<f64> {
        rolling(values, &self.spec)
    }
}

impl Move for Rolling {
    fn transform(
        &self,
        data: &Frame,
        groupby: &GroupBy,
        orient: Orient,
        _scales: &Scales,
    ) -> Result<Frame, StatError> {
        let var = orient.other().name();
        let values = data.numeric(var)?;
        let mut out = values.to_vec();

        for group in groupby.groups(data) {
            let part: Vec<f64> = group.rows.iter().map(|&i| values[i]).collect();
            for (&row, v) in group.rows.iter().zip(self.apply(&part)) {
                out[row] = v;
            }
        }

        let mut frame = data.clone();
        frame.insert(var, out)?;
        Ok(frame)
    }
}
