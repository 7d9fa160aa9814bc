//! Error types for statistical transforms.
//!
//! ## Purpose
//!
//! This module defines every error condition a stat, move or mark can raise:
//! configuration validation at build time, data insufficiency at call time,
//! and malformed input frames.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending value and the required range.
//! * **Taxonomy**: Every variant maps to an [`ErrorKind`] via [`StatError::kind`].
//! * **Group-local**: Failures inside a grouped call are wrapped with the group key.
//!
//! ## Key concepts
//!
//! 1. **Configuration errors**: Raised by `build()`, never deferred to call time.
//! 2. **Insufficient data**: Raised per call (or per group) when a fit is meaningless.
//! 3. **Input errors**: Missing or non-numeric columns, mismatched lengths.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use std::error::Error;

// ============================================================================
// Error Kind
// ============================================================================

/// Coarse classification of a [`StatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid parameter detected when building a stat.
    Configuration,

    /// Too few observations (or distinct x-values) for a meaningful fit.
    InsufficientData,

    /// Malformed input frame or slice.
    Input,
}

// ============================================================================
// Error Type
// ============================================================================

/// Error type for all statistical transforms in this crate.
#[derive(Debug, Clone, PartialEq)]
pub enum StatError {
    /// Smoothing fraction must be in the range (0, 1].
    InvalidFraction(f64),

    /// Output grid must contain at least one point.
    InvalidGridsize(usize),

    /// Number of bootstrap resamples must be positive.
    InvalidBootstrap(usize),

    /// Confidence level must be strictly between 0 and 1.
    InvalidConfidence(f64),

    /// Significance level must be strictly between 0 and 1.
    InvalidAlpha(f64),

    /// Delta must be finite and non-negative.
    InvalidDelta(f64),

    /// Robustness iterations must be at most 1000.
    InvalidIterations(usize),

    /// Polynomial order must be positive.
    InvalidOrder(usize),

    /// Rolling window must contain at least one observation.
    InvalidWindow(usize),

    /// Gaussian window standard deviation must be finite and positive.
    InvalidWindowStd(f64),

    /// Aggregation is not available for the selected window type.
    UnsupportedAggregation {
        /// Name of the aggregation.
        agg: &'static str,
        /// Name of the window type.
        window: &'static str,
    },

    /// Parameter was set multiple times in a builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },

    /// Orientation must be `"x"` or `"y"`.
    InvalidOrient(String),

    /// Number of observations is below the minimum requirement.
    TooFewPoints {
        /// Number of observations provided (after dropping missing values).
        got: usize,
        /// Minimum required observations.
        min: usize,
    },

    /// Too few distinct x-values to support the smoothing fraction.
    InsufficientDistinctValues {
        /// Number of distinct x-values.
        distinct: usize,
        /// Configured smoothing fraction.
        fraction: f64,
        /// Smallest fraction the data supports.
        min_fraction: f64,
    },

    /// Frame has no column with the requested name.
    MissingColumn(String),

    /// Two columns share a name.
    DuplicateColumn(String),

    /// Column exists but holds categorical values.
    NotNumeric(String),

    /// Column length differs from the frame's row count.
    LengthMismatch {
        /// Name of the offending column.
        column: String,
        /// Row count of the frame.
        expected: usize,
        /// Length of the column.
        got: usize,
    },

    /// Array input is not contiguous in memory.
    NonContiguousInput,

    /// Fitted curve does not line up with the output grid.
    DimensionMismatch {
        /// Expected number of grid values.
        expected: usize,
        /// Number of values produced.
        got: usize,
    },

    /// Polynomial design matrix is rank deficient.
    SingularDesign {
        /// Number of observations.
        n: usize,
        /// Polynomial order.
        order: usize,
    },

    /// A per-group call failed.
    Group {
        /// Display form of the failing group's key.
        key: String,
        /// Error raised by the group's call.
        source: Box<StatError>,
    },
}

impl StatError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFraction(_)
            | Self::InvalidGridsize(_)
            | Self::InvalidBootstrap(_)
            | Self::InvalidConfidence(_)
            | Self::InvalidAlpha(_)
            | Self::InvalidDelta(_)
            | Self::InvalidIterations(_)
            | Self::InvalidOrder(_)
            | Self::InvalidWindow(_)
            | Self::InvalidWindowStd(_)
            | Self::UnsupportedAggregation { .. }
            | Self::DuplicateParameter { .. }
            | Self::InvalidOrient(_) => ErrorKind::Configuration,
            Self::TooFewPoints { .. } | Self::InsufficientDistinctValues { .. } => {
                ErrorKind::InsufficientData
            }
            Self::MissingColumn(_)
            | Self::DuplicateColumn(_)
            | Self::NotNumeric(_)
            | Self::LengthMismatch { .. }
            | Self::NonContiguousInput
            | Self::DimensionMismatch { .. }
            | Self::SingularDesign { .. } => ErrorKind::Input,
            Self::Group { source, .. } => source.kind(),
        }
    }

    /// Wrap this error with the key of the group whose call raised it.
    pub fn in_group(self, key: impl Into<String>) -> Self {
        Self::Group {
            key: key.into(),
            source: Box::new(self),
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for StatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InvalidFraction(frac) => {
                write!(f, "Invalid fraction: {frac} (must be > 0 and <= 1)")
            }
            Self::InvalidGridsize(size) => {
                write!(f, "Invalid gridsize: {size} (must be a positive integer)")
            }
            Self::InvalidBootstrap(n) => {
                write!(f, "Invalid num_bootstrap: {n} (must be a positive integer)")
            }
            Self::InvalidConfidence(level) => {
                write!(f, "Invalid confidence level: {level} (must be > 0 and < 1)")
            }
            Self::InvalidAlpha(alpha) => {
                write!(f, "Invalid alpha: {alpha} (must be > 0 and < 1)")
            }
            Self::InvalidDelta(delta) => {
                write!(f, "Invalid delta: {delta} (must be finite and >= 0)")
            }
            Self::InvalidIterations(iter) => {
                write!(f, "Invalid iterations: {iter} (must be in [0, 1000])")
            }
            Self::InvalidOrder(order) => {
                write!(f, "Invalid order: {order} (must be a positive integer)")
            }
            Self::InvalidWindow(window) => {
                write!(f, "Invalid window: {window} (must be at least 1)")
            }
            Self::InvalidWindowStd(std) => {
                write!(f, "Invalid window std: {std} (must be finite and > 0)")
            }
            Self::UnsupportedAggregation { agg, window } => {
                write!(f, "Aggregation '{agg}' is not supported for '{window}' windows")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
            Self::InvalidOrient(orient) => {
                write!(f, "Invalid orient: '{orient}' (must be \"x\" or \"y\")")
            }
            Self::TooFewPoints { got, min } => {
                write!(f, "Too few points: got {got}, need at least {min}")
            }
            Self::InsufficientDistinctValues {
                distinct,
                fraction,
                min_fraction,
            } => {
                write!(
                    f,
                    "Insufficient data: {distinct} distinct x-values cannot support fraction {fraction} (must be >= {min_fraction:.6})"
                )
            }
            Self::MissingColumn(name) => write!(f, "Missing column: '{name}'"),
            Self::DuplicateColumn(name) => write!(f, "Duplicate column: '{name}'"),
            Self::NotNumeric(name) => write!(f, "Column '{name}' is not numeric"),
            Self::LengthMismatch {
                column,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Length mismatch: column '{column}' has {got} rows, frame has {expected}"
                )
            }
            Self::NonContiguousInput => write!(f, "Array input must be contiguous in memory"),
            Self::DimensionMismatch { expected, got } => {
                write!(f, "Dimension mismatch: expected {expected} grid values, got {got}")
            }
            Self::SingularDesign { n, order } => {
                write!(
                    f,
                    "Design matrix is singular for order {order} with {n} observations"
                )
            }
            Self::Group { key, source } => write!(f, "Group {key}: {source}"),
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for StatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Group { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
