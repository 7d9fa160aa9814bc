//! Host extension protocol.
//!
//! ## Purpose
//!
//! This module defines the three capabilities a plotting host can call:
//! a [`Stat`] turns grouped observations into a new frame, a [`Move`]
//! rewrites values within each group, and a [`Mark`] draws geometry. It
//! also provides the collaborators those calls receive: the orientation,
//! an opaque scale map, the [`GroupBy`] apply utility and a [`Canvas`].
//!
//! ## Design notes
//!
//! * **One entry point**: Each capability exposes a single method.
//! * **Pure**: Transforms never mutate the input frame.
//!
//! ## Non-goals
//!
//! * This module does not resolve scales or lay out figures.

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Internal dependencies
use crate::primitives::errors::StatError;
use crate::primitives::frame::Frame;

/// Recording canvas and drawing properties.
pub mod canvas;

/// Group-wise apply utility.
pub mod groupby;

pub use canvas::Canvas;
pub use groupby::GroupBy;

// ============================================================================
// Orientation
// ============================================================================

/// Axis along which the independent variable runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orient {
    /// Independent variable on `x`.
    #[default]
    X,

    /// Independent variable on `y`.
    Y,
}

impl Orient {
    /// The opposite axis.
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// Axis name, `"x"` or `"y"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }

    /// Names of the (independent, dependent) columns.
    pub const fn columns(self) -> (&'static str, &'static str) {
        (self.name(), self.other().name())
    }
}

impl FromStr for Orient {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            other => Err(StatError::InvalidOrient(other.to_string())),
        }
    }
}

impl Display for Orient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

// ============================================================================
// Scales
// ============================================================================

/// Opaque scale metadata handed through by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scales {
    entries: BTreeMap<String, String>,
}

impl Scales {
    /// Create an empty scale map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scale description for a variable.
    pub fn insert(&mut self, var: impl Into<String>, scale: impl Into<String>) {
        self.entries.insert(var.into(), scale.into());
    }

    /// Look up the scale description of a variable.
    pub fn get(&self, var: &str) -> Option<&str> {
        self.entries.get(var).map(String::as_str)
    }
}

// ============================================================================
// Capability Traits
// ============================================================================

/// Statistical transform: grouped observations in, a new frame out.
pub trait Stat: Send + Sync {
    /// Transform `data`, applying the fit independently to each group.
    fn transform(
        &self,
        data: &Frame,
        groupby: &GroupBy,
        orient: Orient,
        scales: &Scales,
    ) -> Result<Frame, StatError>;
}

/// Positional adjustment: returns a frame with the same rows and columns.
pub trait Move: Send + Sync {
    /// Adjust values within each group of `data`.
    fn transform(
        &self,
        data: &Frame,
        groupby: &GroupBy,
        orient: Orient,
        scales: &Scales,
    ) -> Result<Frame, StatError>;
}

/// Geometry drawn onto a host canvas.
pub trait Mark: Send + Sync {
    /// Draw `data` group by group.
    fn render(
        &self,
        data: &Frame,
        groupby: &GroupBy,
        orient: Orient,
        scales: &Scales,
        canvas: &mut dyn Canvas,
    ) -> Result<(), StatError>;
}
