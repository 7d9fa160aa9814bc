//! # statrecipes: Statistical transforms for declarative plotting
//!
//! Custom stats, moves and marks for a grammar-of-graphics plotting host.
//! Each transform plugs into the host's extension protocol ([`Stat`],
//! [`Move`], [`Mark`]) and can also be called standalone.
//!
//! [`Stat`]: prelude::Stat
//! [`Move`]: prelude::Move
//! [`Mark`]: prelude::Mark
//!
//! ## What is in the box?
//!
//! * **Lowess**: Locally weighted linear smoothing over an evenly spaced grid,
//!   with an optional bootstrap percentile confidence band.
//! * **PolyFitWithCI**: Global polynomial fit with a normal-theory band.
//! * **RegressionWithCI / PolyFitCI**: OLS fit with a Student-t band.
//! * **Rolling**: Rolling-window aggregation within each group.
//! * **LineLabel / StraightLine**: End-of-line labels and reference lines.
//!
//! ## Quick Start
//!
//! ```rust
//! use statrecipes::prelude::*;
//!
//! let x: Vec<f64> = (0..50).map(|i| i as f64 / 5.0).collect();
//! let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();
//!
//! // Build the stat
//! let model: Lowess<f64> = Lowess::new()
//!     .fraction(0.3)      // Use 30% of data for each local fit
//!     .gridsize(25)       // Evaluate on 25 grid points
//!     .bootstrap(50)      // 50 resamples for the band
//!     .seed(42)
//!     .build()?;
//!
//! // Fit the model to the data
//! let result = model.fit_xy(&x, &y)?;
//! assert_eq!(result.len(), 25);
//! assert!(result.has_band());
//!
//! println!("{}", result);
//! # Result::<(), StatError>::Ok(())
//! ```
//!
//! ### Host protocol
//!
//! ```rust
//! use statrecipes::prelude::*;
//!
//! let data = Frame::new()
//!     .with_column("x", vec![0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0])?
//!     .with_column("y", vec![0.0, 1.0, 4.0, 9.0, 1.0, 2.0, 5.0, 10.0])?
//!     .with_column("g", vec!["a", "a", "a", "a", "b", "b", "b", "b"])?;
//!
//! let stat = PolyFitWithCI::new().order(2).gridsize(10).build()?;
//! let out = stat.transform(&data, &GroupBy::new(["g"]), Orient::X, &Scales::new())?;
//!
//! assert_eq!(out.n_rows(), 20);
//! assert_eq!(out.names(), ["g", "x", "y", "ymin", "ymax"]);
//! # Result::<(), StatError>::Ok(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Layer 7: api / recipes   builders → validated stats, moves and marks
//! Layer 6: adapters        standalone and grouped calling conventions
//! Layer 5: engine          validation, execution, results
//! Layer 4: evaluation      bootstrap and analytic bands
//! Layer 3: algorithms      local regression, robustness, polyfit, rolling
//! Layer 2: math            kernels, scale, quantiles, distributions, linalg
//! Layer 1: primitives      errors, frame, window, sorting, grid
//! Protocol                 Stat / Move / Mark, GroupBy, Orient, Scales, Canvas
//! ```
//!
//! ## Features
//!
//! * `parallel` (default): run bootstrap replicates and groups on rayon.
//!
//! ## References
//!
//! - Cleveland, W. S. (1979). "Robust Locally Weighted Regression and Smoothing Scatterplots"
//! - Efron, B. and Tibshirani, R. (1993). "An Introduction to the Bootstrap"

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - fitting and aggregation algorithms.
mod algorithms;

// Layer 4: Evaluation - confidence bands.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// Layer 6: Adapters - calling conventions.
mod adapters;

// High-level fluent API for LOWESS smoothing.
mod api;

// Stats, moves and marks beyond LOWESS.
mod recipes;

/// Host extension protocol.
pub mod protocol;

/// Standard prelude.
pub mod prelude {
    pub use crate::adapters::input::StatInput;
    pub use crate::adapters::standalone::Curve;
    pub use crate::algorithms::rolling::{Aggregation, Closed, WindowType};
    pub use crate::api::{
        DEFAULT_CONFIDENCE_LEVEL, ErrorKind, EvaluationMode, Lowess, LowessBuilder,
        LowessResult, RobustnessMethod, StatError, WeightFunction,
    };
    pub use crate::evaluation::bands::ConfidenceBand;
    pub use crate::primitives::frame::{Column, Frame, KeyValue};
    pub use crate::protocol::canvas::{
        DrawCommand, HAlign, LineProps, LineStyle, RecordingCanvas, TextProps, VAlign,
    };
    pub use crate::protocol::groupby::GroupKey;
    pub use crate::protocol::{Canvas, GroupBy, Mark, Move, Orient, Scales, Stat};
    pub use crate::recipes::line_label::LineLabel;
    pub use crate::recipes::polyfit::{PolyFitBuilder, PolyFitWithCI};
    pub use crate::recipes::regression::{
        Layers, PolyFitCI, PolyFitCIBuilder, RegressionBuilder, RegressionWithCI,
    };
    pub use crate::recipes::rolling::{Rolling, RollingBuilder};
    pub use crate::recipes::straight_line::StraightLine;
}

// Internal modules for development and testing.
//
// Not part of the stable API.
#[doc(hidden)]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
    pub mod recipes {
        pub use crate::recipes::*;
    }
}
