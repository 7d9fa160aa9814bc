//! Layer 7: Recipes
//!
//! # Purpose
//!
//! Ready-made stats, moves and marks beyond LOWESS:
//!
//! - **PolyFitWithCI**: Polynomial fit with a normal-theory band
//! - **RegressionWithCI / PolyFitCI**: OLS fit with a Student-t band
//! - **Rolling**: Rolling-window aggregation per group
//! - **LineLabel / StraightLine**: Marks drawn onto a host canvas

/// Polynomial fit with a normal-theory band.
pub mod polyfit;

/// Regression with a Student-t band.
pub mod regression;

/// Rolling-window move.
pub mod rolling;

/// End-of-line labels.
pub mod line_label;

/// Straight reference lines.
pub mod straight_line;
