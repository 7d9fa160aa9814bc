//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the fitting and aggregation algorithms: local
//! weighted regression, robustness reweighting, interpolation, global
//! polynomial fits and rolling windows.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Linear interpolation utilities.
pub mod interpolation;

/// Global polynomial fits.
pub mod polyfit;

/// Local weighted linear regression.
pub mod regression;

/// Robustness weights.
pub mod robustness;

/// Rolling-window aggregation.
pub mod rolling;
