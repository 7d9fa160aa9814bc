//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used by the transforms:
//! - Kernel functions for distance-based weighting
//! - Robust scale and medians
//! - Empirical quantiles
//! - Normal and Student-t critical values
//! - Dense least squares for polynomial fits
//!
//! These are reusable building blocks with no algorithm-specific logic.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Normal and Student-t critical values.
pub mod distribution;

/// Kernel (weight) functions for distance-based weighting.
pub mod kernel;

/// Dense linear algebra (nalgebra).
pub mod linalg;

/// Empirical quantiles.
pub mod quantile;

/// Robust scale estimation and medians.
pub mod scaling;
