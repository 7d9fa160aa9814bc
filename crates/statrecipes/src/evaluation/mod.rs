//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer turns fitted curves into confidence bands: bootstrap
//! percentile bands for LOWESS and analytic bands for polynomial fits.
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
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Confidence band type and analytic polynomial bands.
pub mod bands;

/// Bootstrap percentile bands.
pub mod bootstrap;
