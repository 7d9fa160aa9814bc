//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates fits: configuration and data validation, the
//! LOWESS execution loop with optional bootstrap, and result assembly.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// LOWESS execution engine.
pub mod executor;

/// Result types.
pub mod output;

/// Configuration and data validation.
pub mod validator;
