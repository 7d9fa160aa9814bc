//! Layer 6: Adapters
//!
//! # Purpose
//!
//! This layer adapts the engine to the two ways a fit is called:
//!
//! - **Standalone**: Plain columns in, a result (or result frame) out
//! - **Grouped**: The host protocol, one fit per group through `GroupBy`
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters ← You are here
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Slice, vector and array inputs.
pub mod input;

/// Standalone calls and result frames.
pub mod standalone;

/// Grouped calls through the host protocol.
pub mod grouped;
