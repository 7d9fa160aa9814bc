//! Input abstractions for standalone calls.
//!
//! ## Purpose
//!
//! This module lets `fit_xy` accept slices, vectors and one-dimensional
//! `ndarray` arrays through a single trait.
//!
//! ## Design notes
//!
//! * **Zero-copy**: Every implementation hands out a view of the caller's buffer.
//! * **Fail-fast**: Non-contiguous arrays are rejected instead of copied.
//!
//! ## Invariants
//!
//! * Returned slices cover every element of the input container.
//!
//! ## Non-goals
//!
//! * This module does not drop missing values (handled by the engine).

// External dependencies
use ndarray::{ArrayBase, Data, Ix1};
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::StatError;

/// Types that can be passed as a column of observations.
pub trait StatInput<T: Float> {
    /// View the input as a contiguous slice.
    fn as_stat_slice(&self) -> Result<&[T], StatError>;
}

impl<T: Float> StatInput<T> for [T] {
    fn as_stat_slice(&self) -> Result<&[T], StatError> {
        Ok(self)
    }
}

impl<T: Float> StatInput<T> for Vec<T> {
    fn as_stat_slice(&self) -> Result<&[T], StatError> {
        Ok(self.as_slice())
    }
}

impl<T: Float, const N: usize> StatInput<T> for [T; N] {
    fn as_stat_slice(&self) -> Result<&[T], StatError> {
        Ok(self.as_slice())
    }
}

impl<T: Float, S> StatInput<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
{
    fn as_stat_slice(&self) -> Result<&[T], StatError> {
        self.as_slice().ok_or(StatError::NonContiguousInput)
    }
}
