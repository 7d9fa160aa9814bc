//! Cleaning and sorting of observation pairs.
//!
//! ## Purpose
//!
//! This module prepares raw (x, y) observations for fitting: rows with a
//! missing or non-finite coordinate are dropped, the remainder is sorted by x,
//! and the number of distinct x-values is counted for precondition checks.
//!
//! ## Design notes
//!
//! * **Stability**: Uses stable sorting to preserve the relative order of equal x-values.
//! * **Fast path**: Already sorted input is copied without sorting.
//!
//! ## Invariants
//!
//! * Output x-values are finite and non-decreasing.
//! * Output y-values are finite and paired with their original x.
//!
//! ## Non-goals
//!
//! * This module does not validate configuration or fit anything.

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

// ============================================================================
// Data Structures
// ============================================================================

/// Observations sorted by x, with missing rows removed.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedData<T> {
    /// Sorted x-coordinates.
    pub x: Vec<T>,

    /// Y-coordinates reordered to match `x`.
    pub y: Vec<T>,
}

impl<T: Float> SortedData<T> {
    /// Number of observations.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if no observations remain.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Number of distinct x-values.
    pub fn distinct_x(&self) -> usize {
        count_distinct(&self.x)
    }
}

// ============================================================================
// Cleaning and Sorting
// ============================================================================

/// Drop every pair where either coordinate is NaN or infinite.
pub fn drop_missing<T: Float>(x: &[T], y: &[T]) -> (Vec<T>, Vec<T>) {
    x.iter()
        .zip(y)
        .filter(|(xi, yi)| xi.is_finite() && yi.is_finite())
        .map(|(&xi, &yi)| (xi, yi))
        .unzip()
}

/// Drop missing pairs, then sort the rest by x in ascending order.
#[inline]
pub fn clean_and_sort<T: Float>(x: &[T], y: &[T]) -> SortedData<T> {
    let (x, y) = drop_missing(x, y);
    sort_by_x(x, y)
}

/// Sort finite observations by x in ascending order.
///
/// 1. Checks if data is already sorted (fast path).
/// 2. Pairs x with original indices and performs a stable sort.
/// 3. Gathers y through the permutation.
#[inline]
pub fn sort_by_x<T: Float>(x: Vec<T>, y: Vec<T>) -> SortedData<T> {
    if x.windows(2).all(|w| w[0] <= w[1]) {
        return SortedData { x, y };
    }

    // Sort (x, index) only to keep the tuples small
    let mut pairs: Vec<(T, usize)> = x.iter().enumerate().map(|(i, &xi)| (xi, i)).collect();
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    SortedData {
        x: pairs.iter().map(|p| p.0).collect(),
        y: pairs.iter().map(|p| y[p.1]).collect(),
    }
}

/// Count distinct values in a sorted slice.
#[inline]
pub fn count_distinct<T: Float>(sorted: &[T]) -> usize {
    if sorted.is_empty() {
        return 0;
    }
    1 + sorted.windows(2).filter(|w| w[1] != w[0]).count()
}
