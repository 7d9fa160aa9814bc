//! Evenly spaced evaluation grids.

// External dependencies
use num_traits::Float;

/// `size` evenly spaced points over `[lo, hi]` inclusive.
///
/// A single-point grid is `[lo]`. The last point is pinned to `hi` so that
/// rounding never leaves the grid short of the data range. Points are
/// blended as `lo * (1 - t) + hi * t`, which stays finite whenever both
/// bounds are, even when `hi - lo` overflows.
pub fn linspace<T: Float>(lo: T, hi: T, size: usize) -> Vec<T> {
    match size {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let steps = T::from(size - 1).unwrap_or_else(T::one);
            let mut grid: Vec<T> = (0..size)
                .map(|i| {
                    let t = T::from(i).unwrap_or_else(T::zero) / steps;
                    lo * (T::one() - t) + hi * t
                })
                .collect();
            grid[size - 1] = hi;
            grid
        }
    }
}
