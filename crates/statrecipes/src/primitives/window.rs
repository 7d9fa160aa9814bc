//! Windowing primitives for local regression.
//!
//! This module manages the nearest-neighbour window over a sorted sample,
//! both for fits at the data points and for fits at arbitrary grid values.

// External dependencies
use num_traits::Float;

// Inclusive window bounds `[left, right]` for a local fit.
#[derive(Copy, Clone, Debug)]
pub struct Window {
    // Left boundary index (inclusive).
    pub left: usize,

    // Right boundary index (inclusive).
    pub right: usize,
}

impl Window {
    // Initialize window boundaries around index `idx`.
    #[inline]
    pub fn initialize(idx: usize, window_size: usize, n: usize) -> Self {
        debug_assert!(window_size >= 1, "initialize: window_size must be at least 1");

        if window_size >= n {
            return Self {
                left: 0,
                right: n.saturating_sub(1),
            };
        }

        let half = window_size / 2;
        let max_left = n - window_size;
        let left = idx.saturating_sub(half).min(max_left);

        Self {
            left,
            right: left + window_size - 1,
        }
    }

    // Update boundaries so the window holds the nearest neighbours of `x[current]`.
    #[inline]
    pub fn recenter<T: Float>(&mut self, x: &[T], current: usize, n: usize) {
        debug_assert!(current < n, "recenter: current index out of bounds");
        self.recenter_on(x, x[current], n);
    }

    // Update boundaries so the window holds the nearest neighbours of `target`.
    //
    // `target` need not be one of the sample values. The window only slides,
    // so callers visiting ascending targets pay amortized O(1) per step.
    #[inline]
    pub fn recenter_on<T: Float>(&mut self, x: &[T], target: T, n: usize) {
        self.left = self.left.min(n - 1);
        self.right = self.right.min(n - 1);

        // Slide right while the point after the window is closer than the leftmost point
        while self.right < n - 1 {
            let d_left = target - x[self.left];
            let d_right = x[self.right + 1] - target;

            if d_left <= d_right {
                break;
            }

            self.left += 1;
            self.right += 1;
        }

        // Slide left while the point before the window is closer than the rightmost point
        while self.left > 0 {
            let d_left = target - x[self.left - 1];
            let d_right = x[self.right] - target;

            if d_right <= d_left {
                break;
            }

            self.left -= 1;
            self.right -= 1;
        }
    }

    // Maximum distance from `target` to any point in the window.
    #[inline]
    pub fn max_distance<T: Float>(&self, x: &[T], target: T) -> T {
        T::max(target - x[self.left], x[self.right] - target).max(T::zero())
    }

    // Window size q = clamp(floor(frac * n), 2, n), with a small epsilon
    // so that fractions such as 0.3 * 10 land on the intended integer.
    // Never exceeds n, even when n < 2.
    #[inline]
    pub fn calculate_span<T: Float>(n: usize, frac: T) -> usize {
        let epsilon = T::from(1e-5).unwrap_or_else(T::epsilon);
        let n_t = T::from(n).unwrap_or_else(T::zero);
        let frac_n = (frac * n_t + epsilon).to_usize().unwrap_or(0);
        usize::max(2, frac_n).min(n)
    }

    // Number of points in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.right - self.left + 1
    }
}
