//! Linear interpolation between fitted anchors.
//!
//! ## Purpose
//!
//! With a positive `delta`, only anchor points spaced more than `delta` apart
//! are fitted; the points in between are filled by linear interpolation. The
//! same routine maps (x, y) pairs onto an evaluation grid.
//!
//! ## Invariants
//!
//! * Abscissae are sorted in ascending order.
//! * Tied abscissae receive the average of their anchors.

// External dependencies
use num_traits::Float;

/// Fill `y[last_fitted + 1..current]` on the line between the two anchors.
pub fn interpolate_gap<T: Float>(x: &[T], y: &mut [T], last_fitted: usize, current: usize) {
    if current <= last_fitted + 1 {
        return;
    }

    let x0 = x[last_fitted];
    let x1 = x[current];
    let y0 = y[last_fitted];
    let y1 = y[current];

    let denom = x1 - x0;
    if denom <= T::zero() {
        let avg = (y0 + y1) / (T::one() + T::one());
        y[(last_fitted + 1)..current].fill(avg);
        return;
    }

    let slope = (y1 - y0) / denom;
    for k in (last_fitted + 1)..current {
        y[k] = y0 + (x[k] - x0) * slope;
    }
}

/// Piecewise-linear interpolation of the curve `(xp, fp)` at each `x`.
///
/// `xp` must be ascending; values outside its range take the nearest end value.
pub fn interpolate_onto<T: Float>(xp: &[T], fp: &[T], x: &[T]) -> Vec<T> {
    if xp.is_empty() {
        return vec![T::nan(); x.len()];
    }
    let last = xp.len() - 1;

    x.iter()
        .map(|&xi| {
            if xi <= xp[0] {
                return fp[0];
            }
            if xi >= xp[last] {
                return fp[last];
            }
            // First index with xp[hi] >= xi; 1 <= hi <= last here
            let hi = xp.partition_point(|&v| v < xi);
            let lo = hi - 1;
            let span = xp[hi] - xp[lo];
            if span <= T::zero() {
                return fp[hi];
            }
            fp[lo] + (xi - xp[lo]) / span * (fp[hi] - fp[lo])
        })
        .collect()
}
