//! Empirical quantiles.
//!
//! Quantiles interpolate linearly between order statistics: for sorted values
//! `v[0..n]` and probability `p`, the position is `h = p * (n - 1)` and the
//! result is `v[floor(h)] + (h - floor(h)) * (v[floor(h) + 1] - v[floor(h)])`.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

/// Quantile of an ascending slice; NaN when empty.
#[inline]
pub fn quantile_sorted<T: Float>(sorted: &[T], p: T) -> T {
    let n = sorted.len();
    if n == 0 {
        return T::nan();
    }
    if n == 1 {
        return sorted[0];
    }

    let last = T::from(n - 1).unwrap_or_else(T::zero);
    let h = (p.max(T::zero()).min(T::one())) * last;
    let lo = h.floor().to_usize().unwrap_or(0).min(n - 1);
    let hi = (lo + 1).min(n - 1);
    let frac = h - h.floor();

    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Lower and upper quantiles of `vals`; the slice is sorted in place.
#[inline]
pub fn quantile_pair<T: Float>(vals: &mut [T], p_lo: T, p_hi: T) -> (T, T) {
    vals.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));
    (quantile_sorted(vals, p_lo), quantile_sorted(vals, p_hi))
}
