//! Bootstrap percentile confidence bands.
//!
//! ## Purpose
//!
//! This module resamples observations with replacement, refits each resample
//! over the same grid and reads the band off the empirical quantiles of the
//! replicate curves at each grid point.
//!
//! ## Design notes
//!
//! * **Seeding**: A master `StdRng` (seeded, or from OS entropy) draws one
//!   seed per replicate up front. Each replicate owns its generator, so the
//!   parallel and sequential paths produce identical bands.
//! * **Refit**: The fitting routine is injected as a closure, keeping this
//!   layer independent of the engine.
//! * **Quantiles**: Linear interpolation between order statistics at
//!   `(1 - c) / 2` and `(1 + c) / 2`.
//!
//! ## Invariants
//!
//! * Every replicate has the same size as the original sample.
//! * Every replicate curve has one value per grid point.
//!
//! ## Non-goals
//!
//! * This module does not mask unstable grid points.
//! * This module does not implement BCa or studentized bootstraps.

// External dependencies
use num_traits::Float;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::evaluation::bands::ConfidenceBand;
use crate::math::quantile::quantile_pair;
use crate::primitives::errors::StatError;
use crate::primitives::sorting::{SortedData, sort_by_x};

// ============================================================================
// Configuration
// ============================================================================

/// Settings for a bootstrap band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapConfig<T> {
    /// Number of resamples.
    pub replicates: usize,

    /// Nominal two-sided coverage.
    pub confidence_level: T,

    /// Seed of the master generator; `None` draws from OS entropy.
    pub seed: Option<u64>,

    /// Run replicates on the rayon pool.
    pub parallel: bool,
}

impl<T: Float> BootstrapConfig<T> {
    /// Lower and upper quantile probabilities.
    pub fn quantile_levels(&self) -> (T, T) {
        let two = T::one() + T::one();
        (
            (T::one() - self.confidence_level) / two,
            (T::one() + self.confidence_level) / two,
        )
    }
}

// ============================================================================
// Resampling
// ============================================================================

/// One seed per replicate, drawn in order from the master generator.
pub fn replicate_seeds(seed: Option<u64>, count: usize) -> Vec<u64> {
    let mut master = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    (0..count).map(|_| master.random::<u64>()).collect()
}

/// Draw `x.len()` pairs with replacement and sort them by x.
pub fn resample<T: Float>(x: &[T], y: &[T], seed: u64) -> SortedData<T> {
    let n = x.len();
    let mut rng = StdRng::seed_from_u64(seed);

    let (xs, ys): (Vec<T>, Vec<T>) = (0..n)
        .map(|_| {
            let i = rng.random_range(0..n);
            (x[i], y[i])
        })
        .unzip();

    sort_by_x(xs, ys)
}

// ============================================================================
// Band Computation
// ============================================================================

/// Bootstrap percentile band around `estimate`.
///
/// `refit` maps a sorted resample to its curve on the estimate's grid. The
/// returned band is widened to contain `estimate`.
pub fn bootstrap_band<T, F>(
    x: &[T],
    y: &[T],
    estimate: &[T],
    config: &BootstrapConfig<T>,
    refit: F,
) -> Result<ConfidenceBand<T>, StatError>
where
    T: Float + Send + Sync,
    F: Fn(&SortedData<T>) -> Result<Vec<T>, StatError> + Sync,
{
    let grid_len = estimate.len();
    let seeds = replicate_seeds(config.seed, config.replicates);

    debug!(
        replicates = config.replicates,
        n = x.len(),
        grid = grid_len,
        parallel = config.parallel,
        "bootstrapping confidence band"
    );

    let run = |(b, &seed): (usize, &u64)| -> Result<Vec<T>, StatError> {
        trace!(replicate = b, seed, "refitting resample");
        let curve = refit(&resample(x, y, seed))?;
        if curve.len() != grid_len {
            return Err(StatError::DimensionMismatch {
                expected: grid_len,
                got: curve.len(),
            });
        }
        Ok(curve)
    };

    #[cfg(feature = "parallel")]
    let curves: Vec<Vec<T>> = if config.parallel {
        seeds
            .par_iter()
            .enumerate()
            .map(run)
            .collect::<Result<_, _>>()?
    } else {
        seeds.iter().enumerate().map(run).collect::<Result<_, _>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let curves: Vec<Vec<T>> = seeds.iter().enumerate().map(run).collect::<Result<_, _>>()?;

    let (p_lo, p_hi) = config.quantile_levels();
    let mut column = vec![T::zero(); curves.len()];
    let (lower, upper) = (0..grid_len)
        .map(|j| {
            for (slot, curve) in column.iter_mut().zip(&curves) {
                *slot = curve[j];
            }
            quantile_pair(&mut column, p_lo, p_hi)
        })
        .unzip();

    Ok(ConfidenceBand { lower, upper }.contain(estimate))
}
