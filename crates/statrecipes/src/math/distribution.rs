//! Critical values of the normal and Student-t distributions.
//!
//! ## Purpose
//!
//! This module turns a significance level into the multiplier applied to a
//! standard error when building a two-sided confidence band.
//!
//! ## Design notes
//!
//! * **Normal**: Acklam's rational approximation of the inverse CDF, with
//!   exact table values for the common 90/95/99% levels.
//! * **Student-t**: Delegates to `statrs`.

// External dependencies
use statrs::distribution::{ContinuousCDF, StudentsT};

// ============================================================================
// Normal Distribution
// ============================================================================

/// Two-sided normal critical value `z = Phi^-1(1 - alpha / 2)`.
pub fn normal_critical(alpha: f64) -> f64 {
    if (alpha - 0.01).abs() < 1e-6 {
        2.576
    } else if (alpha - 0.05).abs() < 1e-6 {
        1.960
    } else if (alpha - 0.10).abs() < 1e-6 {
        1.645
    } else {
        normal_quantile(1.0 - alpha / 2.0)
    }
}

/// Rational approximation of the inverse standard normal CDF.
///
/// Returns 0 outside the open interval (0, 1).
pub fn normal_quantile(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        return 0.0;
    }

    // Coefficients for central region
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239e0,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];

    // Coefficients for tail regions
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838e0,
        -2.549_732_539_343_734e0,
        4.374_664_141_464_968e0,
        2.938_163_982_698_783e0,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996e0,
        3.754_408_661_907_416e0,
    ];

    const P_LOW: f64 = 0.02425;

    let tail = |q: f64| {
        let num = ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
        let den = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
        num / den
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p > 1.0 - P_LOW {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    } else {
        let q = p - 0.5;
        let r = q * q;
        let num = (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q;
        let den = ((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0;
        num / den
    }
}

// ============================================================================
// Student-t Distribution
// ============================================================================

/// Two-sided Student-t critical value `t_{1 - alpha/2, dof}`.
///
/// Returns `None` when `dof` is zero.
pub fn t_critical(alpha: f64, dof: usize) -> Option<f64> {
    if dof == 0 {
        return None;
    }
    let dist = StudentsT::new(0.0, 1.0, dof as f64).ok()?;
    Some(dist.inverse_cdf(1.0 - alpha / 2.0))
}
