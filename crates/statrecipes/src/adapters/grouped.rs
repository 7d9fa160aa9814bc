//! Host protocol calling convention.
//!
//! ## Purpose
//!
//! This module adapts a per-group curve fit to the `Stat` protocol: it
//! resolves which frame columns hold the independent and dependent
//! variables, drops missing rows, runs the fit once per group through
//! [`GroupBy`] and names the result columns after the orientation.
//!
//! ## Design notes
//!
//! * **Column resolution**: Uses the `x` and `y` columns when both exist;
//!   otherwise the first two numeric non-grouping columns stand in for them.
//! * **Orientation**: `Orient::Y` fits `x` as a function of `y`.
//!
//! ## Non-goals
//!
//! * This module does not implement any fit itself.

// Internal dependencies
use crate::adapters::standalone::Curve;
use crate::primitives::errors::StatError;
use crate::primitives::frame::Frame;
use crate::primitives::sorting::drop_missing;
use crate::protocol::groupby::GroupKey;
use crate::protocol::{GroupBy, Orient};

/// Names of the (independent, dependent) columns of `frame`.
pub fn resolve_columns(
    frame: &Frame,
    groupby: &GroupBy,
    orient: Orient,
) -> Result<(String, String), StatError> {
    let (ind, dep) = orient.columns();
    if frame.has_column("x") && frame.has_column("y") {
        return Ok((ind.to_string(), dep.to_string()));
    }

    // Positional fallback: first numeric column is x, second is y
    let candidates: Vec<&str> = frame
        .numeric_names()
        .into_iter()
        .filter(|name| !groupby.variables().iter().any(|v| v == name))
        .collect();

    match candidates.as_slice() {
        [first, second, ..] => {
            let (x, y) = (first.to_string(), second.to_string());
            Ok(match orient {
                Orient::X => (x, y),
                Orient::Y => (y, x),
            })
        }
        _ => {
            let missing = if frame.has_column("x") { "y" } else { "x" };
            Err(StatError::MissingColumn(missing.to_string()))
        }
    }
}

/// Fit `fit` to every group of `data` and stack the tagged result frames.
pub fn transform_curves<F>(
    data: &Frame,
    groupby: &GroupBy,
    orient: Orient,
    fit: F,
) -> Result<Frame, StatError>
where
    F: Fn(&[f64], &[f64]) -> Result<Curve, StatError> + Sync,
{
    let (ind, dep) = resolve_columns(data, groupby, orient)?;
    groupby.apply(data, |part| fit_part(part, &ind, &dep, orient, &fit))
}

/// Like [`transform_curves`], but returns every group's own result.
pub fn transform_curves_each<F>(
    data: &Frame,
    groupby: &GroupBy,
    orient: Orient,
    fit: F,
) -> Result<Vec<(GroupKey, Result<Frame, StatError>)>, StatError>
where
    F: Fn(&[f64], &[f64]) -> Result<Curve, StatError> + Sync,
{
    let (ind, dep) = resolve_columns(data, groupby, orient)?;
    Ok(groupby.apply_each(data, |part| fit_part(part, &ind, &dep, orient, &fit)))
}

fn fit_part<F>(part: &Frame, ind: &str, dep: &str, orient: Orient, fit: &F) -> Result<Frame, StatError>
where
    F: Fn(&[f64], &[f64]) -> Result<Curve, StatError>,
{
    let (x, y) = drop_missing(part.numeric(ind)?, part.numeric(dep)?);
    fit(&x, &y)?.into_frame(orient)
}
