//! Standalone calling convention.
//!
//! ## Purpose
//!
//! This module runs a fit on plain columns (slices, vectors, arrays or two
//! named frame columns) outside of any host, and converts grid-aligned
//! curves into result frames.
//!
//! ## Design notes
//!
//! * **Thin**: Delegates all numeric work to the engine.
//! * **Naming**: Result columns follow the orientation: the grid goes into the
//!   independent axis column, the curve and band into the dependent one
//!   (`y`, `ymin`, `ymax` for `Orient::X`).
//!
//! ## Invariants
//!
//! * Result frames have one row per grid point.
//! * Band columns are present iff the curve carries a band.
//!
//! ## Non-goals
//!
//! * This module does not handle grouping (see `grouped`).

// Internal dependencies
use crate::adapters::input::StatInput;
use crate::algorithms::regression::WLSSolver;
use crate::engine::executor::{LowessConfig, LowessExecutor};
use crate::engine::output::LowessResult;
use crate::evaluation::bands::ConfidenceBand;
use crate::primitives::errors::StatError;
use crate::primitives::frame::Frame;
use crate::protocol::Orient;

// ============================================================================
// Curve
// ============================================================================

/// Grid-aligned curve with an optional band, ready to become a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Grid values.
    pub grid: Vec<f64>,

    /// Curve values at the grid.
    pub fitted: Vec<f64>,

    /// Band bounds at the grid.
    pub band: Option<ConfidenceBand<f64>>,
}

impl Curve {
    /// A curve without rows; `with_band` keeps the band columns in the schema.
    pub fn empty(with_band: bool) -> Self {
        Self {
            grid: Vec::new(),
            fitted: Vec::new(),
            band: with_band.then(|| ConfidenceBand {
                lower: Vec::new(),
                upper: Vec::new(),
            }),
        }
    }

    /// Build the result frame, naming columns after `orient`.
    pub fn into_frame(self, orient: Orient) -> Result<Frame, StatError> {
        let (ind, dep) = orient.columns();
        let mut frame = Frame::new()
            .with_column(ind, self.grid)?
            .with_column(dep, self.fitted)?;

        if let Some(band) = self.band {
            frame.insert(format!("{dep}min"), band.lower)?;
            frame.insert(format!("{dep}max"), band.upper)?;
        }
        Ok(frame)
    }
}

impl From<LowessResult<f64>> for Curve {
    fn from(result: LowessResult<f64>) -> Self {
        let band = match (result.lower, result.upper) {
            (Some(lower), Some(upper)) => Some(ConfidenceBand { lower, upper }),
            _ => None,
        };
        Self {
            grid: result.x,
            fitted: result.y,
            band,
        }
    }
}

// ============================================================================
// Entry Points
// ============================================================================

/// Smooth two input columns with a validated configuration.
pub fn fit_inputs<T, I1, I2>(
    x: &I1,
    y: &I2,
    config: &LowessConfig<T>,
) -> Result<LowessResult<T>, StatError>
where
    T: WLSSolver,
    I1: StatInput<T> + ?Sized,
    I2: StatInput<T> + ?Sized,
{
    let x = x.as_stat_slice()?;
    let y = y.as_stat_slice()?;

    let out = LowessExecutor::run(x, y, config)?;
    let replicates = config.bootstrap.as_ref().map(|b| b.replicates);
    Ok(LowessResult::from_output(out, config.fraction, replicates))
}

/// Borrow two numeric columns of `frame`.
pub fn frame_columns<'a>(
    frame: &'a Frame,
    x_col: &str,
    y_col: &str,
) -> Result<(&'a [f64], &'a [f64]), StatError> {
    Ok((frame.numeric(x_col)?, frame.numeric(y_col)?))
}
