//! Reference lines spanning the axes.

// External dependencies
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::primitives::errors::StatError;
use crate::primitives::frame::Frame;
use crate::protocol::canvas::{LineProps, LineStyle};
use crate::protocol::{Canvas, GroupBy, Mark, Orient, Scales};

/// Infinite horizontal or vertical line through each row's value.
///
/// The line runs along the orientation axis at the row's value on the other
/// axis: orient `x` draws a horizontal line at `y`, orient `y` a vertical
/// line at `x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StraightLine {
    /// Line colour.
    pub color: String,

    /// Opacity in [0, 1].
    pub alpha: f64,

    /// Width in points.
    pub linewidth: f64,

    /// Dash pattern.
    pub linestyle: LineStyle,
}

impl Default for StraightLine {
    fn default() -> Self {
        Self {
            color: "C0".to_string(),
            alpha: 1.0,
            linewidth: 1.5,
            linestyle: LineStyle::Solid,
        }
    }
}

impl StraightLine {
    fn props(&self) -> LineProps {
        LineProps {
            color: self.color.clone(),
            alpha: self.alpha,
            linewidth: self.linewidth,
            linestyle: self.linestyle,
        }
    }
}

impl Mark for StraightLine {
    fn render(
        &self,
        data: &Frame,
        groupby: &GroupBy,
        orient: Orient,
        _scales: &Scales,
        canvas: &mut dyn Canvas,
    ) -> Result<(), StatError> {
        let values = data.numeric(orient.other().name())?;
        let props = self.props();

        for group in groupby.groups(data) {
            for &row in &group.rows {
                let v = values[row];
                if !v.is_finite() {
                    continue;
                }
                let (p1, p2) = match orient {
                    Orient::X => ((0.0, v), (1.0, v)),
                    Orient::Y => ((v, 0.0), (v, 1.0)),
                };
                canvas.axline(p1, p2, &props);
            }
        }

        Ok(())
    }
}
