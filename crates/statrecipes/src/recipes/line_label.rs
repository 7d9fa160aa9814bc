//! End-of-line text labels.

// External dependencies
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::primitives::errors::StatError;
use crate::primitives::frame::Frame;
use crate::protocol::canvas::{HAlign, TextProps, VAlign};
use crate::protocol::{Canvas, GroupBy, Mark, Orient, Scales};

/// Labels the last point of each line group with its text.
///
/// Per group, the row with the largest value on the orientation axis is
/// labelled, shifted `offset` points further along that axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineLabel {
    /// Shift along the orientation axis, in points.
    pub offset: f64,

    /// Column holding the label text.
    pub text: String,

    /// Text colour.
    pub color: String,

    /// Font size in points.
    pub fontsize: f64,
}

impl Default for LineLabel {
    fn default() -> Self {
        Self {
            offset: 5.0,
            text: "text".to_string(),
            color: "C0".to_string(),
            fontsize: 10.0,
        }
    }
}

impl LineLabel {
    /// Label with the given offset and default styling.
    pub fn new(offset: f64) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    fn props(&self, orient: Orient) -> TextProps {
        let offset = match orient {
            Orient::X => (self.offset, 0.0),
            Orient::Y => (0.0, self.offset),
        };
        TextProps {
            color: self.color.clone(),
            fontsize: self.fontsize,
            halign: HAlign::Left,
            valign: VAlign::Center,
            offset,
        }
    }
}

impl Mark for LineLabel {
    fn render(
        &self,
        data: &Frame,
        groupby: &GroupBy,
        orient: Orient,
        _scales: &Scales,
        canvas: &mut dyn Canvas,
    ) -> Result<(), StatError> {
        let x = data.numeric("x")?;
        let y = data.numeric("y")?;
        let along = data.numeric(orient.name())?;
        let text = data
            .column(&self.text)
            .ok_or_else(|| StatError::MissingColumn(self.text.clone()))?;
        let props = self.props(orient);

        for group in groupby.groups(data) {
            // First row holding the group's largest finite orientation value
            let last = group
                .rows
                .iter()
                .copied()
                .filter(|&i| along[i].is_finite())
                .fold(None, |best: Option<usize>, i| match best {
                    Some(b) if along[b] >= along[i] => Some(b),
                    _ => Some(i),
                });

            if let Some(row) = last {
                canvas.text((x[row], y[row]), &text.key_at(row).to_string(), &props);
            }
        }

        Ok(())
    }
}
