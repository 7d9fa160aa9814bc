//! Drawing surface used by marks.
//!
//! A host implements [`Canvas`] on top of its rendering backend. The crate
//! ships [`RecordingCanvas`], which stores every call for inspection.

// External dependencies
use serde::{Deserialize, Serialize};

// ============================================================================
// Drawing Properties
// ============================================================================

/// Dash pattern of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// Continuous line.
    #[default]
    Solid,

    /// Dashed line.
    Dashed,

    /// Dotted line.
    Dotted,

    /// Alternating dashes and dots.
    DashDot,
}

/// Appearance of a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineProps {
    /// Colour specification understood by the host.
    pub color: String,

    /// Opacity in [0, 1].
    pub alpha: f64,

    /// Width in points.
    pub linewidth: f64,

    /// Dash pattern.
    pub linestyle: LineStyle,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HAlign {
    /// Anchor at the left edge.
    Left,
    /// Anchor at the centre.
    Center,
    /// Anchor at the right edge.
    Right,
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VAlign {
    /// Anchor at the top edge.
    Top,
    /// Anchor at the centre.
    Center,
    /// Anchor at the bottom edge.
    Bottom,
}

/// Appearance and placement of a text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextProps {
    /// Colour specification understood by the host.
    pub color: String,

    /// Font size in points.
    pub fontsize: f64,

    /// Horizontal alignment.
    pub halign: HAlign,

    /// Vertical alignment.
    pub valign: VAlign,

    /// Shift from the anchor in points, `(dx, dy)`.
    pub offset: (f64, f64),
}

// ============================================================================
// Canvas
// ============================================================================

/// Host-side drawing surface.
pub trait Canvas {
    /// Draw an infinite straight line through two data points.
    fn axline(&mut self, p1: (f64, f64), p2: (f64, f64), props: &LineProps);

    /// Draw a text label anchored at a data point.
    fn text(&mut self, at: (f64, f64), text: &str, props: &TextProps);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// An infinite line.
    AxLine {
        /// First point.
        p1: (f64, f64),
        /// Second point.
        p2: (f64, f64),
        /// Appearance.
        props: LineProps,
    },

    /// A text label.
    Text {
        /// Anchor point.
        at: (f64, f64),
        /// Label text.
        text: String,
        /// Appearance.
        props: TextProps,
    },
}

/// Canvas that records calls instead of rendering them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far, in order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Canvas for RecordingCanvas {
    fn axline(&mut self, p1: (f64, f64), p2: (f64, f64), props: &LineProps) {
        self.commands.push(DrawCommand::AxLine {
            p1,
            p2,
            props: props.clone(),
        });
    }

    fn text(&mut self, at: (f64, f64), text: &str, props: &TextProps) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            props: props.clone(),
        });
    }
}
