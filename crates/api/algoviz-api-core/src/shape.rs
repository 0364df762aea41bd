//! Shape identities and paint styles for scene nodes.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// The ShapeId names the primitive the engine should draw; extents live on
/// the owning [`Node`](crate::node::Node).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "id", content = "data")]
pub enum ShapeId {
    /// Axis-aligned rectangle (squares are rectangles with equal sides).
    Rectangle,
    /// Isosceles triangle pointing up at zero rotation.
    Triangle,
    /// Filled circle.
    Dot,
    /// Open cylinder segment used for stack cells: a body with an ellipse
    /// of `ellipse_height` on top and a half-ellipse arc at the bottom.
    StackCell { ellipse_height: f32 },
}

impl ShapeId {
    /// Scale any intrinsic dimensions carried by the shape itself.
    pub fn scaled(self, factor: f32) -> Self {
        match self {
            ShapeId::StackCell { ellipse_height } => ShapeId::StackCell {
                ellipse_height: ellipse_height * factor,
            },
            other => other,
        }
    }
}

/// Paint applied to a node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Style {
    pub stroke: Color,
    pub stroke_width: f32,
    pub fill: Color,
    pub fill_opacity: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: Color::WHITE,
            stroke_width: 4.0,
            fill: Color::BLACK,
            fill_opacity: 0.0,
        }
    }
}

impl Style {
    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_fill(mut self, fill: Color, opacity: f32) -> Self {
        self.fill = fill;
        self.fill_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Text is painted with its fill; stroke follows it.
    pub fn text(color: Color) -> Self {
        Self {
            stroke: color,
            stroke_width: 0.0,
            fill: color,
            fill_opacity: 1.0,
        }
    }
}
