//! Scene nodes: the engine objects a plan creates, moves, transforms and destroys.
//!
//! A node is a plain value. Structures own their nodes and keep them in sync
//! with what the engine shows; plans carry copies of the target state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::color::Color;
use crate::geometry::{Bounds, Vec2};
use crate::shape::{ShapeId, Style};

static NEXT_OBJECT: AtomicU32 = AtomicU32::new(1);

/// Opaque engine object id, unique for the lifetime of the process.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Allocate the next id. Ids are monotonic and never reused.
    #[inline]
    pub fn alloc() -> Self {
        ObjectId(NEXT_OBJECT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Estimated glyph metrics. The engine lays out real glyphs; the core only
/// needs sizes that scale consistently with font size.
pub struct TextMetrics;

impl TextMetrics {
    /// Horizontal advance per character, per font point.
    pub const ADVANCE_PER_PT: f32 = 0.012;
    /// Line height per font point.
    pub const LINE_HEIGHT_PER_PT: f32 = 0.018;

    /// (width, height) of `text` at `font_size`.
    pub fn measure(text: &str, font_size: f32) -> (f32, f32) {
        let lines: Vec<&str> = text.split('\n').collect();
        let widest = lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(1);
        (
            widest as f32 * Self::ADVANCE_PER_PT * font_size,
            lines.len() as f32 * Self::LINE_HEIGHT_PER_PT * font_size,
        )
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Shape {
        shape: ShapeId,
    },
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font: Option<String>,
        font_size: f32,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub id: ObjectId,
    pub kind: NodeKind,
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    /// Rotation in radians, counter-clockwise. Accumulates; never wrapped.
    #[serde(default)]
    pub angle: f32,
    pub style: Style,
    #[serde(default)]
    pub z_index: i32,
}

impl Node {
    pub fn shape(shape: ShapeId, center: Vec2, width: f32, height: f32, style: Style) -> Self {
        Self {
            id: ObjectId::alloc(),
            kind: NodeKind::Shape { shape },
            center,
            width,
            height,
            angle: 0.0,
            style,
            z_index: 0,
        }
    }

    pub fn text(
        text: impl Into<String>,
        font: Option<String>,
        font_size: f32,
        color: Color,
        center: Vec2,
    ) -> Self {
        let text = text.into();
        let (width, height) = TextMetrics::measure(&text, font_size);
        Self {
            id: ObjectId::alloc(),
            kind: NodeKind::Text {
                text,
                font,
                font_size,
            },
            center,
            width,
            height,
            angle: 0.0,
            style: Style::text(color),
            z_index: 0,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.center, self.width, self.height)
    }

    pub fn text_str(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text { text, .. } => Some(text),
            NodeKind::Shape { .. } => None,
        }
    }

    pub fn font_size(&self) -> Option<f32> {
        match &self.kind {
            NodeKind::Text { font_size, .. } => Some(*font_size),
            NodeKind::Shape { .. } => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text { .. })
    }

    #[inline]
    pub fn move_to(&mut self, center: Vec2) {
        self.center = center;
    }

    #[inline]
    pub fn shift(&mut self, by: Vec2) {
        self.center += by;
    }

    /// Scale extents (and font size / intrinsic shape sizes) about the node's own center.
    pub fn scale(&mut self, factor: f32) {
        self.width *= factor;
        self.height *= factor;
        match &mut self.kind {
            NodeKind::Text { font_size, .. } => *font_size *= factor,
            NodeKind::Shape { shape } => *shape = shape.scaled(factor),
        }
    }

    /// Scale about an external pivot: extents scale and the center moves.
    pub fn scale_about(&mut self, pivot: Vec2, factor: f32) {
        self.center = self.center.scale_about(pivot, factor);
        self.scale(factor);
    }

    /// Shrink or grow uniformly so the width becomes `width`.
    pub fn scale_to_fit_width(&mut self, width: f32) {
        if self.width > 0.0 {
            self.scale(width / self.width);
        }
    }

    /// Replace the text of a text node, re-measuring at the current font size.
    /// No-op on shapes.
    pub fn set_text(&mut self, new_text: impl Into<String>) {
        if let NodeKind::Text {
            text, font_size, ..
        } = &mut self.kind
        {
            *text = new_text.into();
            let (w, h) = TextMetrics::measure(text, *font_size);
            self.width = w;
            self.height = h;
        }
    }

    /// Set stroke and fill color together, keeping opacities.
    pub fn set_color(&mut self, color: Color) {
        self.style.stroke = color;
        self.style.fill = color;
    }

    /// Same geometry and paint under a fresh id (for copies that fly off).
    pub fn duplicate(&self) -> Node {
        Node {
            id: ObjectId::alloc(),
            ..self.clone()
        }
    }
}
