//! Configuration value objects for structures.
//!
//! Every config is a plain value: containers clone what they are given, and
//! rescaling produces a new value via `scaled(f)` instead of mutating shared
//! defaults. All structs deserialize with `#[serde(default)]`, so a partial JSON
//! object merges onto the defaults.

use algoviz_api_core::{Color, ShapeId, Style, Vec2};
use serde::{Deserialize, Serialize};

/// Visible frame of the reference 16:9 scene, in scene units.
pub const FRAME_WIDTH: f32 = 14.222;
pub const FRAME_HEIGHT: f32 = 8.0;

/// Default gap between an object and something placed next to it.
pub const DEFAULT_BUFF: f32 = 0.25;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextStyle {
    pub font: Option<String>,
    pub font_size: f32,
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: None,
            font_size: 32.0,
            color: Color::WHITE,
        }
    }
}

impl TextStyle {
    /// Monospace label style used for indices and pointer names.
    pub fn label() -> Self {
        Self {
            font: Some("Consolas".into()),
            font_size: 24.0,
            color: Color::BLUE,
        }
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn with_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            font_size: self.font_size * factor,
            ..self.clone()
        }
    }
}

/// The cell outline.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoxStyle {
    pub shape: ShapeId,
    pub width: f32,
    pub height: f32,
    pub paint: Style,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            shape: ShapeId::Rectangle,
            width: 1.0,
            height: 1.0,
            paint: Style::default(),
        }
    }
}

impl BoxStyle {
    /// Cylinder segment used by stacks.
    pub fn stack_cell(width: f32, height: f32, ellipse_height: f32) -> Self {
        Self {
            shape: ShapeId::StackCell { ellipse_height },
            width,
            height,
            paint: Style::default()
                .with_stroke(Color::WHITE)
                .with_fill(Color::DARKER_GREY, 0.95),
        }
    }

    /// Height of the cylinder's top ellipse, zero for flat shapes.
    pub fn ellipse_height(&self) -> f32 {
        match self.shape {
            ShapeId::StackCell { ellipse_height } => ellipse_height,
            _ => 0.0,
        }
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            shape: self.shape.scaled(factor),
            width: self.width * factor,
            height: self.height * factor,
            paint: self.paint,
        }
    }
}

/// Everything needed to build one [`Element`](crate::element::Element).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ElementStyle {
    pub cell: BoxStyle,
    pub content: TextStyle,
    /// Added to the box center to place the content.
    pub content_offset: Vec2,
    /// Content wider than this fraction of the box width is shrunk to fit.
    pub content_fit_ratio: f32,
    pub label: TextStyle,
    pub label_direction: Vec2,
    pub label_buff: f32,
    pub fit_label_to_width: bool,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            cell: BoxStyle::default(),
            content: TextStyle::default(),
            content_offset: Vec2::ORIGIN,
            content_fit_ratio: 0.8,
            label: TextStyle::label(),
            label_direction: Vec2::DOWN,
            label_buff: DEFAULT_BUFF,
            fit_label_to_width: true,
        }
    }
}

impl ElementStyle {
    pub fn with_cell(mut self, cell: BoxStyle) -> Self {
        self.cell = cell;
        self
    }

    pub fn with_content(mut self, content: TextStyle) -> Self {
        self.content = content;
        self
    }

    pub fn with_content_offset(mut self, offset: Vec2) -> Self {
        self.content_offset = offset;
        self
    }

    pub fn with_label(mut self, label: TextStyle) -> Self {
        self.label = label;
        self
    }

    pub fn with_label_direction(mut self, direction: Vec2) -> Self {
        self.label_direction = direction;
        self
    }

    pub fn with_label_buff(mut self, buff: f32) -> Self {
        self.label_buff = buff;
        self
    }

    pub fn with_fit_label_to_width(mut self, fit: bool) -> Self {
        self.fit_label_to_width = fit;
        self
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            cell: self.cell.scaled(factor),
            content: self.content.scaled(factor),
            content_offset: self.content_offset * factor,
            content_fit_ratio: self.content_fit_ratio,
            label: self.label.scaled(factor),
            label_direction: self.label_direction,
            label_buff: self.label_buff * factor,
            fit_label_to_width: self.fit_label_to_width,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArrayConfig {
    pub element: ElementStyle,
    pub center: Vec2,
    /// Horizontal gap between neighbouring boxes.
    pub gap: f32,
    pub max_width: f32,
    /// Distance appended/inserted cells start away from their slot.
    pub entry_buff: f32,
    /// How far removed cells and swapped contents are lifted.
    pub lift: f32,
    /// Duration of short phases (create, slide, lift, recenter).
    pub phase_time: f32,
    /// Duration of the combined shift/relabel and reorder phases.
    pub move_time: f32,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            element: ElementStyle::default(),
            center: Vec2::ORIGIN,
            gap: 0.0,
            max_width: FRAME_WIDTH * 0.9,
            entry_buff: 1.0,
            lift: 2.0,
            phase_time: 0.25,
            move_time: 1.0,
        }
    }
}

impl ArrayConfig {
    pub fn with_element(mut self, element: ElementStyle) -> Self {
        self.element = element;
        self
    }

    pub fn with_center(mut self, center: Vec2) -> Self {
        self.center = center;
        self
    }

    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_max_width(mut self, max_width: f32) -> Self {
        self.max_width = max_width;
        self
    }

    /// Distance between neighbouring slot centers.
    pub fn pitch(&self) -> f32 {
        self.element.cell.width + self.gap
    }

    /// Width of `n` boxes laid out with the configured gap.
    pub fn total_width(&self, n: usize) -> f32 {
        if n == 0 {
            0.0
        } else {
            n as f32 * self.element.cell.width + (n - 1) as f32 * self.gap
        }
    }

    /// Styles scale; anchors, limits and timings do not.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            element: self.element.scaled(factor),
            gap: self.gap * factor,
            ..self.clone()
        }
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StackConfig {
    pub cell: ElementStyle,
    /// Bottom-center anchor of the stack (label included).
    pub bottom: Vec2,
    pub label: Option<String>,
    pub label_style: TextStyle,
    pub label_buff: f32,
    /// Vertical gap between cells before the cylinder overlap is applied.
    pub inter_elem_buff: f32,
    pub max_height: f32,
    /// Offset used for default push sources and pop destinations.
    pub fade_offset: Vec2,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            cell: ElementStyle::default().with_cell(BoxStyle::stack_cell(2.0, 1.3, 0.3)),
            bottom: Vec2::DOWN * (FRAME_HEIGHT / 2.0 * 0.9),
            label: None,
            label_style: TextStyle::default().with_size(28.0),
            label_buff: DEFAULT_BUFF,
            inter_elem_buff: 0.0,
            max_height: FRAME_HEIGHT * 0.9,
            fade_offset: Vec2::UR,
        }
    }
}

impl StackConfig {
    pub fn with_cell(mut self, cell: ElementStyle) -> Self {
        self.cell = cell;
        self
    }

    pub fn with_bottom(mut self, bottom: Vec2) -> Self {
        self.bottom = bottom;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_max_height(mut self, max_height: f32) -> Self {
        self.max_height = max_height;
        self
    }

    /// Center-to-center distance between stacked cells. Cylinder cells
    /// overlap by their ellipse height.
    pub fn pitch(&self) -> f32 {
        self.cell.cell.height + self.inter_elem_buff - self.cell.cell.ellipse_height()
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            cell: self.cell.scaled(factor),
            label_style: self.label_style.scaled(factor),
            label_buff: self.label_buff * factor,
            inter_elem_buff: self.inter_elem_buff * factor,
            ..self.clone()
        }
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PointerConfig {
    pub label_style: TextStyle,
    /// Gap between the target and the marker.
    pub buff: f32,
    /// Extra gap for the label, which sits twice as far out as the marker.
    pub label_extra_buff: f32,
    pub run_time: f32,
    /// Number of candidate directions for automatic placement.
    pub samples: usize,
    /// Used when automatic placement has nothing to avoid.
    pub fallback_direction: Vec2,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            label_style: TextStyle::label().with_color(Color::WHITE),
            buff: 0.5,
            label_extra_buff: 0.25,
            run_time: 0.5,
            samples: 36,
            fallback_direction: Vec2::DOWN,
        }
    }
}

impl PointerConfig {
    pub fn with_buff(mut self, buff: f32) -> Self {
        self.buff = buff;
        self
    }

    pub fn with_run_time(mut self, run_time: f32) -> Self {
        self.run_time = run_time;
        self
    }
}

/// Emphasis applied by [`Element::highlight`](crate::element::Element::highlight).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Highlight {
    pub color: Color,
    pub stroke_color: Color,
    pub font_color: Color,
    pub label_color: Color,
    pub fill_opacity: f32,
    pub scale_ratio: f32,
    pub shift: Vec2,
    /// Revert to the pre-call state after a pause.
    pub restore: bool,
    pub run_time: f32,
}

impl Default for Highlight {
    fn default() -> Self {
        Self {
            color: Color::YELLOW,
            stroke_color: Color::YELLOW,
            font_color: Color::BLACK,
            label_color: Color::YELLOW,
            fill_opacity: 0.8,
            scale_ratio: 1.2,
            shift: Vec2::ORIGIN,
            restore: true,
            run_time: 0.5,
        }
    }
}

impl Highlight {
    /// Box, stroke and label in one color; black content.
    pub fn colored(color: Color) -> Self {
        Self {
            color,
            stroke_color: color,
            label_color: color,
            ..Self::default()
        }
    }

    pub fn with_stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self
    }

    pub fn with_font_color(mut self, color: Color) -> Self {
        self.font_color = color;
        self
    }

    pub fn with_fill_opacity(mut self, opacity: f32) -> Self {
        self.fill_opacity = opacity;
        self
    }

    pub fn with_scale(mut self, ratio: f32) -> Self {
        self.scale_ratio = ratio;
        self
    }

    pub fn with_shift(mut self, shift: Vec2) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_restore(mut self, restore: bool) -> Self {
        self.restore = restore;
        self
    }

    pub fn with_run_time(mut self, run_time: f32) -> Self {
        self.run_time = run_time;
        self
    }
}

/// Styles used by [`Element::compare_with`](crate::element::Element::compare_with).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompareStyle {
    pub tie: Highlight,
    pub winner: Highlight,
    pub loser: Highlight,
    pub restore: bool,
    pub run_time: f32,
}

impl Default for CompareStyle {
    fn default() -> Self {
        Self {
            tie: Highlight::colored(Color::YELLOW),
            winner: Highlight::colored(Color::GREEN).with_shift(Vec2::UP * 0.2),
            loser: Highlight::colored(Color::RED).with_scale(1.0),
            restore: true,
            run_time: 0.75,
        }
    }
}
