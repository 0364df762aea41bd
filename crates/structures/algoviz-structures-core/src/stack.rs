//! Stack: a LIFO column of cylinder cells above an optional caption.

use algoviz_api_core::{Action, Bounds, Node, Plan, Value, Vec2};
use log::debug;

use crate::config::{ElementStyle, Highlight, StackConfig};
use crate::element::Element;
use crate::error::{Result, StructureError};

#[derive(Clone, Debug)]
pub struct Stack {
    values: Vec<Value>,
    elements: Vec<Element>,
    label: Option<Node>,
    config: StackConfig,
}

impl Stack {
    /// Build a stack holding `values` bottom to top. Empty stacks are fine.
    pub fn new<I, V>(values: I, config: StackConfig) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        let mut config = config;
        // Content sits below the cylinder's top ellipse.
        let ellipse = config.cell.cell.ellipse_height();
        config.cell.content_offset += Vec2::DOWN * (ellipse / 2.0);

        let height = column_height(&config, values.len());
        if height > config.max_height {
            config = config.scaled(config.max_height / height);
            debug!("stack: initial height {height:.2} scaled to {:.2}", config.max_height);
        }

        let label = config.label.as_ref().map(|text| {
            let mut node = Node::text(
                text.as_str(),
                config.label_style.font.clone(),
                config.label_style.font_size,
                config.label_style.color,
                config.bottom,
            );
            node.shift(Vec2::UP * (node.height / 2.0));
            node
        });

        let mut stack = Self {
            values: Vec::new(),
            elements: Vec::new(),
            label,
            config,
        };
        stack.elements = values
            .iter()
            .enumerate()
            .map(|(i, v)| Element::new(v.clone(), None, &stack.config.cell, stack.slot_center(i)))
            .collect();
        stack.values = values;
        stack
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bottom to top.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn top(&self) -> Option<&Element> {
        self.elements.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Element> {
        self.elements.last_mut()
    }

    pub fn label_node(&self) -> Option<&Node> {
        self.label.as_ref()
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    pub fn cell_style(&self) -> &ElementStyle {
        &self.config.cell
    }

    /// Everything drawn, or the base point when nothing is.
    pub fn bounds(&self) -> Bounds {
        let parts = self
            .label
            .iter()
            .map(Node::bounds)
            .chain(self.elements.iter().map(Element::bounds));
        Bounds::enclosing(parts).unwrap_or_else(|| Bounds::new(self.base(), 0.0, 0.0))
    }

    /// Bottom of the first cell.
    fn base(&self) -> Vec2 {
        match &self.label {
            Some(label) => Vec2::new(
                self.config.bottom.x,
                label.bounds().top() + self.config.label_buff,
            ),
            None => self.config.bottom,
        }
    }

    fn slot_center(&self, index: usize) -> Vec2 {
        let cell_height = self.config.cell.cell.height;
        self.base() + Vec2::UP * (cell_height / 2.0 + index as f32 * self.config.pitch())
    }

    fn debug_check(&self) {
        debug_assert_eq!(self.values.len(), self.elements.len());
    }

    /// Fade in the caption and every cell.
    pub fn create_plan(&self) -> Plan {
        let mut plans: Vec<Plan> = self
            .label
            .iter()
            .map(|n| {
                Plan::together(
                    [Action::FadeIn {
                        node: n.clone(),
                        from: None,
                    }],
                    None,
                )
            })
            .collect();
        plans.extend(self.elements.iter().map(|e| e.fade_in_plan(None)));
        Plan::parallel(plans)
    }

    /// Push on top. The new cell slides in from `source`, by default just
    /// beyond the stack's upper-right corner. A column that grows past
    /// `max_height` is rescaled about its bottom afterwards.
    pub fn push(&mut self, value: impl Into<Value>, source: Option<Vec2>) -> Plan {
        let value = value.into();
        let source = source.unwrap_or_else(|| {
            self.bounds().critical_point(Vec2::UR) + self.config.fade_offset
        });
        let element = Element::new(
            value.clone(),
            None,
            &self.config.cell,
            self.slot_center(self.len()),
        );
        debug!("stack: push {value} (depth {})", self.len() + 1);

        let mut plan = element.fade_in_plan(Some(source));
        self.values.push(value);
        self.elements.push(element);
        plan.append(self.fit_height());
        self.debug_check();
        plan
    }

    /// Pop the top value. The cell slides out toward `destination`, by
    /// default offset from where it stands.
    pub fn pop(&mut self, destination: Option<Vec2>) -> Result<(Value, Plan)> {
        let (Some(value), Some(element)) = (self.values.pop(), self.elements.pop()) else {
            debug!("stack: pop on empty stack");
            return Err(StructureError::Empty { what: "pop" });
        };
        let destination =
            destination.unwrap_or_else(|| element.bounds().center + self.config.fade_offset);
        debug!("stack: pop {value} (depth {})", self.len());
        self.debug_check();
        Ok((value, element.fade_out_plan(Some(destination))))
    }

    pub fn highlight_top(&mut self, h: &Highlight) -> Result<Plan> {
        self.elements
            .last_mut()
            .map(|e| e.highlight(h))
            .ok_or(StructureError::Empty { what: "highlight_top" })
    }

    /// One simultaneous emphasis over every cell.
    pub fn highlight_all(&mut self, h: &Highlight) -> Plan {
        Element::highlight_many(self.elements.iter_mut(), h)
    }

    /// Scale the column about its bottom anchor when it is too tall.
    fn fit_height(&mut self) -> Plan {
        let height = column_height(&self.config, self.len());
        if height <= self.config.max_height {
            return Plan::new();
        }
        let factor = self.config.max_height / height;
        let pivot = self.config.bottom;
        self.config = self.config.scaled(factor);
        debug!("stack: rescaled by {factor:.3} to fit {:.2}", self.config.max_height);

        let mut actions = Vec::new();
        if let Some(label) = &mut self.label {
            label.scale_about(pivot, factor);
            actions.push(Action::Transform {
                id: label.id,
                into: label.clone(),
            });
        }
        let targets: Vec<Vec2> = (0..self.len()).map(|i| self.slot_center(i)).collect();
        for (e, t) in self.elements.iter_mut().zip(targets) {
            actions.extend(e.relayout(pivot, factor, t));
        }
        Plan::together(actions, None)
    }
}

/// Height of `n` cells plus the caption.
fn column_height(config: &StackConfig, n: usize) -> f32 {
    let cells = if n == 0 {
        0.0
    } else {
        config.cell.cell.height + (n - 1) as f32 * config.pitch()
    };
    let caption = match &config.label {
        Some(text) => {
            let (_, h) = algoviz_api_core::TextMetrics::measure(text, config.label_style.font_size);
            h + config.label_buff
        }
        None => 0.0,
    };
    cells + caption
}
