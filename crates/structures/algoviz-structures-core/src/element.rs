//! Element: one value cell made of a box, its content text and an optional label.
//!
//! Every operation updates the element's own nodes first and returns the plan
//! that shows the change. Label text is always derived from [`Label`], content
//! text from the stored [`Value`].

use std::cmp::Ordering;
use std::fmt;

use algoviz_api_core::{Action, Bounds, Node, Plan, Step, Value, Vec2};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{CompareStyle, ElementStyle, Highlight};
use crate::error::{Result, StructureError};

/// z-layer for emphasized nodes.
const EMPHASIS_Z: i32 = 1000;
const MOVE_EPS: f32 = 1e-5;

/// What a label shows: a logical position or a fixed name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Index(usize),
    Name(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Index(i) => write!(f, "{i}"),
            Label::Name(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Name(s.to_string())
    }
}

/// A node and, while emphasized, the state a revert returns it to.
#[derive(Clone, Debug)]
struct Part {
    node: Node,
    saved: Option<Node>,
}

impl Part {
    fn new(node: Node) -> Self {
        Self { node, saved: None }
    }

    fn shift(&mut self, by: Vec2) {
        self.node.shift(by);
        if let Some(saved) = &mut self.saved {
            saved.shift(by);
        }
    }

    fn scale_about(&mut self, pivot: Vec2, factor: f32) {
        self.node.scale_about(pivot, factor);
        if let Some(saved) = &mut self.saved {
            saved.scale_about(pivot, factor);
        }
    }
}

/// Ratio between the drawn cell and the style's nominal cell.
fn cell_scale(style: &ElementStyle, cell: &Node) -> f32 {
    if style.cell.width > 0.0 {
        cell.width / style.cell.width
    } else {
        1.0
    }
}

/// Content text centered on `cell` (plus offset), shrunk to the fit ratio.
fn layout_content(text: &str, style: &ElementStyle, cell: &Node) -> Node {
    let s = cell_scale(style, cell);
    let mut node = Node::text(
        text,
        style.content.font.clone(),
        style.content.font_size * s,
        style.content.color,
        cell.center + style.content_offset * s,
    );
    let max_width = cell.width * style.content_fit_ratio;
    if node.width > max_width {
        node.scale_to_fit_width(max_width);
    }
    node
}

/// Label text placed beside `cell` on the configured side.
fn layout_label(text: &str, style: &ElementStyle, cell: &Node) -> Node {
    let s = cell_scale(style, cell);
    let mut node = Node::text(
        text,
        style.label.font.clone(),
        style.label.font_size * s,
        style.label.color,
        cell.center,
    );
    if style.fit_label_to_width && node.width > cell.width {
        node.scale_to_fit_width(cell.width);
    }
    let center = node
        .bounds()
        .next_to(&cell.bounds(), style.label_direction, style.label_buff * s);
    node.move_to(center);
    node
}

/// Rebuilt geometry under the identity and paint of `current`.
fn adopt(mut rebuilt: Node, current: &Node) -> Node {
    rebuilt.id = current.id;
    rebuilt.style = current.style;
    rebuilt.z_index = current.z_index;
    rebuilt
}

fn transform(node: &Node) -> Action {
    Action::Transform {
        id: node.id,
        into: node.clone(),
    }
}

#[derive(Clone, Debug)]
pub struct Element {
    value: Value,
    label: Option<Label>,
    style: ElementStyle,
    /// Logical slot center; unaffected by emphasis.
    anchor: Vec2,
    cell: Part,
    content: Part,
    label_part: Option<Part>,
}

impl Element {
    /// Duration of a value replacement.
    pub const REPLACE_TIME: f32 = 0.5;
    /// Duration of an explicit revert.
    pub const REVERT_TIME: f32 = 0.25;

    pub fn new(
        value: impl Into<Value>,
        label: Option<Label>,
        style: &ElementStyle,
        anchor: Vec2,
    ) -> Self {
        let value = value.into();
        let cell = Node::shape(
            style.cell.shape,
            anchor,
            style.cell.width,
            style.cell.height,
            style.cell.paint,
        );
        let content = layout_content(&value.display_text(), style, &cell);
        let label_part = label
            .as_ref()
            .map(|l| Part::new(layout_label(&l.to_string(), style, &cell)));
        Self {
            value,
            label,
            style: style.clone(),
            anchor,
            cell: Part::new(cell),
            content: Part::new(content),
            label_part,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn style(&self) -> &ElementStyle {
        &self.style
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn cell(&self) -> &Node {
        &self.cell.node
    }

    pub fn content(&self) -> &Node {
        &self.content.node
    }

    pub fn label_node(&self) -> Option<&Node> {
        self.label_part.as_ref().map(|p| &p.node)
    }

    pub fn label_text(&self) -> Option<&str> {
        self.label_node().and_then(Node::text_str)
    }

    /// True while a persistent highlight is in effect.
    pub fn is_emphasized(&self) -> bool {
        self.cell.saved.is_some()
    }

    /// Cell, content, then label.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        std::iter::once(&self.cell.node)
            .chain(std::iter::once(&self.content.node))
            .chain(self.label_part.iter().map(|p| &p.node))
    }

    fn parts_mut(&mut self) -> impl Iterator<Item = &mut Part> {
        std::iter::once(&mut self.cell)
            .chain(std::iter::once(&mut self.content))
            .chain(self.label_part.iter_mut())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::enclosing(self.nodes().map(Node::bounds)).unwrap_or_default()
    }

    pub fn create_actions(&self) -> Vec<Action> {
        self.nodes().map(|n| Action::Create { node: n.clone() }).collect()
    }

    pub fn create_plan(&self) -> Plan {
        Plan::together(self.create_actions(), None)
    }

    /// Fade in; with `from`, the whole element slides in from that point.
    pub fn fade_in_plan(&self, from: Option<Vec2>) -> Plan {
        let c = self.bounds().center;
        Plan::together(
            self.nodes().map(|n| Action::FadeIn {
                node: n.clone(),
                from: from.map(|f| n.center + (f - c)),
            }),
            None,
        )
    }

    /// Fade out; with `to`, the whole element slides toward that point.
    pub fn fade_out_plan(&self, to: Option<Vec2>) -> Plan {
        let c = self.bounds().center;
        Plan::together(
            self.nodes().map(|n| Action::FadeOut {
                id: n.id,
                to: to.map(|t| n.center + (t - c)),
            }),
            None,
        )
    }

    pub fn uncreate_actions(&self) -> Vec<Action> {
        self.nodes().map(|n| Action::Uncreate { id: n.id }).collect()
    }

    pub fn uncreate_plan(&self) -> Plan {
        Plan::together(self.uncreate_actions(), None)
    }

    /// Translate every node. Negligible moves produce no actions.
    pub fn shift(&mut self, by: Vec2) -> Vec<Action> {
        if by.approx_eq(Vec2::ORIGIN, MOVE_EPS) {
            return Vec::new();
        }
        self.anchor += by;
        self.parts_mut()
            .map(|p| {
                p.shift(by);
                Action::Shift { id: p.node.id, by }
            })
            .collect()
    }

    /// Translate only the content text (used while swapping).
    pub fn shift_content(&mut self, by: Vec2) -> Action {
        self.content.shift(by);
        Action::Shift {
            id: self.content.node.id,
            by,
        }
    }

    /// Translate and re-index in one action per node: cell and content shift,
    /// the label morphs into its new text at its new position.
    pub fn shift_and_reindex(&mut self, by: Vec2, index: usize) -> Vec<Action> {
        let label = Label::Index(index);
        let relabel = self.label_part.is_some()
            && matches!(self.label, Some(Label::Index(_)))
            && self.label.as_ref() != Some(&label);
        if !relabel {
            return self.shift(by);
        }

        let mut actions = Vec::new();
        if !by.approx_eq(Vec2::ORIGIN, MOVE_EPS) {
            self.anchor += by;
            for p in [&mut self.cell, &mut self.content] {
                p.shift(by);
                actions.push(Action::Shift { id: p.node.id, by });
            }
        }
        actions.extend(self.relabel(label));
        actions
    }

    /// Re-index in place.
    pub fn set_index(&mut self, index: usize) -> Option<Action> {
        if !matches!(self.label, Some(Label::Index(_))) {
            return None;
        }
        self.relabel(Label::Index(index))
    }

    fn relabel(&mut self, label: Label) -> Option<Action> {
        if self.label.as_ref() == Some(&label) {
            return None;
        }
        let part = self.label_part.as_mut()?;
        let text = label.to_string();
        self.label = Some(label);

        part.node = adopt(
            layout_label(&text, &self.style, &self.cell.node),
            &part.node,
        );
        if let Some(saved) = &part.saved {
            let base_cell = self.cell.saved.as_ref().unwrap_or(&self.cell.node);
            part.saved = Some(adopt(layout_label(&text, &self.style, base_cell), saved));
        }
        Some(transform(&part.node))
    }

    /// Store a new value and morph the content text into it. Cell and label
    /// are untouched.
    pub fn replace_value(&mut self, value: impl Into<Value>) -> Plan {
        let value = value.into();
        let text = value.display_text();
        debug!("element: replace '{}' -> '{}'", self.value, text);

        self.content.node = adopt(
            layout_content(&text, &self.style, &self.cell.node),
            &self.content.node,
        );
        if let Some(saved) = &self.content.saved {
            let base_cell = self.cell.saved.as_ref().unwrap_or(&self.cell.node);
            self.content.saved = Some(adopt(layout_content(&text, &self.style, base_cell), saved));
        }
        self.value = value;
        Plan::together([transform(&self.content.node)], Some(Self::REPLACE_TIME))
    }

    /// Target states for cell, content and label under `h`.
    fn emphasis_targets(&self, h: &Highlight) -> Vec<Node> {
        let mut cell = self.cell.node.clone();
        cell.style.fill = h.color;
        cell.style.stroke = h.stroke_color;
        cell.style.fill_opacity = h.fill_opacity;

        let mut content = self.content.node.clone();
        content.set_color(h.font_color);

        let mut targets = vec![cell, content];
        if let Some(p) = &self.label_part {
            let mut label = p.node.clone();
            label.set_color(h.label_color);
            targets.push(label);
        }
        for t in &mut targets {
            t.scale(h.scale_ratio);
            t.shift(h.shift);
            t.z_index = EMPHASIS_Z;
        }
        targets
    }

    /// Move into the emphasized state and keep it. The first persistent
    /// emphasis records the baseline that `revert` returns to.
    fn emphasize(&mut self, h: &Highlight) -> Vec<Action> {
        let targets = self.emphasis_targets(h);
        self.parts_mut()
            .zip(targets)
            .map(|(p, t)| {
                if p.saved.is_none() {
                    p.saved = Some(p.node.clone());
                }
                p.node = t;
                transform(&p.node)
            })
            .collect()
    }

    /// Forward and backward actions of a pulse; state is unchanged.
    fn pulse_actions(&self, h: &Highlight) -> (Vec<Action>, Vec<Action>) {
        let forward = self.emphasis_targets(h).iter().map(transform).collect();
        let back = self.nodes().map(transform).collect();
        (forward, back)
    }

    fn revert_actions(&mut self) -> Vec<Action> {
        self.parts_mut()
            .filter_map(|p| {
                p.saved.take().map(|saved| {
                    p.node = saved;
                    transform(&p.node)
                })
            })
            .collect()
    }

    /// Emphasize this element. See [`Element::highlight_many`].
    pub fn highlight(&mut self, h: &Highlight) -> Plan {
        Self::highlight_many([self], h)
    }

    /// Emphasize several elements simultaneously.
    ///
    /// With `h.restore` the plan is emphasize, wait, restore (a third of the
    /// run time each) and the elements end where they started. Without it the
    /// emphasized state persists until [`Element::revert`].
    pub fn highlight_many<'a, I>(elements: I, h: &Highlight) -> Plan
    where
        I: IntoIterator<Item = &'a mut Element>,
    {
        let entries = elements.into_iter().map(|e| (e, h)).collect();
        pulse(entries, h.run_time, h.restore)
    }

    /// Undo persistent emphasis. Empty when nothing is emphasized.
    pub fn revert(&mut self) -> Plan {
        Self::revert_many([self])
    }

    pub fn revert_many<'a, I>(elements: I) -> Plan
    where
        I: IntoIterator<Item = &'a mut Element>,
    {
        let actions: Vec<Action> = elements
            .into_iter()
            .flat_map(|e| e.revert_actions())
            .collect();
        Plan::together(actions, Some(Self::REVERT_TIME))
    }

    /// Highlight both elements by comparison outcome: the tie style on both
    /// when equal, otherwise winner (greater value) and loser styles.
    pub fn compare_with(&mut self, other: &mut Element, style: &CompareStyle) -> Result<Plan> {
        let ordering = self.value.partial_cmp(&other.value).ok_or_else(|| {
            StructureError::Incomparable {
                left: self.value.to_string(),
                right: other.value.to_string(),
            }
        })?;
        let (mine, theirs) = match ordering {
            Ordering::Equal => (&style.tie, &style.tie),
            Ordering::Greater => (&style.winner, &style.loser),
            Ordering::Less => (&style.loser, &style.winner),
        };
        Ok(pulse(
            vec![(self, mine), (other, theirs)],
            style.run_time,
            style.restore,
        ))
    }

    /// Exchange values and content nodes; cells and labels stay in place.
    pub(crate) fn exchange_content(a: &mut Element, b: &mut Element) {
        std::mem::swap(&mut a.value, &mut b.value);
        std::mem::swap(&mut a.content, &mut b.content);
    }

    /// Scale about `pivot`, then translate so the anchor lands on `target`.
    /// The style scales along so later rebuilds match the drawn size.
    pub(crate) fn relayout(&mut self, pivot: Vec2, factor: f32, target: Vec2) -> Vec<Action> {
        if (factor - 1.0).abs() <= f32::EPSILON {
            return self.shift(target - self.anchor);
        }
        self.style = self.style.scaled(factor);
        let by = target - self.anchor.scale_about(pivot, factor);
        self.anchor = target;
        self.parts_mut()
            .map(|p| {
                p.scale_about(pivot, factor);
                p.shift(by);
                transform(&p.node)
            })
            .collect()
    }
}

/// Shared body of highlight and compare: one synchronized pulse over several
/// elements, each with its own emphasis.
fn pulse(entries: Vec<(&mut Element, &Highlight)>, run_time: f32, restore: bool) -> Plan {
    if restore {
        let third = run_time / 3.0;
        let mut forward = Vec::new();
        let mut back = Vec::new();
        for (e, h) in entries {
            let (f, b) = e.pulse_actions(h);
            forward.extend(f);
            back.extend(b);
        }
        Plan::together(forward, Some(third))
            .then(Step::wait(third))
            .followed_by(Plan::together(back, Some(third)))
    } else {
        let actions: Vec<Action> = entries
            .into_iter()
            .flat_map(|(e, h)| e.emphasize(h))
            .collect();
        Plan::together(actions, Some(run_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_api_core::{Color, Recorder, Playback};

    fn elem(v: impl Into<Value>, label: Option<Label>) -> Element {
        Element::new(v, label, &ElementStyle::default(), Vec2::ORIGIN)
    }

    #[test]
    fn wide_content_is_fit_inside_cell() {
        let e = elem(123456, None);
        assert!(e.content().width <= 0.8 + 1e-5);
        assert_eq!(e.content().center, e.cell().center);
        assert_eq!(e.content().text_str(), Some("123456"));
    }

    #[test]
    fn label_sits_below_cell() {
        let e = elem(5, Some(Label::Index(3)));
        let label = e.label_node().unwrap();
        assert_eq!(e.label_text(), Some("3"));
        assert!(label.bounds().top() < e.cell().bounds().bottom());
        assert!((label.center.x - e.cell().center.x).abs() < 1e-6);
    }

    #[test]
    fn replace_value_only_touches_content() {
        let mut e = elem(5, Some(Label::from("max")));
        let cell = e.cell().clone();
        let label = e.label_node().cloned();
        let content_id = e.content().id;
        let plan = e.replace_value(f64::NEG_INFINITY);
        assert_eq!(e.content().text_str(), Some("-∞"));
        assert_eq!(e.cell(), &cell);
        assert_eq!(e.label_node().cloned(), label);
        let actions = plan.actions();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].target(), content_id);
    }

    #[test]
    fn restoring_highlight_leaves_state_unchanged() {
        let mut e = elem(7, Some(Label::Index(0)));
        let before: Vec<Node> = e.nodes().cloned().collect();
        let plan = e.highlight(&Highlight::default());
        assert_eq!(plan.len(), 3);
        assert!((plan.duration(1.0) - 0.5).abs() < 1e-5);
        let after: Vec<Node> = e.nodes().cloned().collect();
        assert_eq!(before, after);
        assert!(!e.is_emphasized());
    }

    #[test]
    fn persistent_highlight_reverts_to_baseline() {
        let mut e = elem(7, Some(Label::Index(0)));
        let base: Vec<Node> = e.nodes().cloned().collect();
        let h = Highlight::colored(Color::RED).with_restore(false);
        let p1 = e.highlight(&h);
        assert_eq!(p1.len(), 1);
        assert!(e.is_emphasized());
        assert!((e.cell().width - 1.2).abs() < 1e-5);
        assert_eq!(e.cell().style.fill, Color::RED);
        e.highlight(&h.clone().with_scale(1.0));
        e.revert();
        let now: Vec<Node> = e.nodes().cloned().collect();
        assert_eq!(base, now);
        assert!(e.revert().is_empty());
    }

    #[test]
    fn compare_picks_winner_and_tie() {
        let style = CompareStyle {
            restore: false,
            ..CompareStyle::default()
        };
        let mut a = elem(10, None);
        let mut b = elem(3, None);
        a.compare_with(&mut b, &style).unwrap();
        assert_eq!(a.cell().style.fill, Color::GREEN);
        assert_eq!(b.cell().style.fill, Color::RED);

        let mut c = elem(4, None);
        let mut d = elem(4.0, None);
        c.compare_with(&mut d, &style).unwrap();
        assert_eq!(c.cell().style.fill, Color::YELLOW);
        assert_eq!(d.cell().style.fill, Color::YELLOW);
    }

    #[test]
    fn compare_rejects_mixed_kinds() {
        let mut a = elem(1, None);
        let mut b = elem("x", None);
        let err = a.compare_with(&mut b, &CompareStyle::default()).unwrap_err();
        assert!(matches!(err, StructureError::Incomparable { .. }));
    }

    #[test]
    fn plans_replay_cleanly() {
        let mut rec = Recorder::new();
        let mut a = elem(1, Some(Label::Index(0)));
        let mut b = Element::new(2, Some(Label::Index(1)), &ElementStyle::default(), Vec2::RIGHT);
        rec.play(&a.create_plan()).unwrap();
        rec.play(&b.fade_in_plan(Some(Vec2::UR * 3.0))).unwrap();
        rec.play(&Element::highlight_many([&mut a, &mut b], &Highlight::default()))
            .unwrap();
        rec.play(&a.compare_with(&mut b, &CompareStyle::default()).unwrap())
            .unwrap();
        rec.play(&b.replace_value(9)).unwrap();
        rec.play(&a.fade_out_plan(None)).unwrap();
        assert_eq!(rec.scene().len(), 3);
    }
}
