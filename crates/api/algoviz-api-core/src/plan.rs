//! Transition plans: ordered trees of visual steps handed to a playback engine.
//!
//! A [`Plan`] is a sequence of [`Step`]s. A step plays one [`Action`], waits, or
//! groups sub-steps to run in parallel or in sequence. Plans are descriptions
//! only; building or dropping one never touches logical state.
//!
//! JSON shape (one step):
//!   { "step": "parallel", "run_time": 0.25, "steps": [
//!       { "step": "play", "action": { "op": "shift", "id": 7, "by": {"x": 1.0, "y": 0.0} } } ] }

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;
use crate::node::{Node, ObjectId};

/// One engine-level operation on a single object.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Action {
    /// Draw a new object on.
    Create { node: Node },
    /// Fade a new object in, optionally sliding from `from`.
    FadeIn {
        node: Node,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<Vec2>,
    },
    /// Un-draw an object and drop it.
    Uncreate { id: ObjectId },
    /// Fade an object out, optionally sliding toward `to`, and drop it.
    FadeOut {
        id: ObjectId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to: Option<Vec2>,
    },
    /// Translate an object.
    Shift { id: ObjectId, by: Vec2 },
    /// Move an object's center to `to` while rotating it by `rotate_by` radians.
    Reposition {
        id: ObjectId,
        to: Vec2,
        rotate_by: f32,
    },
    /// Morph an object into the state described by `into` (same id).
    Transform { id: ObjectId, into: Node },
}

impl Action {
    /// The object this action operates on.
    pub fn target(&self) -> ObjectId {
        match self {
            Action::Create { node } | Action::FadeIn { node, .. } => node.id,
            Action::Uncreate { id }
            | Action::FadeOut { id, .. }
            | Action::Shift { id, .. }
            | Action::Reposition { id, .. }
            | Action::Transform { id, .. } => *id,
        }
    }

    pub fn creates(&self) -> bool {
        matches!(self, Action::Create { .. } | Action::FadeIn { .. })
    }

    pub fn destroys(&self) -> bool {
        matches!(self, Action::Uncreate { .. } | Action::FadeOut { .. })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Play {
        action: Action,
    },
    Wait {
        seconds: f32,
    },
    /// Sub-steps start together. `run_time` overrides each child's duration.
    Parallel {
        steps: Vec<Step>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        run_time: Option<f32>,
    },
    Sequence {
        steps: Vec<Step>,
    },
}

impl Step {
    #[inline]
    pub fn play(action: Action) -> Step {
        Step::Play { action }
    }

    #[inline]
    pub fn wait(seconds: f32) -> Step {
        Step::Wait { seconds }
    }

    pub fn parallel(steps: Vec<Step>, run_time: Option<f32>) -> Step {
        Step::Parallel { steps, run_time }
    }

    pub fn sequence(steps: Vec<Step>) -> Step {
        Step::Sequence { steps }
    }

    /// A group that contains no actions and no waits.
    pub fn is_empty(&self) -> bool {
        match self {
            Step::Play { .. } | Step::Wait { .. } => false,
            Step::Parallel { steps, .. } | Step::Sequence { steps } => {
                steps.iter().all(Step::is_empty)
            }
        }
    }

    /// Playback time, using `default_run_time` for untimed actions.
    pub fn duration(&self, default_run_time: f32) -> f32 {
        match self {
            Step::Play { .. } => default_run_time,
            Step::Wait { seconds } => *seconds,
            Step::Parallel { steps, run_time } => match run_time {
                Some(rt) => {
                    // Waits inside a timed group still take their own time.
                    steps
                        .iter()
                        .map(|s| s.duration(*rt))
                        .fold(0.0, f32::max)
                }
                None => steps
                    .iter()
                    .map(|s| s.duration(default_run_time))
                    .fold(0.0, f32::max),
            },
            Step::Sequence { steps } => steps.iter().map(|s| s.duration(default_run_time)).sum(),
        }
    }

    fn collect_actions<'a>(&'a self, out: &mut Vec<&'a Action>) {
        match self {
            Step::Play { action } => out.push(action),
            Step::Wait { .. } => {}
            Step::Parallel { steps, .. } | Step::Sequence { steps } => {
                for s in steps {
                    s.collect_actions(out);
                }
            }
        }
    }
}

/// Ordered list of steps for one logical operation.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    pub steps: Vec<Step>,
}

impl Plan {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Plan with a single step.
    pub fn of(step: Step) -> Self {
        let mut p = Self::new();
        p.push(step);
        p
    }

    /// Plan that plays all `actions` together.
    pub fn together(actions: impl IntoIterator<Item = Action>, run_time: Option<f32>) -> Self {
        let steps: Vec<Step> = actions.into_iter().map(Step::play).collect();
        Self::of(Step::parallel(steps, run_time))
    }

    /// Plans that play simultaneously, each keeping its own internal order.
    pub fn parallel(plans: impl IntoIterator<Item = Plan>) -> Self {
        let steps: Vec<Step> = plans
            .into_iter()
            .filter(|p| !p.is_empty())
            .map(Plan::into_step)
            .collect();
        Self::of(Step::parallel(steps, None))
    }

    /// Append a step; empty groups are dropped.
    pub fn push(&mut self, step: Step) {
        if !step.is_empty() {
            self.steps.push(step);
        }
    }

    pub fn then(mut self, step: Step) -> Self {
        self.push(step);
        self
    }

    /// Append all steps of `other` after this plan's steps.
    pub fn append(&mut self, other: Plan) {
        for s in other.steps {
            self.push(s);
        }
    }

    pub fn followed_by(mut self, other: Plan) -> Self {
        self.append(other);
        self
    }

    /// Collapse into a single step (sequence unless there is only one).
    pub fn into_step(mut self) -> Step {
        if self.steps.len() == 1 {
            self.steps.remove(0)
        } else {
            Step::sequence(self.steps)
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Every action in playback order (depth-first).
    pub fn actions(&self) -> Vec<&Action> {
        let mut out = Vec::new();
        for s in &self.steps {
            s.collect_actions(&mut out);
        }
        out
    }

    pub fn duration(&self, default_run_time: f32) -> f32 {
        self.steps.iter().map(|s| s.duration(default_run_time)).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl From<Step> for Plan {
    fn from(step: Step) -> Self {
        Plan::of(step)
    }
}

impl FromIterator<Step> for Plan {
    fn from_iter<T: IntoIterator<Item = Step>>(iter: T) -> Self {
        let mut p = Plan::new();
        for s in iter {
            p.push(s);
        }
        p
    }
}

impl IntoIterator for Plan {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn shift(id: ObjectId) -> Action {
        Action::Shift {
            id,
            by: Vec2::RIGHT,
        }
    }

    #[test]
    fn empty_groups_are_dropped() {
        let mut p = Plan::new();
        p.push(Step::parallel(vec![], Some(1.0)));
        p.push(Step::sequence(vec![Step::parallel(vec![], None)]));
        assert!(p.is_empty());
        p.push(Step::wait(0.5));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn duration_sums_sequence_and_maxes_parallel() {
        let a = ObjectId::alloc();
        let b = ObjectId::alloc();
        let p = Plan::new()
            .then(Step::parallel(
                vec![Step::play(shift(a)), Step::play(shift(b))],
                Some(0.25),
            ))
            .then(Step::wait(0.5))
            .then(Step::play(shift(a)));
        assert!((p.duration(1.0) - 1.75).abs() < 1e-6);
        assert_eq!(p.actions().len(), 3);
    }

    #[test]
    fn json_shape_is_tagged() {
        let node = crate::node::Node::text("7", None, 32.0, Color::WHITE, Vec2::ORIGIN);
        let id = node.id;
        let p = Plan::together(vec![Action::Create { node }], Some(0.25));
        let json = p.to_json().unwrap();
        assert_eq!(json["steps"][0]["step"], "parallel");
        assert_eq!(json["steps"][0]["steps"][0]["action"]["op"], "create");
        assert_eq!(json["steps"][0]["steps"][0]["action"]["node"]["id"], id.0);
        let back: Plan = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }
}
