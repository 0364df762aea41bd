//! Playback seam and an in-tree recorder.
//!
//! Engine adapters implement [`Playback`]. [`Recorder`] is the reference
//! implementation: it replays each plan against a [`SceneModel`], rejects
//! malformed plans, and keeps the accepted timeline for export or inspection.

use hashbrown::{HashMap, HashSet};
use log::debug;
use serde::Serialize;

use crate::node::{Node, ObjectId};
use crate::plan::{Action, Plan, Step};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PlaybackError {
    /// An action referenced an object that is not on screen.
    #[error("unknown object {id}")]
    UnknownObject { id: ObjectId },

    /// A create/fade-in reused an id that is already on screen.
    #[error("object {id} already exists")]
    DuplicateObject { id: ObjectId },

    /// Two branches of one parallel group animate the same object.
    #[error("object {id} is targeted by more than one parallel branch")]
    ConflictingTargets { id: ObjectId },

    /// Failure reported by an external engine.
    #[error("engine error: {0}")]
    Engine(String),
}

/// Host-side consumer of transition plans.
pub trait Playback {
    fn play(&mut self, plan: &Plan) -> Result<(), PlaybackError>;
}

/// What is on screen, keyed by object id.
#[derive(Clone, Debug, Default)]
pub struct SceneModel {
    objects: HashMap<ObjectId, Node>,
}

impl SceneModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ObjectId) -> Option<&Node> {
        self.objects.get(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.objects.values()
    }

    /// Apply every step of `plan` in order.
    pub fn apply_plan(&mut self, plan: &Plan) -> Result<(), PlaybackError> {
        for step in plan {
            self.apply_step(step)?;
        }
        Ok(())
    }

    pub fn apply_step(&mut self, step: &Step) -> Result<(), PlaybackError> {
        match step {
            Step::Play { action } => self.apply_action(action),
            Step::Wait { .. } => Ok(()),
            Step::Parallel { steps, .. } => {
                check_disjoint(steps)?;
                for s in steps {
                    self.apply_step(s)?;
                }
                Ok(())
            }
            Step::Sequence { steps } => {
                for s in steps {
                    self.apply_step(s)?;
                }
                Ok(())
            }
        }
    }

    fn apply_action(&mut self, action: &Action) -> Result<(), PlaybackError> {
        match action {
            Action::Create { node } | Action::FadeIn { node, .. } => {
                if self.objects.contains_key(&node.id) {
                    return Err(PlaybackError::DuplicateObject { id: node.id });
                }
                self.objects.insert(node.id, node.clone());
            }
            Action::Uncreate { id } | Action::FadeOut { id, .. } => {
                self.objects
                    .remove(id)
                    .ok_or(PlaybackError::UnknownObject { id: *id })?;
            }
            Action::Shift { id, by } => {
                self.existing_mut(*id)?.shift(*by);
            }
            Action::Reposition { id, to, rotate_by } => {
                let node = self.existing_mut(*id)?;
                node.move_to(*to);
                node.angle += *rotate_by;
            }
            Action::Transform { id, into } => {
                let node = self.existing_mut(*id)?;
                *node = Node {
                    id: *id,
                    ..into.clone()
                };
            }
        }
        Ok(())
    }

    fn existing_mut(&mut self, id: ObjectId) -> Result<&mut Node, PlaybackError> {
        self.objects
            .get_mut(&id)
            .ok_or(PlaybackError::UnknownObject { id })
    }
}

fn collect_targets(step: &Step, out: &mut HashSet<ObjectId>) {
    match step {
        Step::Play { action } => {
            out.insert(action.target());
        }
        Step::Wait { .. } => {}
        Step::Parallel { steps, .. } | Step::Sequence { steps } => {
            for s in steps {
                collect_targets(s, out);
            }
        }
    }
}

/// Each branch of a parallel group must own its objects exclusively.
fn check_disjoint(branches: &[Step]) -> Result<(), PlaybackError> {
    let mut seen: HashSet<ObjectId> = HashSet::new();
    for branch in branches {
        let mut mine = HashSet::new();
        collect_targets(branch, &mut mine);
        for id in mine {
            if !seen.insert(id) {
                return Err(PlaybackError::ConflictingTargets { id });
            }
        }
    }
    Ok(())
}

/// Validating in-memory playback.
#[derive(Debug, Default)]
pub struct Recorder {
    scene: SceneModel,
    timeline: Vec<Plan>,
}

#[derive(Serialize)]
struct TimelineRef<'a> {
    plans: &'a [Plan],
    total_duration: f32,
}

impl Recorder {
    /// Run time assumed for actions without an explicit group run time.
    pub const DEFAULT_RUN_TIME: f32 = 1.0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(&self) -> &SceneModel {
        &self.scene
    }

    pub fn plans(&self) -> &[Plan] {
        &self.timeline
    }

    pub fn total_duration(&self) -> f32 {
        self.timeline
            .iter()
            .map(|p| p.duration(Self::DEFAULT_RUN_TIME))
            .sum()
    }

    /// `{ "plans": [...], "total_duration": f32 }`
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(TimelineRef {
            plans: &self.timeline,
            total_duration: self.total_duration(),
        })
    }
}

impl Playback for Recorder {
    fn play(&mut self, plan: &Plan) -> Result<(), PlaybackError> {
        if plan.is_empty() {
            return Ok(());
        }
        // Validate against a scratch copy so a rejected plan leaves no trace.
        let mut next = self.scene.clone();
        next.apply_plan(plan)?;
        self.scene = next;
        self.timeline.push(plan.clone());
        debug!(
            "recorder: accepted plan #{} ({} actions, {} objects on screen)",
            self.timeline.len(),
            plan.actions().len(),
            self.scene.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::Vec2;

    fn text(s: &str) -> Node {
        Node::text(s, None, 32.0, Color::WHITE, Vec2::ORIGIN)
    }

    #[test]
    fn rejects_unknown_and_duplicate_objects() {
        let n = text("a");
        let id = n.id;
        let mut rec = Recorder::new();
        let shift = Plan::of(Step::play(Action::Shift { id, by: Vec2::UP }));
        assert_eq!(
            rec.play(&shift),
            Err(PlaybackError::UnknownObject { id })
        );
        let create = Plan::of(Step::play(Action::Create { node: n }));
        rec.play(&create).unwrap();
        assert_eq!(
            rec.play(&create),
            Err(PlaybackError::DuplicateObject { id })
        );
        rec.play(&shift).unwrap();
        assert_eq!(rec.scene().get(id).unwrap().center, Vec2::UP);
    }

    #[test]
    fn rejects_conflicting_parallel_branches_without_side_effects() {
        let n = text("a");
        let id = n.id;
        let mut rec = Recorder::new();
        rec.play(&Plan::of(Step::play(Action::Create { node: n })))
            .unwrap();
        let bad = Plan::together(
            vec![
                Action::Shift { id, by: Vec2::UP },
                Action::Shift { id, by: Vec2::DOWN },
            ],
            None,
        );
        assert_eq!(
            rec.play(&bad),
            Err(PlaybackError::ConflictingTargets { id })
        );
        assert_eq!(rec.plans().len(), 1);
        assert_eq!(rec.scene().get(id).unwrap().center, Vec2::ORIGIN);
    }

    #[test]
    fn sequence_inside_one_branch_may_reuse_target() {
        let n = text("a");
        let id = n.id;
        let mut scene = SceneModel::new();
        let plan = Plan::of(Step::parallel(
            vec![Step::sequence(vec![
                Step::play(Action::Create { node: n }),
                Step::play(Action::Shift { id, by: Vec2::UP }),
                Step::play(Action::Uncreate { id }),
            ])],
            None,
        ));
        scene.apply_plan(&plan).unwrap();
        assert!(scene.is_empty());
    }
}
