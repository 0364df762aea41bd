//! Driver context: owns a playback engine and feeds it plans in order.

use algoviz_api_core::{Action, Color, Node, Plan, Playback, Step, Vec2};
use anyhow::{Context, Result};
use log::debug;

#[derive(Debug)]
pub struct Scene<P: Playback> {
    playback: P,
    played: usize,
}

impl<P: Playback> Scene<P> {
    pub fn new(playback: P) -> Self {
        Self {
            playback,
            played: 0,
        }
    }

    /// Hand one plan to the engine. Empty plans are skipped.
    pub fn play(&mut self, plan: Plan) -> Result<()> {
        if plan.is_empty() {
            return Ok(());
        }
        self.played += 1;
        debug!(
            "scene: plan #{} with {} actions",
            self.played,
            plan.actions().len()
        );
        self.playback
            .play(&plan)
            .with_context(|| format!("playback rejected plan #{}", self.played))
    }

    /// Play several plans simultaneously.
    pub fn play_together<I>(&mut self, plans: I) -> Result<()>
    where
        I: IntoIterator<Item = Plan>,
    {
        self.play(Plan::parallel(plans))
    }

    pub fn wait(&mut self, seconds: f32) -> Result<()> {
        self.play(Plan::of(Step::wait(seconds)))
    }

    /// Number of non-empty plans handed over so far.
    pub fn played(&self) -> usize {
        self.played
    }

    pub fn playback(&self) -> &P {
        &self.playback
    }

    pub fn into_playback(self) -> P {
        self.playback
    }
}

/// Free-standing text such as titles and verdicts.
pub fn caption(text: &str, color: Color, font_size: f32, center: Vec2) -> Node {
    Node::text(text, None, font_size, color, center)
}

/// Draw-on of loose nodes.
pub fn write<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Plan {
    Plan::together(
        nodes.into_iter().map(|n| Action::Create { node: n.clone() }),
        None,
    )
}

/// Recolor a loose node in place.
pub fn recolor(node: &mut Node, color: Color) -> Plan {
    node.set_color(color);
    Plan::together(
        [Action::Transform {
            id: node.id,
            into: node.clone(),
        }],
        None,
    )
}

/// Translate loose nodes together.
pub fn shift_all<'a>(nodes: impl IntoIterator<Item = &'a mut Node>, by: Vec2) -> Plan {
    Plan::together(
        nodes.into_iter().map(|n| {
            n.shift(by);
            Action::Shift { id: n.id, by }
        }),
        None,
    )
}

/// Appear, hold, disappear.
pub fn flash(node: &Node, hold: f32) -> Plan {
    Plan::together(
        [Action::FadeIn {
            node: node.clone(),
            from: None,
        }],
        None,
    )
    .then(Step::wait(hold))
    .followed_by(Plan::together(
        [Action::FadeOut {
            id: node.id,
            to: None,
        }],
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_api_core::Recorder;

    #[test]
    fn empty_plans_are_not_counted() {
        let mut scene = Scene::new(Recorder::new());
        scene.play(Plan::new()).unwrap();
        scene.wait(0.5).unwrap();
        assert_eq!(scene.played(), 1);
        assert_eq!(scene.playback().plans().len(), 1);
    }

    #[test]
    fn rejected_plan_reports_its_number() {
        let mut scene = Scene::new(Recorder::new());
        let ghost = caption("x", Color::WHITE, 24.0, Vec2::ORIGIN);
        let err = scene
            .play(Plan::together([Action::Uncreate { id: ghost.id }], None))
            .unwrap_err();
        assert!(format!("{err:#}").contains("plan #1"));
    }

    #[test]
    fn flash_leaves_nothing_behind() {
        let mut scene = Scene::new(Recorder::new());
        let sign = caption("<", Color::WHITE, 60.0, Vec2::ORIGIN);
        let mut label = caption("sorted", Color::WHITE, 28.0, Vec2::LEFT);
        scene.play(write([&label])).unwrap();
        scene
            .play_together([flash(&sign, 0.25), recolor(&mut label, Color::RED)])
            .unwrap();
        scene.play(shift_all([&mut label], Vec2::RIGHT)).unwrap();
        assert_eq!(scene.playback().scene().len(), 1);
        assert_eq!(label.center, Vec2::ORIGIN);
    }
}
