//! Pointer: a marker (plus optional caption) that re-aims at targets.

use std::f32::consts::TAU;

use algoviz_api_core::{Action, Bounds, Color, Node, Plan, ShapeId, Style, Vec2};
use log::{debug, trace, warn};

use crate::config::PointerConfig;
use crate::element::Element;

/// Anything a pointer can aim at or steer away from.
pub trait Anchor {
    fn anchor_bounds(&self) -> Bounds;

    fn anchor_center(&self) -> Vec2 {
        self.anchor_bounds().center
    }
}

impl Anchor for Vec2 {
    fn anchor_bounds(&self) -> Bounds {
        Bounds::new(*self, 0.0, 0.0)
    }
}

impl Anchor for Bounds {
    fn anchor_bounds(&self) -> Bounds {
        *self
    }
}

impl Anchor for Node {
    fn anchor_bounds(&self) -> Bounds {
        self.bounds()
    }
}

impl Anchor for Element {
    fn anchor_bounds(&self) -> Bounds {
        self.bounds()
    }
}

/// Placement side for [`Pointer::point_at`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Direction {
    /// Pick the sampled direction with the most clearance from the avoid set.
    Auto,
    Toward(Vec2),
}

/// Direction among `samples` evenly spaced unit vectors (angle 0 first,
/// counter-clockwise) whose sample point `center + d` has the largest summed
/// distance to `avoid`. The first maximum wins. `None` when there is nothing
/// to avoid.
pub fn best_direction(center: Vec2, avoid: &[Vec2], samples: usize) -> Option<Vec2> {
    if avoid.is_empty() || samples == 0 {
        return None;
    }
    let mut best: Option<(Vec2, f32)> = None;
    for k in 0..samples {
        let d = Vec2::from_angle(TAU * k as f32 / samples as f32);
        let sample = center + d;
        let score: f32 = avoid.iter().map(|p| sample.distance(*p)).sum();
        trace!("pointer: sample {k} ({:.3}, {:.3}) score {score:.4}", d.x, d.y);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((d, score));
        }
    }
    best.map(|(d, _)| d)
}

#[derive(Clone, Debug)]
pub struct Pointer {
    marker: Node,
    label: Option<Node>,
    config: PointerConfig,
    /// Current rotation in degrees.
    angle: f32,
    visible: bool,
}

impl Pointer {
    pub fn new(marker: Node, label: Option<&str>, config: PointerConfig) -> Self {
        let label = label.map(|text| {
            Node::text(
                text,
                config.label_style.font.clone(),
                config.label_style.font_size,
                config.label_style.color,
                marker.center,
            )
        });
        Self {
            marker,
            label,
            config,
            angle: 0.0,
            visible: false,
        }
    }

    /// Filled triangle, tip up at zero rotation.
    pub fn triangle(color: Color, label: Option<&str>, config: PointerConfig) -> Self {
        let marker = Node::shape(
            ShapeId::Triangle,
            Vec2::ORIGIN,
            0.3,
            0.3,
            Style::default().with_stroke(color).with_fill(color, 1.0),
        );
        Self::new(marker, label, config)
    }

    pub fn dot(color: Color, label: Option<&str>, config: PointerConfig) -> Self {
        let marker = Node::shape(
            ShapeId::Dot,
            Vec2::ORIGIN,
            0.16,
            0.16,
            Style::default().with_stroke(color).with_fill(color, 1.0),
        );
        Self::new(marker, label, config)
    }

    pub fn marker(&self) -> &Node {
        &self.marker
    }

    pub fn label_node(&self) -> Option<&Node> {
        self.label.as_ref()
    }

    /// Stored rotation in degrees.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn config(&self) -> &PointerConfig {
        &self.config
    }

    /// Aim at `target`. `buff` defaults to the configured gap.
    ///
    /// The marker turns by the difference between the new and the stored
    /// angle, so repeated calls animate relative turns. A hidden pointer fades
    /// in already in place.
    pub fn point_at(
        &mut self,
        target: &dyn Anchor,
        direction: Direction,
        buff: Option<f32>,
        avoid: &[&dyn Anchor],
    ) -> Plan {
        let target = target.anchor_bounds();
        let buff = buff.unwrap_or(self.config.buff);
        let dir = match direction {
            Direction::Toward(d) => d,
            Direction::Auto => {
                if self.config.samples == 0 {
                    warn!("pointer: auto placement with zero samples, using fallback");
                }
                let points: Vec<Vec2> = avoid.iter().map(|a| a.anchor_center()).collect();
                best_direction(target.center, &points, self.config.samples)
                    .unwrap_or(self.config.fallback_direction)
            }
        };

        let target_angle = 90.0 + dir.y.atan2(dir.x).to_degrees();
        let rotate_by = (target_angle - self.angle).to_radians();
        self.angle = target_angle;

        let marker_to = self.marker.bounds().next_to(&target, dir, buff);
        self.marker.move_to(marker_to);
        self.marker.angle += rotate_by;
        let label_to = self.label.as_ref().map(|l| {
            l.bounds()
                .next_to(&target, dir * 2.0, buff + self.config.label_extra_buff)
        });
        if let (Some(label), Some(to)) = (self.label.as_mut(), label_to) {
            label.move_to(to);
        }
        debug!(
            "pointer: aim at ({:.2}, {:.2}) dir ({:.2}, {:.2}) angle {:.1}",
            target.center.x, target.center.y, dir.x, dir.y, self.angle
        );

        let actions: Vec<Action> = if self.visible {
            let mut actions = vec![Action::Reposition {
                id: self.marker.id,
                to: marker_to,
                rotate_by,
            }];
            if let Some(label) = &self.label {
                actions.push(Action::Reposition {
                    id: label.id,
                    to: label.center,
                    rotate_by: 0.0,
                });
            }
            actions
        } else {
            self.visible = true;
            self.nodes()
                .map(|n| Action::FadeIn {
                    node: n.clone(),
                    from: None,
                })
                .collect()
        };
        Plan::together(actions, Some(self.config.run_time))
    }

    /// Fade out. Empty when already hidden.
    pub fn hide(&mut self) -> Plan {
        if !self.visible {
            return Plan::new();
        }
        self.visible = false;
        Plan::together(
            self.nodes().map(|n| Action::FadeOut { id: n.id, to: None }),
            Some(self.config.run_time),
        )
    }

    fn nodes(&self) -> impl Iterator<Item = &Node> {
        std::iter::once(&self.marker).chain(self.label.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_api_core::{Playback, Recorder};

    #[test]
    fn empty_avoid_set_falls_back() {
        assert_eq!(best_direction(Vec2::ORIGIN, &[], 36), None);
        let mut p = Pointer::triangle(Color::YELLOW, Some("i"), PointerConfig::default());
        p.point_at(&Vec2::ORIGIN, Direction::Auto, None, &[]);
        assert!(p.marker().center.y < 0.0);
        assert!(p.marker().center.x.abs() < 1e-5);
        assert!(p.angle().abs() < 1e-4);
    }

    #[test]
    fn auto_direction_moves_away_from_a_column() {
        let d = best_direction(
            Vec2::ORIGIN,
            &[Vec2::new(0.0, 2.0), Vec2::new(0.0, 3.0)],
            36,
        )
        .unwrap();
        assert!(d.approx_eq(Vec2::DOWN, 1e-4));
    }

    #[test]
    fn first_maximum_wins_on_ties() {
        // Symmetric about the x axis: 90 and 270 degrees score the same.
        let d = best_direction(
            Vec2::ORIGIN,
            &[Vec2::new(5.0, 0.0), Vec2::new(-5.0, 0.0)],
            4,
        )
        .unwrap();
        assert!(d.approx_eq(Vec2::UP, 1e-4));
    }

    #[test]
    fn rotation_is_relative_to_stored_angle() {
        let mut p = Pointer::triangle(Color::RED, None, PointerConfig::default());
        let mut rec = Recorder::new();
        rec.play(&p.point_at(&Vec2::ORIGIN, Direction::Toward(Vec2::DOWN), None, &[]))
            .unwrap();
        let plan = p.point_at(&Vec2::ORIGIN, Direction::Toward(Vec2::UP), None, &[]);
        assert!((p.angle() - 180.0).abs() < 1e-3);
        match plan.actions()[0] {
            Action::Reposition { rotate_by, .. } => {
                assert!((rotate_by - std::f32::consts::PI).abs() < 1e-4)
            }
            other => panic!("unexpected action {other:?}"),
        }
        rec.play(&plan).unwrap();
        rec.play(&p.hide()).unwrap();
        assert!(rec.scene().is_empty());
        assert!(p.hide().is_empty());
    }

    #[test]
    fn label_sits_beyond_marker() {
        let mut p = Pointer::triangle(Color::BLUE, Some("lo"), PointerConfig::default());
        let target = Bounds::new(Vec2::ORIGIN, 1.0, 1.0);
        p.point_at(&target, Direction::Toward(Vec2::DOWN), None, &[]);
        let label = p.label_node().unwrap();
        assert!(label.center.y < p.marker().center.y);
    }
}
