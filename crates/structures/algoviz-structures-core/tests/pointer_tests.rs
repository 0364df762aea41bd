use std::f32::consts::TAU;

use algoviz_api_core::{Action, Recorder};
use algoviz_structures::{
    best_direction, Anchor, Array, ArrayConfig, Color, Direction, Playback, Pointer,
    PointerConfig, Vec2,
};

/// Reference scoring, written out independently.
fn brute_force(center: Vec2, avoid: &[Vec2]) -> (usize, f32) {
    let mut best = (0, f32::MIN);
    for k in 0..36 {
        let d = Vec2::from_angle(TAU * k as f32 / 36.0);
        let p = center + d;
        let score: f32 = avoid.iter().map(|a| (p - *a).length()).sum();
        if score > best.1 {
            best = (k, score);
        }
    }
    best
}

#[test]
fn auto_direction_maximizes_summed_distance() {
    let target = Vec2::new(1.0, -0.5);
    let a = Vec2::new(2.0, 1.0);
    let b = Vec2::new(-1.0, 2.5);
    let d = best_direction(target, &[a, b], 36).unwrap();
    let (k, _) = brute_force(target, &[a, b]);
    assert!(d.approx_eq(Vec2::from_angle(TAU * k as f32 / 36.0), 1e-5));
}

#[test]
fn auto_pointer_avoids_other_elements() {
    let array = Array::new([10, 20, 30], ArrayConfig::default()).unwrap();
    let mut rec = Recorder::new();
    rec.play(&array.create_plan()).unwrap();

    let target = &array.elements()[1];
    let left: &dyn Anchor = &array.elements()[0];
    let right: &dyn Anchor = &array.elements()[2];
    let mut p = Pointer::triangle(Color::YELLOW, Some("mid"), PointerConfig::default());

    let plan = p.point_at(target, Direction::Auto, None, &[left, right]);
    rec.play(&plan).unwrap();

    // Neighbours sit left and right, so the pointer goes above or below.
    let d = p.marker().center - target.bounds().center;
    assert!(d.x.abs() < 1e-3, "marker drifted sideways: {d:?}");
    assert!(p.is_visible());
    assert!(plan
        .actions()
        .iter()
        .all(|a| matches!(a, Action::FadeIn { .. })));
}

#[test]
fn repeated_aims_move_and_turn() {
    let mut rec = Recorder::new();
    let mut p = Pointer::dot(Color::RED, Some("k"), PointerConfig::default().with_run_time(0.3));
    rec.play(&p.point_at(&Vec2::ORIGIN, Direction::Toward(Vec2::LEFT), None, &[]))
        .unwrap();
    assert!((p.angle() - 270.0).abs() < 1e-3);
    assert!(p.marker().center.x < 0.0);

    let plan = p.point_at(&Vec2::new(3.0, 0.0), Direction::Toward(Vec2::RIGHT), Some(1.0), &[]);
    assert!((p.angle() - 90.0).abs() < 1e-3);
    assert!((plan.duration(1.0) - 0.3).abs() < 1e-6);
    match plan.actions()[0] {
        Action::Reposition { to, rotate_by, .. } => {
            assert!(to.x > 3.0);
            assert!((rotate_by + std::f32::consts::PI).abs() < 1e-4);
        }
        other => panic!("unexpected action {other:?}"),
    }
    rec.play(&plan).unwrap();
    rec.play(&p.hide()).unwrap();
    assert!(rec.scene().is_empty());

    // A hidden pointer fades back in.
    let again = p.point_at(&Vec2::ORIGIN, Direction::Toward(Vec2::DOWN), None, &[]);
    rec.play(&again).unwrap();
    assert_eq!(rec.scene().len(), 2);
}
