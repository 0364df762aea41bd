use algoviz_api_core::{
    Action, Color, Node, Plan, Playback, Recorder, ShapeId, Step, Style, Value, Vec2,
};
use serde_json::{json, Value as JsonValue};

fn square(center: Vec2) -> Node {
    Node::shape(ShapeId::Rectangle, center, 1.0, 1.0, Style::default())
}

#[test]
fn recorder_timeline_serializes_in_order() {
    let a = square(Vec2::ORIGIN);
    let t = Node::text(Value::from(5).display_text(), None, 32.0, Color::WHITE, Vec2::ORIGIN);
    let (a_id, t_id) = (a.id, t.id);

    let mut rec = Recorder::new();
    rec.play(&Plan::together(
        [Action::Create { node: a }, Action::Create { node: t }],
        Some(0.25),
    ))
    .unwrap();
    rec.play(
        &Plan::of(Step::play(Action::Shift {
            id: a_id,
            by: Vec2::RIGHT,
        }))
        .then(Step::wait(0.5))
        .followed_by(Plan::together([Action::FadeOut { id: t_id, to: None }], None)),
    )
    .unwrap();

    let json = rec.to_json().unwrap();
    let plans = json["plans"].as_array().unwrap();
    assert_eq!(plans.len(), 2);

    let first = &plans[0]["steps"][0];
    assert_eq!(first["step"], "parallel");
    assert_eq!(first["run_time"], json!(0.25));
    assert_eq!(first["steps"][0]["action"]["op"], "create");
    assert_eq!(first["steps"][1]["action"]["node"]["kind"]["text"], "5");

    let second = &plans[1]["steps"];
    assert_eq!(second[0]["action"]["op"], "shift");
    assert_eq!(second[0]["action"]["by"], json!({ "x": 1.0, "y": 0.0 }));
    assert_eq!(second[1], json!({ "step": "wait", "seconds": 0.5 }));
    assert!(second[2].get("run_time").is_none());

    // 0.25 + (1.0 + 0.5 + 1.0)
    let total = json["total_duration"].as_f64().unwrap();
    assert!((total - 2.75).abs() < 1e-6);
    assert_eq!(rec.scene().len(), 1);
}

#[test]
fn plan_round_trips_through_json() {
    let n = square(Vec2::new(1.0, 2.0));
    let id = n.id;
    let plan = Plan::of(Step::sequence(vec![
        Step::play(Action::FadeIn {
            node: n.clone(),
            from: Some(Vec2::UR),
        }),
        Step::parallel(
            vec![Step::play(Action::Reposition {
                id,
                to: Vec2::DOWN,
                rotate_by: 1.5,
            })],
            Some(0.5),
        ),
    ]));
    let text = serde_json::to_string(&plan).unwrap();
    let back: Plan = serde_json::from_str(&text).unwrap();
    assert_eq!(back, plan);

    let v: JsonValue = serde_json::from_str(&text).unwrap();
    assert_eq!(v["steps"][0]["step"], "sequence");
    assert_eq!(v["steps"][0]["steps"][0]["action"]["from"], json!({ "x": 1.0, "y": 1.0 }));
}
