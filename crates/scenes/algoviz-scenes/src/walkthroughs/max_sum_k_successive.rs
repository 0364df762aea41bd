use algoviz_api_core::{Action, Color, Node, Plan, Playback, ShapeId, Style, Value, Vec2};
use algoviz_structures::{
    Array, ArrayConfig, CompareStyle, Direction, Element, ElementStyle, Highlight, Label, Pointer,
    PointerConfig, TextStyle,
};
use anyhow::{ensure, Result};
use log::{debug, info};

use super::{add, caption_next_to, sub};
use crate::scene::{recolor, shift_all, write, Scene};

const WINDOW_PAD: f32 = 0.3;
const TAG_SIZE: f32 = 18.0;

/// Slide a window of `k` cells across the array, keeping a running sum and
/// the best one seen. Returns the start index of the first window with the
/// largest sum, and that sum.
pub fn max_sum_k_successive<P: Playback>(
    scene: &mut Scene<P>,
    values: &[Value],
    k: usize,
) -> Result<(usize, Value)> {
    ensure!(!values.is_empty(), "max_sum_k_successive needs at least one value");
    ensure!(
        (1..=values.len()).contains(&k),
        "k must be between 1 and {}, got {k}",
        values.len()
    );
    ensure!(
        values.iter().all(Value::is_numeric),
        "max_sum_k_successive values must all be numbers"
    );
    info!("max_sum_k_successive: {} values, k = {k}", values.len());

    let config = ArrayConfig::default().with_center(Vec2::new(0.0, -1.0));
    let mut array = Array::new(values.iter().cloned(), config)?;
    let readout: ElementStyle = array
        .config()
        .element
        .clone()
        .with_fit_label_to_width(false)
        .with_label_direction(Vec2::UP)
        .with_label(TextStyle::label().with_color(Color::WHITE));
    let mut sum_el = Element::new(
        Value::text("-"),
        Some(Label::from("window sum")),
        &readout,
        Vec2::new(-3.0, 1.5),
    );
    let mut max_el = Element::new(
        Value::neg_infinity(),
        Some(Label::from("max sum")),
        &readout,
        Vec2::new(0.0, 1.5),
    );
    let mut start_el = Element::new(
        Value::text("-"),
        Some(Label::from("max sum start index")),
        &readout,
        Vec2::new(3.0, 1.5),
    );
    scene.play(array.create_plan())?;
    scene.play_together([
        sum_el.fade_in_plan(None),
        max_el.fade_in_plan(None),
        start_el.fade_in_plan(None),
    ])?;
    scene.wait(1.0)?;

    let first = array.elements()[0].cell().bounds();
    let pitch = array.config().pitch();
    let mut window = Node::shape(
        ShapeId::Rectangle,
        (array.slot_center(0) + array.slot_center(k - 1)) * 0.5,
        (k - 1) as f32 * pitch + first.width + WINDOW_PAD,
        first.height + WINDOW_PAD,
        Style::default()
            .with_stroke(Color::YELLOW)
            .with_fill(Color::YELLOW, 0.3),
    );
    let mut size_caption = caption_next_to(
        &format!("k = {k}"),
        Color::WHITE,
        30.0,
        &window.bounds(),
        Vec2::UP,
        0.1,
    );
    let mut ptr = Pointer::triangle(Color::YELLOW, Some("i"), PointerConfig::default());
    let down = Direction::Toward(Vec2::DOWN);
    scene.play_together([
        write([&window, &size_caption]),
        ptr.point_at(&array.elements()[0], down, None, &[]),
    ])?;
    scene.wait(1.0)?;

    let mut tags = if values.len() > k {
        let old = caption_next_to(
            "-arr[i-1]",
            Color::RED,
            TAG_SIZE,
            &array.elements()[0].bounds(),
            Vec2::DOWN,
            0.15,
        );
        let new = caption_next_to(
            "+arr[i+k-1]",
            Color::GREEN,
            TAG_SIZE,
            &array.elements()[k].bounds(),
            Vec2::DOWN,
            0.15,
        );
        vec![old, new]
    } else {
        Vec::new()
    };

    let leaving = Highlight::colored(Color::RED)
        .with_stroke_color(Color::WHITE)
        .with_fill_opacity(0.5)
        .with_scale(1.0)
        .with_restore(false);
    let entering = Highlight {
        color: Color::GREEN,
        label_color: Color::GREEN,
        ..leaving.clone()
    };
    let compare = CompareStyle::default();

    let mut curr = Value::Int(0);
    for v in &values[..k] {
        curr = add(&curr, v)?;
    }
    let mut best: Option<(usize, Value)> = None;
    let last = values.len() - k;

    for i in 0..=last {
        if i == 0 {
            let to = sum_el.anchor();
            let gather = array.elements()[..k]
                .iter()
                .map(|e| fly(e.content(), to))
                .collect::<Vec<_>>();
            scene.play_together(gather.into_iter().chain([sum_el.replace_value(curr.clone())]))?;
        } else {
            let mut slide = vec![
                ptr.point_at(&array.elements()[i], down, None, &[]),
                array.highlight(i - 1, &leaving)?,
                array.highlight(i + k - 1, &entering)?,
            ];
            let mut moving = vec![&mut window, &mut size_caption];
            if i == 1 {
                slide.push(write(tags.iter()));
            } else {
                moving.extend(tags.iter_mut());
                for stale in [i - 2, i + k - 2] {
                    if stale != i - 1 {
                        slide.push(array.revert(stale)?);
                    }
                }
            }
            slide.push(shift_all(moving, Vec2::RIGHT * pitch));
            scene.play_together(slide)?;
            scene.wait(1.0)?;

            let old = &values[i - 1];
            let new = &values[i + k - 1];
            curr = sub(&add(&curr, new)?, old)?;
            debug!("max_sum_k_successive: window {i} sums to {curr}");
            scene.play_together([
                fly(sum_el.content(), array.elements()[i - 1].anchor()),
                fly(array.elements()[i + k - 1].content(), sum_el.anchor()),
                sum_el.replace_value(curr.clone()),
            ])?;
            scene.wait(1.0)?;
        }

        scene.play(sum_el.compare_with(&mut max_el, &compare)?)?;
        scene.wait(0.5)?;
        if best.as_ref().map_or(true, |(_, max)| curr > *max) {
            debug!("max_sum_k_successive: new best {curr} at {i}");
            let mut record = vec![
                fly(sum_el.content(), max_el.anchor()),
                max_el.replace_value(curr.clone()),
                start_el.replace_value(i as i64),
            ];
            if let Some(index_label) = array.elements()[i].label_node() {
                record.push(fly(index_label, start_el.anchor()));
            }
            scene.play_together(record)?;
            best = Some((i, curr.clone()));
        }
    }
    scene.wait(2.0)?;

    let (start, max) = best.unwrap_or((0, curr));
    info!("max_sum_k_successive: best window starts at {start} with sum {max}");
    let back = Vec2::LEFT * pitch * (last - start) as f32;
    let settle = shift_all([&mut window, &mut size_caption], back).followed_by(Plan::parallel([
        recolor(&mut window, Color::GREEN),
        recolor(&mut size_caption, Color::GREEN),
    ]));
    let drop_tags = Plan::together(
        tags.iter().map(|t| Action::FadeOut { id: t.id, to: None }),
        None,
    );
    let won = Highlight::colored(Color::GREEN)
        .with_fill_opacity(1.0)
        .with_restore(false);
    let picked = Highlight::colored(Color::BLACK)
        .with_stroke_color(Color::GREEN)
        .with_font_color(Color::GREEN)
        .with_fill_opacity(0.0)
        .with_scale(1.0)
        .with_restore(false);
    scene.play_together([
        settle,
        drop_tags,
        ptr.point_at(&array.elements()[start], down, None, &[]),
        max_el.highlight(&won),
        start_el.highlight(&picked),
        array.revert_all(),
    ])?;
    scene.wait(5.0)?;
    Ok((start, max))
}

/// A copy of `node` that appears in place and fades out toward `to`.
fn fly(node: &Node, to: Vec2) -> Plan {
    let copy = node.duplicate();
    Plan::together(
        [Action::FadeIn {
            node: copy.clone(),
            from: None,
        }],
        Some(0.0),
    )
    .followed_by(Plan::together(
        [Action::FadeOut {
            id: copy.id,
            to: Some(to),
        }],
        None,
    ))
}
