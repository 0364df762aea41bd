use algoviz_api_core::{Color, Plan, Playback, Value, Vec2};
use algoviz_structures::{
    Array, ArrayConfig, CompareStyle, Direction, Element, ElementStyle, Highlight, Label, Pointer,
    PointerConfig, TextStyle, DEFAULT_BUFF,
};
use anyhow::{ensure, Result};
use log::{debug, info};

use super::{add, caption_next_to, REASON_SIZE};
use crate::scene::{caption, flash, write, Scene};

const SIGN_SIZE: f32 = 60.0;

/// Two pointers closing in on a sorted array until `values[i] + values[j]`
/// hits `target`. Returns the pair of indices, or `None` when the pointers
/// meet first.
pub fn two_sum<P: Playback>(
    scene: &mut Scene<P>,
    values: &[Value],
    target: Value,
) -> Result<Option<(usize, usize)>> {
    ensure!(target.is_numeric(), "two_sum target must be a number, got {target}");
    ensure!(
        values.iter().all(Value::is_numeric),
        "two_sum values must all be numbers"
    );
    ensure!(
        values.windows(2).all(|w| w[0] <= w[1]),
        "two_sum values must be sorted ascending"
    );
    info!("two_sum: {} values, target {target}", values.len());

    let config = ArrayConfig::default().with_center(Vec2::new(0.0, -1.0));
    let mut array = Array::new(values.iter().cloned(), config)?;
    let side = array
        .config()
        .element
        .clone()
        .with_fit_label_to_width(false)
        .with_label(TextStyle::label().with_color(Color::WHITE));
    let sum_style: ElementStyle = side.clone().with_label_direction(Vec2::LEFT);
    let target_style: ElementStyle = side.with_label_direction(Vec2::RIGHT);
    let mut sum_el = Element::new(
        Value::text("-"),
        Some(Label::from("arr[i] + arr[j] = ")),
        &sum_style,
        Vec2::new(-1.5, 1.5),
    );
    let mut target_el = Element::new(
        target.clone(),
        Some(Label::from("target")),
        &target_style,
        Vec2::new(1.5, 1.5),
    );
    scene.play(array.create_plan())?;
    scene.play_together([target_el.fade_in_plan(None), sum_el.fade_in_plan(None)])?;
    scene.wait(1.0)?;

    let between = (sum_el.bounds().critical_point(Vec2::RIGHT)
        + target_el.bounds().critical_point(Vec2::LEFT))
        * 0.5;
    let pick = Highlight::colored(Color::YELLOW)
        .with_stroke_color(Color::WHITE)
        .with_scale(1.0)
        .with_restore(false);
    let compare = CompareStyle::default();
    let down = Direction::Toward(Vec2::DOWN);

    let mut i_ptr = Pointer::triangle(Color::YELLOW, Some("i"), PointerConfig::default());
    let mut j_ptr = Pointer::triangle(Color::ORANGE, Some("j"), PointerConfig::default());
    let (mut i, mut j) = (0, array.len() - 1);
    let mut left_behind: Option<usize> = None;

    while i < j {
        let sum = add(&array.values()[i], &array.values()[j])?;
        debug!("two_sum: arr[{i}] + arr[{j}] = {sum}");
        let mut step = vec![
            i_ptr.point_at(&array.elements()[i], down, None, &[]),
            j_ptr.point_at(&array.elements()[j], down, None, &[]),
            array.highlight_indices(&[i, j], &pick)?,
            sum_el.replace_value(sum.clone()),
        ];
        if let Some(k) = left_behind.take() {
            step.push(array.revert(k)?);
        }
        scene.play_together(step)?;
        scene.wait(1.0)?;

        if sum == target {
            info!("two_sum: found ({i}, {j})");
            let done = Highlight::colored(Color::GREEN)
                .with_fill_opacity(1.0)
                .with_restore(false);
            let lifted = done
                .clone()
                .with_stroke_color(Color::WHITE)
                .with_scale(1.0)
                .with_shift(Vec2::UP * 0.2);
            let glow = Plan::parallel([
                sum_el.highlight(&done),
                target_el.highlight(&done),
                array.highlight_indices(&[i, j], &lifted)?,
            ]);
            let equals = caption("=", Color::WHITE, SIGN_SIZE, between);
            let found = caption_next_to(
                &format!("found with arr[{i}]+arr[{j}]"),
                Color::GREEN,
                REASON_SIZE,
                &target_el.bounds(),
                Vec2::DOWN,
                DEFAULT_BUFF,
            );
            // Pointers follow the lifted elements.
            let follow = [
                i_ptr.point_at(&array.elements()[i], down, None, &[]),
                j_ptr.point_at(&array.elements()[j], down, None, &[]),
            ];
            scene.play_together(
                [glow, write([&equals, &found])]
                    .into_iter()
                    .chain(follow),
            )?;
            scene.wait(5.0)?;
            return Ok(Some((i, j)));
        }

        let sign = if sum < target {
            left_behind = Some(i);
            i += 1;
            "<"
        } else {
            left_behind = Some(j);
            j -= 1;
            ">"
        };
        let sign = caption(sign, Color::WHITE, SIGN_SIZE, between);
        scene.play_together([sum_el.compare_with(&mut target_el, &compare)?, flash(&sign, 0.25)])?;
    }

    info!("two_sum: no pair adds up to {target}");
    scene.wait(1.0)?;
    let missing = caption_next_to(
        "cannot be found",
        Color::RED,
        REASON_SIZE,
        &target_el.bounds(),
        Vec2::DOWN,
        DEFAULT_BUFF,
    );
    let failed = Highlight::colored(Color::RED)
        .with_fill_opacity(1.0)
        .with_scale(1.0)
        .with_restore(false);
    scene.play_together([
        i_ptr.point_at(&array.elements()[i], down, None, &[]),
        j_ptr.point_at(&array.elements()[j], down, None, &[]),
        sum_el.replace_value(Value::text("-")),
        write([&missing]),
        target_el.highlight(&failed),
        array.revert_all(),
    ])?;
    scene.wait(5.0)?;
    Ok(None)
}
