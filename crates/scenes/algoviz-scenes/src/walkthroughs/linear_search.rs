use algoviz_api_core::{Color, Plan, Playback, Value, Vec2};
use algoviz_structures::{
    Array, ArrayConfig, Direction, Element, ElementStyle, Highlight, Label, Pointer,
    PointerConfig,
};
use anyhow::Result;
use log::info;

use super::{caption_next_to, VERDICT_SIZE};
use crate::scene::{write, Scene};

/// Scan left to right for `target`. Misses pulse red; a hit turns the
/// element and the target green for good.
pub fn linear_search<P: Playback>(
    scene: &mut Scene<P>,
    values: &[Value],
    target: Value,
) -> Result<Option<usize>> {
    info!("linear_search: {} values, target {target}", values.len());
    let config = ArrayConfig::default().with_center(Vec2::new(0.0, -1.0));
    let mut array = Array::new(values.iter().cloned(), config)?;

    let style: ElementStyle = array
        .config()
        .element
        .clone()
        .with_label_direction(Vec2::UP);
    let mut target_el = Element::new(
        target.clone(),
        Some(Label::from("target")),
        &style,
        Vec2::new(-3.0, 1.5),
    );
    scene.play_together([array.create_plan(), target_el.create_plan()])?;

    let mut ptr = Pointer::triangle(Color::YELLOW, Some("i"), PointerConfig::default());
    let miss = Highlight::colored(Color::RED)
        .with_stroke_color(Color::WHITE)
        .with_scale(1.0);
    let hit = Highlight::colored(Color::GREEN)
        .with_fill_opacity(1.0)
        .with_restore(false);

    for i in 0..array.len() {
        scene.play(ptr.point_at(&array.elements()[i], Direction::Toward(Vec2::DOWN), None, &[]))?;
        if array.values()[i] == target {
            info!("linear_search: found at {i}");
            let glow = Plan::parallel([array.highlight(i, &hit)?, target_el.highlight(&hit)]);
            scene.play(glow)?;
            let found = caption_next_to(
                &format!("Found at index {i}"),
                Color::GREEN,
                VERDICT_SIZE,
                &target_el.cell().bounds(),
                Vec2::RIGHT,
                0.5,
            );
            scene.play(write([&found]))?;
            scene.wait(4.0)?;
            return Ok(Some(i));
        }
        scene.play(Plan::parallel([array.highlight(i, &miss)?, target_el.highlight(&miss)]))?;
        scene.wait(0.2)?;
    }

    info!("linear_search: {target} not present");
    let missing = caption_next_to(
        "Not found",
        Color::RED,
        VERDICT_SIZE,
        &target_el.cell().bounds(),
        Vec2::RIGHT,
        0.5,
    );
    scene.play(target_el.highlight(&Highlight::colored(Color::RED).with_restore(false)))?;
    scene.play(write([&missing]))?;
    scene.wait(4.0)?;
    Ok(None)
}
