use algoviz_api_core::{Color, Node, Plan, Playback, ShapeId, Style, Value, Vec2};
use algoviz_structures::{
    Array, ArrayConfig, Direction, Highlight, Pointer, PointerConfig, DEFAULT_BUFF,
};
use anyhow::{ensure, Result};
use log::{debug, info};

use crate::scene::{caption, shift_all, write, Scene};

const SEPARATOR_HEIGHT: f32 = 5.0;
const SIDE_LABEL_SIZE: f32 = 28.0;

/// Sort ascending by repeatedly swapping the minimum of the unsorted tail
/// into place. A separator with "sorted"/"unsorted" captions walks right one
/// slot per pass and finished slots are dimmed.
pub fn selection_sort<P: Playback>(scene: &mut Scene<P>, values: &[Value]) -> Result<Vec<Value>> {
    ensure!(
        values.iter().all(|v| v.partial_cmp(&values[0]).is_some() && v.partial_cmp(v).is_some()),
        "selection_sort values must be mutually comparable"
    );
    info!("selection_sort: {} values", values.len());
    let mut array = Array::new(values.iter().cloned(), ArrayConfig::default())?;
    scene.play(array.create_plan())?;

    let first = array.elements()[0].bounds();
    let mut separator = Node::shape(
        ShapeId::Rectangle,
        Vec2::new(first.left(), first.center.y),
        0.04,
        SEPARATOR_HEIGHT,
        Style::default().with_fill(Color::WHITE, 1.0),
    );
    let mut sorted_label = caption("sorted", Color::WHITE, SIDE_LABEL_SIZE, Vec2::ORIGIN);
    let mut unsorted_label = caption("unsorted", Color::WHITE, SIDE_LABEL_SIZE, Vec2::ORIGIN);
    let to = sorted_label
        .bounds()
        .next_to(&separator.bounds(), Vec2::UL, DEFAULT_BUFF);
    sorted_label.move_to(to);
    let to = unsorted_label
        .bounds()
        .next_to(&separator.bounds(), Vec2::UR, DEFAULT_BUFF);
    unsorted_label.move_to(to);
    scene.play(write([&separator, &sorted_label, &unsorted_label]))?;

    let pointers = PointerConfig::default().with_buff(DEFAULT_BUFF);
    let mut i_ptr = Pointer::triangle(Color::ORANGE, Some("i"), pointers.clone());
    let mut j_ptr = Pointer::triangle(Color::PURPLE, Some("j"), pointers.clone());
    let mut min_ptr = Pointer::dot(Color::BLUE, Some("min"), pointers);
    let dim = Highlight {
        color: Color::BLACK,
        stroke_color: Color::GREY,
        font_color: Color::GREY,
        label_color: Color::GREY,
        fill_opacity: 0.0,
        scale_ratio: 1.0,
        restore: false,
        ..Highlight::default()
    };

    let down = Direction::Toward(Vec2::DOWN);
    let up = Direction::Toward(Vec2::UP);
    let n = array.len();
    for i in 0..n {
        scene.play(i_ptr.point_at(&array.elements()[i], down, None, &[]))?;
        let mut min_idx = i;
        scene.play(min_ptr.point_at(&array.elements()[min_idx], up, None, &[]))?;
        for j in i + 1..n {
            scene.play(j_ptr.point_at(&array.elements()[j], down, None, &[]))?;
            if array.values()[j] < array.values()[min_idx] {
                min_idx = j;
                scene.play(min_ptr.point_at(&array.elements()[j], up, None, &[]))?;
            }
        }
        debug!("selection_sort: pass {i} picks index {min_idx}");
        scene.play(array.swap(i, min_idx)?)?;

        let pitch = array.config().pitch();
        let walk = shift_all(
            [&mut separator, &mut sorted_label, &mut unsorted_label],
            Vec2::RIGHT * pitch,
        );
        let settle = array.highlight(i, &dim)?;
        scene.play_together([walk, settle, j_ptr.hide(), min_ptr.hide()])?;
    }

    scene.play(Plan::parallel([array.revert_all(), i_ptr.hide()]))?;
    scene.wait(3.0)?;
    Ok(array.values().to_vec())
}

