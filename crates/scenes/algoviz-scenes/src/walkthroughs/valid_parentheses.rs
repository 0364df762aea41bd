use algoviz_api_core::{Action, Bounds, Color, Node, Plan, Playback, TextMetrics, Value, Vec2};
use algoviz_structures::{
    Direction, Highlight, Pointer, PointerConfig, Stack, StackConfig, DEFAULT_BUFF, FRAME_HEIGHT,
    FRAME_WIDTH,
};
use anyhow::{ensure, Result};
use log::{debug, info};

use super::{caption_next_to, failure_captions};
use crate::scene::{recolor, write, Scene};

const ROW_FONT: &str = "Consolas";
const ROW_SIZE: f32 = 40.0;

fn opening_for(close: char) -> Option<char> {
    match close {
        ')' => Some('('),
        ']' => Some('['),
        '}' => Some('{'),
        _ => None,
    }
}

fn is_opening(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

/// The quoted input laid out one node per character, shrunk to fit 70% of
/// the frame width.
fn character_row(input: &str) -> Vec<Node> {
    let quoted: Vec<char> = std::iter::once('"')
        .chain(input.chars())
        .chain(std::iter::once('"'))
        .collect();
    let advance = |c: char| TextMetrics::measure(&c.to_string(), ROW_SIZE).0;
    let total: f32 = quoted.iter().map(|c| advance(*c)).sum();
    let center = Vec2::RIGHT * (FRAME_WIDTH * 0.1);
    let factor = (FRAME_WIDTH * 0.7 / total).min(1.0);

    let mut x = center.x - total / 2.0;
    quoted
        .into_iter()
        .map(|c| {
            let w = advance(c);
            let mut node = Node::text(
                c.to_string(),
                Some(ROW_FONT.to_string()),
                ROW_SIZE,
                Color::WHITE,
                Vec2::new(x + w / 2.0, center.y),
            );
            node.scale_about(center, factor);
            x += w;
            node
        })
        .collect()
}

fn row_bounds(row: &[Node]) -> Bounds {
    Bounds::enclosing(row.iter().map(Node::bounds)).unwrap_or_default()
}

/// Bracket matching with a stack. Openers are pushed from their place in the
/// string; a closer either pops its partner or ends the walk with the reason
/// spelled out.
pub fn valid_parentheses<P: Playback>(scene: &mut Scene<P>, input: &str) -> Result<bool> {
    ensure!(
        input.chars().all(|c| is_opening(c) || opening_for(c).is_some()),
        "input must be made of parentheses only (){{}}[]"
    );
    info!("valid_parentheses: {input:?}");

    let mut row = character_row(input);
    let row_box = row_bounds(&row);
    let mut stack = Stack::new(
        Vec::<Value>::new(),
        StackConfig::default()
            .with_label("stack")
            .with_bottom(Vec2::new(-FRAME_WIDTH * 0.4, -FRAME_HEIGHT / 2.0 * 0.9)),
    );
    let mut pairs = caption_next_to(
        "( )    { }    [ ]",
        Color::WHITE,
        48.0,
        &row_box,
        Vec2::UP,
        1.5,
    );
    pairs.shift(Vec2::RIGHT * 3.0);
    let legend = caption_next_to(
        "valid open/close pairs:",
        Color::WHITE,
        28.0,
        &pairs.bounds(),
        Vec2::UP,
        DEFAULT_BUFF,
    );
    scene.play_together([
        write(row.iter().chain([&pairs, &legend])),
        stack.create_plan(),
    ])?;

    let config = PointerConfig::default().with_run_time(0.25);
    let mut ptr = Pointer::triangle(Color::YELLOW, None, config);
    let matched = Highlight::colored(Color::GREEN).with_restore(false);
    let broken = Highlight::colored(Color::RED).with_restore(false);

    for (k, c) in input.chars().enumerate() {
        let slot = k + 1;
        scene.play(ptr.point_at(&row[slot], Direction::Toward(Vec2::DOWN), None, &[]))?;

        if is_opening(c) {
            let from = row[slot].center;
            scene.play_together([
                stack.push(c, Some(from)),
                recolor(&mut row[slot], Color::GREEN),
            ])?;
            continue;
        }

        let Some(top) = stack.values().last().cloned() else {
            debug!("valid_parentheses: '{c}' at {k} with empty stack");
            let cross = caption_next_to(
                "X",
                Color::RED,
                70.0,
                &stack.bounds(),
                Vec2::UP,
                DEFAULT_BUFF,
            );
            let show_cross = Plan::together(
                [Action::FadeIn {
                    node: cross,
                    from: None,
                }],
                None,
            );
            let [reason, verdict] =
                failure_captions("Closing parentheses with empty stack", &row_box);
            scene.play_together([
                show_cross,
                recolor(&mut row[slot], Color::RED),
                write([&reason, &verdict]),
            ])?;
            scene.wait(2.0)?;
            return Ok(false);
        };

        let expected = opening_for(c).map(Value::from);
        if expected.as_ref() != Some(&top) {
            debug!("valid_parentheses: '{c}' at {k} does not close '{top}'");
            let [reason, verdict] = failure_captions(
                &format!("'{c}' doesn't match latest opening parentheses '{top}'"),
                &row_box,
            );
            scene.play_together([
                stack.highlight_top(&broken)?,
                recolor(&mut row[slot], Color::RED),
                write([&reason, &verdict]),
            ])?;
            scene.wait(2.0)?;
            return Ok(false);
        }

        scene.play_together([
            stack.highlight_top(&matched)?,
            recolor(&mut row[slot], Color::GREEN),
        ])?;
        let (_, pop) = stack.pop(None)?;
        scene.play(pop)?;
    }

    if !stack.is_empty() {
        debug!("valid_parentheses: {} unclosed", stack.len());
        let [reason, verdict] =
            failure_captions("There are remaining unclosed parentheses", &row_box);
        scene.play_together([
            stack.highlight_all(&broken.clone().with_scale(1.0)),
            ptr.hide(),
            write([&reason, &verdict]),
        ])?;
        scene.wait(2.0)?;
        return Ok(false);
    }

    let success = caption_next_to(
        "Valid parentheses sequence!",
        Color::GREEN,
        60.0,
        &row_box,
        Vec2::DOWN,
        1.0,
    );
    scene.play_together([ptr.hide(), write([&success])])?;
    scene.wait(2.0)?;
    Ok(true)
}
