//! Literal-data algorithm walkthroughs.
//!
//! Every driver plays its animation into the given [`Scene`](crate::Scene)
//! and returns the algorithm's answer.

mod array_tour;
mod linear_search;
mod max_sum_k_successive;
mod selection_sort;
mod two_sum;
mod valid_parentheses;

pub use array_tour::{array_tour, TourSnapshots};
pub use linear_search::linear_search;
pub use max_sum_k_successive::max_sum_k_successive;
pub use selection_sort::selection_sort;
pub use two_sum::two_sum;
pub use valid_parentheses::valid_parentheses;

use algoviz_api_core::{Bounds, Color, Node, Value, Vec2};
use algoviz_structures::DEFAULT_BUFF;
use anyhow::{anyhow, Result};

use crate::scene::caption;

const VERDICT_SIZE: f32 = 50.0;
const REASON_SIZE: f32 = 32.0;

/// Caption placed beside `anchor` on the `direction` side.
fn caption_next_to(
    text: &str,
    color: Color,
    font_size: f32,
    anchor: &Bounds,
    direction: Vec2,
    buff: f32,
) -> Node {
    let mut node = caption(text, color, font_size, Vec2::ORIGIN);
    let to = node.bounds().next_to(anchor, direction, buff);
    node.move_to(to);
    node
}

/// Failure reason under `anchor` and the red verdict under the reason.
fn failure_captions(reason: &str, anchor: &Bounds) -> [Node; 2] {
    let reason = caption_next_to(reason, Color::RED, REASON_SIZE, anchor, Vec2::DOWN, 1.0);
    let verdict = caption_next_to(
        "Invalid parentheses sequence!",
        Color::RED,
        VERDICT_SIZE,
        &reason.bounds(),
        Vec2::DOWN,
        DEFAULT_BUFF,
    );
    [reason, verdict]
}

/// Integer results stay integers unless they overflow; anything else is
/// computed in floating point.
fn combine(
    a: &Value,
    b: &Value,
    ints: fn(i64, i64) -> Option<i64>,
    floats: fn(f64, f64) -> f64,
) -> Result<Value> {
    let (x, y) = a
        .as_f64()
        .zip(b.as_f64())
        .ok_or_else(|| anyhow!("cannot combine {a} and {b}"))?;
    if let (Value::Int(i), Value::Int(j)) = (a, b) {
        if let Some(r) = ints(*i, *j) {
            return Ok(Value::Int(r));
        }
    }
    Ok(Value::Float(floats(x, y)))
}

fn add(a: &Value, b: &Value) -> Result<Value> {
    combine(a, b, i64::checked_add, |x, y| x + y)
}

fn sub(a: &Value, b: &Value) -> Result<Value> {
    combine(a, b, i64::checked_sub, |x, y| x - y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_keep_integer_kind() {
        assert_eq!(add(&Value::from(2), &Value::from(3)).unwrap(), Value::Int(5));
        assert_eq!(
            add(&Value::from(2), &Value::from(0.5)).unwrap(),
            Value::Float(2.5)
        );
        assert_eq!(sub(&Value::from(2), &Value::from(7)).unwrap(), Value::Int(-5));
        assert!(add(&Value::from("a"), &Value::from(1)).is_err());
    }

    #[test]
    fn overflowing_sums_widen_to_float() {
        let sum = add(&Value::Int(i64::MAX), &Value::Int(1)).unwrap();
        assert_eq!(sum, Value::Float(i64::MAX as f64 + 1.0));
        let diff = sub(&Value::Int(i64::MIN), &Value::Int(1)).unwrap();
        assert!(matches!(diff, Value::Float(f) if f < 0.0));
    }
}
