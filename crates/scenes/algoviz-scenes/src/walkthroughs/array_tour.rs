use algoviz_api_core::{Color, Playback, Value};
use algoviz_structures::{Array, ArrayConfig, CompareStyle, Highlight};
use anyhow::{ensure, Result};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::scene::Scene;

/// Array contents after each stage of [`array_tour`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TourSnapshots {
    pub after_insert: Vec<Value>,
    pub after_remove: Vec<Value>,
    pub sorted: Vec<Value>,
    pub last: Vec<Value>,
}

/// Exercise every array operation once: insert at 2, remove the head, swap
/// the ends, emphasize and compare, sort, shuffle with `seed`, then append
/// and pop.
pub fn array_tour<P: Playback>(
    scene: &mut Scene<P>,
    values: &[Value],
    seed: u64,
    config: ArrayConfig,
) -> Result<TourSnapshots> {
    ensure!(values.len() >= 2, "array tour needs at least two values");
    info!("array_tour: {} values, seed {seed}", values.len());
    let mut array = Array::new(values.iter().cloned(), config)?;
    scene.play(array.create_plan())?;
    scene.wait(0.5)?;

    scene.play(array.insert(2, 400)?)?;
    let after_insert = array.values().to_vec();
    scene.play(array.remove(0)?)?;
    let after_remove = array.values().to_vec();

    let last = array.len() - 1;
    scene.play(array.swap(0, last)?)?;
    scene.play(array.highlight_indices(&[0, last], &Highlight::colored(Color::BLUE))?)?;
    scene.play(array.compare(0, 1, &CompareStyle::default())?)?;
    let held = array.values()[1].clone();
    scene.play(array.replace_value(1, Value::infinity())?)?;
    scene.play(array.replace_value(1, held)?)?;

    scene.play(array.sort(false)?)?;
    let sorted = array.values().to_vec();
    scene.play(array.highlight(0, &Highlight::colored(Color::GREEN).with_restore(false))?)?;
    scene.play(array.revert_all())?;

    let mut rng = StdRng::seed_from_u64(seed);
    scene.play(array.shuffle_with(&mut rng))?;
    scene.play(array.append(-1))?;
    scene.play(array.pop()?)?;
    let last = array.values().to_vec();

    scene.wait(1.0)?;
    scene.play(array.fade_out_plan())?;
    info!("array_tour: done after {} plans", scene.played());
    Ok(TourSnapshots {
        after_insert,
        after_remove,
        sorted,
        last,
    })
}
