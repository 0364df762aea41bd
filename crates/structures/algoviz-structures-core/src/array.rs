//! Array: a horizontal row of index-labelled elements that stays in lock-step
//! with its value list.
//!
//! Every mutation validates first, then updates `values` and `elements`
//! together and returns the plan that shows the change. Layout is derived from
//! the configured style, so slot positions never depend on emphasized boxes.

use std::cmp::Ordering;

use algoviz_api_core::{Action, Plan, Value, Vec2};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{ArrayConfig, CompareStyle, Highlight};
use crate::element::{Element, Label};
use crate::error::{Result, StructureError};

#[derive(Clone, Debug)]
pub struct Array {
    values: Vec<Value>,
    elements: Vec<Element>,
    config: ArrayConfig,
}

/// Map a possibly negative index into `0..n` (or `0..=n` with `allow_end`).
fn resolve_index(op: &'static str, index: isize, n: usize, allow_end: bool) -> Result<usize> {
    let len = n as isize;
    let upper = if allow_end { len } else { len - 1 };
    let idx = if index < 0 { index + len } else { index };
    if index < -len || idx < 0 || idx > upper {
        debug!("array: {op} rejected index {index} (len {n})");
        return Err(StructureError::IndexOutOfRange { op, index, len: n });
    }
    Ok(idx as usize)
}

fn check_index(op: &'static str, index: usize, n: usize) -> Result<usize> {
    if index >= n {
        debug!("array: {op} rejected index {index} (len {n})");
        return Err(StructureError::IndexOutOfRange {
            op,
            index: index as isize,
            len: n,
        });
    }
    Ok(index)
}

impl Array {
    pub fn new<I, V>(values: I, config: ArrayConfig) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(StructureError::Empty { what: "array" });
        }
        let mut config = config;
        let total = config.total_width(values.len());
        if total > config.max_width {
            config = config.scaled(config.max_width / total);
            debug!("array: initial width {total:.2} scaled to {:.2}", config.max_width);
        }
        let mut array = Self {
            values: Vec::new(),
            elements: Vec::new(),
            config,
        };
        let n = values.len();
        array.elements = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                Element::new(
                    v.clone(),
                    Some(Label::Index(i)),
                    &array.config.element,
                    array.slot_center_for(i, n),
                )
            })
            .collect();
        array.values = values;
        Ok(array)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.elements.get_mut(index)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Displayed index label of every element, in order.
    pub fn labels(&self) -> Vec<String> {
        self.elements
            .iter()
            .map(|e| e.label_text().unwrap_or_default().to_string())
            .collect()
    }

    pub fn center(&self) -> Vec2 {
        self.config.center
    }

    /// Current (possibly rescaled) configuration.
    pub fn config(&self) -> &ArrayConfig {
        &self.config
    }

    /// Where slot `index` sits in the current layout.
    pub fn slot_center(&self, index: usize) -> Vec2 {
        self.slot_center_for(index, self.len())
    }

    fn slot_center_for(&self, index: usize, n: usize) -> Vec2 {
        let offset = (index as f32 - (n as f32 - 1.0) / 2.0) * self.config.pitch();
        self.config.center + Vec2::RIGHT * offset
    }

    fn debug_check(&self) {
        debug_assert_eq!(self.values.len(), self.elements.len());
    }

    pub fn create_plan(&self) -> Plan {
        Plan::parallel(self.elements.iter().map(Element::create_plan))
    }

    pub fn fade_out_plan(&self) -> Plan {
        Plan::parallel(self.elements.iter().map(|e| e.fade_out_plan(None)))
    }

    /// Recenter on the anchor and scale down if the row got too wide.
    fn relayout(&mut self) -> Plan {
        let n = self.len();
        let total = self.config.total_width(n);
        let factor = if total > self.config.max_width {
            self.config.max_width / total
        } else {
            1.0
        };
        if factor < 1.0 {
            self.config = self.config.scaled(factor);
            debug!("array: rescaled by {factor:.3} to fit {:.2}", self.config.max_width);
        }
        let pivot = self.config.center;
        let targets: Vec<Vec2> = (0..n).map(|i| self.slot_center_for(i, n)).collect();
        let actions: Vec<Action> = self
            .elements
            .iter_mut()
            .zip(targets)
            .flat_map(|(e, t)| e.relayout(pivot, factor, t))
            .collect();
        Plan::together(actions, Some(self.config.phase_time))
    }

    /// Add a value at the end: the new element appears to the right, slides
    /// into place, then the row recenters.
    pub fn append(&mut self, value: impl Into<Value>) -> Plan {
        let value = value.into();
        let n = self.len();
        let slot = match self.elements.last() {
            Some(last) => last.anchor() + Vec2::RIGHT * self.config.pitch(),
            None => self.config.center,
        };
        let start = slot + Vec2::RIGHT * (self.config.element.cell.width + self.config.entry_buff);
        let mut element = Element::new(
            value.clone(),
            Some(Label::Index(n)),
            &self.config.element,
            start,
        );
        debug!("array: append {value} at {n}");

        let phase = self.config.phase_time;
        let mut plan = Plan::together(element.create_actions(), Some(phase));
        plan.append(Plan::together(element.shift(slot - start), Some(phase)));
        self.values.push(value);
        self.elements.push(element);
        plan.append(self.relayout());
        self.debug_check();
        plan
    }

    /// Insert before `index` (negative counts from the end). `index == len`
    /// appends.
    pub fn insert(&mut self, index: isize, value: impl Into<Value>) -> Result<Plan> {
        let n = self.len();
        let idx = resolve_index("insert", index, n, true)?;
        if idx == n {
            return Ok(self.append(value));
        }
        let value = value.into();
        let rise = self.config.element.cell.height + self.config.entry_buff;
        let slot = self.slot_center_for(idx, n);
        let mut element = Element::new(
            value.clone(),
            Some(Label::Index(idx)),
            &self.config.element,
            slot + Vec2::UP * rise,
        );
        debug!("array: insert {value} at {idx}");

        let mut plan = Plan::together(element.create_actions(), Some(self.config.phase_time));

        let pitch = self.config.pitch();
        let mut moves = element.shift(Vec2::DOWN * rise);
        for (j, e) in self.elements.iter_mut().enumerate().skip(idx) {
            moves.extend(e.shift_and_reindex(Vec2::RIGHT * pitch, j + 1));
        }
        plan.append(Plan::together(moves, Some(self.config.move_time)));

        self.values.insert(idx, value);
        self.elements.insert(idx, element);
        plan.append(self.relayout());
        self.debug_check();
        Ok(plan)
    }

    /// Remove the element at `index` (negative counts from the end): it lifts
    /// out, the tail closes the gap, then the row recenters.
    pub fn remove(&mut self, index: isize) -> Result<Plan> {
        let n = self.len();
        let idx = resolve_index("remove", index, n, false)?;
        debug!("array: remove {} at {idx}", self.values[idx]);

        let mut removed = self.elements.remove(idx);
        self.values.remove(idx);

        let mut plan = Plan::together(
            removed.shift(Vec2::UP * self.config.lift),
            Some(self.config.phase_time),
        );
        let pitch = self.config.pitch();
        let mut moves = removed.uncreate_actions();
        for (j, e) in self.elements.iter_mut().enumerate().skip(idx) {
            moves.extend(e.shift_and_reindex(Vec2::LEFT * pitch, j));
        }
        plan.append(Plan::together(moves, Some(self.config.move_time)));
        plan.append(self.relayout());
        self.debug_check();
        Ok(plan)
    }

    /// `remove(-1)`.
    pub fn pop(&mut self) -> Result<Plan> {
        if self.is_empty() {
            return Err(StructureError::Empty { what: "pop" });
        }
        self.remove(-1)
    }

    fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Element, &mut Element) {
        debug_assert_ne!(i, j);
        if i < j {
            let (head, tail) = self.elements.split_at_mut(j);
            (&mut head[i], &mut tail[0])
        } else {
            let (head, tail) = self.elements.split_at_mut(i);
            (&mut tail[0], &mut head[j])
        }
    }

    /// Exchange two values. Only the content texts travel (up, across,
    /// down); boxes and labels stay put. Equal indices are a no-op.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<Plan> {
        let n = self.len();
        check_index("swap", i, n)?;
        check_index("swap", j, n)?;
        if i == j {
            return Ok(Plan::new());
        }
        debug!("array: swap {i} <-> {j}");
        self.values.swap(i, j);

        let phase = self.config.phase_time;
        let lift = Vec2::UP * self.config.lift;
        let (a, b) = self.pair_mut(i, j);
        let across = b.content().center - a.content().center;

        let mut plan = Plan::together([a.shift_content(lift), b.shift_content(lift)], Some(phase));
        plan.append(Plan::together(
            [a.shift_content(across), b.shift_content(-across)],
            Some(phase),
        ));
        plan.append(Plan::together(
            [a.shift_content(-lift), b.shift_content(-lift)],
            Some(phase),
        ));
        Element::exchange_content(a, b);
        self.debug_check();
        Ok(plan)
    }

    /// Rearrange so that `values[i] = old_values[permutation[i]]`: elements
    /// slide to their new slots together, then all labels update together.
    pub fn reorder(&mut self, permutation: &[usize]) -> Result<Plan> {
        let n = self.len();
        if permutation.len() != n {
            return Err(StructureError::InvalidPermutation {
                reason: format!("expected {n} indices, got {}", permutation.len()),
            });
        }
        let mut seen = vec![false; n];
        for &k in permutation {
            if k >= n {
                return Err(StructureError::InvalidPermutation {
                    reason: format!("index {k} out of range for length {n}"),
                });
            }
            if std::mem::replace(&mut seen[k], true) {
                return Err(StructureError::InvalidPermutation {
                    reason: format!("index {k} appears more than once"),
                });
            }
        }
        Ok(self.apply_permutation(permutation))
    }

    fn apply_permutation(&mut self, permutation: &[usize]) -> Plan {
        let n = self.len();
        debug!("array: reorder {permutation:?}");
        let time = Some(self.config.move_time);

        let mut moves = Vec::new();
        for (i, &k) in permutation.iter().enumerate() {
            let by = self.slot_center_for(i, n) - self.elements[k].anchor();
            moves.extend(self.elements[k].shift(by));
        }
        let relabels: Vec<Action> = permutation
            .iter()
            .enumerate()
            .filter_map(|(i, &k)| self.elements[k].set_index(i))
            .collect();

        let mut new_position = vec![0; n];
        for (i, &k) in permutation.iter().enumerate() {
            new_position[k] = i;
        }
        let mut tagged: Vec<(usize, Element)> = self
            .elements
            .drain(..)
            .enumerate()
            .map(|(k, e)| (new_position[k], e))
            .collect();
        tagged.sort_by_key(|(pos, _)| *pos);
        self.elements = tagged.into_iter().map(|(_, e)| e).collect();
        self.values = permutation.iter().map(|&k| self.values[k].clone()).collect();
        self.debug_check();

        Plan::together(moves, time).followed_by(Plan::together(relabels, time))
    }

    /// Stable permutation that orders the values by `key`. Equal keys keep
    /// their original order, also when `reverse` is set.
    pub fn sorted_permutation<K, F>(&self, key: F, reverse: bool) -> Result<Vec<usize>>
    where
        K: PartialOrd,
        F: Fn(&Value) -> K,
    {
        let keys: Vec<K> = self.values.iter().map(&key).collect();
        // A key that cannot be ordered against itself (NaN) or against the
        // first key breaks the total order `sort_by` relies on.
        if let Some(first) = keys.first() {
            let bad = keys.iter().position(|k| {
                k.partial_cmp(k).is_none() || k.partial_cmp(first).is_none()
            });
            if let Some(b) = bad {
                let a = if keys[b].partial_cmp(&keys[b]).is_none() { b } else { 0 };
                return Err(StructureError::Incomparable {
                    left: self.values[a].to_string(),
                    right: self.values[b].to_string(),
                });
            }
        }
        let mut permutation: Vec<usize> = (0..keys.len()).collect();
        permutation.sort_by(|&a, &b| {
            let o = keys[a].partial_cmp(&keys[b]).unwrap_or(Ordering::Equal);
            if reverse {
                o.reverse()
            } else {
                o
            }
        });
        Ok(permutation)
    }

    pub fn sort(&mut self, reverse: bool) -> Result<Plan> {
        self.sort_by_key(Value::clone, reverse)
    }

    pub fn sort_by_key<K, F>(&mut self, key: F, reverse: bool) -> Result<Plan>
    where
        K: PartialOrd,
        F: Fn(&Value) -> K,
    {
        let permutation = self.sorted_permutation(key, reverse)?;
        Ok(self.apply_permutation(&permutation))
    }

    pub fn shuffle(&mut self) -> Plan {
        self.shuffle_with(&mut rand::thread_rng())
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Plan {
        let mut permutation: Vec<usize> = (0..self.len()).collect();
        permutation.shuffle(rng);
        self.apply_permutation(&permutation)
    }

    pub fn replace_value(&mut self, index: usize, value: impl Into<Value>) -> Result<Plan> {
        let i = check_index("replace_value", index, self.len())?;
        let value = value.into();
        self.values[i] = value.clone();
        Ok(self.elements[i].replace_value(value))
    }

    pub fn highlight(&mut self, index: usize, h: &Highlight) -> Result<Plan> {
        let i = check_index("highlight", index, self.len())?;
        Ok(self.elements[i].highlight(h))
    }

    /// One simultaneous pulse over several indices. Repeated indices count once.
    pub fn highlight_indices(&mut self, indices: &[usize], h: &Highlight) -> Result<Plan> {
        let n = self.len();
        for &i in indices {
            check_index("highlight_indices", i, n)?;
        }
        let picked = self
            .elements
            .iter_mut()
            .enumerate()
            .filter(|(i, _)| indices.contains(i))
            .map(|(_, e)| e);
        Ok(Element::highlight_many(picked, h))
    }

    pub fn revert(&mut self, index: usize) -> Result<Plan> {
        let i = check_index("revert", index, self.len())?;
        Ok(self.elements[i].revert())
    }

    /// Revert every emphasized element at once.
    pub fn revert_all(&mut self) -> Plan {
        Element::revert_many(self.elements.iter_mut())
    }

    /// Compare two slots with [`Element::compare_with`]. A slot compared with
    /// itself yields an empty plan.
    pub fn compare(&mut self, i: usize, j: usize, style: &CompareStyle) -> Result<Plan> {
        let n = self.len();
        check_index("compare", i, n)?;
        check_index("compare", j, n)?;
        if i == j {
            return Ok(Plan::new());
        }
        let (a, b) = self.pair_mut(i, j);
        a.compare_with(b, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(a: &Array) -> Vec<i64> {
        a.values()
            .iter()
            .map(|v| match v {
                Value::Int(i) => *i,
                other => panic!("not an int: {other:?}"),
            })
            .collect()
    }

    #[test]
    fn empty_array_is_rejected() {
        let err = Array::new(Vec::<i64>::new(), ArrayConfig::default()).unwrap_err();
        assert_eq!(err, StructureError::Empty { what: "array" });
    }

    #[test]
    fn negative_indices_normalize() {
        assert_eq!(resolve_index("insert", -1, 3, true), Ok(2));
        assert_eq!(resolve_index("insert", 3, 3, true), Ok(3));
        assert_eq!(resolve_index("remove", -3, 3, false), Ok(0));
        assert!(resolve_index("remove", 3, 3, false).is_err());
        assert!(resolve_index("insert", -4, 3, true).is_err());
        assert!(resolve_index("insert", 4, 3, true).is_err());
    }

    #[test]
    fn slots_are_centered() {
        let a = Array::new([1, 2, 3], ArrayConfig::default()).unwrap();
        assert_eq!(a.slot_center(1), Vec2::ORIGIN);
        assert!((a.slot_center(0).x + 1.0).abs() < 1e-6);
        for (i, e) in a.elements().iter().enumerate() {
            assert!(e.anchor().approx_eq(a.slot_center(i), 1e-5));
        }
    }

    #[test]
    fn wide_initial_row_is_scaled() {
        let cfg = ArrayConfig::default().with_max_width(5.0);
        let a = Array::new(0..10, cfg).unwrap();
        assert!((a.config().total_width(10) - 5.0).abs() < 1e-4);
        assert!((a.elements()[0].cell().width - 0.5).abs() < 1e-5);
    }

    #[test]
    fn pop_on_last_element_then_append() {
        let mut a = Array::new([7], ArrayConfig::default()).unwrap();
        a.pop().unwrap();
        assert!(a.is_empty());
        assert_eq!(a.pop().unwrap_err(), StructureError::Empty { what: "pop" });
        a.append(3);
        assert_eq!(ints(&a), vec![3]);
        assert!(a.elements()[0].anchor().approx_eq(a.center(), 1e-5));
    }

    #[test]
    fn sort_with_incomparable_values_fails_cleanly() {
        let values = [Value::from(2), Value::from("b"), Value::from(1)];
        let mut a = Array::new(values, ArrayConfig::default()).unwrap();
        let before = a.values().to_vec();
        assert!(matches!(a.sort(false), Err(StructureError::Incomparable { .. })));
        assert_eq!(a.values(), &before[..]);
    }

    #[test]
    fn long_mixed_rows_refuse_to_sort() {
        let mixed: Vec<Value> = (0..64)
            .map(|i| {
                if i % 3 == 0 {
                    Value::text(format!("t{i}"))
                } else {
                    Value::from(64 - i)
                }
            })
            .collect();
        let mut a = Array::new(mixed.clone(), ArrayConfig::default()).unwrap();
        assert!(matches!(a.sort(false), Err(StructureError::Incomparable { .. })));
        assert_eq!(a.values(), &mixed[..]);

        let floats: Vec<Value> = (0..100)
            .map(|i| Value::Float(if i % 7 == 3 { f64::NAN } else { (100 - i) as f64 }))
            .collect();
        let mut a = Array::new(floats, ArrayConfig::default()).unwrap();
        match a.sort(true) {
            Err(StructureError::Incomparable { left, right }) => {
                assert_eq!(left, "NaN");
                assert_eq!(right, "NaN");
            }
            other => panic!("expected Incomparable, got {other:?}"),
        }
    }

    #[test]
    fn long_numeric_rows_sort_stably() {
        let mut a = Array::new((0..80).map(|i| (i * 37) % 11), ArrayConfig::default()).unwrap();
        a.sort(false).unwrap();
        assert!(a.values().windows(2).all(|w| w[0] <= w[1]));
        a.sort(true).unwrap();
        assert!(a.values().windows(2).all(|w| w[0] >= w[1]));
    }
}
