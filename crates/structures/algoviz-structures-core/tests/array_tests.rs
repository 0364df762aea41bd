use algoviz_api_core::{Action, ObjectId, Recorder};
use algoviz_structures::{
    Array, ArrayConfig, CompareStyle, Highlight, Playback, Plan, StructureError, Value,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn ints(a: &Array) -> Vec<i64> {
    a.values()
        .iter()
        .map(|v| match v {
            Value::Int(i) => *i,
            other => panic!("not an int: {other:?}"),
        })
        .collect()
}

fn expected_labels(n: usize) -> Vec<String> {
    (0..n).map(|i| i.to_string()).collect()
}

fn node_ids(a: &Array) -> Vec<ObjectId> {
    a.elements()
        .iter()
        .flat_map(|e| e.nodes().map(|n| n.id))
        .collect()
}

/// Array already on screen inside a recorder.
fn shown(values: &[i64], cfg: ArrayConfig) -> (Array, Recorder) {
    let array = Array::new(values.iter().copied(), cfg).unwrap();
    let mut rec = Recorder::new();
    rec.play(&array.create_plan()).unwrap();
    (array, rec)
}

fn play(rec: &mut Recorder, plan: Plan) {
    rec.play(&plan)
        .unwrap_or_else(|e| panic!("plan rejected: {e}\n{plan:#?}"));
}

fn assert_in_sync(a: &Array) {
    assert_eq!(a.values().len(), a.elements().len());
    assert_eq!(a.labels(), expected_labels(a.len()));
    for (i, (v, e)) in a.values().iter().zip(a.elements()).enumerate() {
        assert_eq!(e.value(), v, "value mismatch at {i}");
        assert_eq!(e.content().text_str(), Some(v.display_text().as_str()));
        assert!(
            e.anchor().approx_eq(a.slot_center(i), 1e-4),
            "element {i} off its slot"
        );
    }
}

#[test]
fn insert_then_remove_walkthrough() {
    let (mut a, mut rec) = shown(&[20, 35, 1, 8, 100, 2, 5], ArrayConfig::default());

    play(&mut rec, a.insert(2, 400).unwrap());
    assert_eq!(ints(&a), vec![20, 35, 400, 1, 8, 100, 2, 5]);
    assert_eq!(a.labels(), expected_labels(8));
    assert_in_sync(&a);

    play(&mut rec, a.remove(0).unwrap());
    assert_eq!(ints(&a), vec![35, 400, 1, 8, 100, 2, 5]);
    assert_eq!(a.labels(), expected_labels(7));
    assert_in_sync(&a);

    // Scene holds exactly the array's nodes.
    assert_eq!(rec.scene().len(), node_ids(&a).len());
    for id in node_ids(&a) {
        assert!(rec.scene().contains(id));
    }
}

#[test]
fn insert_then_remove_restores_values() {
    let base = [4, 8, 15, 16, 23, 42];
    for i in 0..=base.len() {
        let (mut a, mut rec) = shown(&base, ArrayConfig::default());
        play(&mut rec, a.insert(i as isize, 99).unwrap());
        assert_eq!(a.values()[i], Value::from(99));
        play(&mut rec, a.remove(i as isize).unwrap());
        assert_eq!(ints(&a), base.to_vec());
        assert_in_sync(&a);
    }
}

#[test]
fn negative_indices_count_from_the_end() {
    let (mut a, mut rec) = shown(&[1, 2, 3], ArrayConfig::default());
    play(&mut rec, a.insert(-1, 9).unwrap());
    assert_eq!(ints(&a), vec![1, 2, 9, 3]);
    play(&mut rec, a.remove(-4).unwrap());
    assert_eq!(ints(&a), vec![2, 9, 3]);
    play(&mut rec, a.pop().unwrap());
    assert_eq!(ints(&a), vec![2, 9]);
    assert_in_sync(&a);
}

#[test]
fn insert_at_len_appends() {
    let (mut a, mut rec) = shown(&[1, 2], ArrayConfig::default());
    let plan = a.insert(2, 3).unwrap();
    // create, slide, recenter
    assert_eq!(plan.len(), 3);
    play(&mut rec, plan);
    assert_eq!(ints(&a), vec![1, 2, 3]);
    assert_in_sync(&a);
}

#[test]
fn insert_plan_shifts_and_relabels_in_one_step() {
    let (mut a, _rec) = shown(&[1, 2, 3], ArrayConfig::default());
    let plan = a.insert(1, 7).unwrap();
    assert_eq!(plan.len(), 3);
    let middle = Plan::of(plan.steps[1].clone());
    let combined = middle.actions();
    // New element (3 shifts) + two tail elements (cell/content shift, label morph).
    assert_eq!(combined.len(), 3 + 2 * 3);
    let transforms = combined
        .iter()
        .filter(|a| matches!(a, Action::Transform { .. }))
        .count();
    assert_eq!(transforms, 2);
    approx(plan.steps[1].duration(1.0), a.config().move_time, 1e-6);
}

#[test]
fn rejected_indices_leave_everything_untouched() {
    let (mut a, _rec) = shown(&[5, 6, 7], ArrayConfig::default());
    let values = a.values().to_vec();
    let labels = a.labels();
    let ids = node_ids(&a);

    assert_eq!(
        a.insert(4, 1).unwrap_err(),
        StructureError::IndexOutOfRange {
            op: "insert",
            index: 4,
            len: 3
        }
    );
    assert!(a.insert(-4, 1).is_err());
    assert!(a.remove(3).is_err());
    assert!(a.remove(-4).is_err());
    assert!(a.swap(0, 3).is_err());
    assert!(a.replace_value(3, 1).is_err());
    assert!(a.highlight_indices(&[0, 5], &Highlight::default()).is_err());
    assert!(matches!(
        a.reorder(&[0, 0, 1]),
        Err(StructureError::InvalidPermutation { .. })
    ));
    assert!(a.reorder(&[0, 1]).is_err());

    assert_eq!(a.values(), &values[..]);
    assert_eq!(a.labels(), labels);
    assert_eq!(node_ids(&a), ids);
}

#[test]
fn swap_moves_contents_only_and_twice_is_identity() {
    let (mut a, mut rec) = shown(&[10, 20, 30, 40], ArrayConfig::default());
    let cells: Vec<ObjectId> = a.elements().iter().map(|e| e.cell().id).collect();
    let content_1 = a.elements()[1].content().id;

    let plan = a.swap(1, 3).unwrap();
    assert_eq!(plan.len(), 3);
    for action in plan.actions() {
        assert!(matches!(action, Action::Shift { .. }));
    }
    play(&mut rec, plan);
    assert_eq!(ints(&a), vec![10, 40, 30, 20]);
    // The content object that showed 20 now belongs to slot 3.
    assert_eq!(a.elements()[3].content().id, content_1);
    assert_eq!(
        a.elements().iter().map(|e| e.cell().id).collect::<Vec<_>>(),
        cells
    );
    assert_in_sync(&a);

    play(&mut rec, a.swap(1, 3).unwrap());
    assert_eq!(ints(&a), vec![10, 20, 30, 40]);
    assert_in_sync(&a);

    assert!(a.swap(2, 2).unwrap().is_empty());
}

#[test]
fn identity_reorder_is_a_no_op() {
    let (mut a, _rec) = shown(&[3, 1, 2], ArrayConfig::default());
    let ids = node_ids(&a);
    let plan = a.reorder(&[0, 1, 2]).unwrap();
    assert!(plan.is_empty());
    assert_eq!(ints(&a), vec![3, 1, 2]);
    assert_eq!(node_ids(&a), ids);
}

#[test]
fn reorder_follows_permutation() {
    let (mut a, mut rec) = shown(&[3, 1, 2], ArrayConfig::default());
    let first_cell = a.elements()[0].cell().id;
    play(&mut rec, a.reorder(&[1, 2, 0]).unwrap());
    assert_eq!(ints(&a), vec![1, 2, 3]);
    assert_eq!(a.elements()[2].cell().id, first_cell);
    assert_in_sync(&a);
}

#[test]
fn sort_is_stable_in_both_directions() {
    let a = Array::new(
        [Value::from(3), Value::from(1), Value::from(3.0), Value::from(2)],
        ArrayConfig::default(),
    )
    .unwrap();
    assert_eq!(a.sorted_permutation(Value::clone, false).unwrap(), vec![1, 3, 0, 2]);
    assert_eq!(a.sorted_permutation(Value::clone, true).unwrap(), vec![0, 2, 3, 1]);

    let sorted = Array::new([1, 2, 2, 5], ArrayConfig::default()).unwrap();
    assert_eq!(
        sorted.sorted_permutation(Value::clone, false).unwrap(),
        vec![0, 1, 2, 3]
    );
}

#[test]
fn sort_and_keyed_sort_replay() {
    let (mut a, mut rec) = shown(&[5, -7, 3, 0], ArrayConfig::default());
    play(&mut rec, a.sort(false).unwrap());
    assert_eq!(ints(&a), vec![-7, 0, 3, 5]);
    assert_in_sync(&a);

    play(
        &mut rec,
        a.sort_by_key(|v| v.as_f64().map(f64::abs), false).unwrap(),
    );
    assert_eq!(ints(&a), vec![0, 3, 5, -7]);
    assert_in_sync(&a);

    play(&mut rec, a.sort(true).unwrap());
    assert_eq!(ints(&a), vec![5, 3, 0, -7]);
    assert_in_sync(&a);
}

#[test]
fn seeded_shuffle_is_reproducible() {
    let values = [1, 2, 3, 4, 5, 6, 7, 8];
    let (mut a, mut rec) = shown(&values, ArrayConfig::default());
    let (mut b, _) = shown(&values, ArrayConfig::default());

    play(&mut rec, a.shuffle_with(&mut StdRng::seed_from_u64(7)));
    b.shuffle_with(&mut StdRng::seed_from_u64(7));
    assert_eq!(ints(&a), ints(&b));

    let mut sorted = ints(&a);
    sorted.sort();
    assert_eq!(sorted, values.to_vec());
    assert_in_sync(&a);
}

#[test]
fn growth_rescales_and_new_cells_match() {
    let cfg = ArrayConfig::default().with_max_width(4.0);
    let (mut a, mut rec) = shown(&[1, 2, 3], cfg);
    for v in 4..=8 {
        play(&mut rec, a.append(v));
    }
    play(&mut rec, a.insert(0, 0).unwrap());
    approx(a.config().total_width(a.len()), 4.0, 1e-3);
    let w = a.elements()[0].cell().width;
    for e in a.elements() {
        approx(e.cell().width, w, 1e-4);
        approx(e.cell().width, a.config().element.cell.width, 1e-4);
    }
    assert!(w < 1.0);
    assert_in_sync(&a);
}

#[test]
fn highlights_replace_and_compare_replay() {
    let (mut a, mut rec) = shown(&[4, 9, 4], ArrayConfig::default());

    play(&mut rec, a.highlight(1, &Highlight::default()).unwrap());
    play(
        &mut rec,
        a.highlight_indices(&[0, 2, 2], &Highlight::default().with_restore(false))
            .unwrap(),
    );
    assert!(a.elements()[0].is_emphasized());
    assert!(!a.elements()[1].is_emphasized());

    // Layout stays tied to the slots while emphasized.
    play(&mut rec, a.swap(0, 1).unwrap());
    play(&mut rec, a.revert_all());
    assert!(a.elements().iter().all(|e| !e.is_emphasized()));
    assert_in_sync(&a);

    play(&mut rec, a.replace_value(2, f64::INFINITY).unwrap());
    assert_eq!(a.elements()[2].content().text_str(), Some("∞"));
    play(&mut rec, a.compare(0, 1, &CompareStyle::default()).unwrap());
    assert!(a.compare(1, 1, &CompareStyle::default()).unwrap().is_empty());
}
