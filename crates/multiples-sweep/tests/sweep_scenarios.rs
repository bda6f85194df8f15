//! End-to-end sweep scenarios over tracked parameters

use multiples_params::{NumberType, ParamStore, RangeConfig};
use multiples_sweep::{
    apply_values, column_count, generate, GridLayout, SweepMode, SweepOptions, DEFAULT_COLUMNS,
};
use multiples_test_utils::{mark_all, mark_at, CIRCLE_SKETCH, GRID_SKETCH};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn circle_radius_sweep() {
    let mut store = ParamStore::default();
    mark_at(&mut store, CIRCLE_SKETCH, "50");
    let state = store.snapshot();

    let variants = generate(CIRCLE_SKETCH, state.params(), state.ranges(), &SweepOptions::default())
        .unwrap();
    // The seeded range carries the default count, which replaces the doubled run.
    let values: Vec<&str> = variants.iter().map(|v| v.values[0].as_str()).collect();
    assert_eq!(values, vec!["25.00", "50.00", "75.00", "100.00"]);

    let unseeded = generate(
        CIRCLE_SKETCH,
        state.params(),
        &Default::default(),
        &SweepOptions::default(),
    )
    .unwrap();
    let values: Vec<&str> = unseeded.iter().map(|v| v.values[0].as_str()).collect();
    assert_eq!(
        values,
        vec!["25.00", "35.71", "46.43", "57.14", "67.86", "78.57", "89.29", "100.00"]
    );
    assert!(variants.iter().all(|v| v.code.starts_with("circle(0,0,")));
}

#[test]
fn second_parameter_count_sets_columns() {
    let mut store = ParamStore::default();
    let ids = mark_all(&mut store, GRID_SKETCH);
    store
        .set_range(ids[1], RangeConfig::new("1", "5", "5", NumberType::Int))
        .unwrap();
    let state = store.snapshot();

    let columns = column_count(state.params(), state.ranges(), DEFAULT_COLUMNS);
    assert_eq!(columns, 5);

    let options = SweepOptions::default().with_count(columns);
    let variants = generate(GRID_SKETCH, state.params(), state.ranges(), &options).unwrap();
    // Parameter 0 keeps its seeded count of four rows.
    assert_eq!(variants.len(), 4 * 5);

    let rows: Vec<_> = GridLayout::new(columns).rows(&variants).collect();
    for row in &rows {
        let first = &row[0].values[0];
        assert!(row.iter().all(|v| &v.values[0] == first));
    }
}

#[test]
fn cyclic_and_cross_product_modes_differ() {
    let mut store = ParamStore::default();
    mark_all(&mut store, GRID_SKETCH);
    let state = store.snapshot();
    assert_eq!(state.len(), 3);

    let cyclic = SweepOptions::default().with_count(2);
    let product = cyclic.with_mode(SweepMode::CrossProduct);
    let a = generate(GRID_SKETCH, state.params(), state.ranges(), &cyclic).unwrap();
    let b = generate(GRID_SKETCH, state.params(), state.ranges(), &product).unwrap();
    assert_eq!(a.len(), 4 * 4);
    assert_eq!(b.len(), 4 * 4 * 4);
}

proptest! {
    #[test]
    fn spliced_values_read_back(values in proptest::collection::vec(-1000i32..1000, 3)) {
        let mut store = ParamStore::default();
        mark_all(&mut store, GRID_SKETCH);
        let state = store.snapshot();

        let text: Vec<String> = values.iter().map(ToString::to_string).collect();
        let code = apply_values(GRID_SKETCH, state.params(), &text).unwrap();
        let found: Vec<String> = multiples_text::NumberLiterals::new(&code)
            .map(|m| m.value)
            .collect();
        prop_assert_eq!(found, text);
    }

    #[test]
    fn every_variant_is_its_values_spliced_in(
        axes in proptest::collection::vec((-100i32..100, -100i32..100, 1usize..6, any::<bool>()), 3),
        cross in any::<bool>(),
    ) {
        let mut store = ParamStore::default();
        let ids = mark_all(&mut store, GRID_SKETCH);
        for (id, (start, end, count, int)) in ids.iter().zip(&axes) {
            let number_type = if *int { NumberType::Int } else { NumberType::Float };
            let range = RangeConfig::new(
                start.to_string(),
                end.to_string(),
                count.to_string(),
                number_type,
            );
            store.set_range(*id, range).unwrap();
        }
        let state = store.snapshot();

        let mode = if cross { SweepMode::CrossProduct } else { SweepMode::Cyclic };
        let options = SweepOptions::default().with_mode(mode);
        let variants = generate(GRID_SKETCH, state.params(), state.ranges(), &options).unwrap();
        prop_assert!(!variants.is_empty());
        for variant in &variants {
            let code = apply_values(GRID_SKETCH, state.params(), &variant.values).unwrap();
            prop_assert_eq!(&code, &variant.code);
            let found: Vec<String> = multiples_text::NumberLiterals::new(&code)
                .map(|m| m.value)
                .collect();
            prop_assert_eq!(&found, &variant.values);
        }
    }
}
