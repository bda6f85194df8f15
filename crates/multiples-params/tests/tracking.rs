//! Parameter tracking across realistic editing sessions

use multiples_params::{remap, ParamStore, Parameter, UpdateKind};
use multiples_test_utils::{edit, mark_all, mark_at, P5_SKETCH};
use multiples_text::{Change, NumberLiterals};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn identifiers_with_digits_are_never_marked() {
    let values: Vec<String> = NumberLiterals::new(P5_SKETCH).map(|m| m.value).collect();
    assert_eq!(values, vec!["200", "200", "3", "240", "100", "100", "50", ".5"]);
}

#[test]
fn reformatting_the_sketch_keeps_every_parameter() {
    let mut doc = P5_SKETCH.to_string();
    let mut store = ParamStore::default();
    let ids = mark_all(&mut store, &doc);

    // Re-indent every line by two more spaces in one batch.
    let line_starts: Vec<usize> = std::iter::once(0)
        .chain(doc.match_indices('\n').map(|(i, _)| i + 1))
        .filter(|&i| i < doc.len())
        .collect();
    let changes = edit(
        &mut doc,
        line_starts.into_iter().map(|i| Change::insert(i, "  ")).collect(),
    );
    let update = store.apply_changes(&changes, &doc);

    assert_eq!(update.kind, UpdateKind::Position);
    assert!(update.dropped.is_empty());
    let state = update.state;
    for id in ids {
        let param = state.get(id).unwrap();
        assert_eq!(&doc[param.from()..param.to()], param.value());
    }
}

#[test]
fn deleting_a_line_drops_only_its_parameters() {
    let mut doc = P5_SKETCH.to_string();
    let mut store = ParamStore::default();
    let background = mark_at(&mut store, &doc, "240");
    let radius = mark_at(&mut store, &doc, "50");

    let start = doc.find("  background").unwrap();
    let end = start + doc[start..].find('\n').unwrap() + 1;
    let changes = edit(&mut doc, vec![Change::delete(start, end)]);
    let update = store.apply_changes(&changes, &doc);

    assert_eq!(update.dropped, vec![background]);
    assert_eq!(update.state.get(radius).unwrap().value(), "50");
    assert!(update.state.range_for(background).is_none());
}

#[test]
fn paste_over_a_literal_with_a_number_keeps_it() {
    let mut doc = P5_SKETCH.to_string();
    let mut store = ParamStore::default();
    let id = mark_at(&mut store, &doc, ".5");

    let at = doc.find(".5").unwrap();
    let changes = edit(&mut doc, vec![Change::new(at, at + 2, "1.25")]);
    let update = store.apply_changes(&changes, &doc);
    assert_eq!(update.state.get(id).unwrap().value(), "1.25");
}

fn sketch_with_marks() -> (String, Vec<Parameter>) {
    let doc = "a = 10; b = 20; c = 30;".to_string();
    let params = NumberLiterals::new(&doc)
        .map(|m| Parameter::from_match(&m))
        .collect();
    (doc, params)
}

proptest! {
    #[test]
    fn prop_deleted_literals_are_removed(victim in 0usize..3) {
        let (mut doc, params) = sketch_with_marks();
        let span = params[victim].span();
        let changes = edit(&mut doc, vec![Change::delete(span.from, span.to)]);

        let out = remap(&params, &changes, &doc);
        prop_assert_eq!(out.params.len(), 2);
        prop_assert_eq!(out.dropped, vec![params[victim].id()]);
    }

    #[test]
    fn prop_untouched_literals_shift_by_net_change(
        prefix in "[a-z ;=]{0,8}",
        suffix in "[a-z ;=]{0,8}",
    ) {
        let (mut doc, params) = sketch_with_marks();
        let len = doc.len();
        let changes = edit(&mut doc, vec![Change::insert(0, prefix.clone()), Change::insert(len, suffix)]);

        let out = remap(&params, &changes, &doc);
        prop_assert_eq!(out.params.len(), 3);
        for (before, after) in params.iter().zip(&out.params) {
            prop_assert_eq!(after.from(), before.from() + prefix.len());
            prop_assert_eq!(after.value(), before.value());
        }
    }
}
