//! Testing utilities for the Multiples workspace
//!
//! Shared sketches and helpers for marking literals.

#![allow(missing_docs)]

use multiples_params::{ParamId, ParamStore};
use multiples_text::{Change, ChangeSet, NumberLiterals};

/// One swept radius
pub const CIRCLE_SKETCH: &str = "circle(0,0,50);";

/// Exactly three literals, no digits elsewhere
pub const GRID_SKETCH: &str = "rect(10, 20, 30);";

/// A multi-line sketch with identifiers that contain digits
pub const P5_SKETCH: &str = "\
function setup() {
  createCanvas(200, 200);
}

function draw() {
  const vec2 = 3;
  background(240);
  circle(100, 100, 50);
  rotate(.5);
}
";

/// Mark the first literal whose text equals `value`
///
/// # Panics
/// Panics if `code` holds no such literal or toggling fails.
pub fn mark_at(store: &mut ParamStore, code: &str, value: &str) -> ParamId {
    let literal = NumberLiterals::new(code)
        .find(|m| m.value == value)
        .unwrap_or_else(|| panic!("no literal {value:?} in {code:?}"));
    let (toggle, _) = store.toggle(code, literal.span).unwrap();
    toggle.id()
}

/// Mark every literal of `code`, left to right
///
/// # Panics
/// Panics if toggling fails.
pub fn mark_all(store: &mut ParamStore, code: &str) -> Vec<ParamId> {
    NumberLiterals::new(code)
        .map(|literal| store.toggle(code, literal.span).unwrap().0.id())
        .collect()
}

/// Apply one edit batch to `doc` in place
///
/// # Panics
/// Panics if the batch does not fit `doc`.
pub fn edit(doc: &mut String, changes: Vec<Change>) -> ChangeSet {
    let set = ChangeSet::new(doc.len(), changes).unwrap();
    *doc = set.apply(doc).unwrap();
    set
}
