//! Edit batches and position mapping
//!
//! Provides [`ChangeSet`], a batch of non-overlapping edits that all refer
//! to the same pre-edit document, and [`ChangeSet::map_pos`] for translating
//! offsets through the whole batch in a single pass.
//!
//! Mapping a batch as a unit matters: folding its changes one at a time
//! would read later offsets in coordinates that earlier changes already
//! moved.

use crate::span::TextSpan;
use serde::{Deserialize, Serialize};

/// A single replacement of `[from, to)` by `insert`
///
/// Offsets refer to the document before the batch is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Change {
    /// Start of replaced range
    pub from: usize,
    /// End of replaced range (exclusive)
    pub to: usize,
    /// Replacement text
    #[serde(default)]
    pub insert: String,
}

impl Change {
    /// Create change, normalizing inverted bounds
    #[inline]
    #[must_use]
    pub fn new(from: usize, to: usize, insert: impl Into<String>) -> Self {
        let span = TextSpan::new(from, to);
        Self {
            from: span.from,
            to: span.to,
            insert: insert.into(),
        }
    }

    /// Pure insertion at `at`
    #[inline]
    #[must_use]
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::new(at, at, text)
    }

    /// Pure deletion of `[from, to)`
    #[inline]
    #[must_use]
    pub fn delete(from: usize, to: usize) -> Self {
        Self::new(from, to, String::new())
    }

    /// Replace `span` with `text`
    #[inline]
    #[must_use]
    pub fn replace(span: TextSpan, text: impl Into<String>) -> Self {
        Self::new(span.from, span.to, text)
    }

    /// Replaced range
    #[inline]
    #[must_use]
    pub fn span(&self) -> TextSpan {
        TextSpan::new(self.from, self.to)
    }

    /// Net length change in bytes
    #[inline]
    #[must_use]
    pub fn delta(&self) -> isize {
        self.insert.len() as isize - self.span().len() as isize
    }
}

/// Which side of an insertion a mapped position sticks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bias {
    /// Stay before text inserted exactly at the position
    Left,
    /// Move after text inserted exactly at the position
    Right,
}

/// Errors building or applying a change batch
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChangeError {
    /// Change reaches past the end of the document
    #[error("change {from}..{to} is out of bounds for document of length {len}")]
    OutOfBounds { from: usize, to: usize, len: usize },

    /// Two changes in the batch replace overlapping ranges
    #[error("changes {first} and {second} overlap")]
    Overlapping { first: TextSpan, second: TextSpan },

    /// Change boundary splits a UTF-8 character
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },

    /// Batch was built for a document of a different length
    #[error("change set expects document of length {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// A batch of edits applied together as one logical change
///
/// # Invariants
/// - Changes are sorted by `(from, to)`
/// - No two changes overlap (adjacent changes and several insertions at the
///   same offset are allowed; insertions keep their input order)
/// - Every change lies within `[0, len_before]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<Change>,
    len_before: usize,
}

impl ChangeSet {
    /// Build a batch for a document of `doc_len` bytes
    ///
    /// # Errors
    /// Returns error if a change is out of bounds or two changes overlap
    pub fn new(
        doc_len: usize,
        changes: impl IntoIterator<Item = Change>,
    ) -> Result<Self, ChangeError> {
        let mut changes: Vec<Change> = changes.into_iter().collect();
        // Stable sort keeps same-offset insertions in input order.
        changes.sort_by_key(|c| (c.from, c.to));

        for change in &changes {
            if change.to > doc_len {
                return Err(ChangeError::OutOfBounds {
                    from: change.from,
                    to: change.to,
                    len: doc_len,
                });
            }
        }

        for pair in changes.windows(2) {
            if pair[0].to > pair[1].from {
                return Err(ChangeError::Overlapping {
                    first: pair[0].span(),
                    second: pair[1].span(),
                });
            }
        }

        Ok(Self {
            changes,
            len_before: doc_len,
        })
    }

    /// Single change replacing the whole document
    #[inline]
    #[must_use]
    pub fn replace_all(doc_len: usize, text: impl Into<String>) -> Self {
        Self {
            changes: vec![Change::new(0, doc_len, text)],
            len_before: doc_len,
        }
    }

    /// Changes in application order
    #[inline]
    #[must_use]
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Check if batch contains no change
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Document length before the batch
    #[inline]
    #[must_use]
    pub fn len_before(&self) -> usize {
        self.len_before
    }

    /// Document length after the batch
    #[must_use]
    pub fn len_after(&self) -> usize {
        self.changes
            .iter()
            .fold(self.len_before, |len, c| len - c.span().len() + c.insert.len())
    }

    /// Map a pre-edit offset into the post-edit document
    ///
    /// A position inside a replaced range maps to the start of the
    /// replacement under [`Bias::Left`] and to its end under
    /// [`Bias::Right`]; a position at the start of a replaced range always
    /// maps to the start. A pure insertion exactly at the position is placed
    /// after it under `Left` and before it under `Right`.
    ///
    /// Positions past the end of the pre-edit document are shifted by the
    /// batch's net length change and are left for the caller to reject.
    #[must_use]
    pub fn map_pos(&self, pos: usize, bias: Bias) -> usize {
        let mut pos_a = 0;
        let mut pos_b = 0;

        for change in &self.changes {
            // Unchanged gap before this change.
            if pos < change.from {
                return pos_b + (pos - pos_a);
            }
            pos_b += change.from - pos_a;
            pos_a = change.from;

            let inserted = change.insert.len();
            let is_insertion = change.from == change.to;
            if change.to > pos || (change.to == pos && is_insertion && bias == Bias::Left) {
                return if pos == change.from || bias == Bias::Left {
                    pos_b
                } else {
                    pos_b + inserted
                };
            }
            pos_b += inserted;
            pos_a = change.to;
        }

        pos_b + pos.saturating_sub(pos_a)
    }

    /// Map a span, start with [`Bias::Left`] and end with [`Bias::Right`]
    ///
    /// Text typed right after the span is absorbed into it; text typed right
    /// before it is not.
    #[inline]
    #[must_use]
    pub fn map_span(&self, span: TextSpan) -> (usize, usize) {
        (
            self.map_pos(span.from, Bias::Left),
            self.map_pos(span.to, Bias::Right),
        )
    }

    /// Apply the batch to `doc`
    ///
    /// # Errors
    /// Returns error if `doc` has a different length than the batch was
    /// built for, or a change boundary splits a character
    pub fn apply(&self, doc: &str) -> Result<String, ChangeError> {
        if doc.len() != self.len_before {
            return Err(ChangeError::LengthMismatch {
                expected: self.len_before,
                actual: doc.len(),
            });
        }

        let mut out = String::with_capacity(self.len_after());
        let mut cursor = 0;
        for change in &self.changes {
            for offset in [change.from, change.to] {
                if !doc.is_char_boundary(offset) {
                    return Err(ChangeError::NotCharBoundary { offset });
                }
            }
            out.push_str(&doc[cursor..change.from]);
            out.push_str(&change.insert);
            cursor = change.to;
        }
        out.push_str(&doc[cursor..]);

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(len: usize, changes: Vec<Change>) -> ChangeSet {
        ChangeSet::new(len, changes).unwrap()
    }

    #[test]
    fn insertion_at_position_respects_bias() {
        let cs = set(10, vec![Change::insert(4, "abc")]);
        assert_eq!(cs.map_pos(4, Bias::Left), 4);
        assert_eq!(cs.map_pos(4, Bias::Right), 7);
        assert_eq!(cs.map_pos(3, Bias::Right), 3);
        assert_eq!(cs.map_pos(5, Bias::Left), 8);
    }

    #[test]
    fn positions_inside_replacement_snap_to_its_edges() {
        // Replace 2..6 with "xy".
        let cs = set(10, vec![Change::new(2, 6, "xy")]);
        assert_eq!(cs.map_pos(2, Bias::Right), 2);
        assert_eq!(cs.map_pos(4, Bias::Left), 2);
        assert_eq!(cs.map_pos(4, Bias::Right), 4);
        assert_eq!(cs.map_pos(6, Bias::Left), 4);
        assert_eq!(cs.map_pos(6, Bias::Right), 4);
        assert_eq!(cs.map_pos(9, Bias::Left), 7);
    }

    #[test]
    fn batch_is_mapped_in_original_coordinates() {
        // Two insertions described against the same base document.
        let cs = set(10, vec![Change::insert(8, "ZZ"), Change::insert(1, "AAA")]);
        assert_eq!(cs.map_pos(5, Bias::Left), 8);
        assert_eq!(cs.map_pos(9, Bias::Left), 14);
        assert_eq!(cs.len_after(), 15);
    }

    #[test]
    fn rejects_overlapping_and_out_of_bounds() {
        let overlap = ChangeSet::new(10, vec![Change::delete(1, 5), Change::delete(4, 6)]);
        assert!(matches!(overlap, Err(ChangeError::Overlapping { .. })));

        let oob = ChangeSet::new(3, vec![Change::delete(1, 5)]);
        assert!(matches!(oob, Err(ChangeError::OutOfBounds { .. })));

        // Insertion at the start of a deletion is adjacent, not overlapping.
        assert!(ChangeSet::new(10, vec![Change::delete(2, 5), Change::insert(2, "x")]).is_ok());
    }

    #[test]
    fn apply_rebuilds_document() {
        let doc = "circle(0,0,50);";
        let cs = set(doc.len(), vec![Change::new(11, 13, "100"), Change::insert(0, "  ")]);
        assert_eq!(cs.apply(doc).unwrap(), "  circle(0,0,100);");
        assert_eq!(cs.len_after(), doc.len() + 3);
    }

    #[test]
    fn apply_rejects_foreign_document_and_char_splits() {
        let cs = set(4, vec![Change::delete(0, 1)]);
        assert!(matches!(cs.apply("abc"), Err(ChangeError::LengthMismatch { .. })));

        let cs = set(2, vec![Change::delete(0, 1)]);
        assert!(matches!(cs.apply("é"), Err(ChangeError::NotCharBoundary { offset: 1 })));
    }

    #[test]
    fn replace_all_drops_everything_inside() {
        let cs = ChangeSet::replace_all(15, "new");
        let (from, to) = cs.map_span(TextSpan::new(11, 13));
        assert_eq!((from, to), (0, 3));
    }

    proptest! {
        #[test]
        fn prop_positions_before_every_change_are_fixed(
            pos in 0usize..20,
            gap in 0usize..10,
            insert in "[a-z]{0,5}",
            deleted in 0usize..5,
        ) {
            let from = pos + gap + 1;
            let cs = ChangeSet::new(from + deleted + 5, vec![Change::new(from, from + deleted, insert)])
                .unwrap();
            prop_assert_eq!(cs.map_pos(pos, Bias::Left), pos);
            prop_assert_eq!(cs.map_pos(pos, Bias::Right), pos);
        }

        #[test]
        fn prop_positions_after_every_change_shift_by_delta(
            from in 0usize..20,
            deleted in 0usize..5,
            insert in "[a-z]{0,5}",
            tail in 1usize..10,
        ) {
            let change = Change::new(from, from + deleted, insert);
            let delta = change.delta();
            let pos = from + deleted + tail;
            let cs = ChangeSet::new(pos + 1, vec![change]).unwrap();
            let expected = (pos as isize + delta) as usize;
            prop_assert_eq!(cs.map_pos(pos, Bias::Left), expected);
            prop_assert_eq!(cs.map_pos(pos, Bias::Right), expected);
        }
    }
}
