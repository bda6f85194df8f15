//! Multi-point text splicing
//!
//! [`splice`] applies a set of substitutions that all refer to the same base
//! text. They are applied right-to-left (descending `from`), so each
//! replacement only moves text that has already been handled and the
//! remaining offsets stay valid even when replacement lengths differ.

use crate::change::Change;
use crate::span::TextSpan;

/// Errors during splicing
///
/// All variants describe a caller contract violation. The splice is aborted
/// as a whole; no partially spliced text is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpliceError {
    /// Substitution reaches past the end of the text
    #[error("substitution {span} is out of bounds for text of length {len}")]
    OutOfBounds { span: TextSpan, len: usize },

    /// Substitution boundary splits a UTF-8 character
    #[error("substitution {span} does not start and end on character boundaries")]
    NotCharBoundary { span: TextSpan },

    /// Two substitutions overlap or start at the same offset
    #[error("substitutions {first} and {second} overlap")]
    Overlapping { first: TextSpan, second: TextSpan },
}

/// Apply non-overlapping substitutions to `text`
///
/// The result is independent of the order of `substitutions`.
///
/// # Errors
/// Returns error if a substitution is out of bounds, splits a character,
/// overlaps another one, or shares its start offset with another one
///
/// # Example
/// ```
/// # use multiples_text::{splice, Change};
/// let out = splice("f(1, 22)", &[Change::new(2, 3, "100"), Change::new(5, 7, "3")]).unwrap();
/// assert_eq!(out, "f(100, 3)");
/// ```
pub fn splice(text: &str, substitutions: &[Change]) -> Result<String, SpliceError> {
    validate(text, substitutions)?;

    let mut order: Vec<&Change> = substitutions.iter().collect();
    order.sort_by(|a, b| b.from.cmp(&a.from));

    let mut out = text.to_string();
    for sub in order {
        out.replace_range(sub.from..sub.to, &sub.insert);
    }

    tracing::trace!(count = substitutions.len(), "spliced substitutions");
    Ok(out)
}

fn validate(text: &str, substitutions: &[Change]) -> Result<(), SpliceError> {
    for sub in substitutions {
        let span = sub.span();
        if span.to > text.len() {
            return Err(SpliceError::OutOfBounds {
                span,
                len: text.len(),
            });
        }
        if !text.is_char_boundary(span.from) || !text.is_char_boundary(span.to) {
            return Err(SpliceError::NotCharBoundary { span });
        }
    }

    let mut spans: Vec<TextSpan> = substitutions.iter().map(Change::span).collect();
    spans.sort();
    for pair in spans.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        if first.to > second.from || first.from == second.from {
            tracing::warn!(%first, %second, "aborting splice of overlapping substitutions");
            return Err(SpliceError::Overlapping { first, second });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn grows_and_shrinks_without_shifting_other_offsets() {
        let text = "line(10, 20, 300, 4000);";
        let subs = vec![
            Change::new(5, 7, "1"),
            Change::new(9, 11, "22222"),
            Change::new(13, 16, "3"),
            Change::new(18, 22, "44"),
        ];
        assert_eq!(splice(text, &subs).unwrap(), "line(1, 22222, 3, 44);");
    }

    #[test]
    fn empty_substitution_list_returns_text() {
        assert_eq!(splice("abc", &[]).unwrap(), "abc");
    }

    #[test]
    fn adjacent_substitutions_are_allowed() {
        let out = splice("1+2", &[Change::new(0, 1, "9"), Change::new(1, 2, "-")]).unwrap();
        assert_eq!(out, "9-2");
    }

    #[test]
    fn overlap_aborts_whole_call() {
        let err = splice("abcdef", &[Change::new(0, 3, "x"), Change::new(2, 4, "y")]).unwrap_err();
        assert_eq!(
            err,
            SpliceError::Overlapping {
                first: TextSpan::new(0, 3),
                second: TextSpan::new(2, 4),
            }
        );
    }

    #[test]
    fn shared_start_is_ambiguous() {
        let result = splice("abcdef", &[Change::insert(2, "x"), Change::new(2, 4, "y")]);
        assert!(matches!(result, Err(SpliceError::Overlapping { .. })));
    }

    #[test]
    fn rejects_out_of_bounds_and_char_splits() {
        assert!(matches!(
            splice("abc", &[Change::new(1, 9, "x")]),
            Err(SpliceError::OutOfBounds { .. })
        ));
        assert!(matches!(
            splice("é1", &[Change::new(1, 3, "x")]),
            Err(SpliceError::NotCharBoundary { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_result_independent_of_input_order(
            cuts in proptest::collection::btree_set(0usize..40, 2..10),
            inserts in proptest::collection::vec("[0-9]{0,4}", 10),
            seed in any::<u64>(),
        ) {
            let text: String = (0..40).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
            let cuts: Vec<usize> = cuts.into_iter().collect();
            let subs: Vec<Change> = cuts
                .chunks_exact(2)
                .zip(inserts.iter())
                .map(|(pair, ins)| Change::new(pair[0], pair[1], ins.clone()))
                .collect();

            let mut shuffled = subs.clone();
            let len = shuffled.len();
            if len > 1 {
                shuffled.rotate_left((seed as usize) % len);
                shuffled.reverse();
            }

            prop_assert_eq!(splice(&text, &subs).unwrap(), splice(&text, &shuffled).unwrap());
        }
    }
}
