//! Position tracking through edit batches
//!
//! [`remap`] moves every parameter through a whole [`ChangeSet`] at once:
//! the start sticks before text inserted exactly at it, the end absorbs text
//! inserted exactly after it. A parameter is dropped when its mapped span
//! collapses, leaves the document, or no longer holds a standalone literal
//! (typed over, glued to a neighbouring character, or deleted).
//!
//! Whitespace typed exactly at either edge lands inside the mapped span; it
//! is trimmed off before the literal check so spacing out an expression does
//! not unmark its literals.

use crate::param::{ParamId, Parameter};
use multiples_text::{is_standalone_at, ChangeSet, TextSpan};

/// Result of remapping a parameter list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemapOutcome {
    /// Surviving parameters, in their original order
    pub params: Vec<Parameter>,
    /// Ids of parameters the batch invalidated
    pub dropped: Vec<ParamId>,
}

impl RemapOutcome {
    /// Check if the batch left every parameter untouched
    #[must_use]
    pub fn is_unchanged(&self, before: &[Parameter]) -> bool {
        self.dropped.is_empty() && self.params.as_slice() == before
    }
}

/// Remap `params` through `changes`, validating against `doc_after`
///
/// `doc_after` must be the document produced by applying `changes`.
#[must_use]
pub fn remap(params: &[Parameter], changes: &ChangeSet, doc_after: &str) -> RemapOutcome {
    debug_assert_eq!(changes.len_after(), doc_after.len());

    let mut outcome = RemapOutcome::default();
    for param in params {
        match relocate(param, changes, doc_after) {
            Some(moved) if !overlaps_kept(&outcome.params, moved.span()) => {
                outcome.params.push(moved);
            }
            _ => outcome.dropped.push(param.id()),
        }
    }

    tracing::debug!(
        kept = outcome.params.len(),
        dropped = outcome.dropped.len(),
        changes = changes.changes().len(),
        "remapped parameters"
    );
    outcome
}

fn relocate(param: &Parameter, changes: &ChangeSet, doc_after: &str) -> Option<Parameter> {
    let (from, to) = changes.map_span(param.span());
    if to > doc_after.len() || from >= to {
        tracing::trace!(id = %param.id(), from, to, "dropping collapsed parameter");
        return None;
    }

    let span = trim_whitespace(doc_after, TextSpan::new(from, to));
    if !is_standalone_at(doc_after, span) {
        tracing::trace!(id = %param.id(), %span, "dropping parameter that is no longer a literal");
        return None;
    }

    let value = span.slice(doc_after)?;
    Some(param.relocated(span, value))
}

fn trim_whitespace(doc: &str, span: TextSpan) -> TextSpan {
    let bytes = doc.as_bytes();
    let (mut from, mut to) = (span.from, span.to);
    while from < to && bytes[from].is_ascii_whitespace() {
        from += 1;
    }
    while to > from && bytes[to - 1].is_ascii_whitespace() {
        to -= 1;
    }
    TextSpan::new(from, to)
}

// Literals written back to back (`1.` then `.5`) can be pulled into each
// other by an insertion at their shared edge; the earlier parameter wins.
fn overlaps_kept(kept: &[Parameter], span: TextSpan) -> bool {
    kept.iter().any(|p| p.span().overlaps(&span))
}
