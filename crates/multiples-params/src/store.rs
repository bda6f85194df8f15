//! Parameter store
//!
//! [`ParamState`] is an immutable snapshot of the swept parameters and their
//! range configuration. Every transition builds a new snapshot; the
//! [`ParamStore`] publishes the current one behind an [`Arc`] so readers
//! (the sweep generator, a preview) always see a consistent pair of
//! parameters and ranges, never one mid-update.

use crate::error::ParamError;
use crate::param::{NumberType, ParamId, Parameter};
use crate::range::{RangeConfig, RangeMap, DEFAULT_SAMPLE_COUNT};
use crate::tracker::remap;
use multiples_text::{Change, ChangeSet, TextSpan};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Why a snapshot was published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateKind {
    /// Spans or values moved because the text was edited
    ///
    /// Consumers should not re-render derived previews for this kind.
    #[serde(rename = "position-update")]
    Position,
    /// The parameter set or its configuration changed on purpose
    #[serde(rename = "params-update")]
    Params,
}

impl UpdateKind {
    /// Wire tag of the update
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Position => "position-update",
            Self::Params => "params-update",
        }
    }
}

/// Outcome of a toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    /// The literal is now swept
    Added(ParamId),
    /// The literal is no longer swept
    Removed(ParamId),
}

impl Toggle {
    /// Id of the toggled parameter
    #[inline]
    #[must_use]
    pub fn id(&self) -> ParamId {
        match self {
            Self::Added(id) | Self::Removed(id) => *id,
        }
    }
}

/// Snapshot of swept parameters and their ranges
///
/// # Invariants
/// - Parameters are kept in the order they were marked
/// - No two parameter spans overlap
/// - Every parameter has exactly one entry in `ranges`, and nothing else does
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamState {
    params: Vec<Parameter>,
    ranges: RangeMap,
}

impl ParamState {
    /// Empty snapshot
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from restored parts
    ///
    /// Overlapping parameters are skipped (first one wins), ranges of unknown
    /// ids are discarded and missing ranges are seeded with defaults.
    #[must_use]
    pub fn from_parts(params: Vec<Parameter>, mut ranges: RangeMap, default_count: usize) -> Self {
        let mut kept: Vec<Parameter> = Vec::with_capacity(params.len());
        for param in params {
            if let Some(existing) = kept.iter().find(|p| p.span().overlaps(&param.span())) {
                tracing::warn!(
                    existing = %existing.span(),
                    skipped = %param.span(),
                    "skipping overlapping parameter"
                );
                continue;
            }
            kept.push(param);
        }

        let mut seeded = RangeMap::with_capacity(kept.len());
        for param in &kept {
            let range = ranges
                .shift_remove(&param.id())
                .unwrap_or_else(|| RangeConfig::default_for(param.value(), default_count));
            seeded.insert(param.id(), range);
        }

        Self {
            params: kept,
            ranges: seeded,
        }
    }

    /// Swept parameters in marking order
    #[inline]
    #[must_use]
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Range configuration by parameter id
    #[inline]
    #[must_use]
    pub fn ranges(&self) -> &RangeMap {
        &self.ranges
    }

    /// Number of swept parameters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if nothing is swept
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameter by id
    #[must_use]
    pub fn get(&self, id: ParamId) -> Option<&Parameter> {
        self.params.iter().find(|p| p.id() == id)
    }

    /// Parameter with exactly this span
    #[must_use]
    pub fn find_by_span(&self, span: TextSpan) -> Option<&Parameter> {
        self.params.iter().find(|p| p.span() == span)
    }

    /// Range configuration for a parameter
    #[inline]
    #[must_use]
    pub fn range_for(&self, id: ParamId) -> Option<&RangeConfig> {
        self.ranges.get(&id)
    }

    /// Snapshot after an edit batch; also returns the dropped ids
    #[must_use]
    pub fn remapped(&self, changes: &ChangeSet, doc_after: &str) -> (Self, Vec<ParamId>) {
        let outcome = remap(&self.params, changes, doc_after);
        let mut ranges = self.ranges.clone();
        for id in &outcome.dropped {
            ranges.shift_remove(id);
        }
        (
            Self {
                params: outcome.params,
                ranges,
            },
            outcome.dropped,
        )
    }

    /// Snapshot with `param` appended and its range seeded
    ///
    /// # Errors
    /// Returns error if `param` overlaps a tracked parameter
    pub fn with_added(&self, param: Parameter, default_count: usize) -> Result<Self, ParamError> {
        if let Some(existing) = self.params.iter().find(|p| p.span().overlaps(&param.span())) {
            return Err(ParamError::Overlapping {
                existing: existing.span(),
                requested: param.span(),
            });
        }

        let mut next = self.clone();
        next.ranges.insert(
            param.id(),
            RangeConfig::default_for(param.value(), default_count),
        );
        next.params.push(param);
        Ok(next)
    }

    /// Snapshot with a parameter and its range removed
    ///
    /// # Errors
    /// Returns error if `id` is not tracked
    pub fn without(&self, id: ParamId) -> Result<Self, ParamError> {
        let mut next = self.clone();
        let index = next
            .params
            .iter()
            .position(|p| p.id() == id)
            .ok_or(ParamError::UnknownParam(id))?;
        next.params.remove(index);
        next.ranges.shift_remove(&id);
        Ok(next)
    }

    /// Mark or unmark the literal at `span` of `doc`
    ///
    /// A span identical to a tracked one unmarks it; anything else must be a
    /// standalone literal not overlapping a tracked parameter.
    ///
    /// # Errors
    /// Returns error if the span is not a literal or partially overlaps a
    /// tracked parameter
    pub fn with_toggled(
        &self,
        doc: &str,
        span: TextSpan,
        default_count: usize,
    ) -> Result<(Self, Toggle), ParamError> {
        if let Some(existing) = self.find_by_span(span) {
            let id = existing.id();
            return Ok((self.without(id)?, Toggle::Removed(id)));
        }

        let param = Parameter::locate(doc, span)?;
        let id = param.id();
        Ok((self.with_added(param, default_count)?, Toggle::Added(id)))
    }

    /// Snapshot with a parameter's range replaced
    ///
    /// # Errors
    /// Returns error if `id` is not tracked
    pub fn with_range(&self, id: ParamId, range: RangeConfig) -> Result<Self, ParamError> {
        let mut next = self.clone();
        let slot = next.ranges.get_mut(&id).ok_or(ParamError::UnknownParam(id))?;
        *slot = range;
        Ok(next)
    }

    /// Snapshot with a parameter's sample type replaced
    ///
    /// # Errors
    /// Returns error if `id` is not tracked
    pub fn with_type(&self, id: ParamId, number_type: NumberType) -> Result<Self, ParamError> {
        let range = self
            .range_for(id)
            .ok_or(ParamError::UnknownParam(id))?
            .clone()
            .with_type(number_type);
        self.with_range(id, range)
    }

    /// Snapshot with a parameter's recorded value replaced
    ///
    /// The span is adjusted to the new value's length; the caller is expected
    /// to write the same text into the document.
    ///
    /// # Errors
    /// Returns error if `id` is not tracked or `value` is not a literal
    pub fn with_value(&self, id: ParamId, value: &str) -> Result<Self, ParamError> {
        let mut next = self.clone();
        let index = next
            .params
            .iter()
            .position(|p| p.id() == id)
            .ok_or(ParamError::UnknownParam(id))?;

        let old = next.params[index].span();
        if !multiples_text::is_standalone_number(value) {
            return Err(ParamError::NotALiteral {
                span: old,
                found: value.to_string(),
            });
        }

        let grown = value.len() as isize - old.len() as isize;
        for param in &mut next.params {
            if param.id() == id {
                *param = param.relocated(TextSpan::new(old.from, old.from + value.len()), value);
            } else if param.from() >= old.to {
                let shifted = TextSpan::new(
                    param.from().saturating_add_signed(grown),
                    param.to().saturating_add_signed(grown),
                );
                *param = param.relocated(shifted, param.value());
            }
        }
        Ok(next)
    }

    /// Substitutions writing `values` at the current spans
    ///
    /// `values[i]` belongs to the `i`-th parameter.
    ///
    /// # Errors
    /// Returns error if the value count differs from the parameter count
    pub fn substitutions<S: AsRef<str>>(&self, values: &[S]) -> Result<Vec<Change>, ParamError> {
        if values.len() != self.params.len() {
            return Err(ParamError::ValueCountMismatch {
                expected: self.params.len(),
                actual: values.len(),
            });
        }
        Ok(self
            .params
            .iter()
            .zip(values)
            .map(|(param, value)| Change::replace(param.span(), value.as_ref()))
            .collect())
    }
}

/// Published snapshot together with the reason it was published
#[derive(Debug, Clone, PartialEq)]
pub struct ParamsUpdate {
    /// Update kind
    pub kind: UpdateKind,
    /// Snapshot now current
    pub state: Arc<ParamState>,
    /// Parameters the transition removed
    pub dropped: Vec<ParamId>,
}

/// Owner of the current parameter snapshot
///
/// Transitions are computed on a snapshot and swapped in with
/// [`commit`](Self::commit), so a failed transition leaves the store as it
/// was.
#[derive(Debug, Clone)]
pub struct ParamStore {
    current: Arc<ParamState>,
    default_count: usize,
    revision: u64,
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_COUNT)
    }
}

impl ParamStore {
    /// Empty store seeding new ranges with `default_count` samples
    #[must_use]
    pub fn new(default_count: usize) -> Self {
        Self {
            current: Arc::new(ParamState::new()),
            default_count: default_count.max(1),
            revision: 0,
        }
    }

    /// Sample count used when seeding ranges
    #[inline]
    #[must_use]
    pub fn default_count(&self) -> usize {
        self.default_count
    }

    /// Number of commits so far
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current snapshot
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Arc<ParamState> {
        Arc::clone(&self.current)
    }

    /// Publish `state`
    pub fn commit(&mut self, state: ParamState, kind: UpdateKind) -> ParamsUpdate {
        self.commit_with_dropped(state, kind, Vec::new())
    }

    fn commit_with_dropped(
        &mut self,
        state: ParamState,
        kind: UpdateKind,
        dropped: Vec<ParamId>,
    ) -> ParamsUpdate {
        self.current = Arc::new(state);
        self.revision += 1;
        tracing::debug!(
            kind = kind.as_str(),
            revision = self.revision,
            params = self.current.len(),
            "committed parameter snapshot"
        );
        ParamsUpdate {
            kind,
            state: self.snapshot(),
            dropped,
        }
    }

    /// Remap through an edit batch and publish a [`UpdateKind::Position`] update
    pub fn apply_changes(&mut self, changes: &ChangeSet, doc_after: &str) -> ParamsUpdate {
        self.apply_changes_as(changes, doc_after, UpdateKind::Position)
    }

    /// Remap through an edit batch and publish it as `kind`
    ///
    /// Used when the edit itself is the intentional change, such as a value
    /// written by dragging a slider.
    pub fn apply_changes_as(
        &mut self,
        changes: &ChangeSet,
        doc_after: &str,
        kind: UpdateKind,
    ) -> ParamsUpdate {
        let (next, dropped) = self.current.remapped(changes, doc_after);
        self.commit_with_dropped(next, kind, dropped)
    }

    /// Mark or unmark the literal at `span`
    ///
    /// # Errors
    /// Returns error if the span is not a literal or overlaps a parameter
    pub fn toggle(&mut self, doc: &str, span: TextSpan) -> Result<(Toggle, ParamsUpdate), ParamError> {
        let (next, toggle) = self.current.with_toggled(doc, span, self.default_count)?;
        let dropped = match toggle {
            Toggle::Removed(id) => vec![id],
            Toggle::Added(_) => Vec::new(),
        };
        Ok((toggle, self.commit_with_dropped(next, UpdateKind::Params, dropped)))
    }

    /// Replace a parameter's range
    ///
    /// # Errors
    /// Returns error if `id` is not tracked
    pub fn set_range(&mut self, id: ParamId, range: RangeConfig) -> Result<ParamsUpdate, ParamError> {
        let next = self.current.with_range(id, range)?;
        Ok(self.commit(next, UpdateKind::Params))
    }

    /// Replace a parameter's sample type
    ///
    /// # Errors
    /// Returns error if `id` is not tracked
    pub fn set_type(&mut self, id: ParamId, number_type: NumberType) -> Result<ParamsUpdate, ParamError> {
        let next = self.current.with_type(id, number_type)?;
        Ok(self.commit(next, UpdateKind::Params))
    }

    /// Replace the whole snapshot (restoring a saved version)
    pub fn replace(&mut self, state: ParamState) -> ParamsUpdate {
        self.commit(state, UpdateKind::Params)
    }
}
