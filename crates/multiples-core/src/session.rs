//! Live sweep session
//!
//! [`SweepSession`] owns the sketch text, the parameter store and the sweep
//! cache. It is the surface an editor talks to: edit batches come in, parameter
//! snapshots go out to subscribed listeners after every commit, and the
//! preview asks for the variant grid.

use crate::config::SweepConfig;
use crate::error::SessionError;
use crate::events::{EditOrigin, Listeners, ParamsEvent, ParamsListener};
use crate::slider::{format_slider_value, LiteralHandle};
use crate::version::VersionRecord;
use multiples_params::{
    NumberType, ParamId, ParamState, ParamStore, ParamsUpdate, RangeConfig, Toggle, UpdateKind,
};
use multiples_sweep::{column_count, GridLayout, SweepCache, Variant};
use multiples_text::{find_number_at, is_standalone_at, Change, ChangeSet, TextSpan};
use std::sync::Arc;

/// Editing session over one sketch
#[derive(Debug)]
pub struct SweepSession {
    code: String,
    config: SweepConfig,
    store: ParamStore,
    cache: SweepCache,
    open: Option<LiteralHandle>,
    cell_size: u32,
    listeners: Listeners,
}

impl SweepSession {
    /// Session over `code` with the default configuration
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        let config = SweepConfig::default();
        Self {
            code: code.into(),
            store: ParamStore::new(config.default_count),
            cache: SweepCache::new(config.cache_capacity),
            open: None,
            cell_size: config.cell_size,
            listeners: Listeners::default(),
            config,
        }
    }

    /// Session over `code` with `config`
    ///
    /// # Errors
    /// Returns error if `config` is invalid
    pub fn with_config(code: impl Into<String>, config: SweepConfig) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            code: code.into(),
            store: ParamStore::new(config.default_count),
            cache: SweepCache::new(config.cache_capacity),
            open: None,
            cell_size: config.clamp_cell_size(config.cell_size),
            listeners: Listeners::default(),
            config,
        })
    }

    /// Session restored from a saved record
    ///
    /// # Errors
    /// Returns error if `config` is invalid
    pub fn from_record(record: &VersionRecord, config: SweepConfig) -> Result<Self, SessionError> {
        let mut session = Self::with_config(record.code.clone(), config)?;
        session.load_record(record);
        Ok(session)
    }

    /// Current text
    #[inline]
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Current parameter snapshot
    #[inline]
    #[must_use]
    pub fn params(&self) -> Arc<ParamState> {
        self.store.snapshot()
    }

    /// Number of committed snapshots
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    /// Preview cell size in pixels
    #[inline]
    #[must_use]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// The open literal, if any
    #[inline]
    #[must_use]
    pub fn open_literal_handle(&self) -> Option<&LiteralHandle> {
        self.open.as_ref()
    }

    /// Register a listener for every future commit
    pub fn subscribe(&mut self, listener: impl ParamsListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Apply an edit batch made against the current text
    ///
    /// Parameters are remapped and a [`UpdateKind::Position`] snapshot is
    /// published. User edits close the open literal; external edits keep it
    /// open when it survives the batch.
    ///
    /// # Errors
    /// Returns error if the batch does not fit the current text
    pub fn apply_changes(
        &mut self,
        changes: Vec<Change>,
        origin: EditOrigin,
    ) -> Result<ParamsEvent, SessionError> {
        self.apply_changes_as(changes, origin, UpdateKind::Position)
    }

    fn apply_changes_as(
        &mut self,
        changes: Vec<Change>,
        origin: EditOrigin,
        kind: UpdateKind,
    ) -> Result<ParamsEvent, SessionError> {
        let set = ChangeSet::new(self.code.len(), changes)?;
        let code = set.apply(&self.code)?;
        let update = self.store.apply_changes_as(&set, &code, kind);
        self.code = code;

        match origin {
            EditOrigin::User => {
                self.close_literal();
            }
            EditOrigin::External => self.remap_open(&set, &update),
        }
        Ok(self.publish(update))
    }

    fn remap_open(&mut self, set: &ChangeSet, update: &ParamsUpdate) {
        let Some(handle) = self.open.as_mut() else {
            return;
        };
        let (from, to) = set.map_span(handle.span());
        let span = TextSpan::new(from, to);
        match span.slice(&self.code) {
            Some(text) if is_standalone_at(&self.code, span) => {
                handle.literal.span = span;
                handle.literal.value = text.to_string();
                if handle.param.is_some_and(|id| update.dropped.contains(&id)) {
                    handle.param = None;
                }
            }
            _ => self.open = None,
        }
    }

    /// Mark or unmark the literal at `offset`
    ///
    /// # Errors
    /// Returns error if there is no literal at `offset` or it partially
    /// overlaps a swept literal
    pub fn toggle_at(&mut self, offset: usize) -> Result<Toggle, SessionError> {
        let literal = find_number_at(&self.code, offset).ok_or(SessionError::NoLiteralAt(offset))?;
        let (toggle, update) = self.store.toggle(&self.code, literal.span)?;
        tracing::debug!(span = %literal.span, ?toggle, "toggled literal");

        if let Some(handle) = self.open.as_mut().filter(|h| h.span() == literal.span) {
            handle.param = match toggle {
                Toggle::Added(id) => Some(id),
                Toggle::Removed(_) => None,
            };
        }
        self.publish(update);
        Ok(toggle)
    }

    /// Open the literal at `offset`, closing any other
    ///
    /// # Errors
    /// Returns error if there is no literal at `offset`
    pub fn open_literal(&mut self, offset: usize) -> Result<LiteralHandle, SessionError> {
        self.close_literal();
        let literal = find_number_at(&self.code, offset).ok_or(SessionError::NoLiteralAt(offset))?;
        let param = self.store.snapshot().find_by_span(literal.span).map(|p| p.id());
        let handle = LiteralHandle::new(literal, param);
        self.open = Some(handle.clone());
        Ok(handle)
    }

    /// Close the open literal
    pub fn close_literal(&mut self) -> Option<LiteralHandle> {
        self.open.take()
    }

    /// Mark or unmark the open literal
    ///
    /// # Errors
    /// Returns error if no literal is open
    pub fn toggle_open_literal(&mut self) -> Result<Toggle, SessionError> {
        let from = self.open.as_ref().ok_or(SessionError::NoOpenLiteral)?.span().from;
        self.toggle_at(from)
    }

    /// Rewrite the open literal with `value`, keeping it open
    ///
    /// Publishes a [`UpdateKind::Params`] snapshot.
    ///
    /// # Errors
    /// Returns error if no literal is open or `value` is not finite
    pub fn set_literal_value(&mut self, value: f64) -> Result<ParamsEvent, SessionError> {
        let span = self.open.as_ref().ok_or(SessionError::NoOpenLiteral)?.span();
        if !value.is_finite() {
            return Err(SessionError::NonFiniteValue(value));
        }

        let text = format_slider_value(value);
        let event = self.apply_changes_as(
            vec![Change::replace(span, text.as_str())],
            EditOrigin::External,
            UpdateKind::Params,
        )?;
        if let Some(handle) = self.open.as_mut() {
            handle.rewritten(&text);
        }
        Ok(event)
    }

    /// Replace a parameter's range configuration
    ///
    /// # Errors
    /// Returns error if `id` is not swept
    pub fn set_range(&mut self, id: ParamId, range: RangeConfig) -> Result<ParamsEvent, SessionError> {
        let update = self.store.set_range(id, range)?;
        Ok(self.publish(update))
    }

    /// Replace a parameter's sample type
    ///
    /// # Errors
    /// Returns error if `id` is not swept
    pub fn set_type(&mut self, id: ParamId, number_type: NumberType) -> Result<ParamsEvent, SessionError> {
        let update = self.store.set_type(id, number_type)?;
        Ok(self.publish(update))
    }

    /// Set the preview cell size, clamped to the configured bounds
    ///
    /// Purely presentational; the sweep is unaffected.
    pub fn set_cell_size(&mut self, px: u32) -> u32 {
        self.cell_size = self.config.clamp_cell_size(px);
        self.cell_size
    }

    /// Columns of the variant grid
    #[must_use]
    pub fn column_count(&self) -> usize {
        let state = self.store.snapshot();
        column_count(state.params(), state.ranges(), self.config.default_count)
    }

    /// Every variant of the current text, in grid order
    ///
    /// # Errors
    /// Returns error if the sweep exceeds the configured cell limit
    pub fn variants(&self) -> Result<Arc<Vec<Variant>>, SessionError> {
        let state = self.store.snapshot();
        let columns = column_count(state.params(), state.ranges(), self.config.default_count);
        let options = self.config.sweep_options(columns);
        Ok(self
            .cache
            .get_or_generate(&self.code, state.params(), state.ranges(), &options)?)
    }

    /// Variants split into grid rows
    ///
    /// # Errors
    /// Returns error if the sweep exceeds the configured cell limit
    pub fn grid(&self) -> Result<Vec<Vec<Variant>>, SessionError> {
        let variants = self.variants()?;
        let state = self.store.snapshot();
        let layout =
            GridLayout::for_params(state.params(), state.ranges(), self.config.default_count);
        Ok(layout
            .rows(variants.as_slice())
            .map(<[Variant]>::to_vec)
            .collect())
    }

    /// Write a variant's values into the text
    ///
    /// # Errors
    /// Returns error if the variant does not match the swept parameters
    pub fn select_variant(&mut self, variant: &Variant) -> Result<ParamsEvent, SessionError> {
        self.write_back(&variant.values)
    }

    /// Write `values` at the current parameter spans
    ///
    /// The write is an external edit, so parameters keep their identity and
    /// pick up the new values.
    ///
    /// # Errors
    /// Returns error if the value count differs from the parameter count
    pub fn write_back<S: AsRef<str>>(&mut self, values: &[S]) -> Result<ParamsEvent, SessionError> {
        let substitutions = self.store.snapshot().substitutions(values)?;
        tracing::debug!(values = values.len(), "writing variant back");
        self.apply_changes(substitutions, EditOrigin::External)
    }

    /// Replace the whole text
    pub fn set_code(&mut self, code: impl Into<String>) -> ParamsEvent {
        let code = code.into();
        self.open = None;
        let set = ChangeSet::replace_all(self.code.len(), code.as_str());
        let update = self.store.apply_changes(&set, &code);
        self.code = code;
        self.publish(update)
    }

    /// Replace text, parameters and cell size with a saved record
    pub fn load_record(&mut self, record: &VersionRecord) -> ParamsEvent {
        self.open = None;
        self.code.clone_from(&record.code);
        self.cell_size = self.config.clamp_cell_size(record.cell_size_or_default());
        let state = record.hydrate(self.config.default_count);
        tracing::debug!(params = state.len(), "loaded version record");
        let update = self.store.replace(state);
        self.publish(update)
    }

    /// Snapshot of the session as a saveable record
    #[must_use]
    pub fn to_record(&self) -> VersionRecord {
        VersionRecord::capture(self.code.as_str(), &self.store.snapshot(), self.cell_size)
    }

    fn publish(&self, update: ParamsUpdate) -> ParamsEvent {
        let event = ParamsEvent::new(update, Arc::from(self.code.as_str()));
        self.listeners.notify(&event);
        event
    }
}
