//! Parameter change notifications

use multiples_params::{ParamId, ParamState, ParamsUpdate, UpdateKind};
use std::fmt::Debug;
use std::sync::Arc;

/// Source of an edit batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditOrigin {
    /// Typed or pasted by the user; closes an open literal interaction
    #[default]
    User,
    /// Written programmatically (slider drag, variant write-back)
    External,
}

/// Notification sent after every committed parameter snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct ParamsEvent {
    /// Why the snapshot was published
    pub kind: UpdateKind,
    /// Snapshot now current
    pub state: Arc<ParamState>,
    /// Text the snapshot's spans refer to
    pub code: Arc<str>,
    /// Parameters removed by this commit
    pub dropped: Vec<ParamId>,
}

impl ParamsEvent {
    pub(crate) fn new(update: ParamsUpdate, code: Arc<str>) -> Self {
        Self {
            kind: update.kind,
            state: update.state,
            code,
            dropped: update.dropped,
        }
    }

    /// Check if derived previews should be recomputed
    #[inline]
    #[must_use]
    pub fn is_intentional(&self) -> bool {
        self.kind == UpdateKind::Params
    }
}

/// Receiver of [`ParamsEvent`]s
pub trait ParamsListener: Send + Sync {
    /// Called after the snapshot in `event` became current
    fn on_params(&self, event: &ParamsEvent);
}

impl<F> ParamsListener for F
where
    F: Fn(&ParamsEvent) + Send + Sync,
{
    fn on_params(&self, event: &ParamsEvent) {
        self(event);
    }
}

/// Registered listeners, notified in subscription order
#[derive(Default)]
pub(crate) struct Listeners {
    inner: Vec<Box<dyn ParamsListener>>,
}

impl Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.inner.len())
            .finish()
    }
}

impl Listeners {
    pub(crate) fn push(&mut self, listener: Box<dyn ParamsListener>) {
        self.inner.push(listener);
    }

    pub(crate) fn notify(&self, event: &ParamsEvent) {
        tracing::trace!(kind = event.kind.as_str(), listeners = self.inner.len(), "notifying");
        for listener in &self.inner {
            listener.on_params(event);
        }
    }
}
