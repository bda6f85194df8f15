//! Error types for parameter tracking
//!
//! Edits that invalidate a parameter are not errors; the tracker drops the
//! parameter silently. These variants cover caller contract violations only.

use crate::param::ParamId;
use multiples_text::TextSpan;

/// Parameter store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// Requested span partially overlaps an already tracked parameter
    #[error("span {requested} overlaps tracked parameter at {existing}")]
    Overlapping {
        existing: TextSpan,
        requested: TextSpan,
    },

    /// No parameter with this id is tracked
    #[error("unknown parameter: {0}")]
    UnknownParam(ParamId),

    /// Span does not hold a standalone numeric literal
    #[error("span {span} does not hold a numeric literal (found {found:?})")]
    NotALiteral { span: TextSpan, found: String },

    /// Value tuple length differs from the parameter count
    #[error("expected {expected} values, got {actual}")]
    ValueCountMismatch { expected: usize, actual: usize },
}
