//! Swept parameters
//!
//! A [`Parameter`] is a numeric literal the user marked for sweeping. Its
//! [`ParamId`] is assigned once, when the literal is marked, and survives
//! every later edit; the span and value move with the text.

use crate::error::ParamError;
use multiples_text::{is_standalone_at, parse_float_prefix, NumberMatch, TextSpan};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable, edit-independent parameter identity
///
/// Used as the join key for range configuration instead of the span, which
/// changes on every keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamId(Uuid);

impl ParamId {
    /// Fresh random identifier
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ParamId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ParamId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ParamId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Numeric kind used when sampling and formatting a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NumberType {
    /// Samples are rounded to whole numbers
    Int,
    /// Samples are formatted with two decimals
    #[default]
    Float,
}

impl NumberType {
    /// Wire name (`"Int"` / `"Float"`)
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "Int",
            Self::Float => "Float",
        }
    }
}

impl Display for NumberType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked literal span
///
/// # Invariants
/// - `span` is non-empty
/// - `value` is the text at `span` in the document the parameter was last
///   validated against, and is a standalone literal there
///
/// The numeric kind used for sampling lives in the parameter's
/// [`RangeConfig`](crate::RangeConfig), not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    id: ParamId,
    #[serde(flatten)]
    span: TextSpan,
    value: String,
}

impl Parameter {
    /// Create parameter with a fresh id
    #[inline]
    #[must_use]
    pub fn new(span: TextSpan, value: impl Into<String>) -> Self {
        Self {
            id: ParamId::new(),
            span,
            value: value.into(),
        }
    }

    /// Create parameter for a scanned literal
    #[inline]
    #[must_use]
    pub fn from_match(literal: &NumberMatch) -> Self {
        Self::new(literal.span, literal.value.clone())
    }

    /// Create parameter for `span` of `doc`, checking it holds a literal
    ///
    /// # Errors
    /// Returns error if `span` is not a standalone literal in `doc`
    pub fn locate(doc: &str, span: TextSpan) -> Result<Self, ParamError> {
        if !is_standalone_at(doc, span) {
            return Err(ParamError::NotALiteral {
                span,
                found: span.slice(doc).unwrap_or_default().to_string(),
            });
        }
        let value = span.slice(doc).unwrap_or_default();
        Ok(Self::new(span, value))
    }

    /// Replace the id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: ParamId) -> Self {
        self.id = id;
        self
    }

    /// Same parameter at a new location
    #[inline]
    #[must_use]
    pub(crate) fn relocated(&self, span: TextSpan, value: &str) -> Self {
        Self {
            id: self.id,
            span,
            value: value.to_string(),
        }
    }

    /// Stable id
    #[inline]
    #[must_use]
    pub fn id(&self) -> ParamId {
        self.id
    }

    /// Current span
    #[inline]
    #[must_use]
    pub fn span(&self) -> TextSpan {
        self.span
    }

    /// Current start offset
    #[inline]
    #[must_use]
    pub fn from(&self) -> usize {
        self.span.from
    }

    /// Current end offset (exclusive)
    #[inline]
    #[must_use]
    pub fn to(&self) -> usize {
        self.span.to
    }

    /// Literal text
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Literal parsed as a number
    #[inline]
    #[must_use]
    pub fn numeric_value(&self) -> Option<f64> {
        parse_float_prefix(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_parse_back() {
        let a = ParamId::new();
        let b = ParamId::new();
        assert_ne!(a, b);
        assert_eq!(a.to_string().parse::<ParamId>().unwrap(), a);
    }

    #[test]
    fn locate_checks_literal() {
        let doc = "circle(0,0,50);";
        let p = Parameter::locate(doc, TextSpan::new(11, 13)).unwrap();
        assert_eq!(p.value(), "50");
        assert_eq!(p.numeric_value(), Some(50.0));

        let err = Parameter::locate(doc, TextSpan::new(0, 6)).unwrap_err();
        assert!(matches!(err, ParamError::NotALiteral { .. }));
    }

    #[test]
    fn relocation_keeps_identity() {
        let p = Parameter::new(TextSpan::new(1, 3), "10");
        let moved = p.relocated(TextSpan::new(5, 8), "100");
        assert_eq!(moved.id(), p.id());
        assert_eq!((moved.from(), moved.to(), moved.value()), (5, 8, "100"));
    }

    #[test]
    fn serializes_flat() {
        let p = Parameter::new(TextSpan::new(11, 13), "50");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["from"], 11);
        assert_eq!(json["to"], 13);
        assert_eq!(json["value"], "50");
        assert_eq!(json["id"], p.id().to_string());
    }
}
