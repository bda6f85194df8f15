//! Per-parameter sweep range configuration
//!
//! [`RangeConfig`] keeps the raw text the user typed for `start`, `end` and
//! `count`. Interpretation is lenient and happens at sampling time, so a
//! half-typed bound never blocks the sweep; it falls back to the
//! value-derived [`ValueRange`] instead.

use crate::param::{NumberType, ParamId};
use indexmap::IndexMap;
use multiples_text::{parse_float_prefix, parse_int_prefix};
use serde::{Deserialize, Serialize};

/// Samples per axis when nothing overrides it
pub const DEFAULT_SAMPLE_COUNT: usize = 4;

/// Range configurations keyed by parameter id, in insertion order
pub type RangeMap = IndexMap<ParamId, RangeConfig>;

/// Numeric sweep bounds with `min <= max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl ValueRange {
    /// Range from two bounds in either order
    #[inline]
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Default range around `value`: half to double, `[0, 100]` for zero
    ///
    /// Negative values yield `[2v, v/2]` after normalization.
    #[must_use]
    pub fn around(value: f64) -> Self {
        if value == 0.0 || !value.is_finite() {
            return Self::new(0.0, 100.0);
        }
        Self::new(value * 0.5, value * 2.0)
    }

    /// Default range around a literal's text
    ///
    /// Unparseable text is treated like zero.
    #[inline]
    #[must_use]
    pub fn around_literal(literal: &str) -> Self {
        Self::around(parse_float_prefix(literal).unwrap_or(0.0))
    }
}

/// User-editable sweep configuration for one parameter
///
/// # Invariants
/// - Fields hold raw user input; nothing here is guaranteed to parse
/// - `count` is serialized as a string but accepted as a string or a number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeConfig {
    /// Start bound as typed
    pub start: String,
    /// End bound as typed
    pub end: String,
    /// Sample count as typed
    #[serde(with = "count_field")]
    pub count: String,
    /// Numeric kind of the samples
    #[serde(rename = "type", default)]
    pub number_type: NumberType,
}

impl RangeConfig {
    /// Create configuration from raw inputs
    #[inline]
    #[must_use]
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        count: impl Into<String>,
        number_type: NumberType,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            count: count.into(),
            number_type,
        }
    }

    /// Configuration seeded from a literal's default range
    ///
    /// Bounds are written with two decimals, the type is `Float`.
    #[must_use]
    pub fn default_for(literal: &str, default_count: usize) -> Self {
        let range = ValueRange::around_literal(literal);
        Self::new(
            format!("{:.2}", range.min),
            format!("{:.2}", range.max),
            default_count.to_string(),
            NumberType::Float,
        )
    }

    /// Parsed bounds, `None` if either does not parse
    #[must_use]
    pub fn bounds(&self) -> Option<ValueRange> {
        let start = parse_float_prefix(&self.start)?;
        let end = parse_float_prefix(&self.end)?;
        Some(ValueRange::new(start, end))
    }

    /// Parsed sample count, `None` if it does not parse or is below one
    #[must_use]
    pub fn sample_count(&self) -> Option<usize> {
        parse_int_prefix(&self.count)
            .filter(|n| *n >= 1)
            .and_then(|n| usize::try_from(n).ok())
    }

    /// Replace the count
    #[inline]
    #[must_use]
    pub fn with_count(mut self, count: impl Into<String>) -> Self {
        self.count = count.into();
        self
    }

    /// Replace the numeric kind
    #[inline]
    #[must_use]
    pub fn with_type(mut self, number_type: NumberType) -> Self {
        self.number_type = number_type;
        self
    }
}

mod count_field {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(count: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(count)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::Int(n) => n.to_string(),
            Raw::Float(f) => f.to_string(),
        })
    }
}
