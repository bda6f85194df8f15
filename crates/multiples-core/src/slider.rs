//! Open literal interaction
//!
//! Pointing at a literal opens it: the editor shows a slider over a range
//! derived from the literal's value together with a "sweep" toggle. Dragging
//! rewrites the literal in place without closing the interaction; any
//! ordinary edit closes it.

use multiples_params::ParamId;
use multiples_text::{parse_float_prefix, NumberMatch, TextSpan};
use serde::{Deserialize, Serialize};

/// Drag range offered for a literal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl SliderRange {
    /// Range from zero to twice `value`, `[-50, 50]` for zero
    #[must_use]
    pub fn for_value(value: f64) -> Self {
        let (a, b): (f64, f64) = if value == 0.0 || !value.is_finite() {
            (-50.0, 50.0)
        } else {
            (0.0, value * 2.0)
        };
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Range for a literal's text; unparseable text counts as zero
    #[inline]
    #[must_use]
    pub fn for_literal(literal: &str) -> Self {
        Self::for_value(parse_float_prefix(literal).unwrap_or(0.0))
    }

    /// Value at `fraction` of the way from `min` to `max`, clamped to the range
    #[inline]
    #[must_use]
    pub fn value_at(&self, fraction: f64) -> f64 {
        self.min + (self.max - self.min) * fraction.clamp(0.0, 1.0)
    }
}

/// Text written for a slider value
///
/// Rounded to two decimals, then printed in its shortest form (`12.5`, not
/// `12.50`; `3`, not `3.00`).
#[must_use]
pub fn format_slider_value(value: f64) -> String {
    let rounded = format!("{value:.2}").parse::<f64>().unwrap_or(value);
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

/// The currently open literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralHandle {
    /// Literal location and text
    pub literal: NumberMatch,
    /// Id of the parameter sweeping this literal, if any
    pub param: Option<ParamId>,
    /// Drag range, fixed when the literal was opened
    pub range: SliderRange,
}

impl LiteralHandle {
    pub(crate) fn new(literal: NumberMatch, param: Option<ParamId>) -> Self {
        let range = SliderRange::for_literal(&literal.value);
        Self {
            literal,
            param,
            range,
        }
    }

    /// Check if the open literal is swept
    #[inline]
    #[must_use]
    pub fn is_swept(&self) -> bool {
        self.param.is_some()
    }

    /// Current span of the literal
    #[inline]
    #[must_use]
    pub fn span(&self) -> TextSpan {
        self.literal.span
    }

    pub(crate) fn rewritten(&mut self, text: &str) {
        let from = self.literal.span.from;
        self.literal.span = TextSpan::new(from, from + text.len());
        self.literal.value = text.to_string();
    }
}
