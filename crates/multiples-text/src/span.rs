//! Byte spans into a text document
//!
//! Provides [`TextSpan`], the half-open range every literal, parameter and
//! substitution is addressed by.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Half-open byte range `[from, to)` into a UTF-8 document
///
/// # Invariants
/// - `from <= to` for spans built through [`TextSpan::new`]
/// - Offsets are byte offsets and must fall on char boundaries of the
///   document they address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TextSpan {
    /// Inclusive start offset
    pub from: usize,
    /// Exclusive end offset
    pub to: usize,
}

impl TextSpan {
    /// Create new span, normalizing inverted bounds
    #[inline]
    #[must_use]
    pub fn new(from: usize, to: usize) -> Self {
        if from <= to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }

    /// Zero-width span at `offset`
    #[inline]
    #[must_use]
    pub fn point(offset: usize) -> Self {
        Self {
            from: offset,
            to: offset,
        }
    }

    /// Length in bytes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.to.saturating_sub(self.from)
    }

    /// Check if span is zero-width
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.from >= self.to
    }

    /// Check if two spans share at least one byte
    ///
    /// Adjacent spans (`a.to == b.from`) do not overlap.
    #[inline]
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.from < other.to && other.from < self.to
    }

    /// Check if `offset` lies within the span, end inclusive
    #[inline]
    #[must_use]
    pub fn touches(&self, offset: usize) -> bool {
        self.from <= offset && offset <= self.to
    }

    /// Slice the span out of `text`
    ///
    /// Returns `None` when the span is out of bounds or splits a character.
    #[inline]
    #[must_use]
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.from..self.to)
    }

    /// Legacy position key (`"from-to"`) used by older saved records
    #[inline]
    #[must_use]
    pub fn position_key(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}

impl Display for TextSpan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}
