//! Lexical scanner for standalone numeric literals
//!
//! A literal is an optionally signed decimal number (`42`, `-3`, `3.14`,
//! `1.`, `.5`, `-.5`) that is neither preceded nor followed by a word byte
//! (ASCII letter, digit or underscore). The `4` in `vec4` is therefore not a
//! literal. Recognition is purely lexical; the scanner knows nothing about
//! the language of the text.
//!
//! Candidates come from the pattern `-?(?:\d+\.?\d*|\.\d+)`; the word
//! boundaries on both sides are checked on the bytes around each candidate,
//! giving back a trailing fraction when only the integer part ends on a
//! boundary. So `1.x` yields `1` and `1.5.3` yields `1.5` and `3`.

use crate::span::TextSpan;
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use serde::{Deserialize, Serialize};

const LITERAL_PATTERN: &str = r"-?(?:\d+\.?\d*|\.\d+)";

static LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(LITERAL_PATTERN).expect("literal pattern compiles"));

/// A literal found in a text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumberMatch {
    /// Location of the literal
    pub span: TextSpan,
    /// Literal text exactly as it appears
    pub value: String,
}

impl NumberMatch {
    /// Start offset
    #[inline]
    #[must_use]
    pub fn from(&self) -> usize {
        self.span.from
    }

    /// End offset (exclusive)
    #[inline]
    #[must_use]
    pub fn to(&self) -> usize {
        self.span.to
    }
}

/// Check if `byte` can be part of an identifier
#[inline]
#[must_use]
pub fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// End offset of the literal for the candidate `start..end`, if it is one
fn accept(bytes: &[u8], start: usize, end: usize) -> Option<usize> {
    if start > 0 && is_word_byte(bytes[start - 1]) {
        return None;
    }
    if end >= bytes.len() || !is_word_byte(bytes[end]) {
        return Some(end);
    }

    // Only an integer part that stops at its dot can still end on a boundary.
    let body = if bytes[start] == b'-' { start + 1 } else { start };
    let dot = body + bytes[body..end].iter().position(|&b| b == b'.')?;
    (dot > body).then_some(dot)
}

/// End offset of the literal starting exactly at `start`, if any
fn match_at(bytes: &[u8], start: usize) -> Option<usize> {
    let candidate = LITERAL.find_at(bytes, start)?;
    if candidate.start() != start {
        return None;
    }
    accept(bytes, start, candidate.end())
}

/// Iterator over every standalone literal in a text, left to right
///
/// # Example
/// ```
/// # use multiples_text::NumberLiterals;
/// let found: Vec<_> = NumberLiterals::new("vec4(1.5, -2, x_3)").map(|m| m.value).collect();
/// assert_eq!(found, vec!["1.5", "-2"]);
/// ```
#[derive(Debug, Clone)]
pub struct NumberLiterals<'a> {
    text: &'a str,
    pos: usize,
    base: usize,
}

impl<'a> NumberLiterals<'a> {
    /// Scan the whole of `text`
    #[inline]
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            base: 0,
        }
    }

    /// Scan `text`, reporting spans shifted by `base`
    ///
    /// Used when `text` is a line sliced out of a larger document.
    #[inline]
    #[must_use]
    pub fn with_base(text: &'a str, base: usize) -> Self {
        Self { text, pos: 0, base }
    }
}

impl Iterator for NumberLiterals<'_> {
    type Item = NumberMatch;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() {
            let candidate = LITERAL.find_at(bytes, self.pos)?;
            let start = candidate.start();
            if let Some(end) = accept(bytes, start, candidate.end()) {
                self.pos = end;
                return Some(NumberMatch {
                    span: TextSpan::new(self.base + start, self.base + end),
                    value: self.text[start..end].to_string(),
                });
            }
            // A rejected candidate may still contain a literal, as in `x-5`.
            self.pos = start + 1;
        }
        None
    }
}

/// Find the literal under `offset`
///
/// Only the line containing `offset` is scanned. A literal matches when
/// `from <= offset <= to`, so a caret resting right after a literal still
/// points at it. Returned spans are absolute offsets into `text`.
#[must_use]
pub fn find_number_at(text: &str, offset: usize) -> Option<NumberMatch> {
    let bytes = text.as_bytes();
    if offset > bytes.len() {
        return None;
    }

    let line_start = bytes[..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let line_end = bytes[offset..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |i| offset + i);
    let line = text.get(line_start..line_end)?;

    NumberLiterals::with_base(line, line_start).find(|m| m.span.touches(offset))
}

/// Check if the whole of `slice` is exactly one literal
#[inline]
#[must_use]
pub fn is_standalone_number(slice: &str) -> bool {
    !slice.is_empty() && match_at(slice.as_bytes(), 0) == Some(slice.len())
}

/// Check if `span` of `doc` holds exactly one literal that is not glued to a
/// neighbouring word byte
#[must_use]
pub fn is_standalone_at(doc: &str, span: TextSpan) -> bool {
    let Some(slice) = span.slice(doc) else {
        return false;
    };
    let bytes = doc.as_bytes();
    let clear_before = span.from == 0 || !is_word_byte(bytes[span.from - 1]);
    let clear_after = span.to >= bytes.len() || !is_word_byte(bytes[span.to]);
    clear_before && clear_after && is_standalone_number(slice)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(text: &str) -> Vec<String> {
        NumberLiterals::new(text).map(|m| m.value).collect()
    }

    #[test]
    fn finds_plain_signed_and_fractional_literals() {
        assert_eq!(values("42 -3 3.14 .5 -.5 7."), vec!["42", "-3", "3.14", ".5", "-.5", "7."]);
    }

    #[test]
    fn skips_digits_inside_identifiers() {
        assert_eq!(values("vec4(a2, _1, 2b)"), Vec::<String>::new());
        assert_eq!(values("vec2(1, 2)"), vec!["1", "2"]);
    }

    #[test]
    fn backtracks_like_a_regex() {
        // Trailing dot followed by a letter: the dot is given back.
        assert_eq!(values("1.x"), vec!["1"]);
        assert_eq!(values("1.5.3"), vec!["1.5", "3"]);
        assert_eq!(values("1..5"), vec!["1.", ".5"]);
    }

    #[test]
    fn literal_pattern_compiles() {
        assert!(Regex::new(LITERAL_PATTERN).is_ok());
        assert_eq!(match_at(b"12.5;", 0), Some(4));
        assert_eq!(match_at(b"a12", 1), None);
        assert_eq!(match_at(b"1.5x", 0), Some(1));
        assert_eq!(match_at(b" 1", 0), None);
    }

    #[test]
    fn minus_after_word_is_not_a_sign() {
        assert_eq!(values("x-5"), vec!["5"]);
        assert_eq!(values("x - 5"), vec!["5"]);
        assert_eq!(values("(-5)"), vec!["-5"]);
        assert_eq!(values("--5"), vec!["-5"]);
    }

    #[test]
    fn reports_byte_spans_after_multibyte_text() {
        let found: Vec<_> = NumberLiterals::new("é = 12;").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span, TextSpan::new(5, 7));
    }

    #[test]
    fn find_number_at_uses_inclusive_end() {
        let code = "circle(0,0,50);";
        let at_start = find_number_at(code, 11).unwrap();
        assert_eq!(at_start.span, TextSpan::new(11, 13));
        assert_eq!(at_start.value, "50");

        let after = find_number_at(code, 13).unwrap();
        assert_eq!(after.value, "50");

        assert!(find_number_at(code, 2).is_none());
        assert!(find_number_at(code, 99).is_none());
    }

    #[test]
    fn find_number_at_returns_absolute_offsets_on_later_lines() {
        let code = "let a = 1;\nlet b = 250;\n";
        let found = find_number_at(code, 20).unwrap();
        assert_eq!(found.value, "250");
        assert_eq!(found.span, TextSpan::new(19, 22));
        assert_eq!(&code[found.from()..found.to()], "250");
    }

    #[test]
    fn standalone_number_requires_whole_slice() {
        assert!(is_standalone_number("-2"));
        assert!(is_standalone_number("3.14"));
        assert!(!is_standalone_number("3.14x"));
        assert!(!is_standalone_number("a3"));
        assert!(!is_standalone_number(""));
        assert!(!is_standalone_number("-"));
    }

    #[test]
    fn standalone_at_checks_document_neighbours() {
        let doc = "a50 + 50";
        assert!(!is_standalone_at(doc, TextSpan::new(1, 3)));
        assert!(is_standalone_at(doc, TextSpan::new(6, 8)));
        assert!(!is_standalone_at(doc, TextSpan::new(6, 9)));
    }
}
