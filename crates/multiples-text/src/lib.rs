//! Multiples Text Primitives
//!
//! Lexical and positional building blocks for tracking numeric literals in
//! a live text buffer.
//!
//! # Core Concepts
//!
//! - [`TextSpan`]: Half-open byte range into a document
//! - [`NumberLiterals`]: Scanner for standalone numeric literals
//! - [`ChangeSet`]: A batch of edits expressed in pre-edit coordinates
//! - [`splice`]: Non-overlapping substitutions applied right-to-left
//! - [`ContentHash`]: Blake3 digest used as a memoization key
//!
//! # Example
//!
//! ```rust
//! use multiples_text::{find_number_at, splice, Change};
//!
//! let code = "circle(0,0,50);";
//! let literal = find_number_at(code, 12).unwrap();
//! assert_eq!(literal.value, "50");
//!
//! let out = splice(code, &[Change::replace(literal.span, "75")]).unwrap();
//! assert_eq!(out, "circle(0,0,75);");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod change;
mod hash;
mod numeric;
mod scanner;
mod span;
mod splice;

// Re-exports
pub use change::{Bias, Change, ChangeError, ChangeSet};
pub use hash::{ContentHash, ContentHasher, HashError};
pub use numeric::{parse_float_prefix, parse_int_prefix};
pub use scanner::{
    find_number_at, is_standalone_at, is_standalone_number, is_word_byte, NumberLiterals,
    NumberMatch,
};
pub use span::TextSpan;
pub use splice::{splice, SpliceError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn scan_edit_and_splice() {
        let code = "rect(10, 20, w4, .5);";
        let values: Vec<String> = NumberLiterals::new(code).map(|m| m.value).collect();
        assert_eq!(values, vec!["10", "20", ".5"]);

        // Typing in front of the first literal shifts every later literal.
        let changes = ChangeSet::new(code.len(), vec![Change::insert(5, " ")]).unwrap();
        let edited = changes.apply(code).unwrap();
        assert_eq!(edited, "rect( 10, 20, w4, .5);");

        let twenty = NumberLiterals::new(code).nth(1).unwrap();
        let from = changes.map_pos(twenty.span.from, Bias::Left);
        let to = changes.map_pos(twenty.span.to, Bias::Right);
        assert_eq!(&edited[from..to], "20");
        assert!(is_standalone_at(&edited, TextSpan::new(from, to)));
    }

    #[test]
    fn hash_of_identical_text_is_stable() {
        let a = ContentHash::compute(b"circle(0,0,50);");
        let b = ContentHash::compute(b"circle(0,0,50);");
        assert_eq!(a, b);
        assert_eq!(a.short().len(), 16);
    }
}
