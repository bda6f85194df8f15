//! Multiples Sweep Generation
//!
//! Turns a program and its swept literals into a grid of program variants.
//!
//! # Core Concepts
//!
//! - [`generate_variations`]: Evenly spaced, formatted samples for one literal
//! - [`SweepStrategy`]: How per-parameter samples combine into value tuples
//! - [`generate`]: Splices every tuple into the base code
//! - [`column_count`] / [`GridLayout`]: Presentation grid shape
//! - [`SweepCache`]: Memoized sweeps keyed by content hash
//!
//! # Sweep shapes
//!
//! | Parameters | Strategy | Variants |
//! |---|---|---|
//! | 0 | none | 0 |
//! | 1 | [`LinearSweep`] | `2 * count` |
//! | 2 | [`GridSweep`] | `count0 * count1` |
//! | 3+ | [`CyclicSweep`] (default) | `count0 * count1` |
//! | 3+ | [`CrossProductSweep`] (opt-in) | product of all counts |
//!
//! Every shape fails with [`SweepError::TooManyCells`] past `max_cells`,
//! checked before any sample is formatted.
//!
//! # Example
//!
//! ```rust
//! use multiples_params::{Parameter, RangeMap};
//! use multiples_sweep::{generate, SweepOptions};
//! use multiples_text::TextSpan;
//!
//! let code = "circle(0,0,50);";
//! let radius = Parameter::locate(code, TextSpan::new(11, 13)).unwrap();
//! let variants = generate(code, &[radius], &RangeMap::new(), &SweepOptions::default()).unwrap();
//!
//! assert_eq!(variants.len(), 8);
//! assert_eq!(variants[0].code, "circle(0,0,25.00);");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod cache;
mod error;
mod generator;
mod layout;
mod sampling;
mod strategy;

pub use cache::{SweepCache, DEFAULT_CACHE_CAPACITY};
pub use error::SweepError;
pub use generator::{
    apply_values, generate, generate_1d, generate_2d, generate_xd, SweepOptions, Variant,
    DEFAULT_MAX_CELLS,
};
pub use layout::{column_count, GridLayout, DEFAULT_COLUMNS};
pub use sampling::{generate_variations, SampleSpec};
pub use strategy::{
    CrossProductSweep, CyclicSweep, GridSweep, LinearSweep, SweepMode, SweepStrategy,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
