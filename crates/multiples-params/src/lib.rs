//! Multiples Parameter Tracking
//!
//! Keeps the set of swept numeric literals attached to the right text while
//! the user keeps typing.
//!
//! # Core Concepts
//!
//! - [`Parameter`]: A marked literal with a stable [`ParamId`]
//! - [`RangeConfig`]: Raw, user-editable sweep bounds, count and type
//! - [`remap`]: Moves parameters through an edit batch, dropping invalidated ones
//! - [`ParamState`]: Immutable snapshot of parameters and their ranges
//! - [`ParamStore`]: Publishes snapshots tagged with an [`UpdateKind`]
//!
//! # Example
//!
//! ```rust
//! use multiples_params::{ParamStore, UpdateKind};
//! use multiples_text::{Change, ChangeSet, TextSpan};
//!
//! let doc = "circle(0,0,50);";
//! let mut store = ParamStore::default();
//! store.toggle(doc, TextSpan::new(11, 13)).unwrap();
//!
//! let changes = ChangeSet::new(doc.len(), vec![Change::insert(0, "  ")]).unwrap();
//! let after = changes.apply(doc).unwrap();
//! let update = store.apply_changes(&changes, &after);
//!
//! assert_eq!(update.kind, UpdateKind::Position);
//! assert_eq!(update.state.params()[0].span(), TextSpan::new(13, 15));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod param;
mod range;
mod store;
mod tracker;

pub use error::ParamError;
pub use param::{NumberType, ParamId, Parameter};
pub use range::{RangeConfig, RangeMap, ValueRange, DEFAULT_SAMPLE_COUNT};
pub use store::{ParamState, ParamStore, ParamsUpdate, Toggle, UpdateKind};
pub use tracker::{remap, RemapOutcome};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
