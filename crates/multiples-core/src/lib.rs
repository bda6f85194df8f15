//! Multiples Core
//!
//! Live sweep sessions over a single sketch.
//!
//! # Core Concepts
//!
//! - [`SweepSession`]: Owns the text, the parameter store and the sweep cache
//! - [`ParamsEvent`]: Snapshot published to [`ParamsListener`]s after each commit
//! - [`LiteralHandle`]: The literal currently under the slider
//! - [`SweepConfig`]: TOML-loadable sweep and preview settings
//! - [`VersionRecord`]: JSON document persisted for each saved version
//!
//! # Example
//!
//! ```rust
//! use multiples_core::{EditOrigin, SweepSession};
//! use multiples_text::Change;
//!
//! let mut session = SweepSession::new("circle(0,0,50);");
//! session.toggle_at(12).unwrap();
//! session
//!     .apply_changes(vec![Change::insert(0, "  ")], EditOrigin::User)
//!     .unwrap();
//!
//! let variants = session.variants().unwrap();
//! assert_eq!(variants.len(), 4);
//! assert_eq!(variants[0].code, "  circle(0,0,25.00);");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod config;
mod error;
mod events;
mod session;
mod slider;
mod version;

pub use config::{ConfigError, SweepConfig};
pub use error::SessionError;
pub use events::{EditOrigin, ParamsEvent, ParamsListener};
pub use session::SweepSession;
pub use slider::{format_slider_value, LiteralHandle, SliderRange};
pub use version::{DefinitionRecord, ParamsRecord, VersionRecord, DEFAULT_CELL_SIZE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
