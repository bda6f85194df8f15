//! Error types for sweep generation

use multiples_params::ParamError;
use multiples_text::SpliceError;

/// Sweep generation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SweepError {
    /// Parameter contract violation (e.g. value count mismatch)
    #[error("parameter error: {0}")]
    Params(#[from] ParamError),

    /// Substitutions could not be spliced
    #[error("splice error: {0}")]
    Splice(#[from] SpliceError),

    /// Sweep would produce more variants than allowed
    #[error("sweep would produce {cells} variants, limit is {max}")]
    TooManyCells { cells: usize, max: usize },

    /// Unrecognized sweep mode name
    #[error("unknown sweep mode: {0}")]
    UnknownMode(String),
}
