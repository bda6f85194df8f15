//! Error types for sweep sessions

use crate::config::ConfigError;
use multiples_params::ParamError;
use multiples_sweep::SweepError;
use multiples_text::ChangeError;

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Parameter store rejected the request
    #[error("parameter error: {0}")]
    Params(#[from] ParamError),

    /// Sweep generation failed
    #[error("sweep error: {0}")]
    Sweep(#[from] SweepError),

    /// Edit batch does not fit the current text
    #[error("invalid edit: {0}")]
    Change(#[from] ChangeError),

    /// Configuration is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No numeric literal at the requested offset
    #[error("no numeric literal at offset {0}")]
    NoLiteralAt(usize),

    /// Operation needs an open literal
    #[error("no literal is open")]
    NoOpenLiteral,

    /// Value is not a finite number
    #[error("value {0} is not finite")]
    NonFiniteValue(f64),

    /// Saved record could not be read or written
    #[error("record error: {0}")]
    Record(#[from] serde_json::Error),
}
