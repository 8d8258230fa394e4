//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `DtnError` as one
//! variant where they need to surface configuration or parse failures.

use thiserror::Error;

/// The top-level error type for `dtn-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum DtnError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `dtn-*` crates.
pub type DtnResult<T> = Result<T, DtnError>;
