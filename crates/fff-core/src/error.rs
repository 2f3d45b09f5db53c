//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `FffError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The top-level error type for `fff-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum FffError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `fff-*` crates.
pub type FffResult<T> = Result<T, FffError>;
