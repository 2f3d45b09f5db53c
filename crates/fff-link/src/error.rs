//! Link-subsystem error type.

use thiserror::Error;

use fff_core::FffError;

/// Errors produced by `fff-link`.
///
/// Only construction and loading fail with an error.  A full segment is a
/// normal state, and misuse of a built segment panics.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("{what} must be finite and positive, got {value}")]
    InvalidGeometry { what: &'static str, value: f64 },

    #[error("link {id:?} has no usable pseudolanes")]
    ZeroPseudoLanes { id: String },

    #[error("link table parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] FffError),
}

pub type LinkResult<T> = Result<T, LinkError>;
