use fff_core::{CyclistId, FffError};
use fff_cyclist::CyclistError;
use fff_link::LinkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] FffError),

    #[error("link construction failed: {0}")]
    Link(#[from] LinkError),

    #[error("population sampling failed: {0}")]
    Cyclist(#[from] CyclistError),

    #[error("corridor has no segments")]
    EmptyCorridor,

    #[error("cyclist at index {index} carries id {id}")]
    CyclistIdMismatch { index: usize, id: CyclistId },

    #[error("{what} length {got} does not match cyclist count {expected}")]
    CyclistCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },
}

pub type SimResult<T> = Result<T, SimError>;
