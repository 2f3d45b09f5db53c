use thiserror::Error;

#[derive(Debug, Error)]
pub enum CyclistError {
    #[error("invalid cyclist parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("invalid sampling range for {name}: [{low}, {high})")]
    InvalidRange { name: &'static str, low: f64, high: f64 },

    #[error("cannot number {count} cyclists with 32-bit ids")]
    TooManyCyclists { count: usize },
}

pub type CyclistResult<T> = Result<T, CyclistError>;
