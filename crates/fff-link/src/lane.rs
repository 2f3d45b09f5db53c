//! Pseudolanes.

/// One of the parallel logical sub-lanes that make up a segment's usable
/// width.  Purely geometric and immutable after construction.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PseudoLane {
    length: f64,
}

impl PseudoLane {
    #[inline]
    pub fn new(length: f64) -> Self {
        Self { length }
    }

    /// Length [m]; identical for every pseudolane of a segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }
}
