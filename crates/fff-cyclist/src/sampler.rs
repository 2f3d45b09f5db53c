//! Individualised cyclist parameters drawn from uniform ranges.
//!
//! # Usage
//!
//! ```rust
//! use fff_cyclist::CyclistSampler;
//!
//! let cyclists = CyclistSampler::default().sample_population(100, 42).unwrap();
//! assert_eq!(cyclists.len(), 100);
//! ```

use std::ops::Range;

use fff_core::{CyclistId, CyclistRng};

use crate::{Cyclist, CyclistError, CyclistResult};

/// Uniform ranges for every cyclist parameter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CyclistSampler {
    /// Desired speed [m/s].
    pub desired_speed: Range<f64>,
    /// Headway intercept [m].
    pub theta0: Range<f64>,
    /// Headway slope [s].
    pub theta1: Range<f64>,
    /// Bicycle length [m].
    pub length: Range<f64>,
}

impl Default for CyclistSampler {
    fn default() -> Self {
        Self {
            desired_speed: 3.5..7.5,
            theta0:        0.5..1.5,
            theta1:        0.8..1.4,
            length:        1.7..1.9,
        }
    }
}

impl CyclistSampler {
    /// Draw one cyclist.  Deterministic in `(seed, id)`.
    pub fn sample(&self, id: CyclistId, seed: u64) -> CyclistResult<Cyclist> {
        self.validate()?;
        let mut rng = CyclistRng::new(seed, id);
        Cyclist::new(
            id,
            draw(&mut rng, &self.desired_speed),
            draw(&mut rng, &self.theta0),
            draw(&mut rng, &self.theta1),
            draw(&mut rng, &self.length),
        )
    }

    /// Draw `count` cyclists with ids `0..count`.
    pub fn sample_population(&self, count: usize, seed: u64) -> CyclistResult<Vec<Cyclist>> {
        let end = CyclistId::try_from(count).map_err(|_| CyclistError::TooManyCyclists { count })?;
        (0..end.0).map(|i| self.sample(CyclistId(i), seed)).collect()
    }

    fn validate(&self) -> CyclistResult<()> {
        for (name, range) in [
            ("desired_speed", &self.desired_speed),
            ("theta0", &self.theta0),
            ("theta1", &self.theta1),
            ("length", &self.length),
        ] {
            if !(range.start.is_finite() && range.end.is_finite()) || range.start > range.end {
                return Err(CyclistError::InvalidRange {
                    name,
                    low:  range.start,
                    high: range.end,
                });
            }
        }
        Ok(())
    }
}

/// Uniform draw; an empty range yields its start.
fn draw(rng: &mut CyclistRng, range: &Range<f64>) -> f64 {
    if range.is_empty() {
        range.start
    } else {
        rng.gen_range(range.clone())
    }
}
