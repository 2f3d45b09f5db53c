//! Model configuration.
//!
//! Typically built in code or deserialised (feature `serde`) by the
//! application and passed to segment factories and the corridor builder.

use crate::{FffError, FffResult};

/// Top-level configuration of the bicycle segment model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FffConfig {
    /// Width [m] at the edges of a path that cyclists do not use.
    pub dead_space_m: f64,

    /// Lateral width [m] of one pseudolane.
    pub efficient_lane_width_m: f64,

    /// Links longer than this [m] are split into a chain of equal segments.
    pub max_segment_length_m: f64,

    /// Passenger-car equivalents of one cyclist, used to report storage
    /// capacity to a host that counts in PCE.
    pub bicycle_pce: f64,

    /// Seconds per simulation step.
    pub step_secs: f64,

    /// The simulation stops once the clock reaches this time [s].
    pub end_time_secs: f64,

    /// Master RNG seed for population sampling and departure draws.  The same
    /// seed always produces identical results.
    pub seed: u64,
}

impl Default for FffConfig {
    fn default() -> Self {
        Self {
            dead_space_m:           0.4,
            efficient_lane_width_m: 1.25,
            max_segment_length_m:   60.0,
            bicycle_pce:            0.25,
            step_secs:              1.0,
            end_time_secs:          3_600.0,
            seed:                   42,
        }
    }
}

impl FffConfig {
    /// Check every field for physically meaningful values.
    pub fn validate(&self) -> FffResult<()> {
        positive("efficient_lane_width_m", self.efficient_lane_width_m)?;
        positive("max_segment_length_m", self.max_segment_length_m)?;
        positive("bicycle_pce", self.bicycle_pce)?;
        positive("step_secs", self.step_secs)?;
        if !self.dead_space_m.is_finite() || self.dead_space_m < 0.0 {
            return Err(FffError::Config(format!(
                "dead_space_m must be finite and non-negative, got {}",
                self.dead_space_m
            )));
        }
        if !self.end_time_secs.is_finite() || self.end_time_secs < 0.0 {
            return Err(FffError::Config(format!(
                "end_time_secs must be finite and non-negative, got {}",
                self.end_time_secs
            )));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> FffResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FffError::Config(format!("{name} must be finite and positive, got {value}")))
    }
}
