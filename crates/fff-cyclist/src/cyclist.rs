//! The affine safety-buffer cyclist.

use fff_core::{CyclistId, SimTime};

use crate::{CyclistError, CyclistResult, ForcedToFollow, Kinematics};

/// Per-trip cyclist state.
///
/// Created once per simulated trip and owned by the host; segments refer to
/// it by [`CyclistId`] only.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cyclist {
    id:            CyclistId,
    desired_speed: f64,
    theta0:        f64,
    theta1:        f64,
    length:        f64,
    earliest_exit: SimTime,
}

impl Cyclist {
    /// Build a cyclist.
    ///
    /// - `desired_speed` [m/s] must be positive.
    /// - `theta0` [m] and `theta1` [s] are the headway intercept and slope;
    ///   both must be non-negative.
    /// - `length` [m] is the bicycle length and must be positive.
    pub fn new(
        id:            CyclistId,
        desired_speed: f64,
        theta0:        f64,
        theta1:        f64,
        length:        f64,
    ) -> CyclistResult<Self> {
        check("desired_speed", desired_speed, |v| v > 0.0)?;
        check("theta0", theta0, |v| v >= 0.0)?;
        check("theta1", theta1, |v| v >= 0.0)?;
        check("length", length, |v| v > 0.0)?;
        Ok(Self {
            id,
            desired_speed,
            theta0,
            theta1,
            length,
            earliest_exit: SimTime::ZERO,
        })
    }

    pub fn theta0(&self) -> f64 {
        self.theta0
    }

    pub fn theta1(&self) -> f64 {
        self.theta1
    }

    pub fn length(&self) -> f64 {
        self.length
    }
}

fn check(name: &'static str, value: f64, ok: impl Fn(f64) -> bool) -> CyclistResult<()> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(CyclistError::InvalidParameter { name, value })
    }
}

impl Kinematics for Cyclist {
    #[inline]
    fn id(&self) -> CyclistId {
        self.id
    }

    #[inline]
    fn safety_buffer(&self, speed: f64) -> f64 {
        self.theta0 + self.theta1 * speed + self.length
    }

    #[inline]
    fn desired_speed(&self) -> f64 {
        self.desired_speed
    }

    #[inline]
    fn earliest_exit(&self) -> SimTime {
        self.earliest_exit
    }

    #[inline]
    fn set_earliest_exit(&mut self, t: SimTime) {
        self.earliest_exit = t;
    }
}

impl ForcedToFollow for Cyclist {
    fn max_speed_for_space(&self, space: f64) -> Option<f64> {
        let slack = space - self.theta0 - self.length;
        if slack < 0.0 {
            return None;
        }
        if self.theta1 == 0.0 {
            // Buffer does not grow with speed.
            return Some(f64::INFINITY);
        }
        Some(slack / self.theta1)
    }
}
