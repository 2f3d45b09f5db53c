//! The capability traits segments and admission policies depend on.

use fff_core::{CyclistId, SimTime};

/// The entire surface a segment needs from a cyclist.
///
/// Segments never hold a concrete cyclist type, so richer behaviour models
/// (car-following, lane choice) can sit behind the same contract.
pub trait Kinematics {
    fn id(&self) -> CyclistId;

    /// Longitudinal space [m] occupied when riding at `speed` [m/s].
    fn safety_buffer(&self, speed: f64) -> f64;

    /// Free-flow speed [m/s] absent any interaction.
    fn desired_speed(&self) -> f64;

    /// Time at or after which the cyclist may leave its current segment.
    fn earliest_exit(&self) -> SimTime;

    /// Overwrite the earliest exit time.
    ///
    /// A segment keys its residents by this time when they enter.  For a
    /// cyclist that is currently resident, change it through
    /// `Segment::reschedule` instead, or the segment keeps releasing it
    /// under the old time.
    fn set_earliest_exit(&mut self, t: SimTime);

    /// `true` once the clock has reached the earliest exit time.
    #[inline]
    fn is_eligible_at(&self, now: SimTime) -> bool {
        self.earliest_exit() <= now
    }
}

/// Speed fitting: the highest speed whose buffer still fits in a given space.
pub trait ForcedToFollow: Kinematics {
    /// Largest speed `v` with `safety_buffer(v) <= space`, or `None` if even a
    /// standing cyclist does not fit.
    fn max_speed_for_space(&self, space: f64) -> Option<f64>;

    /// Speed assigned when `space` metres are free: the desired speed if it
    /// fits, otherwise the largest fitting speed.  `None` if no positive
    /// speed fits.
    fn assign_speed(&self, space: f64) -> Option<f64> {
        let speed = self.max_speed_for_space(space)?.min(self.desired_speed());
        (speed > 0.0).then_some(speed)
    }
}
