//! Caller-side admission policy.
//!
//! The segment only exposes occupancy and the space primitives; whether a
//! particular cyclist may enter is decided here by combining them with the
//! cyclist's own state.  Refusal is not an error: the host defers the
//! cyclist and retries later.

use log::warn;

use fff_core::SimTime;
use fff_cyclist::{ForcedToFollow, Kinematics};

use crate::Segment;

/// Outcome of [`evaluate`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Admission {
    /// Enter at `speed` (the desired speed, or lower if forced to follow).
    Admit { speed: f64 },
    /// The cyclist's earliest exit time is still ahead.
    NotYetEligible { until: SimTime },
    /// The segment is at or above capacity.
    Full,
    /// Some space is free but not enough for the cyclist at any positive
    /// speed, and other cyclists hold the rest.
    DoesNotFit,
}

impl Admission {
    pub fn is_admit(&self) -> bool {
        matches!(self, Admission::Admit { .. })
    }
}

/// `true` if `cyclist` is eligible at `now` and its buffer at `speed` fits
/// into the remaining space of `segment`.
pub fn can_admit<C: Kinematics + ?Sized>(
    segment: &Segment,
    cyclist: &C,
    speed:   f64,
    now:     SimTime,
) -> bool {
    cyclist.is_eligible_at(now)
        && !segment.is_full()
        && cyclist.safety_buffer(speed) <= segment.remaining_space()
}

/// Decide whether and at what speed `cyclist` can enter `segment` at `now`.
///
/// The cyclist rides at its desired speed if that buffer fits; otherwise it
/// is forced down to the fastest speed whose buffer fits.  An empty segment
/// always takes the cyclist at its desired speed, even one too short for its
/// buffer, so no segment can refuse everyone forever.
pub fn evaluate<C: ForcedToFollow + ?Sized>(segment: &Segment, cyclist: &C, now: SimTime) -> Admission {
    if !cyclist.is_eligible_at(now) {
        return Admission::NotYetEligible { until: cyclist.earliest_exit() };
    }
    if segment.is_full() {
        return Admission::Full;
    }
    match cyclist.assign_speed(segment.remaining_space()) {
        Some(speed) => Admission::Admit { speed },
        None if segment.occupant_count() == 0 => {
            warn!(
                "{} needs more than the {:.2} m of segment {:?}; admitting it alone",
                cyclist.id(),
                segment.total_lane_length(),
                segment.id(),
            );
            Admission::Admit { speed: cyclist.desired_speed() }
        }
        None => Admission::DoesNotFit,
    }
}
