//! Simulation time model.
//!
//! # Design
//!
//! Time is a real-valued number of simulated seconds since the start of the
//! run, wrapped in [`SimTime`].  Travel times on a segment are
//! `length / speed`, so exits rarely fall on step boundaries; keeping time
//! continuous lets the resident ordering compare exact exit instants.
//!
//! `SimTime` has a total order (via [`f64::total_cmp`]) so it can key a
//! `BTreeMap`.  Constructors reject NaN.
//!
//! The host advances a [`SimClock`] in fixed steps.  The clock is the only
//! source of "now"; nothing in the workspace reads wall-clock time.

use std::cmp::Ordering;
use std::fmt;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation time in seconds.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Wrap `secs`.
    ///
    /// # Panics
    /// Panics if `secs` is NaN.
    #[inline]
    pub fn from_secs(secs: f64) -> SimTime {
        assert!(!secs.is_nan(), "simulation time must not be NaN");
        SimTime(secs)
    }

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime::from_secs(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.2}s", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Fixed-step simulation clock.
///
/// `now` is monotonically non-decreasing; [`advance`](Self::advance) is the
/// only mutator.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Seconds added by each call to `advance`.
    pub step_secs: f64,
    /// The current simulation time.
    pub now: SimTime,
    /// Number of completed steps.
    pub steps: u64,
}

impl SimClock {
    /// Create a clock at `t = 0` advancing `step_secs` per step.
    pub fn new(step_secs: f64) -> Self {
        Self {
            step_secs,
            now: SimTime::ZERO,
            steps: 0,
        }
    }

    /// Advance the clock by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.steps += 1;
        // Multiply rather than accumulate so long runs don't drift.
        self.now = SimTime::from_secs(self.steps as f64 * self.step_secs);
    }

    /// Break elapsed time into (hour, minute, second) components.
    pub fn elapsed_hms(&self) -> (u64, u32, u32) {
        let total = self.now.secs().max(0.0) as u64;
        let hours = total / 3_600;
        let minutes = ((total % 3_600) / 60) as u32;
        let seconds = (total % 60) as u32;
        (hours, minutes, seconds)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.elapsed_hms();
        write!(f, "step {} ({:02}:{:02}:{:02})", self.steps, h, m, s)
    }
}
