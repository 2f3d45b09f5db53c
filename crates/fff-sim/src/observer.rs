//! Observer hooks for progress reporting and data collection.

use std::collections::BTreeMap;

use fff_core::{CyclistId, SegmentId, SimTime};

/// Callbacks invoked by [`Corridor::step`][crate::Corridor::step] and
/// [`Corridor::run`][crate::Corridor::run].
///
/// All methods default to no-ops so implementors override only what they
/// need.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl SimObserver for Progress {
///     fn on_step_end(&mut self, now: SimTime, moved: usize) {
///         if moved > 0 {
///             println!("{now}: {moved} cyclists moved");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    fn on_step_start(&mut self, _now: SimTime) {}

    /// `moved` counts segment-to-segment moves, entries and arrivals.
    fn on_step_end(&mut self, _now: SimTime, _moved: usize) {}

    /// `cyclist` entered the first segment.
    fn on_entered(&mut self, _cyclist: CyclistId, _now: SimTime) {}

    /// `cyclist` left the last segment.
    fn on_arrived(&mut self, _cyclist: CyclistId, _now: SimTime) {}

    /// `segment` refused `cyclist`; it will retry at `retry`.
    fn on_deferred(&mut self, _cyclist: CyclistId, _segment: SegmentId, _retry: SimTime) {}

    fn on_sim_end(&mut self, _now: SimTime) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

// ── TravelTimeLog ─────────────────────────────────────────────────────────────

/// Entry and arrival times of one cyclist.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TripRecord {
    pub entered:   Option<SimTime>,
    pub arrived:   Option<SimTime>,
    /// Times the cyclist was refused by some segment.
    pub deferrals: u32,
}

impl TripRecord {
    /// Seconds spent in the corridor, once arrived.
    pub fn travel_time(&self) -> Option<f64> {
        Some(self.arrived? - self.entered?)
    }
}

/// Records a [`TripRecord`] per cyclist.
#[derive(Default, Debug)]
pub struct TravelTimeLog {
    trips: BTreeMap<CyclistId, TripRecord>,
}

impl TravelTimeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trip(&self, cyclist: CyclistId) -> Option<&TripRecord> {
        self.trips.get(&cyclist)
    }

    pub fn travel_time(&self, cyclist: CyclistId) -> Option<f64> {
        self.trip(cyclist)?.travel_time()
    }

    /// Cyclists that arrived, in arrival order (ties by id).
    pub fn arrival_order(&self) -> Vec<CyclistId> {
        let mut arrived: Vec<(SimTime, CyclistId)> = self
            .trips
            .iter()
            .filter_map(|(&id, trip)| trip.arrived.map(|t| (t, id)))
            .collect();
        arrived.sort();
        arrived.into_iter().map(|(_, id)| id).collect()
    }

    pub fn completed(&self) -> usize {
        self.trips.values().filter(|t| t.arrived.is_some()).count()
    }

    pub fn total_deferrals(&self) -> u32 {
        self.trips.values().map(|t| t.deferrals).sum()
    }

    /// Mean travel time over completed trips.
    pub fn mean_travel_time(&self) -> Option<f64> {
        let times: Vec<f64> = self.trips.values().filter_map(TripRecord::travel_time).collect();
        if times.is_empty() {
            None
        } else {
            Some(times.iter().sum::<f64>() / times.len() as f64)
        }
    }
}

impl SimObserver for TravelTimeLog {
    fn on_entered(&mut self, cyclist: CyclistId, now: SimTime) {
        self.trips.entry(cyclist).or_default().entered = Some(now);
    }

    fn on_arrived(&mut self, cyclist: CyclistId, now: SimTime) {
        self.trips.entry(cyclist).or_default().arrived = Some(now);
    }

    fn on_deferred(&mut self, cyclist: CyclistId, _segment: SegmentId, _retry: SimTime) {
        self.trips.entry(cyclist).or_default().deferrals += 1;
    }
}
