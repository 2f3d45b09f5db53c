//! The `Corridor` struct and its step loop.

use log::{debug, trace};

use fff_core::{CyclistId, FffConfig, SegmentId, SimClock, SimTime};
use fff_cyclist::{Cyclist, Kinematics};
use fff_link::{Admission, OccupancyToken, Segment, evaluate};

use crate::{EntryQueue, SimObserver};

/// Where a cyclist currently is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// Not yet admitted to the first segment.
    Waiting,
    /// Holding space on this segment.
    OnSegment(SegmentId),
    /// Left the last segment.
    Arrived,
}

/// Counts reported when a run finishes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub steps:   u64,
    pub arrived: usize,
    /// Cyclists still holding space on some segment.
    pub en_route: usize,
    pub waiting: usize,
}

/// A chain of segments plus the cyclists travelling along it.
///
/// Create via [`CorridorBuilder`][crate::CorridorBuilder].
pub struct Corridor {
    pub config: FffConfig,

    pub clock: SimClock,

    /// Upstream to downstream.
    pub(crate) segments: Vec<Segment>,

    /// Indexed by `CyclistId`.  Private so that earliest exit times of
    /// residents only change through `Segment::reschedule`.
    pub(crate) cyclists: Vec<Cyclist>,

    pub(crate) tokens:      Vec<Option<OccupancyToken>>,
    pub(crate) locations:   Vec<Location>,
    pub(crate) entry_queue: EntryQueue,
    pub(crate) arrived:     usize,
}

impl Corridor {
    // ── Public API ────────────────────────────────────────────────────────

    /// Step until the clock reaches `config.end_time_secs`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> RunSummary {
        let end = SimTime::from_secs(self.config.end_time_secs);
        while self.clock.now < end {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.now);
        let summary = self.summary();
        debug!(
            "corridor finished at {}: {} arrived, {} en route, {} waiting",
            self.clock.now, summary.arrived, summary.en_route, summary.waiting,
        );
        summary
    }

    /// Run exactly `n` steps from the current time (ignores the end time).
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    /// Process the current time and advance the clock by one step.  Returns
    /// how many cyclists moved.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> usize {
        let now = self.clock.now;
        observer.on_step_start(now);

        self.promote(now);
        let mut moved = 0;
        for i in (0..self.segments.len()).rev() {
            moved += self.release(i, now, observer);
        }
        moved += self.inject(now, observer);

        observer.on_step_end(now, moved);
        self.clock.advance();
        moved
    }

    /// Upstream to downstream.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn cyclists(&self) -> &[Cyclist] {
        &self.cyclists
    }

    pub fn cyclist(&self, id: CyclistId) -> &Cyclist {
        &self.cyclists[id.index()]
    }

    pub fn location(&self, cyclist: CyclistId) -> Location {
        self.locations[cyclist.index()]
    }

    /// `true` once every cyclist has arrived.
    pub fn is_finished(&self) -> bool {
        self.arrived == self.cyclists.len()
    }

    pub fn summary(&self) -> RunSummary {
        let en_route = self
            .locations
            .iter()
            .filter(|l| matches!(l, Location::OnSegment(_)))
            .count();
        RunSummary {
            steps:   self.clock.steps,
            arrived: self.arrived,
            en_route,
            waiting: self.entry_queue.len(),
        }
    }

    // ── Phases ────────────────────────────────────────────────────────────

    /// ① Every segment queues its eligible residents for departure.
    fn promote(&mut self, now: SimTime) {
        #[cfg(debug_assertions)]
        self.check_resident_order();

        #[cfg(not(feature = "parallel"))]
        for segment in &mut self.segments {
            segment.promote_eligible(now);
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.segments.par_iter_mut().for_each(|segment| {
                segment.promote_eligible(now);
            });
        }
    }

    /// ② Drain segment `i`'s departure FIFO until it is empty or its head is
    /// refused downstream.
    fn release<O: SimObserver>(&mut self, i: usize, now: SimTime, observer: &mut O) -> usize {
        let last = self.segments.len() - 1;
        let mut moved = 0;

        while let Some(id) = self.segments[i].first_departure() {
            if i == last {
                self.segments[i].dequeue_departure();
                self.vacate(i, id, now);
                self.locations[id.index()] = Location::Arrived;
                self.arrived += 1;
                observer.on_arrived(id, now);
                moved += 1;
                continue;
            }

            let (upstream, downstream) = self.segments.split_at_mut(i + 1);
            let (up, down) = (&mut upstream[i], &mut downstream[0]);
            let cyclist = &mut self.cyclists[id.index()];

            match evaluate(down, &*cyclist, now) {
                Admission::Admit { speed } => {
                    up.dequeue_departure();
                    let token = self.tokens[id.index()]
                        .take()
                        .unwrap_or_else(|| panic!("{id} departs {} without a token", up.id()));
                    up.leave(token);
                    up.set_last_time_moved(now);

                    cyclist.set_earliest_exit(now + down.length() / speed);
                    self.tokens[id.index()] = Some(down.enter(&*cyclist, speed));
                    self.locations[id.index()] = Location::OnSegment(SegmentId(i as u32 + 1));
                    trace!("{id} {} -> {} at {speed:.2} m/s", up.id(), down.id());
                    moved += 1;
                }
                Admission::NotYetEligible { .. } => break,
                Admission::Full | Admission::DoesNotFit => {
                    let retry = retry_time(down, now, self.config.step_secs);
                    up.reschedule(cyclist, retry);
                    trace!("{id} blocked by {}, retry {retry}", down.id());
                    observer.on_deferred(id, SegmentId(i as u32 + 1), retry);
                    break;
                }
            }
        }
        moved
    }

    /// ③ Admit due cyclists to the first segment.
    fn inject<O: SimObserver>(&mut self, now: SimTime, observer: &mut O) -> usize {
        let mut moved = 0;
        for id in self.entry_queue.pop_due(now) {
            let first = &mut self.segments[0];
            let cyclist = &mut self.cyclists[id.index()];

            match evaluate(first, &*cyclist, now) {
                Admission::Admit { speed } => {
                    cyclist.set_earliest_exit(now + first.length() / speed);
                    self.tokens[id.index()] = Some(first.enter(&*cyclist, speed));
                    self.locations[id.index()] = Location::OnSegment(SegmentId(0));
                    observer.on_entered(id, now);
                    moved += 1;
                }
                Admission::NotYetEligible { until } => self.entry_queue.push(until, id),
                Admission::Full | Admission::DoesNotFit => {
                    let retry = retry_time(first, now, self.config.step_secs);
                    cyclist.set_earliest_exit(retry);
                    self.entry_queue.push(retry, id);
                    observer.on_deferred(id, SegmentId(0), retry);
                }
            }
        }
        moved
    }

    /// Every resident must be ordered under its current earliest exit time.
    #[cfg(debug_assertions)]
    fn check_resident_order(&self) {
        for segment in &self.segments {
            for id in segment.residents() {
                let current = self.cyclists[id.index()].earliest_exit();
                assert_eq!(
                    segment.scheduled_exit(id),
                    Some(current),
                    "{id} on {} was rescheduled outside Segment::reschedule",
                    segment.id(),
                );
            }
        }
    }

    /// Release the space `id` holds on segment `i`.
    fn vacate(&mut self, i: usize, id: CyclistId, now: SimTime) {
        let segment = &mut self.segments[i];
        let token = self.tokens[id.index()]
            .take()
            .unwrap_or_else(|| panic!("{id} leaves {} without a token", segment.id()));
        segment.leave(token);
        segment.set_last_time_moved(now);
    }
}

/// When a refused cyclist should try `segment` again: its next possible
/// release, but never earlier than the next step.
fn retry_time(segment: &Segment, now: SimTime, step_secs: f64) -> SimTime {
    let next_step = now + step_secs;
    segment.wake_up_time().max(next_step)
}
