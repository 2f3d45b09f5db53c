//! The `Segment` — occupancy accounting and departure ordering.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;

use fff_core::{CyclistId, SimTime};
use fff_cyclist::Kinematics;

use crate::PseudoLane;

/// Source of per-segment serial numbers, used to tie tokens to the segment
/// that issued them.
static NEXT_SERIAL: AtomicU64 = AtomicU64::new(0);

/// Resident ordering key: earliest exit time, then entry order.
type ExitKey = (SimTime, u64);

// ── OccupancyToken ────────────────────────────────────────────────────────────

/// Proof that a cyclist holds space on a segment.
///
/// Returned by [`Segment::enter`] and consumed by [`Segment::leave`].  The
/// token records the exact buffer that was charged, so release always
/// subtracts the same amount regardless of what the caller believes the
/// cyclist's speed to be.  Not `Clone`: space can be released once.
#[derive(Debug, PartialEq)]
#[must_use = "dropping an OccupancyToken leaks segment space"]
pub struct OccupancyToken {
    segment: u64,
    cyclist: CyclistId,
    speed:   f64,
    buffer:  f64,
}

impl OccupancyToken {
    pub fn cyclist(&self) -> CyclistId {
        self.cyclist
    }

    /// Speed [m/s] assigned at entry.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Space [m] charged at entry.
    pub fn buffer(&self) -> f64 {
        self.buffer
    }
}

// ── Occupant bookkeeping ──────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
enum Place {
    /// In the resident ordering under this key.
    Resident(ExitKey),
    /// Popped from the ordering, not yet queued.
    Popped,
    /// Waiting in the departure FIFO.
    Queued,
    /// Taken off the FIFO by the host; space still held until `leave`.
    Departing,
}

#[derive(Copy, Clone, Debug)]
struct Occupant {
    seq:   u64,
    place: Place,
}

// ── Segment ───────────────────────────────────────────────────────────────────

/// A fixed-length piece of bicycle path made of `Psi` pseudolanes.
///
/// Every occupant (resident, waiting to depart, or departing) holds the
/// buffer it was charged on entry until [`leave`](Self::leave) releases it.
///
/// # Panics
///
/// The mutators panic on caller-contract violations: entering a full
/// segment, entering twice, releasing a token from another segment, or
/// queueing a cyclist that is still resident.
#[derive(Debug)]
pub struct Segment {
    id:                String,
    serial:            u64,
    lanes:             Vec<PseudoLane>,
    total_lane_length: f64,
    occupied_space:    f64,
    residents:         BTreeMap<ExitKey, CyclistId>,
    occupants:         FxHashMap<CyclistId, Occupant>,
    departures:        VecDeque<CyclistId>,
    last_time_moved:   SimTime,
    next_seq:          u64,
}

impl Segment {
    /// Construct from already-validated geometry.  See [`crate::factory`] for
    /// the public constructors.
    pub(crate) fn with_lanes(id: String, psi: u32, length: f64) -> Self {
        let lanes: Vec<PseudoLane> = (0..psi).map(|_| PseudoLane::new(length)).collect();
        let total_lane_length = lanes.iter().map(PseudoLane::length).sum();
        Self {
            id,
            serial: NEXT_SERIAL.fetch_add(1, Ordering::Relaxed),
            lanes,
            total_lane_length,
            occupied_space: 0.0,
            residents: BTreeMap::new(),
            occupants: FxHashMap::default(),
            departures: VecDeque::new(),
            last_time_moved: SimTime::ZERO,
            next_seq: 0,
        }
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Length [m] of the segment (and of each pseudolane).
    pub fn length(&self) -> f64 {
        self.lanes[0].length()
    }

    pub fn number_of_pseudo_lanes(&self) -> usize {
        self.lanes.len()
    }

    /// The `i`-th pseudolane counted from the right (0 = rightmost).
    ///
    /// # Panics
    /// Panics if `i >= number_of_pseudo_lanes()`.
    pub fn pseudo_lane(&self, i: usize) -> &PseudoLane {
        &self.lanes[i]
    }

    /// `Psi * length`: the capacity bound in metres of pseudolane.
    pub fn total_lane_length(&self) -> f64 {
        self.total_lane_length
    }

    /// Capacity in passenger-car equivalents for hosts that count storage in
    /// PCE.
    pub fn storage_capacity(&self, pce_per_cyclist: f64) -> f64 {
        self.total_lane_length * pce_per_cyclist
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    pub fn occupied_space(&self) -> f64 {
        self.occupied_space
    }

    /// Unoccupied pseudolane metres (never negative).
    pub fn remaining_space(&self) -> f64 {
        (self.total_lane_length - self.occupied_space).max(0.0)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupied_space >= self.total_lane_length
    }

    /// Charge `cyclist`'s buffer at `speed` and insert it into the resident
    /// ordering under its current earliest exit time.
    ///
    /// The caller decides admissibility beforehand (see
    /// [`crate::admission`]).
    ///
    /// # Panics
    /// Panics if the segment is full, `speed` is negative or not finite, or
    /// the cyclist already occupies this segment.
    pub fn enter<C: Kinematics + ?Sized>(&mut self, cyclist: &C, speed: f64) -> OccupancyToken {
        let id = cyclist.id();
        assert!(
            !self.is_full(),
            "{id} entered full segment {:?} ({:.2}/{:.2} m)",
            self.id, self.occupied_space, self.total_lane_length,
        );
        assert!(speed.is_finite() && speed >= 0.0, "{id} entered {:?} at speed {speed}", self.id);
        assert!(!self.occupants.contains_key(&id), "{id} entered {:?} twice", self.id);

        let buffer = cyclist.safety_buffer(speed);
        self.occupied_space += buffer;

        let seq = self.next_seq;
        self.next_seq += 1;
        let key = (cyclist.earliest_exit(), seq);
        self.residents.insert(key, id);
        self.occupants.insert(id, Occupant { seq, place: Place::Resident(key) });

        OccupancyToken { segment: self.serial, cyclist: id, speed, buffer }
    }

    /// Release the space held by `token` and forget the cyclist, wherever it
    /// is in the segment (resident ordering, departure FIFO, or departing).
    ///
    /// # Panics
    /// Panics if the token was issued by another segment or the cyclist is no
    /// longer an occupant (e.g. after [`clear`](Self::clear)).
    pub fn leave(&mut self, token: OccupancyToken) -> CyclistId {
        let id = token.cyclist;
        assert_eq!(
            token.segment, self.serial,
            "{id} released a token on {:?} that another segment issued or that predates a clear",
            self.id,
        );
        let occupant = self
            .occupants
            .remove(&id)
            .unwrap_or_else(|| panic!("{id} is not on segment {:?}", self.id));

        match occupant.place {
            Place::Resident(key) => {
                self.residents.remove(&key);
            }
            Place::Queued => self.departures.retain(|&c| c != id),
            Place::Popped | Place::Departing => {}
        }

        if self.occupants.is_empty() {
            // Snap accumulated rounding back to exactly empty.
            self.occupied_space = 0.0;
        } else {
            debug_assert!(
                self.occupied_space - token.buffer > -1e-9,
                "releasing {:.6} m from {:?} would leave {:.6} m occupied",
                token.buffer, self.id, self.occupied_space - token.buffer,
            );
            self.occupied_space = (self.occupied_space - token.buffer).max(0.0);
        }
        id
    }

    // ── Resident ordering ─────────────────────────────────────────────────

    /// The resident with the smallest earliest exit time (ties: first to
    /// enter).  Does not touch occupancy.
    pub fn peek_next_to_leave(&self) -> Option<CyclistId> {
        self.residents.first_key_value().map(|(_, &id)| id)
    }

    /// Remove and return the resident [`peek_next_to_leave`] would return.
    /// Its space stays charged until [`leave`](Self::leave).
    ///
    /// [`peek_next_to_leave`]: Self::peek_next_to_leave
    pub fn pop_next_to_leave(&mut self) -> Option<CyclistId> {
        let (_, id) = self.residents.pop_first()?;
        if let Some(occupant) = self.occupants.get_mut(&id) {
            occupant.place = Place::Popped;
        }
        Some(id)
    }

    /// Earliest exit time of the head resident, i.e. the next moment this
    /// segment could release someone.  Without residents, the last time a
    /// cyclist left.
    pub fn wake_up_time(&self) -> SimTime {
        self.residents
            .first_key_value()
            .map_or(self.last_time_moved, |(&(t, _), _)| t)
    }

    /// The exit time `cyclist` is ordered under, if it is resident here.
    ///
    /// Equals the cyclist's own earliest exit as long as every change to a
    /// resident went through [`reschedule`](Self::reschedule).
    pub fn scheduled_exit(&self, cyclist: CyclistId) -> Option<SimTime> {
        match self.occupants.get(&cyclist)?.place {
            Place::Resident((t, _)) => Some(t),
            _ => None,
        }
    }

    /// Set `cyclist`'s earliest exit time and, if it is resident here,
    /// re-key it in the ordering so the next peek reflects the change.
    ///
    /// Equal times keep resolving by entry order.
    pub fn reschedule<C: Kinematics + ?Sized>(&mut self, cyclist: &mut C, t: SimTime) {
        cyclist.set_earliest_exit(t);
        let id = cyclist.id();
        if let Some(occupant) = self.occupants.get_mut(&id) {
            if let Place::Resident(old) = occupant.place {
                let new = (t, occupant.seq);
                self.residents.remove(&old);
                self.residents.insert(new, id);
                occupant.place = Place::Resident(new);
            }
        }
    }

    /// Pop every resident whose earliest exit time is at or before `now`
    /// onto the departure FIFO, in exit order.  Returns how many moved.
    pub fn promote_eligible(&mut self, now: SimTime) -> usize {
        let mut moved = 0;
        while let Some((&(t, _), _)) = self.residents.first_key_value() {
            if t > now {
                break;
            }
            if let Some(id) = self.pop_next_to_leave() {
                self.queue_for_departure(id);
                moved += 1;
            }
        }
        moved
    }

    // ── Departure FIFO ────────────────────────────────────────────────────

    /// Append a popped cyclist to the departure FIFO.
    ///
    /// # Panics
    /// Panics unless `cyclist` was popped from this segment's ordering and
    /// not queued since.
    pub fn queue_for_departure(&mut self, cyclist: CyclistId) {
        let occupant = self
            .occupants
            .get_mut(&cyclist)
            .unwrap_or_else(|| panic!("{cyclist} queued for departure but is not on {:?}", self.id));
        assert_eq!(
            occupant.place,
            Place::Popped,
            "{cyclist} queued for departure on {:?} without being popped first",
            self.id,
        );
        occupant.place = Place::Queued;
        self.departures.push_back(cyclist);
    }

    /// Oldest cyclist in the departure FIFO without removing it.
    pub fn first_departure(&self) -> Option<CyclistId> {
        self.departures.front().copied()
    }

    /// Take the oldest cyclist off the departure FIFO.  Its space stays
    /// charged until [`leave`](Self::leave).
    pub fn dequeue_departure(&mut self) -> Option<CyclistId> {
        let id = self.departures.pop_front()?;
        if let Some(occupant) = self.occupants.get_mut(&id) {
            occupant.place = Place::Departing;
        }
        Some(id)
    }

    pub fn has_no_departures(&self) -> bool {
        self.departures.is_empty()
    }

    // ── Inspection ────────────────────────────────────────────────────────

    /// Residents in departure order.
    pub fn residents(&self) -> impl Iterator<Item = CyclistId> + '_ {
        self.residents.values().copied()
    }

    pub fn resident_count(&self) -> usize {
        self.residents.len()
    }

    pub fn departure_count(&self) -> usize {
        self.departures.len()
    }

    /// Number of cyclists holding space (residents plus everyone waiting or
    /// departing).
    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    /// `true` if `cyclist` holds space here.
    pub fn contains(&self, cyclist: CyclistId) -> bool {
        self.occupants.contains_key(&cyclist)
    }

    pub fn is_resident(&self, cyclist: CyclistId) -> bool {
        matches!(
            self.occupants.get(&cyclist),
            Some(Occupant { place: Place::Resident(_), .. })
        )
    }

    // ── Host bookkeeping ──────────────────────────────────────────────────

    /// Last time a cyclist crossed the downstream end.
    pub fn last_time_moved(&self) -> SimTime {
        self.last_time_moved
    }

    pub fn set_last_time_moved(&mut self, t: SimTime) {
        self.last_time_moved = t;
    }

    /// Drop every occupant and reset occupancy to zero.  Returns the ids
    /// removed, residents first in departure order.
    ///
    /// Tokens issued before the call can no longer be released here, even
    /// for a cyclist that has entered again since.
    pub fn clear(&mut self) -> Vec<CyclistId> {
        self.serial = NEXT_SERIAL.fetch_add(1, Ordering::Relaxed);
        let mut removed: Vec<CyclistId> = std::mem::take(&mut self.residents).into_values().collect();
        removed.extend(self.departures.drain(..));
        for (id, occupant) in self.occupants.drain() {
            if matches!(occupant.place, Place::Popped | Place::Departing) {
                removed.push(id);
            }
        }
        self.occupied_space = 0.0;
        removed
    }
}
