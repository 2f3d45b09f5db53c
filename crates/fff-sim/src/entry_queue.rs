//! `EntryQueue` — cyclists waiting at the upstream end of the corridor.
//!
//! Maps a time to the cyclists that want to enter at that time.  Cyclists
//! refused by the first segment are pushed back at their retry time, so the
//! host only looks at the ones that are due instead of polling everyone
//! every step.

use std::collections::BTreeMap;

use fff_core::{CyclistId, SimTime};

/// Time-ordered queue of pending corridor entries.
#[derive(Default, Debug)]
pub struct EntryQueue {
    inner: BTreeMap<SimTime, Vec<CyclistId>>,
    /// Cached total cyclist count for O(1) `len()`.
    total: usize,
}

impl EntryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `cyclist` to try entering at `t`.
    pub fn push(&mut self, t: SimTime, cyclist: CyclistId) {
        self.inner.entry(t).or_default().push(cyclist);
        self.total += 1;
    }

    /// Remove and return every cyclist scheduled at or before `now`, earliest
    /// time first; same-time cyclists keep push order.
    pub fn pop_due(&mut self, now: SimTime) -> Vec<CyclistId> {
        let mut due = Vec::new();
        while let Some(entry) = self.inner.first_entry() {
            if *entry.key() > now {
                break;
            }
            due.extend(entry.remove());
        }
        self.total -= due.len();
        due
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
