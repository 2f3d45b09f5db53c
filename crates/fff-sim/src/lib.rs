//! `fff-sim` — step loop driving cyclists along a corridor of segments.
//!
//! The segment model in `fff-link` is passive; this crate is a minimal host
//! for it: a single chain of segments (one or more physical links split by
//! the configured maximum length), cyclists injected at the upstream end,
//! and arrivals recorded at the downstream end.
//!
//! # Step loop
//!
//! ```text
//! for each step at time `now`:
//!   ① Promote  — every segment moves residents with earliest exit ≤ now
//!                onto its departure FIFO (parallel with `parallel`).
//!   ② Release  — segments downstream-first: the FIFO head leaves the
//!                corridor (last segment) or enters the next segment at the
//!                speed admission assigns.  A refused head is deferred to the
//!                downstream wake-up time and blocks the FIFO behind it.
//!   ③ Inject   — cyclists whose departure time has come try the first
//!                segment; refused ones are re-queued at a retry time.
//! ```
//!
//! Upstream `leave` always completes before downstream `enter`.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the promotion phase on Rayon's thread pool.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let departures = (0..500).map(|i| SimTime::from_secs(i as f64 * 2.0)).collect();
//! let mut corridor = CorridorBuilder::new(config)
//!     .links(links)
//!     .sampled_cyclists(CyclistSampler::default(), departures)
//!     .build()?;
//! let summary = corridor.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod corridor;
pub mod entry_queue;
pub mod error;
pub mod observer;


pub use builder::CorridorBuilder;
pub use corridor::{Corridor, Location, RunSummary};
pub use entry_queue::EntryQueue;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TravelTimeLog, TripRecord};
