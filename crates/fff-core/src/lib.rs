//! `fff-core` — foundational types for the fast-or-forced-to-follow (FFF)
//! bicycle segment model.
//!
//! This crate is a dependency of every other `fff-*` crate.  It has no
//! `fff-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CyclistId`, `SegmentId`                              |
//! | [`time`]        | `SimTime`, `SimClock`                                 |
//! | [`config`]      | `FffConfig` — width derivation, splitting, stepping   |
//! | [`rng`]         | `CyclistRng` (per-cyclist), `SimRng` (global)         |
//! | [`error`]       | `FffError`, `FffResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::FffConfig;
pub use error::{FffError, FffResult};
pub use ids::{CyclistId, SegmentId};
pub use rng::{CyclistRng, SimRng};
pub use time::{SimClock, SimTime};
