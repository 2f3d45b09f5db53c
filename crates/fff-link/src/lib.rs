//! `fff-link` — continuous-space bicycle segments.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`lane`]      | `PseudoLane`                                                    |
//! | [`segment`]   | `Segment`, `OccupancyToken`                                     |
//! | [`factory`]   | width → lane count, `split_into_chain`, `PhysicalLink`          |
//! | [`admission`] | `can_admit`, `evaluate`, `Admission`                            |
//! | [`loader`]    | `load_links_csv`, `load_links_reader`                           |
//! | [`error`]     | `LinkError`, `LinkResult<T>`                                    |
//!
//! # Segment model (summary)
//!
//! ```text
//! total_lane_length = Psi * length
//! occupied_space    = Σ buffer(speed_at_entry)   over occupants
//! full             ⇔ occupied_space >= total_lane_length
//! ```
//!
//! Residents are ordered by earliest exit time, not by arrival, so a cyclist
//! that entered later at a higher speed can leave first.  Once popped from
//! that ordering a cyclist waits in a FIFO until the host lets it move
//! downstream; only then is its space released.
//!
//! A segment is passive: it never advances time and never decides whether a
//! downstream segment has room.

pub mod admission;
pub mod error;
pub mod factory;
pub mod lane;
pub mod loader;
pub mod segment;

#[cfg(test)]
mod tests;

pub use admission::{Admission, can_admit, evaluate};
pub use error::{LinkError, LinkResult};
pub use factory::{LaneSpec, PhysicalLink, pseudo_lanes_for_width, split_into_chain};
pub use lane::PseudoLane;
pub use loader::{load_links_csv, load_links_reader};
pub use segment::{OccupancyToken, Segment};
