//! `fff-cyclist` — what a segment needs to know about a cyclist.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`kinematics`] | `Kinematics` (segment-facing contract), `ForcedToFollow`     |
//! | [`cyclist`]    | `Cyclist` — affine safety-buffer model                       |
//! | [`sampler`]    | `CyclistSampler` — individualised parameter draws            |
//! | [`error`]      | `CyclistError`, `CyclistResult<T>`                           |
//!
//! # Safety buffer
//!
//! A cyclist riding at speed `v` occupies
//!
//! ```text
//! buffer(v) = theta0 + theta1 * v + length
//! ```
//!
//! metres of pseudolane: an intercept, a speed-proportional headway and the
//! bicycle itself.  A segment's capacity is consumed by these buffers, so a
//! cyclist that cannot fit at its desired speed may still fit at a lower
//! one ("forced to follow").

pub mod cyclist;
pub mod error;
pub mod kinematics;
pub mod sampler;


pub use cyclist::Cyclist;
pub use error::{CyclistError, CyclistResult};
pub use kinematics::{ForcedToFollow, Kinematics};
pub use sampler::CyclistSampler;
