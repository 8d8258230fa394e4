//! `dtn-mobility` — how nodes move across the plane.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`model`]    | `Mobility` trait, `Stationary`                                |
//! | [`area`]     | `Area` — axis-aligned rectangle used to bound movement        |
//! | [`linear`]   | `LinearMobility` — constant velocity, reflecting off an area  |
//! | [`waypoint`] | `RandomWaypoint` — seeded random-waypoint model               |
//! | [`error`]    | `MobilityError`, `MobilityResult<T>`                          |
//!
//! # Movement model
//!
//! Each node owns exactly one boxed [`Mobility`] strategy.  The tick driver
//! calls [`Mobility::move_by`] once per tick with the tick length in seconds;
//! the routing core only ever reads [`Mobility::current_position`].  Models
//! are `Send` so the node population can be handed to worker threads between
//! phases.

pub mod area;
pub mod error;
pub mod linear;
pub mod model;
pub mod waypoint;

#[cfg(test)]
mod tests;

pub use area::Area;
pub use error::{MobilityError, MobilityResult};
pub use linear::LinearMobility;
pub use model::{Mobility, Stationary};
pub use waypoint::RandomWaypoint;
