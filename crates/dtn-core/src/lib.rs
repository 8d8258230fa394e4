//! `dtn-core` — foundational types for the `dtn_sim` carry-only DTN simulator.
//!
//! This crate is a dependency of every other `dtn-*` crate.  It has no
//! `dtn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `SeqNo`, `MessageId`                        |
//! | [`geo`]         | `Position`, axis-aligned range test                   |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `NodeRng` (per-node), `SimRng` (global)               |
//! | [`error`]       | `DtnError`, `DtnResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{DtnError, DtnResult};
pub use geo::Position;
pub use ids::{MessageId, NodeId, SeqNo};
pub use rng::{NodeRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
