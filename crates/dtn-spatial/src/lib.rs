//! `dtn-spatial` — uniform grid spatial index.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `Cell`, `GridIndex` (cell → node bucket map)                |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | Uses `rustc_hash::FxHashMap` for the bucket map.           |
//! | `serde`   | Derives `Serialize`/`Deserialize` on `Cell`.               |

pub mod error;
pub mod grid;


pub use error::{SpatialError, SpatialResult};
pub use grid::{Cell, GridIndex};
