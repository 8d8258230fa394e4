//! `dtn-scenario` — node placements, message injections, and CSV loading.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`injection`] | `InjectionQueue` (`BTreeMap<Tick, Vec<MessageId>>`)          |
//! | [`loader`]    | `NodeSpec`, `load_nodes_csv/reader`, `load_messages_csv/reader` |
//! | [`error`]     | `ScenarioError`, `ScenarioResult<T>`                         |

pub mod error;
pub mod injection;
pub mod loader;


pub use error::{ScenarioError, ScenarioResult};
pub use injection::InjectionQueue;
pub use loader::{NodeSpec, load_messages_csv, load_messages_reader, load_nodes_csv, load_nodes_reader};
