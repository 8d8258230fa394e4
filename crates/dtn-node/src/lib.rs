//! `dtn-node` — the per-node carry-only routing state machine.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`store`]      | `MessageStore` — in-hand / pending-merge / delivered buffers    |
//! | [`contact`]    | `ContactTracker` — previous-tick neighbor diff                  |
//! | [`node`]       | `CarryNode`, `NodeCounters`                                     |
//! | [`builder`]    | `NodeBuilder` — validated construction against a `Scheduler`    |
//! | [`population`] | `Population` — proximity query, encounters, forwarding, merge   |
//! | [`monitor`]    | `Monitor` trait, `NoopMonitor`                                  |
//! | [`scheduler`]  | `Scheduler` trait — what the tick driver provides to nodes      |
//! | [`error`]      | `NodeError`, `NodeResult<T>`                                    |
//!
//! # Tick protocol
//!
//! ```text
//! driver:  Population::rebuild_grid          (barrier: all nodes registered)
//!          for id in population:  Population::advance(id)
//!              move → relocate in grid → on_move → encounters → hand off
//!          Population::merge_all             (received copies become visible)
//! ```
//!
//! A copy received during tick `T` sits in the pending-merge buffer and is
//! invisible to forwarding until the merge at the end of `T`, so a message
//! travels at most one hop per tick regardless of node iteration order.
//!
//! # Carry-only policy
//!
//! A node hands a message over only to a *newly met* node that is the
//! message's exact destination.  There is never a relay copy, so each message
//! instance is handed off at most once in a run.

pub mod builder;
pub mod contact;
pub mod error;
pub mod monitor;
pub mod node;
pub mod population;
pub mod scheduler;
pub mod store;


pub use builder::NodeBuilder;
pub use contact::ContactTracker;
pub use error::{NodeError, NodeResult};
pub use monitor::{Monitor, NoopMonitor};
pub use node::{CarryNode, NodeCounters};
pub use population::{DeliveryStats, Forwarded, Population};
pub use scheduler::Scheduler;
pub use store::MessageStore;
