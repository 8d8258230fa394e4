//! `dtn-sim` — tick loop orchestrator for the dtn_sim simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Inject    — drain InjectionQueue up to `tick`; originate at source.
//!   ② Register  — rebuild the GridIndex from every node's position.
//!   ③ Advance   — for each node in registration order:
//!                   move → on_move → encounters → hand off to destinations
//!   ④ Merge     — every node folds received copies into its carried set
//!                 (parallel with the `parallel` feature).
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the merge phase on Rayon's thread pool.           |
//! | `fx-hash`  | FxHash buckets in the spatial grid.                    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dtn_core::{MessageId, NodeId, Position, SeqNo, SimConfig, Tick};
//! use dtn_mobility::Stationary;
//! use dtn_node::NodeBuilder;
//! use dtn_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).build()?;
//! let a = sim.spawn(NodeBuilder::new().mobility(Stationary(Position::new(0.0, 0.0))))?;
//! let b = sim.spawn(NodeBuilder::new().mobility(Stationary(Position::new(10.0, 0.0))))?;
//! sim.inject(Tick::ZERO, MessageId::new(a, b, SeqNo(0)));
//! let stats = sim.run(&mut NoopObserver)?;
//! assert_eq!(stats.accepted, 1);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use sim::Sim;
