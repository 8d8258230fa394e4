//! Simulation observer trait for progress reporting and data collection.

use dtn_core::Tick;
use dtn_node::{Monitor, Population};

/// Per-tick totals handed to [`SimObserver::on_tick_end`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:       Tick,
    /// Messages originated from the injection queue this tick.
    pub injected:   usize,
    /// Sum over all nodes of newly met neighbors.
    pub encounters: usize,
    /// Messages handed to their destination.
    pub handed:     usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// Extends [`Monitor`], so the same value also receives every forwarding,
/// status and movement event.  All methods have default no-op
/// implementations.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl Monitor for ProgressPrinter {}
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: {} hand-offs", summary.handed);
///         }
///     }
/// }
/// ```
pub trait SimObserver: Monitor {
    /// Called at the very start of each tick, before injection.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after every node has advanced and merged.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with read-only access to every node.
    fn on_snapshot(&mut self, _tick: Tick, _population: &Population) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl Monitor for NoopObserver {}

impl SimObserver for NoopObserver {}
