//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use dtn_core::{MessageId, SimConfig, Tick};
use dtn_node::{CarryNode, Monitor, Population};
use dtn_sim::{SimObserver, TickSummary};

use crate::row::{ForwardRow, NodeSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that records hand-offs, node snapshots and tick
/// summaries to any [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Hand-offs are buffered during a tick and written in one batch when the
/// tick ends.  Errors from the writer are stored internally because observer
/// methods have no return value.  After `sim.run()` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:             W,
    start_unix_secs:    i64,
    tick_duration_secs: u32,
    current_tick:       Tick,
    forwards:           Vec<ForwardRow>,
    last_error:         Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for wall-clock
    /// conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            start_unix_secs:    config.start_unix_secs,
            tick_duration_secs: config.tick_duration_secs,
            current_tick:       Tick::ZERO,
            forwards:           Vec::new(),
            last_error:         None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn unix_time(&self, tick: Tick) -> i64 {
        self.start_unix_secs + tick.0 as i64 * self.tick_duration_secs as i64
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            tracing::error!(error = %e, "output write failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

fn snapshot_row(node: &CarryNode, tick: Tick) -> NodeSnapshotRow {
    let pos = node.position();
    let counters = node.counters();
    NodeSnapshotRow {
        node_id:  node.id().0,
        tick:     tick.0,
        x:        pos.x,
        y:        pos.y,
        carried:  node.pending_messages().len() as u32,
        accepted: node.accepted_messages().len() as u32,
        tx:       counters.tx,
        rx:       counters.rx,
        dup:      counters.dup,
    }
}

impl<W: OutputWriter> Monitor for SimOutputObserver<W> {
    fn on_forward(&mut self, sender: &CarryNode, receiver: &CarryNode, msg: MessageId) {
        self.forwards.push(ForwardRow {
            tick:        self.current_tick.0,
            sender:      sender.id().0,
            receiver:    receiver.id().0,
            source:      msg.source.0,
            destination: msg.destination.0,
            seq:         msg.seq.0,
        });
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.current_tick = tick;
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        if !self.forwards.is_empty() {
            let rows = std::mem::take(&mut self.forwards);
            let result = self.writer.write_forwards(&rows);
            self.store_err(result);
        }

        let row = TickSummaryRow {
            tick:           tick.0,
            unix_time_secs: self.unix_time(tick),
            injected:       summary.injected as u64,
            encounters:     summary.encounters as u64,
            handed:         summary.handed as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, population: &Population) {
        let rows: Vec<NodeSnapshotRow> = population.iter().map(|n| snapshot_row(n, tick)).collect();
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
