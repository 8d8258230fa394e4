//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `forwards.csv`
//! - `node_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ForwardRow, NodeSnapshotRow, OutputResult, TickSummaryRow};

pub const FORWARD_HEADER: [&str; 6] = ["tick", "sender", "receiver", "source", "destination", "seq"];
pub const SNAPSHOT_HEADER: [&str; 9] =
    ["node_id", "tick", "x", "y", "carried", "accepted", "tx", "rx", "dup"];
pub const SUMMARY_HEADER: [&str; 5] = ["tick", "unix_time_secs", "injected", "encounters", "handed"];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    forwards:  Writer<File>,
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut forwards = Writer::from_path(dir.join("forwards.csv"))?;
        forwards.write_record(FORWARD_HEADER)?;

        let mut snapshots = Writer::from_path(dir.join("node_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self {
            forwards,
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_forwards(&mut self, rows: &[ForwardRow]) -> OutputResult<()> {
        for row in rows {
            self.forwards.write_record(&[
                row.tick.to_string(),
                row.sender.to_string(),
                row.receiver.to_string(),
                row.source.to_string(),
                row.destination.to_string(),
                row.seq.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[NodeSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.node_id.to_string(),
                row.tick.to_string(),
                format!("{:.3}", row.x),
                format!("{:.3}", row.y),
                row.carried.to_string(),
                row.accepted.to_string(),
                row.tx.to_string(),
                row.rx.to_string(),
                row.dup.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.unix_time_secs.to_string(),
            row.injected.to_string(),
            row.encounters.to_string(),
            row.handed.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.forwards.flush()?;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
