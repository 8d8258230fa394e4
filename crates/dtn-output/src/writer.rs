//! The `OutputWriter` trait implemented by all backend writers.

use crate::{ForwardRow, NodeSnapshotRow, OutputResult, TickSummaryRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// Writers are driven by [`SimOutputObserver`](crate::SimOutputObserver),
/// which stores the first error for retrieval after the run.
pub trait OutputWriter {
    /// Write a batch of hand-off records.
    fn write_forwards(&mut self, rows: &[ForwardRow]) -> OutputResult<()>;

    /// Write a batch of node snapshots.
    fn write_snapshots(&mut self, rows: &[NodeSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
