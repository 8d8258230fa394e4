//! Parquet output backend (feature `parquet`).
//!
//! Creates three files in the configured output directory:
//! - `forwards.parquet`
//! - `node_snapshots.parquet`
//! - `tick_summaries.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, Int64Builder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{ForwardRow, NodeSnapshotRow, OutputResult, TickSummaryRow};

fn forward_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",        DataType::UInt64, false),
        Field::new("sender",      DataType::UInt32, false),
        Field::new("receiver",    DataType::UInt32, false),
        Field::new("source",      DataType::UInt32, false),
        Field::new("destination", DataType::UInt32, false),
        Field::new("seq",         DataType::UInt32, false),
    ]))
}

fn snapshot_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("node_id",  DataType::UInt32,  false),
        Field::new("tick",     DataType::UInt64,  false),
        Field::new("x",        DataType::Float64, false),
        Field::new("y",        DataType::Float64, false),
        Field::new("carried",  DataType::UInt32,  false),
        Field::new("accepted", DataType::UInt32,  false),
        Field::new("tx",       DataType::UInt64,  false),
        Field::new("rx",       DataType::UInt64,  false),
        Field::new("dup",      DataType::UInt64,  false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",           DataType::UInt64, false),
        Field::new("unix_time_secs", DataType::Int64,  false),
        Field::new("injected",       DataType::UInt64, false),
        Field::new("encounters",     DataType::UInt64, false),
        Field::new("handed",         DataType::UInt64, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

fn open(dir: &Path, name: &str, schema: &Arc<Schema>) -> OutputResult<ArrowWriter<File>> {
    let file = File::create(dir.join(name))?;
    Ok(ArrowWriter::try_new(file, Arc::clone(schema), Some(snappy_props()))?)
}

/// Writes simulation output to three Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footers; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    forwards:    Option<ArrowWriter<File>>,
    snapshots:   Option<ArrowWriter<File>>,
    summaries:   Option<ArrowWriter<File>>,
    fwd_schema:  Arc<Schema>,
    snap_schema: Arc<Schema>,
    summ_schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create all three Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let fwd_schema  = forward_schema();
        let snap_schema = snapshot_schema();
        let summ_schema = summary_schema();

        Ok(Self {
            forwards:  Some(open(dir, "forwards.parquet", &fwd_schema)?),
            snapshots: Some(open(dir, "node_snapshots.parquet", &snap_schema)?),
            summaries: Some(open(dir, "tick_summaries.parquet", &summ_schema)?),
            fwd_schema,
            snap_schema,
            summ_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_forwards(&mut self, rows: &[ForwardRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.forwards.as_mut() else {
            return Ok(());
        };

        let mut ticks        = UInt64Builder::new();
        let mut senders      = UInt32Builder::new();
        let mut receivers    = UInt32Builder::new();
        let mut sources      = UInt32Builder::new();
        let mut destinations = UInt32Builder::new();
        let mut seqs         = UInt32Builder::new();

        for row in rows {
            ticks.append_value(row.tick);
            senders.append_value(row.sender);
            receivers.append_value(row.receiver);
            sources.append_value(row.source);
            destinations.append_value(row.destination);
            seqs.append_value(row.seq);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.fwd_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(senders.finish()),
                Arc::new(receivers.finish()),
                Arc::new(sources.finish()),
                Arc::new(destinations.finish()),
                Arc::new(seqs.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[NodeSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.snapshots.as_mut() else {
            return Ok(());
        };

        let mut node_ids = UInt32Builder::new();
        let mut ticks    = UInt64Builder::new();
        let mut xs       = Float64Builder::new();
        let mut ys       = Float64Builder::new();
        let mut carried  = UInt32Builder::new();
        let mut accepted = UInt32Builder::new();
        let mut txs      = UInt64Builder::new();
        let mut rxs      = UInt64Builder::new();
        let mut dups     = UInt64Builder::new();

        for row in rows {
            node_ids.append_value(row.node_id);
            ticks.append_value(row.tick);
            xs.append_value(row.x);
            ys.append_value(row.y);
            carried.append_value(row.carried);
            accepted.append_value(row.accepted);
            txs.append_value(row.tx);
            rxs.append_value(row.rx);
            dups.append_value(row.dup);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.snap_schema),
            vec![
                Arc::new(node_ids.finish()),
                Arc::new(ticks.finish()),
                Arc::new(xs.finish()),
                Arc::new(ys.finish()),
                Arc::new(carried.finish()),
                Arc::new(accepted.finish()),
                Arc::new(txs.finish()),
                Arc::new(rxs.finish()),
                Arc::new(dups.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut ticks      = UInt64Builder::new();
        let mut unix_times = Int64Builder::new();
        let mut injected   = UInt64Builder::new();
        let mut encounters = UInt64Builder::new();
        let mut handed     = UInt64Builder::new();

        ticks.append_value(row.tick);
        unix_times.append_value(row.unix_time_secs);
        injected.append_value(row.injected);
        encounters.append_value(row.encounters);
        handed.append_value(row.handed);

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(unix_times.finish()),
                Arc::new(injected.finish()),
                Arc::new(encounters.finish()),
                Arc::new(handed.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        for slot in [&mut self.forwards, &mut self.snapshots, &mut self.summaries] {
            if let Some(w) = slot.take() {
                w.close()?;
            }
        }
        Ok(())
    }
}
