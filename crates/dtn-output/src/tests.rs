//! Integration tests for dtn-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{ForwardRow, NodeSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(node_id: u32, tick: u64) -> NodeSnapshotRow {
        NodeSnapshotRow {
            node_id,
            tick,
            x:        node_id as f64 * 10.0,
            y:        0.5,
            carried:  1,
            accepted: 0,
            tx:       2,
            rx:       3,
            dup:      0,
        }
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow { tick, unix_time_secs: tick as i64 * 60, injected: 1, encounters: 4, handed: 2 }
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("forwards.csv").exists());
        assert!(dir.path().join("node_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(dir.path().join("forwards.csv")),
            ["tick", "sender", "receiver", "source", "destination", "seq"]
        );
        assert_eq!(
            headers(dir.path().join("node_snapshots.csv")),
            ["node_id", "tick", "x", "y", "carried", "accepted", "tx", "rx", "dup"]
        );
        assert_eq!(
            headers(dir.path().join("tick_summaries.csv")),
            ["tick", "unix_time_secs", "injected", "encounters", "handed"]
        );
    }

    #[test]
    fn csv_snapshot_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(1, 5), snap_row(2, 5)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("node_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[0][1], "5");
        assert_eq!(&rows[1][2], "20.000");
        assert_eq!(&rows[1][3], "0.500");
    }

    #[test]
    fn csv_forward_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_forwards(&[ForwardRow { tick: 3, sender: 1, receiver: 2, source: 1, destination: 2, seq: 9 }])
            .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("forwards.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["3", "1", "2", "1", "2", "9"]);
    }

    #[test]
    fn csv_tick_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "180");
        assert_eq!(&rows[0][4], "2");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
        w.write_forwards(&[]).unwrap();
    }

    #[test]
    fn integration_csv() {
        use dtn_core::{MessageId, NodeId, Position, SeqNo, SimConfig, Tick};
        use dtn_scenario::NodeSpec;
        use dtn_sim::SimBuilder;

        use crate::observer::SimOutputObserver;

        let config = SimConfig {
            start_unix_secs:       1_000,
            tick_duration_secs:    10,
            total_ticks:           6,
            seed:                  1,
            cell_size:             200.0,
            default_range:         50.0,
            output_interval_ticks: 2,
        };
        let spec = |id: u32, x: f64| NodeSpec {
            id:       NodeId(id),
            position: Position::new(x, 0.0),
            range:    None,
            vx:       0.0,
            vy:       0.0,
        };

        let mut sim = SimBuilder::new(config.clone())
            .nodes(vec![spec(1, 0.0), spec(2, 10.0), spec(3, 500.0)])
            .build()
            .unwrap();
        sim.inject(Tick::ZERO, MessageId::new(NodeId(1), NodeId(2), SeqNo(0)));

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &config);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // output_interval = 2 → snapshots at ticks 0, 2, 4 (3 ticks × 3 nodes)
        let mut rdr = csv::Reader::from_path(dir.path().join("node_snapshots.csv")).unwrap();
        let snaps: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(snaps.len(), 9, "expected 9 snapshot rows, got {}", snaps.len());

        let mut rdr = csv::Reader::from_path(dir.path().join("forwards.csv")).unwrap();
        let fwds: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(fwds.len(), 1);
        assert_eq!(fwds[0].iter().collect::<Vec<_>>(), ["0", "1", "2", "1", "2", "0"]);

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let sums: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(sums.len(), 6);
        assert_eq!(&sums[5][1], "1050");
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use crate::row::{ForwardRow, NodeSnapshotRow, TickSummaryRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap(node_id: u32) -> NodeSnapshotRow {
        NodeSnapshotRow {
            node_id,
            tick:     1,
            x:        1.25,
            y:        -3.5,
            carried:  0,
            accepted: 1,
            tx:       0,
            rx:       1,
            dup:      0,
        }
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_snapshot_count_and_reals() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap(1), snap(2), snap(3)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM node_snapshots", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 3);
        let y: f64 = conn
            .query_row("SELECT y FROM node_snapshots WHERE node_id = 2", [], |r| r.get(0))
            .unwrap();
        assert_eq!(y, -3.5);
    }

    #[test]
    fn sqlite_forwards() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_forwards(&[
            ForwardRow { tick: 0, sender: 1, receiver: 2, source: 1, destination: 2, seq: 0 },
            ForwardRow { tick: 4, sender: 3, receiver: 1, source: 3, destination: 1, seq: 7 },
        ])
        .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let seq: i64 = conn
            .query_row("SELECT seq FROM forwards WHERE tick = 4", [], |r| r.get(0))
            .unwrap();
        assert_eq!(seq, 7);
    }

    #[test]
    fn sqlite_tick_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick: 7, unix_time_secs: 70, injected: 1, encounters: 6, handed: 2,
        })
        .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (tick, encounters, handed): (i64, i64, i64) = conn
            .query_row(
                "SELECT tick, encounters, handed FROM tick_summaries WHERE tick = 7",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!((tick, encounters, handed), (7, 6, 2));
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use crate::parquet::ParquetWriter;
    use crate::row::{ForwardRow, NodeSnapshotRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap(node_id: u32) -> NodeSnapshotRow {
        NodeSnapshotRow {
            node_id,
            tick:     2,
            x:        4.0,
            y:        8.0,
            carried:  1,
            accepted: 0,
            tx:       0,
            rx:       0,
            dup:      0,
        }
    }

    #[test]
    fn parquet_files_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("forwards.parquet").exists());
        assert!(dir.path().join("node_snapshots.parquet").exists());
        assert!(dir.path().join("tick_summaries.parquet").exists());
    }

    #[test]
    fn parquet_snapshot_rows_and_schema() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap(1), snap(2)]).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("node_snapshots.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let reader = builder.build().unwrap();

        let total_rows: usize = reader.map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(total_rows, 2);

        let field_names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(field_names, ["node_id", "tick", "x", "y", "carried", "accepted", "tx", "rx", "dup"]);
        assert_eq!(*schema.field_with_name("x").unwrap().data_type(), DataType::Float64);
    }

    #[test]
    fn parquet_forward_rows() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_forwards(&[ForwardRow { tick: 1, sender: 1, receiver: 2, source: 1, destination: 2, seq: 0 }])
            .unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("forwards.parquet")).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file).unwrap().build().unwrap();
        let total_rows: usize = reader.map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(total_rows, 1);
    }

    #[test]
    fn parquet_finish_required() {
        // A writer dropped without finish() leaves no footer behind.
        let dir = tmp();
        {
            let mut w = ParquetWriter::new(dir.path()).unwrap();
            w.write_snapshots(&[snap(1)]).unwrap();
        }

        let file = std::fs::File::open(dir.path().join("node_snapshots.parquet")).unwrap();
        let result = ParquetRecordBatchReaderBuilder::try_new(file);
        assert!(result.is_err(), "file without Parquet footer should fail to open");
    }
}
