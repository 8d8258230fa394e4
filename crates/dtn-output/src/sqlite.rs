//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `forwards`, `node_snapshots` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{ForwardRow, NodeSnapshotRow, OutputResult, TickSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS forwards (
                 tick        INTEGER NOT NULL,
                 sender      INTEGER NOT NULL,
                 receiver    INTEGER NOT NULL,
                 source      INTEGER NOT NULL,
                 destination INTEGER NOT NULL,
                 seq         INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS node_snapshots (
                 node_id  INTEGER NOT NULL,
                 tick     INTEGER NOT NULL,
                 x        REAL    NOT NULL,
                 y        REAL    NOT NULL,
                 carried  INTEGER NOT NULL,
                 accepted INTEGER NOT NULL,
                 tx       INTEGER NOT NULL,
                 rx       INTEGER NOT NULL,
                 dup      INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick           INTEGER PRIMARY KEY,
                 unix_time_secs INTEGER NOT NULL,
                 injected       INTEGER NOT NULL,
                 encounters     INTEGER NOT NULL,
                 handed         INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_forwards(&mut self, rows: &[ForwardRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO forwards (tick, sender, receiver, source, destination, seq) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.sender,
                    row.receiver,
                    row.source,
                    row.destination,
                    row.seq,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[NodeSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO node_snapshots \
                 (node_id, tick, x, y, carried, accepted, tx, rx, dup) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.node_id,
                    row.tick,
                    row.x,
                    row.y,
                    row.carried,
                    row.accepted,
                    row.tx,
                    row.rx,
                    row.dup,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries (tick, unix_time_secs, injected, encounters, handed) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![row.tick, row.unix_time_secs, row.injected, row.encounters, row.handed],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
