//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `events`, `queue_snapshots`, and `arm_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{ArmSummaryRow, EventRow, OutputResult, QueueSnapshotRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS events (
                 tick       INTEGER NOT NULL,
                 kind       TEXT    NOT NULL,
                 arm        INTEGER NOT NULL,
                 delay_secs INTEGER
             );
             CREATE TABLE IF NOT EXISTS queue_snapshots (
                 tick      INTEGER NOT NULL,
                 arm       INTEGER NOT NULL,
                 queue_len INTEGER NOT NULL,
                 PRIMARY KEY (tick, arm)
             );
             CREATE TABLE IF NOT EXISTS arm_summaries (
                 arm                   INTEGER PRIMARY KEY,
                 arrival_rate_per_hour REAL    NOT NULL,
                 green_secs            INTEGER NOT NULL,
                 mean_delay_secs       REAL    NOT NULL,
                 max_delay_secs        INTEGER NOT NULL,
                 max_queue             INTEGER NOT NULL,
                 served                INTEGER NOT NULL,
                 arrivals              INTEGER NOT NULL,
                 remaining_queue       INTEGER NOT NULL,
                 saturation            REAL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO events (tick, kind, arm, delay_secs) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick as i64,
                    row.kind.as_str(),
                    row.arm,
                    row.delay_secs.map(|d| d as i64),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_queue_snapshot(&mut self, rows: &[QueueSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO queue_snapshots (tick, arm, queue_len) VALUES (?1, ?2, ?3)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.tick as i64, row.arm, row.queue_len as i64])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_arm_summaries(&mut self, rows: &[ArmSummaryRow]) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO arm_summaries \
                 (arm, arrival_rate_per_hour, green_secs, mean_delay_secs, max_delay_secs, \
                  max_queue, served, arrivals, remaining_queue, saturation) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.arm,
                    row.arrival_rate_per_hour,
                    row.green_secs as i64,
                    row.mean_delay_secs,
                    row.max_delay_secs as i64,
                    row.max_queue as i64,
                    row.served as i64,
                    row.arrivals as i64,
                    row.remaining_queue as i64,
                    row.saturation,
                ])?;
            }
        }
        tx.commit()?;
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
