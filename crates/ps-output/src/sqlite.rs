//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `pool_counts`, `transit_events` and `agent_snapshots`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputError, OutputResult, PoolCountRow, TransitEventRow};

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
             CREATE TABLE IF NOT EXISTS pool_counts (
                 tick        INTEGER NOT NULL,
                 time        REAL    NOT NULL,
                 model       INTEGER NOT NULL,
                 name        TEXT    NOT NULL,
                 team        TEXT    NOT NULL,
                 active      INTEGER NOT NULL,
                 inactive    INTEGER NOT NULL,
                 maintenance INTEGER NOT NULL,
                 PRIMARY KEY (tick, model)
             );
             CREATE TABLE IF NOT EXISTS transit_events (
                 tick           INTEGER NOT NULL,
                 model          INTEGER NOT NULL,
                 agent_id       INTEGER NOT NULL,
                 detected       INTEGER NOT NULL,
                 detected_by    INTEGER,
                 time_in_system REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS agent_snapshots (
                 agent_id  INTEGER NOT NULL,
                 tick      INTEGER NOT NULL,
                 model     INTEGER NOT NULL,
                 x         REAL    NOT NULL,
                 y         REAL    NOT NULL,
                 zone      INTEGER,
                 returning INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl SqliteWriter {
    fn ensure_open(&self, table: &'static str) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished { table });
        }
        Ok(())
    }
}

/// `u32::MAX` sentinels become SQL `NULL`.
fn nullable(id: u32) -> Option<u32> {
    (id != u32::MAX).then_some(id)
}

impl OutputWriter for SqliteWriter {
    fn write_pool_counts(&mut self, rows: &[PoolCountRow]) -> OutputResult<()> {
        self.ensure_open("pool_counts")?;
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO pool_counts \
                 (tick, time, model, name, team, active, inactive, maintenance) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.time,
                    row.model,
                    row.name,
                    row.team,
                    row.active,
                    row.inactive,
                    row.maintenance,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_transit_events(&mut self, rows: &[TransitEventRow]) -> OutputResult<()> {
        self.ensure_open("transit_events")?;
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO transit_events \
                 (tick, model, agent_id, detected, detected_by, time_in_system) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.model,
                    row.agent_id,
                    row.detected as i64,
                    nullable(row.detected_by),
                    row.time_in_system,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        self.ensure_open("agent_snapshots")?;
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots \
                 (agent_id, tick, model, x, y, zone, returning) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.agent_id,
                    row.tick,
                    row.model,
                    row.x,
                    row.y,
                    nullable(row.zone),
                    row.returning as i64,
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
