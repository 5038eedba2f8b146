//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `pool_counts.csv`
//! - `transit_events.csv`
//! - `agent_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputError, OutputResult, PoolCountRow, TransitEventRow};

pub const POOL_COUNT_HEADERS: [&str; 8] =
    ["tick", "time", "model", "name", "team", "active", "inactive", "maintenance"];
pub const TRANSIT_EVENT_HEADERS: [&str; 6] =
    ["tick", "model", "agent_id", "detected", "detected_by", "time_in_system"];
pub const SNAPSHOT_HEADERS: [&str; 7] = ["agent_id", "tick", "model", "x", "y", "zone", "returning"];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    counts:    Writer<File>,
    events:    Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut counts = Writer::from_path(dir.join("pool_counts.csv"))?;
        counts.write_record(POOL_COUNT_HEADERS)?;

        let mut events = Writer::from_path(dir.join("transit_events.csv"))?;
        events.write_record(TRANSIT_EVENT_HEADERS)?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADERS)?;

        Ok(Self {
            counts,
            events,
            snapshots,
            finished: false,
        })
    }
}

impl CsvWriter {
    fn ensure_open(&self, table: &'static str) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished { table });
        }
        Ok(())
    }
}

impl OutputWriter for CsvWriter {
    fn write_pool_counts(&mut self, rows: &[PoolCountRow]) -> OutputResult<()> {
        self.ensure_open("pool_counts")?;
        for row in rows {
            self.counts.write_record(&[
                row.tick.to_string(),
                row.time.to_string(),
                row.model.to_string(),
                row.name.clone(),
                row.team.to_owned(),
                row.active.to_string(),
                row.inactive.to_string(),
                row.maintenance.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_transit_events(&mut self, rows: &[TransitEventRow]) -> OutputResult<()> {
        self.ensure_open("transit_events")?;
        for row in rows {
            self.events.write_record(&[
                row.tick.to_string(),
                row.model.to_string(),
                row.agent_id.to_string(),
                (row.detected as u8).to_string(),
                row.detected_by.to_string(),
                row.time_in_system.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        self.ensure_open("agent_snapshots")?;
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.model.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.zone.to_string(),
                (row.returning as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.counts.flush()?;
        self.events.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
