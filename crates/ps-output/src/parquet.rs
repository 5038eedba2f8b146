//! Parquet output backend (feature `parquet`).
//!
//! Creates three files in the configured output directory:
//! - `pool_counts.parquet`
//! - `transit_events.parquet`
//! - `agent_snapshots.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    BooleanBuilder, Float64Builder, StringBuilder, UInt16Builder, UInt32Builder, UInt64Builder,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputError, OutputResult, PoolCountRow, TransitEventRow};

fn count_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",        DataType::UInt64,  false),
        Field::new("time",        DataType::Float64, false),
        Field::new("model",       DataType::UInt16,  false),
        Field::new("name",        DataType::Utf8,    false),
        Field::new("team",        DataType::Utf8,    false),
        Field::new("active",      DataType::UInt32,  false),
        Field::new("inactive",    DataType::UInt32,  false),
        Field::new("maintenance", DataType::UInt32,  false),
    ]))
}

fn event_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",           DataType::UInt64,  false),
        Field::new("model",          DataType::UInt16,  false),
        Field::new("agent_id",       DataType::UInt32,  false),
        Field::new("detected",       DataType::Boolean, false),
        Field::new("detected_by",    DataType::UInt32,  true),
        Field::new("time_in_system", DataType::Float64, false),
    ]))
}

fn snapshot_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("agent_id",  DataType::UInt32,  false),
        Field::new("tick",      DataType::UInt64,  false),
        Field::new("model",     DataType::UInt16,  false),
        Field::new("x",         DataType::Float64, false),
        Field::new("y",         DataType::Float64, false),
        Field::new("zone",      DataType::UInt32,  true),
        Field::new("returning", DataType::Boolean, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

fn open(dir: &Path, file: &str, schema: &Arc<Schema>) -> OutputResult<ArrowWriter<File>> {
    let f = File::create(dir.join(file))?;
    Ok(ArrowWriter::try_new(f, Arc::clone(schema), Some(snappy_props()))?)
}

/// `u32::MAX` sentinels become Arrow nulls.
fn nullable(id: u32) -> Option<u32> {
    (id != u32::MAX).then_some(id)
}

/// Writes simulation output to three Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footers; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    counts:       Option<ArrowWriter<File>>,
    events:       Option<ArrowWriter<File>>,
    snapshots:    Option<ArrowWriter<File>>,
    count_schema: Arc<Schema>,
    event_schema: Arc<Schema>,
    snap_schema:  Arc<Schema>,
}

impl ParquetWriter {
    /// Create the Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let count_schema = count_schema();
        let event_schema = event_schema();
        let snap_schema = snapshot_schema();

        Ok(Self {
            counts: Some(open(dir, "pool_counts.parquet", &count_schema)?),
            events: Some(open(dir, "transit_events.parquet", &event_schema)?),
            snapshots: Some(open(dir, "agent_snapshots.parquet", &snap_schema)?),
            count_schema,
            event_schema,
            snap_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_pool_counts(&mut self, rows: &[PoolCountRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.counts.as_mut() else {
            return Err(OutputError::Finished { table: "pool_counts" });
        };

        let mut ticks       = UInt64Builder::new();
        let mut times       = Float64Builder::new();
        let mut models      = UInt16Builder::new();
        let mut names       = StringBuilder::new();
        let mut teams       = StringBuilder::new();
        let mut active      = UInt32Builder::new();
        let mut inactive    = UInt32Builder::new();
        let mut maintenance = UInt32Builder::new();

        for row in rows {
            ticks.append_value(row.tick);
            times.append_value(row.time);
            models.append_value(row.model);
            names.append_value(&row.name);
            teams.append_value(row.team);
            active.append_value(row.active);
            inactive.append_value(row.inactive);
            maintenance.append_value(row.maintenance);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.count_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(times.finish()),
                Arc::new(models.finish()),
                Arc::new(names.finish()),
                Arc::new(teams.finish()),
                Arc::new(active.finish()),
                Arc::new(inactive.finish()),
                Arc::new(maintenance.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_transit_events(&mut self, rows: &[TransitEventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.events.as_mut() else {
            return Err(OutputError::Finished { table: "transit_events" });
        };

        let mut ticks     = UInt64Builder::new();
        let mut models    = UInt16Builder::new();
        let mut agent_ids = UInt32Builder::new();
        let mut detected  = BooleanBuilder::new();
        let mut by        = UInt32Builder::new();
        let mut times     = Float64Builder::new();

        for row in rows {
            ticks.append_value(row.tick);
            models.append_value(row.model);
            agent_ids.append_value(row.agent_id);
            detected.append_value(row.detected);
            by.append_option(nullable(row.detected_by));
            times.append_value(row.time_in_system);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.event_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(models.finish()),
                Arc::new(agent_ids.finish()),
                Arc::new(detected.finish()),
                Arc::new(by.finish()),
                Arc::new(times.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.snapshots.as_mut() else {
            return Err(OutputError::Finished { table: "agent_snapshots" });
        };

        let mut agent_ids = UInt32Builder::new();
        let mut ticks     = UInt64Builder::new();
        let mut models    = UInt16Builder::new();
        let mut xs        = Float64Builder::new();
        let mut ys        = Float64Builder::new();
        let mut zones     = UInt32Builder::new();
        let mut returning = BooleanBuilder::new();

        for row in rows {
            agent_ids.append_value(row.agent_id);
            ticks.append_value(row.tick);
            models.append_value(row.model);
            xs.append_value(row.x);
            ys.append_value(row.y);
            zones.append_option(nullable(row.zone));
            returning.append_value(row.returning);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.snap_schema),
            vec![
                Arc::new(agent_ids.finish()),
                Arc::new(ticks.finish()),
                Arc::new(models.finish()),
                Arc::new(xs.finish()),
                Arc::new(ys.finish()),
                Arc::new(zones.finish()),
                Arc::new(returning.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        for slot in [&mut self.counts, &mut self.events, &mut self.snapshots] {
            if let Some(w) = slot.take() {
                w.close()?;
            }
        }
        Ok(())
    }
}
