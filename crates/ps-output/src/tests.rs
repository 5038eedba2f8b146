//! Integration tests for ps-output.

#[cfg(test)]
mod helpers {
    use crate::row::{AgentSnapshotRow, PoolCountRow, TransitEventRow};

    pub fn count_row(tick: u64, model: u16) -> PoolCountRow {
        PoolCountRow {
            tick,
            time: tick as f64 * 0.5,
            model,
            name: format!("model{model}"),
            team: "searcher",
            active: 2,
            inactive: 1,
            maintenance: 1,
        }
    }

    pub fn exit_row(tick: u64, agent_id: u32) -> TransitEventRow {
        TransitEventRow { tick, model: 1, agent_id, detected: false, detected_by: u32::MAX, time_in_system: 17.0 }
    }

    pub fn caught_row(tick: u64, agent_id: u32, by: u32) -> TransitEventRow {
        TransitEventRow { tick, model: 1, agent_id, detected: true, detected_by: by, time_in_system: 4.5 }
    }

    pub fn snap_row(agent_id: u32, tick: u64) -> AgentSnapshotRow {
        AgentSnapshotRow { agent_id, tick, model: 0, x: 12.5, y: -3.0, zone: agent_id, returning: false }
    }
}

#[cfg(test)]
mod rows {
    use ps_core::{AgentId, ModelId, Point, Team, Tick, ZoneId};
    use ps_fleet::{PoolCounts, TransitEvent};
    use ps_sim::{AgentView, ModelCounts};

    use crate::row::{AgentSnapshotRow, PoolCountRow, TransitEventRow};

    #[test]
    fn undetected_exit_uses_sentinel() {
        let e = TransitEvent {
            tick:           Tick(9),
            model:          ModelId(1),
            agent:          AgentId(4),
            detected:       false,
            detected_by:    None,
            time_in_system: 9.0,
        };
        let row = TransitEventRow::from(&e);
        assert_eq!(row.detected_by, u32::MAX);
        assert_eq!(row.agent_id, 4);

        let caught = TransitEvent { detected: true, detected_by: Some(AgentId(2)), ..e };
        assert_eq!(TransitEventRow::from(&caught).detected_by, 2);
    }

    #[test]
    fn counts_and_views_flatten() {
        let c = ModelCounts {
            model:  ModelId(3),
            name:   "cutter".into(),
            team:   Team::Searcher,
            counts: PoolCounts { active: 2, inactive: 3, maintenance: 1 },
        };
        let row = PoolCountRow::new(7, 14.0, &c);
        assert_eq!((row.tick, row.model, row.team), (7, 3, "searcher"));
        assert_eq!((row.active, row.inactive, row.maintenance), (2, 3, 1));

        let v = AgentView {
            id:        AgentId(5),
            model:     ModelId(0),
            team:      Team::Searcher,
            location:  Point::new(1.0, 2.0),
            zone:      Some(ZoneId(1)),
            returning: false,
            color:     "navy".into(),
        };
        let row = AgentSnapshotRow::new(7, &v);
        assert_eq!((row.x, row.y, row.zone), (1.0, 2.0, 1));
        let homing = AgentView { zone: None, returning: true, ..v };
        assert_eq!(AgentSnapshotRow::new(7, &homing).zone, u32::MAX);
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::helpers::{caught_row, count_row, exit_row, snap_row};
    use crate::csv::{CsvWriter, POOL_COUNT_HEADERS, SNAPSHOT_HEADERS, TRANSIT_EVENT_HEADERS};
    use crate::writer::OutputWriter;
    use crate::OutputError;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("pool_counts.csv").exists());
        assert!(dir.path().join("transit_events.csv").exists());
        assert!(dir.path().join("agent_snapshots.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        for (file, want) in [
            ("pool_counts.csv", &POOL_COUNT_HEADERS[..]),
            ("transit_events.csv", &TRANSIT_EVENT_HEADERS[..]),
            ("agent_snapshots.csv", &SNAPSHOT_HEADERS[..]),
        ] {
            let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
            let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
            assert_eq!(headers, want, "{file}");
        }
    }

    #[test]
    fn csv_pool_counts_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_pool_counts(&[count_row(3, 0), count_row(3, 1)]).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "pool_counts.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "3");      // tick
        assert_eq!(&rows[0][1], "1.5");    // time
        assert_eq!(&rows[1][3], "model1"); // name
        assert_eq!(&rows[1][5], "2");      // active
    }

    #[test]
    fn csv_transit_events_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_transit_events(&[exit_row(20, 7), caught_row(20, 8, 1)]).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "transit_events.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][3], "0");
        assert_eq!(&rows[0][4], u32::MAX.to_string().as_str());
        assert_eq!(&rows[1][3], "1");
        assert_eq!(&rows[1][4], "1");
        assert_eq!(&rows[1][5], "4.5");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 0)]).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
        assert_eq!(records(&dir, "agent_snapshots.csv").len(), 1);
    }

    #[test]
    fn csv_write_after_finish_fails() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        let err = w.write_transit_events(&[exit_row(1, 0)]).unwrap_err();
        assert!(matches!(err, OutputError::Finished { table: "transit_events" }));
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_pool_counts(&[]).unwrap();
        w.write_transit_events(&[]).unwrap();
        w.write_snapshots(&[]).unwrap();
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use ps_config::{ModelSpec, RoleSpec, WorldConfig};
    use ps_core::{OperatingDomain, Point, Signature, SimConfig, SkillLevel, Team};
    use ps_detection::NeverDetect;
    use ps_sim::SimBuilder;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;
    use crate::row::{AgentSnapshotRow, PoolCountRow, TransitEventRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    fn world() -> WorldConfig {
        let mut w = WorldConfig::default();
        w.area.width = 400.0;
        w.area.baseline_height = 200.0;
        w.area.angle_deg = 0.0;
        w.area.border = 20.0;
        w.grid.cell_size = 10.0;
        w.base = Point::new(-20.0, 100.0);
        w.tessellation.iterations = 10;
        w.transit.entry_probability = 1.0;
        w.transit.entry_x = 400.0;
        w.transit.entry_y_min = 20.0;
        w.transit.entry_y_max = 180.0;
        w
    }

    fn models() -> Vec<ModelSpec> {
        vec![
            ModelSpec {
                name:             "cutter".into(),
                team:             Team::Searcher,
                radius:           10.0,
                quantity:         4,
                speed:            20.0,
                endurance:        4_000.0,
                maintenance_time: 10.0,
                color:            "steelblue".into(),
                role:             RoleSpec::Searcher { skill: SkillLevel::Basic, domain: OperatingDomain::Surface },
            },
            ModelSpec {
                name:             "smuggler".into(),
                team:             Team::Traveller,
                radius:           0.0,
                quantity:         2,
                speed:            25.0,
                endurance:        f64::INFINITY,
                maintenance_time: 0.0,
                color:            "crimson".into(),
                role:             RoleSpec::Traveller { air: Signature::Small, surface: Signature::Small },
            },
        ]
    }

    #[test]
    fn integration_csv() {
        let config = SimConfig { total_ticks: 30, time_delta: 1.0, seed: 3, snapshot_interval_ticks: 10 };
        let mut sim = SimBuilder::new(config, world(), models(), NeverDetect).build().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // Two models × 30 ticks.
        let mut rdr = csv::Reader::from_path(dir.path().join("pool_counts.csv")).unwrap();
        assert_eq!(rdr.records().count(), 60);

        // Both travellers enter on ticks 0 and 1 and need at least 17 ticks to cross.
        let mut rdr = csv::Reader::from_path(dir.path().join("transit_events.csv")).unwrap();
        let events: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| &e[3] == "0"));

        // Snapshots at ticks 0, 10, 20: two cutters throughout, one traveller
        // at tick 0 and both afterwards.
        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        assert_eq!(rdr.records().count(), 11);
    }

    /// Fails every write and counts the attempts.
    #[derive(Default)]
    struct Broken {
        attempts: usize,
    }

    impl OutputWriter for Broken {
        fn write_pool_counts(&mut self, _rows: &[PoolCountRow]) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other(format!("disk full #{}", self.attempts))))
        }
        fn write_transit_events(&mut self, _rows: &[TransitEventRow]) -> OutputResult<()> {
            Ok(())
        }
        fn write_snapshots(&mut self, _rows: &[AgentSnapshotRow]) -> OutputResult<()> {
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let config = SimConfig { total_ticks: 3, time_delta: 1.0, seed: 3, snapshot_interval_ticks: 0 };
        let mut sim = SimBuilder::new(config, world(), models(), NeverDetect).build().unwrap();
        let mut obs = SimOutputObserver::new(Broken::default());
        sim.run(&mut obs).unwrap();

        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("#1"));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().attempts, 3);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::helpers::{caught_row, count_row, exit_row, snap_row};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn open(dir: &TempDir) -> rusqlite::Connection {
        rusqlite::Connection::open(dir.path().join("output.db")).unwrap()
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_pool_counts() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_pool_counts(&[count_row(1, 0), count_row(1, 1), count_row(2, 0)]).unwrap();
        w.finish().unwrap();

        let count: i64 = open(&dir).query_row("SELECT COUNT(*) FROM pool_counts", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn sqlite_undetected_exit_has_null_searcher() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_transit_events(&[exit_row(5, 3), caught_row(6, 4, 0)]).unwrap();
        w.finish().unwrap();

        let conn = open(&dir);
        let by: Option<i64> = conn
            .query_row("SELECT detected_by FROM transit_events WHERE agent_id = 3", [], |r| r.get(0))
            .unwrap();
        assert_eq!(by, None);
        let (detected, by): (i64, Option<i64>) = conn
            .query_row("SELECT detected, detected_by FROM transit_events WHERE agent_id = 4", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!((detected, by), (1, Some(0)));
    }

    #[test]
    fn sqlite_snapshots() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 4), snap_row(1, 4)]).unwrap();
        w.finish().unwrap();

        let (x, zone): (f64, i64) = open(&dir)
            .query_row("SELECT x, zone FROM agent_snapshots WHERE agent_id = 1", [], |r| Ok((r.get(0)?, r.get(1)?)))
            .unwrap();
        assert_eq!((x, zone), (12.5, 1));
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use arrow::array::Array;
    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::helpers::{caught_row, count_row, exit_row};
    use crate::parquet::ParquetWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn parquet_files_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("pool_counts.parquet").exists());
        assert!(dir.path().join("transit_events.parquet").exists());
        assert!(dir.path().join("agent_snapshots.parquet").exists());
    }

    #[test]
    fn parquet_pool_counts_round_trip() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_pool_counts(&[count_row(0, 0), count_row(0, 1)]).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("pool_counts.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let total_rows: usize = builder.build().unwrap().map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(total_rows, 2);
        assert_eq!(*schema.field_with_name("name").unwrap().data_type(), DataType::Utf8);
    }

    #[test]
    fn parquet_detected_by_is_nullable() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_transit_events(&[exit_row(1, 2), caught_row(1, 3, 0)]).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("transit_events.parquet")).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file).unwrap().build().unwrap();
        let batches: Vec<_> = reader.map(|b| b.unwrap()).collect();
        let by = batches[0].column_by_name("detected_by").unwrap();
        assert_eq!(by.null_count(), 1);
    }

    #[test]
    fn parquet_finish_required() {
        let dir = tmp();
        {
            let mut w = ParquetWriter::new(dir.path()).unwrap();
            w.write_pool_counts(&[count_row(0, 0)]).unwrap();
            // Dropped without finish(): no footer.
        }

        let file = std::fs::File::open(dir.path().join("pool_counts.parquet")).unwrap();
        assert!(ParquetRecordBatchReaderBuilder::try_new(file).is_err());
    }
}
