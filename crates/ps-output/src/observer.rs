//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use tracing::warn;

use ps_core::Tick;
use ps_sim::{SimObserver, TickReport, WorldSnapshot};

use crate::row::{AgentSnapshotRow, PoolCountRow, TransitEventRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes pool counts, transit events and agent
/// snapshots to any [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, report: &TickReport) {
        let counts: Vec<PoolCountRow> =
            report.counts.iter().map(|c| PoolCountRow::new(report.tick.0, report.time, c)).collect();
        let result = self.writer.write_pool_counts(&counts);
        self.store_err(result);

        if !report.events.is_empty() {
            let events: Vec<TransitEventRow> = report.events.iter().map(TransitEventRow::from).collect();
            let result = self.writer.write_transit_events(&events);
            self.store_err(result);
        }
    }

    fn on_snapshot(&mut self, snapshot: &WorldSnapshot) {
        let rows: Vec<AgentSnapshotRow> =
            snapshot.agents.iter().map(|a| AgentSnapshotRow::new(snapshot.tick.0, a)).collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
