//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AgentSnapshotRow, OutputResult, PoolCountRow, TransitEventRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// Errors surface through [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error]
/// when the writer is driven by the observer.
pub trait OutputWriter {
    /// Write the per-model pool sizes of one tick.
    fn write_pool_counts(&mut self, rows: &[PoolCountRow]) -> OutputResult<()>;

    /// Write the crossings that finished in one tick.
    fn write_transit_events(&mut self, rows: &[TransitEventRow]) -> OutputResult<()>;

    /// Write a batch of agent positions.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
