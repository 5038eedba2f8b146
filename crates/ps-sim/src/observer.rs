//! Simulation observer trait for progress reporting and data collection.

use ps_core::Tick;
use ps_fleet::TransitEvent;

use crate::{TickReport, WorldSnapshot};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: detection counter
///
/// ```rust,ignore
/// struct Caught(usize);
///
/// impl SimObserver for Caught {
///     fn on_transit_event(&mut self, event: &TransitEvent) {
///         if event.detected {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per traveller leaving play, in the order of
    /// [`TickReport::events`].
    fn on_transit_event(&mut self, _event: &TransitEvent) {}

    /// Called at the end of each tick, after the invariant checks.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called every `config.snapshot_interval_ticks` ticks.
    fn on_snapshot(&mut self, _snapshot: &WorldSnapshot) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
