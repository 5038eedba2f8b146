//! The `Sim` struct and its tick loop.

use tracing::debug;

use ps_agent::{AgentRngs, AgentStore};
use ps_config::WorldConfig;
use ps_core::{Point, SimClock, SimConfig, SimRng, Tick};
use ps_detection::{detection_pass, DetectionModel};
use ps_fleet::Fleet;
use ps_spatial::{OperatingArea, Route, SpatialGrid};
use ps_tessellation::PatrolZone;

use crate::report::{AgentView, ModelCounts, ReceptorView, ZoneView};
use crate::{SimError, SimObserver, SimResult, TickReport, WorldSnapshot};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each tick runs five phases in a fixed order:
///
/// 1. **Maintenance**: every maintenance timer counts down; finished agents
///    rejoin their inactive list.
/// 2. **Movement**: traveller entries are drawn, then every pool's active
///    agents act.  Searchers check replacement and return thresholds before
///    moving; travellers reaching the exit leave play.
/// 3. **Detection** on post-movement positions.  Detected travellers are
///    withdrawn at once.
/// 4. **Sea state**: one Markov step over the whole receptor field.
/// 5. **Invariants**: pool conservation and maintenance-at-base.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<D: DetectionModel> {
    pub config:             SimConfig,
    pub clock:              SimClock,
    pub world:              WorldConfig,
    pub area:               OperatingArea,
    pub grid:               SpatialGrid,
    pub zones:              Vec<PatrolZone>,
    /// Final share score of the tessellation; zero is a perfect match.
    pub tessellation_score: f64,
    /// Coverage route of each zone, indexed by `ZoneId`.
    pub routes:             Vec<Route>,
    pub fleet:              Fleet,
    pub agents:             AgentStore,
    pub rngs:               AgentRngs,
    pub detection:          D,
    pub(crate) sea_rng:     SimRng,
    pub(crate) transit_rng: SimRng,
}

impl<D: DetectionModel> Sim<D> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Process the current tick and advance the clock, without observers.
    pub fn advance_tick(&mut self) -> SimResult<TickReport> {
        let report = self.process_tick(self.clock.current_tick)?;
        self.clock.advance();
        Ok(report)
    }

    /// Read-only picture of the current state.
    pub fn state(&self) -> WorldSnapshot {
        let pools = self.fleet.pools();
        let agents = pools
            .iter()
            .flat_map(|pool| pool.active.iter().map(move |&id| (pool, id)))
            .filter_map(|(pool, id)| {
                let a = self.agents.get(id)?;
                let color = match a.zone.and_then(|z| self.zones.get(z.index())) {
                    Some(zone) => zone.color.to_string(),
                    None => pool.color.clone(),
                };
                Some(AgentView {
                    id,
                    model: a.model,
                    team: pool.team,
                    location: a.location,
                    zone: a.zone,
                    returning: a.returning,
                    color,
                })
            })
            .collect();

        let zones = self
            .zones
            .iter()
            .map(|z| ZoneView {
                id:       z.id,
                model:    z.model,
                position: z.position,
                color:    z.color,
                hull:     z.hull.clone(),
            })
            .collect();

        let receptors = self
            .grid
            .receptors()
            .iter()
            .map(|r| ReceptorView {
                location:  r.location,
                sea_state: r.sea_state,
                color:     r.zone.and_then(|z| self.zones.get(z.index())).map(|z| z.color),
            })
            .collect();

        WorldSnapshot {
            tick: self.clock.current_tick,
            time: self.clock.elapsed(),
            agents,
            zones,
            receptors,
        }
    }

    /// Pool conservation for every model, and every agent with maintenance
    /// left parked at its base.
    pub fn check_invariants(&self) -> SimResult<()> {
        let tick = self.clock.current_tick.0;
        self.fleet
            .check_conservation()
            .map_err(|e| SimError::Invariant { tick, what: e.to_string() })?;
        for agent in self.agents.iter() {
            agent
                .check_base_invariant()
                .map_err(|e| SimError::Invariant { tick, what: e.to_string() })?;
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let report = self.process_tick(now)?;
        for event in &report.events {
            observer.on_transit_event(event);
        }
        observer.on_tick_end(&report);
        let every = self.config.snapshot_interval_ticks;
        if every > 0 && now.0.is_multiple_of(every) {
            observer.on_snapshot(&self.state());
        }
        self.clock.advance();
        Ok(())
    }

    fn process_tick(&mut self, now: Tick) -> SimResult<TickReport> {
        let dt = self.clock.time_delta;
        let margin = self.world.safety_margin;

        // ── Phase 1: maintenance ──────────────────────────────────────────
        self.fleet.maintenance_phase(&mut self.agents, dt)?;

        // ── Phase 2: entries, then every active agent ─────────────────────
        let transit = &self.world.transit;
        let mut entries = 0;
        for pool in self.fleet.pools_mut().iter_mut().filter(|p| !p.is_searcher()) {
            if self.transit_rng.gen_bool(transit.entry_probability) {
                let y = self.transit_rng.uniform(transit.entry_y_min, transit.entry_y_max);
                if pool.enter(&mut self.agents, Point::new(transit.entry_x, y), now)?.is_some() {
                    entries += 1;
                }
            }
        }

        let mut events = Vec::new();
        for pool in self.fleet.pools_mut() {
            if pool.is_searcher() {
                pool.searcher_phase(&mut self.agents, &self.routes, margin, now, dt)?;
            } else {
                events.extend(pool.transit_phase(&mut self.agents, now, dt)?);
            }
        }

        // ── Phase 3: detection ────────────────────────────────────────────
        let searchers = self.fleet.active_searchers();
        let targets = self.fleet.active_travellers();
        let hits = detection_pass(&self.detection, &self.agents, &mut self.rngs, &self.grid, &searchers, &targets)?;
        for hit in &hits {
            let model = self.agents.agent(hit.target)?.model;
            let event = self.fleet.pool_mut(model)?.withdraw(&mut self.agents, hit.target, hit.searcher, now, dt)?;
            debug!(target = %hit.target, searcher = %hit.searcher, tick = %now, "traveller detected");
            events.push(event);
        }

        // ── Phase 4: sea state ────────────────────────────────────────────
        self.grid.update_sea_state(&mut self.sea_rng)?;

        // ── Phase 5: invariants ───────────────────────────────────────────
        self.check_invariants()?;

        let counts = self
            .fleet
            .pools()
            .iter()
            .map(|p| ModelCounts {
                model:  p.model,
                name:   p.name.clone(),
                team:   p.team,
                counts: p.counts(),
            })
            .collect();

        Ok(TickReport {
            tick: now,
            time: self.clock.elapsed(),
            counts,
            events,
            entries,
            detections: hits.len(),
        })
    }
}
