//! Fluent builder for constructing a [`Sim`].

use tracing::info;

use ps_config::{ModelSpec, ScenarioConfig, WorldConfig};
use ps_core::{ModelId, SimConfig, SimRng, Tick};
use ps_detection::{DetectionModel, DetectionTables, TableDetection};
use ps_fleet::{concurrent_zones, Fleet};
use ps_spatial::{NoiseParams, OperatingArea, Route, SpatialGrid, TransitionTable};
use ps_tessellation::{tessellate, TessellationParams, ZoneSeed};

use crate::{Sim, SimError, SimResult};

/// Child-stream offsets of the master `SimRng`.
const TESSELLATION_STREAM: u64 = 1;
const SEA_STATE_STREAM: u64 = 2;
const TRANSIT_STREAM: u64 = 3;

/// Fluent builder for [`Sim<D>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, time step, seed, snapshot interval
/// - [`WorldConfig`]: geometry, grid, transit, sea state
/// - the fleet's [`ModelSpec`]s
/// - `D: DetectionModel`
///
/// # Optional inputs
///
/// | Method               | Default                                      |
/// |----------------------|----------------------------------------------|
/// | `.zones(model, n)`   | [`concurrent_zones`] for every searcher model |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::from_scenario(config, scenario)?.build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<D: DetectionModel> {
    config:    SimConfig,
    world:     WorldConfig,
    models:    Vec<ModelSpec>,
    detection: D,
    zones:     Vec<(String, u32)>,
}

impl SimBuilder<TableDetection> {
    /// Builder using the table detection model described by the scenario.
    pub fn from_scenario(config: SimConfig, scenario: ScenarioConfig) -> SimResult<Self> {
        let tables = DetectionTables::from_config(&scenario.world.detection)?;
        Ok(Self::new(config, scenario.world, scenario.models, TableDetection::new(tables)))
    }
}

impl<D: DetectionModel> SimBuilder<D> {
    pub fn new(config: SimConfig, world: WorldConfig, models: Vec<ModelSpec>, detection: D) -> Self {
        Self {
            config,
            world,
            models,
            detection,
            zones: Vec::new(),
        }
    }

    /// Fix the number of zones the named searcher model mans instead of
    /// deriving it from endurance and transit time.
    pub fn zones(mut self, model: impl Into<String>, count: u32) -> Self {
        self.zones.push((model.into(), count));
        self
    }

    /// Lay out the area and grid, tessellate, create the fleet and man every
    /// zone.  The returned [`Sim`] is at tick 0 with one agent on station
    /// per zone.
    pub fn build(self) -> SimResult<Sim<D>> {
        self.world.validate()?;
        if !(self.config.time_delta.is_finite() && self.config.time_delta > 0.0) {
            return Err(SimError::Config(format!("time delta {} must be positive", self.config.time_delta)));
        }
        for (name, _) in &self.zones {
            if !self.models.iter().any(|m| &m.name == name && m.is_searcher()) {
                return Err(SimError::Config(format!("zone count given for unknown searcher model {name:?}")));
            }
        }

        let world = self.world;
        let dt = self.config.time_delta;
        let mut master = SimRng::new(self.config.seed);
        let mut tess_rng = master.child(TESSELLATION_STREAM);
        let sea_rng = master.child(SEA_STATE_STREAM);
        let transit_rng = master.child(TRANSIT_STREAM);

        // ── Geometry ──────────────────────────────────────────────────────
        let area = OperatingArea::trapezoid(world.area.width, world.area.baseline_height, world.area.angle_deg)?;
        let noise = NoiseParams {
            frequency: world.sea_state.noise_frequency,
            octaves: world.sea_state.octaves,
            ..NoiseParams::default()
        };
        let mut grid = SpatialGrid::new(
            &area,
            world.grid.cell_size,
            world.area.border,
            TransitionTable::new(&world.sea_state.transitions)?,
            world.sea_state.initial_state,
            noise,
        )?;

        // ── Zones ─────────────────────────────────────────────────────────
        let mut seeds = Vec::new();
        for (i, spec) in self.models.iter().enumerate().filter(|(_, m)| m.is_searcher()) {
            let count = match self.zones.iter().rev().find(|(name, _)| name == &spec.name) {
                Some(&(_, n)) => n,
                None => concurrent_zones(spec, area.width(), world.base.x)?,
            };
            info!(model = %spec.name, zones = count, "zone plan");
            let seed = ZoneSeed {
                model:        ModelId(i as u16),
                raw_strength: spec.raw_strength(),
                radius:       spec.radius,
            };
            seeds.extend(std::iter::repeat_n(seed, count as usize));
        }

        let params = TessellationParams {
            iterations:    world.tessellation.iterations,
            jitter:        world.tessellation.jitter,
            metric:        world.tessellation.metric()?,
            seed_attempts: world.tessellation.seed_attempts,
        };
        let tessellation = tessellate(&area, &mut grid, &seeds, &params, &mut tess_rng)?;
        let routes: Vec<Route> = tessellation.zones.iter().map(|z| z.coverage.clone()).collect();

        // ── Fleet ─────────────────────────────────────────────────────────
        let exit = world.transit.exit.unwrap_or(world.base);
        let (mut fleet, mut agents, rngs) = Fleet::from_models(&self.models, world.base, exit, self.config.seed);
        fleet.deploy(
            &mut agents,
            tessellation.zones.iter().map(|z| (z.id, z.model)),
            &routes,
            Tick::ZERO,
            dt,
        )?;

        info!(
            agents = agents.len(),
            zones = tessellation.zones.len(),
            receptors = grid.len(),
            "simulation ready"
        );

        Ok(Sim {
            clock: self.config.make_clock(),
            config: self.config,
            world,
            area,
            grid,
            zones: tessellation.zones,
            tessellation_score: tessellation.score,
            routes,
            fleet,
            agents,
            rngs,
            detection: self.detection,
            sea_rng,
            transit_rng,
        })
    }
}
