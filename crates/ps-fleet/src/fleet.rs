//! The fleet: one pool per model, plus the arena they index into.

use ps_agent::{AgentProfile, AgentRngs, AgentStore, AgentStoreBuilder, Role};
use ps_config::{ModelSpec, RoleSpec};
use ps_core::{AgentId, ModelId, Point, Tick, ZoneId};
use ps_spatial::Route;

use crate::{FleetError, FleetPool, FleetResult, PoolCounts};

/// Every model's pool, indexed by `ModelId` (the model's position in the
/// fleet table).
#[derive(Clone, Debug, Default)]
pub struct Fleet {
    pools: Vec<FleetPool>,
}

impl Fleet {
    /// Create agents for every model and put them all in their inactive
    /// lists.  Searchers are based at `base`; travellers use `exit` as their
    /// base, since that is where each crossing ends.
    pub fn from_models(models: &[ModelSpec], base: Point, exit: Point, seed: u64) -> (Fleet, AgentStore, AgentRngs) {
        let mut builder = AgentStoreBuilder::new(seed);
        for (i, spec) in models.iter().enumerate() {
            let profile = AgentProfile {
                model:            ModelId(i as u16),
                endurance:        spec.endurance,
                speed:            spec.speed,
                maintenance_time: spec.maintenance_time,
                role:             role_of(spec.role),
            };
            let home = if spec.is_searcher() { base } else { exit };
            builder = builder.with_model(&profile, home, spec.quantity);
        }
        let (store, rngs) = builder.build();

        let pools = models
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let model = ModelId(i as u16);
                FleetPool::new(model, spec.name.clone(), spec.team, spec.color.clone(), store.of_model(model))
            })
            .collect();
        (Fleet { pools }, store, rngs)
    }

    pub fn pools(&self) -> &[FleetPool] {
        &self.pools
    }

    pub fn pools_mut(&mut self) -> &mut [FleetPool] {
        &mut self.pools
    }

    pub fn pool(&self, model: ModelId) -> FleetResult<&FleetPool> {
        self.pools.get(model.index()).ok_or(FleetError::UnknownModel(model))
    }

    pub fn pool_mut(&mut self, model: ModelId) -> FleetResult<&mut FleetPool> {
        self.pools.get_mut(model.index()).ok_or(FleetError::UnknownModel(model))
    }

    pub fn counts(&self) -> Vec<(ModelId, PoolCounts)> {
        self.pools.iter().map(|p| (p.model, p.counts())).collect()
    }

    pub fn check_conservation(&self) -> FleetResult<()> {
        self.pools.iter().try_for_each(FleetPool::check_conservation)
    }

    /// Active searcher ids across all pools, ascending.
    pub fn active_searchers(&self) -> Vec<AgentId> {
        self.active_where(true)
    }

    /// Active traveller ids across all pools, ascending.
    pub fn active_travellers(&self) -> Vec<AgentId> {
        self.active_where(false)
    }

    fn active_where(&self, searchers: bool) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self
            .pools
            .iter()
            .filter(|p| p.is_searcher() == searchers)
            .flat_map(|p| p.active.iter().copied())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Maintenance timers for every pool.
    pub fn maintenance_phase(&mut self, store: &mut AgentStore, dt: f64) -> FleetResult<()> {
        for pool in &mut self.pools {
            pool.maintenance_phase(store, dt)?;
        }
        Ok(())
    }

    /// Man each `(zone, model)` pair with one agent of that model.
    /// `routes` is indexed by `ZoneId`.
    pub fn deploy(
        &mut self,
        store: &mut AgentStore,
        assignments: impl IntoIterator<Item = (ZoneId, ModelId)>,
        routes: &[Route],
        now: Tick,
        dt: f64,
    ) -> FleetResult<()> {
        for (zone, model) in assignments {
            let route = routes.get(zone.index()).cloned().ok_or(FleetError::UnknownZone(zone))?;
            self.pool_mut(model)?.activate_next(store, Some(zone), route, now, dt)?;
        }
        Ok(())
    }
}

fn role_of(spec: RoleSpec) -> Role {
    match spec {
        RoleSpec::Searcher { skill, domain } => Role::Searcher { skill, domain },
        RoleSpec::Traveller { air, surface } => Role::Traveller { air, surface },
    }
}
