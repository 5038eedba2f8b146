//! One model's agents, split across three disjoint id lists.

use tracing::debug;

use ps_agent::{AgentStore, MoveOutcome};
use ps_core::{AgentId, ModelId, Team, Tick, ZoneId};
use ps_spatial::Route;

use crate::{FleetError, FleetResult};

/// Pool sizes at one instant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolCounts {
    pub active:      usize,
    pub inactive:    usize,
    pub maintenance: usize,
}

impl PoolCounts {
    #[inline]
    pub fn total(&self) -> usize {
        self.active + self.inactive + self.maintenance
    }
}

/// All agents of one model.
///
/// `inactive` is used as a stack: the next agent to deploy is at the back.
/// A freshly built pool deploys its agents in ascending id order.
#[derive(Clone, Debug)]
pub struct FleetPool {
    pub model:       ModelId,
    pub name:        String,
    pub team:        Team,
    pub color:       String,
    pub inactive:    Vec<AgentId>,
    pub active:      Vec<AgentId>,
    pub maintenance: Vec<AgentId>,
    quantity:        usize,
}

impl FleetPool {
    pub fn new(model: ModelId, name: impl Into<String>, team: Team, color: impl Into<String>, mut ids: Vec<AgentId>) -> Self {
        ids.reverse();
        Self {
            model,
            name: name.into(),
            team,
            color: color.into(),
            quantity: ids.len(),
            inactive: ids,
            active: Vec::new(),
            maintenance: Vec::new(),
        }
    }

    #[inline]
    pub fn quantity(&self) -> usize {
        self.quantity
    }

    #[inline]
    pub fn is_searcher(&self) -> bool {
        self.team == Team::Searcher
    }

    pub fn counts(&self) -> PoolCounts {
        PoolCounts {
            active:      self.active.len(),
            inactive:    self.inactive.len(),
            maintenance: self.maintenance.len(),
        }
    }

    /// The three lists together must still hold every agent of the model.
    pub fn check_conservation(&self) -> FleetResult<()> {
        let got = self.counts().total();
        if got != self.quantity {
            return Err(FleetError::Conservation {
                model:    self.name.clone(),
                expected: self.quantity,
                got,
            });
        }
        Ok(())
    }

    // ── Deployment ────────────────────────────────────────────────────────

    /// Send the next inactive agent out on `route`.  It moves in the same
    /// call.  An empty inactive list is fatal.
    pub fn activate_next(
        &mut self,
        store: &mut AgentStore,
        zone: Option<ZoneId>,
        route: Route,
        now: Tick,
        dt: f64,
    ) -> FleetResult<AgentId> {
        let Some(id) = self.inactive.pop() else {
            return Err(FleetError::NoInactiveAgents {
                model:       self.name.clone(),
                maintenance: self.maintenance.len(),
            });
        };
        let agent = store.agent_mut(id)?;
        agent.deployed_at = now;
        match agent.activate(zone, route, dt)? {
            MoveOutcome::CompletedTurn => self.active.push(id),
            MoveOutcome::EnteredBase => self.maintenance.push(id),
        }
        Ok(id)
    }

    // ── Per-tick phases ───────────────────────────────────────────────────

    /// Advance every maintenance timer; finished agents rejoin `inactive`.
    /// Returns how many came back into service.
    pub fn maintenance_phase(&mut self, store: &mut AgentStore, dt: f64) -> FleetResult<usize> {
        let mut finished = Vec::new();
        for &id in &self.maintenance {
            let agent = store.agent_mut(id)?;
            agent.check_base_invariant()?;
            if agent.update_maintenance(dt) {
                finished.push(id);
            }
        }
        let count = finished.len();
        self.maintenance.retain(|id| !finished.contains(id));
        self.inactive.extend(finished);
        Ok(count)
    }

    /// One tick for every active searcher: replacement and return checks,
    /// then movement.  Arrivals at base move to `maintenance`; requested
    /// replacements are deployed to the caller's zone once the walk ends.
    ///
    /// `routes` is indexed by `ZoneId`.
    pub fn searcher_phase(
        &mut self,
        store: &mut AgentStore,
        routes: &[Route],
        margin: f64,
        now: Tick,
        dt: f64,
    ) -> FleetResult<()> {
        let mut replacements = Vec::new();
        let mut arrived = Vec::new();

        for &id in &self.active {
            let agent = store.agent_mut(id)?;
            if agent.check_if_need_replacement(margin) {
                if let Some(zone) = agent.zone {
                    replacements.push(zone);
                }
            }
            agent.check_if_need_to_return(margin);
            if agent.move_through_route(dt)? == MoveOutcome::EnteredBase {
                agent.check_base_invariant()?;
                arrived.push(id);
            }
        }

        self.active.retain(|id| !arrived.contains(id));
        self.maintenance.extend(arrived);

        for zone in replacements {
            let route = routes.get(zone.index()).cloned().ok_or(FleetError::UnknownZone(zone))?;
            let id = self.activate_next(store, Some(zone), route, now, dt)?;
            debug!(model = %self.name, agent = %id, zone = %zone, "replacement deployed");
        }
        Ok(())
    }
}
