//! Traveller transit: entry, crossing, exit and withdrawal on detection.
//!
//! A traveller's base is the exit point.  It enters already "returning",
//! so its route is the single leg from the entry point to the exit.
//! Arriving there puts it through a (normally zero-length) maintenance stop
//! before it rejoins the inactive list for another crossing.

use tracing::{debug, warn};

use ps_agent::{AgentStore, MoveOutcome};
use ps_core::{AgentId, ModelId, Point, Tick};

use crate::{FleetError, FleetPool, FleetResult};

/// One finished crossing.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitEvent {
    pub tick:           Tick,
    pub model:          ModelId,
    pub agent:          AgentId,
    /// `true` when withdrawn after detection, `false` on reaching the exit.
    pub detected:       bool,
    /// Searcher credited with the detection.
    pub detected_by:    Option<AgentId>,
    /// World time since the traveller entered.
    pub time_in_system: f64,
}

impl FleetPool {
    /// Put the next inactive traveller into the area at `entry`.
    ///
    /// Returns `None`, with a warning, when every traveller of the model is
    /// already in play.
    pub fn enter(&mut self, store: &mut AgentStore, entry: Point, now: Tick) -> FleetResult<Option<AgentId>> {
        let Some(id) = self.inactive.pop() else {
            warn!(model = %self.name, active = self.active.len(), "no inactive traveller; entry skipped");
            return Ok(None);
        };
        let agent = store.agent_mut(id)?;
        agent.location = entry;
        agent.deployed_at = now;
        agent.return_to_base();
        self.active.push(id);
        debug!(model = %self.name, agent = %id, at = %entry, "traveller entered");
        Ok(Some(id))
    }

    /// Move every active traveller; those reaching the exit leave play and
    /// are reported.
    pub fn transit_phase(&mut self, store: &mut AgentStore, now: Tick, dt: f64) -> FleetResult<Vec<TransitEvent>> {
        let mut events = Vec::new();
        let mut arrived = Vec::new();

        for &id in &self.active {
            let agent = store.agent_mut(id)?;
            if agent.move_through_route(dt)? == MoveOutcome::EnteredBase {
                events.push(TransitEvent {
                    tick:           now,
                    model:          self.model,
                    agent:          id,
                    detected:       false,
                    detected_by:    None,
                    time_in_system: now.since(agent.deployed_at) as f64 * dt,
                });
                arrived.push(id);
            }
        }

        self.active.retain(|id| !arrived.contains(id));
        self.maintenance.extend(arrived);
        Ok(events)
    }

    /// Take a detected traveller out of play straight away.
    pub fn withdraw(
        &mut self,
        store: &mut AgentStore,
        id: AgentId,
        searcher: AgentId,
        now: Tick,
        dt: f64,
    ) -> FleetResult<TransitEvent> {
        let Some(pos) = self.active.iter().position(|&a| a == id) else {
            return Err(FleetError::NotActive { agent: id, model: self.name.clone() });
        };
        self.active.remove(pos);

        let agent = store.agent_mut(id)?;
        let time_in_system = now.since(agent.deployed_at) as f64 * dt;
        agent.recall();
        self.inactive.push(id);

        Ok(TransitEvent {
            tick: now,
            model: self.model,
            agent: id,
            detected: true,
            detected_by: Some(searcher),
            time_in_system,
        })
    }
}
