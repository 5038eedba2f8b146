//! Plain data row types written by output backends.

use ps_fleet::TransitEvent;
use ps_sim::{AgentView, ModelCounts};

/// Pool sizes of one model at the end of a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolCountRow {
    pub tick:        u64,
    pub time:        f64,
    pub model:       u16,
    pub name:        String,
    /// `"searcher"` or `"traveller"`.
    pub team:        &'static str,
    pub active:      u32,
    pub inactive:    u32,
    pub maintenance: u32,
}

impl PoolCountRow {
    pub fn new(tick: u64, time: f64, c: &ModelCounts) -> Self {
        Self {
            tick,
            time,
            model:       c.model.0,
            name:        c.name.clone(),
            team:        c.team.as_str(),
            active:      c.counts.active as u32,
            inactive:    c.counts.inactive as u32,
            maintenance: c.counts.maintenance as u32,
        }
    }
}

/// One finished crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitEventRow {
    pub tick:           u64,
    pub model:          u16,
    pub agent_id:       u32,
    pub detected:       bool,
    /// Credited searcher; `u32::MAX` for an undetected exit.
    pub detected_by:    u32,
    pub time_in_system: f64,
}

impl From<&TransitEvent> for TransitEventRow {
    fn from(e: &TransitEvent) -> Self {
        Self {
            tick:           e.tick.0,
            model:          e.model.0,
            agent_id:       e.agent.0,
            detected:       e.detected,
            detected_by:    e.detected_by.map_or(u32::MAX, |id| id.0),
            time_in_system: e.time_in_system,
        }
    }
}

/// Position of one active agent at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:  u32,
    pub tick:      u64,
    pub model:     u16,
    pub x:         f64,
    pub y:         f64,
    /// Patrol zone; `u32::MAX` for travellers and agents heading home.
    pub zone:      u32,
    pub returning: bool,
}

impl AgentSnapshotRow {
    pub fn new(tick: u64, a: &AgentView) -> Self {
        Self {
            agent_id:  a.id.0,
            tick,
            model:     a.model.0,
            x:         a.location.x,
            y:         a.location.y,
            zone:      a.zone.map_or(u32::MAX, |z| z.0),
            returning: a.returning,
        }
    }
}
