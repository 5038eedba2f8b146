//! What the tick loop hands to observers: per-tick reports and read-only
//! world snapshots for visualization.

use ps_core::{AgentId, ModelId, Point, Team, Tick, ZoneId};
use ps_fleet::{PoolCounts, TransitEvent};

/// Pool sizes of one model at the end of a tick.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelCounts {
    pub model:  ModelId,
    pub name:   String,
    pub team:   Team,
    pub counts: PoolCounts,
}

/// Everything that happened in one tick.
#[derive(Clone, Debug, Default)]
pub struct TickReport {
    pub tick:       Tick,
    /// World time at the start of the tick.
    pub time:       f64,
    pub counts:     Vec<ModelCounts>,
    /// Travellers that left play this tick, exits first, then detections.
    pub events:     Vec<TransitEvent>,
    pub entries:    usize,
    pub detections: usize,
}

impl TickReport {
    /// Active agents summed over the models of `team`.
    pub fn active(&self, team: Team) -> usize {
        self.counts.iter().filter(|c| c.team == team).map(|c| c.counts.active).sum()
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct AgentView {
    pub id:        AgentId,
    pub model:     ModelId,
    pub team:      Team,
    pub location:  Point,
    pub zone:      Option<ZoneId>,
    pub returning: bool,
    /// Zone colour for a searcher on patrol, the model colour otherwise.
    pub color:     String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ZoneView {
    pub id:       ZoneId,
    pub model:    ModelId,
    pub position: Point,
    pub color:    &'static str,
    pub hull:     Vec<Point>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReceptorView {
    pub location:  Point,
    pub sea_state: u8,
    /// Colour of the owning zone; `None` outside the area.
    pub color:     Option<&'static str>,
}

/// Read-only picture of the world: active agents, zones and the receptor
/// field.
#[derive(Clone, Debug, Default)]
pub struct WorldSnapshot {
    pub tick:      Tick,
    pub time:      f64,
    pub agents:    Vec<AgentView>,
    pub zones:     Vec<ZoneView>,
    pub receptors: Vec<ReceptorView>,
}
