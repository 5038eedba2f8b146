//! Patrol zone records.

use ps_core::{ModelId, Point, ReceptorId, ZoneId};
use ps_spatial::Route;

/// Colours handed to zones in creation order, wrapping around.
pub const ZONE_PALETTE: [&str; 12] = [
    "tab:blue", "tab:orange", "tab:green", "tab:red", "tab:purple", "tab:brown",
    "tab:pink", "tab:olive", "tab:cyan", "gold", "navy", "teal",
];

/// What a model contributes per zone it mans.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneSeed {
    pub model:        ModelId,
    /// `speed × endurance` before normalization.
    pub raw_strength: f64,
    /// Sensor radius; the sweep route spaces lines `2 × radius` apart.
    pub radius:       f64,
}

/// A capacity-weighted patrol region.
#[derive(Clone, Debug)]
pub struct PatrolZone {
    pub id:        ZoneId,
    pub model:     ModelId,
    pub position:  Point,
    pub strength:  f64,
    pub radius:    f64,
    pub color:     &'static str,
    /// Assigned receptors; the grid still owns them.
    pub receptors: Vec<ReceptorId>,
    pub hull:      Vec<Point>,
    pub coverage:  Route,
}

impl PatrolZone {
    pub fn new(id: ZoneId, seed: &ZoneSeed, position: Point) -> Self {
        Self {
            id,
            model: seed.model,
            position,
            strength: seed.raw_strength,
            radius: seed.radius,
            color: ZONE_PALETTE[id.index() % ZONE_PALETTE.len()],
            receptors: Vec::new(),
            hull: Vec::new(),
            coverage: Route::default(),
        }
    }
}
