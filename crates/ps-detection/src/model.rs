//! The `DetectionModel` trait and its implementations.

use tracing::debug;

use ps_agent::{Agent, Role};
use ps_core::{AgentRng, OperatingDomain};
use ps_spatial::SpatialGrid;

use crate::{DetectionError, DetectionResult, DetectionTables};

/// Pluggable detection rule.
///
/// Called once per (searcher, candidate target) pair per tick.  Any
/// randomness must come from `rng`, the searcher's own stream, so that
/// outcomes do not depend on evaluation order or thread count.
pub trait DetectionModel: Send + Sync + 'static {
    /// Distance beyond which `searcher` can never detect anything.  The
    /// detection pass skips targets farther away without calling
    /// [`attempt`](Self::attempt).
    fn reach(&self, searcher: &Agent) -> DetectionResult<f64>;

    /// Does `searcher` detect `target` this tick?
    fn attempt(
        &self,
        searcher: &Agent,
        target:   &Agent,
        grid:     &SpatialGrid,
        rng:      &mut AgentRng,
    ) -> DetectionResult<bool>;
}

// ── Rule helpers ──────────────────────────────────────────────────────────────

/// Surface sensors: a hard range cut-off, boundary included.
#[inline]
pub fn surface_detects(range: f64, distance: f64) -> bool {
    distance <= range
}

/// `1 − exp(−k·h·r·s / d³)` with `d` floored at `min_distance`.
#[inline]
pub fn air_detection_probability(k: f64, h: f64, r: f64, s: f64, distance: f64, min_distance: f64) -> f64 {
    let d = distance.max(min_distance);
    1.0 - (-(k * h * r * s) / d.powi(3)).exp()
}

// ── TableDetection ────────────────────────────────────────────────────────────

/// Range tables for surface sensors, cubic falloff for air sensors.
#[derive(Clone, Debug)]
pub struct TableDetection {
    pub tables: DetectionTables,
}

impl TableDetection {
    pub fn new(tables: DetectionTables) -> Self {
        Self { tables }
    }
}

impl DetectionModel for TableDetection {
    fn reach(&self, searcher: &Agent) -> DetectionResult<f64> {
        match searcher.role {
            Role::Searcher { domain: OperatingDomain::Surface, skill } => self.tables.max_surface_range(skill),
            Role::Searcher { domain: OperatingDomain::Air, .. } => Ok(self.tables.max_air_range),
            Role::Traveller { .. } => Err(DetectionError::NotSearcher(searcher.id)),
        }
    }

    fn attempt(
        &self,
        searcher: &Agent,
        target:   &Agent,
        grid:     &SpatialGrid,
        rng:      &mut AgentRng,
    ) -> DetectionResult<bool> {
        let Role::Searcher { skill, domain } = searcher.role else {
            return Err(DetectionError::NotSearcher(searcher.id));
        };
        let Role::Traveller { air, surface } = target.role else {
            return Err(DetectionError::NotTraveller(target.id));
        };
        let distance = searcher.location.euclidean(target.location);

        match domain {
            OperatingDomain::Surface => {
                let range = self.tables.surface_range(skill, surface)?;
                Ok(surface_detects(range, distance))
            }
            OperatingDomain::Air => {
                if distance > self.tables.max_air_range {
                    return Ok(false);
                }
                let sea_state = grid.sea_state_at(searcher.location)?;
                let p = air_detection_probability(
                    self.tables.air_constant(skill)?,
                    self.tables.sensor_height,
                    self.tables.rcs(air)?,
                    self.tables.attenuation(sea_state),
                    distance,
                    self.tables.min_air_distance,
                );
                debug!(searcher = %searcher.id, target = %target.id, distance, sea_state, p, "air detection probability");
                Ok(rng.unit() < p)
            }
        }
    }
}

// ── NeverDetect ───────────────────────────────────────────────────────────────

/// A [`DetectionModel`] under which travellers always get through.
///
/// Useful for measuring pure transit times or isolating fleet behaviour.
pub struct NeverDetect;

impl DetectionModel for NeverDetect {
    fn reach(&self, _searcher: &Agent) -> DetectionResult<f64> {
        Ok(0.0)
    }

    fn attempt(
        &self,
        _searcher: &Agent,
        _target:   &Agent,
        _grid:     &SpatialGrid,
        _rng:      &mut AgentRng,
    ) -> DetectionResult<bool> {
        Ok(false)
    }
}
