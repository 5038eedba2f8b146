//! The tessellation pipeline.

use tracing::{debug, info};

use ps_core::{DistanceMetric, SimRng};
use ps_spatial::{OperatingArea, SpatialGrid};

use crate::assign::{assign_receptors, score};
use crate::relax::{normalize_strength, relax_step, seed_zones};
use crate::sweep::build_coverage;
use crate::zone::{PatrolZone, ZoneSeed};
use crate::TessellationResult;

#[derive(Clone, Debug)]
pub struct TessellationParams {
    pub iterations:    u32,
    pub jitter:        f64,
    pub metric:        DistanceMetric,
    pub seed_attempts: u32,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            iterations:    50,
            jitter:        1.0,
            metric:        DistanceMetric::AdjustedManhattan,
            seed_attempts: 10_000,
        }
    }
}

/// Finished zones plus the final share score.
#[derive(Clone, Debug)]
pub struct Tessellation {
    pub zones: Vec<PatrolZone>,
    pub score: f64,
}

/// Seed, normalize, relax, assign, then build hull and route for each zone.
///
/// Receptor zone labels in `grid` reflect the final assignment.  An empty
/// `seeds` slice yields an empty tessellation.
pub fn tessellate(
    area: &OperatingArea,
    grid: &mut SpatialGrid,
    seeds: &[ZoneSeed],
    params: &TessellationParams,
    rng: &mut SimRng,
) -> TessellationResult<Tessellation> {
    if seeds.is_empty() {
        grid.clear_zones();
        return Ok(Tessellation { zones: Vec::new(), score: 0.0 });
    }

    let mut zones = seed_zones(area, seeds, params.seed_attempts, rng)?;
    normalize_strength(&mut zones, area.strength_budget())?;

    let bounds = area.bbox();
    assign_receptors(&mut zones, grid, params.metric);
    for iteration in 0..params.iterations {
        relax_step(&mut zones, bounds, params.metric, params.jitter, rng);
        assign_receptors(&mut zones, grid, params.metric);
        debug!(iteration, score = score(&zones), "relaxation step");
    }
    let final_score = score(&zones);

    for zone in zones.iter_mut() {
        build_coverage(zone, grid)?;
    }

    info!(zones = zones.len(), score = final_score, "patrol tessellation complete");
    Ok(Tessellation { zones, score: final_score })
}
