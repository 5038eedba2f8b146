//! Strength-weighted receptor assignment and share scoring.

use ps_core::DistanceMetric;
use ps_spatial::SpatialGrid;

use crate::zone::PatrolZone;

/// Give every in-area receptor to the zone minimizing
/// `distance / √strength`.  Receptors outside the area are unassigned.
/// Ties go to the lower zone id.
pub fn assign_receptors(zones: &mut [PatrolZone], grid: &mut SpatialGrid, metric: DistanceMetric) {
    grid.clear_zones();
    for z in zones.iter_mut() {
        z.receptors.clear();
    }
    if zones.is_empty() {
        return;
    }

    let weights: Vec<f64> = zones.iter().map(|z| z.strength.sqrt()).collect();
    let picks: Vec<_> = grid
        .in_zone()
        .map(|r| {
            let mut best = 0;
            let mut best_cost = f64::INFINITY;
            for (i, z) in zones.iter().enumerate() {
                let cost = metric.between(r.location, z.position) / weights[i];
                if cost < best_cost {
                    best = i;
                    best_cost = cost;
                }
            }
            (r.id, best)
        })
        .collect();

    for (rid, zi) in picks {
        zones[zi].receptors.push(rid);
        grid.set_zone(rid, Some(zones[zi].id));
    }
}

/// `Σ |receptor share − strength share|` over zones.  Zero is a perfect
/// capacity match; diagnostic only.
///
/// A zone's receptor share is taken over the receptors assigned to some
/// zone, not over the whole grid.
pub fn score(zones: &[PatrolZone]) -> f64 {
    let assigned: usize = zones.iter().map(|z| z.receptors.len()).sum();
    let strength: f64 = zones.iter().map(|z| z.strength).sum();
    if strength <= 0.0 {
        return 0.0;
    }
    zones
        .iter()
        .map(|z| {
            let share = if assigned == 0 { 0.0 } else { z.receptors.len() as f64 / assigned as f64 };
            (share - z.strength / strength).abs()
        })
        .sum()
}
