//! Zone seeding and force relaxation.
//!
//! Relaxation is a Jacobi iteration: every zone's next position is computed
//! from a snapshot of all current positions, then all zones move at once.

use ps_core::{Bbox, DistanceMetric, Point, SimRng, ZoneId};
use ps_spatial::OperatingArea;

use crate::zone::{PatrolZone, ZoneSeed};
use crate::{TessellationError, TessellationResult};

/// Floor on the pressure distance; coincident zones would otherwise divide
/// by zero.
pub const MIN_PRESSURE_DISTANCE: f64 = 0.001;

/// Place one zone per seed, sampling the area's bounding box until a point
/// lands strictly inside the operating polygon.
pub fn seed_zones(
    area: &OperatingArea,
    seeds: &[ZoneSeed],
    max_attempts: u32,
    rng: &mut SimRng,
) -> TessellationResult<Vec<PatrolZone>> {
    let bbox = area.bbox();
    seeds
        .iter()
        .enumerate()
        .map(|(i, seed)| {
            let position = sample_inside(area, bbox, max_attempts, rng)?;
            let id = ZoneId(i as u32);
            Ok(PatrolZone::new(id, seed, position))
        })
        .collect()
}

fn sample_inside(area: &OperatingArea, bbox: Bbox, max_attempts: u32, rng: &mut SimRng) -> TessellationResult<Point> {
    for _ in 0..max_attempts {
        let p = Point::new(
            rng.uniform(bbox.min.x, bbox.max.x),
            rng.uniform(bbox.min.y, bbox.max.y),
        );
        if area.contains(p) {
            return Ok(p);
        }
    }
    Err(TessellationError::Seeding { attempts: max_attempts })
}

/// Rescale strengths so they sum to `budget`.
pub fn normalize_strength(zones: &mut [PatrolZone], budget: f64) -> TessellationResult<()> {
    let total: f64 = zones.iter().map(|z| z.strength).sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(TessellationError::NonPositiveStrength(total));
    }
    for z in zones.iter_mut() {
        z.strength = z.strength / total * budget;
    }
    Ok(())
}

/// Candidate position of a zone at `own` (strength `own_strength`) under
/// pressure from a zone at `other`.
///
/// When the combined strength exceeds their distance the zone is pushed
/// directly away from `other`, by `(combined − d) / d` times their
/// separation; otherwise it stays put.  Each axis gets independent jitter in
/// `[-jitter, jitter]` only when pushed.
pub fn pressure(
    own: Point,
    own_strength: f64,
    other: Point,
    other_strength: f64,
    metric: DistanceMetric,
    jitter: f64,
    rng: &mut SimRng,
) -> Point {
    let d = metric.between(own, other).max(MIN_PRESSURE_DISTANCE);
    let combined = own_strength + other_strength;
    if combined > d {
        let push = (combined - d) / d;
        Point::new(
            own.x - (other.x - own.x) * push + rng.jitter(jitter),
            own.y - (other.y - own.y) * push + rng.jitter(jitter),
        )
    } else {
        own
    }
}

/// One relaxation step for every zone.
///
/// The next position of zone `i` is the mean of its pressure candidates
/// against every zone, itself included (which only contributes jitter),
/// clamped into `bounds`.
pub fn relax_step(zones: &mut [PatrolZone], bounds: Bbox, metric: DistanceMetric, jitter: f64, rng: &mut SimRng) {
    let snapshot: Vec<(Point, f64)> = zones.iter().map(|z| (z.position, z.strength)).collect();
    let n = snapshot.len() as f64;

    let next: Vec<Point> = snapshot
        .iter()
        .map(|&(own, own_strength)| {
            let sum = snapshot.iter().fold(Point::ORIGIN, |acc, &(other, other_strength)| {
                acc + pressure(own, own_strength, other, other_strength, metric, jitter, rng)
            });
            bounds.clamp(sum * (1.0 / n))
        })
        .collect();

    for (z, p) in zones.iter_mut().zip(next) {
        z.position = p;
    }
}
