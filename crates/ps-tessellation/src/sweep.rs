//! Zone boundaries and boustrophedon coverage routes.

use ps_core::{convex_hull, Bbox, Point, Polygon};
use ps_spatial::{Route, SpatialGrid};

use crate::zone::PatrolZone;
use crate::{TessellationError, TessellationResult};

/// Zig-zag sweep over `hull`.
///
/// Vertical scan lines are laid `2 × radius` apart across the hull's bounding
/// box inset by `radius`, with waypoints every `2 × radius` along each line.
/// Odd lines run downward so consecutive lines join end to end.  Only
/// waypoints covered by the hull survive.
pub fn boustrophedon(hull: &Polygon, radius: f64) -> Vec<Point> {
    let area = hull.bbox().inset(radius);
    let step = 2.0 * radius;
    if !(step > 0.0) {
        return Vec::new();
    }
    let lines = steps_in(&area, step, true);
    let dots = steps_in(&area, step, false);

    let mut path = Vec::with_capacity(lines * dots);
    for line in 0..lines {
        let x = area.min.x + line as f64 * step;
        for k in 0..dots {
            let k = if line % 2 == 0 { k } else { dots - 1 - k };
            let p = Point::new(x, area.min.y + k as f64 * step);
            if hull.covers(p) {
                path.push(p);
            }
        }
    }
    path
}

/// Lattice positions along one axis of `b`, ends included.
fn steps_in(b: &Bbox, step: f64, along_x: bool) -> usize {
    let span = if along_x { b.width() } else { b.height() };
    (span / step).floor() as usize + 1
}

/// Build the zone's hull from its receptor locations and derive its
/// coverage route.  A zone whose sweep keeps fewer than two waypoints
/// patrols its hull vertices instead, so every route has a non-zero lap.
pub fn build_coverage(zone: &mut PatrolZone, grid: &SpatialGrid) -> TessellationResult<()> {
    let points: Vec<Point> = zone
        .receptors
        .iter()
        .filter_map(|&id| grid.receptor(id).map(|r| r.location))
        .collect();
    let hull = convex_hull(&points).map_err(|source| TessellationError::ZoneHull { zone: zone.id, source })?;
    let polygon = Polygon::new(hull.clone()).map_err(|source| TessellationError::ZoneHull { zone: zone.id, source })?;

    let mut path = boustrophedon(&polygon, zone.radius);
    if path.len() < 2 {
        path = hull.clone();
    }
    zone.hull = hull;
    zone.coverage = Route::new(path);
    Ok(())
}
