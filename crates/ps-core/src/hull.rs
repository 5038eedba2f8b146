//! Convex hull by Graham scan.
//!
//! Collinear points on the boundary are kept: a zero signed area counts as a
//! counter-clockwise turn, so receptor rows lying along a hull edge all stay
//! in the output.  Only strictly clockwise turns are popped.

use std::cmp::Ordering;

use crate::error::{CoreError, CoreResult};
use crate::geo::{cross, Point};

/// Compute the convex hull of `points`, counter-clockwise from the anchor
/// (lowest `y`, ties broken by lowest `x`).
///
/// Fails with [`CoreError::Degenerate`] when fewer than three distinct points
/// are given or every point lies on one line.
pub fn convex_hull(points: &[Point]) -> CoreResult<Vec<Point>> {
    let mut pts: Vec<Point> = points.to_vec();
    if pts.iter().any(|p| !p.is_finite()) {
        return Err(CoreError::Degenerate("hull input contains non-finite points".into()));
    }
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return Err(CoreError::Degenerate(format!(
            "hull needs at least 3 distinct points, got {}",
            pts.len()
        )));
    }

    let anchor_idx = pts
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let anchor = pts.swap_remove(anchor_idx);

    let angle = |p: &Point| (p.y - anchor.y).atan2(p.x - anchor.x);
    let dist = |p: &Point| anchor.euclidean(*p);
    pts.sort_by(|a, b| match angle(a).total_cmp(&angle(b)) {
        Ordering::Equal => dist(a).total_cmp(&dist(b)),
        other => other,
    });

    // Points on the closing edge back to the anchor are visited farthest
    // first so they survive the sweep.
    if let Some(last) = pts.last().copied() {
        let last_angle = angle(&last);
        let split = pts
            .iter()
            .rposition(|p| angle(p) != last_angle)
            .map_or(0, |i| i + 1);
        if split > 0 {
            pts[split..].reverse();
        }
    }

    let mut hull: Vec<Point> = Vec::with_capacity(pts.len() + 1);
    hull.push(anchor);
    for p in pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) < 0.0 {
            hull.pop();
        }
        hull.push(p);
    }

    if hull.len() < 3 || signed_area(&hull).abs() <= f64::EPSILON {
        return Err(CoreError::Degenerate(
            "no valid next turn: all points are collinear".into(),
        ));
    }
    Ok(hull)
}

/// Shoelace signed area of a closed ring (positive when counter-clockwise).
pub fn signed_area(ring: &[Point]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        acc += a.x * b.y - b.x * a.y;
    }
    acc * 0.5
}
