//! Simple polygons and axis-aligned bounding boxes.

use crate::error::{CoreError, CoreResult};
use crate::geo::{cross, Point};
use crate::hull::signed_area;

/// Tolerance for on-boundary tests, in world distance units.
pub const BOUNDARY_EPS: f64 = 1e-9;

// ── Bbox ──────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle `[min.x, max.x] × [min.y, max.y]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bbox {
    pub min: Point,
    pub max: Point,
}

impl Bbox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing every point; `None` for an empty slice.
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = *points.first()?;
        let mut b = Bbox::new(first, first);
        for p in &points[1..] {
            b.min.x = b.min.x.min(p.x);
            b.min.y = b.min.y.min(p.y);
            b.max.x = b.max.x.max(p.x);
            b.max.y = b.max.y.max(p.y);
        }
        Some(b)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Clamp `p` into the box.
    #[inline]
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(p.x.clamp(self.min.x, self.max.x), p.y.clamp(self.min.y, self.max.y))
    }

    /// Shrink every side by `d`.  A side that would cross its opposite
    /// collapses onto the midline instead.
    pub fn inset(&self, d: f64) -> Bbox {
        let (x0, x1) = shrink_axis(self.min.x, self.max.x, d);
        let (y0, y1) = shrink_axis(self.min.y, self.max.y, d);
        Bbox::new(Point::new(x0, y0), Point::new(x1, y1))
    }
}

fn shrink_axis(lo: f64, hi: f64, d: f64) -> (f64, f64) {
    if hi - lo >= 2.0 * d {
        (lo + d, hi - d)
    } else {
        let mid = 0.5 * (lo + hi);
        (mid, mid)
    }
}

// ── Polygon ───────────────────────────────────────────────────────────────────

/// A simple polygon given by its vertex ring (no repeated closing vertex).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Wrap a vertex ring.  Needs at least three vertices and non-zero area.
    pub fn new(vertices: Vec<Point>) -> CoreResult<Self> {
        if vertices.len() < 3 {
            return Err(CoreError::Degenerate(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if signed_area(&vertices).abs() <= f64::EPSILON {
            return Err(CoreError::Degenerate("polygon has zero area".into()));
        }
        Ok(Self { vertices })
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn area(&self) -> f64 {
        signed_area(&self.vertices).abs()
    }

    pub fn bbox(&self) -> Bbox {
        // Non-empty by construction.
        Bbox::enclosing(&self.vertices).unwrap_or(Bbox::new(Point::ORIGIN, Point::ORIGIN))
    }

    /// Strict interior test by ray casting.  Points exactly on an edge may
    /// land either way; use [`covers`](Self::covers) when the boundary counts.
    pub fn contains(&self, p: Point) -> bool {
        let mut inside = false;
        let n = self.vertices.len();
        let mut j = n - 1;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[j];
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Interior or on the boundary (within [`BOUNDARY_EPS`]).
    pub fn covers(&self, p: Point) -> bool {
        self.on_boundary(p) || self.contains(p)
    }

    pub fn on_boundary(&self, p: Point) -> bool {
        let n = self.vertices.len();
        (0..n).any(|i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let len = a.euclidean(b);
            if len == 0.0 {
                return a.euclidean(p) <= BOUNDARY_EPS;
            }
            let off_line = cross(a, b, p).abs() / len;
            let within = p.x >= a.x.min(b.x) - BOUNDARY_EPS
                && p.x <= a.x.max(b.x) + BOUNDARY_EPS
                && p.y >= a.y.min(b.y) - BOUNDARY_EPS
                && p.y <= a.y.max(b.y) + BOUNDARY_EPS;
            off_line <= BOUNDARY_EPS && within
        })
    }
}
