//! The operating area: the polygon agents patrol and travellers cross.

use ps_core::{Bbox, Point, Polygon};

use crate::SpatialResult;

/// Operating polygon plus the reference dimensions used to scale zone
/// strength.
#[derive(Clone, Debug)]
pub struct OperatingArea {
    polygon:         Polygon,
    bbox:            Bbox,
    width:           f64,
    baseline_height: f64,
}

impl OperatingArea {
    /// Trapezoid `baseline_height` tall at `x = 0` that widens by
    /// `angle_deg` above and below on its way to `x = width`.  The bottom-right
    /// corner sits at the origin's `y`, so the whole area has `y ≥ 0`.
    pub fn trapezoid(width: f64, baseline_height: f64, angle_deg: f64) -> SpatialResult<Self> {
        let spread = width * angle_deg.to_radians().tan();
        let total = baseline_height + 2.0 * spread;
        let polygon = Polygon::new(vec![
            Point::new(0.0, spread),
            Point::new(width, 0.0),
            Point::new(width, total),
            Point::new(0.0, spread + baseline_height),
        ])?;
        Ok(Self::with_dimensions(polygon, width, baseline_height))
    }

    /// Arbitrary polygon; reference dimensions are taken from its bounding box.
    pub fn from_polygon(polygon: Polygon) -> Self {
        let bbox = polygon.bbox();
        Self::with_dimensions(polygon, bbox.width(), bbox.height())
    }

    fn with_dimensions(polygon: Polygon, width: f64, baseline_height: f64) -> Self {
        let bbox = polygon.bbox();
        Self { polygon, bbox, width, baseline_height }
    }

    #[inline]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    #[inline]
    pub fn bbox(&self) -> Bbox {
        self.bbox
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn baseline_height(&self) -> f64 {
        self.baseline_height
    }

    /// Height of the bounding box (the wide end of a trapezoid).
    #[inline]
    pub fn total_height(&self) -> f64 {
        self.bbox.height()
    }

    /// Strictly inside the operating polygon.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.polygon.contains(p)
    }

    /// Total zone strength after normalization: `√(width × baseline_height)`.
    #[inline]
    pub fn strength_budget(&self) -> f64 {
        (self.width * self.baseline_height).sqrt()
    }
}
