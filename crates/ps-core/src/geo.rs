//! Planar point type and distance metrics.
//!
//! `Point` is a plain `Copy` value: assigning it copies the coordinates, so an
//! agent's location can never alias its base or a shared waypoint.  Equality
//! compares coordinates.

use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A position in the operating area, in world distance units.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Construct a point, rejecting NaN or infinite coordinates.
    pub fn finite(x: f64, y: f64) -> CoreResult<Self> {
        if x.is_finite() && y.is_finite() {
            Ok(Self { x, y })
        } else {
            Err(CoreError::NonFinite { x, y })
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Distance to `other` under `metric`.
    #[inline]
    pub fn distance(self, other: Point, metric: DistanceMetric) -> f64 {
        metric.between(self, other)
    }

    /// Straight-line distance; the metric used for movement and detection.
    #[inline]
    pub fn euclidean(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation: `t = 0` is `self`, `t = 1` is `other`.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }

    /// Move toward `target` by at most `step`; lands exactly on `target` when
    /// the remaining gap is no longer than `step`.
    pub fn step_toward(self, target: Point, step: f64) -> Point {
        let gap = self.euclidean(target);
        if gap <= step || gap == 0.0 {
            target
        } else {
            self.lerp(target, step / gap)
        }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Twice the signed area of the triangle `o → a → b`.
///
/// Positive for a counter-clockwise turn, negative for clockwise, zero when
/// the three points are collinear.
#[inline]
pub fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

// ── DistanceMetric ────────────────────────────────────────────────────────────

/// Distance metric used for zone assignment and relaxation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    Manhattan,
    /// `0.5·|dx| + |dy|`: distances along x count half, which stretches
    /// zones along the transit axis.
    AdjustedManhattan,
}

impl DistanceMetric {
    #[inline]
    pub fn between(self, a: Point, b: Point) -> f64 {
        let dx = (b.x - a.x).abs();
        let dy = (b.y - a.y).abs();
        match self {
            DistanceMetric::Euclidean         => dx.hypot(dy),
            DistanceMetric::Manhattan         => dx + dy,
            DistanceMetric::AdjustedManhattan => 0.5 * dx + dy,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DistanceMetric::Euclidean         => "euclidean",
            DistanceMetric::Manhattan         => "manhattan",
            DistanceMetric::AdjustedManhattan => "adj manhattan",
        }
    }
}

impl FromStr for DistanceMetric {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(DistanceMetric::Euclidean),
            "manhattan" => Ok(DistanceMetric::Manhattan),
            "adj manhattan" | "adj_manhattan" | "adjusted_manhattan" => {
                Ok(DistanceMetric::AdjustedManhattan)
            }
            _ => Err(CoreError::UnknownMetric(s.to_owned())),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distance between two points, metric chosen by name.
///
/// Fails for metric names other than `euclidean`, `manhattan` and
/// `adj manhattan`.
pub fn distance(a: Point, b: Point, metric: &str) -> CoreResult<f64> {
    Ok(metric.parse::<DistanceMetric>()?.between(a, b))
}
