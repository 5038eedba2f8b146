//! Cyclic waypoint routes.
//!
//! The next waypoint is always at the front.  Consuming a waypoint rotates it
//! to the back, so a route can be followed forever and restarts after
//! `len()` consumptions.

use std::collections::VecDeque;

use ps_core::Point;

#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    waypoints: VecDeque<Point>,
}

impl Route {
    pub fn new(waypoints: Vec<Point>) -> Self {
        Self { waypoints: waypoints.into() }
    }

    /// A one-stop route, e.g. straight back to base.
    pub fn single(p: Point) -> Self {
        Self { waypoints: VecDeque::from([p]) }
    }

    #[inline]
    pub fn next_point(&self) -> Option<Point> {
        self.waypoints.front().copied()
    }

    /// Move the head waypoint to the back.
    #[inline]
    pub fn cycle(&mut self) {
        if !self.waypoints.is_empty() {
            self.waypoints.rotate_left(1);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.waypoints.iter()
    }

    pub fn to_vec(&self) -> Vec<Point> {
        self.waypoints.iter().copied().collect()
    }
}
