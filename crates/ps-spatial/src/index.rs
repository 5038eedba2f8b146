//! R-tree over agent positions.
//!
//! Rebuilt once per tick from the post-movement positions of the targets, so
//! each searcher only evaluates candidates within its maximum sensor range
//! instead of every target in the area.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ps_core::{AgentId, Point};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct PositionEntry {
    point: [f64; 2],
    id:    AgentId,
}

impl RTreeObject for PositionEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for PositionEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── PositionIndex ─────────────────────────────────────────────────────────────

pub struct PositionIndex {
    tree: RTree<PositionEntry>,
}

impl PositionIndex {
    /// Bulk-load from `(id, position)` pairs.
    pub fn build(positions: impl IntoIterator<Item = (AgentId, Point)>) -> Self {
        let entries: Vec<PositionEntry> = positions
            .into_iter()
            .map(|(id, p)| PositionEntry { point: [p.x, p.y], id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Ids within Euclidean `radius` of `p` (inclusive), ascending.
    pub fn within(&self, p: Point, radius: f64) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self
            .tree
            .locate_within_distance([p.x, p.y], radius * radius)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}
