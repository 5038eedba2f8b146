//! One tick's detection phase.
//!
//! Every active searcher attempts every target within its reach, so each
//! searcher's RNG advances the same way no matter what other searchers see.
//! A target seen by several searchers is credited to the lowest searcher id.

use std::collections::BTreeSet;

use ps_agent::{AgentRngs, AgentStore};
use ps_core::{AgentId, AgentRng};
use ps_spatial::{PositionIndex, SpatialGrid};

use crate::{DetectionModel, DetectionResult};

/// `searcher` saw `target`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Detection {
    pub searcher: AgentId,
    pub target:   AgentId,
}

/// Evaluate `searchers` against `targets` on their current positions.
///
/// Returns at most one detection per target, ordered by searcher id and
/// then target id.
pub fn detection_pass<M: DetectionModel + ?Sized>(
    model:     &M,
    store:     &AgentStore,
    rngs:      &mut AgentRngs,
    grid:      &SpatialGrid,
    searchers: &[AgentId],
    targets:   &[AgentId],
) -> DetectionResult<Vec<Detection>> {
    if searchers.is_empty() || targets.is_empty() {
        return Ok(Vec::new());
    }

    let index = PositionIndex::build(
        targets.iter().filter_map(|&id| store.get(id).map(|a| (id, a.location))),
    );
    let mut order = searchers.to_vec();
    order.sort_unstable();
    order.dedup();

    #[cfg(feature = "parallel")]
    let hits: Vec<Vec<AgentId>> = {
        use rayon::prelude::*;
        let streams = rngs.get_many_mut(&order);
        order
            .par_iter()
            .zip(streams.into_par_iter())
            .map(|(&id, rng)| scan(model, store, grid, &index, id, rng))
            .collect::<DetectionResult<_>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let hits: Vec<Vec<AgentId>> = order
        .iter()
        .map(|&id| scan(model, store, grid, &index, id, rngs.get_mut(id)))
        .collect::<DetectionResult<_>>()?;

    let mut claimed = BTreeSet::new();
    let mut detections = Vec::new();
    for (&searcher, seen) in order.iter().zip(hits) {
        for target in seen {
            if claimed.insert(target) {
                detections.push(Detection { searcher, target });
            }
        }
    }
    Ok(detections)
}

/// Targets one searcher detects, ascending.
fn scan<M: DetectionModel + ?Sized>(
    model:    &M,
    store:    &AgentStore,
    grid:     &SpatialGrid,
    index:    &PositionIndex,
    searcher: AgentId,
    rng:      &mut AgentRng,
) -> DetectionResult<Vec<AgentId>> {
    let s = store.agent(searcher)?;
    let reach = model.reach(s)?;
    let mut seen = Vec::new();
    for id in index.within(s.location, reach) {
        if model.attempt(s, store.agent(id)?, grid, rng)? {
            seen.push(id);
        }
    }
    Ok(seen)
}
