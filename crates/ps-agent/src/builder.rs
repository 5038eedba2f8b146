//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use ps_agent::{AgentProfile, AgentStoreBuilder, Role};
//! use ps_core::{ModelId, OperatingDomain, Point, SkillLevel};
//!
//! let cutter = AgentProfile {
//!     model:            ModelId(0),
//!     endurance:        5_000.0,
//!     speed:            20.0,
//!     maintenance_time: 12.0,
//!     role: Role::Searcher { skill: SkillLevel::Basic, domain: OperatingDomain::Surface },
//! };
//!
//! let (store, rngs) = AgentStoreBuilder::new(/*seed=*/ 42)
//!     .with_model(&cutter, Point::new(-100.0, 1500.0), 4)
//!     .build();
//!
//! assert_eq!(store.len(), 4);
//! assert_eq!(rngs.len(),  4);
//! ```

use ps_core::{AgentId, ModelId, Point};

use crate::{Agent, AgentRngs, AgentStore, Role};

/// Per-model constants every agent of that model shares.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentProfile {
    pub model:            ModelId,
    pub endurance:        f64,
    pub speed:            f64,
    pub maintenance_time: f64,
    pub role:             Role,
}

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
///
/// Ids are handed out densely in the order models are added, so each
/// model's agents occupy one contiguous id range.
pub struct AgentStoreBuilder {
    seed:   u64,
    agents: Vec<Agent>,
}

impl AgentStoreBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed, agents: Vec::new() }
    }

    /// Append `quantity` agents of one model, all parked at `base`.
    pub fn with_model(mut self, profile: &AgentProfile, base: Point, quantity: u32) -> Self {
        self.agents.reserve(quantity as usize);
        for _ in 0..quantity {
            let id = AgentId(self.agents.len() as u32);
            self.agents.push(Agent::new(
                id,
                profile.model,
                profile.endurance,
                profile.speed,
                profile.maintenance_time,
                base,
                profile.role,
            ));
        }
        self
    }

    pub fn build(self) -> (AgentStore, AgentRngs) {
        let rngs = AgentRngs::new(self.agents.len(), self.seed);
        (AgentStore::new(self.agents), rngs)
    }
}
