//! Agent arena: `AgentStore` (records) and `AgentRngs` (per-agent RNG).
//!
//! The two are separate so the detection phase can hold `&AgentStore` for
//! positions while drawing from `&mut AgentRngs`.  Fleet pools refer to
//! agents only by `AgentId`, which is the index into both.

use ps_core::{AgentId, AgentRng, ModelId};

use crate::{Agent, AgentError, AgentResult};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, indexed by `AgentId`.
///
/// `Send` but not `Sync`: each stream is only ever driven by one thread.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Mutable references to the RNGs of a set of agents, in the order given.
    ///
    /// # Precondition (enforced by caller)
    ///
    /// `agents` holds no duplicates.  Ids drawn from one fleet pool satisfy
    /// this because pools are disjoint and never list an id twice.
    ///
    /// # Panics
    ///
    /// If any id is out of range.
    pub fn get_many_mut(&mut self, agents: &[AgentId]) -> Vec<&mut AgentRng> {
        let len = self.inner.len();
        assert!(
            agents.iter().all(|a| a.index() < len),
            "agent id out of range for {len} RNG streams"
        );
        let ptr = self.inner.as_mut_ptr();
        // SAFETY: every id is in bounds (checked above) and unique (caller
        // invariant), so each pointer refers to a distinct element of
        // `self.inner` and no two references overlap.
        agents
            .iter()
            .map(|a| unsafe { &mut *ptr.add(a.index()) })
            .collect()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Owns every agent of every model for the life of the simulation.
///
/// Agents are never removed; pool membership changes instead.
#[derive(Debug, Default)]
pub struct AgentStore {
    agents: Vec<Agent>,
}

impl AgentStore {
    pub(crate) fn new(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())
    }

    /// Like [`get`](Self::get) but an unknown id is an error.
    pub fn agent(&self, id: AgentId) -> AgentResult<&Agent> {
        self.get(id).ok_or(AgentError::UnknownAgent(id))
    }

    pub fn agent_mut(&mut self, id: AgentId) -> AgentResult<&mut Agent> {
        self.get_mut(id).ok_or(AgentError::UnknownAgent(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    /// Iterator over all `AgentId`s in ascending order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.agents.len() as u32).map(AgentId)
    }

    /// Ids of every agent built from `model`, ascending.
    pub fn of_model(&self, model: ModelId) -> Vec<AgentId> {
        self.agents.iter().filter(|a| a.model == model).map(|a| a.id).collect()
    }
}
