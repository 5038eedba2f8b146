use thiserror::Error;

use ps_agent::AgentError;
use ps_core::{AgentId, ModelId, ZoneId};

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("no inactive agents available for {model} ({maintenance} in maintenance)")]
    NoInactiveAgents { model: String, maintenance: usize },

    #[error("agent {agent} is not active in pool {model}")]
    NotActive { agent: AgentId, model: String },

    #[error("zone {0} has no coverage route")]
    UnknownZone(ZoneId),

    #[error("unknown model {0}")]
    UnknownModel(ModelId),

    #[error("pool {model} holds {got} agents, expected {expected}")]
    Conservation { model: String, expected: usize, got: usize },

    #[error("model {model} cannot stay on station: uptime {uptime} is not positive")]
    NonPositiveUptime { model: String, uptime: f64 },

    #[error(transparent)]
    Agent(#[from] AgentError),
}

pub type FleetResult<T> = Result<T, FleetError>;
