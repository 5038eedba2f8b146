use thiserror::Error;

use ps_agent::AgentError;
use ps_core::AgentId;
use ps_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("detection configuration error: {0}")]
    Config(String),

    #[error("agent {0} is not a searcher")]
    NotSearcher(AgentId),

    #[error("agent {0} is not a traveller")]
    NotTraveller(AgentId),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

pub type DetectionResult<T> = Result<T, DetectionError>;
