use thiserror::Error;

use ps_agent::AgentError;
use ps_config::ConfigError;
use ps_core::CoreError;
use ps_detection::DetectionError;
use ps_fleet::FleetError;
use ps_spatial::SpatialError;
use ps_tessellation::TessellationError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("invariant violated at tick {tick}: {what}")]
    Invariant { tick: u64, what: String },

    #[error(transparent)]
    Settings(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error("tessellation failed: {0}")]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error(transparent)]
    Detection(#[from] DetectionError),
}

pub type SimResult<T> = Result<T, SimError>;
