//! Agent-lifecycle error type.

use thiserror::Error;

use ps_core::{AgentId, Point};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent {agent} movement not converging at {location}; pending route {route:?}")]
    Convergence {
        agent:    AgentId,
        location: Point,
        route:    Vec<Point>,
    },

    #[error("agent {agent} is at {location} with {remaining} maintenance remaining; base is {base}")]
    OutOfBase {
        agent:     AgentId,
        location:  Point,
        base:      Point,
        remaining: f64,
    },

    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),
}

pub type AgentResult<T> = Result<T, AgentError>;
