//! Spatial-subsystem error type.

use thiserror::Error;

use ps_core::CoreError;

/// Errors produced by `ps-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("point ({x}, {y}) lies outside the receptor grid")]
    OutOfBounds { x: f64, y: f64 },

    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("invalid sea-state transition table: {0}")]
    InvalidTransitions(String),

    #[error("sea state {state} has no row in a {states}-state transition table")]
    UnknownSeaState { state: u8, states: usize },

    #[error("uniform field has {got} values for {expected} receptors")]
    FieldShape { expected: usize, got: usize },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
