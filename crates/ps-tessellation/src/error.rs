use thiserror::Error;

use ps_core::{CoreError, ZoneId};
use ps_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("no zone seed landed inside the operating area after {attempts} attempts")]
    Seeding { attempts: u32 },

    #[error("total zone strength must be positive, got {0}")]
    NonPositiveStrength(f64),

    #[error("zone {zone} boundary: {source}")]
    ZoneHull {
        zone:   ZoneId,
        #[source]
        source: CoreError,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

pub type TessellationResult<T> = Result<T, TessellationError>;
