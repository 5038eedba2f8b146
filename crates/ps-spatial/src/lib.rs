//! `ps-spatial`: the spatial substrate of a patrol simulation.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`area`]    | `OperatingArea` (trapezoid or arbitrary polygon)             |
//! | [`grid`]    | `SpatialGrid`, `Receptor`: O(1) lookup and radius queries    |
//! | [`markov`]  | `TransitionTable` for the per-receptor sea-state chain       |
//! | [`noise`]   | Seeded gradient noise and the normalized field sampler       |
//! | [`route`]   | `Route`: cyclic waypoint ring                                |
//! | [`index`]   | `PositionIndex`: R-tree over agent positions                 |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod area;
pub mod error;
pub mod grid;
pub mod index;
pub mod markov;
pub mod noise;
pub mod route;


pub use area::OperatingArea;
pub use error::{SpatialError, SpatialResult};
pub use grid::{Receptor, SpatialGrid};
pub use index::PositionIndex;
pub use markov::TransitionTable;
pub use noise::{GradientNoise, NoiseParams};
pub use route::Route;
