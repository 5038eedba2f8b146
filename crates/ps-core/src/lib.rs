//! `ps-core`: foundational types for the `patrol_sim` workspace.
//!
//! Every other `ps-*` crate depends on this one.  It has no `ps-*`
//! dependencies and only `rand` + `thiserror` externally (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `ZoneId`, `ReceptorId`, `ModelId`              |
//! | [`geo`]         | `Point`, `DistanceMetric`, signed-area helper             |
//! | [`hull`]        | Graham-scan `convex_hull`                                 |
//! | [`polygon`]     | `Polygon` (contains / covers / area), `Bbox`              |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                           |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)                 |
//! | [`role`]        | `Team`, `OperatingDomain`, `SkillLevel`, `Signature`      |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod hull;
pub mod ids;
pub mod polygon;
pub mod rng;
pub mod role;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{DistanceMetric, Point};
pub use hull::convex_hull;
pub use ids::{AgentId, ModelId, ReceptorId, ZoneId};
pub use polygon::{Bbox, Polygon};
pub use rng::{AgentRng, SimRng};
pub use role::{OperatingDomain, Signature, SkillLevel, Team};
pub use time::{SimClock, SimConfig, Tick};
