//! `ps-agent`: agent storage and lifecycle for the `patrol_sim` workspace.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`agent`]       | `Agent` record, `Role`, `MoveOutcome`, lifecycle methods  |
//! | [`store`]       | `AgentStore` (arena), `AgentRngs` (per-agent RNG)         |
//! | [`builder`]     | `AgentStoreBuilder`, `AgentProfile`                       |
//! | [`error`]       | `AgentError`, `AgentResult`                               |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on `Agent` and `Role`.   |

pub mod agent;
pub mod builder;
pub mod error;
pub mod store;


pub use agent::{Agent, MoveOutcome, Role, MAX_ROUTE_HOPS};
pub use builder::{AgentProfile, AgentStoreBuilder};
pub use error::{AgentError, AgentResult};
pub use store::{AgentRngs, AgentStore};
