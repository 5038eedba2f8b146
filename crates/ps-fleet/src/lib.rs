//! `ps-fleet`: agent pools and the per-tick fleet phases.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`pool`]    | `FleetPool`: inactive / active / maintenance id lists per model  |
//! | [`fleet`]   | `Fleet`: all pools, built from `ModelSpec`s                      |
//! | [`plan`]    | `concurrent_zones`: how many zones a model can keep manned       |
//! | [`transit`] | `TransitEvent`, traveller entry / exit / withdrawal               |
//! | [`error`]   | `FleetError`, `FleetResult<T>`                                    |
//!
//! # Pool discipline
//!
//! Every agent id sits in exactly one of its model's three lists.  Each
//! phase walks a snapshot of the list it reads and applies membership
//! changes only after the walk completes, so an agent moved during a phase
//! is never visited twice in that phase.

pub mod error;
pub mod fleet;
pub mod plan;
pub mod pool;
pub mod transit;

#[cfg(test)]
mod tests;

pub use error::{FleetError, FleetResult};
pub use fleet::Fleet;
pub use plan::concurrent_zones;
pub use pool::{FleetPool, PoolCounts};
pub use transit::TransitEvent;
