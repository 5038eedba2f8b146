//! `ps-tessellation`: partition the operating area into patrol zones.
//!
//! Zones are placed by force relaxation so that each one's share of the
//! in-area receptors tracks its share of total strength, roughly a weighted
//! Voronoi partition.  Each zone then gets a convex boundary and a
//! boustrophedon sweep route.
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`zone`]   | `PatrolZone`, `ZoneSeed`, zone colour palette              |
//! | [`relax`]  | Seeding, strength normalization, pressure, relaxation step |
//! | [`assign`] | Strength-weighted receptor assignment and share scoring    |
//! | [`sweep`]  | Hull + boustrophedon coverage route                        |
//! | [`engine`] | `tessellate`: the full pipeline                            |

pub mod assign;
pub mod engine;
pub mod error;
pub mod relax;
pub mod sweep;
pub mod zone;

#[cfg(test)]
mod tests;

pub use engine::{tessellate, Tessellation, TessellationParams};
pub use error::{TessellationError, TessellationResult};
pub use zone::{PatrolZone, ZoneSeed};
