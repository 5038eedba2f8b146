//! `ps-detection`: can a searcher see a traveller this tick?
//!
//! # Crate layout
//!
//! | Module     | Contents                                                         |
//! |------------|------------------------------------------------------------------|
//! | [`tables`] | `DetectionTables`: ranges, sensor constants, RCS, attenuation   |
//! | [`model`]  | `DetectionModel` trait, `TableDetection`, `NeverDetect`          |
//! | [`pass`]   | `detection_pass`: every active searcher against nearby targets  |
//! | [`error`]  | `DetectionError`, `DetectionResult<T>`                           |
//!
//! # Detection rules
//!
//! * **Surface searchers** see a target iff the Euclidean distance is within
//!   the range for their skill and the target's surface signature.  No
//!   randomness.
//! * **Air searchers** see a target with probability
//!   `1 − exp(−k·h·r·s / d³)`: `k` by skill, `h` the sensor height, `r` the
//!   target's radar cross-section, `s` the attenuation for the sea state
//!   under the searcher, `d` the distance floored at `min_air_distance`.
//!   Beyond `max_air_range` the probability is zero and nothing is drawn.
//!   Otherwise one uniform draw from the searcher's own RNG decides.

pub mod error;
pub mod model;
pub mod pass;
pub mod tables;


pub use error::{DetectionError, DetectionResult};
pub use model::{air_detection_probability, surface_detects, DetectionModel, NeverDetect, TableDetection};
pub use pass::{detection_pass, Detection};
pub use tables::DetectionTables;
