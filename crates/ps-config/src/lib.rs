//! `ps-config`: scenario configuration.
//!
//! Two inputs describe a run:
//!
//! | Source      | Loader                                   | Produces            |
//! |-------------|------------------------------------------|---------------------|
//! | fleet CSV   | [`load_fleet_csv`] / [`load_fleet_reader`] | `Vec<ModelSpec>`  |
//! | world JSON  | [`load_world_json`] / [`load_world_reader`] | `WorldConfig`    |
//!
//! Every `WorldConfig` field has a default, so an empty JSON object (or no
//! file at all) yields the reference scenario geometry.

pub mod error;
pub mod fleet;
pub mod world;


pub use error::{ConfigError, ConfigResult};
pub use fleet::{load_fleet_csv, load_fleet_reader, ModelSpec, RoleSpec};
pub use world::{
    load_world_json, load_world_reader, AreaConfig, DetectionConfig, GridConfig, ScenarioConfig,
    SeaStateConfig, TessellationConfig, TransitConfig, WorldConfig,
};
