//! `ps-sim`: tick loop orchestrator for the patrol_sim workspace.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   1. maintenance  timers count down; finished agents become inactive
//!   2. movement     traveller entries, then per pool:
//!                     searchers: replacement check → return check → move
//!                     travellers: move; arrivals at the exit leave play
//!   3. detection    active searchers vs active travellers (parallel with
//!                   the `parallel` feature); detected travellers are
//!                   withdrawn in ascending searcher order
//!   4. sea state    coherent-noise Markov step on every receptor
//!   5. invariants   pool conservation, maintenance ⇒ at base
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the detection phase on Rayon's thread pool.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ps_config::{load_fleet_csv, ScenarioConfig, WorldConfig};
//! use ps_core::SimConfig;
//! use ps_sim::{NoopObserver, SimBuilder};
//!
//! let scenario = ScenarioConfig { world: WorldConfig::default(), models: load_fleet_csv(path)? };
//! let mut sim = SimBuilder::from_scenario(SimConfig::default(), scenario)?.build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::{AgentView, ModelCounts, ReceptorView, TickReport, WorldSnapshot, ZoneView};
pub use sim::Sim;
