//! World constants loaded from JSON.
//!
//! All sections are `#[serde(default)]`, so a JSON file only needs the keys
//! it overrides:
//!
//! ```json
//! { "area": { "width": 3000.0 }, "tessellation": { "iterations": 80 } }
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ps_core::{DistanceMetric, Point, Signature, SkillLevel};

use crate::fleet::ModelSpec;
use crate::{ConfigError, ConfigResult};

/// Number of discrete sea states in the default Markov chain.
pub const DEFAULT_SEA_STATES: usize = 14;

// ── Top level ─────────────────────────────────────────────────────────────────

/// World constants plus the fleet: everything needed to build a `Sim`.
#[derive(Clone, Debug)]
pub struct ScenarioConfig {
    pub world:  WorldConfig,
    pub models: Vec<ModelSpec>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub area:          AreaConfig,
    pub grid:          GridConfig,
    /// Home port of every searcher.
    pub base:          Point,
    /// Fractional endurance reserve on top of the distance home.
    pub safety_margin: f64,
    pub tessellation:  TessellationConfig,
    pub transit:       TransitConfig,
    pub detection:     DetectionConfig,
    pub sea_state:     SeaStateConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            area:          AreaConfig::default(),
            grid:          GridConfig::default(),
            base:          Point::new(-100.0, 1_500.0),
            safety_margin: 0.1,
            tessellation:  TessellationConfig::default(),
            transit:       TransitConfig::default(),
            detection:     DetectionConfig::default(),
            sea_state:     SeaStateConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Reject values that would make the geometry or the Markov chain
    /// meaningless.  Table completeness is checked by the consumers.
    pub fn validate(&self) -> ConfigResult<()> {
        let a = &self.area;
        if !(a.width > 0.0 && a.baseline_height > 0.0) {
            return Err(ConfigError::Invalid("area width and baseline height must be positive".into()));
        }
        if !(0.0..90.0).contains(&a.angle_deg) {
            return Err(ConfigError::Invalid(format!("area angle {} outside [0, 90)", a.angle_deg)));
        }
        if !(a.border >= 0.0) {
            return Err(ConfigError::Invalid(format!("area border {} must be non-negative", a.border)));
        }
        let (lo, hi) = a.grid_bounds();
        let b = self.base;
        if !(lo.x..=hi.x).contains(&b.x) || !(lo.y..=hi.y).contains(&b.y) {
            return Err(ConfigError::Invalid(format!(
                "base ({}, {}) lies outside the grid rectangle ({}, {})..({}, {})",
                b.x, b.y, lo.x, lo.y, hi.x, hi.y
            )));
        }
        if !(self.grid.cell_size > 0.0) {
            return Err(ConfigError::Invalid("grid cell size must be positive".into()));
        }
        if self.safety_margin < 0.0 {
            return Err(ConfigError::Invalid("safety margin must be non-negative".into()));
        }
        if !(0.0..=1.0).contains(&self.transit.entry_probability) {
            return Err(ConfigError::Invalid("entry probability outside [0, 1]".into()));
        }
        if self.transit.entry_y_min > self.transit.entry_y_max {
            return Err(ConfigError::Invalid("entry_y_min exceeds entry_y_max".into()));
        }
        if !(self.sea_state.noise_frequency > 0.0) || self.sea_state.octaves == 0 {
            return Err(ConfigError::Invalid("noise frequency and octaves must be positive".into()));
        }
        self.tessellation.metric()?;
        Ok(())
    }
}

// ── Sections ──────────────────────────────────────────────────────────────────

/// Trapezoidal operating area: `baseline_height` tall at `x = 0`, widening
/// by `angle_deg` on both sides out to `x = width`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    pub width:           f64,
    pub baseline_height: f64,
    pub angle_deg:       f64,
    /// Extra margin the receptor grid extends past the area on every side.
    pub border:          f64,
}

impl AreaConfig {
    /// Lower-left and upper-right corners of the receptor grid: the
    /// trapezoid's bounding box grown by `border`.
    pub fn grid_bounds(&self) -> (Point, Point) {
        let height = self.baseline_height + 2.0 * self.width * self.angle_deg.to_radians().tan();
        (
            Point::new(-self.border, -self.border),
            Point::new(self.width + self.border, height + self.border),
        )
    }
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self { width: 4_500.0, baseline_height: 600.0, angle_deg: 15.0, border: 100.0 }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cell_size: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { cell_size: 25.0 }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TessellationConfig {
    /// Relaxation steps before hulls and paths are built.
    pub iterations:    u32,
    /// Half-width of the uniform jitter added per pressure term.
    pub jitter:        f64,
    /// Metric name for pressure and assignment distances.
    pub metric:        String,
    /// Upper bound on rejection-sampling draws per zone seed.
    pub seed_attempts: u32,
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            iterations:    50,
            jitter:        1.0,
            metric:        "adj manhattan".into(),
            seed_attempts: 10_000,
        }
    }
}

impl TessellationConfig {
    pub fn metric(&self) -> ConfigResult<DistanceMetric> {
        Ok(self.metric.parse()?)
    }
}

/// Stochastic entry of travellers.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TransitConfig {
    /// Per-tick, per-model probability that one traveller enters.
    pub entry_probability: f64,
    pub entry_x:           f64,
    pub entry_y_min:       f64,
    pub entry_y_max:       f64,
    /// Where travellers leave the area.  Defaults to the searcher base.
    pub exit:              Option<Point>,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            entry_probability: 0.2,
            entry_x:           4_500.0,
            entry_y_min:       200.0,
            entry_y_max:       2_800.0,
            exit:              None,
        }
    }
}

/// Detection lookup tables.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Surface-to-surface detection range by searcher skill and target class.
    pub surface_ranges:        BTreeMap<SkillLevel, BTreeMap<Signature, f64>>,
    /// Air sensor constant `k` by skill.
    pub air_constants:         BTreeMap<SkillLevel, f64>,
    /// Sensor height `h`.
    pub sensor_height:         f64,
    /// Beyond this distance the air detection probability is zero.
    pub max_air_range:         f64,
    /// Floor on `d` in the cubic falloff.
    pub min_air_distance:      f64,
    pub radar_cross_section:   BTreeMap<Signature, f64>,
    /// Attenuation `s` by sea state.
    pub sea_state_attenuation: BTreeMap<u8, f64>,
    /// Attenuation for sea states missing from the table.
    pub default_attenuation:   f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        use Signature::*;

        let ranges = |r: [f64; 4]| -> BTreeMap<Signature, f64> {
            Signature::ALL.into_iter().zip(r).collect()
        };
        Self {
            surface_ranges: BTreeMap::from([
                (SkillLevel::Basic, ranges([19.0, 37.0, 56.0, 74.0])),
                (SkillLevel::Advanced, ranges([28.0, 56.0, 83.0, 111.0])),
            ]),
            air_constants: BTreeMap::from([
                (SkillLevel::Basic, 2_747.0),
                (SkillLevel::Advanced, 39_633.0),
            ]),
            sensor_height: 10.0,
            max_air_range: 300.0,
            min_air_distance: 1.0,
            radar_cross_section: BTreeMap::from([
                (Small, 0.5),
                (Medium, 1.0),
                (Large, 2.0),
                (VeryLarge, 4.0),
            ]),
            sea_state_attenuation: BTreeMap::from([
                (0, 1.0),
                (1, 1.0),
                (2, 0.9),
                (3, 0.75),
                (4, 0.6),
                (5, 0.5),
            ]),
            default_attenuation: 0.4,
        }
    }
}

/// Sea-state Markov field.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SeaStateConfig {
    pub initial_state:   u8,
    /// Row-stochastic transition matrix; row `i` is the distribution of the
    /// next state given current state `i`.
    pub transitions:     Vec<Vec<f64>>,
    /// Lattice cells spanned by the noise field across the grid.
    pub noise_frequency: f64,
    /// fBm layers summed on top of the base frequency.
    pub octaves:         u32,
}

impl Default for SeaStateConfig {
    fn default() -> Self {
        Self {
            initial_state:   2,
            transitions:     banded_transitions(DEFAULT_SEA_STATES, 0.1),
            noise_frequency: 8.0,
            octaves:         3,
        }
    }
}

/// A birth-death chain: move one state up or down with probability `step`
/// each, staying put otherwise.  End states fold the impossible move into
/// "stay".
pub fn banded_transitions(states: usize, step: f64) -> Vec<Vec<f64>> {
    (0..states)
        .map(|i| {
            let mut row = vec![0.0; states];
            let mut stay = 1.0;
            if i > 0 {
                row[i - 1] = step;
                stay -= step;
            }
            if i + 1 < states {
                row[i + 1] = step;
                stay -= step;
            }
            row[i] = stay;
            row
        })
        .collect()
}

// ── Loaders ───────────────────────────────────────────────────────────────────

/// Load and validate a `WorldConfig` from a JSON file.
pub fn load_world_json(path: &Path) -> ConfigResult<WorldConfig> {
    let file = std::fs::File::open(path)?;
    load_world_reader(std::io::BufReader::new(file))
}

/// Like [`load_world_json`] but accepts any `Read` source.
pub fn load_world_reader<R: Read>(reader: R) -> ConfigResult<WorldConfig> {
    let world: WorldConfig = serde_json::from_reader(reader)?;
    world.validate()?;
    Ok(world)
}
