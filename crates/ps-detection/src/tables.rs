//! Lookup tables behind the detection rules.

use std::collections::BTreeMap;

use ps_config::DetectionConfig;
use ps_core::{Signature, SkillLevel};

use crate::{DetectionError, DetectionResult};

const SKILLS: [SkillLevel; 2] = [SkillLevel::Basic, SkillLevel::Advanced];

/// Validated copy of a [`DetectionConfig`].
///
/// Construction checks that every skill and signature class has an entry,
/// so the lookups below only fail for tables built by hand.
#[derive(Clone, Debug)]
pub struct DetectionTables {
    surface_ranges:          BTreeMap<SkillLevel, BTreeMap<Signature, f64>>,
    air_constants:           BTreeMap<SkillLevel, f64>,
    radar_cross_section:     BTreeMap<Signature, f64>,
    sea_state_attenuation:   BTreeMap<u8, f64>,
    pub sensor_height:       f64,
    pub max_air_range:       f64,
    pub min_air_distance:    f64,
    pub default_attenuation: f64,
}

impl DetectionTables {
    pub fn from_config(cfg: &DetectionConfig) -> DetectionResult<Self> {
        let tables = Self {
            surface_ranges:        cfg.surface_ranges.clone(),
            air_constants:         cfg.air_constants.clone(),
            radar_cross_section:   cfg.radar_cross_section.clone(),
            sea_state_attenuation: cfg.sea_state_attenuation.clone(),
            sensor_height:         cfg.sensor_height,
            max_air_range:         cfg.max_air_range,
            min_air_distance:      cfg.min_air_distance,
            default_attenuation:   cfg.default_attenuation,
        };
        for skill in SKILLS {
            tables.air_constant(skill)?;
            for sig in Signature::ALL {
                tables.surface_range(skill, sig)?;
            }
        }
        for sig in Signature::ALL {
            tables.rcs(sig)?;
        }
        if !(tables.min_air_distance > 0.0) {
            return Err(DetectionError::Config(format!(
                "min_air_distance must be positive, got {}",
                tables.min_air_distance
            )));
        }
        Ok(tables)
    }

    pub fn surface_range(&self, skill: SkillLevel, target: Signature) -> DetectionResult<f64> {
        self.surface_ranges
            .get(&skill)
            .and_then(|row| row.get(&target))
            .copied()
            .ok_or_else(|| DetectionError::Config(format!("no surface range for {skill} searcher vs {target} target")))
    }

    /// Widest surface range a searcher of `skill` has against any class.
    pub fn max_surface_range(&self, skill: SkillLevel) -> DetectionResult<f64> {
        let row = self
            .surface_ranges
            .get(&skill)
            .ok_or_else(|| DetectionError::Config(format!("no surface ranges for {skill} searchers")))?;
        Ok(row.values().copied().fold(0.0, f64::max))
    }

    pub fn air_constant(&self, skill: SkillLevel) -> DetectionResult<f64> {
        self.air_constants
            .get(&skill)
            .copied()
            .ok_or_else(|| DetectionError::Config(format!("no air sensor constant for {skill} searchers")))
    }

    pub fn rcs(&self, target: Signature) -> DetectionResult<f64> {
        self.radar_cross_section
            .get(&target)
            .copied()
            .ok_or_else(|| DetectionError::Config(format!("no radar cross-section for {target} targets")))
    }

    /// Attenuation for `sea_state`; states without an entry get the default.
    pub fn attenuation(&self, sea_state: u8) -> f64 {
        self.sea_state_attenuation
            .get(&sea_state)
            .copied()
            .unwrap_or(self.default_attenuation)
    }
}
