//! Fleet CSV loader.
//!
//! # CSV format
//!
//! One row per agent model.  Role columns are left empty when they do not
//! apply to the model's team.
//!
//! ```csv
//! model,team,radius,quantity,speed,endurance,maintenance_time,color,skill_level,operating_domain,air_visibility,surface_visibility
//! cutter,searcher,20,6,12,14000,48,steelblue,advanced,surface,,
//! heli,searcher,40,4,60,18000,24,orange,basic,air,,
//! smuggler,traveller,0,30,25,inf,0,crimson,,,small,medium
//! ```
//!
//! `endurance` accepts `inf` for models that never need to refuel.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use ps_core::{OperatingDomain, Signature, SkillLevel, Team};

use crate::{ConfigError, ConfigResult};

// ── Model description ─────────────────────────────────────────────────────────

/// Role-specific parameters of a model.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RoleSpec {
    Searcher { skill: SkillLevel, domain: OperatingDomain },
    Traveller { air: Signature, surface: Signature },
}

/// Immutable parameters shared by every agent of one model.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelSpec {
    pub name:             String,
    pub team:             Team,
    /// Sweep radius; sets the boustrophedon line spacing (`2 × radius`).
    pub radius:           f64,
    pub quantity:         u32,
    /// Distance per unit world time.
    pub speed:            f64,
    /// Distance budget on a full tank.
    pub endurance:        f64,
    /// World time spent at base between sorties.
    pub maintenance_time: f64,
    pub color:            String,
    pub role:             RoleSpec,
}

impl ModelSpec {
    #[inline]
    pub fn is_searcher(&self) -> bool {
        matches!(self.role, RoleSpec::Searcher { .. })
    }

    /// Raw tessellation strength: `speed × endurance`.
    #[inline]
    pub fn raw_strength(&self) -> f64 {
        self.speed * self.endurance
    }

    fn validate(&self) -> ConfigResult<()> {
        let bad = |what: &str| {
            Err(ConfigError::Invalid(format!("model {:?}: {what}", self.name)))
        };
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return bad("speed must be positive and finite");
        }
        if self.endurance.is_nan() || self.endurance <= 0.0 {
            return bad("endurance must be positive");
        }
        if !(self.maintenance_time.is_finite() && self.maintenance_time >= 0.0) {
            return bad("maintenance_time must be finite and non-negative");
        }
        if self.radius.is_nan() || self.radius < 0.0 {
            return bad("radius must be non-negative");
        }
        if self.is_searcher() && !(self.radius > 0.0 && self.endurance.is_finite()) {
            return bad("searchers need a positive radius and finite endurance");
        }
        Ok(())
    }
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FleetRecord {
    model:              String,
    team:               String,
    radius:             f64,
    quantity:           u32,
    speed:              f64,
    endurance:          f64,
    maintenance_time:   f64,
    color:              String,
    skill_level:        Option<String>,
    operating_domain:   Option<String>,
    air_visibility:     Option<String>,
    surface_visibility: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load all model rows from a fleet CSV file.
pub fn load_fleet_csv(path: &Path) -> ConfigResult<Vec<ModelSpec>> {
    let file = std::fs::File::open(path)?;
    load_fleet_reader(file)
}

/// Like [`load_fleet_csv`] but accepts any `Read` source.
pub fn load_fleet_reader<R: Read>(reader: R) -> ConfigResult<Vec<ModelSpec>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut models = Vec::new();

    for result in csv_reader.deserialize::<FleetRecord>() {
        let row = result.map_err(|e| ConfigError::Parse(e.to_string()))?;
        let spec = into_spec(row)?;
        spec.validate()?;
        if models.iter().any(|m: &ModelSpec| m.name == spec.name) {
            return Err(ConfigError::Invalid(format!("duplicate model {:?}", spec.name)));
        }
        models.push(spec);
    }

    info!(models = models.len(), "loaded fleet models");
    Ok(models)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn into_spec(r: FleetRecord) -> ConfigResult<ModelSpec> {
    let team: Team = r.team.parse()?;
    let role = match team {
        Team::Searcher => RoleSpec::Searcher {
            skill:  required(&r.model, "skill_level", r.skill_level.as_deref())?.parse()?,
            domain: required(&r.model, "operating_domain", r.operating_domain.as_deref())?.parse()?,
        },
        Team::Traveller => RoleSpec::Traveller {
            air:     required(&r.model, "air_visibility", r.air_visibility.as_deref())?.parse()?,
            surface: required(&r.model, "surface_visibility", r.surface_visibility.as_deref())?.parse()?,
        },
    };
    Ok(ModelSpec {
        name: r.model,
        team,
        radius: r.radius,
        quantity: r.quantity,
        speed: r.speed,
        endurance: r.endurance,
        maintenance_time: r.maintenance_time,
        color: r.color,
        role,
    })
}

fn required<'a>(model: &str, column: &str, value: Option<&'a str>) -> ConfigResult<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::Invalid(format!("model {model:?}: missing {column}"))),
    }
}
