//! Role-related enums shared by the config, agent and detection crates.
//!
//! All of them parse from the lower-case labels used in fleet files; unknown
//! labels fail with [`CoreError::UnknownVariant`].

use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Generates `as_str`, `Display` and `FromStr` for a fieldless enum.
/// Each variant lists its canonical label first, then accepted aliases.
macro_rules! labelled_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $label:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> CoreResult<Self> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($label $(| $alias)* => Ok($name::$variant),)+
                    _ => Err(CoreError::UnknownVariant { kind: $kind, value: s.to_owned() }),
                }
            }
        }
    };
}

/// Which side an agent model belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Team {
    /// Patrols zones and attempts detections.
    Searcher,
    /// Crosses the area and may be detected.
    Traveller,
}

labelled_enum!(Team, "team", {
    Searcher  => "searcher" | "blue",
    Traveller => "traveller" | "traveler" | "red",
});

/// Medium a searcher operates in; selects the detection regime.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OperatingDomain {
    Surface,
    Air,
}

labelled_enum!(OperatingDomain, "operating domain", {
    Surface => "surface",
    Air     => "air",
});

/// Sensor crew proficiency.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkillLevel {
    Basic,
    Advanced,
}

labelled_enum!(SkillLevel, "skill level", {
    Basic    => "basic",
    Advanced => "advanced",
});

/// Visibility class of a target, used for both surface range and radar
/// cross-section lookups.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Signature {
    Small,
    Medium,
    Large,
    VeryLarge,
}

labelled_enum!(Signature, "signature class", {
    Small     => "small",
    Medium    => "medium",
    Large     => "large",
    VeryLarge => "very_large" | "very large" | "verylarge",
});

impl Signature {
    pub const ALL: [Signature; 4] = [
        Signature::Small,
        Signature::Medium,
        Signature::Large,
        Signature::VeryLarge,
    ];
}
