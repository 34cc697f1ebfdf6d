//! Demographic and temporal qualifiers attached to findings and records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Temporal course of a clinical finding. Purely descriptive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Duration {
    /// Onset not known or not specified.
    #[default]
    Unknown,
    Acute,
    Subacute,
    /// e.g. co-morbidities.
    Chronic,
    /// Intermittent.
    Episodic,
}

impl Duration {
    /// The qualifiers a generated problem may be given, in draw order.
    pub const ONSETS: [Duration; 4] = [
        Duration::Acute,
        Duration::Subacute,
        Duration::Chronic,
        Duration::Episodic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Duration::Unknown => "Unknown",
            Duration::Acute => "Acute",
            Duration::Subacute => "Subacute",
            Duration::Chronic => "Chronic",
            Duration::Episodic => "Episodic",
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sex of the patient in a generated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => f.write_str("male"),
            Sex::Female => f.write_str("female"),
        }
    }
}

/// Whether a diagnosis is restricted to one sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SexBias {
    MenOnly,
    FemaleOnly,
    NoBias,
}

impl SexBias {
    /// Every bias category, in draw order.
    pub const ALL: [SexBias; 3] = [SexBias::MenOnly, SexBias::FemaleOnly, SexBias::NoBias];

    /// The sex this bias forces, or `None` when either is possible.
    pub fn forced_sex(&self) -> Option<Sex> {
        match self {
            SexBias::MenOnly => Some(Sex::Male),
            SexBias::FemaleOnly => Some(Sex::Female),
            SexBias::NoBias => None,
        }
    }
}
