//! Generator settings schema.
//!
//! A `GeneratorConfig` is deserialized from TOML. Every field has a default,
//! so an empty document is a valid configuration.
//!
//! Example:
//! ```toml
//! seed = 42
//! diagnosis_limit = 25
//! scale = 2
//! range_policy = "legacy"
//! failure_policy = "skip"
//!
//! [prevalence]
//! default = 0.0001
//!
//! [[prevalence.entries]]
//! concept_id = 22298006
//! prevalence = 0.003
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use casebook_contracts::{
    concept::{well_known, ConceptId},
    error::{CasebookError, CasebookResult},
};
use casebook_core::{
    builder::DEFAULT_MAX_PROBLEMS, DriverSettings, ExplicitTruth, FailurePolicy, RangePolicy,
};

/// Prevalence assumed for diagnoses with no entry of their own or of any
/// ancestor.
pub const DEFAULT_PREVALENCE: f64 = 0.0;

/// One known prevalence figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrevalenceEntry {
    pub concept_id: ConceptId,
    /// Fraction of the population, in `[0, 1]`.
    pub prevalence: f64,
}

/// The `[prevalence]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrevalenceConfig {
    #[serde(default = "default_prevalence")]
    pub default: f64,
    #[serde(default)]
    pub entries: Vec<PrevalenceEntry>,
}

impl Default for PrevalenceConfig {
    fn default() -> Self {
        Self {
            default: DEFAULT_PREVALENCE,
            entries: Vec::new(),
        }
    }
}

fn default_prevalence() -> f64 {
    DEFAULT_PREVALENCE
}

/// The top-level structure deserialized from a TOML settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed for the random source. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Number of diagnoses to draw. `None` uses every diagnosis.
    pub diagnosis_limit: Option<usize>,
    /// Multiplier applied to prevalence buckets.
    pub scale: u32,
    pub max_problems: usize,
    pub range_policy: RangePolicy,
    pub failure_policy: FailurePolicy,
    /// Structure whose siblings form the generic anatomical sites.
    pub reference_region: ConceptId,
    /// Prepend the built-in illustrative truths.
    pub include_seed_truths: bool,
    /// Additional hand-authored truths, placed after the built-in ones.
    pub seed_truths: Vec<ExplicitTruth>,
    pub prevalence: PrevalenceConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            diagnosis_limit: None,
            scale: 1,
            max_problems: DEFAULT_MAX_PROBLEMS,
            range_policy: RangePolicy::default(),
            failure_policy: FailurePolicy::default(),
            reference_region: well_known::THORACIC_STRUCTURE,
            include_seed_truths: true,
            seed_truths: Vec::new(),
            prevalence: PrevalenceConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parse `s` as TOML and validate the result.
    ///
    /// Returns `CasebookError::ConfigError` if the TOML is malformed, does
    /// not match the schema, or holds out-of-range values.
    pub fn from_toml_str(s: &str) -> CasebookResult<Self> {
        let config: GeneratorConfig = toml::from_str(s).map_err(|e| CasebookError::ConfigError {
            reason: format!("failed to parse generator TOML: {}", e),
        })?;
        config.validate()?;
        debug!(
            seed = ?config.seed,
            diagnosis_limit = ?config.diagnosis_limit,
            scale = config.scale,
            prevalence_entries = config.prevalence.entries.len(),
            "generator config loaded"
        );
        Ok(config)
    }

    /// Read the file at `path` and parse it as generator settings.
    pub fn from_file(path: &Path) -> CasebookResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CasebookError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Reject values the generator cannot work with.
    pub fn validate(&self) -> CasebookResult<()> {
        if self.max_problems == 0 {
            return Err(CasebookError::ConfigError {
                reason: "max_problems must be at least 1".to_string(),
            });
        }
        let figures = std::iter::once((None, self.prevalence.default)).chain(
            self.prevalence
                .entries
                .iter()
                .map(|e| (Some(e.concept_id), e.prevalence)),
        );
        for (concept_id, prevalence) in figures {
            if !(0.0..=1.0).contains(&prevalence) {
                let subject = match concept_id {
                    Some(id) => format!("concept {}", id),
                    None => "the default".to_string(),
                };
                return Err(CasebookError::ConfigError {
                    reason: format!(
                        "prevalence {} for {} is outside [0, 1]",
                        prevalence, subject
                    ),
                });
            }
        }
        Ok(())
    }

    /// The subset of settings the corpus driver consumes.
    pub fn driver_settings(&self) -> DriverSettings {
        DriverSettings {
            diagnosis_limit: self.diagnosis_limit,
            scale: self.scale,
            max_problems: self.max_problems,
            range_policy: self.range_policy,
            failure_policy: self.failure_policy,
            reference_region: self.reference_region,
            diagnosis_root: well_known::DIAGNOSIS_ROOT,
        }
    }
}
