//! The bundled SNOMED CT subset.
//!
//! A few dozen real concept ids covering five body regions, a dozen
//! disorders and the findings sited in those regions. Enough to exercise
//! site-based discovery end to end without a terminology server.

use tracing::debug;

use casebook_contracts::error::CasebookResult;
use casebook_config::GeneratorConfig;
use casebook_ontology::{CachingOntology, InMemoryOntology, OntologySnapshot};

/// The subset as JSON, in `OntologySnapshot` format.
pub const SNOMED_SUBSET_JSON: &str = include_str!("../data/snomed-subset.json");

/// Reference settings and prevalence figures for the subset.
pub const REFERENCE_CONFIG_TOML: &str = include_str!("../data/casebook.toml");

pub fn snapshot() -> CasebookResult<OntologySnapshot> {
    let snapshot = OntologySnapshot::from_json_str(SNOMED_SUBSET_JSON)?;
    debug!(
        concepts = snapshot.concepts.len(),
        is_a = snapshot.is_a.len(),
        relationships = snapshot.relationships.len(),
        "bundled SNOMED CT subset parsed"
    );
    Ok(snapshot)
}

/// The subset indexed and wrapped in an ancestor cache.
pub fn ontology() -> CasebookResult<CachingOntology<InMemoryOntology>> {
    let snapshot = snapshot()?;
    Ok(CachingOntology::new(InMemoryOntology::from_snapshot(&snapshot)?))
}

pub fn reference_config() -> CasebookResult<GeneratorConfig> {
    let config = GeneratorConfig::from_toml_str(REFERENCE_CONFIG_TOML)?;
    debug!(
        prevalence_entries = config.prevalence.entries.len(),
        "bundled reference settings parsed"
    );
    Ok(config)
}
