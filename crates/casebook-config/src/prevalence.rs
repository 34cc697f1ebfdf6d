//! Table-driven prevalence policy.
//!
//! Lookup order for a diagnosis:
//!
//! 1. Its own entry.
//! 2. The entry of its nearest ancestor that has one (imputation).
//! 3. The table default.

use std::collections::HashMap;

use tracing::debug;

use casebook_contracts::{
    concept::{Concept, ConceptId},
    error::CasebookResult,
};
use casebook_core::traits::PrevalencePolicy;

use crate::settings::PrevalenceConfig;

/// A `PrevalencePolicy` backed by a fixed table of known figures.
#[derive(Debug, Clone)]
pub struct PrevalenceTable {
    known: HashMap<ConceptId, f64>,
    default: f64,
}

impl PrevalenceTable {
    pub fn new(default: f64) -> Self {
        Self {
            known: HashMap::new(),
            default,
        }
    }

    /// Build from the `[prevalence]` config table. Later entries win.
    pub fn from_config(config: &PrevalenceConfig) -> Self {
        let mut table = Self::new(config.default);
        for entry in &config.entries {
            table.insert(entry.concept_id, entry.prevalence);
        }
        table
    }

    pub fn insert(&mut self, concept_id: ConceptId, prevalence: f64) {
        self.known.insert(concept_id, prevalence);
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

impl PrevalencePolicy for PrevalenceTable {
    fn prevalence(&self, diagnosis: &Concept, ancestors: &[ConceptId]) -> CasebookResult<f64> {
        if let Some(&known) = self.known.get(&diagnosis.id) {
            return Ok(known);
        }
        if let Some((ancestor, &imputed)) = ancestors
            .iter()
            .find_map(|id| self.known.get(id).map(|p| (id, p)))
        {
            debug!(
                diagnosis = %diagnosis.id,
                ancestor = %ancestor,
                prevalence = imputed,
                "prevalence imputed from ancestor"
            );
            return Ok(imputed);
        }
        Ok(self.default)
    }
}
