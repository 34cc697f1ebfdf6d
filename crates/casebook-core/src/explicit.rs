//! Hand-authored truths that bypass discovery.
//!
//! Explicit truths give canonical, clinically sensible profiles (fixed
//! probabilities, fixed demographics) for illustrative diagnoses. They can
//! be written as Rust literals or declared in configuration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use casebook_contracts::{
    clinical::{Duration, SexBias},
    concept::{well_known, ConceptId},
    error::{CasebookError, CasebookResult},
    truth::{Problem, Truth},
};

use crate::traits::OntologyGateway;

/// One literal problem: concept id, onset and probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplicitProblem {
    pub concept_id: ConceptId,
    pub duration: Duration,
    pub probability: f64,
}

impl ExplicitProblem {
    pub fn new(concept_id: u64, duration: Duration, probability: f64) -> Self {
        Self {
            concept_id: ConceptId(concept_id),
            duration,
            probability,
        }
    }
}

/// A literal truth definition resolved against an ontology on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplicitTruth {
    pub diagnosis: ConceptId,
    pub problems: Vec<ExplicitProblem>,
    pub mean_age: u32,
    pub std_dev_age: u32,
}

impl ExplicitTruth {
    /// Resolve every concept and assemble a `Truth` with no sex bias.
    ///
    /// Fails with `ConceptNotFound` if the diagnosis or any problem concept
    /// is unknown, `NotADiagnosis` if the diagnosis does not descend from the
    /// diagnosis root, and `InvalidProbability` for a probability outside
    /// `[0, 1]`.
    pub fn load(&self, ontology: &dyn OntologyGateway) -> CasebookResult<Truth> {
        let diagnosis = ontology.fetch_concept(self.diagnosis)?;
        if !ontology.is_descendant_of(&diagnosis, well_known::DIAGNOSIS_ROOT)? {
            return Err(CasebookError::NotADiagnosis {
                concept_id: diagnosis.id,
            });
        }
        let problems = self
            .problems
            .iter()
            .map(|p| {
                let finding = ontology.fetch_concept(p.concept_id)?;
                let ancestors = ontology.ancestor_ids(&finding)?;
                Problem::new(finding, ancestors, p.duration, p.probability)
            })
            .collect::<CasebookResult<Vec<_>>>()?;
        let ancestors = ontology.ancestor_ids(&diagnosis)?;

        debug!(
            diagnosis = %diagnosis.id,
            problems = problems.len(),
            "explicit truth loaded"
        );

        Ok(Truth::new(
            diagnosis,
            ancestors,
            problems,
            SexBias::NoBias,
            self.mean_age,
            self.std_dev_age,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::*;

    fn thoracic_profile() -> ExplicitTruth {
        ExplicitTruth {
            diagnosis: ConceptId(INFARCTION),
            problems: vec![
                ExplicitProblem::new(CHEST_PAIN, Duration::Acute, 0.95),
                ExplicitProblem::new(COUGH, Duration::Subacute, 0.10),
            ],
            mean_age: 60,
            std_dev_age: 20,
        }
    }

    #[test]
    fn explicit_truth_keeps_literal_values() {
        let ontology = MockOntology::new();
        let truth = thoracic_profile().load(&ontology).unwrap();

        assert_eq!(truth.diagnosis().id, ConceptId(INFARCTION));
        assert_eq!(truth.problems().len(), 2);
        assert_eq!(truth.problems()[0].finding().id, ConceptId(CHEST_PAIN));
        assert_eq!(truth.problems()[0].probability(), 0.95);
        assert_eq!(truth.problems()[1].duration(), Duration::Subacute);
        assert_eq!(truth.sex_bias(), SexBias::NoBias);
        assert_eq!(truth.mean_age(), 60);
        assert_eq!(truth.std_dev_age(), 20);
    }

    #[test]
    fn unknown_problem_concept_is_a_lookup_failure() {
        let ontology = MockOntology::new();
        let mut profile = thoracic_profile();
        profile.problems.push(ExplicitProblem::new(42, Duration::Acute, 0.5));

        match profile.load(&ontology).unwrap_err() {
            CasebookError::ConceptNotFound { concept_id } => assert_eq!(concept_id, ConceptId(42)),
            other => panic!("expected ConceptNotFound, got {:?}", other),
        }
    }

    #[test]
    fn finding_cannot_be_declared_as_diagnosis() {
        let ontology = MockOntology::new();
        let mut profile = thoracic_profile();
        profile.diagnosis = ConceptId(CHEST_PAIN);

        match profile.load(&ontology).unwrap_err() {
            CasebookError::NotADiagnosis { concept_id } => {
                assert_eq!(concept_id, ConceptId(CHEST_PAIN))
            }
            other => panic!("expected NotADiagnosis, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let ontology = MockOntology::new();
        let mut profile = thoracic_profile();
        profile.problems[1].probability = 1.2;

        assert!(matches!(
            profile.load(&ontology).unwrap_err(),
            CasebookError::InvalidProbability { .. }
        ));
    }
}
