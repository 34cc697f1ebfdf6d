//! Ground-truth profiles from which records are stamped out.
//!
//! A `Truth` is built once per diagnosis and never mutated afterwards. Every
//! concept inside it carries its ancestor ids so that sampling needs no
//! further ontology access.

use std::fmt;

use crate::{
    clinical::{Duration, SexBias},
    concept::{Concept, ConceptId},
    error::{CasebookError, CasebookResult},
};

/// Upper bound on a truth's age standard deviation.
pub const MAX_AGE_STD_DEV: u32 = 20;

/// One candidate finding of a diagnosis.
///
/// `probability` is an independent Bernoulli rate: problems are not
/// normalised against each other and may co-occur freely.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    finding: Concept,
    ancestors: Vec<ConceptId>,
    duration: Duration,
    probability: f64,
}

impl Problem {
    /// Returns `InvalidProbability` unless `probability` lies in `[0, 1]`.
    pub fn new(
        finding: Concept,
        ancestors: Vec<ConceptId>,
        duration: Duration,
        probability: f64,
    ) -> CasebookResult<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(CasebookError::InvalidProbability {
                concept_id: finding.id,
                probability,
            });
        }
        Ok(Self {
            finding,
            ancestors,
            duration,
            probability,
        })
    }

    pub fn finding(&self) -> &Concept {
        &self.finding
    }

    pub fn ancestors(&self) -> &[ConceptId] {
        &self.ancestors
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.finding.fully_specified_name, self.probability)
    }
}

/// The ground-truth profile for one diagnosis.
#[derive(Debug, Clone, PartialEq)]
pub struct Truth {
    diagnosis: Concept,
    ancestors: Vec<ConceptId>,
    problems: Vec<Problem>,
    sex_bias: SexBias,
    mean_age: u32,
    std_dev_age: u32,
}

impl Truth {
    /// Assemble a truth. `std_dev_age` is capped at
    /// `min(mean_age, MAX_AGE_STD_DEV)`.
    pub fn new(
        diagnosis: Concept,
        ancestors: Vec<ConceptId>,
        problems: Vec<Problem>,
        sex_bias: SexBias,
        mean_age: u32,
        std_dev_age: u32,
    ) -> Self {
        let std_dev_age = std_dev_age.min(mean_age).min(MAX_AGE_STD_DEV);
        Self {
            diagnosis,
            ancestors,
            problems,
            sex_bias,
            mean_age,
            std_dev_age,
        }
    }

    pub fn diagnosis(&self) -> &Concept {
        &self.diagnosis
    }

    /// Cached ancestor ids of the diagnosis.
    pub fn ancestors(&self) -> &[ConceptId] {
        &self.ancestors
    }

    /// Problems in draw order. The same finding may appear more than once.
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn sex_bias(&self) -> SexBias {
        self.sex_bias
    }

    pub fn mean_age(&self) -> u32 {
        self.mean_age
    }

    pub fn std_dev_age(&self) -> u32 {
        self.std_dev_age
    }
}

impl fmt::Display for Truth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let problems = self
            .problems
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}: {}", self.diagnosis.fully_specified_name, problems)
    }
}
