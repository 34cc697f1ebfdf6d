//! Hand-authored illustrative truths.
//!
//! Probabilities here are clinically sensible rather than random, so
//! records drawn from these truths read like textbook presentations.

use casebook_contracts::{clinical::Duration, concept::ConceptId};
use casebook_core::{ExplicitProblem, ExplicitTruth};

/// Acute myocardial infarction: chest pain, breathlessness, sweating, jaw
/// pain and ST elevation in a sixty-year-old.
pub fn myocardial_infarction() -> ExplicitTruth {
    ExplicitTruth {
        diagnosis: ConceptId(22298006),
        problems: vec![
            ExplicitProblem::new(29857009, Duration::Acute, 0.95),  // chest pain
            ExplicitProblem::new(267036007, Duration::Acute, 0.70), // breathlessness
            ExplicitProblem::new(415690000, Duration::Acute, 0.80), // sweating
            ExplicitProblem::new(426555006, Duration::Acute, 0.55), // pain to jaw
            ExplicitProblem::new(76388001, Duration::Acute, 0.60),  // ST elevation on ECG
        ],
        mean_age: 60,
        std_dev_age: 20,
    }
}

/// Every built-in seed truth, in corpus order.
pub fn reference_seeds() -> Vec<ExplicitTruth> {
    vec![myocardial_infarction()]
}
