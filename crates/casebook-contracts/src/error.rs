//! Error types for the casebook generation pipeline.
//!
//! All fallible operations return `CasebookResult<T>`. A diagnosis with no
//! discoverable findings is not an error: the builder reports it as `None`.

use thiserror::Error;

use crate::concept::ConceptId;

/// The unified error type for the casebook crates.
#[derive(Debug, Error)]
pub enum CasebookError {
    /// An ontology identifier does not resolve to a concept.
    #[error("concept {concept_id} not found in ontology")]
    ConceptNotFound { concept_id: ConceptId },

    /// A truth was declared for a concept outside the diagnosis hierarchy.
    #[error("concept {concept_id} is not a diagnosis")]
    NotADiagnosis { concept_id: ConceptId },

    /// The ontology store failed for a reason other than a missing concept.
    #[error("ontology error: {reason}")]
    OntologyError { reason: String },

    /// A sampling routine was asked to draw from an empty range.
    ///
    /// Callers are contracted to rule this out first, so reaching it is a
    /// programming error rather than a data problem.
    #[error("degenerate sampling input: {reason}")]
    DegenerateSampling { reason: String },

    /// A problem probability fell outside `[0, 1]`.
    #[error("probability {probability} for concept {concept_id} is outside [0, 1]")]
    InvalidProbability { concept_id: ConceptId, probability: f64 },

    /// A configuration value is missing, malformed or unreadable.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// Records could not be written to or read from their JSON exchange shape.
    #[error("serialization error: {reason}")]
    SerializationError { reason: String },
}

/// Convenience alias used throughout the casebook crates.
pub type CasebookResult<T> = Result<T, CasebookError>;
