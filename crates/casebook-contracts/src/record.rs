//! Generated records and their JSON exchange shape.
//!
//! A batch is exchanged as a pretty-printed JSON array of records:
//!
//! ```json
//! { "Age": 61, "Sex": "male",
//!   "Findings": [ { "Concept": { "ConceptID": 29857009, ... }, "Duration": "Acute" } ],
//!   "Answer": { "ConceptID": 22298006, "FullySpecifiedName": "...", "Parents": [ ... ] } }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    clinical::{Duration, Sex},
    concept::{Concept, ConceptId},
    error::{CasebookError, CasebookResult},
};

/// A concept together with its cached ancestor ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedConcept {
    #[serde(rename = "ConceptID")]
    pub concept_id: ConceptId,
    #[serde(rename = "FullySpecifiedName")]
    pub fully_specified_name: String,
    #[serde(rename = "Parents", default)]
    pub parents: Vec<ConceptId>,
}

impl AnnotatedConcept {
    pub fn new(concept: &Concept, parents: &[ConceptId]) -> Self {
        Self {
            concept_id: concept.id,
            fully_specified_name: concept.fully_specified_name.clone(),
            parents: parents.to_vec(),
        }
    }
}

/// A finding as it appears in a record, e.g. "acute chest pain".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalFinding {
    #[serde(rename = "Concept")]
    pub concept: AnnotatedConcept,
    #[serde(rename = "Duration")]
    pub duration: Duration,
}

impl fmt::Display for ClinicalFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.duration, self.concept.fully_specified_name)
    }
}

/// One synthesized patient scenario with its single best answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Sex")]
    pub sex: Sex,
    #[serde(rename = "Findings")]
    pub findings: Vec<ClinicalFinding>,
    #[serde(rename = "Answer")]
    pub answer: AnnotatedConcept,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let findings = self
            .findings
            .iter()
            .map(|finding| finding.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{}] --> {}", findings, self.answer.fully_specified_name)
    }
}

/// Render a batch of records as a pretty-printed JSON array.
pub fn export_records(records: &[Record]) -> CasebookResult<String> {
    serde_json::to_string_pretty(records).map_err(|e| CasebookError::SerializationError {
        reason: format!("failed to encode records: {}", e),
    })
}

/// Parse a JSON array of records previously written by `export_records`.
pub fn import_records(json: &str) -> CasebookResult<Vec<Record>> {
    serde_json::from_str(json).map_err(|e| CasebookError::SerializationError {
        reason: format!("failed to decode records: {}", e),
    })
}
