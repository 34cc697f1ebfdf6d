//! Ontology concept identity types.
//!
//! The generator never owns the ontology. It only holds concepts by value
//! and refers to them by their stable integer identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable integer identifier of an ontology concept (a SNOMED CT SCTID).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptId(pub u64);

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ConceptId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A node in the concept graph: identifier plus fully specified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Concept {
    #[serde(rename = "ConceptID")]
    pub id: ConceptId,
    #[serde(rename = "FullySpecifiedName")]
    pub fully_specified_name: String,
}

impl Concept {
    pub fn new(id: impl Into<ConceptId>, fully_specified_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fully_specified_name: fully_specified_name.into(),
        }
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_specified_name)
    }
}

/// The kind of an attribute relationship, itself identified by a concept.
///
/// Subsumption (is-a) is navigated through dedicated gateway calls; a
/// `RelationKind` names any other attribute, e.g. "finding site".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationKind(pub ConceptId);

impl RelationKind {
    /// Links a disorder or finding to the anatomical structure it affects.
    pub const FINDING_SITE: RelationKind = RelationKind(well_known::FINDING_SITE);
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Well-known SNOMED CT identifiers the generator relies on.
pub mod well_known {
    use super::ConceptId;

    /// Root of every diagnosis: "Disease (disorder)".
    pub const DIAGNOSIS_ROOT: ConceptId = ConceptId(64572001);

    /// Generic disease category; findings under it are not symptoms.
    pub const DISEASE: ConceptId = ConceptId(64572001);

    /// "Clinical finding (finding)", root of all observations.
    pub const CLINICAL_FINDING: ConceptId = ConceptId(404684003);

    /// "Thoracic structure", the reference region whose siblings form the
    /// generic anatomical sites.
    pub const THORACIC_STRUCTURE: ConceptId = ConceptId(51185008);

    /// "Finding site (attribute)".
    pub const FINDING_SITE: ConceptId = ConceptId(363698007);
}
