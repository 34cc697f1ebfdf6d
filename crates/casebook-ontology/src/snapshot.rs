//! JSON snapshot format for a concept graph.
//!
//! ```json
//! {
//!   "concepts": [ { "id": 22298006, "name": "Myocardial infarction (disorder)" } ],
//!   "is_a": [ { "child": 22298006, "parent": 64572001 } ],
//!   "relationships": [ { "source": 22298006, "kind": 363698007, "target": 80891009 } ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use casebook_contracts::{
    concept::{ConceptId, RelationKind},
    error::{CasebookError, CasebookResult},
};

/// A concept row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptEntry {
    pub id: ConceptId,
    pub name: String,
}

/// One is-a edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsAEntry {
    pub child: ConceptId,
    pub parent: ConceptId,
}

/// One attribute relationship, e.g. disorder --finding site--> structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipEntry {
    pub source: ConceptId,
    pub kind: RelationKind,
    pub target: ConceptId,
}

/// A complete, self-contained concept graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologySnapshot {
    pub concepts: Vec<ConceptEntry>,
    #[serde(default)]
    pub is_a: Vec<IsAEntry>,
    #[serde(default)]
    pub relationships: Vec<RelationshipEntry>,
}

impl OntologySnapshot {
    pub fn concept(&mut self, id: u64, name: &str) -> &mut Self {
        self.concepts.push(ConceptEntry {
            id: ConceptId(id),
            name: name.to_string(),
        });
        self
    }

    pub fn is_a(&mut self, child: u64, parent: u64) -> &mut Self {
        self.is_a.push(IsAEntry {
            child: ConceptId(child),
            parent: ConceptId(parent),
        });
        self
    }

    pub fn relate(&mut self, source: u64, kind: RelationKind, target: u64) -> &mut Self {
        self.relationships.push(RelationshipEntry {
            source: ConceptId(source),
            kind,
            target: ConceptId(target),
        });
        self
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json_str(s: &str) -> CasebookResult<Self> {
        serde_json::from_str(s).map_err(|e| CasebookError::OntologyError {
            reason: format!("failed to parse ontology snapshot: {}", e),
        })
    }

    /// Read and parse the snapshot at `path`.
    pub fn from_file(path: &Path) -> CasebookResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CasebookError::OntologyError {
            reason: format!("failed to read ontology snapshot '{}': {}", path.display(), e),
        })?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_pretty(&self) -> CasebookResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CasebookError::SerializationError {
            reason: format!("failed to encode ontology snapshot: {}", e),
        })
    }
}
