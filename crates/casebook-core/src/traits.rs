//! Seams to the collaborators the engine depends on but does not own.
//!
//! - `OntologyGateway`: read-only navigation of the concept graph
//! - `PrevalencePolicy`: estimated or imputed prevalence per diagnosis
//!
//! Every gateway call is fail-fast: an error aborts the enclosing
//! construction call and is never retried here.

use std::collections::HashMap;

use casebook_contracts::{
    concept::{Concept, ConceptId, RelationKind},
    error::CasebookResult,
};

/// Read-only queries over an ontology's concept graph.
///
/// Implementations must be deterministic for a fixed snapshot. The ancestry
/// helpers have default implementations in terms of `fetch_ancestors`, so a
/// memoizing `fetch_ancestors` speeds all of them up.
pub trait OntologyGateway: Send + Sync {
    /// Resolve an identifier. Unknown ids yield `ConceptNotFound`.
    fn fetch_concept(&self, id: ConceptId) -> CasebookResult<Concept>;

    /// Every concept below `concept` in the is-a hierarchy, excluding itself.
    fn fetch_recursive_descendants(&self, concept: &Concept) -> CasebookResult<Vec<Concept>>;

    /// Every concept above `concept` in the is-a hierarchy, nearest first.
    fn fetch_ancestors(&self, concept: &Concept) -> CasebookResult<Vec<Concept>>;

    /// Targets of `kind` relationships whose source is `concept`.
    ///
    /// For a disorder and `FINDING_SITE` these are the structures it affects.
    fn fetch_related_parents(
        &self,
        concept: &Concept,
        kind: RelationKind,
    ) -> CasebookResult<Vec<Concept>>;

    /// Sources of `kind` relationships whose target is `concept`.
    ///
    /// For a structure and `FINDING_SITE` these are the findings located there.
    fn fetch_related_children(
        &self,
        concept: &Concept,
        kind: RelationKind,
    ) -> CasebookResult<Vec<Concept>>;

    /// Concepts sharing an is-a parent with `concept`, excluding itself.
    fn fetch_siblings(&self, concept: &Concept) -> CasebookResult<Vec<Concept>>;

    /// Ancestor identifiers of `concept`, nearest first.
    fn ancestor_ids(&self, concept: &Concept) -> CasebookResult<Vec<ConceptId>> {
        Ok(self
            .fetch_ancestors(concept)?
            .into_iter()
            .map(|ancestor| ancestor.id)
            .collect())
    }

    /// True if `ancestor` lies strictly above `concept`.
    fn is_descendant_of(&self, concept: &Concept, ancestor: ConceptId) -> CasebookResult<bool> {
        Ok(self
            .fetch_ancestors(concept)?
            .iter()
            .any(|candidate| candidate.id == ancestor))
    }

    /// Map `concept` onto the first member of `candidates` that is the
    /// concept itself or one of its ancestors (nearest first).
    ///
    /// Returns `None` when no candidate subsumes the concept.
    fn generalize_to_one_of(
        &self,
        concept: &Concept,
        candidates: &HashMap<ConceptId, Concept>,
    ) -> CasebookResult<Option<Concept>> {
        if let Some(hit) = candidates.get(&concept.id) {
            return Ok(Some(hit.clone()));
        }
        Ok(self
            .fetch_ancestors(concept)?
            .into_iter()
            .find(|ancestor| candidates.contains_key(&ancestor.id)))
    }
}

/// Supplies the prevalence fraction used to weight a diagnosis.
///
/// How missing data is imputed is entirely up to the implementation.
pub trait PrevalencePolicy: Send + Sync {
    /// Prevalence of `diagnosis` as a fraction of the population.
    ///
    /// `ancestors` are the diagnosis' cached ancestor ids, nearest first.
    fn prevalence(&self, diagnosis: &Concept, ancestors: &[ConceptId]) -> CasebookResult<f64>;
}
