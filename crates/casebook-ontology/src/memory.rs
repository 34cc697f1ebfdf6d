//! In-memory implementation of `OntologyGateway`.
//!
//! `InMemoryOntology` indexes an `OntologySnapshot` once. Adjacency lists
//! are sorted by concept id so every traversal is deterministic.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use tracing::debug;

use casebook_contracts::{
    concept::{Concept, ConceptId, RelationKind},
    error::{CasebookError, CasebookResult},
};
use casebook_core::traits::OntologyGateway;

use crate::snapshot::OntologySnapshot;

type Adjacency = HashMap<ConceptId, Vec<ConceptId>>;
type RelationIndex = HashMap<(ConceptId, RelationKind), Vec<ConceptId>>;

/// A read-only concept graph held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryOntology {
    concepts: HashMap<ConceptId, Concept>,
    parents: Adjacency,
    children: Adjacency,
    /// (source, kind) → targets
    outgoing: RelationIndex,
    /// (target, kind) → sources
    incoming: RelationIndex,
}

impl InMemoryOntology {
    /// Index `snapshot`.
    ///
    /// Returns `OntologyError` for duplicate concept ids or edges that refer
    /// to concepts the snapshot does not define.
    pub fn from_snapshot(snapshot: &OntologySnapshot) -> CasebookResult<Self> {
        let mut ontology = Self::default();

        for entry in &snapshot.concepts {
            let concept = Concept::new(entry.id, entry.name.clone());
            if ontology.concepts.insert(entry.id, concept).is_some() {
                return Err(CasebookError::OntologyError {
                    reason: format!("duplicate concept {} in snapshot", entry.id),
                });
            }
        }

        for edge in &snapshot.is_a {
            ontology.require(edge.child)?;
            ontology.require(edge.parent)?;
            ontology.parents.entry(edge.child).or_default().push(edge.parent);
            ontology.children.entry(edge.parent).or_default().push(edge.child);
        }

        for rel in &snapshot.relationships {
            ontology.require(rel.source)?;
            ontology.require(rel.target)?;
            ontology
                .outgoing
                .entry((rel.source, rel.kind))
                .or_default()
                .push(rel.target);
            ontology
                .incoming
                .entry((rel.target, rel.kind))
                .or_default()
                .push(rel.source);
        }

        for ids in ontology
            .parents
            .values_mut()
            .chain(ontology.children.values_mut())
            .chain(ontology.outgoing.values_mut())
            .chain(ontology.incoming.values_mut())
        {
            ids.sort_unstable();
            ids.dedup();
        }

        debug!(
            concepts = ontology.concepts.len(),
            is_a = snapshot.is_a.len(),
            relationships = snapshot.relationships.len(),
            "ontology snapshot indexed"
        );

        Ok(ontology)
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    fn require(&self, id: ConceptId) -> CasebookResult<()> {
        if self.concepts.contains_key(&id) {
            Ok(())
        } else {
            Err(CasebookError::OntologyError {
                reason: format!("snapshot edge refers to undefined concept {}", id),
            })
        }
    }

    fn resolve(&self, ids: impl IntoIterator<Item = ConceptId>) -> CasebookResult<Vec<Concept>> {
        ids.into_iter().map(|id| self.fetch_concept(id)).collect()
    }

    /// Breadth-first walk over `edges` from `start`, excluding `start`.
    fn walk(&self, start: ConceptId, edges: &Adjacency) -> Vec<ConceptId> {
        let mut seen = HashSet::from([start]);
        let mut order = Vec::new();
        let mut queue = VecDeque::from([start]);
        while let Some(id) = queue.pop_front() {
            for next in edges.get(&id).into_iter().flatten() {
                if seen.insert(*next) {
                    order.push(*next);
                    queue.push_back(*next);
                }
            }
        }
        order
    }

    fn related(
        &self,
        index: &RelationIndex,
        concept: &Concept,
        kind: RelationKind,
    ) -> CasebookResult<Vec<Concept>> {
        self.require(concept.id)?;
        let ids = index.get(&(concept.id, kind)).cloned().unwrap_or_default();
        self.resolve(ids)
    }
}

impl OntologyGateway for InMemoryOntology {
    fn fetch_concept(&self, id: ConceptId) -> CasebookResult<Concept> {
        self.concepts
            .get(&id)
            .cloned()
            .ok_or(CasebookError::ConceptNotFound { concept_id: id })
    }

    fn fetch_recursive_descendants(&self, concept: &Concept) -> CasebookResult<Vec<Concept>> {
        self.fetch_concept(concept.id)?;
        self.resolve(self.walk(concept.id, &self.children))
    }

    fn fetch_ancestors(&self, concept: &Concept) -> CasebookResult<Vec<Concept>> {
        self.fetch_concept(concept.id)?;
        self.resolve(self.walk(concept.id, &self.parents))
    }

    fn fetch_related_parents(
        &self,
        concept: &Concept,
        kind: RelationKind,
    ) -> CasebookResult<Vec<Concept>> {
        self.related(&self.outgoing, concept, kind)
    }

    fn fetch_related_children(
        &self,
        concept: &Concept,
        kind: RelationKind,
    ) -> CasebookResult<Vec<Concept>> {
        self.related(&self.incoming, concept, kind)
    }

    fn fetch_siblings(&self, concept: &Concept) -> CasebookResult<Vec<Concept>> {
        self.fetch_concept(concept.id)?;
        let mut siblings = BTreeSet::new();
        for parent in self.parents.get(&concept.id).into_iter().flatten() {
            siblings.extend(self.children.get(parent).into_iter().flatten().copied());
        }
        siblings.remove(&concept.id);
        self.resolve(siblings)
    }
}
