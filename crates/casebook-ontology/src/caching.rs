//! Memoizing wrapper around any `OntologyGateway`.
//!
//! Discovery, truth construction and explicit loading all ask for the
//! ancestors of the same concepts over and over. `CachingOntology` answers
//! repeated `fetch_ancestors` calls from a shared map keyed by concept id.
//! Every other call is passed straight through.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tracing::debug;

use casebook_contracts::{
    concept::{Concept, ConceptId, RelationKind},
    error::{CasebookError, CasebookResult},
};
use casebook_core::traits::OntologyGateway;

#[derive(Default)]
struct CacheState {
    ancestors: HashMap<ConceptId, Arc<[Concept]>>,
    hits: u64,
    misses: u64,
}

/// Hit and miss counters of a `CachingOntology`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// An `OntologyGateway` that memoizes ancestor lists.
///
/// # Thread safety
///
/// The cache sits behind a `Mutex`, so one instance can be shared by
/// concurrent workers. The lock is never held while the inner gateway runs.
pub struct CachingOntology<G> {
    inner: G,
    state: Mutex<CacheState>,
}

impl<G: OntologyGateway> CachingOntology<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn stats(&self) -> CasebookResult<CacheStats> {
        let state = self.lock()?;
        Ok(CacheStats {
            entries: state.ancestors.len(),
            hits: state.hits,
            misses: state.misses,
        })
    }

    fn lock(&self) -> CasebookResult<std::sync::MutexGuard<'_, CacheState>> {
        self.state.lock().map_err(|e| CasebookError::OntologyError {
            reason: format!("ancestor cache lock poisoned: {}", e),
        })
    }
}

impl<G: OntologyGateway> OntologyGateway for CachingOntology<G> {
    fn fetch_concept(&self, id: ConceptId) -> CasebookResult<Concept> {
        self.inner.fetch_concept(id)
    }

    fn fetch_recursive_descendants(&self, concept: &Concept) -> CasebookResult<Vec<Concept>> {
        self.inner.fetch_recursive_descendants(concept)
    }

    fn fetch_ancestors(&self, concept: &Concept) -> CasebookResult<Vec<Concept>> {
        {
            let mut state = self.lock()?;
            if let Some(cached) = state.ancestors.get(&concept.id).cloned() {
                state.hits += 1;
                return Ok(cached.to_vec());
            }
            state.misses += 1;
        }

        let ancestors: Arc<[Concept]> = self.inner.fetch_ancestors(concept)?.into();
        debug!(
            concept = %concept.id,
            ancestors = ancestors.len(),
            "ancestors cached"
        );
        self.lock()?.ancestors.insert(concept.id, Arc::clone(&ancestors));
        Ok(ancestors.to_vec())
    }

    fn fetch_related_parents(
        &self,
        concept: &Concept,
        kind: RelationKind,
    ) -> CasebookResult<Vec<Concept>> {
        self.inner.fetch_related_parents(concept, kind)
    }

    fn fetch_related_children(
        &self,
        concept: &Concept,
        kind: RelationKind,
    ) -> CasebookResult<Vec<Concept>> {
        self.inner.fetch_related_children(concept, kind)
    }

    fn fetch_siblings(&self, concept: &Concept) -> CasebookResult<Vec<Concept>> {
        self.inner.fetch_siblings(concept)
    }
}
