//! Site-based finding discovery.
//!
//! Diagnoses rarely declare their symptoms in the ontology. Instead the
//! discoverer asks "what else is found at the same kind of body part":
//!
//!   diagnosis → finding sites → generic region → every structure in the
//!   region → findings sited there → minus diseases
//!
//! The result is clinically plausible rather than ontologically correct.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use casebook_contracts::{
    concept::{well_known, Concept, ConceptId, RelationKind},
    error::CasebookResult,
};

use crate::traits::OntologyGateway;

/// Discovers candidate findings for a diagnosis by anatomical site.
///
/// The generic regions (the reference region and its siblings) are resolved
/// once at construction and reused for every diagnosis.
pub struct SiteFindingDiscoverer<'a> {
    ontology: &'a dyn OntologyGateway,
    generic_sites: HashMap<ConceptId, Concept>,
}

impl<'a> SiteFindingDiscoverer<'a> {
    /// Resolve `reference_region` and its siblings as the generic sites.
    pub fn new(
        ontology: &'a dyn OntologyGateway,
        reference_region: ConceptId,
    ) -> CasebookResult<Self> {
        let reference = ontology.fetch_concept(reference_region)?;
        let mut generic_sites: HashMap<ConceptId, Concept> = ontology
            .fetch_siblings(&reference)?
            .into_iter()
            .map(|site| (site.id, site))
            .collect();
        generic_sites.insert(reference.id, reference);

        debug!(
            reference_region = %reference_region,
            generic_sites = generic_sites.len(),
            "generic sites resolved"
        );

        Ok(Self {
            ontology,
            generic_sites,
        })
    }

    /// The generic regions sites are generalized onto.
    pub fn generic_sites(&self) -> impl Iterator<Item = &Concept> {
        self.generic_sites.values()
    }

    /// Map a specific site onto its generic region, if any subsumes it.
    pub fn generalize(&self, site: &Concept) -> CasebookResult<Option<Concept>> {
        self.ontology.generalize_to_one_of(site, &self.generic_sites)
    }

    /// Candidate findings for `diagnosis`, deduplicated and sorted by id.
    ///
    /// An empty result means the diagnosis has no finding site, or none of
    /// its sites fall inside a generic region.
    pub fn discover(&self, diagnosis: &Concept) -> CasebookResult<Vec<Concept>> {
        let sites = self
            .ontology
            .fetch_related_parents(diagnosis, RelationKind::FINDING_SITE)?;
        if sites.is_empty() {
            debug!(diagnosis = %diagnosis.id, "diagnosis has no finding site");
            return Ok(Vec::new());
        }

        // Several sites may share a region; walk each region once.
        let mut regions: BTreeMap<ConceptId, Concept> = BTreeMap::new();
        for site in &sites {
            match self.generalize(site)? {
                Some(region) => {
                    regions.insert(region.id, region);
                }
                None => debug!(
                    diagnosis = %diagnosis.id,
                    site = %site.id,
                    "site outside every generic region, dropped"
                ),
            }
        }

        let mut candidates: BTreeMap<ConceptId, Concept> = BTreeMap::new();
        for region in regions.values() {
            for structure in self.ontology.fetch_recursive_descendants(region)? {
                let findings = self
                    .ontology
                    .fetch_related_children(&structure, RelationKind::FINDING_SITE)?;
                for finding in findings {
                    if candidates.contains_key(&finding.id) {
                        continue;
                    }
                    if self.ontology.is_descendant_of(&finding, well_known::DISEASE)? {
                        continue;
                    }
                    candidates.insert(finding.id, finding);
                }
            }
        }

        debug!(
            diagnosis = %diagnosis.id,
            sites = sites.len(),
            regions = regions.len(),
            candidates = candidates.len(),
            "candidate findings discovered"
        );

        Ok(candidates.into_values().collect())
    }
}
