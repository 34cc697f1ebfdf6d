//! A hand-built concept graph shared by the engine's unit tests.

use std::collections::{BTreeSet, HashMap, VecDeque};

use casebook_contracts::{
    concept::{well_known, Concept, ConceptId, RelationKind},
    error::{CasebookError, CasebookResult},
};

use crate::traits::{OntologyGateway, PrevalencePolicy};

pub const BODY_STRUCTURE: u64 = 123037004;
pub const BODY_REGION: u64 = 818983003;
pub const THORAX: u64 = 51185008;
pub const ABDOMEN: u64 = 113345001;
pub const HEART: u64 = 80891009;
pub const LUNG: u64 = 39607008;
pub const STOMACH: u64 = 69695003;
pub const FLOATING: u64 = 900000001;
pub const INFARCTION: u64 = 22298006;
pub const HEART_FAILURE: u64 = 84114007;
pub const CHEST_PAIN: u64 = 29857009;
pub const COUGH: u64 = 49727002;
pub const ABDOMINAL_PAIN: u64 = 21522001;
pub const HEREDITARY: u64 = 32895009;
pub const ORPHAN: u64 = 900000002;
pub const PNEUMONIA: u64 = 233604007;
pub const GASTRITIS: u64 = 4556007;

pub struct MockOntology {
    names: HashMap<u64, &'static str>,
    parents: HashMap<u64, Vec<u64>>,
    relations: Vec<(u64, ConceptId, u64)>,
}

impl MockOntology {
    pub fn new() -> Self {
        let finding = well_known::CLINICAL_FINDING.0;
        let disease = well_known::DISEASE.0;
        let site = well_known::FINDING_SITE;

        let names = HashMap::from([
            (finding, "Clinical finding (finding)"),
            (disease, "Disease (disorder)"),
            (BODY_STRUCTURE, "Body structure (body structure)"),
            (BODY_REGION, "Body region structure (body structure)"),
            (THORAX, "Thoracic structure (body structure)"),
            (ABDOMEN, "Abdominal structure (body structure)"),
            (HEART, "Heart structure (body structure)"),
            (LUNG, "Lung structure (body structure)"),
            (STOMACH, "Stomach structure (body structure)"),
            (FLOATING, "Floating structure (body structure)"),
            (INFARCTION, "Myocardial infarction (disorder)"),
            (HEART_FAILURE, "Heart failure (disorder)"),
            (PNEUMONIA, "Pneumonia (disorder)"),
            (GASTRITIS, "Gastritis (disorder)"),
            (CHEST_PAIN, "Chest pain (finding)"),
            (COUGH, "Cough (finding)"),
            (ABDOMINAL_PAIN, "Abdominal pain (finding)"),
            (HEREDITARY, "Hereditary disease (disorder)"),
            (ORPHAN, "Orphan disorder (disorder)"),
        ]);
        let parents = HashMap::from([
            (disease, vec![finding]),
            (BODY_REGION, vec![BODY_STRUCTURE]),
            (THORAX, vec![BODY_REGION]),
            (ABDOMEN, vec![BODY_REGION]),
            (HEART, vec![THORAX]),
            (LUNG, vec![THORAX]),
            (STOMACH, vec![ABDOMEN]),
            (FLOATING, vec![BODY_STRUCTURE]),
            (INFARCTION, vec![disease]),
            (HEART_FAILURE, vec![disease]),
            (PNEUMONIA, vec![disease]),
            (GASTRITIS, vec![disease]),
            (HEREDITARY, vec![disease]),
            (ORPHAN, vec![disease]),
            (CHEST_PAIN, vec![finding]),
            (COUGH, vec![finding]),
            (ABDOMINAL_PAIN, vec![finding]),
        ]);
        let relations = vec![
            (INFARCTION, site, HEART),
            (HEART_FAILURE, site, HEART),
            (PNEUMONIA, site, LUNG),
            (GASTRITIS, site, STOMACH),
            (ORPHAN, site, FLOATING),
            (CHEST_PAIN, site, HEART),
            (COUGH, site, LUNG),
            (ABDOMINAL_PAIN, site, STOMACH),
        ];
        Self {
            names,
            parents,
            relations,
        }
    }

    pub fn concept(&self, id: u64) -> Concept {
        self.fetch_concept(ConceptId(id)).unwrap()
    }

    fn lookup_all(&self, ids: impl IntoIterator<Item = u64>) -> CasebookResult<Vec<Concept>> {
        ids.into_iter()
            .map(|id| self.fetch_concept(ConceptId(id)))
            .collect()
    }

    fn children_of(&self, id: u64) -> BTreeSet<u64> {
        self.parents
            .iter()
            .filter(|(_, ps)| ps.contains(&id))
            .map(|(child, _)| *child)
            .collect()
    }
}

impl OntologyGateway for MockOntology {
    fn fetch_concept(&self, id: ConceptId) -> CasebookResult<Concept> {
        self.names
            .get(&id.0)
            .map(|name| Concept::new(id, *name))
            .ok_or(CasebookError::ConceptNotFound { concept_id: id })
    }

    fn fetch_recursive_descendants(&self, concept: &Concept) -> CasebookResult<Vec<Concept>> {
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([concept.id.0]);
        while let Some(id) = queue.pop_front() {
            for child in self.children_of(id) {
                if seen.insert(child) {
                    queue.push_back(child);
                }
            }
        }
        self.lookup_all(seen)
    }

    fn fetch_ancestors(&self, concept: &Concept) -> CasebookResult<Vec<Concept>> {
        let mut order = Vec::new();
        let mut queue = VecDeque::from([concept.id.0]);
        while let Some(id) = queue.pop_front() {
            for parent in self.parents.get(&id).into_iter().flatten() {
                if !order.contains(parent) {
                    order.push(*parent);
                    queue.push_back(*parent);
                }
            }
        }
        self.lookup_all(order)
    }

    fn fetch_related_parents(
        &self,
        concept: &Concept,
        kind: RelationKind,
    ) -> CasebookResult<Vec<Concept>> {
        self.lookup_all(
            self.relations
                .iter()
                .filter(|(source, k, _)| *source == concept.id.0 && *k == kind.0)
                .map(|(_, _, target)| *target),
        )
    }

    fn fetch_related_children(
        &self,
        concept: &Concept,
        kind: RelationKind,
    ) -> CasebookResult<Vec<Concept>> {
        self.lookup_all(
            self.relations
                .iter()
                .filter(|(_, k, target)| *target == concept.id.0 && *k == kind.0)
                .map(|(source, _, _)| *source),
        )
    }

    fn fetch_siblings(&self, concept: &Concept) -> CasebookResult<Vec<Concept>> {
        let mut siblings = BTreeSet::new();
        for parent in self.parents.get(&concept.id.0).into_iter().flatten() {
            siblings.extend(self.children_of(*parent));
        }
        siblings.remove(&concept.id.0);
        self.lookup_all(siblings)
    }
}

/// Answers a fixed prevalence per diagnosis id, zero otherwise.
pub struct FixedPrevalence(pub HashMap<u64, f64>);

impl PrevalencePolicy for FixedPrevalence {
    fn prevalence(&self, diagnosis: &Concept, _ancestors: &[ConceptId]) -> CasebookResult<f64> {
        Ok(self.0.get(&diagnosis.id.0).copied().unwrap_or(0.0))
    }
}
