//! The corpus driver: truths in, records out.
//!
//! The driver enforces the generation order:
//!
//!   seed truths → selected diagnoses → discovered truths → weighting → sampling
//!
//! Truths are kept in that order (seeds first, then diagnoses in selection
//! order) and each truth's records are appended consecutively.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use casebook_contracts::{
    concept::{well_known, Concept, ConceptId},
    error::{CasebookError, CasebookResult},
    record::Record,
    truth::Truth,
};

use crate::{
    builder::{TruthBuilder, DEFAULT_MAX_PROBLEMS},
    discovery::SiteFindingDiscoverer,
    explicit::ExplicitTruth,
    range::{draw_below, RangePolicy},
    synthesizer::sample,
    traits::{OntologyGateway, PrevalencePolicy},
    weighting::PrevalenceWeighter,
};

/// What to do when one diagnosis cannot be processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop the batch and return the first error.
    #[default]
    Abort,
    /// Log a warning, drop the diagnosis and carry on.
    Skip,
}

/// Tunable parameters of a corpus run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverSettings {
    /// Draw this many diagnoses (with replacement); `None` uses all of them.
    pub diagnosis_limit: Option<usize>,
    /// Multiplier applied to prevalence buckets.
    pub scale: u32,
    /// Upper bound on problems per discovered truth.
    pub max_problems: usize,
    pub range_policy: RangePolicy,
    pub failure_policy: FailurePolicy,
    /// Structure whose siblings form the generic anatomical sites.
    pub reference_region: ConceptId,
    /// Root whose descendants are the candidate diagnoses.
    pub diagnosis_root: ConceptId,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            diagnosis_limit: None,
            scale: 1,
            max_problems: DEFAULT_MAX_PROBLEMS,
            range_policy: RangePolicy::default(),
            failure_policy: FailurePolicy::default(),
            reference_region: well_known::THORACIC_STRUCTURE,
            diagnosis_root: well_known::DIAGNOSIS_ROOT,
        }
    }
}

/// Summary of one corpus run, logged on completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub diagnoses_selected: usize,
    pub seed_truths: usize,
    pub truths_built: usize,
    /// Diagnoses skipped because discovery found no drawable candidate findings.
    pub diagnoses_without_findings: usize,
    /// Diagnoses dropped under `FailurePolicy::Skip`.
    pub diagnoses_failed: usize,
    pub records_emitted: usize,
}

impl CorpusReport {
    fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            diagnoses_selected: 0,
            seed_truths: 0,
            truths_built: 0,
            diagnoses_without_findings: 0,
            diagnoses_failed: 0,
            records_emitted: 0,
        }
    }
}

/// Truths ready for sampling, with the report so far.
#[derive(Debug, Clone)]
pub struct TruthCatalog {
    pub truths: Vec<Truth>,
    pub report: CorpusReport,
}

/// The generated records and the run report.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub records: Vec<Record>,
    pub report: CorpusReport,
}

/// Orchestrates discovery, truth construction, weighting and sampling.
pub struct CorpusDriver<'a> {
    ontology: &'a dyn OntologyGateway,
    prevalence: &'a dyn PrevalencePolicy,
    settings: DriverSettings,
}

impl<'a> CorpusDriver<'a> {
    pub fn new(
        ontology: &'a dyn OntologyGateway,
        prevalence: &'a dyn PrevalencePolicy,
        settings: DriverSettings,
    ) -> Self {
        Self {
            ontology,
            prevalence,
            settings,
        }
    }

    pub fn settings(&self) -> &DriverSettings {
        &self.settings
    }

    /// Candidate diagnoses: every descendant of the diagnosis root, or
    /// `diagnosis_limit` uniform draws from them.
    pub fn select_diagnoses<R: Rng + ?Sized>(&self, rng: &mut R) -> CasebookResult<Vec<Concept>> {
        let root = self.ontology.fetch_concept(self.settings.diagnosis_root)?;
        let all = self.ontology.fetch_recursive_descendants(&root)?;

        let Some(limit) = self.settings.diagnosis_limit else {
            return Ok(all);
        };
        if all.is_empty() {
            warn!(root = %root.id, "diagnosis root has no descendants");
            return Ok(Vec::new());
        }
        (0..limit)
            .map(|_| draw_below(rng, all.len()).map(|i| all[i].clone()))
            .collect()
    }

    /// Load `seeds` and build a discovered truth for each selected diagnosis.
    pub fn build_truths<R: Rng + ?Sized>(
        &self,
        seeds: &[ExplicitTruth],
        rng: &mut R,
    ) -> CasebookResult<TruthCatalog> {
        let mut report = CorpusReport::new();
        let mut truths = Vec::new();

        for seed in seeds {
            if let Some(truth) = self.absorb(seed.load(self.ontology), seed.diagnosis, &mut report)? {
                truths.push(truth);
                report.seed_truths += 1;
            }
        }

        let discoverer = SiteFindingDiscoverer::new(self.ontology, self.settings.reference_region)?;
        let builder = TruthBuilder::new(
            self.ontology,
            discoverer,
            self.settings.max_problems,
            self.settings.range_policy,
        );

        let diagnoses = self.select_diagnoses(rng)?;
        report.diagnoses_selected = diagnoses.len();

        for diagnosis in &diagnoses {
            match self.absorb(builder.build(diagnosis, rng), diagnosis.id, &mut report)? {
                Some(Some(truth)) => {
                    truths.push(truth);
                    report.truths_built += 1;
                }
                Some(None) => {
                    debug!(diagnosis = %diagnosis.id, "no drawable candidate findings, diagnosis skipped");
                    report.diagnoses_without_findings += 1;
                }
                None => {}
            }
        }

        Ok(TruthCatalog { truths, report })
    }

    /// Sample every truth as many times as its prevalence warrants.
    pub fn sample_truths<R: Rng + ?Sized>(
        &self,
        catalog: TruthCatalog,
        rng: &mut R,
    ) -> CasebookResult<Corpus> {
        let TruthCatalog { truths, mut report } = catalog;
        let weighter = PrevalenceWeighter::new(self.prevalence, self.settings.scale);
        let mut records = Vec::new();

        for truth in &truths {
            let diagnosis = truth.diagnosis().id;
            let Some(count) = self.absorb(weighter.replications(truth), diagnosis, &mut report)?
            else {
                continue;
            };
            records.extend((0..count).map(|_| sample(truth, rng)));
        }

        report.records_emitted = records.len();
        info!(
            run_id = %report.run_id,
            seed_truths = report.seed_truths,
            diagnoses_selected = report.diagnoses_selected,
            truths_built = report.truths_built,
            without_findings = report.diagnoses_without_findings,
            failed = report.diagnoses_failed,
            records = report.records_emitted,
            "corpus generated"
        );

        Ok(Corpus { records, report })
    }

    /// Build every truth and sample the whole corpus.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        seeds: &[ExplicitTruth],
        rng: &mut R,
    ) -> CasebookResult<Corpus> {
        let catalog = self.build_truths(seeds, rng)?;
        self.sample_truths(catalog, rng)
    }

    /// Apply the failure policy to one diagnosis' result.
    ///
    /// Degenerate sampling is a programming error and always propagates.
    fn absorb<T>(
        &self,
        result: CasebookResult<T>,
        diagnosis: ConceptId,
        report: &mut CorpusReport,
    ) -> CasebookResult<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err @ CasebookError::DegenerateSampling { .. }) => Err(err),
            Err(err) => match self.settings.failure_policy {
                FailurePolicy::Abort => Err(err),
                FailurePolicy::Skip => {
                    warn!(diagnosis = %diagnosis, error = %err, "diagnosis skipped");
                    report.diagnoses_failed += 1;
                    Ok(None)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::{rngs::StdRng, SeedableRng};

    use casebook_contracts::clinical::Duration;

    use super::*;
    use crate::{explicit::ExplicitProblem, mock::*};

    fn seed() -> ExplicitTruth {
        ExplicitTruth {
            diagnosis: ConceptId(INFARCTION),
            problems: vec![ExplicitProblem::new(CHEST_PAIN, Duration::Acute, 0.95)],
            mean_age: 60,
            std_dev_age: 20,
        }
    }

    fn settings(limit: Option<usize>, failure_policy: FailurePolicy) -> DriverSettings {
        DriverSettings {
            diagnosis_limit: limit,
            failure_policy,
            reference_region: ConceptId(THORAX),
            ..DriverSettings::default()
        }
    }

    #[test]
    fn unlimited_selection_uses_every_diagnosis() {
        let ontology = MockOntology::new();
        let prevalence = FixedPrevalence(HashMap::new());
        let driver = CorpusDriver::new(&ontology, &prevalence, settings(None, FailurePolicy::Abort));

        let selected = driver.select_diagnoses(&mut StdRng::seed_from_u64(1)).unwrap();
        // Infarction, heart failure, pneumonia, gastritis, hereditary disease, orphan.
        assert_eq!(selected.len(), 6);
    }

    #[test]
    fn limited_selection_draws_with_replacement() {
        let ontology = MockOntology::new();
        let prevalence = FixedPrevalence(HashMap::new());
        let driver =
            CorpusDriver::new(&ontology, &prevalence, settings(Some(12), FailurePolicy::Abort));

        let selected = driver.select_diagnoses(&mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(selected.len(), 12);
    }

    #[test]
    fn seeds_come_first_and_empty_diagnoses_are_skipped() {
        let ontology = MockOntology::new();
        let prevalence = FixedPrevalence(HashMap::new());
        let driver = CorpusDriver::new(&ontology, &prevalence, settings(None, FailurePolicy::Abort));

        let catalog = driver
            .build_truths(&[seed()], &mut StdRng::seed_from_u64(3))
            .unwrap();

        assert_eq!(catalog.truths[0].problems().len(), 1);
        assert_eq!(catalog.truths[0].diagnosis().id, ConceptId(INFARCTION));
        assert_eq!(catalog.report.seed_truths, 1);
        // Hereditary disease has no site, orphan's site is outside every region.
        assert_eq!(catalog.report.diagnoses_without_findings, 2);
        assert_eq!(catalog.report.truths_built, 4);
        assert_eq!(catalog.truths.len(), 5);
    }

    #[test]
    fn records_follow_truth_order_and_prevalence() {
        let ontology = MockOntology::new();
        let prevalence = FixedPrevalence(HashMap::from([(INFARCTION, 0.001)]));
        let driver =
            CorpusDriver::new(&ontology, &prevalence, settings(Some(0), FailurePolicy::Abort));

        let corpus = driver
            .generate(&[seed()], &mut StdRng::seed_from_u64(3))
            .unwrap();

        // 5 + floor(0.001 * 10000) * 1 = 15
        assert_eq!(corpus.records.len(), 15);
        assert_eq!(corpus.report.records_emitted, 15);
        assert!(corpus
            .records
            .iter()
            .all(|r| r.answer.concept_id == ConceptId(INFARCTION)));
    }

    #[test]
    fn every_truth_yields_at_least_five_records() {
        let ontology = MockOntology::new();
        let prevalence = FixedPrevalence(HashMap::new());
        let driver = CorpusDriver::new(&ontology, &prevalence, settings(None, FailurePolicy::Abort));

        let corpus = driver
            .generate(&[seed()], &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(corpus.records.len(), 5 * 5);
    }

    #[test]
    fn abort_policy_propagates_bad_seed() {
        let ontology = MockOntology::new();
        let prevalence = FixedPrevalence(HashMap::new());
        let driver = CorpusDriver::new(&ontology, &prevalence, settings(None, FailurePolicy::Abort));
        let mut broken = seed();
        broken.diagnosis = ConceptId(7);

        let err = driver
            .generate(&[broken], &mut StdRng::seed_from_u64(3))
            .unwrap_err();
        assert!(matches!(err, CasebookError::ConceptNotFound { .. }));
    }

    #[test]
    fn skip_policy_drops_bad_seed() {
        let ontology = MockOntology::new();
        let prevalence = FixedPrevalence(HashMap::new());
        let driver = CorpusDriver::new(&ontology, &prevalence, settings(None, FailurePolicy::Skip));
        let mut broken = seed();
        broken.diagnosis = ConceptId(7);

        let corpus = driver
            .generate(&[broken, seed()], &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(corpus.report.diagnoses_failed, 1);
        assert_eq!(corpus.report.seed_truths, 1);
    }

    #[test]
    fn legacy_ranges_skip_single_candidate_diagnoses() {
        let ontology = MockOntology::new();
        let prevalence = FixedPrevalence(HashMap::new());
        let settings = DriverSettings {
            range_policy: RangePolicy::Legacy,
            ..settings(None, FailurePolicy::Abort)
        };
        let driver = CorpusDriver::new(&ontology, &prevalence, settings);

        let catalog = driver
            .build_truths(&[seed()], &mut StdRng::seed_from_u64(3))
            .unwrap();
        // Gastritis has a single candidate, which legacy draws cannot reach.
        assert_eq!(catalog.report.truths_built, 3);
        assert_eq!(catalog.report.diagnoses_without_findings, 3);
        assert!(catalog
            .truths
            .iter()
            .all(|t| t.diagnosis().id != ConceptId(GASTRITIS)));
    }

    #[test]
    fn same_seed_reproduces_corpus() {
        let ontology = MockOntology::new();
        let prevalence = FixedPrevalence(HashMap::from([(PNEUMONIA, 0.002)]));
        let driver =
            CorpusDriver::new(&ontology, &prevalence, settings(Some(6), FailurePolicy::Abort));

        let a = driver.generate(&[seed()], &mut StdRng::seed_from_u64(99)).unwrap();
        let b = driver.generate(&[seed()], &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a.records, b.records);
    }
}
