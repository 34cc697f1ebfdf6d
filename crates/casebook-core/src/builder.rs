//! Truth construction from discovered candidate findings.
//!
//! For a diagnosis with `c` candidates the builder draws
//! `k = 1 + uniform[0, min(max_problems, c))` problems with replacement,
//! each with a random onset and a random probability in `[0, 1)`, then
//! attaches population demographics.

use rand::Rng;
use tracing::debug;

use casebook_contracts::{
    clinical::{Duration, SexBias},
    concept::Concept,
    error::CasebookResult,
    truth::{Problem, Truth, MAX_AGE_STD_DEV},
};

use crate::{
    age::random_age,
    discovery::SiteFindingDiscoverer,
    range::{draw_below, RangePolicy},
    traits::OntologyGateway,
};

/// Default upper bound on the number of problems in a discovered truth.
pub const DEFAULT_MAX_PROBLEMS: usize = 30;

/// Builds randomized truths for arbitrary diagnoses.
pub struct TruthBuilder<'a> {
    ontology: &'a dyn OntologyGateway,
    discoverer: SiteFindingDiscoverer<'a>,
    max_problems: usize,
    range_policy: RangePolicy,
}

impl<'a> TruthBuilder<'a> {
    pub fn new(
        ontology: &'a dyn OntologyGateway,
        discoverer: SiteFindingDiscoverer<'a>,
        max_problems: usize,
        range_policy: RangePolicy,
    ) -> Self {
        Self {
            ontology,
            discoverer,
            max_problems,
            range_policy,
        }
    }

    /// Build a truth for `diagnosis`.
    ///
    /// Returns `Ok(None)` when discovery finds no candidate the range policy
    /// can draw: none at all, or a single one under `RangePolicy::Legacy`.
    /// The caller is expected to skip such diagnoses. Lookup failures
    /// propagate.
    pub fn build<R: Rng + ?Sized>(
        &self,
        diagnosis: &Concept,
        rng: &mut R,
    ) -> CasebookResult<Option<Truth>> {
        let candidates = self.discoverer.discover(diagnosis)?;
        if !self.range_policy.can_draw(candidates.len()) {
            debug!(
                diagnosis = %diagnosis.id,
                candidates = candidates.len(),
                range_policy = ?self.range_policy,
                "no drawable candidate findings"
            );
            return Ok(None);
        }

        let count = 1 + draw_below(rng, self.max_problems.min(candidates.len()))?;
        let mut problems = Vec::with_capacity(count);
        for _ in 0..count {
            let finding = self.range_policy.choose(rng, &candidates)?;
            let duration = *self.range_policy.choose(rng, &Duration::ONSETS)?;
            let probability = rng.gen::<f64>();
            let ancestors = self.ontology.ancestor_ids(finding)?;
            problems.push(Problem::new(finding.clone(), ancestors, duration, probability)?);
        }

        let mean_age = random_age(rng);
        let spread = mean_age.min(MAX_AGE_STD_DEV);
        let std_dev_age = if spread > 0 { rng.gen_range(0..spread) } else { 0 };
        let sex_bias = *self.range_policy.choose(rng, &SexBias::ALL)?;
        let ancestors = self.ontology.ancestor_ids(diagnosis)?;

        debug!(
            diagnosis = %diagnosis.id,
            candidates = candidates.len(),
            problems = problems.len(),
            mean_age,
            std_dev_age,
            ?sex_bias,
            "truth built"
        );

        Ok(Some(Truth::new(
            diagnosis.clone(),
            ancestors,
            problems,
            sex_bias,
            mean_age,
            std_dev_age,
        )))
    }
}
