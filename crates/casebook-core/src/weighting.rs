//! Prevalence weighting: how many records each truth contributes.
//!
//! `p = 5 + floor(prevalence * 10000) * scale`. Every diagnosis yields at
//! least five records and counts are monotonic in prevalence.

use tracing::debug;

use casebook_contracts::{error::CasebookResult, truth::Truth};

use crate::traits::PrevalencePolicy;

/// Records emitted for a diagnosis regardless of its prevalence.
pub const MIN_REPLICATION: usize = 5;

/// Resolution at which prevalence fractions are bucketed.
pub const PREVALENCE_RESOLUTION: f64 = 10_000.0;

/// Replication count for a prevalence fraction.
///
/// Prevalence is clamped to `[0, 1]`; non-finite values count as zero.
pub fn replication_count(prevalence: f64, scale: u32) -> usize {
    let prevalence = if prevalence.is_finite() {
        prevalence.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let buckets = (prevalence * PREVALENCE_RESOLUTION).floor() as usize;
    MIN_REPLICATION + buckets * scale as usize
}

/// Applies a `PrevalencePolicy` to truths.
pub struct PrevalenceWeighter<'a> {
    policy: &'a dyn PrevalencePolicy,
    scale: u32,
}

impl<'a> PrevalenceWeighter<'a> {
    pub fn new(policy: &'a dyn PrevalencePolicy, scale: u32) -> Self {
        Self { policy, scale }
    }

    /// Number of records to sample from `truth`.
    pub fn replications(&self, truth: &Truth) -> CasebookResult<usize> {
        let prevalence = self.policy.prevalence(truth.diagnosis(), truth.ancestors())?;
        let count = replication_count(prevalence, self.scale);
        debug!(
            diagnosis = %truth.diagnosis().id,
            prevalence,
            scale = self.scale,
            count,
            "replication count computed"
        );
        Ok(count)
    }
}
