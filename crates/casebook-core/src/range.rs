//! Uniform index draws over candidate and enum lists.
//!
//! Legacy corpora were drawn from `[0, len - 1)`, so the last
//! element of a list could never be chosen. `RangePolicy` selects between
//! that and a full-range draw.

use rand::Rng;
use serde::{Deserialize, Serialize};

use casebook_contracts::error::{CasebookError, CasebookResult};

/// How index draws treat the last element of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangePolicy {
    /// Match legacy corpora: the last element is never drawn.
    ///
    /// A single-element list has no drawable index under this policy and
    /// yields `DegenerateSampling`.
    Legacy,
    /// Draw uniformly over the whole list.
    #[default]
    Corrected,
}

impl RangePolicy {
    /// Whether a list of `len` elements has at least one drawable index.
    pub fn can_draw(&self, len: usize) -> bool {
        match self {
            RangePolicy::Legacy => len > 1,
            RangePolicy::Corrected => len > 0,
        }
    }

    /// Draw an index into a list of `len` elements.
    pub fn draw_index<R: Rng + ?Sized>(&self, rng: &mut R, len: usize) -> CasebookResult<usize> {
        let upper = match self {
            RangePolicy::Legacy => len.saturating_sub(1),
            RangePolicy::Corrected => len,
        };
        draw_below(rng, upper)
    }

    /// Draw one element of `items`.
    pub fn choose<'a, T, R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        items: &'a [T],
    ) -> CasebookResult<&'a T> {
        let index = self.draw_index(rng, items.len())?;
        Ok(&items[index])
    }
}

/// Uniform integer in `[0, upper)`. An empty range is a programming error.
pub fn draw_below<R: Rng + ?Sized>(rng: &mut R, upper: usize) -> CasebookResult<usize> {
    if upper == 0 {
        return Err(CasebookError::DegenerateSampling {
            reason: "cannot draw from an empty range".to_string(),
        });
    }
    Ok(rng.gen_range(0..upper))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn legacy_never_draws_last_index() {
        let mut rng = StdRng::seed_from_u64(7);
        let seen: HashSet<usize> = (0..2_000)
            .map(|_| RangePolicy::Legacy.draw_index(&mut rng, 4).unwrap())
            .collect();
        assert_eq!(seen, HashSet::from([0, 1, 2]));
    }

    #[test]
    fn corrected_draws_every_index() {
        let mut rng = StdRng::seed_from_u64(7);
        let seen: HashSet<usize> = (0..2_000)
            .map(|_| RangePolicy::Corrected.draw_index(&mut rng, 4).unwrap())
            .collect();
        assert_eq!(seen, HashSet::from([0, 1, 2, 3]));
    }

    #[test]
    fn legacy_single_element_is_degenerate() {
        let mut rng = StdRng::seed_from_u64(7);
        let err = RangePolicy::Legacy.draw_index(&mut rng, 1).unwrap_err();
        assert!(matches!(err, CasebookError::DegenerateSampling { .. }));
    }

    #[test]
    fn can_draw_matches_draw_index() {
        let mut rng = StdRng::seed_from_u64(7);
        for policy in [RangePolicy::Legacy, RangePolicy::Corrected] {
            for len in 0..4 {
                assert_eq!(policy.can_draw(len), policy.draw_index(&mut rng, len).is_ok());
            }
        }
    }

    #[test]
    fn empty_range_fails_loudly() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(RangePolicy::Corrected.draw_index(&mut rng, 0).is_err());
        assert!(draw_below(&mut rng, 0).is_err());
    }
}
