//! # casebook-ref-snomed
//!
//! Reference data for the casebook generator:
//!
//! 1. **SNOMED CT subset**: real concept ids for five body regions, a dozen
//!    disorders and their sited findings, as an `OntologySnapshot`.
//! 2. **Seed truths**: the illustrative myocardial infarction profile.
//! 3. **Reference settings**: a generator config with prevalence figures.
//!
//! All figures are illustrative. No terminology server is contacted.

pub mod fixture;
pub mod seeds;

// ── Tests ─────────────────────────────────────────────────────────────────────
