//! # casebook-core
//!
//! The truth-synthesis engine for the casebook generator.
//!
//! This crate provides:
//! - The seams to external collaborators (`OntologyGateway`, `PrevalencePolicy`)
//! - Site-based finding discovery and truth construction
//! - Record sampling and prevalence-weighted corpus generation
//!
//! All randomness is drawn from a caller-supplied `rand::Rng`, so a seeded
//! generator reproduces a corpus exactly.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use casebook_core::{CorpusDriver, DriverSettings};
//!
//! let driver = CorpusDriver::new(&ontology, &prevalence, DriverSettings::default());
//! let corpus = driver.generate(&seeds, &mut rng)?;
//! ```

pub mod age;
pub mod builder;
pub mod corpus;
pub mod discovery;
pub mod explicit;
pub mod range;
pub mod synthesizer;
pub mod traits;
pub mod weighting;

pub use builder::TruthBuilder;
pub use corpus::{Corpus, CorpusDriver, CorpusReport, DriverSettings, FailurePolicy};
pub use discovery::SiteFindingDiscoverer;
pub use explicit::{ExplicitProblem, ExplicitTruth};
pub use range::RangePolicy;
pub use synthesizer::sample;
pub use weighting::{replication_count, PrevalenceWeighter};

#[cfg(test)]
pub(crate) mod mock;
