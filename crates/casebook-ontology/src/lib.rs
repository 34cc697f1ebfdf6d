//! # casebook-ontology
//!
//! Ontology gateways for the casebook generator.
//!
//! ## Overview
//!
//! [`InMemoryOntology`] indexes a JSON [`OntologySnapshot`] and implements
//! [`OntologyGateway`](casebook_core::traits::OntologyGateway).
//! [`CachingOntology`] wraps any gateway and memoizes ancestor lists, which
//! every stage of the pipeline asks for repeatedly.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use casebook_ontology::{CachingOntology, InMemoryOntology, OntologySnapshot};
//!
//! let snapshot = OntologySnapshot::from_file(Path::new("snomed-subset.json"))?;
//! let ontology = CachingOntology::new(InMemoryOntology::from_snapshot(&snapshot)?);
//! ```

pub mod caching;
pub mod memory;
pub mod snapshot;

pub use caching::{CacheStats, CachingOntology};
pub use memory::InMemoryOntology;
pub use snapshot::OntologySnapshot;

// ── Tests ─────────────────────────────────────────────────────────────────────
