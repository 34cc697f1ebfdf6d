//! # casebook-config
//!
//! TOML-driven settings for the casebook generator.
//!
//! ## Overview
//!
//! [`GeneratorConfig`] holds every tunable of a corpus run: seed, diagnosis
//! limit, scale, range and failure policies, extra seed truths and the
//! prevalence table. [`PrevalenceTable`] implements
//! [`PrevalencePolicy`](casebook_core::traits::PrevalencePolicy) from that
//! table, imputing missing figures from the nearest ancestor.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use casebook_config::{GeneratorConfig, PrevalenceTable};
//!
//! let config = GeneratorConfig::from_file(Path::new("casebook.toml"))?;
//! let prevalence = PrevalenceTable::from_config(&config.prevalence);
//! ```

pub mod prevalence;
pub mod settings;

pub use prevalence::PrevalenceTable;
pub use settings::{GeneratorConfig, PrevalenceConfig, PrevalenceEntry};

// ── Tests ─────────────────────────────────────────────────────────────────────
