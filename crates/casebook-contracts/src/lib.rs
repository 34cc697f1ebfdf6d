//! # casebook-contracts
//!
//! Shared data model for the casebook clinical vignette generator.
//!
//! Every crate in the workspace imports from here. No generation logic lives
//! in this crate, only concepts, truths, records and the error type.

pub mod clinical;
pub mod concept;
pub mod error;
pub mod record;
pub mod truth;
