//! Result and record model for the classification engine.
//!
//! # Responsibility
//! - Define the ephemeral `ClassificationResult` returned per call.
//! - Define storage-facing projections handed to the persistence layer.
//!
//! # Invariants
//! - Results are created fresh per call and never persisted by core.

pub mod classification;
pub mod record;
