//! Regulated activity extraction pipeline.
//!
//! # Responsibility
//! - Validate raw activity entries and normalize their contacts.
//! - Turn one location payload into an `ExtractionResult` without failing.
//!
//! # Invariants
//! - Malformed input never produces an `Err` or a panic; it produces a
//!   recorded error string and a skipped entry.
//! - Stages hold no state between calls.

pub mod contact;
pub mod diagnostics;
pub mod orchestrator;
pub mod validate;
