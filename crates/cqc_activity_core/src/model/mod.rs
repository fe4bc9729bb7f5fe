//! Normalized output model for regulated activity extraction.
//!
//! # Responsibility
//! - Define the fixed shapes handed back to callers for storage.
//! - Keep serialized field names stable for the document column.
//!
//! # Invariants
//! - Every `NormalizedActivity` carries a non-empty code and name.
//! - Every `NormalizedContact` carries at least one non-empty field.

pub mod activity;
