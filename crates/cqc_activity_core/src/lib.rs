//! Regulated activity extraction for CQC location payloads.
//! Turns loosely-typed API data into a flat name list and a structured
//! activity list, recording diagnostics instead of failing.

pub mod extract;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod payload;
pub mod reference;

pub use extract::contact::{normalize_contact, normalize_contacts};
pub use extract::diagnostics::{
    CollectingSink, DiagnosticReport, DiagnosticSink, LogSink, UNKNOWN_LOCATION,
};
pub use extract::orchestrator::{extract, extract_from_str, extract_with_sink, ExtractOptions};
pub use extract::validate::{validate_activity, ActivityValidation, ACTIVITY_CODE_PREFIX};
pub use logging::{default_log_level, init_logging, logging_status};
pub use lookup::{activity_codes, has_activity, registered_managers, REGISTERED_MANAGER_ROLE};
pub use model::activity::{
    ExtractionResult, NormalizedActivity, NormalizedContact, RegisteredManager,
};
pub use payload::{JsonKind, PayloadError, RawActivity, RawContact, RawEntry, RawField};
pub use reference::{activity_name_for_code, regulated_activity_types};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
