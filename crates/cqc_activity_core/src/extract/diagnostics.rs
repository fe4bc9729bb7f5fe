//! Diagnostic sinks for verbose extraction.
//!
//! # Responsibility
//! - Receive extraction errors when the caller asks for verbose output.
//! - Keep presentation out of the extraction pipeline.
//!
//! # Invariants
//! - Sinks observe errors only; they cannot change the extraction result.

use log::warn;
use std::cell::RefCell;

/// Location label used when the payload carries no `locationId`.
pub const UNKNOWN_LOCATION: &str = "unknown";

/// Receiver for extraction errors of one location.
pub trait DiagnosticSink {
    /// Called at most once per extraction, with a non-empty `errors` slice.
    fn report(&self, location_id: Option<&str>, errors: &[String]);
}

impl<F> DiagnosticSink for F
where
    F: Fn(Option<&str>, &[String]),
{
    fn report(&self, location_id: Option<&str>, errors: &[String]) {
        self(location_id, errors)
    }
}

/// Default sink: one warning header per location, then one warning per error.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, location_id: Option<&str>, errors: &[String]) {
        let location_id = location_id.unwrap_or(UNKNOWN_LOCATION);
        warn!(
            "event=activity_extraction module=extract status=warn location_id={} error_count={}",
            location_id,
            errors.len()
        );
        for error in errors {
            warn!("event=activity_extraction_error module=extract location_id={location_id} detail={error}");
        }
    }
}

/// One report captured by `CollectingSink`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticReport {
    pub location_id: Option<String>,
    pub errors: Vec<String>,
}

/// Sink that keeps reports in memory, for callers that render errors themselves.
#[derive(Debug, Default)]
pub struct CollectingSink {
    reports: RefCell<Vec<DiagnosticReport>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<DiagnosticReport> {
        self.reports.borrow().clone()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, location_id: Option<&str>, errors: &[String]) {
        self.reports.borrow_mut().push(DiagnosticReport {
            location_id: location_id.map(str::to_string),
            errors: errors.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{CollectingSink, DiagnosticSink};
    use std::cell::Cell;

    #[test]
    fn collecting_sink_keeps_reports_in_order() {
        let sink = CollectingSink::new();
        sink.report(Some("1-101"), &["Activity 0: Missing code or name".to_string()]);
        sink.report(None, &["regulatedActivities is not a list".to_string()]);

        let reports = sink.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].location_id.as_deref(), Some("1-101"));
        assert_eq!(reports[1].location_id, None);
    }

    #[test]
    fn closures_are_sinks() {
        let seen = Cell::new(0);
        let sink = |_: Option<&str>, errors: &[String]| seen.set(seen.get() + errors.len());
        sink.report(None, &["a".to_string(), "b".to_string()]);
        assert_eq!(seen.get(), 2);
    }
}
