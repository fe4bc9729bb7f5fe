//! Location-level extraction entry points.
//!
//! # Responsibility
//! - Decode a location payload and fold its activity entries into an
//!   `ExtractionResult`.
//! - Route diagnostics to an injected sink when verbose output is requested.
//!
//! # Invariants
//! - Entries are processed in input order; output order follows input order.
//! - Every skipped entry produces exactly one error string naming its index.
//! - Names and detailed activities are pushed together, keeping both lists
//!   aligned.

use crate::extract::contact::normalize_contacts;
use crate::extract::diagnostics::{DiagnosticSink, LogSink, UNKNOWN_LOCATION};
use crate::extract::validate::validate_activity;
use crate::model::activity::{ExtractionResult, NormalizedActivity};
use crate::payload::{
    parse_location, PayloadError, RawActivity, RawEntry, RawField, RawLocation, ACTIVITIES_KEY,
};
use log::debug;
use serde_json::Value;

/// Extraction switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Run structural validation before normalizing each entry.
    pub validate: bool,
    /// Send recorded errors to the diagnostic sink.
    pub verbose: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            validate: true,
            verbose: false,
        }
    }
}

impl ExtractOptions {
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Extracts regulated activities from one location, logging diagnostics
/// through `log` when verbose.
pub fn extract(location: &Value, options: ExtractOptions) -> ExtractionResult {
    extract_with_sink(location, options, &LogSink)
}

/// Extracts regulated activities from one location.
///
/// # Contract
/// - Absent or falsy `regulatedActivities`: both lists `None`, no errors.
/// - Truthy non-list `regulatedActivities`: both lists `None`, one error.
/// - Otherwise each entry is either extracted or skipped with an indexed error.
/// - `sink` is called only when `options.verbose` and errors were recorded.
pub fn extract_with_sink(
    location: &Value,
    options: ExtractOptions,
    sink: &dyn DiagnosticSink,
) -> ExtractionResult {
    let location = RawLocation::from_value(location);

    let result = match location.activities {
        RawField::Absent => ExtractionResult::empty(),
        RawField::Mismatched(_) => {
            ExtractionResult::malformed(format!("{ACTIVITIES_KEY} is not a list"))
        }
        RawField::Present(entries) => fold_entries(entries, options.validate).into_result(),
    };

    debug!(
        "event=activity_extraction module=extract status=ok location_id={} extracted={} errors={}",
        location.location_id.as_deref().unwrap_or(UNKNOWN_LOCATION),
        result.activities_detailed.as_ref().map_or(0, Vec::len),
        result.extraction_errors.as_ref().map_or(0, Vec::len)
    );

    if options.verbose {
        if let Some(errors) = &result.extraction_errors {
            sink.report(location.location_id.as_deref(), errors);
        }
    }

    result
}

/// Parses `json` as a location payload and extracts from it.
///
/// # Errors
/// - Returns `PayloadError` when `json` is not a JSON object. Malformed
///   activity data inside a valid object is reported in the result instead.
pub fn extract_from_str(
    json: &str,
    options: ExtractOptions,
) -> Result<ExtractionResult, PayloadError> {
    let location = parse_location(json)?;
    Ok(extract(&location, options))
}

#[derive(Debug, Default)]
struct Accumulator {
    simple: Vec<String>,
    detailed: Vec<NormalizedActivity>,
    errors: Vec<String>,
}

impl Accumulator {
    fn into_result(self) -> ExtractionResult {
        ExtractionResult::from_parts(self.simple, self.detailed, self.errors)
    }
}

fn fold_entries(entries: Vec<RawEntry<RawActivity>>, validate: bool) -> Accumulator {
    entries
        .into_iter()
        .enumerate()
        .fold(Accumulator::default(), |mut acc, (index, entry)| {
            match extract_entry(index, entry, validate) {
                Ok(activity) => {
                    acc.simple.push(activity.name.clone());
                    acc.detailed.push(activity);
                }
                Err(error) => acc.errors.push(error),
            }
            acc
        })
}

fn extract_entry(
    index: usize,
    entry: RawEntry<RawActivity>,
    validate: bool,
) -> Result<NormalizedActivity, String> {
    let activity = match entry {
        RawEntry::Record(activity) => activity,
        RawEntry::NotRecord(kind) => {
            return Err(format!("Activity {index}: Not a dictionary (type: {kind})"));
        }
    };

    if validate {
        let report = validate_activity(&activity);
        if !report.is_valid() {
            return Err(format!("Activity {index}: {}", report.errors.join(", ")));
        }
    }

    // Applies with and without `validate`.
    let RawActivity {
        code,
        name,
        contacts,
    } = activity;
    let (Some(code), Some(name)) = (code.into_present(), name.into_present()) else {
        return Err(format!("Activity {index}: Missing code or name"));
    };

    let contacts = contacts
        .present()
        .map(|entries| normalize_contacts(entries))
        .unwrap_or_default();

    Ok(NormalizedActivity {
        code,
        name,
        contacts,
    })
}

#[cfg(test)]
mod tests {
    use super::{extract, extract_from_str, extract_with_sink, ExtractOptions};
    use crate::extract::diagnostics::CollectingSink;
    use crate::payload::PayloadError;
    use serde_json::json;

    #[test]
    fn options_default_to_validate_quietly() {
        let options = ExtractOptions::default();
        assert!(options.validate);
        assert!(!options.verbose);

        let options = options.with_validation(false).with_verbose(true);
        assert!(!options.validate);
        assert!(options.verbose);
    }

    #[test]
    fn falsy_activity_containers_are_not_errors() {
        for activities in [json!(null), json!([]), json!(0), json!(""), json!(false), json!({})] {
            let result = extract(
                &json!({"regulatedActivities": activities.clone()}),
                ExtractOptions::default(),
            );
            assert!(result.is_empty());
            assert!(!result.has_errors(), "{activities} should not be an error");
        }
    }

    #[test]
    fn truthy_non_list_container_is_structural_error() {
        let result = extract(
            &json!({"regulatedActivities": {"code": "RA1"}}),
            ExtractOptions::default(),
        );
        assert!(result.is_empty());
        assert_eq!(
            result.extraction_errors,
            Some(vec!["regulatedActivities is not a list".to_string()])
        );
    }

    #[test]
    fn validation_errors_are_joined_per_entry() {
        let result = extract(
            &json!({"regulatedActivities": [{"code": 12, "name": null}]}),
            ExtractOptions::default(),
        );
        assert_eq!(
            result.extraction_errors,
            Some(vec![
                "Activity 0: Activity code must be string, got number, Missing activity name"
                    .to_string()
            ])
        );
    }

    #[test]
    fn missing_fields_are_caught_without_validation() {
        let options = ExtractOptions::default().with_validation(false);
        let result = extract(
            &json!({"regulatedActivities": [
                {"code": "RA1"},
                {"code": 3, "name": "Numeric code"},
                {"code": "XX9", "name": "Unprefixed"}
            ]}),
            options,
        );

        assert_eq!(
            result.extraction_errors,
            Some(vec![
                "Activity 0: Missing code or name".to_string(),
                "Activity 1: Missing code or name".to_string()
            ])
        );
        assert_eq!(result.activities_simple, Some(vec!["Unprefixed".to_string()]));
        assert_eq!(result.activity_codes(), vec!["XX9"]);
    }

    #[test]
    fn contacts_of_wrong_kind_become_empty_without_validation() {
        let result = extract(
            &json!({"regulatedActivities": [
                {"code": "RA1", "name": "n", "contacts": "Dr Smith"}
            ]}),
            ExtractOptions::default().with_validation(false),
        );
        let detailed = result.activities_detailed.unwrap();
        assert!(detailed[0].contacts.is_empty());
    }

    #[test]
    fn sink_receives_errors_only_when_verbose() {
        let payload = json!({
            "locationId": "1-10000302982",
            "regulatedActivities": ["bogus"]
        });

        let quiet = CollectingSink::new();
        extract_with_sink(&payload, ExtractOptions::default(), &quiet);
        assert!(quiet.reports().is_empty());

        let loud = CollectingSink::new();
        extract_with_sink(
            &payload,
            ExtractOptions::default().with_verbose(true),
            &loud,
        );
        let reports = loud.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].location_id.as_deref(), Some("1-10000302982"));
        assert_eq!(
            reports[0].errors,
            vec!["Activity 0: Not a dictionary (type: string)"]
        );
    }

    #[test]
    fn sink_is_silent_when_nothing_failed() {
        let sink = CollectingSink::new();
        extract_with_sink(
            &json!({"regulatedActivities": [{"code": "RA6", "name": "Diagnostic and screening procedures"}]}),
            ExtractOptions::default().with_verbose(true),
            &sink,
        );
        assert!(sink.reports().is_empty());
    }

    #[test]
    fn extract_from_str_reports_unparseable_payloads() {
        let err = extract_from_str("not json", ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, PayloadError::InvalidJson(_)));

        let result = extract_from_str(
            r#"{"regulatedActivities": [{"code": "RA9", "name": "Maternity and midwifery services"}]}"#,
            ExtractOptions::default(),
        )
        .unwrap();
        assert!(result.has_activity("RA9"));
    }
}
