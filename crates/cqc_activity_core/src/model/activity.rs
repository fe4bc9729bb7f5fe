//! Regulated activity output records.
//!
//! # Responsibility
//! - Define normalized activity/contact records and the extraction result.
//! - Match the wire shape written into the `activities_detailed` column.
//!
//! # Invariants
//! - `activities_simple` and `activities_detailed` are either both `None` or
//!   both `Some` with equal length and positional alignment.
//! - Neither list is ever `Some(vec![])`.
//! - `extraction_errors` is never `Some(vec![])`.

use crate::lookup;
use serde::{Deserialize, Serialize};

/// Person attached to a regulated activity, in canonical field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedContact {
    pub title: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    /// Role labels in source order, e.g. `Registered Manager`.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl NormalizedContact {
    /// Returns whether any field holds a non-empty value.
    pub fn has_content(&self) -> bool {
        [&self.title, &self.given_name, &self.family_name]
            .into_iter()
            .any(|field| field.as_deref().is_some_and(|value| !value.is_empty()))
            || !self.roles.is_empty()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|candidate| candidate == role)
    }
}

/// Regulated activity with its code and normalized contacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedActivity {
    /// CQC activity code, e.g. `RA5`.
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub contacts: Vec<NormalizedContact>,
}

/// Registered Manager contact flattened with the code of its owning activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredManager {
    pub title: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub roles: Vec<String>,
    pub activity_code: String,
}

/// Outcome of extracting regulated activities from one location.
///
/// `None` lists mean "nothing extracted"; callers distinguish a location with
/// no activities from a malformed one by the presence of `extraction_errors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Activity names for the flat string-array column.
    pub activities_simple: Option<Vec<String>>,
    /// Structured activities for the document column.
    pub activities_detailed: Option<Vec<NormalizedActivity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_errors: Option<Vec<String>>,
}

impl ExtractionResult {
    /// Result for a location with no activities to read.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Result for a location whose activity container is unusable.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            extraction_errors: Some(vec![message.into()]),
            ..Self::default()
        }
    }

    /// Builds a result from accumulated outputs, mapping empty lists to `None`.
    ///
    /// # Invariants
    /// - `detailed[i].name == simple[i]` for every index.
    pub(crate) fn from_parts(
        simple: Vec<String>,
        detailed: Vec<NormalizedActivity>,
        errors: Vec<String>,
    ) -> Self {
        debug_assert_eq!(simple.len(), detailed.len());
        Self {
            activities_simple: non_empty(simple),
            activities_detailed: non_empty(detailed),
            extraction_errors: non_empty(errors),
        }
    }

    /// Returns whether no activity was extracted.
    pub fn is_empty(&self) -> bool {
        self.activities_detailed.is_none()
    }

    pub fn has_errors(&self) -> bool {
        self.extraction_errors.is_some()
    }

    pub fn activity_codes(&self) -> Vec<&str> {
        lookup::activity_codes(self.activities_detailed.as_deref())
    }

    pub fn registered_managers(&self) -> Vec<RegisteredManager> {
        lookup::registered_managers(self.activities_detailed.as_deref())
    }

    pub fn has_activity(&self, code: &str) -> bool {
        lookup::has_activity(self.activities_detailed.as_deref(), code)
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

#[cfg(test)]
mod tests {
    use super::{ExtractionResult, NormalizedContact};

    fn contact() -> NormalizedContact {
        NormalizedContact {
            title: None,
            given_name: None,
            family_name: None,
            roles: Vec::new(),
        }
    }

    #[test]
    fn empty_contact_has_no_content() {
        assert!(!contact().has_content());

        let blank_strings = NormalizedContact {
            title: Some(String::new()),
            ..contact()
        };
        assert!(!blank_strings.has_content());
    }

    #[test]
    fn any_single_field_counts_as_content() {
        assert!(NormalizedContact {
            family_name: Some("Bewley".to_string()),
            ..contact()
        }
        .has_content());
        assert!(NormalizedContact {
            roles: vec!["Registered Manager".to_string()],
            ..contact()
        }
        .has_content());
    }

    #[test]
    fn from_parts_maps_empty_lists_to_none() {
        let result = ExtractionResult::from_parts(Vec::new(), Vec::new(), Vec::new());
        assert_eq!(result, ExtractionResult::empty());
        assert!(result.is_empty());
        assert!(!result.has_errors());
    }

    #[test]
    fn malformed_keeps_single_error() {
        let result = ExtractionResult::malformed("regulatedActivities is not a list");
        assert!(result.is_empty());
        assert_eq!(
            result.extraction_errors.as_deref(),
            Some(&["regulatedActivities is not a list".to_string()][..])
        );
    }
}
