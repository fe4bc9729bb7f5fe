//! Structural validation of raw activity entries.

use crate::payload::{RawActivity, RawContact, RawEntry, RawField};

/// Prefix shared by every CQC regulated activity code.
pub const ACTIVITY_CODE_PREFIX: &str = "RA";

/// Validation outcome for one activity entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityValidation {
    /// Every violated rule, in rule order.
    pub errors: Vec<String>,
}

impl ActivityValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks one activity entry against every structural rule.
///
/// Rules do not short-circuit: a bad code does not hide a bad name or bad
/// contacts.
pub fn validate_activity(activity: &RawActivity) -> ActivityValidation {
    let mut errors = Vec::new();

    match &activity.code {
        RawField::Absent => errors.push("Missing activity code".to_string()),
        RawField::Mismatched(kind) => {
            errors.push(format!("Activity code must be string, got {kind}"));
        }
        RawField::Present(code) if !code.starts_with(ACTIVITY_CODE_PREFIX) => {
            errors.push(format!("Invalid activity code format: {code}"));
        }
        RawField::Present(_) => {}
    }

    match &activity.name {
        RawField::Absent => errors.push("Missing activity name".to_string()),
        RawField::Mismatched(kind) => {
            errors.push(format!("Activity name must be string, got {kind}"));
        }
        RawField::Present(_) => {}
    }

    match &activity.contacts {
        RawField::Absent => {}
        RawField::Mismatched(_) => errors.push("Contacts must be an array".to_string()),
        RawField::Present(contacts) => {
            for (index, contact) in contacts.iter().enumerate() {
                validate_contact_entry(index, contact, &mut errors);
            }
        }
    }

    ActivityValidation { errors }
}

fn validate_contact_entry(index: usize, entry: &RawEntry<RawContact>, errors: &mut Vec<String>) {
    match entry {
        RawEntry::NotRecord(_) => errors.push(format!("Contact {index} must be a dictionary")),
        RawEntry::Record(contact) => {
            if matches!(contact.roles, RawField::Mismatched(_)) {
                errors.push(format!("Contact {index}: personRoles must be an array"));
            }
        }
    }
}
