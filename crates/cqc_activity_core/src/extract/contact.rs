//! Contact normalization.
//!
//! Maps CQC `person*` field names onto `NormalizedContact` and drops contacts
//! that carry no content.

use crate::model::activity::NormalizedContact;
use crate::payload::{RawContact, RawEntry};

/// Normalizes one raw contact entry.
///
/// Returns `None` for non-object entries and for contacts with no non-empty
/// field. Roles of the wrong JSON kind normalize to an empty list.
pub fn normalize_contact(entry: &RawEntry<RawContact>) -> Option<NormalizedContact> {
    let RawEntry::Record(contact) = entry else {
        return None;
    };

    let normalized = NormalizedContact {
        title: contact.title.present().cloned(),
        given_name: contact.given_name.present().cloned(),
        family_name: contact.family_name.present().cloned(),
        roles: contact.roles.present().cloned().unwrap_or_default(),
    };

    normalized.has_content().then_some(normalized)
}

/// Normalizes a contact list, keeping source order and dropping empties.
pub fn normalize_contacts(entries: &[RawEntry<RawContact>]) -> Vec<NormalizedContact> {
    entries.iter().filter_map(normalize_contact).collect()
}
