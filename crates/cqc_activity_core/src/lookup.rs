//! Read-only queries over extracted activities.
//!
//! All helpers accept the borrowed form of
//! `ExtractionResult::activities_detailed` and treat `None` as an empty list.

use crate::model::activity::{NormalizedActivity, RegisteredManager};

/// Role label marking the person accountable for a regulated activity.
pub const REGISTERED_MANAGER_ROLE: &str = "Registered Manager";

/// Returns activity codes in extraction order.
pub fn activity_codes(detailed: Option<&[NormalizedActivity]>) -> Vec<&str> {
    detailed
        .unwrap_or_default()
        .iter()
        .map(|activity| activity.code.as_str())
        .collect()
}

/// Returns every Registered Manager contact, tagged with its activity code.
///
/// Ordered by activity, then by contact. The same person listed under several
/// activities yields one record per activity.
pub fn registered_managers(detailed: Option<&[NormalizedActivity]>) -> Vec<RegisteredManager> {
    detailed
        .unwrap_or_default()
        .iter()
        .flat_map(|activity| {
            activity
                .contacts
                .iter()
                .filter(|contact| contact.has_role(REGISTERED_MANAGER_ROLE))
                .map(|contact| RegisteredManager {
                    title: contact.title.clone(),
                    given_name: contact.given_name.clone(),
                    family_name: contact.family_name.clone(),
                    roles: contact.roles.clone(),
                    activity_code: activity.code.clone(),
                })
        })
        .collect()
}

/// Returns whether `code` was extracted for the location.
pub fn has_activity(detailed: Option<&[NormalizedActivity]>, code: &str) -> bool {
    activity_codes(detailed).contains(&code)
}
