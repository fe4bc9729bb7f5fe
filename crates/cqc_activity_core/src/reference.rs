//! CQC regulated activity reference table (RA1-RA16).
//!
//! # Invariants
//! - The table is immutable and built once per process.
//! - Code order is numeric (RA1..RA16), suitable for seeding a lookup table.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const REGULATED_ACTIVITY_TYPES: [(&str, &str); 16] = [
    (
        "RA1",
        "Assessment or medical treatment for persons detained under the Mental Health Act 1983",
    ),
    (
        "RA2",
        "Accommodation for persons who require nursing or personal care",
    ),
    (
        "RA3",
        "Accommodation for persons who require treatment for substance misuse",
    ),
    (
        "RA4",
        "Accommodation and nursing or personal care in the further education sector",
    ),
    ("RA5", "Treatment of disease, disorder or injury"),
    ("RA6", "Diagnostic and screening procedures"),
    (
        "RA7",
        "Management of supply of blood and blood derived products",
    ),
    (
        "RA8",
        "Transport services, triage and medical advice provided remotely",
    ),
    ("RA9", "Maternity and midwifery services"),
    ("RA10", "Termination of pregnancies"),
    ("RA11", "Services in slimming clinics"),
    ("RA12", "Nursing care"),
    ("RA13", "Personal care"),
    ("RA14", "Surgical procedures"),
    ("RA15", "Family planning services"),
    ("RA16", "Treatment of disease, disorder or injury"),
];

static NAMES_BY_CODE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| REGULATED_ACTIVITY_TYPES.into_iter().collect());

/// Returns the canonical display name for an activity code.
///
/// Lookup is exact; `ra5` or ` RA5` return `None`.
pub fn activity_name_for_code(code: &str) -> Option<&'static str> {
    NAMES_BY_CODE.get(code).copied()
}

/// Returns every `(code, name)` pair in numeric code order.
pub fn regulated_activity_types() -> &'static [(&'static str, &'static str)] {
    &REGULATED_ACTIVITY_TYPES
}

#[cfg(test)]
mod tests {
    use super::{activity_name_for_code, regulated_activity_types};

    #[test]
    fn known_code_resolves() {
        assert_eq!(
            activity_name_for_code("RA5"),
            Some("Treatment of disease, disorder or injury")
        );
        assert_eq!(activity_name_for_code("RA13"), Some("Personal care"));
    }

    #[test]
    fn unknown_code_is_none() {
        assert_eq!(activity_name_for_code("RA99"), None);
        assert_eq!(activity_name_for_code("ra5"), None);
        assert_eq!(activity_name_for_code(""), None);
    }

    #[test]
    fn table_lists_sixteen_codes_in_numeric_order() {
        let codes: Vec<&str> = regulated_activity_types()
            .iter()
            .map(|(code, _)| *code)
            .collect();
        let expected: Vec<String> = (1..=16).map(|n| format!("RA{n}")).collect();
        assert_eq!(codes, expected);
    }
}
