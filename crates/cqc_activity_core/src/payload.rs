//! Decoding boundary for untrusted CQC location payloads.
//!
//! # Responsibility
//! - Classify every loosely-typed JSON field exactly once.
//! - Hand typed raw records to validation and normalization so no later stage
//!   inspects `serde_json::Value` directly.
//!
//! # Invariants
//! - Falsy values (`null`, `false`, `0`, `""`, `[]`, `{}`) decode to
//!   `RawField::Absent`, except for nullable fields (see
//!   `RawField::decode_nullable`): contact lists and contact name fields,
//!   where an empty string is kept as-is.
//! - Truthy values of the wrong JSON kind decode to `RawField::Mismatched` and
//!   keep their kind for diagnostics.
//! - Input order of list entries is preserved.

use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Location field holding the raw activity list.
pub const ACTIVITIES_KEY: &str = "regulatedActivities";
/// Location field used only to label diagnostics.
pub const LOCATION_ID_KEY: &str = "locationId";

const CODE_KEY: &str = "code";
const NAME_KEY: &str = "name";
const CONTACTS_KEY: &str = "contacts";
const TITLE_KEY: &str = "personTitle";
const GIVEN_NAME_KEY: &str = "personGivenName";
const FAMILY_NAME_KEY: &str = "personFamilyName";
const ROLES_KEY: &str = "personRoles";

/// JSON kind of a payload value, rendered in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl Display for JsonKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns JSON truthiness: null, `false`, zero and empty containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64() != Some(0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// One optional payload field after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawField<T> {
    /// Missing, null, or falsy.
    Absent,
    /// Present with the expected shape.
    Present(T),
    /// Present and truthy, but of the wrong JSON kind.
    Mismatched(JsonKind),
}

impl<T> RawField<T> {
    /// Decodes a field where every falsy value counts as missing.
    fn decode(value: Option<&Value>, pick: impl FnOnce(&Value) -> Option<T>) -> Self {
        match value {
            Some(value) if is_truthy(value) => match pick(value) {
                Some(decoded) => Self::Present(decoded),
                None => Self::Mismatched(JsonKind::of(value)),
            },
            _ => Self::Absent,
        }
    }

    /// Decodes a field where only missing or `null` counts as missing.
    ///
    /// Falsy values of the wrong kind (`0`, `""`, `false`) are still
    /// reported as `Mismatched`.
    fn decode_nullable(value: Option<&Value>, pick: impl FnOnce(&Value) -> Option<T>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(value) => match pick(value) {
                Some(decoded) => Self::Present(decoded),
                None => Self::Mismatched(JsonKind::of(value)),
            },
        }
    }

    pub fn present(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_present(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }
}

/// One list element that is expected to be a JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEntry<T> {
    Record(T),
    NotRecord(JsonKind),
}

impl<T> RawEntry<T> {
    fn decode(value: &Value, record: impl FnOnce(&Map<String, Value>) -> T) -> Self {
        match value {
            Value::Object(fields) => Self::Record(record(fields)),
            other => Self::NotRecord(JsonKind::of(other)),
        }
    }
}

/// Contact entry as published by the CQC API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContact {
    /// Name fields keep empty strings; only a missing key or `null` is absent.
    pub title: RawField<String>,
    pub given_name: RawField<String>,
    pub family_name: RawField<String>,
    /// Only string roles are kept; other list elements are dropped.
    /// A contact whose only content is non-string roles (`[null]`) therefore
    /// normalizes to empty and is dropped.
    pub roles: RawField<Vec<String>>,
}

impl RawContact {
    pub fn from_map(fields: &Map<String, Value>) -> Self {
        Self {
            title: RawField::decode_nullable(fields.get(TITLE_KEY), string_value),
            given_name: RawField::decode_nullable(fields.get(GIVEN_NAME_KEY), string_value),
            family_name: RawField::decode_nullable(fields.get(FAMILY_NAME_KEY), string_value),
            roles: RawField::decode(fields.get(ROLES_KEY), |value| {
                value.as_array().map(|roles| {
                    roles
                        .iter()
                        .filter_map(|role| role.as_str().map(str::to_string))
                        .collect()
                })
            }),
        }
    }
}

/// Regulated activity entry as published by the CQC API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawActivity {
    pub code: RawField<String>,
    pub name: RawField<String>,
    pub contacts: RawField<Vec<RawEntry<RawContact>>>,
}

impl RawActivity {
    pub fn from_map(fields: &Map<String, Value>) -> Self {
        Self {
            code: RawField::decode(fields.get(CODE_KEY), string_value),
            name: RawField::decode(fields.get(NAME_KEY), string_value),
            contacts: RawField::decode_nullable(fields.get(CONTACTS_KEY), |value| {
                value.as_array().map(|contacts| {
                    contacts
                        .iter()
                        .map(|contact| RawEntry::decode(contact, RawContact::from_map))
                        .collect()
                })
            }),
        }
    }
}

/// Location record reduced to the fields extraction reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLocation {
    pub location_id: Option<String>,
    pub activities: RawField<Vec<RawEntry<RawActivity>>>,
}

impl RawLocation {
    /// Decodes a location value.
    ///
    /// A non-object value decodes as a location without activities.
    pub fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Self {
                location_id: None,
                activities: RawField::Absent,
            };
        };

        Self {
            location_id: fields
                .get(LOCATION_ID_KEY)
                .and_then(Value::as_str)
                .map(str::to_string),
            activities: RawField::decode(fields.get(ACTIVITIES_KEY), |value| {
                value.as_array().map(|activities| {
                    activities
                        .iter()
                        .map(|activity| RawEntry::decode(activity, RawActivity::from_map))
                        .collect()
                })
            }),
        }
    }
}

fn string_value(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Parses a location payload from JSON text.
///
/// # Errors
/// - Returns `PayloadError::InvalidJson` when the text is not valid JSON.
/// - Returns `PayloadError::NotAnObject` when the document root is not an object.
pub fn parse_location(json: &str) -> Result<Value, PayloadError> {
    let value: Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(PayloadError::NotAnObject(JsonKind::of(&value)));
    }
    Ok(value)
}

/// Errors raised while reading a payload document.
#[derive(Debug)]
pub enum PayloadError {
    InvalidJson(serde_json::Error),
    NotAnObject(JsonKind),
}

impl Display for PayloadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "location payload is not valid JSON: {err}"),
            Self::NotAnObject(kind) => {
                write!(f, "location payload must be a JSON object, got {kind}")
            }
        }
    }
}

impl Error for PayloadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
            Self::NotAnObject(_) => None,
        }
    }
}

impl From<serde_json::Error> for PayloadError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidJson(value)
    }
}
