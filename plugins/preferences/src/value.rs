//! Preference value model

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single preference value.
///
/// The set of kinds is closed and mirrors what host settings stores
/// represent natively: booleans, doubles, integers, strings, ordered
/// string lists, and raw byte blobs. Anything else has no place in the
/// backing domain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PrefValue {
    Bool(bool),
    Double(f64),
    Int(i64),
    String(String),
    StringList(Vec<String>),
    Bytes(Vec<u8>),
}

impl PrefValue {
    /// The kind tag of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            PrefValue::Bool(_) => ValueKind::Bool,
            PrefValue::Double(_) => ValueKind::Double,
            PrefValue::Int(_) => ValueKind::Int,
            PrefValue::String(_) => ValueKind::String,
            PrefValue::StringList(_) => ValueKind::StringList,
            PrefValue::Bytes(_) => ValueKind::Bytes,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            PrefValue::Double(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PrefValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PrefValue::String(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for PrefValue {
    fn from(value: bool) -> Self {
        PrefValue::Bool(value)
    }
}

impl From<f64> for PrefValue {
    fn from(value: f64) -> Self {
        PrefValue::Double(value)
    }
}

impl From<i64> for PrefValue {
    fn from(value: i64) -> Self {
        PrefValue::Int(value)
    }
}

impl From<&str> for PrefValue {
    fn from(value: &str) -> Self {
        PrefValue::String(value.to_string())
    }
}

impl From<String> for PrefValue {
    fn from(value: String) -> Self {
        PrefValue::String(value)
    }
}

impl From<Vec<String>> for PrefValue {
    fn from(value: Vec<String>) -> Self {
        PrefValue::StringList(value)
    }
}

impl From<Vec<u8>> for PrefValue {
    fn from(value: Vec<u8>) -> Self {
        PrefValue::Bytes(value)
    }
}

/// Discriminant of [`PrefValue`], used in error reporting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Double,
    Int,
    String,
    StringList,
    Bytes,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "bool",
            ValueKind::Double => "double",
            ValueKind::Int => "int",
            ValueKind::String => "string",
            ValueKind::StringList => "string list",
            ValueKind::Bytes => "bytes",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(PrefValue::Bool(true).kind(), ValueKind::Bool);
        assert_eq!(PrefValue::Double(1.5).kind(), ValueKind::Double);
        assert_eq!(PrefValue::Int(-3).kind(), ValueKind::Int);
        assert_eq!(PrefValue::from("hi").kind(), ValueKind::String);
        assert_eq!(
            PrefValue::from(vec!["a".to_string()]).kind(),
            ValueKind::StringList
        );
        assert_eq!(PrefValue::from(vec![0u8, 1]).kind(), ValueKind::Bytes);
    }

    #[test]
    fn accessors_match_only_their_kind() {
        assert_eq!(PrefValue::Bool(true).as_bool(), Some(true));
        assert_eq!(PrefValue::Bool(true).as_int(), None);
        assert_eq!(PrefValue::Double(0.5).as_double(), Some(0.5));
        assert_eq!(PrefValue::Int(4).as_int(), Some(4));
        assert_eq!(PrefValue::from("x").as_str(), Some("x"));
    }

    #[test]
    fn serde_representation_is_tagged() {
        let json = serde_json::to_string(&PrefValue::Bool(true)).unwrap();
        assert_eq!(json, r#"{"kind":"bool","value":true}"#);

        let parsed: PrefValue =
            serde_json::from_str(r#"{"kind":"string_list","value":["a","b"]}"#).unwrap();
        assert_eq!(
            parsed,
            PrefValue::StringList(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn bytes_survive_serde() {
        let original = PrefValue::Bytes(vec![0, 127, 255]);
        let json = serde_json::to_string(&original).unwrap();
        let parsed: PrefValue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
