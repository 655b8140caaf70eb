//! Wire representation of a feature value.
//!
//! A value arrives either as a raw JSON scalar or as a record carrying an
//! explicit type tag. The tag, when present, decides how the payload is read;
//! see [`crate::value::normalize`].

use serde::{Deserialize, Serialize};

/// Explicit type tag stored alongside a feature value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    #[serde(rename = "unicode", alias = "string")]
    Unicode,
    #[serde(rename = "int", alias = "integer", alias = "number")]
    Int,
    #[serde(rename = "bool", alias = "boolean")]
    Bool,
}

/// A value record with an explicit type tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedFlagValue {
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default)]
    pub string_value: Option<String>,
    #[serde(default)]
    pub integer_value: Option<i64>,
    #[serde(default)]
    pub boolean_value: Option<bool>,
}

/// A feature value as found on `feature_state_value`.
///
/// Untagged: objects with a recognised `type` become [`FlagValue::Tagged`];
/// every other JSON shape is kept verbatim as [`FlagValue::Raw`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Tagged(TaggedFlagValue),
    Raw(serde_json::Value),
}

impl FlagValue {
    pub fn string(value: impl Into<String>) -> Self {
        FlagValue::Raw(serde_json::Value::String(value.into()))
    }

    pub fn int(value: i64) -> Self {
        FlagValue::Raw(serde_json::Value::from(value))
    }

    pub fn bool(value: bool) -> Self {
        FlagValue::Raw(serde_json::Value::Bool(value))
    }

    /// Build a tagged value from a type tag and a string payload.
    pub fn tagged(value_type: ValueType, string_value: impl Into<String>) -> Self {
        FlagValue::Tagged(TaggedFlagValue {
            value_type,
            string_value: Some(string_value.into()),
            integer_value: None,
            boolean_value: None,
        })
    }
}

impl From<serde_json::Value> for FlagValue {
    fn from(value: serde_json::Value) -> Self {
        match serde_json::from_value::<TaggedFlagValue>(value.clone()) {
            Ok(tagged) if value.get("type").is_some() => FlagValue::Tagged(tagged),
            _ => FlagValue::Raw(value),
        }
    }
}
