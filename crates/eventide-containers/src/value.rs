use crate::identifier::ContainerIdentifier;
use crate::pathspec::PathSpec;
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Value of a container attribute.
///
/// This is a closed set: every attribute a container may carry is one of
/// these variants, so consumers dispatch by matching instead of runtime
/// introspection. The adjacent `type`/`value` tagging keeps storage
/// round-trips unambiguous for the special-typed variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    UInt(u64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    String(String),
    /// Ordered sequence of values.
    List(Vec<AttributeValue>),
    /// Nested mapping of values.
    Dict(BTreeMap<String, AttributeValue>),
    /// Temporal value; never emitted raw.
    Timestamp(Timestamp),
    /// Path specification; emitted in structured form only.
    PathSpec(PathSpec),
    /// Opaque store reference; never emitted.
    Identifier(ContainerIdentifier),
}

impl AttributeValue {
    /// Returns true if the value is an opaque store reference.
    pub fn is_identifier(&self) -> bool {
        matches!(self, AttributeValue::Identifier(_))
    }

    /// Returns true if the value carries date/time semantics.
    pub fn is_temporal(&self) -> bool {
        matches!(self, AttributeValue::Timestamp(_))
    }

    /// Returns the identifier if the value is one.
    pub fn as_identifier(&self) -> Option<&ContainerIdentifier> {
        match self {
            AttributeValue::Identifier(identifier) => Some(identifier),
            _ => None,
        }
    }

    /// Returns the text if the value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(text) => Some(text),
            _ => None,
        }
    }

    /// Projects the value to plain JSON for raw copying.
    ///
    /// Identifiers and raw temporal values have no raw projection and yield
    /// `None`; list and dict members without one are omitted. Path
    /// specifications only exist in structured form, so raw copying uses it.
    pub fn to_raw_json(&self) -> Option<Value> {
        match self {
            AttributeValue::Bool(value) => Some(Value::Bool(*value)),
            AttributeValue::Int(value) => Some(Value::Number((*value).into())),
            AttributeValue::UInt(value) => Some(Value::Number((*value).into())),
            AttributeValue::Float(value) => Number::from_f64(*value).map(Value::Number),
            AttributeValue::String(value) => Some(Value::String(value.clone())),
            AttributeValue::List(values) => Some(Value::Array(
                values.iter().filter_map(AttributeValue::to_raw_json).collect(),
            )),
            AttributeValue::Dict(values) => {
                let mut map = Map::new();
                for (name, value) in values {
                    if let Some(json) = value.to_raw_json() {
                        map.insert(name.clone(), json);
                    }
                }
                Some(Value::Object(map))
            }
            AttributeValue::PathSpec(path_spec) => Some(path_spec.to_structured_json()),
            AttributeValue::Timestamp(_) | AttributeValue::Identifier(_) => None,
        }
    }

    /// Projects the value to JSON with structured serialization of
    /// temporal and path specification values.
    ///
    /// Identifiers still have no projection.
    pub fn to_structured_json(&self) -> Option<Value> {
        match self {
            AttributeValue::Timestamp(timestamp) => Some(timestamp.to_structured_json()),
            AttributeValue::PathSpec(path_spec) => Some(path_spec.to_structured_json()),
            other => other.to_raw_json(),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        AttributeValue::UInt(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<Timestamp> for AttributeValue {
    fn from(value: Timestamp) -> Self {
        AttributeValue::Timestamp(value)
    }
}

impl From<PathSpec> for AttributeValue {
    fn from(value: PathSpec) -> Self {
        AttributeValue::PathSpec(value)
    }
}

impl From<ContainerIdentifier> for AttributeValue {
    fn from(value: ContainerIdentifier) -> Self {
        AttributeValue::Identifier(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ContainerKind;
    use serde_json::json;

    #[test]
    fn raw_json_excludes_identifiers() {
        let value =
            AttributeValue::Identifier(ContainerIdentifier::new(ContainerKind::EventData, 0));
        assert_eq!(value.to_raw_json(), None);
    }

    #[test]
    fn raw_json_excludes_raw_temporal_values() {
        let value = AttributeValue::Timestamp(Timestamp::from_micros(0));
        assert_eq!(value.to_raw_json(), None);
    }

    #[test]
    fn structured_json_renders_temporal_values() {
        let value = AttributeValue::Timestamp(Timestamp::from_micros(0));
        let json = value.to_structured_json().unwrap();
        assert_eq!(json["timestamp"], 0);
    }

    #[test]
    fn list_members_without_raw_projection_are_omitted() {
        let value = AttributeValue::List(vec![
            AttributeValue::from("kept"),
            AttributeValue::Identifier(ContainerIdentifier::new(ContainerKind::Event, 1)),
        ]);
        assert_eq!(value.to_raw_json().unwrap(), json!(["kept"]));
    }

    #[test]
    fn non_ascii_text_is_preserved() {
        let value = AttributeValue::from("søkelog – händelse");
        assert_eq!(value.to_raw_json().unwrap(), json!("søkelog – händelse"));
    }

    #[test]
    fn round_trips_through_tagged_json() {
        let value = AttributeValue::PathSpec(PathSpec::new("OS").with_location("/x"));
        let encoded = serde_json::to_string(&value).unwrap();
        let restored: AttributeValue = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value, restored);
    }
}
