//! Conversion of ingest JSON records to attribute containers.
//!
//! Ingest records are one JSON object per line:
//!
//! ```json
//! {"kind": "event_data", "attributes": {"hostname": "acserver"}}
//! ```
//!
//! Attribute values map structurally: linkage attributes (objects with
//! `kind` and `sequence`) become identifiers, `path_spec` objects become
//! path specifications, the `date_time` attribute becomes a microsecond
//! timestamp, everything else maps to the matching scalar, list, or dict
//! value.

use eventide_containers::{
    names, AttributeContainer, AttributeValue, ContainerIdentifier, ContainerKind, PathSpec,
    Timestamp,
};
use serde_json::Value;
use std::collections::BTreeMap;

/// Parses one ingest record into a container.
pub fn record_from_json(value: &Value) -> Result<AttributeContainer, String> {
    let object = value
        .as_object()
        .ok_or_else(|| "record is not a JSON object".to_string())?;

    let kind: ContainerKind = object
        .get("kind")
        .and_then(Value::as_str)
        .ok_or_else(|| "record has no kind".to_string())?
        .parse()
        .map_err(|e| format!("{}", e))?;

    let mut container = AttributeContainer::new(kind);
    let attributes = object
        .get("attributes")
        .and_then(Value::as_object)
        .ok_or_else(|| "record has no attributes object".to_string())?;

    for (name, value) in attributes {
        container.set_attribute(name.clone(), attribute_from_json(name, value)?);
    }
    Ok(container)
}

fn attribute_from_json(name: &str, value: &Value) -> Result<AttributeValue, String> {
    if let Some(identifier) = identifier_from_json(value) {
        return Ok(AttributeValue::Identifier(identifier));
    }
    if name == names::PATH_SPEC {
        if let Some(path_spec) = path_spec_from_json(value) {
            return Ok(AttributeValue::PathSpec(path_spec));
        }
        return Err(format!("malformed {} value", names::PATH_SPEC));
    }
    if name == names::DATE_TIME {
        if let Some(micros) = value.as_i64() {
            return Ok(AttributeValue::Timestamp(Timestamp::from_micros(micros)));
        }
        return Err(format!("{} is not an integer", names::DATE_TIME));
    }
    plain_from_json(value)
}

fn plain_from_json(value: &Value) -> Result<AttributeValue, String> {
    match value {
        Value::Bool(v) => Ok(AttributeValue::Bool(*v)),
        Value::Number(number) => {
            if let Some(v) = number.as_i64() {
                Ok(AttributeValue::Int(v))
            } else if let Some(v) = number.as_u64() {
                Ok(AttributeValue::UInt(v))
            } else if let Some(v) = number.as_f64() {
                Ok(AttributeValue::Float(v))
            } else {
                Err(format!("unrepresentable number: {}", number))
            }
        }
        Value::String(v) => Ok(AttributeValue::String(v.clone())),
        Value::Array(items) => {
            let values: Result<Vec<AttributeValue>, String> =
                items.iter().map(plain_from_json).collect();
            Ok(AttributeValue::List(values?))
        }
        Value::Object(object) => {
            let mut values = BTreeMap::new();
            for (name, value) in object {
                values.insert(name.clone(), plain_from_json(value)?);
            }
            Ok(AttributeValue::Dict(values))
        }
        Value::Null => Err("null attribute values are not supported".to_string()),
    }
}

/// Linkage values are objects with exactly a `kind` and a `sequence`.
fn identifier_from_json(value: &Value) -> Option<ContainerIdentifier> {
    let object = value.as_object()?;
    if object.len() != 2 {
        return None;
    }
    let kind: ContainerKind = object.get("kind")?.as_str()?.parse().ok()?;
    let sequence = object.get("sequence")?.as_u64()?;
    Some(ContainerIdentifier::new(kind, sequence))
}

fn path_spec_from_json(value: &Value) -> Option<PathSpec> {
    let object = value.as_object()?;
    let mut path_spec = PathSpec::new(object.get("type")?.as_str()?);
    if let Some(location) = object.get("location").and_then(Value::as_str) {
        path_spec = path_spec.with_location(location);
    }
    if let Some(parent) = object.get("parent") {
        path_spec = path_spec.with_parent(path_spec_from_json(parent)?);
    }
    Some(path_spec)
}
