//! Field formatting capability.

use crate::error::FormatError;
use eventide_containers::{names, AttributeContainer, AttributeValue, PathSpec};
use serde_json::Value;

/// The records available when formatting a field for one event.
///
/// Any of the related containers may be absent; formatters must tolerate
/// every combination.
#[derive(Debug, Clone, Copy)]
pub struct RecordBundle<'a> {
    /// The primary event record.
    pub event: &'a AttributeContainer,
    /// Secondary data linked to the event.
    pub event_data: Option<&'a AttributeContainer>,
    /// Stream metadata linked to the event data.
    pub event_data_stream: Option<&'a AttributeContainer>,
    /// Annotation linked to the event.
    pub event_tag: Option<&'a AttributeContainer>,
}

/// Pluggable capability that renders one output field from a record bundle.
pub trait FieldFormatter {
    /// Returns the formatted value for the field, or a per-field error.
    fn format_field(
        &self,
        field_name: &str,
        records: &RecordBundle<'_>,
    ) -> Result<Value, FormatError>;
}

/// Default field formatter.
///
/// Computes the well-known derived fields (`display_name`, `filename`,
/// `inode`, `message`) and renders everything else from event data:
/// temporal values as RFC 3339 text, path specifications in structured
/// form, all other values as their raw JSON projection.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFieldFormatter;

impl StandardFieldFormatter {
    /// Creates the formatter.
    pub fn new() -> Self {
        Self
    }

    fn path_spec<'a>(records: &RecordBundle<'a>) -> Option<&'a PathSpec> {
        match records.event_data_stream?.attribute(names::PATH_SPEC)? {
            AttributeValue::PathSpec(path_spec) => Some(path_spec),
            _ => None,
        }
    }

    fn data_attribute(records: &RecordBundle<'_>, name: &str) -> Option<Value> {
        let value = records.event_data?.attribute(name)?;
        match value {
            AttributeValue::Timestamp(timestamp) => {
                Some(Value::String(timestamp.to_string()))
            }
            other => other.to_structured_json(),
        }
    }

    fn display_name(records: &RecordBundle<'_>) -> Value {
        if let Some(path_spec) = Self::path_spec(records) {
            let location = path_spec.innermost_location().unwrap_or("");
            return Value::String(format!("{}:{}", path_spec.type_indicator, location));
        }
        Self::data_attribute(records, "filename").unwrap_or(Value::Null)
    }

    fn filename(records: &RecordBundle<'_>) -> Value {
        if let Some(location) = Self::path_spec(records).and_then(PathSpec::innermost_location) {
            return Value::String(location.to_string());
        }
        Self::data_attribute(records, "filename").unwrap_or(Value::Null)
    }

    /// Deterministic message: the event data `message` attribute when
    /// present, otherwise a `name: value` join of the public event data
    /// attributes in name order.
    fn message(records: &RecordBundle<'_>) -> Value {
        let Some(event_data) = records.event_data else {
            return Value::String(String::new());
        };
        if let Some(message) = event_data.attribute("message").and_then(AttributeValue::as_str)
        {
            return Value::String(message.to_string());
        }

        let mut parts: Vec<String> = Vec::new();
        for (name, value) in event_data.attributes() {
            if names::is_reserved(name) || value.is_identifier() || value.is_temporal() {
                continue;
            }
            if let Some(json) = value.to_raw_json() {
                let rendered = match json {
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                parts.push(format!("{}: {}", name, rendered));
            }
        }
        Value::String(parts.join(" "))
    }
}

impl FieldFormatter for StandardFieldFormatter {
    fn format_field(
        &self,
        field_name: &str,
        records: &RecordBundle<'_>,
    ) -> Result<Value, FormatError> {
        let value = match field_name {
            "display_name" => Self::display_name(records),
            "filename" => Self::filename(records),
            "inode" => Self::data_attribute(records, "inode").unwrap_or(Value::Null),
            "message" => Self::message(records),
            other => Self::data_attribute(records, other).unwrap_or(Value::Null),
        };
        Ok(value)
    }
}
