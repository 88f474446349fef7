//! Field merge engine.

use crate::format::{FieldFormatter, RecordBundle};
use crate::resolver::RelatedRecords;
use eventide_containers::{names, AttributeContainer, AttributeValue};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Flattened per-event output map, ordered by field name.
pub type FieldValueMap = BTreeMap<String, Value>;

/// Marker field naming the output's container kind.
pub const CONTAINER_TYPE_FIELD: &str = "__container_type__";

/// Marker field naming the output's wrapper type.
pub const TYPE_FIELD: &str = "__type__";

const ATTRIBUTE_CONTAINER: &str = "AttributeContainer";
const MESSAGE_FIELD: &str = "message";
const TAG_FIELD: &str = "tag";

/// Field names computed when steps 2-4 left them absent.
const GENERATED_FIELDS: [&str; 3] = ["display_name", "filename", "inode"];

/// Merges an event and its related containers into one field map.
///
/// Sources are applied in fixed precedence order: event data (rendered
/// through the field formatter), then stream metadata (raw), then the event
/// itself (raw), so same-named event fields win. Formatting failures are
/// contained per field: the field is skipped and the rest of the map still
/// completes.
pub struct FieldMergeEngine<F: FieldFormatter> {
    formatter: F,
}

impl<F: FieldFormatter> FieldMergeEngine<F> {
    /// Creates a merge engine using the given formatter.
    pub fn new(formatter: F) -> Self {
        Self { formatter }
    }

    /// Builds the field map for one event.
    pub fn merge(&self, event: &AttributeContainer, related: &RelatedRecords) -> FieldValueMap {
        let records = RecordBundle {
            event,
            event_data: related.event_data.as_ref(),
            event_data_stream: related.event_data_stream.as_ref(),
            event_tag: related.event_tag.as_ref(),
        };

        let mut fields = FieldValueMap::new();
        fields.insert(
            CONTAINER_TYPE_FIELD.to_string(),
            Value::String("event".to_string()),
        );
        fields.insert(
            TYPE_FIELD.to_string(),
            Value::String(ATTRIBUTE_CONTAINER.to_string()),
        );

        if let Some(event_data) = records.event_data {
            self.merge_event_data(event_data, &records, &mut fields);
        }
        if let Some(stream) = records.event_data_stream {
            Self::merge_event_data_stream(stream, &mut fields);
        }
        Self::merge_event(event, &mut fields);
        self.fill_generated_fields(&records, &mut fields);

        match self.formatter.format_field(MESSAGE_FIELD, &records) {
            Ok(value) => {
                fields.insert(MESSAGE_FIELD.to_string(), value);
            }
            Err(error) => {
                warn!(field = MESSAGE_FIELD, %error, "field formatting failed, field skipped");
            }
        }

        if let Some(tag) = records.event_tag {
            fields.insert(TAG_FIELD.to_string(), Self::tag_map(tag));
        }

        fields
    }

    /// Event data fields are always rendered through the formatter, never
    /// copied verbatim. Identifier values, sequences leading with a
    /// temporal value, and internal names are skipped; the provenance
    /// attribute is renamed to its public name and inserted as-is.
    fn merge_event_data(
        &self,
        event_data: &AttributeContainer,
        records: &RecordBundle<'_>,
        fields: &mut FieldValueMap,
    ) {
        for (name, value) in event_data.attributes() {
            if value.is_identifier() {
                continue;
            }
            if let AttributeValue::List(items) = value {
                if items.first().map(AttributeValue::is_temporal).unwrap_or(false) {
                    continue;
                }
            }
            if name == names::PARSER_CHAIN {
                if let Some(json) = value.to_raw_json() {
                    fields.insert(names::PARSER.to_string(), json);
                }
                continue;
            }
            if names::is_reserved(name) {
                continue;
            }
            match self.formatter.format_field(name, records) {
                Ok(json) => {
                    fields.insert(name.to_string(), json);
                }
                Err(error) => {
                    warn!(field = name, %error, "field formatting failed, field skipped");
                }
            }
        }
    }

    /// Stream metadata fields are copied raw; the path specification is
    /// renamed to its legacy public name and inserted in structured form.
    fn merge_event_data_stream(stream: &AttributeContainer, fields: &mut FieldValueMap) {
        for (name, value) in stream.attributes() {
            if value.is_identifier() {
                continue;
            }
            if name == names::PATH_SPEC {
                if let Some(json) = value.to_structured_json() {
                    fields.insert(names::PATHSPEC.to_string(), json);
                }
                continue;
            }
            if let Some(json) = value.to_raw_json() {
                fields.insert(name.to_string(), json);
            }
        }
    }

    /// The event's own fields are applied last and take precedence. The
    /// date/time attribute is inserted in structured form; internal names
    /// and identifier values never reach the map.
    fn merge_event(event: &AttributeContainer, fields: &mut FieldValueMap) {
        for (name, value) in event.attributes() {
            if value.is_identifier() || names::is_reserved(name) {
                continue;
            }
            if name == names::DATE_TIME {
                if let Some(json) = value.to_structured_json() {
                    fields.insert(name.to_string(), json);
                }
                continue;
            }
            if let Some(json) = value.to_raw_json() {
                fields.insert(name.to_string(), json);
            }
        }
    }

    /// Absence, not presence-with-null, triggers computation: a field an
    /// earlier step set to null is recomputed. A computation that itself
    /// yields null inserts nothing.
    fn fill_generated_fields(&self, records: &RecordBundle<'_>, fields: &mut FieldValueMap) {
        for name in GENERATED_FIELDS {
            let absent = matches!(fields.get(name), None | Some(Value::Null));
            if !absent {
                continue;
            }
            match self.formatter.format_field(name, records) {
                Ok(Value::Null) => {}
                Ok(json) => {
                    fields.insert(name.to_string(), json);
                }
                Err(error) => {
                    warn!(field = name, %error, "field formatting failed, field skipped");
                }
            }
        }
    }

    fn tag_map(tag: &AttributeContainer) -> Value {
        let mut map = Map::new();
        map.insert(
            CONTAINER_TYPE_FIELD.to_string(),
            Value::String("event_tag".to_string()),
        );
        map.insert(
            TYPE_FIELD.to_string(),
            Value::String(ATTRIBUTE_CONTAINER.to_string()),
        );
        for (name, value) in tag.attributes() {
            if value.is_identifier() {
                continue;
            }
            if let Some(json) = value.to_raw_json() {
                map.insert(name.to_string(), json);
            }
        }
        Value::Object(map)
    }
}
