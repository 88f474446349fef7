use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Specification of a data source location.
///
/// Path specifications form a chain: each layer names a type indicator
/// (e.g., `"OS"`, `"TSK"`, `"ZIP"`) with an optional location inside its
/// parent layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSpec {
    /// Type indicator of this layer.
    pub type_indicator: String,
    /// Location within the parent layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Parent layer, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<PathSpec>>,
}

impl PathSpec {
    /// Creates a path specification with only a type indicator.
    pub fn new(type_indicator: impl Into<String>) -> Self {
        Self {
            type_indicator: type_indicator.into(),
            location: None,
            parent: None,
        }
    }

    /// Sets the location of this layer.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the parent layer.
    pub fn with_parent(mut self, parent: PathSpec) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// Returns the location of the innermost layer that has one.
    ///
    /// Searches this layer first, then walks up the parent chain.
    pub fn innermost_location(&self) -> Option<&str> {
        if let Some(ref location) = self.location {
            return Some(location);
        }
        self.parent
            .as_deref()
            .and_then(PathSpec::innermost_location)
    }

    /// Returns the dict-shaped structured serialization of the path
    /// specification chain.
    pub fn to_structured_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("__type__".to_string(), Value::String("PathSpec".to_string()));
        map.insert(
            "type".to_string(),
            Value::String(self.type_indicator.clone()),
        );
        if let Some(ref location) = self.location {
            map.insert("location".to_string(), Value::String(location.clone()));
        }
        if let Some(ref parent) = self.parent {
            map.insert("parent".to_string(), parent.to_structured_json());
        }
        Value::Object(map)
    }
}
