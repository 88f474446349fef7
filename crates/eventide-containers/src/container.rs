use crate::identifier::ContainerIdentifier;
use crate::value::AttributeValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of an attribute container.
///
/// This is the closed set of record kinds the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// Primary event record: the main timestamped unit of output.
    Event,
    /// Secondary data: bulk descriptive attributes for an event.
    EventData,
    /// Stream metadata: describes the data source of event data.
    EventDataStream,
    /// Annotation applied to an event.
    EventTag,
}

impl ContainerKind {
    /// All container kinds, in storage order.
    pub const ALL: [ContainerKind; 4] = [
        ContainerKind::Event,
        ContainerKind::EventData,
        ContainerKind::EventDataStream,
        ContainerKind::EventTag,
    ];

    /// Returns the stable string name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerKind::Event => "event",
            ContainerKind::EventData => "event_data",
            ContainerKind::EventDataStream => "event_data_stream",
            ContainerKind::EventTag => "event_tag",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing a container kind from a string.
#[derive(Error, Debug)]
#[error("unknown container kind: {0}")]
pub struct KindParseError(String);

impl FromStr for ContainerKind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "event" => Ok(ContainerKind::Event),
            "event_data" => Ok(ContainerKind::EventData),
            "event_data_stream" => Ok(ContainerKind::EventDataStream),
            "event_tag" => Ok(ContainerKind::EventTag),
            other => Err(KindParseError(other.to_string())),
        }
    }
}

/// A typed, identifier-bearing unit of data.
///
/// A container exposes an ordered set of (name, value) attribute pairs.
/// The identifier is absent until the container has been added to a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeContainer {
    kind: ContainerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<ContainerIdentifier>,
    attributes: BTreeMap<String, AttributeValue>,
}

impl AttributeContainer {
    /// Creates an empty container of the given kind.
    pub fn new(kind: ContainerKind) -> Self {
        Self {
            kind,
            identifier: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Returns the container kind.
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Returns the store-allocated identifier, if any.
    pub fn identifier(&self) -> Option<ContainerIdentifier> {
        self.identifier
    }

    /// Sets the store-allocated identifier.
    pub fn set_identifier(&mut self, identifier: ContainerIdentifier) {
        self.identifier = Some(identifier);
    }

    /// Sets an attribute, replacing any previous value under the name.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`AttributeContainer::set_attribute`].
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Returns the attribute value under the name, if any.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Iterates over (name, value) pairs in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of attributes.
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Returns the identifier stored under the given linkage attribute name.
    ///
    /// Yields `None` when the attribute is absent or is not
    /// identifier-typed.
    pub fn linked_identifier(&self, name: &str) -> Option<ContainerIdentifier> {
        self.attribute(name)
            .and_then(AttributeValue::as_identifier)
            .copied()
    }
}
