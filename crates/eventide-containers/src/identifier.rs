use crate::container::ContainerKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a container within a store.
///
/// Identifiers are allocated by the store when a container is added and are
/// only meaningful for lookups against that store. They are never rendered
/// in emitted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerIdentifier {
    /// Kind of the referenced container.
    pub kind: ContainerKind,
    /// Per-kind sequence number, starting at 0 in add order.
    pub sequence: u64,
}

impl ContainerIdentifier {
    /// Creates an identifier for the given kind and sequence number.
    pub fn new(kind: ContainerKind, sequence: u64) -> Self {
        Self { kind, sequence }
    }
}

impl fmt::Display for ContainerIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind.as_str(), self.sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_kind_dot_sequence() {
        let identifier = ContainerIdentifier::new(ContainerKind::EventData, 7);
        assert_eq!(identifier.to_string(), "event_data.7");
    }

    #[test]
    fn round_trips_through_json() {
        let identifier = ContainerIdentifier::new(ContainerKind::Event, 3);
        let json = serde_json::to_string(&identifier).unwrap();
        let restored: ContainerIdentifier = serde_json::from_str(&json).unwrap();
        assert_eq!(identifier, restored);
    }
}
