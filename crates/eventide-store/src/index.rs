//! Per-kind container index shared by store backends.

use crate::error::StoreError;
use crate::filter::ContainerFilter;
use eventide_containers::{AttributeContainer, ContainerIdentifier, ContainerKind};

/// In-memory containers grouped by kind, in add order.
#[derive(Debug, Default)]
pub(crate) struct KindIndex {
    events: Vec<AttributeContainer>,
    event_data: Vec<AttributeContainer>,
    event_data_streams: Vec<AttributeContainer>,
    event_tags: Vec<AttributeContainer>,
}

impl KindIndex {
    pub(crate) fn of(&self, kind: ContainerKind) -> &Vec<AttributeContainer> {
        match kind {
            ContainerKind::Event => &self.events,
            ContainerKind::EventData => &self.event_data,
            ContainerKind::EventDataStream => &self.event_data_streams,
            ContainerKind::EventTag => &self.event_tags,
        }
    }

    pub(crate) fn of_mut(&mut self, kind: ContainerKind) -> &mut Vec<AttributeContainer> {
        match kind {
            ContainerKind::Event => &mut self.events,
            ContainerKind::EventData => &mut self.event_data,
            ContainerKind::EventDataStream => &mut self.event_data_streams,
            ContainerKind::EventTag => &mut self.event_tags,
        }
    }

    /// Allocates the next identifier for a container of the given kind.
    pub(crate) fn next_identifier(&self, kind: ContainerKind) -> ContainerIdentifier {
        ContainerIdentifier::new(kind, self.of(kind).len() as u64)
    }

    /// Inserts a container at its identifier's sequence position.
    ///
    /// A sequence equal to the current count appends; a smaller sequence
    /// replaces (an update). Larger sequences are rejected.
    pub(crate) fn insert(&mut self, container: AttributeContainer) -> Result<(), StoreError> {
        let identifier = container
            .identifier()
            .ok_or(StoreError::MissingIdentifier)?;
        let slot = self.of_mut(identifier.kind);
        let sequence = identifier.sequence as usize;
        if sequence < slot.len() {
            slot[sequence] = container;
            Ok(())
        } else if sequence == slot.len() {
            slot.push(container);
            Ok(())
        } else {
            Err(StoreError::UnknownIdentifier(identifier.to_string()))
        }
    }

    pub(crate) fn count(&self, kind: ContainerKind) -> u64 {
        self.of(kind).len() as u64
    }

    pub(crate) fn get(
        &self,
        kind: ContainerKind,
        identifier: &ContainerIdentifier,
    ) -> Option<AttributeContainer> {
        if identifier.kind != kind {
            return None;
        }
        self.of(kind).get(identifier.sequence as usize).cloned()
    }

    pub(crate) fn get_by_index(
        &self,
        kind: ContainerKind,
        index: u64,
    ) -> Option<AttributeContainer> {
        self.of(kind).get(index as usize).cloned()
    }

    pub(crate) fn enumerate(
        &self,
        kind: ContainerKind,
        filter: Option<&dyn ContainerFilter>,
    ) -> Vec<AttributeContainer> {
        self.of(kind)
            .iter()
            .filter(|container| filter.map(|f| f.matches(container)).unwrap_or(true))
            .cloned()
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.events.clear();
        self.event_data.clear();
        self.event_data_streams.clear();
        self.event_tags.clear();
    }
}
