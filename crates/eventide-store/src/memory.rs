//! In-memory store.

use crate::error::StoreError;
use crate::filter::ContainerFilter;
use crate::index::KindIndex;
use crate::traits::ContainerStore;
use eventide_containers::{AttributeContainer, ContainerIdentifier, ContainerKind};

/// Container store held entirely in memory.
///
/// Behaves like [`crate::JournalStore`] minus durability: identifiers,
/// counts, filtering, and the open/close discipline are identical. Intended
/// for tests and scratch sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    open: bool,
    index: KindIndex,
}

impl MemoryStore {
    /// Creates a new, unopened store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContainerStore for MemoryStore {
    fn open(&mut self) -> Result<(), StoreError> {
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), StoreError> {
        if !self.open {
            return Err(StoreError::NotOpen);
        }
        self.open = false;
        self.index.clear();
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn add_container(
        &mut self,
        container: &mut AttributeContainer,
    ) -> Result<ContainerIdentifier, StoreError> {
        if !self.open {
            return Err(StoreError::NotOpen);
        }
        let identifier = self.index.next_identifier(container.kind());
        container.set_identifier(identifier);
        self.index.insert(container.clone())?;
        Ok(identifier)
    }

    fn update_container(&mut self, container: &AttributeContainer) -> Result<(), StoreError> {
        if !self.open {
            return Err(StoreError::NotOpen);
        }
        let identifier = container
            .identifier()
            .ok_or(StoreError::MissingIdentifier)?;
        if self.index.get(container.kind(), &identifier).is_none() {
            return Err(StoreError::UnknownIdentifier(identifier.to_string()));
        }
        self.index.insert(container.clone())
    }

    fn container_count(&self, kind: ContainerKind) -> Result<u64, StoreError> {
        if !self.open {
            return Err(StoreError::NotOpen);
        }
        Ok(self.index.count(kind))
    }

    fn containers(
        &self,
        kind: ContainerKind,
        filter: Option<&dyn ContainerFilter>,
    ) -> Result<Vec<AttributeContainer>, StoreError> {
        if !self.open {
            return Err(StoreError::NotOpen);
        }
        Ok(self.index.enumerate(kind, filter))
    }

    fn container_by_identifier(
        &self,
        kind: ContainerKind,
        identifier: &ContainerIdentifier,
    ) -> Result<Option<AttributeContainer>, StoreError> {
        if !self.open {
            return Err(StoreError::NotOpen);
        }
        Ok(self.index.get(kind, identifier))
    }

    fn container_by_index(
        &self,
        kind: ContainerKind,
        index: u64,
    ) -> Result<Option<AttributeContainer>, StoreError> {
        if !self.open {
            return Err(StoreError::NotOpen);
        }
        Ok(self.index.get_by_index(kind, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behaves_like_a_store() {
        let mut store = MemoryStore::new();
        store.open().unwrap();

        let mut container =
            AttributeContainer::new(ContainerKind::Event).with_attribute("timestamp", 12_i64);
        let identifier = store.add_container(&mut container).unwrap();

        assert_eq!(store.container_count(ContainerKind::Event).unwrap(), 1);
        assert!(store
            .container_by_identifier(ContainerKind::Event, &identifier)
            .unwrap()
            .is_some());
    }

    #[test]
    fn close_discards_contents() {
        let mut store = MemoryStore::new();
        store.open().unwrap();
        let mut container = AttributeContainer::new(ContainerKind::Event);
        store.add_container(&mut container).unwrap();
        store.close().unwrap();

        assert!(matches!(
            store.container_count(ContainerKind::Event),
            Err(StoreError::NotOpen)
        ));
    }

    #[test]
    fn identifier_lookup_requires_matching_kind() {
        let mut store = MemoryStore::new();
        store.open().unwrap();
        let mut container = AttributeContainer::new(ContainerKind::EventData);
        let identifier = store.add_container(&mut container).unwrap();

        assert!(store
            .container_by_identifier(ContainerKind::Event, &identifier)
            .unwrap()
            .is_none());
    }
}
