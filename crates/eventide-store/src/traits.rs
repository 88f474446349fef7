//! Store facade trait.

use crate::error::StoreError;
use crate::filter::ContainerFilter;
use eventide_containers::{AttributeContainer, ContainerIdentifier, ContainerKind};

/// Key/identifier-addressable store of typed containers.
///
/// Mutating operations require the store to be open; implementations return
/// [`StoreError::NotOpen`] otherwise. Adding a container allocates its
/// identifier; identifiers are stable for the lifetime of the store.
pub trait ContainerStore {
    /// Opens the store, establishing the durable target.
    fn open(&mut self) -> Result<(), StoreError>;

    /// Closes the store. Further operations fail with
    /// [`StoreError::NotOpen`].
    fn close(&mut self) -> Result<(), StoreError>;

    /// Returns true if the store is open.
    fn is_open(&self) -> bool;

    /// Adds a container, allocating and assigning its identifier.
    fn add_container(
        &mut self,
        container: &mut AttributeContainer,
    ) -> Result<ContainerIdentifier, StoreError>;

    /// Updates a previously added container in place.
    ///
    /// The container must carry the identifier allocated when it was added.
    fn update_container(&mut self, container: &AttributeContainer) -> Result<(), StoreError>;

    /// Returns the number of containers of the given kind.
    fn container_count(&self, kind: ContainerKind) -> Result<u64, StoreError>;

    /// Enumerates containers of the given kind, optionally filtered.
    fn containers(
        &self,
        kind: ContainerKind,
        filter: Option<&dyn ContainerFilter>,
    ) -> Result<Vec<AttributeContainer>, StoreError>;

    /// Fetches a container by identifier, or `None` if absent.
    fn container_by_identifier(
        &self,
        kind: ContainerKind,
        identifier: &ContainerIdentifier,
    ) -> Result<Option<AttributeContainer>, StoreError>;

    /// Fetches a container by per-kind index, or `None` if out of range.
    fn container_by_index(
        &self,
        kind: ContainerKind,
        index: u64,
    ) -> Result<Option<AttributeContainer>, StoreError>;
}
