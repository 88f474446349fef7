//! Dual-sink writer.

use crate::emitter::StreamingEmitter;
use crate::error::OutputError;
use crate::format::FieldFormatter;
use crate::merge::FieldMergeEngine;
use crate::resolver::resolve_related;
use eventide_containers::{AttributeContainer, ContainerIdentifier, ContainerKind};
use eventide_store::{ContainerFilter, ContainerStore, StoreError};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Writer lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Unopened,
    Open,
    Closed,
}

/// Receives every incoming container, persists it through a container
/// store, and projects event containers into JSON lines on an output sink.
///
/// The writer owns the store handle for the session; all access goes
/// through its delegated calls. Mutating operations are rejected outside
/// the open state. Projection failures are contained; durable store
/// failures always surface, and persistence is never skipped because
/// projection succeeded or failed.
///
/// # Example
///
/// ```rust
/// use eventide_containers::{AttributeContainer, ContainerKind};
/// use eventide_output::{DualSinkWriter, StandardFieldFormatter};
/// use eventide_store::MemoryStore;
///
/// let mut writer = DualSinkWriter::new(
///     MemoryStore::new(),
///     StandardFieldFormatter::new(),
///     Vec::<u8>::new(),
/// );
/// writer.open()?;
///
/// let mut event = AttributeContainer::new(ContainerKind::Event)
///     .with_attribute("timestamp", 1_700_000_000_000_000_i64);
/// writer.add_container(&mut event)?;
///
/// assert_eq!(writer.container_count(ContainerKind::Event)?, 1);
/// writer.close()?;
/// # Ok::<(), eventide_output::OutputError>(())
/// ```
pub struct DualSinkWriter<S: ContainerStore, F: FieldFormatter, W: Write> {
    store: S,
    merge: FieldMergeEngine<F>,
    emitter: StreamingEmitter<W>,
    state: WriterState,
    scratch_path: Option<PathBuf>,
}

impl<S: ContainerStore, F: FieldFormatter, W: Write> DualSinkWriter<S, F, W> {
    /// Creates a writer over a store, formatter, and output sink.
    pub fn new(store: S, formatter: F, sink: W) -> Self {
        Self {
            store,
            merge: FieldMergeEngine::new(formatter),
            emitter: StreamingEmitter::new(sink),
            state: WriterState::Unopened,
            scratch_path: None,
        }
    }

    /// Marks a scratch file backing the store, removed on close.
    pub fn with_scratch_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scratch_path = Some(path.into());
        self
    }

    /// Opens the writer, establishing the durable store target.
    pub fn open(&mut self) -> Result<(), OutputError> {
        if self.state != WriterState::Unopened {
            return Err(OutputError::NotWritable);
        }
        self.store.open()?;
        self.state = WriterState::Open;
        Ok(())
    }

    /// Closes the writer, releasing the store handle and any scratch file.
    /// Further writes fail.
    pub fn close(&mut self) -> Result<(), OutputError> {
        if self.state != WriterState::Open {
            return Err(OutputError::NotWritable);
        }
        self.store.close()?;
        self.state = WriterState::Closed;
        if let Some(path) = self.scratch_path.take() {
            if let Err(error) = std::fs::remove_file(&path) {
                debug!(path = %path.display(), %error, "failed to remove scratch file");
            }
        }
        Ok(())
    }

    /// Adds a container: event containers are projected to the output
    /// sink, then every container is persisted.
    ///
    /// Projection failures never prevent persistence; a store failure is
    /// returned even when the JSON line for the same container was
    /// already emitted.
    pub fn add_container(
        &mut self,
        container: &mut AttributeContainer,
    ) -> Result<ContainerIdentifier, OutputError> {
        self.check_writable()?;
        if container.kind() == ContainerKind::Event {
            let fields = self
                .merge
                .merge(container, &resolve_related(&self.store, container));
            self.emitter.emit(&fields);
        }
        Ok(self.store.add_container(container)?)
    }

    /// Updates a previously added container.
    pub fn update_container(&mut self, container: &AttributeContainer) -> Result<(), OutputError> {
        self.check_writable()?;
        Ok(self.store.update_container(container)?)
    }

    /// Returns the number of containers of the given kind.
    pub fn container_count(&self, kind: ContainerKind) -> Result<u64, StoreError> {
        self.store.container_count(kind)
    }

    /// Enumerates containers of the given kind, optionally filtered.
    pub fn containers(
        &self,
        kind: ContainerKind,
        filter: Option<&dyn ContainerFilter>,
    ) -> Result<Vec<AttributeContainer>, StoreError> {
        self.store.containers(kind, filter)
    }

    /// Fetches a container by identifier.
    pub fn container_by_identifier(
        &self,
        kind: ContainerKind,
        identifier: &ContainerIdentifier,
    ) -> Result<Option<AttributeContainer>, StoreError> {
        self.store.container_by_identifier(kind, identifier)
    }

    /// Fetches a container by per-kind index.
    pub fn container_by_index(
        &self,
        kind: ContainerKind,
        index: u64,
    ) -> Result<Option<AttributeContainer>, StoreError> {
        self.store.container_by_index(kind, index)
    }

    fn check_writable(&self) -> Result<(), OutputError> {
        if self.state != WriterState::Open {
            return Err(OutputError::NotWritable);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::StandardFieldFormatter;
    use eventide_containers::names;
    use eventide_store::MemoryStore;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Sink handing out a shared buffer so tests can inspect emitted lines
    /// while the writer owns the sink.
    #[derive(Clone, Default)]
    struct SharedSink(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn open_writer(
        sink: SharedSink,
    ) -> DualSinkWriter<MemoryStore, StandardFieldFormatter, SharedSink> {
        let mut writer =
            DualSinkWriter::new(MemoryStore::new(), StandardFieldFormatter::new(), sink);
        writer.open().unwrap();
        writer
    }

    fn lines(sink: &SharedSink) -> Vec<Value> {
        String::from_utf8(sink.0.borrow().clone())
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn add_before_open_is_not_writable() {
        let sink = SharedSink::default();
        let mut writer =
            DualSinkWriter::new(MemoryStore::new(), StandardFieldFormatter::new(), sink.clone());

        let mut event = AttributeContainer::new(ContainerKind::Event);
        assert!(matches!(
            writer.add_container(&mut event),
            Err(OutputError::NotWritable)
        ));
        // No JSON line emitted and the store untouched.
        assert!(sink.0.borrow().is_empty());
        assert!(writer.container_count(ContainerKind::Event).is_err());
    }

    #[test]
    fn event_containers_are_projected_and_persisted() {
        let sink = SharedSink::default();
        let mut writer = open_writer(sink.clone());

        let mut event_data = AttributeContainer::new(ContainerKind::EventData)
            .with_attribute("hostname", "acserver");
        let data_identifier = writer.add_container(&mut event_data).unwrap();

        let mut event = AttributeContainer::new(ContainerKind::Event)
            .with_attribute("timestamp", 1_700_000_000_000_000_i64)
            .with_attribute(names::EVENT_DATA_IDENTIFIER, data_identifier);
        writer.add_container(&mut event).unwrap();

        let emitted = lines(&sink);
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0]["__container_type__"], "event");
        assert_eq!(emitted[0]["hostname"], "acserver");
        assert_eq!(writer.container_count(ContainerKind::Event).unwrap(), 1);
        assert_eq!(writer.container_count(ContainerKind::EventData).unwrap(), 1);
    }

    #[test]
    fn non_event_containers_are_persisted_without_projection() {
        let sink = SharedSink::default();
        let mut writer = open_writer(sink.clone());

        let mut event_data = AttributeContainer::new(ContainerKind::EventData);
        writer.add_container(&mut event_data).unwrap();

        assert!(sink.0.borrow().is_empty());
        assert_eq!(writer.container_count(ContainerKind::EventData).unwrap(), 1);
    }

    #[test]
    fn writes_fail_after_close() {
        let sink = SharedSink::default();
        let mut writer = open_writer(sink);
        writer.close().unwrap();

        let mut event = AttributeContainer::new(ContainerKind::Event);
        assert!(matches!(
            writer.add_container(&mut event),
            Err(OutputError::NotWritable)
        ));
        assert!(matches!(writer.close(), Err(OutputError::NotWritable)));
    }

    #[test]
    fn update_passes_through() {
        let sink = SharedSink::default();
        let mut writer = open_writer(sink.clone());

        let mut tag =
            AttributeContainer::new(ContainerKind::EventTag).with_attribute("label", "draft");
        writer.add_container(&mut tag).unwrap();
        tag.set_attribute("label", "reviewed");
        writer.update_container(&tag).unwrap();

        let stored = writer
            .container_by_index(ContainerKind::EventTag, 0)
            .unwrap()
            .unwrap();
        assert_eq!(stored.attribute("label"), Some(&"reviewed".into()));
        // Tag updates never emit JSON lines.
        assert!(sink.0.borrow().is_empty());
    }

    #[test]
    fn sink_failure_does_not_prevent_persistence() {
        struct BrokenSink;

        impl Write for BrokenSink {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "closed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "closed"))
            }
        }

        let mut writer =
            DualSinkWriter::new(MemoryStore::new(), StandardFieldFormatter::new(), BrokenSink);
        writer.open().unwrap();

        let mut event = AttributeContainer::new(ContainerKind::Event);
        writer.add_container(&mut event).unwrap();
        assert_eq!(writer.container_count(ContainerKind::Event).unwrap(), 1);
    }

    /// Store that accepts opens but refuses every add.
    struct FailingStore {
        open: bool,
    }

    impl ContainerStore for FailingStore {
        fn open(&mut self) -> Result<(), StoreError> {
            self.open = true;
            Ok(())
        }

        fn close(&mut self) -> Result<(), StoreError> {
            self.open = false;
            Ok(())
        }

        fn is_open(&self) -> bool {
            self.open
        }

        fn add_container(
            &mut self,
            _container: &mut AttributeContainer,
        ) -> Result<ContainerIdentifier, StoreError> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        }

        fn update_container(&mut self, _container: &AttributeContainer) -> Result<(), StoreError> {
            Err(StoreError::NotOpen)
        }

        fn container_count(&self, _kind: ContainerKind) -> Result<u64, StoreError> {
            Ok(0)
        }

        fn containers(
            &self,
            _kind: ContainerKind,
            _filter: Option<&dyn ContainerFilter>,
        ) -> Result<Vec<AttributeContainer>, StoreError> {
            Ok(Vec::new())
        }

        fn container_by_identifier(
            &self,
            _kind: ContainerKind,
            _identifier: &ContainerIdentifier,
        ) -> Result<Option<AttributeContainer>, StoreError> {
            Ok(None)
        }

        fn container_by_index(
            &self,
            _kind: ContainerKind,
            _index: u64,
        ) -> Result<Option<AttributeContainer>, StoreError> {
            Ok(None)
        }
    }

    #[test]
    fn store_failure_surfaces_even_when_projection_succeeded() {
        let sink = SharedSink::default();
        let mut writer = DualSinkWriter::new(
            FailingStore { open: false },
            StandardFieldFormatter::new(),
            sink.clone(),
        );
        writer.open().unwrap();

        let mut event =
            AttributeContainer::new(ContainerKind::Event).with_attribute("timestamp", 1_i64);
        let result = writer.add_container(&mut event);

        assert!(matches!(result, Err(OutputError::Store(_))));
        // The JSON line was emitted before the durable write failed.
        assert_eq!(lines(&sink).len(), 1);
    }

    #[test]
    fn scratch_file_is_removed_on_close() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("scratch.evs");
        std::fs::write(&path, b"scratch").unwrap();

        let sink = SharedSink::default();
        let mut writer =
            DualSinkWriter::new(MemoryStore::new(), StandardFieldFormatter::new(), sink)
                .with_scratch_path(&path);
        writer.open().unwrap();
        writer.close().unwrap();

        assert!(!path.exists());
    }
}
