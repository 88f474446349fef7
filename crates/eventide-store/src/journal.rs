//! Journal-backed durable store.
//!
//! Containers are persisted as JSON payloads in record frames appended to a
//! single store file (`.evs` format). The full container set is replayed
//! into an in-memory per-kind index on open; reads are served from the
//! index, writes append a frame and update the index. Update frames are
//! appended like adds and win on replay, keeping the file strictly
//! append-only.

use crate::error::StoreError;
use crate::filter::ContainerFilter;
use crate::frame::{FrameKind, RecordFrame, StoreHeader};
use crate::index::KindIndex;
use crate::traits::ContainerStore;
use eventide_containers::{AttributeContainer, ContainerIdentifier, ContainerKind};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, Write};
use std::path::{Path, PathBuf};

/// Durable container store backed by a framed, append-only journal file.
///
/// # Example
///
/// ```rust
/// use eventide_containers::{AttributeContainer, ContainerKind};
/// use eventide_store::{ContainerStore, JournalStore};
///
/// let directory = tempfile::tempdir()?;
/// let mut store = JournalStore::new(directory.path().join("session.evs"));
/// store.open()?;
///
/// let mut container = AttributeContainer::new(ContainerKind::EventData)
///     .with_attribute("hostname", "acserver");
/// let identifier = store.add_container(&mut container)?;
///
/// let restored = store.container_by_identifier(ContainerKind::EventData, &identifier)?;
/// assert!(restored.is_some());
/// store.close()?;
/// # Ok::<(), eventide_store::StoreError>(())
/// ```
pub struct JournalStore {
    path: PathBuf,
    file: Option<File>,
    index: KindIndex,
}

impl JournalStore {
    /// Creates a store for the given file path. The file is not touched
    /// until [`ContainerStore::open`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
            index: KindIndex::default(),
        }
    }

    /// Returns the store file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_mut(&mut self) -> Result<&mut File, StoreError> {
        self.file.as_mut().ok_or(StoreError::NotOpen)
    }

    /// Replays all frames after the header into the index.
    ///
    /// Truncated frames are errors: a durable store must not silently drop
    /// data on reopen. Unknown frame kinds are skipped.
    fn replay(file: &mut File, index: &mut KindIndex) -> Result<(), StoreError> {
        let file_size = file.metadata()?.len();
        let mut position = StoreHeader::HEADER_SIZE as u64;
        file.seek(io::SeekFrom::Start(position))?;

        while position < file_size {
            let mut frame_header_bytes = [0u8; RecordFrame::FRAME_HEADER_SIZE];
            match file.read_exact(&mut frame_header_bytes) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(StoreError::TruncatedFrame { offset: position });
                }
                Err(e) => return Err(e.into()),
            }

            let frame = RecordFrame::from_bytes(&frame_header_bytes).map_err(|e| match e {
                StoreError::InvalidFrame { offset: _, reason } => StoreError::InvalidFrame {
                    offset: position,
                    reason,
                },
                other => other,
            })?;
            position += RecordFrame::FRAME_HEADER_SIZE as u64;

            let mut payload = vec![0u8; frame.len as usize];
            match file.read_exact(&mut payload) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(StoreError::TruncatedFrame { offset: position });
                }
                Err(e) => return Err(e.into()),
            }
            position += frame.len as u64;

            let kind = match frame.kind {
                FrameKind::Container(kind) => kind,
                FrameKind::Unknown(_) => continue,
            };

            let payload_str = std::str::from_utf8(&payload)?;
            let container: AttributeContainer = serde_json::from_str(payload_str)?;
            if container.kind() != kind {
                return Err(StoreError::KindMismatch {
                    frame: kind.to_string(),
                    container: container.kind().to_string(),
                });
            }
            index.insert(container)?;
        }

        Ok(())
    }

    fn append_frame(
        &mut self,
        kind: ContainerKind,
        container: &AttributeContainer,
    ) -> Result<(), StoreError> {
        let payload = serde_json::to_vec(container)?;
        let frame = RecordFrame::new(FrameKind::Container(kind), payload.len() as u32)?;
        let frame_bytes = frame.to_bytes();

        let file = self.file_mut()?;
        file.write_all(&frame_bytes)?;
        file.write_all(&payload)?;
        file.flush()?;
        Ok(())
    }
}

impl ContainerStore for JournalStore {
    fn open(&mut self) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&self.path)?;

        let metadata = file.metadata()?;
        if metadata.len() == 0 {
            let header = StoreHeader::new();
            file.write_all(&header.to_bytes())?;
            file.flush()?;
        } else if metadata.len() < StoreHeader::HEADER_SIZE as u64 {
            return Err(StoreError::InvalidHeader(
                "file too small to carry a header".to_string(),
            ));
        } else {
            file.seek(io::SeekFrom::Start(0))?;
            let mut header_bytes = [0u8; StoreHeader::HEADER_SIZE];
            file.read_exact(&mut header_bytes)?;
            StoreHeader::from_bytes(&header_bytes)?;
            Self::replay(&mut file, &mut self.index)?;
        }

        file.seek(io::SeekFrom::End(0))?;
        self.file = Some(file);
        Ok(())
    }

    fn close(&mut self) -> Result<(), StoreError> {
        let mut file = self.file.take().ok_or(StoreError::NotOpen)?;
        file.flush()?;
        self.index.clear();
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn add_container(
        &mut self,
        container: &mut AttributeContainer,
    ) -> Result<ContainerIdentifier, StoreError> {
        if !self.is_open() {
            return Err(StoreError::NotOpen);
        }
        let identifier = self.index.next_identifier(container.kind());
        container.set_identifier(identifier);
        self.append_frame(container.kind(), container)?;
        self.index.insert(container.clone())?;
        Ok(identifier)
    }

    fn update_container(&mut self, container: &AttributeContainer) -> Result<(), StoreError> {
        if !self.is_open() {
            return Err(StoreError::NotOpen);
        }
        let identifier = container
            .identifier()
            .ok_or(StoreError::MissingIdentifier)?;
        if self
            .index
            .get(container.kind(), &identifier)
            .is_none()
        {
            return Err(StoreError::UnknownIdentifier(identifier.to_string()));
        }
        self.append_frame(container.kind(), container)?;
        self.index.insert(container.clone())?;
        Ok(())
    }

    fn container_count(&self, kind: ContainerKind) -> Result<u64, StoreError> {
        if !self.is_open() {
            return Err(StoreError::NotOpen);
        }
        Ok(self.index.count(kind))
    }

    fn containers(
        &self,
        kind: ContainerKind,
        filter: Option<&dyn ContainerFilter>,
    ) -> Result<Vec<AttributeContainer>, StoreError> {
        if !self.is_open() {
            return Err(StoreError::NotOpen);
        }
        Ok(self.index.enumerate(kind, filter))
    }

    fn container_by_identifier(
        &self,
        kind: ContainerKind,
        identifier: &ContainerIdentifier,
    ) -> Result<Option<AttributeContainer>, StoreError> {
        if !self.is_open() {
            return Err(StoreError::NotOpen);
        }
        Ok(self.index.get(kind, identifier))
    }

    fn container_by_index(
        &self,
        kind: ContainerKind,
        index: u64,
    ) -> Result<Option<AttributeContainer>, StoreError> {
        if !self.is_open() {
            return Err(StoreError::NotOpen);
        }
        Ok(self.index.get_by_index(kind, index))
    }
}
