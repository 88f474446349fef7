//! Dual-sink event output for Eventide.
//!
//! This crate provides:
//! - `DualSinkWriter`: forwards every container to a durable store and
//!   projects event containers into flattened JSON lines on an output sink
//! - `FieldMergeEngine`: merges an event with its related containers into
//!   one field map under precedence, filtering, and renaming rules
//! - `resolve_related`: best-effort lookup of the containers linked to an
//!   event
//! - `StreamingEmitter`: sorted-key, line-delimited JSON emission with
//!   per-line flushing
//! - `FieldFormatter`: the pluggable field-formatting capability, with a
//!   standard implementation
//!
//! Durable persistence failures always surface to the caller; projection,
//! formatting, and encoding failures are contained so a cosmetic output
//! defect never weakens the persistence guarantee.

#![deny(missing_docs)]

/// Streaming JSON line emission.
pub mod emitter;
/// Error types for output operations.
pub mod error;
/// Field formatting capability.
pub mod format;
/// Field merge engine.
pub mod merge;
/// Related-container resolution.
pub mod resolver;
/// Dual-sink writer.
pub mod writer;

pub use emitter::StreamingEmitter;
pub use error::{FormatError, OutputError};
pub use format::{FieldFormatter, RecordBundle, StandardFieldFormatter};
pub use merge::{FieldMergeEngine, FieldValueMap};
pub use resolver::{resolve_related, RelatedRecords};
pub use writer::DualSinkWriter;
