//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid file header (magic, version, or flags).
    #[error("invalid store header: {0}")]
    InvalidHeader(String),
    /// Invalid frame structure (kind, reserved bytes, or length).
    #[error("invalid frame at offset {offset}: {reason}")]
    InvalidFrame {
        /// Byte offset where the frame starts.
        offset: u64,
        /// Reason for invalidity.
        reason: String,
    },
    /// Payload exceeds maximum size limit.
    #[error("payload size {size} exceeds maximum {max}")]
    PayloadTooLarge {
        /// Actual payload size.
        size: u32,
        /// Maximum allowed size.
        max: u32,
    },
    /// Truncated frame detected while replaying a journal.
    #[error("truncated frame at offset {offset}")]
    TruncatedFrame {
        /// Byte offset where truncation occurred.
        offset: u64,
    },
    /// Invalid UTF-8 in a container payload.
    #[error("invalid UTF-8 in container payload: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    /// Invalid JSON in a container payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Operation attempted while the store is not open.
    #[error("store is not open")]
    NotOpen,
    /// Container kind of a payload does not match its frame kind.
    #[error("frame kind {frame} does not match container kind {container}")]
    KindMismatch {
        /// Kind recorded in the frame header.
        frame: String,
        /// Kind recorded in the container payload.
        container: String,
    },
    /// Container has no identifier where one is required.
    #[error("container has no identifier")]
    MissingIdentifier,
    /// Identifier does not reference a stored container.
    #[error("unknown container identifier: {0}")]
    UnknownIdentifier(String),
}
