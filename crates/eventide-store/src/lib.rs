//! Container store facade and backends for Eventide.
//!
//! This crate provides:
//! - `ContainerStore` trait: the key/identifier-addressable store facade
//!   (open, close, add, update, count, enumerate, fetch by identifier or
//!   index)
//! - `JournalStore`: durable journal-backed implementation (framed,
//!   append-only file of container JSON)
//! - `MemoryStore`: in-memory implementation for tests and scratch sessions
//! - Container filtering API for selective enumeration
//!
//! The journal backend is the reference implementation; the facade is
//! deliberately small so other backends can be added behind it.

#![deny(missing_docs)]

/// Error types for store operations.
pub mod error;
/// Container filtering API.
pub mod filter;
/// Frame structure and serialization for the journal backend.
pub mod frame;
mod index;
/// Journal-backed durable store.
pub mod journal;
/// In-memory store.
pub mod memory;
/// Store facade trait.
pub mod traits;

pub use error::StoreError;
pub use filter::{AndFilter, AttributeEqualsFilter, ContainerFilter, HasAttributeFilter, OrFilter};
pub use frame::{FrameKind, RecordFrame, StoreHeader};
pub use journal::JournalStore;
pub use memory::MemoryStore;
pub use traits::ContainerStore;
