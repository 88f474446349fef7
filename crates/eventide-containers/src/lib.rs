//! Attribute container data model for Eventide.
//!
//! This crate provides:
//! - `AttributeValue`, a closed value enum covering every attribute type a
//!   container may carry, including opaque identifiers, timestamps, and
//!   path specifications
//! - `AttributeContainer`, a typed, identifier-bearing record with an
//!   ordered attribute map
//! - `ContainerIdentifier` and `ContainerKind` for store addressing
//! - Well-known attribute names used for record linkage and renaming
//!
//! Containers are created by upstream producers and handed to the dual-sink
//! writer one at a time; this crate only defines the data model and its JSON
//! projections.

#![deny(missing_docs)]

/// Typed container record with an ordered attribute map.
pub mod container;
/// Opaque container identifiers.
pub mod identifier;
/// Well-known attribute names.
pub mod names;
/// Path specification values.
pub mod pathspec;
/// Microsecond-precision timestamps.
pub mod timestamp;
/// Attribute value enum and JSON projections.
pub mod value;

pub use container::{AttributeContainer, ContainerKind, KindParseError};
pub use identifier::ContainerIdentifier;
pub use pathspec::PathSpec;
pub use timestamp::Timestamp;
pub use value::AttributeValue;
