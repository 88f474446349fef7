//! Error types for output operations.

use eventide_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the dual-sink writer.
///
/// Contained failures (formatting, encoding) never appear here; only
/// writer-state violations and durable store failures do.
#[derive(Error, Debug)]
pub enum OutputError {
    /// A mutating operation was attempted outside the open state.
    #[error("unable to write to closed storage writer")]
    NotWritable,
    /// Durable store failure; never swallowed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Failure to format a single output field.
///
/// The merge engine contains these per field: the field is skipped and the
/// rest of the map still completes.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The formatter cannot produce a value for the field.
    #[error("cannot format field {field}: {reason}")]
    Unformattable {
        /// Field name that failed.
        field: String,
        /// Reason for the failure.
        reason: String,
    },
}
