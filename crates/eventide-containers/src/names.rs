//! Well-known attribute names.
//!
//! Attribute names beginning with [`RESERVED_PREFIX`] are internal and are
//! excluded from emitted output, with the single exception of
//! [`PARSER_CHAIN`], which carries provenance information and is renamed to
//! a stable public name on output.

/// Prefix marking an attribute name as internal.
pub const RESERVED_PREFIX: &str = "_";

/// Provenance attribute on event data; the only reserved-prefix name that
/// survives into output, renamed to [`PARSER`].
pub const PARSER_CHAIN: &str = "_parser_chain";

/// Public output name of [`PARSER_CHAIN`].
pub const PARSER: &str = "parser";

/// Identifier attribute on an event linking it to its event data.
pub const EVENT_DATA_IDENTIFIER: &str = "_event_data_identifier";

/// Identifier attribute on event data linking it to its data stream.
pub const EVENT_DATA_STREAM_IDENTIFIER: &str = "_event_data_stream_identifier";

/// Identifier attribute on an event linking it to its tag.
pub const EVENT_TAG_IDENTIFIER: &str = "_event_tag_identifier";

/// Path specification attribute on an event data stream.
pub const PATH_SPEC: &str = "path_spec";

/// Legacy public output name of [`PATH_SPEC`].
pub const PATHSPEC: &str = "pathspec";

/// Date/time attribute on an event.
pub const DATE_TIME: &str = "date_time";

/// Returns true if the attribute name is internal.
pub fn is_reserved(name: &str) -> bool {
    name.starts_with(RESERVED_PREFIX)
}
