//! Streaming JSON line emission.

use crate::merge::FieldValueMap;
use std::io::Write;
use tracing::warn;

/// Emits field maps as line-delimited JSON on an output sink.
///
/// Keys are emitted in lexicographic order (the map is ordered) and
/// non-ASCII characters are preserved literally, so encoding the same map
/// twice yields byte-identical lines. Each line is flushed immediately so
/// incremental consumers observe records without buffering delay.
///
/// # Example
///
/// ```rust
/// use eventide_output::{merge::FieldValueMap, StreamingEmitter};
/// use serde_json::json;
///
/// let mut emitter = StreamingEmitter::new(Vec::<u8>::new());
/// let fields = FieldValueMap::from([("message".to_string(), json!("hello"))]);
/// assert!(emitter.emit(&fields));
/// assert_eq!(emitter.into_inner(), b"{\"message\":\"hello\"}\n");
/// ```
pub struct StreamingEmitter<W: Write> {
    sink: W,
}

impl<W: Write> StreamingEmitter<W> {
    /// Creates an emitter writing to the given sink.
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Encodes and writes one field map as a single JSON line.
    ///
    /// Returns true if the line was written. Encoding or sink failures
    /// drop the record from the stream and are logged, never raised: a
    /// defect in this side channel must not disturb the durable write
    /// path.
    pub fn emit(&mut self, fields: &FieldValueMap) -> bool {
        let line = match serde_json::to_string(fields) {
            Ok(line) => line,
            Err(error) => {
                warn!(%error, "failed to encode field map, record dropped from stream");
                return false;
            }
        };

        let result = self
            .sink
            .write_all(line.as_bytes())
            .and_then(|()| self.sink.write_all(b"\n"))
            .and_then(|()| self.sink.flush());
        match result {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "failed to write JSON line, record dropped from stream");
                false
            }
        }
    }

    /// Consumes the emitter and returns the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}
