use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Microsecond-precision UTC timestamp.
///
/// Stored as microseconds since the POSIX epoch. Raw temporal values never
/// appear as leaf values in emitted output; consumers either render them as
/// text or use [`Timestamp::to_structured_json`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from microseconds since the POSIX epoch.
    pub fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Returns the timestamp as microseconds since the POSIX epoch.
    pub fn as_micros(&self) -> i64 {
        self.0
    }

    /// Renders the timestamp as an RFC 3339 string with microsecond
    /// precision, or `None` if the value is outside chrono's range.
    pub fn to_iso8601(&self) -> Option<String> {
        DateTime::from_timestamp_micros(self.0)
            .map(|datetime| datetime.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    /// Returns the dict-shaped structured serialization of the timestamp.
    ///
    /// The `iso8601` member is `null` when the value cannot be rendered.
    pub fn to_structured_json(&self) -> Value {
        json!({
            "timestamp": self.0,
            "iso8601": self.to_iso8601(),
        })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_iso8601() {
            Some(text) => write!(f, "{}", text),
            None => write!(f, "{}", self.0),
        }
    }
}
