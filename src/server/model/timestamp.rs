//! Timestamp wire forms and their normalization.
//!
//! Documents can carry `lastUpdated` as an ISO-8601 string, as epoch milliseconds, or as the
//! `{seconds, nanoseconds}` handle the store writes when a write used the server-timestamp
//! sentinel. Everything handed to callers is normalized to one RFC 3339 form.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Field every document carries with the time of its last write.
pub const LAST_UPDATED_FIELD: &str = "lastUpdated";

const SERVER_TIMESTAMP_KEY: &str = ".sv";
const SERVER_TIMESTAMP_VALUE: &str = "timestamp";

/// Handle written by the store in place of the server-timestamp sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerTimestamp {
    pub seconds: i64,
    pub nanoseconds: u32,
}

impl ServerTimestamp {
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            seconds: at.timestamp(),
            nanoseconds: at.timestamp_subsec_nanos(),
        }
    }

    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.seconds, self.nanoseconds).single()
    }
}

/// Every representation of a timestamp accepted on read.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Iso(String),
    EpochMillis(i64),
    Server(ServerTimestamp),
}

impl Timestamp {
    /// Interprets a raw field value, returning `None` for shapes that are not timestamps.
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Iso(raw) => DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|at| at.with_timezone(&Utc)),
            Self::EpochMillis(millis) => Utc.timestamp_millis_opt(*millis).single(),
            Self::Server(handle) => handle.to_datetime(),
        }
    }

    /// Renders the timestamp as RFC 3339, using `fallback` when it cannot be interpreted.
    pub fn normalize(&self, fallback: DateTime<Utc>) -> String {
        to_iso(self.to_datetime().unwrap_or(fallback))
    }
}

/// RFC 3339 in UTC with millisecond precision, e.g. `2025-01-02T03:04:05.678Z`.
pub fn to_iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Sentinel asking the store to substitute its commit time.
pub fn server_timestamp() -> Value {
    json!({ SERVER_TIMESTAMP_KEY: SERVER_TIMESTAMP_VALUE })
}

pub fn is_server_timestamp_sentinel(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|object| object.get(SERVER_TIMESTAMP_KEY))
        .and_then(Value::as_str)
        == Some(SERVER_TIMESTAMP_VALUE)
}

/// Replaces top-level sentinels with a [`ServerTimestamp`] handle for `now`.
pub fn resolve_server_timestamps(data: &mut Map<String, Value>, now: DateTime<Utc>) {
    for value in data.values_mut() {
        if is_server_timestamp_sentinel(value) {
            *value = json!(ServerTimestamp::from_datetime(now));
        }
    }
}

/// Normalizes `lastUpdated` in place.
///
/// Missing, null or uninterpretable values fall back to `read_time` so every normalized
/// document carries a well-formed timestamp.
pub fn normalize_last_updated(data: &mut Map<String, Value>, read_time: DateTime<Utc>) {
    let normalized = data
        .get(LAST_UPDATED_FIELD)
        .and_then(Timestamp::from_value)
        .map(|timestamp| timestamp.normalize(read_time))
        .unwrap_or_else(|| to_iso(read_time));

    data.insert(LAST_UPDATED_FIELD.to_string(), Value::String(normalized));
}
