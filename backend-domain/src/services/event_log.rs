// Event log entry shaping
// The raw envelope is stored untouched, augmented with a day bucket for
// range queries, a sortable unique key, and an expiry stamp.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// Sortable composite key: second-resolution timestamp plus the event id, so
/// two events sharing a timestamp still get distinct keys.
pub fn time_id(time: DateTime<Utc>, event_id: &str) -> String {
    format!("{}-{}", time.format("%Y-%m-%dT%H:%M:%S"), event_id)
}

pub fn day_bucket(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d").to_string()
}

/// Augments a raw envelope into an append-only log entry. Non-object
/// payloads are returned untouched; the caller already decoded the envelope,
/// so that path is unreachable in practice.
pub fn log_entry(mut raw: Value, time: DateTime<Utc>, event_id: &str, expires: i64) -> Value {
    if let Value::Object(map) = &mut raw {
        map.insert("date".to_string(), json!(day_bucket(time)));
        map.insert("time-id".to_string(), json!(time_id(time, event_id)));
        map.insert("expires".to_string(), json!(expires));
    }
    raw
}
