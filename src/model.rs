use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};

// Data model representing a Todo row
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Todo {
    pub id: String,
    pub user_id: String,
    #[sqlx(rename = "text")]
    pub title: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Identity the current request acts as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
}

impl Caller {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// Storage form of a timestamp: fixed-width RFC 3339 with microseconds, so
/// text ordering in SQLite matches time ordering.
pub fn storage_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Wire form of a timestamp, e.g. `2024-01-02T03:04:05.678Z`.
pub fn wire_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Timestamp for a write that follows one stamped `previous`: `now`, or the
/// first millisecond after `previous` if the clock has not got there yet, so
/// the wire form always moves forward.
pub fn next_write_time(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let floor = Utc
        .timestamp_millis_opt(previous.timestamp_millis() + 1)
        .single()
        .unwrap_or(previous + Duration::milliseconds(1));
    now.max(floor)
}
