//! Timestamp conventions shared by entities, search and storage
//!
//! Timestamps are persisted with millisecond precision, so every timestamp
//! entering an entity is truncated to milliseconds. The canonical textual
//! form is RFC 3339 with milliseconds and a `Z` suffix.

use chrono::{DateTime, SecondsFormat, SubsecRound, TimeZone, Utc};

use crate::errors::{DomainError, DomainResult};

pub type Timestamp = DateTime<Utc>;

/// Truncate to the persisted (millisecond) precision
pub fn normalize(ts: Timestamp) -> Timestamp {
    ts.trunc_subsecs(3)
}

/// Current time at persisted precision
pub fn now() -> Timestamp {
    normalize(Utc::now())
}

/// Canonical textual form
pub fn format(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 timestamp received for `field`
pub fn parse(field: &str, value: &str) -> DomainResult<Timestamp> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| normalize(ts.with_timezone(&Utc)))
        .map_err(|_| DomainError::structural(field, "RFC 3339 timestamp", value))
}

pub fn to_millis(ts: &Timestamp) -> i64 {
    ts.timestamp_millis()
}

pub fn from_millis(millis: i64) -> Option<Timestamp> {
    Utc.timestamp_millis_opt(millis).single()
}
