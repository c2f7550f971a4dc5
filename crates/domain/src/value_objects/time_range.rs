//! TimeRange - inclusive time window used by search filters

use serde::{Deserialize, Serialize};

use super::ValueObject;
use crate::errors::{DomainError, DomainResult};
use crate::time::{self, Timestamp};

/// Inclusive window; an absent bound is open-ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeRange {
    from: Option<Timestamp>,
    to: Option<Timestamp>,
}

impl TimeRange {
    pub fn new(from: Option<Timestamp>, to: Option<Timestamp>) -> DomainResult<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if to < from {
                return Err(DomainError::InvalidSearchParams(format!(
                    "time range ends ({}) before it starts ({})",
                    time::format(&to),
                    time::format(&from)
                )));
            }
        }
        Ok(Self {
            from: from.map(time::normalize),
            to: to.map(time::normalize),
        })
    }

    pub fn from(&self) -> Option<Timestamp> {
        self.from
    }

    pub fn to(&self) -> Option<Timestamp> {
        self.to
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, ts: &Timestamp) -> bool {
        self.from.map_or(true, |from| *ts >= from) && self.to.map_or(true, |to| *ts <= to)
    }

    /// A window is contained when it starts and ends inside this range.
    /// Missing window bounds only match the matching open side of the range.
    pub fn contains_window(&self, start: Option<&Timestamp>, end: Option<&Timestamp>) -> bool {
        let start_ok = match (self.from, start) {
            (None, _) => start.map_or(true, |s| self.contains(s)),
            (Some(_), Some(s)) => self.contains(s),
            (Some(_), None) => false,
        };
        let end_ok = match (self.to, end) {
            (None, _) => end.map_or(true, |e| self.contains(e)),
            (Some(_), Some(e)) => self.contains(e),
            (Some(_), None) => false,
        };
        start_ok && end_ok
    }
}

impl ValueObject for TimeRange {}
