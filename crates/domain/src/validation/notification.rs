//! Notification - accumulator of field-level validation errors
//!
//! Entities record business-rule violations here instead of failing on the
//! first one, so callers can report every problem at once.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Field name -> ordered error messages.
///
/// Keys are kept sorted so `to_json` output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notification {
    errors: BTreeMap<String, Vec<String>>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one error for `field`. Distinct messages accumulate; an
    /// identical message on the same field is kept once.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let message = message.into();
        let messages = self.errors.entry(field.into()).or_default();
        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Messages recorded for `field`, empty when the field is clean
    pub fn errors_for(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Total number of messages across all fields
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Merge every message of `other` into this notification
    pub fn copy_errors(&mut self, other: &Notification) {
        for (field, messages) in &other.errors {
            for message in messages {
                self.add_error(field.clone(), message.clone());
            }
        }
    }

    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .errors
            .iter()
            .map(|(field, messages)| {
                let messages = messages.iter().cloned().map(Value::String).collect();
                (field.clone(), Value::Array(messages))
            })
            .collect();
        Value::Object(map)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl<F, M> FromIterator<(F, M)> for Notification
where
    F: Into<String>,
    M: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (F, M)>>(iter: I) -> Self {
        let mut notification = Notification::new();
        for (field, message) in iter {
            notification.add_error(field, message);
        }
        notification
    }
}
