//! Data Transfer Objects (DTOs)
//!
//! Inputs are validated with `validator` before any entity is built; outputs
//! are the camelCase, string-typed view of the entities.

pub mod pagination;
pub mod schedule;
pub mod tasks;

pub use pagination::{CollectionPresenter, PaginationMeta, PaginationOutput};
pub use schedule::*;
pub use tasks::*;

use crate::{ApplicationError, ApplicationResult};
use domain::time::{self, Timestamp};
use domain::{Identifier, Notification, TasksType};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

/// Run the derived validations and report failures as field -> messages
pub fn validate_input<T: Validate>(input: &T) -> ApplicationResult<()> {
    input
        .validate()
        .map_err(|errors| ApplicationError::validation(to_notification(&errors)))
}

/// Rust field names whose JSON key is not their camelCase form
const JSON_FIELD_NAMES: &[(&str, &str)] = &[("tasksType", "type")];

/// Field names are reported as their JSON keys
pub fn to_notification(errors: &ValidationErrors) -> Notification {
    let mut notification = Notification::new();
    for (field, field_errors) in errors.field_errors() {
        let field = json_field_name(field);
        for error in field_errors.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid ({})", error.code));
            notification.add_error(field.clone(), message);
        }
    }
    notification
}

fn json_field_name(field: &str) -> String {
    let camel = snake_to_camel(field);
    JSON_FIELD_NAMES
        .iter()
        .find(|(rust, _)| *rust == camel)
        .map_or(camel, |(_, json)| (*json).to_string())
}

fn snake_to_camel(name: &str) -> String {
    let mut camel = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            camel.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            camel.push(ch);
        }
    }
    camel
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub(crate) fn validate_identifier(value: &str) -> Result<(), ValidationError> {
    Identifier::parse(value)
        .map(|_| ())
        .map_err(|_| invalid("uuid", "must be a valid UUID"))
}

pub(crate) fn validate_timestamp(value: &str) -> Result<(), ValidationError> {
    time::parse("timestamp", value)
        .map(|_| ())
        .map_err(|_| invalid("timestamp", "must be an RFC 3339 timestamp"))
}

pub(crate) fn validate_tasks_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<TasksType>()
        .map(|_| ())
        .map_err(|_| invalid("tasks_type", "must be one of call, email, meeting, follow_up, visit"))
}

// Conversions below run after `validate_input`, so failures here only
// surface for callers that skipped validation.

pub(crate) fn identifier(field: &str, value: &str) -> ApplicationResult<Identifier> {
    Identifier::parse(value).map_err(|_| ApplicationError::invalid_field(field, "must be a valid UUID"))
}

pub(crate) fn required_identifier(field: &str, value: Option<&str>) -> ApplicationResult<Identifier> {
    match value {
        Some(value) => identifier(field, value),
        None => Err(ApplicationError::invalid_field(field, format!("{field} is required"))),
    }
}

pub(crate) fn optional_identifier(field: &str, value: Option<&str>) -> ApplicationResult<Option<Identifier>> {
    value.map(|v| identifier(field, v)).transpose()
}

pub(crate) fn optional_timestamp(field: &str, value: Option<&str>) -> ApplicationResult<Option<Timestamp>> {
    value
        .map(|v| {
            time::parse(field, v)
                .map_err(|_| ApplicationError::invalid_field(field, "must be an RFC 3339 timestamp"))
        })
        .transpose()
}
