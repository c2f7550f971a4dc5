//! Field readers for `from_json`
//!
//! Absent keys and `null` both read as `None`. Any other primitive of the
//! wrong kind is a structural error.

use serde_json::{Map, Value};

use crate::errors::{DomainError, DomainResult};
use crate::time::{self, Timestamp};
use crate::value_objects::Identifier;

pub(crate) type Fields = Map<String, Value>;

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn object<'a>(entity: &str, value: &'a Value) -> DomainResult<&'a Fields> {
    value
        .as_object()
        .ok_or_else(|| DomainError::structural(entity, "object", kind_of(value)))
}

fn present<'a>(fields: &'a Fields, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

pub(crate) fn optional_str<'a>(fields: &'a Fields, key: &str) -> DomainResult<Option<&'a str>> {
    match present(fields, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(DomainError::structural(key, "string", kind_of(other))),
    }
}

pub(crate) fn required_str<'a>(fields: &'a Fields, key: &str) -> DomainResult<&'a str> {
    optional_str(fields, key)?.ok_or_else(|| DomainError::structural(key, "string", "null"))
}

pub(crate) fn optional_identifier(fields: &Fields, key: &str) -> DomainResult<Option<Identifier>> {
    optional_str(fields, key)?.map(Identifier::parse).transpose()
}

pub(crate) fn required_identifier(fields: &Fields, key: &str) -> DomainResult<Identifier> {
    Identifier::parse(required_str(fields, key)?)
}

pub(crate) fn optional_timestamp(fields: &Fields, key: &str) -> DomainResult<Option<Timestamp>> {
    optional_str(fields, key)?
        .map(|raw| time::parse(key, raw))
        .transpose()
}

pub(crate) fn optional_i32(fields: &Fields, key: &str) -> DomainResult<Option<i32>> {
    match present(fields, key) {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| DomainError::structural(key, "integer", n.to_string())),
        Some(other) => Err(DomainError::structural(key, "integer", kind_of(other))),
    }
}

pub(crate) fn timestamp_value(ts: Option<&Timestamp>) -> Value {
    ts.map_or(Value::Null, |ts| Value::String(time::format(ts)))
}

pub(crate) fn identifier_value(id: Option<&Identifier>) -> Value {
    id.map_or(Value::Null, |id| Value::String(id.as_string()))
}
