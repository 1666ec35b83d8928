//! Allow-listed field readers. Absent and `null` both mean "leave unchanged".

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    #[error("field `{field}` must be {expected}")]
    InvalidField { field: &'static str, expected: &'static str },
    #[error("field `{0}` is required")]
    Missing(&'static str),
}

pub type Body = Map<String, Value>;

fn present<'a>(body: &'a Body, field: &'static str) -> Option<&'a Value> {
    body.get(field).filter(|v| !v.is_null())
}

/// Trimmed string, or `None` when absent.
pub fn text(body: &Body, field: &'static str) -> Result<Option<String>, PatchError> {
    match present(body, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(_) => Err(PatchError::InvalidField { field, expected: "a string" }),
    }
}

pub fn flag(body: &Body, field: &'static str) -> Result<Option<bool>, PatchError> {
    match present(body, field) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(PatchError::InvalidField { field, expected: "a boolean" }),
    }
}

/// Whole seconds in `0..=max`.
pub fn seconds(body: &Body, field: &'static str, max: i64) -> Result<Option<i64>, PatchError> {
    match present(body, field) {
        None => Ok(None),
        Some(v) => v
            .as_i64()
            .filter(|n| (0..=max).contains(n))
            .map(Some)
            .ok_or(PatchError::InvalidField { field, expected: "a non-negative integer within range" }),
    }
}

/// RFC 3339 string or epoch milliseconds.
pub fn instant(body: &Body, field: &'static str) -> Result<Option<DateTime<Utc>>, PatchError> {
    let invalid = PatchError::InvalidField { field, expected: "an RFC 3339 timestamp or epoch milliseconds" };
    match present(body, field) {
        None => Ok(None),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s.trim())
            .map(|d| Some(d.with_timezone(&Utc)))
            .map_err(|_| invalid),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(Some)
            .ok_or(invalid),
        Some(_) => Err(invalid),
    }
}
