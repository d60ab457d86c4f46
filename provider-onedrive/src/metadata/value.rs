//! Typed readers for JSON member values.
//!
//! Every reader maps JSON `null` to `None` and any other shape mismatch to
//! [`OneDriveError::ParseError`] naming the member.

use chrono::{DateTime, FixedOffset};
use serde_json::Value;

use super::JsonObject;
use crate::error::{OneDriveError, Result};

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(field: &str, expected: &str, value: &Value) -> OneDriveError {
    OneDriveError::parse(
        field,
        format!("expected {}, found {}", expected, type_name(value)),
    )
}

pub(crate) fn string(field: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Err(mismatch(field, "string", other)),
    }
}

pub(crate) fn boolean(field: &str, value: &Value) -> Result<Option<bool>> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        other => Err(mismatch(field, "boolean", other)),
    }
}

pub(crate) fn unsigned(field: &str, value: &Value) -> Result<Option<u64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| {
                OneDriveError::parse(field, format!("expected unsigned integer, found {}", n))
            }),
        other => Err(mismatch(field, "unsigned integer", other)),
    }
}

/// RFC 3339 timestamp, offset preserved
pub(crate) fn datetime(field: &str, value: &Value) -> Result<Option<DateTime<FixedOffset>>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(Some)
            .map_err(|e| OneDriveError::parse(field, format!("invalid timestamp '{}': {}", s, e))),
        other => Err(mismatch(field, "timestamp string", other)),
    }
}

pub(crate) fn object<'v>(field: &str, value: &'v Value) -> Result<Option<&'v JsonObject>> {
    match value {
        Value::Null => Ok(None),
        Value::Object(object) => Ok(Some(object)),
        other => Err(mismatch(field, "object", other)),
    }
}

pub(crate) fn array<'v>(field: &str, value: &'v Value) -> Result<Option<&'v Vec<Value>>> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => Ok(Some(items)),
        other => Err(mismatch(field, "array", other)),
    }
}

/// Fails when a member every record of a kind must carry is absent
pub(crate) fn required<T>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| OneDriveError::parse(field, "required member is missing"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_reads_as_absent() {
        assert_eq!(string("name", &Value::Null).unwrap(), None);
        assert_eq!(unsigned("size", &Value::Null).unwrap(), None);
        assert!(object("file", &Value::Null).unwrap().is_none());
    }

    #[test]
    fn test_unsigned_rejects_negative_and_strings() {
        assert!(unsigned("size", &json!(-1)).is_err());
        assert!(unsigned("size", &json!(1.5)).is_err());

        let error = unsigned("size", &json!("100")).unwrap_err();
        assert!(error.to_string().contains("'size'"));
    }

    #[test]
    fn test_datetime_keeps_offset() {
        let parsed = datetime("createdDateTime", &json!("2024-03-01T10:15:30.5+02:00"))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(parsed.timestamp(), 1709280930);
    }

    #[test]
    fn test_datetime_rejects_garbage() {
        let error = datetime("lastModifiedDateTime", &json!("yesterday")).unwrap_err();
        assert_eq!(error.kind(), crate::error::ErrorKind::Internal);
    }

    #[test]
    fn test_required_names_member() {
        let error = required::<String>("id", None).unwrap_err();
        assert!(error.to_string().contains("'id'"));
    }
}
