//! Caller-supplied query filter.
//!
//! The filter is an open-ended JSON object. Only the time-window key is ever
//! written by this crate; everything else is passed through to the database
//! as given.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CoreError;

/// A JSON object used as a query filter.
///
/// Construction through [`FilterDocument::parse`] guarantees the top level is
/// an object, so later stages never see a scalar or array filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterDocument(Map<String, Value>);

impl FilterDocument {
    /// Parse raw `--query` text.
    ///
    /// Fails with [`CoreError::MalformedFilter`] when the text is not JSON or
    /// the top-level value is not an object.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(CoreError::MalformedFilter(format!(
                "expected an object, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(CoreError::MalformedFilter(e.to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set `key`, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for FilterDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl fmt::Display for FilterDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.0) {
            Ok(s) => f.write_str(&s),
            Err(_) => Err(fmt::Error),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_nested_object() {
        let filter =
            FilterDocument::parse(r#"{"level":"CRITICAL","tags":{"$in":["a","b"]},"n":3}"#)
                .unwrap();
        assert_eq!(filter.len(), 3);
        assert_eq!(filter.get("level"), Some(&json!("CRITICAL")));
        assert_eq!(filter.get("tags"), Some(&json!({"$in": ["a", "b"]})));
    }

    #[test]
    fn empty_object_is_valid() {
        let filter = FilterDocument::parse("{}").unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn rejects_unterminated_json() {
        assert_matches!(
            FilterDocument::parse("{not json"),
            Err(CoreError::MalformedFilter(_))
        );
    }

    #[test]
    fn rejects_non_object_json() {
        let err = FilterDocument::parse(r#"["level", "CRITICAL"]"#).unwrap_err();
        assert_matches!(err, CoreError::MalformedFilter(ref msg) if msg.contains("an array"));

        assert_matches!(
            FilterDocument::parse("42"),
            Err(CoreError::MalformedFilter(_))
        );
    }

    #[test]
    fn display_is_compact_json() {
        let filter = FilterDocument::parse(r#"{ "a" : 1 }"#).unwrap();
        assert_eq!(filter.to_string(), r#"{"a":1}"#);
    }
}
