//! Ordered, per-call log record
//!
//! Fields serialize in insertion order, so a record built as
//! `time, ref, level, message, where, details` always renders that way.

use super::error::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Value of a record field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i64),
    /// Pre-built JSON, inlined as a nested value rather than a string
    Json(serde_json::Value),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Json(v) => write!(f, "{}", v),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        FieldValue::Json(v)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::String(s) => serializer.serialize_str(s),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::Json(v) => v.serialize(serializer),
        }
    }
}

/// The in-flight record of a single emitted call
#[derive(Debug, Clone, Default)]
pub struct LogRecord {
    fields: Vec<(&'static str, FieldValue)>,
}

impl LogRecord {
    pub fn new() -> Self {
        Self {
            fields: Vec::with_capacity(6),
        }
    }

    /// Append a field after the existing ones
    pub fn push(&mut self, key: &'static str, value: impl Into<FieldValue>) {
        self.fields.push((key, value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Field names in output order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize as a single compact JSON object, newline-terminated
    pub fn to_json_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

impl Serialize for LogRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_keep_insertion_order() {
        let mut record = LogRecord::new();
        record.push("time", "2021-05-21T06:00:00-03:00");
        record.push("level", "INFO");
        record.push("message", "hello");
        record.push("where", "main.rs:10");

        assert_eq!(
            record.to_json_line().unwrap(),
            "{\"time\":\"2021-05-21T06:00:00-03:00\",\"level\":\"INFO\",\"message\":\"hello\",\"where\":\"main.rs:10\"}\n"
        );
        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec!["time", "level", "message", "where"]
        );
    }

    #[test]
    fn test_json_field_is_nested_not_escaped() {
        let mut record = LogRecord::new();
        record.push("details", serde_json::json!({"error": "foo", "stack_trace": []}));

        let line = record.to_json_line().unwrap();
        assert_eq!(line, "{\"details\":{\"error\":\"foo\",\"stack_trace\":[]}}\n");
    }

    #[test]
    fn test_message_with_newlines_stays_on_one_line() {
        let mut record = LogRecord::new();
        record.push("message", "line one\nline two");

        let line = record.to_json_line().unwrap();
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.contains("line one\\nline two"));
    }

    #[test]
    fn test_int_field() {
        let mut record = LogRecord::new();
        record.push("time", 1_621_587_600_i64);
        assert_eq!(record.get("time"), Some(&FieldValue::Int(1_621_587_600)));
        assert_eq!(record.to_json_line().unwrap(), "{\"time\":1621587600}\n");
    }
}
