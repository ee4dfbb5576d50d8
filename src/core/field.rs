//! Named, typed record fields
//!
//! A [`Field`] is a single named value inside one log record; a
//! [`FieldSequence`] is the ordered payload of one record, built fresh per
//! emission and never retained.

use crate::core::timestamp::TimestampFormat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value carried by a single record field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Timestamp(DateTime<Utc>),
    Int(i64),
    Str(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Timestamp(ts) => {
                write!(f, "{}", TimestampFormat::Iso8601.format(ts))
            }
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(ts: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(ts)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(i: u64) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

/// A single named, typed, renderable value; immutable after construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    name: String,
    value: FieldValue,
}

impl Field {
    /// Sanitize string values to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so an attacker-controlled value cannot fabricate extra log lines.
    fn sanitize(value: &str) -> String {
        value
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn timestamp(name: impl Into<String>, ts: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            value: FieldValue::Timestamp(ts),
        }
    }

    pub fn int(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value: FieldValue::Int(value),
        }
    }

    pub fn string(name: impl Into<String>, value: impl AsRef<str>) -> Self {
        Self {
            name: name.into(),
            value: FieldValue::Str(Self::sanitize(value.as_ref())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Render the value as text, on demand
    pub fn render(&self) -> String {
        self.value.to_string()
    }
}

/// Ordered payload of one log record; insertion order is rendering order
pub type FieldSequence = Vec<Field>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_render_int_and_string() {
        assert_eq!(Field::int("count", 42).render(), "42");
        assert_eq!(Field::string("message", "hello").render(), "hello");
    }

    #[test]
    fn test_render_timestamp() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).single().unwrap();
        let field = Field::timestamp("timestamp", ts);
        assert_eq!(field.render(), "2025-01-08T10:30:45.000Z");
    }

    #[test]
    fn test_string_values_are_sanitized() {
        let field = Field::string("message", "line one\nFAKE line\ttwo\r");
        let rendered = field.render();
        assert!(rendered.contains("\\n"));
        assert!(rendered.contains("\\t"));
        assert!(rendered.contains("\\r"));
        assert!(!rendered.contains('\n'));
    }

    #[test]
    fn test_field_value_conversions() {
        assert!(matches!(FieldValue::from(7i64), FieldValue::Int(7)));
        assert!(matches!(FieldValue::from(7u64), FieldValue::Int(7)));
        assert!(matches!(FieldValue::from("x"), FieldValue::Str(_)));
    }
}
