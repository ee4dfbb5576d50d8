//! Formatters: pure rendering from a field sequence to text

use crate::core::field::{Field, FieldValue};
use crate::core::timestamp::TimestampFormat;

/// Minimum rendered width of the `category` field, for column alignment
pub const CATEGORY_PAD_WIDTH: usize = 10;

/// Marker prepended to the `threadid` field so a thread tag is
/// distinguishable from any other small integer in the line
pub const THREAD_TAG_PREFIX: char = '#';

/// Pure rendering function from a record's fields to text
///
/// Implementations must be deterministic and stateless: the same field
/// sequence always renders to the same text, with no side effects.
pub trait Formatter: Send + Sync {
    fn format(&self, fields: &[Field]) -> String;
}

/// Default human-readable formatter
///
/// Joins rendered fields with a single space. The field named `category`
/// is left-padded to [`CATEGORY_PAD_WIDTH`] columns; the field named
/// `threadid` is prefixed with [`THREAD_TAG_PREFIX`]; all other fields
/// render as-is.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    timestamp_format: TimestampFormat,
    category_width: usize,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            category_width: CATEGORY_PAD_WIDTH,
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_category_width(mut self, width: usize) -> Self {
        self.category_width = width;
        self
    }

    fn render_field(&self, field: &Field) -> String {
        match (field.name(), field.value()) {
            (_, FieldValue::Timestamp(ts)) => self.timestamp_format.format(ts),
            ("category", value) => {
                format!("{:>width$}", value.to_string(), width = self.category_width)
            }
            ("threadid", value) => format!("{}{}", THREAD_TAG_PREFIX, value),
            _ => field.render(),
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for TextFormatter {
    fn format(&self, fields: &[Field]) -> String {
        fields
            .iter()
            .map(|f| self.render_field(f))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// JSON formatter: renders one record as a single JSON object
///
/// Field names become object keys. Timestamps follow the configured
/// [`TimestampFormat`]: numeric Unix formats serialize as numbers, the
/// textual formats as strings.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    timestamp_format: TimestampFormat,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn json_value(&self, value: &FieldValue) -> serde_json::Value {
        match value {
            FieldValue::Timestamp(ts) => {
                let rendered = self.timestamp_format.format(ts);
                if self.timestamp_format.is_numeric() {
                    rendered
                        .parse::<i64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .unwrap_or(serde_json::Value::String(rendered))
                } else {
                    serde_json::Value::String(rendered)
                }
            }
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Str(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, fields: &[Field]) -> String {
        let mut json_obj = serde_json::Map::new();
        for field in fields {
            json_obj.insert(field.name().to_string(), self.json_value(field.value()));
        }
        serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default()
    }
}
