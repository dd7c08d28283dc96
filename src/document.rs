//! Document records as the server describes them, and the rules for
//! turning a partially-filled record into something displayable.
//!
//! The server is loose about which fields it sends and what types they
//! carry (`id` may be a number or a string, `created` a float), so every
//! field is kept as raw JSON and resolved on demand.

use chrono::{DateTime, Local, Utc};
use serde::Deserialize;
use serde_json::Value;

pub const UNKNOWN_FILENAME: &str = "Unknown filename";
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Longest synthesized preview before the ellipsis is appended
const PREVIEW_CHARS: usize = 100;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// One stored question/answer file, as much as the server chose to tell us
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Document {
    pub id: Option<Value>,
    pub filename: Option<Value>,
    pub file_name: Option<Value>,
    pub subject: Option<Value>,
    /// Bytes
    pub size: Option<Value>,
    pub preview: Option<Value>,
    /// Unix seconds, fractions allowed
    pub created: Option<Value>,
    pub content: Option<Value>,
}

/// Display-ready view of a [`Document`]
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentCard {
    /// Used for the `/document/{id}` link
    pub id: String,
    pub filename: String,
    pub subject: Option<String>,
    /// Absent when the server gave no usable size
    pub size_label: Option<String>,
    pub preview: Option<String>,
    pub date: String,
}

impl Document {
    /// `filename`, then `file_name`, then a fixed fallback
    pub fn resolved_filename(&self) -> String {
        truthy_text(&self.filename)
            .or_else(|| truthy_text(&self.file_name))
            .unwrap_or_else(|| UNKNOWN_FILENAME.to_string())
    }

    /// `id`, then `file_name`, then the resolved filename
    pub fn resolved_id(&self) -> String {
        truthy_text(&self.id)
            .or_else(|| truthy_text(&self.file_name))
            .unwrap_or_else(|| self.resolved_filename())
    }

    pub fn subject_text(&self) -> Option<String> {
        truthy_text(&self.subject)
    }

    /// Size in bytes when it is present, positive and numeric
    pub fn size_bytes(&self) -> Option<u64> {
        let bytes = numeric(&self.size)?;
        if bytes >= 1.0 {
            Some(bytes as u64)
        } else {
            None
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let secs = numeric(&self.created)?;
        if secs == 0.0 {
            return None;
        }
        let whole = secs.floor();
        let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
        DateTime::from_timestamp(whole as i64, nanos)
    }

    /// The preview line, taken from `preview` or synthesized from `content`
    pub fn preview_text(&self) -> Option<String> {
        if let Some(preview) = truthy_text(&self.preview) {
            return Some(preview);
        }
        let content = self.content.as_ref().filter(|v| is_truthy(v))?;
        let text = synthesize_preview(content)?;
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    pub fn card(&self) -> DocumentCard {
        DocumentCard {
            id: self.resolved_id(),
            filename: self.resolved_filename(),
            subject: self.subject_text(),
            size_label: self.size_bytes().map(format_file_size),
            preview: self.preview_text(),
            date: format_date(self.created_at()),
        }
    }
}

fn synthesize_preview(content: &Value) -> Option<String> {
    match content {
        Value::Array(items) => match items.first() {
            Some(Value::Null) => None,
            Some(first @ Value::Object(fields)) => {
                let picked = ["content", "question"]
                    .iter()
                    .filter_map(|key| fields.get(*key))
                    .find(|v| is_truthy(v));
                match picked {
                    Some(value) => Some(value_text(value)),
                    None => Some(truncated_json(first)),
                }
            }
            // nested lists have no named fields either
            Some(first @ Value::Array(_)) => Some(truncated_json(first)),
            _ => Some(truncated_json(content)),
        },
        Value::Object(_) => Some(truncated_json(content)),
        other => Some(truncate(&value_text(other))),
    }
}

fn truncated_json(value: &Value) -> String {
    truncate(&value.to_string())
}

fn truncate(text: &str) -> String {
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", head)
}

/// Plain text for a JSON value: strings unquoted, everything else as JSON
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Falsy values are null, false, 0, NaN and the empty string
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy_text(value: &Option<Value>) -> Option<String> {
    value.as_ref().filter(|v| is_truthy(v)).map(value_text)
}

/// Numbers and numeric strings; anything else is treated as missing
fn numeric(value: &Option<Value>) -> Option<f64> {
    let number = match value.as_ref()? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Binary (1024-based) size with at most two decimals, e.g. `1.5 KB`
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

/// Local-time rendering of a creation timestamp
pub fn format_date(created: Option<DateTime<Utc>>) -> String {
    match created {
        Some(at) => at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => UNKNOWN_DATE.to_string(),
    }
}
