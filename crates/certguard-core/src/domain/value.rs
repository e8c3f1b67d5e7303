//! Field values: the input side of every rule.
//!
//! # Design
//!
//! A form field can carry a string, a number, a file reference or a small
//! structured object depending on the widget that produced it. Rather than
//! inspecting types at runtime, every shape is a variant of [`FieldValue`] and
//! rules `match` on the variants they understand. Anything else is the wrong
//! shape and fails the rule (with the two content-safety rules as the only
//! exception, see `factories.rs`).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A file-like object as seen by the upload widgets.
///
/// Only metadata is carried: rules never look at file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Declared media type, e.g. `image/png`.
    #[serde(rename = "type")]
    pub media_type: String,
}

impl FileRef {
    pub fn new(name: impl Into<String>, size: u64, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            media_type: media_type.into(),
        }
    }
}

/// The current value of one form field.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// No value at all (`null` / never set).
    #[default]
    Absent,
    Bool(bool),
    Number(f64),
    Text(String),
    File(FileRef),
    /// A small flat object, e.g. a signature position or a date range.
    Record(BTreeMap<String, FieldValue>),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Build a record from `(key, value)` pairs.
    pub fn record<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Record(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileRef> {
        match self {
            Self::File(f) => Some(f),
            _ => None,
        }
    }

    /// Look up a member of a record. Non-records have no members.
    pub fn member(&self, key: &str) -> Option<&FieldValue> {
        match self {
            Self::Record(map) => map.get(key),
            _ => None,
        }
    }

    /// Numeric coercion used by the number rules.
    ///
    /// Numbers pass through, text is trimmed and parsed. Empty text, booleans
    /// and every structured shape do not coerce.
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            _ => None,
        }
    }

    /// `true` for `Absent` and the empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Short name of the variant, used in trace output.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::File(_) => "file",
            Self::Record(_) => "record",
            Self::List(_) => "list",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::File(file) => write!(f, "{} ({} bytes, {})", file.name, file.size, file.media_type),
            Self::Record(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Self::List(items) => write!(f, "[{} items]", items.len()),
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────────────

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<FileRef> for FieldValue {
    fn from(f: FileRef) -> Self {
        Self::File(f)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Absent, Into::into)
    }
}

/// JSON objects with a numeric `size` and a string `type` are file
/// references; every other object is a record.
impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Absent,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n.as_f64().map_or(Self::Absent, Self::Number),
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                let size = map.get("size").and_then(Value::as_u64);
                let media_type = map.get("type").and_then(Value::as_str);
                if let (Some(size), Some(media_type)) = (size, media_type) {
                    let name = map.get("name").and_then(Value::as_str).unwrap_or_default();
                    return Self::File(FileRef::new(name, size, media_type));
                }
                Self::Record(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_null_is_absent() {
        assert_eq!(FieldValue::from(json!(null)), FieldValue::Absent);
    }

    #[test]
    fn json_object_with_size_and_type_is_file() {
        let v = FieldValue::from(json!({"name": "sig.png", "size": 1024, "type": "image/png"}));
        assert_eq!(v, FieldValue::File(FileRef::new("sig.png", 1024, "image/png")));
    }

    #[test]
    fn json_object_without_file_shape_is_record() {
        let v = FieldValue::from(json!({"x": 10, "y": 20}));
        assert_eq!(v.member("x"), Some(&FieldValue::Number(10.0)));
        assert!(v.as_file().is_none());
    }

    #[test]
    fn coerce_number_parses_trimmed_text() {
        assert_eq!(FieldValue::from(" 42 ").coerce_number(), Some(42.0));
        assert_eq!(FieldValue::from("4.5").coerce_number(), Some(4.5));
        assert_eq!(FieldValue::from("abc").coerce_number(), None);
        assert_eq!(FieldValue::from("").coerce_number(), None);
        assert_eq!(FieldValue::Bool(true).coerce_number(), None);
        assert_eq!(FieldValue::Absent.coerce_number(), None);
    }

    #[test]
    fn blank_covers_absent_and_empty_text_only() {
        assert!(FieldValue::Absent.is_blank());
        assert!(FieldValue::from("").is_blank());
        assert!(!FieldValue::from(" ").is_blank());
        assert!(!FieldValue::from(0).is_blank());
        assert!(!FieldValue::from(false).is_blank());
    }

    #[test]
    fn option_none_converts_to_absent() {
        let v: FieldValue = Option::<&str>::None.into();
        assert_eq!(v, FieldValue::Absent);
    }
}
