//! Field values
//!
//! [`FieldValue`] is the leaf (or record) stored in the form tree. Serialises
//! to plain JSON: strings, numbers, booleans, string arrays and objects.

use intake_schema::FieldKind;
use serde::{Deserialize, Serialize};

/// Record node of the form tree (persistent, structurally shared)
pub type Record = im::OrdMap<String, FieldValue>;

/// Value stored at a path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Checkbox / toggle
    Bool(bool),
    /// Numeric value
    Number(f64),
    /// Text, dates and choice values
    Text(String),
    /// Multi-select values
    List(Vec<String>),
    /// Nested record
    Record(Record),
}

impl FieldValue {
    /// Empty value for a field kind
    #[must_use]
    pub fn default_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text | FieldKind::Date | FieldKind::Choice | FieldKind::Number => {
                FieldValue::Text(String::new())
            }
            FieldKind::Bool => FieldValue::Bool(false),
            FieldKind::List => FieldValue::List(Vec::new()),
        }
    }

    /// Whether the value counts as "not filled in"
    ///
    /// Blank text, empty lists and empty records are empty. Booleans and
    /// numbers never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.iter().all(|s| s.trim().is_empty()),
            FieldValue::Record(record) => record.is_empty(),
            FieldValue::Bool(_) | FieldValue::Number(_) => false,
        }
    }

    /// Text content, if textual
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric content
    ///
    /// Numeric text (as produced by form inputs) is parsed; blank or
    /// non-numeric text yields `None`.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Boolean content
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// List content
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Record content
    #[inline]
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            FieldValue::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Check whether the value can be stored in a field of `kind`
    ///
    /// Number fields accept numeric or blank text in addition to numbers.
    #[must_use]
    pub fn matches_kind(&self, kind: FieldKind) -> bool {
        match (self, kind) {
            (FieldValue::Text(_), k) if k.is_textual() => true,
            (FieldValue::Number(_), FieldKind::Number) => true,
            (FieldValue::Text(s), FieldKind::Number) => {
                s.trim().is_empty() || s.trim().parse::<f64>().is_ok()
            }
            (FieldValue::Bool(_), FieldKind::Bool) => true,
            (FieldValue::List(_), FieldKind::List) => true,
            _ => false,
        }
    }

    /// Short name of the variant, for diagnostics
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "bool",
            FieldValue::Number(_) => "number",
            FieldValue::Text(_) => "text",
            FieldValue::List(_) => "list",
            FieldValue::Record(_) => "record",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<&[&str]> for FieldValue {
    fn from(value: &[&str]) -> Self {
        FieldValue::List(value.iter().map(|s| (*s).to_string()).collect())
    }
}

impl From<Record> for FieldValue {
    fn from(value: Record) -> Self {
        FieldValue::Record(value)
    }
}
