use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A statically resolvable PHP literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Null,
}

impl ScalarValue {
    /// PHP `empty()` semantics.
    pub fn is_empty(&self) -> bool {
        match self {
            ScalarValue::String(s) => s.is_empty() || s == "0",
            ScalarValue::Int(i) => *i == 0,
            ScalarValue::Float(f) => *f == 0.0,
            ScalarValue::Bool(b) => !b,
            ScalarValue::Null => true,
        }
    }

    /// Truthiness of a `(bool)` cast, which matches `!empty()` for scalars.
    pub fn truthy(&self) -> bool {
        !self.is_empty()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Value as PHP's `(string)` cast would render it.
    pub fn to_php_string(&self) -> String {
        match self {
            ScalarValue::String(s) => s.clone(),
            ScalarValue::Int(i) => i.to_string(),
            ScalarValue::Float(f) => format_float(*f),
            ScalarValue::Bool(true) => "1".to_string(),
            ScalarValue::Bool(false) | ScalarValue::Null => String::new(),
        }
    }

    /// Source form suitable for splicing into a PHP array literal.
    pub fn to_php_literal(&self) -> String {
        match self {
            ScalarValue::String(s) => {
                format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
            }
            ScalarValue::Int(i) => i.to_string(),
            ScalarValue::Float(f) => {
                let text = format_float(*f);
                if text.contains(['.', 'E', 'e']) || !f.is_finite() {
                    text
                } else {
                    format!("{text}.0")
                }
            }
            ScalarValue::Bool(b) => b.to_string(),
            ScalarValue::Null => "null".to_string(),
        }
    }
}

fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    value.to_string()
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_php_string())
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::String(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::String(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Int(value)
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Bool(value)
    }
}

/// Ordered key/value facts pulled from a source config file.
pub type ConfigValues = IndexMap<String, ScalarValue>;

/// Settings of the default database connection.
pub type DatabaseValues = IndexMap<String, ScalarValue>;

/// First present, non-null value among `keys`.
pub fn lookup<'a>(values: &'a IndexMap<String, ScalarValue>, keys: &[&str]) -> Option<&'a ScalarValue> {
    keys.iter()
        .filter_map(|key| values.get(*key))
        .find(|value| !value.is_null())
}
