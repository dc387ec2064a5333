//! Flattened global summary returned by the hub

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{NO_DATA, ZERO};

/// Category key -> string-encoded value, as reported by the global summary
///
/// Values are kept as the hub's JSON text (`"2"`, `"21.5"`, `"null"`) so the
/// renderer can print them verbatim. A record is built once per invocation
/// and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusRecord {
    values: BTreeMap<String, String>,
}

impl StatusRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Stringify a summary value the way it is displayed
    ///
    /// Strings are kept verbatim, `null` becomes [`NO_DATA`], booleans keep
    /// their JSON text. Numbers print in their shortest form, so a whole
    /// float such as `0.0` reads `0`.
    pub fn stringify(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Null => NO_DATA.to_string(),
            Value::Number(n) => match n.as_f64() {
                Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                    format!("{}", f as i64)
                }
                _ => n.to_string(),
            },
            other => other.to_string(),
        }
    }

    /// Whether a value means "nothing to show" (`"0"` or the no-data sentinel)
    pub fn is_idle(value: &str) -> bool {
        value == ZERO || value == NO_DATA
    }

    /// Get the value of a category
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Iterate over `(key, value)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of categories in the record
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the record has no category at all
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for StatusRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<BTreeMap<String, String>> for StatusRecord {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

impl fmt::Display for StatusRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}
