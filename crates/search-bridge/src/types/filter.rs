//! Structured filter types.
//!
//! A filter is a field name paired with a scalar. The scalar's type alone
//! decides how the filter is compiled: numbers and booleans become exact term
//! clauses, strings become full-text matches requiring every term.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A scalar filter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// String value.
    Text(String),
}

impl FilterValue {
    /// Returns true if this value is matched exactly rather than analyzed.
    pub fn is_exact(&self) -> bool {
        !matches!(self, FilterValue::Text(_))
    }

    /// Returns the value as JSON.
    pub fn to_json(&self) -> Value {
        match self {
            FilterValue::Integer(n) => json!(n),
            FilterValue::Float(f) => json!(f),
            FilterValue::Bool(b) => json!(b),
            FilterValue::Text(s) => json!(s),
        }
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Integer(n)
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        FilterValue::Integer(i64::from(n))
    }
}

impl From<u32> for FilterValue {
    fn from(n: u32) -> Self {
        FilterValue::Integer(i64::from(n))
    }
}

impl From<f64> for FilterValue {
    fn from(f: f64) -> Self {
        FilterValue::Float(f)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

/// Insertion-ordered field filters.
///
/// Setting a field that is already present replaces its value and keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    entries: Vec<(String, FilterValue)>,
}

impl Filters {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter for a field.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FilterValue>) {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    /// Returns the value filtered on for a field.
    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Iterates over filters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no filters are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Filters
where
    K: Into<String>,
    V: Into<FilterValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Filters::new();
        for (field, value) in iter {
            filters.insert(field, value);
        }
        filters
    }
}
