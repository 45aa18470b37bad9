//! Ordered key-value view of a URL query component.
//!
//! A [`QueryState`] is derived fresh from a query string on every read and is
//! never retained between operations. Insertion order is preserved so that
//! re-serialization is stable, but equality ignores order.

use serde_json::Number;
use std::fmt;

/// Scalar value a query key can map to.
///
/// `Null` is the "remove on serialize" marker: the serializer drops any entry
/// whose value is `Null` (skip-null policy), which makes setting a key to
/// `Null` equivalent to deleting it.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Decoded text value. Parsing always yields this variant; query strings
    /// carry no type information.
    Text(String),
    /// Numeric value supplied by a caller (e.g., a page number). Serialized
    /// via its canonical decimal rendering.
    Number(Number),
    /// Skip-null marker: dropped during serialization.
    Null,
}

impl ParamValue {
    /// True for the skip-null marker.
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Null => Ok(()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Number(Number::from(n))
    }
}

/// Ordered mapping from query keys to scalar values.
///
/// Keys are case-sensitive and unique; setting an existing key overwrites its
/// value in place. Backed by a vector of pairs: states are a handful of
/// entries, and the vector keeps insertion order with no extra bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    entries: Vec<(String, ParamValue)>,
}

impl QueryState {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// True if `key` is present (even with a `Null` value).
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Set `key` to `value`, overwriting in place or appending if new.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Order-insensitive equality: two states are equal when they contain the
/// same key-value pairs, regardless of insertion order.
impl PartialEq for QueryState {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl FromIterator<(String, ParamValue)> for QueryState {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        let mut state = QueryState::new();
        for (k, v) in iter {
            state.set(k, v);
        }
        state
    }
}
