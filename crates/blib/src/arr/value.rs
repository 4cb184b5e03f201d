//! Nested associative data trees.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node of a nested tree: a scalar or another mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null, also what an absent key reads as.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Float.
    Float(f64),
    /// Text.
    Text(String),
    /// Nested mapping.
    Map(Mapping),
}

impl Value {
    /// Returns the nested mapping, if this is one.
    #[must_use]
    pub const fn as_map(&self) -> Option<&Mapping> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns `true` for scalars.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::Map(_))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(String::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Self::Map(m)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Objects become mappings; arrays become mappings keyed by their decimal
/// index, the way an associative array stores a list.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            Json::String(s) => Self::Text(s),
            Json::Array(items) => Self::Map(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), Self::from(v)))
                    .collect(),
            ),
            Json::Object(object) => Self::Map(
                object
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

/// An insertion-ordered map from string keys to [`Value`]s.
///
/// Re-inserting a key replaces its value and keeps its position. Two
/// mappings are equal when they hold the same entries in the same order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mapping {
    entries: IndexMap<String, Value>,
}

impl Mapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` at `key`, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Returns the value at `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Mapping {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut m = Mapping::new();
        assert_eq!(m.insert("a", 1), None);
        m.insert("b", 2);
        assert_eq!(m.insert("a", 3), Some(Value::Int(1)));

        assert_eq!(m.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(m.get("a"), Some(&Value::Int(3)));
        assert!(!m.contains_key("c"));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let ab = Mapping::from([("a", 1), ("b", 2)]);
        let ba = Mapping::from([("b", 2), ("a", 1)]);
        assert_ne!(ab, ba);
        assert_eq!(ab, Mapping::from([("a", 1), ("b", 2)]));
    }

    #[test]
    fn test_large_mapping_keeps_order_and_lookup() {
        let m: Mapping = (0..50_000_i64).map(|i| (format!("k{i}"), i)).collect();

        assert_eq!(m.len(), 50_000);
        assert_eq!(m.get("k49999"), Some(&Value::Int(49_999)));
        assert_eq!(m.keys().nth(12_345), Some("k12345"));
    }

    #[test]
    fn test_from_json_object_keeps_order() {
        let value = Value::from(json!({"z": 1, "a": {"b": null}, "m": "x"}));
        let map = value.as_map().unwrap();

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(
            map.get("a"),
            Some(&Value::Map(Mapping::from([("b", Value::Null)])))
        );
    }

    #[test]
    fn test_from_json_array_is_index_keyed() {
        let value = Value::from(json!([true, 2.5]));
        assert_eq!(
            value,
            Value::Map(Mapping::from([("0", Value::Bool(true)), ("1", Value::Float(2.5))]))
        );
    }

    #[test]
    fn test_serialize_nested() {
        let m = Mapping::from([
            ("a", Value::Int(1)),
            ("b", Value::Map(Mapping::from([("d", Value::Int(4))]))),
        ]);
        assert_eq!(serde_json::to_string(&m).unwrap(), r#"{"a":1,"b":{"d":4}}"#);
    }

    #[test]
    fn test_deserialize_nested() {
        let m: Mapping = serde_json::from_str(r#"{"a":"1","b":{"c":true}}"#).unwrap();
        assert_eq!(m.get("a"), Some(&Value::Text(String::from("1"))));
        assert!(m.get("b").and_then(Value::as_map).is_some());
    }

    #[test]
    fn test_deserialize_repeated_key_keeps_first_position() {
        let m: Mapping = serde_json::from_str(r#"{"a":1,"b":2,"a":3}"#).unwrap();
        assert_eq!(m, Mapping::from([("a", 3), ("b", 2)]));
    }

    #[test]
    fn test_option_into_value() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text(String::from("x")));
    }
}
