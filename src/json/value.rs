use std::fmt;

/// A JSON number that remembers whether it was written as an integer or a
/// floating point value, so rendering can reproduce `2` and `2.0` faithfully.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonNumber {
    /// Signed integer
    Int(i64),
    /// Unsigned integer above `i64::MAX`
    UInt(u64),
    /// Floating point value
    Float(f64),
}

impl JsonNumber {
    /// Numeric value widened to `f64`, used by comparisons.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match *self {
            JsonNumber::Int(n) => n as f64,
            JsonNumber::UInt(n) => n as f64,
            JsonNumber::Float(n) => n,
        }
    }

    /// `true` for the integer representations.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        !matches!(self, JsonNumber::Float(_))
    }
}

impl From<i64> for JsonNumber {
    fn from(n: i64) -> Self {
        JsonNumber::Int(n)
    }
}

impl From<u64> for JsonNumber {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(JsonNumber::UInt(n), JsonNumber::Int)
    }
}

impl From<f64> for JsonNumber {
    fn from(n: f64) -> Self {
        JsonNumber::Float(n)
    }
}

/// Runtime tag of a [`JsonValue`], compared by the validator to decide
/// whether an array is homogeneous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JsonKind::Null => "null",
            JsonKind::Bool => "boolean",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        };
        f.write_str(s)
    }
}

/// Insertion-ordered string-keyed map backing [`JsonValue::Object`].
///
/// Keys are unique: inserting an existing key replaces its value in place and
/// keeps the original position, so a map built from a source mapping with
/// repeated keys ends up with the last value written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonMap {
    entries: Vec<(String, JsonValue)>,
}

impl JsonMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert a field, returning the previous value stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) -> Option<JsonValue> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &JsonValue> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K: Into<String>> FromIterator<(K, JsonValue)> for JsonMap {
    fn from_iter<I: IntoIterator<Item = (K, JsonValue)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = JsonMap::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for JsonMap {
    type Item = (String, JsonValue);
    type IntoIter = std::vec::IntoIter<(String, JsonValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// The JSON document tree.
///
/// Trees are immutable values: [`filter`](JsonValue::filter),
/// [`map`](JsonValue::map) and the converter all produce new trees rather
/// than editing one in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Number(JsonNumber),
    String(String),
    Array(Vec<JsonValue>),
    Object(JsonMap),
}

impl JsonValue {
    /// Build an object from key/value pairs; later duplicates win.
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, JsonValue)>,
    {
        JsonValue::Object(fields.into_iter().collect())
    }

    /// Build an array from anything convertible into values.
    pub fn array<T, I>(items: I) -> Self
    where
        T: Into<JsonValue>,
        I: IntoIterator<Item = T>,
    {
        JsonValue::Array(items.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn kind(&self) -> JsonKind {
        match self {
            JsonValue::Null => JsonKind::Null,
            JsonValue::Bool(_) => JsonKind::Bool,
            JsonValue::Number(_) => JsonKind::Number,
            JsonValue::String(_) => JsonKind::String,
            JsonValue::Array(_) => JsonKind::Array,
            JsonValue::Object(_) => JsonKind::Object,
        }
    }

    /// `true` for arrays and objects.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, JsonValue::Array(_) | JsonValue::Object(_))
    }

    /// `true` for an array or object without children. Scalars are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            JsonValue::Array(items) => items.is_empty(),
            JsonValue::Object(fields) => fields.is_empty(),
            _ => false,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    #[must_use]
    pub fn as_number(&self) -> Option<JsonNumber> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&JsonMap> {
        match self {
            JsonValue::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Field lookup on objects; `None` for every other variant.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|fields| fields.get(key))
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}

impl From<i32> for JsonValue {
    fn from(n: i32) -> Self {
        JsonValue::Number(JsonNumber::Int(i64::from(n)))
    }
}

impl From<i64> for JsonValue {
    fn from(n: i64) -> Self {
        JsonValue::Number(JsonNumber::Int(n))
    }
}

impl From<u64> for JsonValue {
    fn from(n: u64) -> Self {
        JsonValue::Number(JsonNumber::from(n))
    }
}

impl From<f64> for JsonValue {
    fn from(n: f64) -> Self {
        JsonValue::Number(JsonNumber::Float(n))
    }
}

impl From<JsonNumber> for JsonValue {
    fn from(n: JsonNumber) -> Self {
        JsonValue::Number(n)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(items: Vec<JsonValue>) -> Self {
        JsonValue::Array(items)
    }
}

impl From<JsonMap> for JsonValue {
    fn from(fields: JsonMap) -> Self {
        JsonValue::Object(fields)
    }
}

impl<T: Into<JsonValue>> From<Option<T>> for JsonValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(JsonValue::Null, Into::into)
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(b),
            Value::Number(n) => {
                let number = if let Some(i) = n.as_i64() {
                    JsonNumber::Int(i)
                } else if let Some(u) = n.as_u64() {
                    JsonNumber::UInt(u)
                } else {
                    JsonNumber::Float(n.as_f64().unwrap_or(f64::NAN))
                };
                JsonValue::Number(number)
            }
            Value::String(s) => JsonValue::String(s),
            Value::Array(items) => JsonValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(fields) => JsonValue::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, JsonValue::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_last_write_wins_keeps_position() {
        let map: JsonMap = vec![
            ("a", JsonValue::from(1)),
            ("b", JsonValue::from(2)),
            ("a", JsonValue::from(3)),
        ]
        .into_iter()
        .collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&JsonValue::from(3)));
    }

    #[test]
    fn test_u64_normalizes_to_int_when_it_fits() {
        assert_eq!(JsonNumber::from(7u64), JsonNumber::Int(7));
        assert_eq!(JsonNumber::from(u64::MAX), JsonNumber::UInt(u64::MAX));
    }

    #[test]
    fn test_from_serde_json_preserves_order_and_number_kind() {
        let value = JsonValue::from(json!({"z": 1, "a": 2.5, "m": [true, null]}));
        let fields = value.as_object().unwrap();
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(value.get("z"), Some(&JsonValue::Number(JsonNumber::Int(1))));
        assert_eq!(value.get("a"), Some(&JsonValue::Number(JsonNumber::Float(2.5))));
        assert_eq!(
            value.get("m"),
            Some(&JsonValue::Array(vec![JsonValue::Bool(true), JsonValue::Null]))
        );
    }

    #[test]
    fn test_kind_and_emptiness() {
        assert_eq!(JsonValue::Null.kind(), JsonKind::Null);
        assert!(JsonValue::Array(vec![]).is_empty());
        assert!(JsonValue::Object(JsonMap::new()).is_empty());
        assert!(!JsonValue::from("").is_empty());
        assert!(!JsonValue::from(0).is_container());
    }
}
