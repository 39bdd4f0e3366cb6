//! The content held by a single key.
//!
//! A key holds exactly one [`Value`], and the value's kind is fixed by the
//! first write to that key:
//!
//! | Kind | Source line | Growth |
//! |------|-------------|--------|
//! | Scalar | `key = value` | never, a second write is an error |
//! | Array | `key[] = value` | appended in source order |
//! | Map | `key[inner] = value` | one entry per distinct inner key |
//!
//! ```rust
//! use serde_ini::{from_str, ValueKind};
//!
//! let doc = from_str("c[] = 123\nc[] = 456\nd[abc] = bob").unwrap();
//!
//! let c = doc.get(None, "c").unwrap();
//! assert_eq!(c.kind(), ValueKind::Array);
//! assert_eq!(c.as_array(), Some(&["123".to_string(), "456".to_string()][..]));
//!
//! let d = doc.get(None, "d").unwrap();
//! assert_eq!(d.get("abc"), Some("bob"));
//! ```

use indexmap::IndexMap;
use std::fmt;

/// The content of one key: a scalar, an array, or a map of strings.
///
/// Map inner keys are case-sensitive; only section and key names are folded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    Array(Vec<String>),
    Map(IndexMap<String, String>),
}

/// The three mutually exclusive shapes a [`Value`] can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Scalar,
    Array,
    Map,
}

impl ValueKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Scalar => "scalar",
            ValueKind::Array => "array",
            ValueKind::Map => "map",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Returns the kind of this value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::{Value, ValueKind};
    ///
    /// assert_eq!(Value::Scalar("b".to_string()).kind(), ValueKind::Scalar);
    /// assert_eq!(Value::Array(vec![]).kind(), ValueKind::Array);
    /// ```
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(_) => ValueKind::Scalar,
            Value::Array(_) => ValueKind::Array,
            Value::Map(_) => ValueKind::Map,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns the payload if this is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements, in insertion order, if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&IndexMap<String, String>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up an inner key of a map value. Returns `None` for other kinds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::from_str;
    ///
    /// let doc = from_str("d[Abc] = bob").unwrap();
    /// let d = doc.get(None, "d").unwrap();
    /// assert_eq!(d.get("Abc"), Some("bob"));
    /// assert_eq!(d.get("abc"), None);
    /// ```
    #[must_use]
    pub fn get(&self, inner_key: &str) -> Option<&str> {
        self.as_map()
            .and_then(|map| map.get(inner_key))
            .map(String::as_str)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(arr: Vec<String>) -> Self {
        Value::Array(arr)
    }
}

impl From<IndexMap<String, String>> for Value {
    fn from(map: IndexMap<String, String>) -> Self {
        Value::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_match_kind() {
        let scalar = Value::from("b");
        assert!(scalar.is_scalar());
        assert_eq!(scalar.as_scalar(), Some("b"));
        assert_eq!(scalar.as_array(), None);
        assert_eq!(scalar.get("b"), None);

        let array = Value::from(vec!["1".to_string(), "2".to_string()]);
        assert!(array.is_array());
        assert_eq!(array.as_array().map(<[String]>::len), Some(2));

        let mut map = IndexMap::new();
        map.insert("Key".to_string(), "v".to_string());
        let map = Value::from(map);
        assert!(map.is_map());
        assert_eq!(map.get("Key"), Some("v"));
        assert_eq!(map.get("key"), None);
    }

    #[test]
    fn test_map_equality_ignores_insertion_order() {
        let mut a = IndexMap::new();
        a.insert("x".to_string(), "1".to_string());
        a.insert("y".to_string(), "2".to_string());
        let mut b = IndexMap::new();
        b.insert("y".to_string(), "2".to_string());
        b.insert("x".to_string(), "1".to_string());
        assert_eq!(Value::Map(a), Value::Map(b));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ValueKind::Scalar.to_string(), "scalar");
        assert_eq!(ValueKind::Array.to_string(), "array");
        assert_eq!(ValueKind::Map.to_string(), "map");
    }
}
