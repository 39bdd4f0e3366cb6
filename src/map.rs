//! Sections: the key-to-value maps a document is made of.
//!
//! [`Section`] is a thin wrapper around [`IndexMap`]. Key names are folded to
//! lowercase on every write and lookup, so `Name`, `NAME` and `name` are one
//! key. Iteration follows first-write order; the renderer sorts keys itself.
//!
//! A section owns the per-key half of the mutation contract shared by the
//! parser and the marshaler:
//!
//! - [`Section::insert_scalar`] creates a scalar, never replaces one
//! - [`Section::push_array`] appends to an array, creating it if absent
//! - [`Section::insert_map_entry`] adds a new inner key to a map
//!
//! ```rust
//! use serde_ini::{Error, Section};
//!
//! let mut section = Section::new();
//! section.push_array("Tags", "a").unwrap();
//! section.push_array("tags", "b").unwrap();
//!
//! let err = section.insert_scalar("TAGS", "c").unwrap_err();
//! assert!(matches!(err, Error::TypeConflict { .. }));
//! assert_eq!(section.len(), 1);
//! ```

use crate::{Error, Result, Value, ValueKind};
use indexmap::IndexMap;

/// An ordered map of lowercased key names to [`Value`]s.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section(IndexMap<String, Value>);

impl Section {
    /// Creates an empty `Section`.
    #[must_use]
    pub fn new() -> Self {
        Section(IndexMap::new())
    }

    /// Sets a scalar value.
    ///
    /// # Errors
    ///
    /// [`Error::TypeConflict`] if the key holds an array or map, and
    /// [`Error::DuplicateScalar`] if it already holds a scalar, even an equal one.
    pub fn insert_scalar(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let key = key.to_lowercase();
        if let Some(existing) = self.0.get(&key) {
            return Err(match existing.kind() {
                ValueKind::Scalar => Error::DuplicateScalar { line: None, key },
                kind => conflict(key, kind, ValueKind::Scalar),
            });
        }
        self.0.insert(key, Value::Scalar(value.into()));
        Ok(())
    }

    /// Appends an element to an array value, creating the array if absent.
    ///
    /// # Errors
    ///
    /// [`Error::TypeConflict`] if the key holds a scalar or map.
    pub fn push_array(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let key = key.to_lowercase();
        match self.0.get_mut(&key) {
            Some(Value::Array(arr)) => arr.push(value.into()),
            Some(existing) => return Err(conflict(key, existing.kind(), ValueKind::Array)),
            None => {
                self.0.insert(key, Value::Array(vec![value.into()]));
            }
        }
        Ok(())
    }

    /// Adds an entry to a map value, creating the map if absent.
    ///
    /// The inner key is stored as given, without case folding.
    ///
    /// # Errors
    ///
    /// [`Error::TypeConflict`] if the key holds a scalar or array, and
    /// [`Error::DuplicateMapKey`] if `map_key` is already present.
    pub fn insert_map_entry(
        &mut self,
        key: &str,
        map_key: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        let key = key.to_lowercase();
        match self.0.get_mut(&key) {
            Some(Value::Map(map)) => {
                if map.contains_key(map_key) {
                    return Err(Error::DuplicateMapKey {
                        line: None,
                        key,
                        map_key: map_key.to_string(),
                    });
                }
                map.insert(map_key.to_string(), value.into());
            }
            Some(existing) => return Err(conflict(key, existing.kind(), ValueKind::Map)),
            None => {
                let mut map = IndexMap::new();
                map.insert(map_key.to_string(), value.into());
                self.0.insert(key, Value::Map(map));
            }
        }
        Ok(())
    }

    /// Returns the value stored under `key`, compared case-insensitively.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::Section;
    ///
    /// let mut section = Section::new();
    /// section.insert_scalar("Name", "Alice").unwrap();
    /// assert_eq!(section.get("NAME").and_then(|v| v.as_scalar()), Some("Alice"));
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(&key.to_lowercase())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(&key.to_lowercase())
    }

    /// Returns the number of keys in the section.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the section holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in first-write order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the key-value pairs, in first-write order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }

    /// Returns the key-value pairs in ascending key order.
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<(&String, &crate::Value)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));
        entries
    }
}

fn conflict(key: String, existing: ValueKind, attempted: ValueKind) -> Error {
    Error::TypeConflict {
        line: None,
        key,
        existing,
        attempted,
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_is_never_overwritten() {
        let mut section = Section::new();
        section.insert_scalar("a", "b").unwrap();
        let err = section.insert_scalar("A", "b").unwrap_err();
        assert!(matches!(err, Error::DuplicateScalar { ref key, .. } if key == "a"));
        assert_eq!(section.get("a").and_then(|v| v.as_scalar()), Some("b"));
    }

    #[test]
    fn test_each_kind_rejects_the_others() {
        let mut section = Section::new();
        section.insert_scalar("s", "1").unwrap();
        section.push_array("a", "1").unwrap();
        section.insert_map_entry("m", "k", "1").unwrap();

        assert!(matches!(
            section.push_array("s", "2"),
            Err(Error::TypeConflict { existing: ValueKind::Scalar, attempted: ValueKind::Array, .. })
        ));
        assert!(matches!(
            section.insert_map_entry("s", "k", "2"),
            Err(Error::TypeConflict { existing: ValueKind::Scalar, attempted: ValueKind::Map, .. })
        ));
        assert!(matches!(
            section.insert_scalar("a", "2"),
            Err(Error::TypeConflict { existing: ValueKind::Array, attempted: ValueKind::Scalar, .. })
        ));
        assert!(matches!(
            section.insert_map_entry("a", "k", "2"),
            Err(Error::TypeConflict { existing: ValueKind::Array, attempted: ValueKind::Map, .. })
        ));
        assert!(matches!(
            section.insert_scalar("m", "2"),
            Err(Error::TypeConflict { existing: ValueKind::Map, attempted: ValueKind::Scalar, .. })
        ));
        assert!(matches!(
            section.push_array("m", "2"),
            Err(Error::TypeConflict { existing: ValueKind::Map, attempted: ValueKind::Array, .. })
        ));
    }

    #[test]
    fn test_map_inner_keys_are_case_sensitive() {
        let mut section = Section::new();
        section.insert_map_entry("d", "abc", "bob").unwrap();
        section.insert_map_entry("D", "ABC", "alice").unwrap();
        let err = section.insert_map_entry("d", "abc", "again").unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateMapKey { ref key, ref map_key, .. } if key == "d" && map_key == "abc"
        ));
        assert_eq!(section.get("d").and_then(|v| v.as_map()).map(|m| m.len()), Some(2));
    }

    #[test]
    fn test_sorted_entries() {
        let mut section = Section::new();
        section.insert_scalar("b", "2").unwrap();
        section.insert_scalar("a", "1").unwrap();
        let keys: Vec<_> = section.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
        let sorted: Vec<_> = section.sorted_entries().into_iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(sorted, vec!["a", "b"]);
    }
}
