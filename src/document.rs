//! The canonical in-memory form of an INI document.
//!
//! A [`Document`] is one unnamed global [`Section`] plus any number of named
//! sections. The parser and the marshaler both build documents exclusively
//! through [`Document::set_scalar`], [`Document::append_array`] and
//! [`Document::set_map_entry`], so the same conflict rules apply to both.
//!
//! Section names are folded to lowercase. Sections are created by the first
//! write that targets them and are kept in first-seen order.
//!
//! ```rust
//! use serde_ini::Document;
//!
//! let mut doc = Document::new();
//! doc.set_scalar(None, "a", "b").unwrap();
//! doc.set_scalar(Some("SectionA"), "a", "b").unwrap();
//! doc.append_array(Some("sectiona"), "list", "1").unwrap();
//!
//! assert_eq!(doc.sections().count(), 1);
//! assert_eq!(doc.render(), "a=b\n\n[sectiona]\na=b\nlist[]=1\n\n");
//! ```

use crate::{Result, Section, Value};
use indexmap::IndexMap;

/// A global section plus named sections, keyed by lowercased name.
///
/// Equality compares content only; key and section order are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    global: Section,
    sections: IndexMap<String, Section>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Document::default()
    }

    /// Sets a scalar value in `section` (`None` for the global section).
    ///
    /// # Errors
    ///
    /// See [`Section::insert_scalar`].
    pub fn set_scalar(
        &mut self,
        section: Option<&str>,
        key: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        self.target(section).insert_scalar(key, value)
    }

    /// Appends an array element in `section` (`None` for the global section).
    ///
    /// # Errors
    ///
    /// See [`Section::push_array`].
    pub fn append_array(
        &mut self,
        section: Option<&str>,
        key: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        self.target(section).push_array(key, value)
    }

    /// Adds a map entry in `section` (`None` for the global section).
    ///
    /// # Errors
    ///
    /// See [`Section::insert_map_entry`].
    pub fn set_map_entry(
        &mut self,
        section: Option<&str>,
        key: &str,
        map_key: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        self.target(section).insert_map_entry(key, map_key, value)
    }

    /// Returns the named section, creating an empty one if it does not exist.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_lowercase()).or_default()
    }

    fn target(&mut self, section: Option<&str>) -> &mut Section {
        match section {
            Some(name) => self.section_mut(name),
            None => &mut self.global,
        }
    }

    /// The section holding keys that appear before any `[name]` header.
    #[must_use]
    pub fn global(&self) -> &Section {
        &self.global
    }

    /// Looks up a named section, case-insensitively.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(&name.to_lowercase())
    }

    /// Iterates over the named sections in first-seen order.
    pub fn sections(&self) -> indexmap::map::Iter<'_, String, Section> {
        self.sections.iter()
    }

    /// Looks up a key in `section` (`None` for the global section).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::from_str;
    ///
    /// let doc = from_str("a = 1\n[Server]\nA = 2").unwrap();
    /// assert_eq!(doc.get(None, "a").and_then(|v| v.as_scalar()), Some("1"));
    /// assert_eq!(doc.get(Some("server"), "a").and_then(|v| v.as_scalar()), Some("2"));
    /// assert!(doc.get(Some("missing"), "a").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, section: Option<&str>, key: &str) -> Option<&Value> {
        match section {
            Some(name) => self.section(name)?.get(key),
            None => self.global.get(key),
        }
    }

    /// Returns `true` if there are no keys and no named sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_global_and_section_are_independent() {
        let mut doc = Document::new();
        doc.set_scalar(None, "a", "1").unwrap();
        doc.set_scalar(Some("one"), "a", "2").unwrap();
        assert_eq!(doc.get(None, "a"), Some(&Value::from("1")));
        assert_eq!(doc.get(Some("ONE"), "A"), Some(&Value::from("2")));
    }

    #[test]
    fn test_sections_are_created_lazily_and_reused() {
        let mut doc = Document::new();
        assert!(doc.is_empty());
        doc.append_array(Some("List"), "x", "1").unwrap();
        doc.append_array(Some("LIST"), "x", "2").unwrap();
        assert_eq!(doc.sections().count(), 1);
        assert_eq!(
            doc.get(Some("list"), "x").and_then(Value::as_array),
            Some(&["1".to_string(), "2".to_string()][..])
        );
    }

    #[test]
    fn test_empty_section_is_kept() {
        let mut doc = Document::new();
        doc.section_mut("Empty");
        assert!(!doc.is_empty());
        assert!(doc.section("empty").is_some_and(Section::is_empty));
    }

    #[test]
    fn test_conflicts_surface_through_document() {
        let mut doc = Document::new();
        doc.set_map_entry(Some("s"), "m", "k", "v").unwrap();
        assert!(matches!(
            doc.set_map_entry(Some("S"), "M", "k", "w"),
            Err(Error::DuplicateMapKey { .. })
        ));
        assert!(matches!(
            doc.set_scalar(Some("s"), "m", "w"),
            Err(Error::TypeConflict { .. })
        ));
    }

    #[test]
    fn test_equality_ignores_section_order() {
        let mut a = Document::new();
        a.set_scalar(Some("x"), "k", "1").unwrap();
        a.set_scalar(Some("y"), "k", "2").unwrap();
        let mut b = Document::new();
        b.set_scalar(Some("y"), "k", "2").unwrap();
        b.set_scalar(Some("x"), "k", "1").unwrap();
        assert_eq!(a, b);
    }
}
