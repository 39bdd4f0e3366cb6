//! INI parsing.
//!
//! This module provides the [`Parser`], which reads a stream line by line and
//! builds a [`Document`].
//!
//! ## Overview
//!
//! Each physical line is trimmed and then classified:
//!
//! - **Blank**: skipped
//! - **Comment**: starts with `//` or `#`, skipped
//! - **Section header**: `[letters]`, selects a (lowercased) section
//! - **Key/value**: `key = value`, `key[] = value` or `key[inner] = value`
//!
//! Anything else is an error carrying the 1-based line number. The first
//! error aborts the parse; no partial document is returned.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_ini::from_str;
//!
//! let doc = from_str("[Server]\nhost = \"my host\"\nport = 8080").unwrap();
//! let server = doc.section("server").unwrap();
//! assert_eq!(server.get("host").and_then(|v| v.as_scalar()), Some("my host"));
//! ```

use crate::{Document, Error, Result};
use std::io::BufRead;

/// Where key/value lines are currently written.
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    NoSection,
    InSection(String),
}

/// The bracketed part of a key: absent, empty (`[]`) or an inner key.
#[derive(Debug, PartialEq, Eq)]
enum Index<'a> {
    None,
    Array,
    Map(&'a str),
}

/// A classified line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Skip,
    Section(&'a str),
    Entry {
        key: &'a str,
        index: Index<'a>,
        value: String,
    },
}

/// The INI parser.
///
/// Wraps any [`BufRead`] and consumes it to the end in [`Parser::parse`].
pub struct Parser<R> {
    reader: R,
    line: usize,
    state: State,
}

impl<'a> Parser<&'a [u8]> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'a str) -> Self {
        Parser::new(input.as_bytes())
    }
}

impl<R: BufRead> Parser<R> {
    pub fn new(reader: R) -> Self {
        Parser {
            reader,
            line: 0,
            state: State::NoSection,
        }
    }

    /// Parses the whole stream into a [`Document`].
    ///
    /// # Errors
    ///
    /// [`Error::Io`] for read failures (including invalid UTF-8),
    /// [`Error::Syntax`] and [`Error::QuoteMismatch`] for malformed lines, and
    /// the value conflicts of [`Document`] tagged with the line number.
    pub fn parse(mut self) -> Result<Document> {
        let mut document = Document::new();
        let mut buf = String::new();

        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                break;
            }
            self.line += 1;
            self.parse_line(&buf, &mut document)?;
        }

        log::debug!(
            "parsed {} lines into {} global keys and {} sections",
            self.line,
            document.global().len(),
            document.sections().count()
        );
        Ok(document)
    }

    fn parse_line(&mut self, raw: &str, document: &mut Document) -> Result<()> {
        let line = self.line;
        match classify(raw, line)? {
            Line::Skip => {}
            Line::Section(name) => {
                let name = name.to_lowercase();
                log::trace!("line {}: entering section [{}]", line, name);
                self.state = State::InSection(name);
            }
            Line::Entry { key, index, value } => {
                let section = match &self.state {
                    State::NoSection => None,
                    State::InSection(name) => Some(name.as_str()),
                };
                log::trace!("line {}: {:?} entry for key '{}'", line, index, key);
                let added = match index {
                    Index::None => document.set_scalar(section, key, value),
                    Index::Array => document.append_array(section, key, value),
                    Index::Map(map_key) => document.set_map_entry(section, key, map_key, value),
                };
                added.map_err(|e| e.at_line(line))?;
            }
        }
        Ok(())
    }
}

fn classify(raw: &str, line: usize) -> Result<Line<'_>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('#') {
        return Ok(Line::Skip);
    }

    if let Some(name) = section_header(trimmed) {
        return Ok(Line::Section(name));
    }

    key_value(trimmed, line)
}

/// Section and key names: one or more ASCII letters.
pub(crate) fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Map inner keys: any non-empty text on one line without `]`.
pub(crate) fn is_map_key(map_key: &str) -> bool {
    !map_key.is_empty() && !map_key.contains([']', '\n', '\r'])
}

fn section_header(line: &str) -> Option<&str> {
    let name = line.strip_prefix('[')?.strip_suffix(']')?;
    is_identifier(name).then_some(name)
}

fn key_value(line: &str, at: usize) -> Result<Line<'_>> {
    let syntax = || Error::Syntax { line: at };

    let key_end = line
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(line.len());
    if key_end == 0 {
        return Err(syntax());
    }
    let (key, mut rest) = line.split_at(key_end);

    let mut index = Index::None;
    if let Some(bracketed) = rest.strip_prefix('[') {
        let close = bracketed.find(']').ok_or_else(syntax)?;
        let inner = &bracketed[..close];
        index = if inner.is_empty() {
            Index::Array
        } else {
            Index::Map(inner)
        };
        rest = &bracketed[close + 1..];
    }

    let raw_value = rest
        .trim_start()
        .strip_prefix('=')
        .ok_or_else(syntax)?
        .trim_start();

    Ok(Line::Entry {
        key,
        index,
        value: unquote(raw_value, at)?,
    })
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Strips matching surrounding quotes and resolves `\\` and `\<quote>`.
fn unquote(raw: &str, line: usize) -> Result<String> {
    let open = raw.chars().next().filter(|&c| is_quote(c));
    let body_start = open.map_or(0, char::len_utf8);
    let close = raw[body_start..].chars().next_back().filter(|&c| is_quote(c));

    if open != close {
        return Err(Error::QuoteMismatch { line, open, close });
    }

    let quote = match open {
        Some(quote) => quote,
        None => return Ok(raw.to_string()),
    };

    let body = &raw[1..raw.len() - 1];
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.peek() {
                Some(&next) if next == '\\' || next == quote => {
                    result.push(next);
                    chars.next();
                }
                _ => result.push(ch),
            }
        } else {
            result.push(ch);
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &'static str, index: Index<'static>, value: &str) -> Line<'static> {
        Line::Entry {
            key,
            index,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_classify_skips_blank_and_comments() {
        assert_eq!(classify("   \n", 1).unwrap(), Line::Skip);
        assert_eq!(classify("  // note", 1).unwrap(), Line::Skip);
        assert_eq!(classify("# hash = note", 1).unwrap(), Line::Skip);
    }

    #[test]
    fn test_classify_section_headers() {
        assert_eq!(classify("[SectionA]", 1).unwrap(), Line::Section("SectionA"));
        assert_eq!(classify("  [x]  \n", 1).unwrap(), Line::Section("x"));
        assert!(matches!(classify("[two words]", 3), Err(Error::Syntax { line: 3 })));
        assert!(matches!(classify("[]", 3), Err(Error::Syntax { line: 3 })));
        assert!(matches!(classify("[a1]", 3), Err(Error::Syntax { line: 3 })));
    }

    #[test]
    fn test_classify_entries() {
        assert_eq!(classify("a = b", 1).unwrap(), entry("a", Index::None, "b"));
        assert_eq!(classify("empty =", 1).unwrap(), entry("empty", Index::None, ""));
        assert_eq!(classify("c[] = 123", 1).unwrap(), entry("c", Index::Array, "123"));
        assert_eq!(
            classify("d[a b] = x=y", 1).unwrap(),
            entry("d", Index::Map("a b"), "x=y")
        );
        assert_eq!(classify("k=v v", 1).unwrap(), entry("k", Index::None, "v v"));
    }

    #[test]
    fn test_classify_rejects_malformed_entries() {
        for line in ["a", "a b = c", "1a = b", "a[ = b", "a [] = b", "a[]b = c", "= b"] {
            assert!(
                matches!(classify(line, 7), Err(Error::Syntax { line: 7 })),
                "{line:?} should be a syntax error"
            );
        }
    }

    #[test]
    fn test_name_rules() {
        assert!(is_identifier("SectionA"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("max_conn"));
        assert!(is_map_key("a b"));
        assert!(!is_map_key(""));
        assert!(!is_map_key("a]b"));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"nob lob tob\"", 1).unwrap(), "nob lob tob");
        assert_eq!(unquote("'it\\'s'", 1).unwrap(), "it's");
        assert_eq!(unquote(r#""a \"b\" \\c""#, 1).unwrap(), r#"a "b" \c"#);
        assert_eq!(unquote(r#"'keep \n \"'"#, 1).unwrap(), r#"keep \n \""#);
        assert_eq!(unquote("\"\"", 1).unwrap(), "");
        assert_eq!(unquote(r"bare\\", 1).unwrap(), r"bare\\");
    }

    #[test]
    fn test_unquote_mismatch() {
        assert!(matches!(
            unquote("\"abc'", 5),
            Err(Error::QuoteMismatch { line: 5, open: Some('"'), close: Some('\'') })
        ));
        assert!(matches!(
            unquote("'abc", 5),
            Err(Error::QuoteMismatch { open: Some('\''), close: None, .. })
        ));
        assert!(matches!(
            unquote("abc\"", 5),
            Err(Error::QuoteMismatch { open: None, close: Some('"'), .. })
        ));
        assert!(matches!(
            unquote("\"", 5),
            Err(Error::QuoteMismatch { open: Some('"'), close: None, .. })
        ));
    }

    #[test]
    fn test_parser_tracks_sections() {
        let doc = Parser::from_str("a = 1\n[One]\na = 2\n[two]\nb = 3\n[ONE]\nc = 4\n")
            .parse()
            .unwrap();
        assert_eq!(doc.get(None, "a").and_then(|v| v.as_scalar()), Some("1"));
        let one = doc.section("one").unwrap();
        assert_eq!(one.len(), 2);
        assert_eq!(doc.sections().count(), 2);
    }

    #[test]
    fn test_crlf_lines() {
        let doc = Parser::from_str("a = 1\r\n[s]\r\nb = \"x y\"\r\n").parse().unwrap();
        assert_eq!(doc.get(Some("s"), "b").and_then(|v| v.as_scalar()), Some("x y"));
    }
}
