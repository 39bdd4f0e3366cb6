//! Rendering a [`Document`] back to text.
//!
//! Output is deterministic within a section: keys in ascending order, array
//! elements in stored order, map entries in ascending inner-key order. The
//! global section comes first without a header, followed by a blank line;
//! each named section is a `[name]` header, its lines, and a blank line.
//!
//! A value is wrapped in `"` when it contains a space or a `"`, or when it
//! starts or ends with `'` or whitespace. Inside quotes, backslashes are
//! escaped first, then the quote character.

use crate::{Document, RenderOptions, Result, Section, SectionOrder, Value};
use std::fmt;
use std::io;

impl Document {
    /// Renders the document with default options.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_with(&RenderOptions::default())
    }

    /// Renders the document with the given options.
    #[must_use]
    pub fn render_with(&self, options: &RenderOptions) -> String {
        let mut output = String::with_capacity(256);
        write_section(&mut output, self.global());
        output.push('\n');

        let mut sections: Vec<_> = self.sections().collect();
        if options.section_order == SectionOrder::Sorted {
            sections.sort_by(|(a, _), (b, _)| a.cmp(b));
        }
        for (name, section) in sections {
            output.push('[');
            output.push_str(name);
            output.push_str("]\n");
            write_section(&mut output, section);
            output.push('\n');
        }
        output
    }

    /// Writes the rendered document to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if writing fails.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn write_section(output: &mut String, section: &Section) {
    for (key, value) in section.sorted_entries() {
        match value {
            Value::Scalar(s) => write_line(output, key, None, s),
            Value::Array(arr) => {
                for element in arr {
                    write_line(output, key, Some(""), element);
                }
            }
            Value::Map(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));
                for (map_key, element) in entries {
                    write_line(output, key, Some(map_key), element);
                }
            }
        }
    }
}

fn write_line(output: &mut String, key: &str, index: Option<&str>, value: &str) {
    output.push_str(key);
    if let Some(index) = index {
        output.push('[');
        output.push_str(index);
        output.push(']');
    }
    output.push('=');
    write_value(output, value);
    output.push('\n');
}

/// Spaces and `"` always need quotes. A value that starts or ends with `'`
/// or whitespace also does, as the parser would strip or misread it bare.
#[inline]
fn needs_quotes(s: &str) -> bool {
    let fragile = |c: char| c == '\'' || c.is_whitespace();
    s.contains(' ')
        || s.contains('"')
        || s.starts_with(fragile)
        || s.ends_with(fragile)
}

fn write_value(output: &mut String, s: &str) {
    if needs_quotes(s) {
        output.push('"');
        for ch in s.chars() {
            match ch {
                '\\' => output.push_str("\\\\"),
                '"' => output.push_str("\\\""),
                _ => output.push(ch),
            }
        }
        output.push('"');
    } else {
        output.push_str(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_sorted_arrays_in_order_maps_sorted() {
        let mut doc = Document::new();
        doc.set_scalar(None, "b", "c").unwrap();
        doc.append_array(None, "c", "456").unwrap();
        doc.append_array(None, "c", "123").unwrap();
        doc.set_map_entry(None, "d", "def", "ajob").unwrap();
        doc.set_map_entry(None, "d", "abc", "bob").unwrap();
        doc.set_scalar(None, "a", "b").unwrap();

        assert_eq!(
            doc.render(),
            "a=b\nb=c\nc[]=456\nc[]=123\nd[abc]=bob\nd[def]=ajob\n\n"
        );
    }

    #[test]
    fn test_quotes_only_when_needed() {
        let mut out = String::new();
        write_value(&mut out, "plain\\path");
        assert_eq!(out, "plain\\path");

        let mut out = String::new();
        write_value(&mut out, "nob lob tob");
        assert_eq!(out, "\"nob lob tob\"");

        let mut out = String::new();
        write_value(&mut out, "say \"hi\" \\o/");
        assert_eq!(out, r#""say \"hi\" \\o/""#);
    }

    #[test]
    fn test_quotes_values_with_fragile_edges() {
        for (value, expected) in [
            ("'", "\"'\""),
            ("'x'", "\"'x'\""),
            ("it's", "it's"),
            ("\tlead", "\"\tlead\""),
            ("trail\t", "\"trail\t\""),
            ("in\tside", "in\tside"),
        ] {
            let mut out = String::new();
            write_value(&mut out, value);
            assert_eq!(out, expected, "{value:?}");
        }
    }

    #[test]
    fn test_empty_document_renders_single_blank_line() {
        assert_eq!(Document::new().render(), "\n");
    }

    #[test]
    fn test_empty_section_keeps_its_header() {
        let mut doc = Document::new();
        doc.set_scalar(None, "global", "99").unwrap();
        doc.section_mut("Empty");
        assert_eq!(doc.to_string(), "global=99\n\n[empty]\n\n");
    }

    #[test]
    fn test_write_to() {
        let mut doc = Document::new();
        doc.set_scalar(Some("s"), "k", "v").unwrap();
        let mut buffer = Vec::new();
        doc.write_to(&mut buffer).unwrap();
        assert_eq!(buffer, b"\n[s]\nk=v\n\n");
    }
}
