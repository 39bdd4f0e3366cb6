//! INI Format Reference
//!
//! This module documents the text format as implemented by this library.
//!
//! # Lines
//!
//! Input is read one physical line at a time. Each line is trimmed of
//! surrounding whitespace and then classified:
//!
//! | Line | Meaning |
//! |------|---------|
//! | empty | ignored |
//! | `// ...` or `# ...` | comment, ignored |
//! | `[Name]` | selects section `name` |
//! | `key = value` | scalar |
//! | `key[] = value` | array element |
//! | `key[inner] = value` | map entry |
//!
//! Any other line is a syntax error reported with its 1-based line number.
//!
//! # Sections
//!
//! A header is `[`, one or more ASCII letters, and `]` with nothing else on
//! the line. Names are case-insensitive and stored lowercased. Lines before
//! the first header belong to the global section. Repeating a header reopens
//! the same section:
//!
//! ```text
//! [server]
//! host = a
//! [other]
//! x = 1
//! [SERVER]
//! port = 80
//! ```
//!
//! leaves `host` and `port` in one `server` section.
//!
//! # Keys
//!
//! A key is one or more ASCII letters, optionally followed directly by a
//! bracketed index, then `=`. Whitespace is allowed around `=` but not between
//! the key and its `[`.
//!
//! - `[]` makes the line an array element; elements keep source order
//! - `[inner]` makes it a map entry; `inner` is any text without `]`, kept
//!   exactly as written (case-sensitive)
//!
//! A key holds a single kind of value. Mixing kinds on one key, assigning a
//! scalar twice, or repeating a map inner key is an error, even when the
//! repeated value is identical.
//!
//! # Values
//!
//! The value runs to the end of the line. It is either bare, taken verbatim:
//!
//! ```text
//! path = C:\temp
//! ```
//!
//! or wrapped in matching `"` or `'` quotes:
//!
//! ```text
//! title = "nob lob tob"
//! quote = 'it\'s'
//! ```
//!
//! Inside quotes, `\\` stands for a backslash and `\"` (or `\'`) for the
//! quote character in use. No other escapes exist; any other backslash is
//! kept as is. A value that starts with a quote must end with the same one,
//! and a value that ends with a quote must start with it.
//!
//! # Canonical Output
//!
//! Rendering is deterministic inside each section:
//!
//! - keys in ascending order
//! - array elements in stored order
//! - map entries in ascending inner-key order
//! - `=` without surrounding spaces
//! - values quoted with `"` when they contain a space or a `"`, or start or
//!   end with `'` or whitespace
//!
//! The global section comes first with no header, followed by a blank line.
//! Each named section follows as a `[name]` header, its lines and a blank
//! line. Named sections are written in first-seen order unless
//! [`SectionOrder::Sorted`](crate::SectionOrder::Sorted) is requested.
//!
//! ```text
//! c[]=123
//! c[]=456
//! d[abc]=bob
//! empty=
//! ghi="nob lob tob"
//!
//! [sectiona]
//! a=b
//!
//! ```
//!
//! Comments, original key casing and original line order are not preserved.
//! Re-parsing the output of any parsed document gives an equal document.
