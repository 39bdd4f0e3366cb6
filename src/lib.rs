//! # serde_ini
//!
//! A Serde-compatible codec for a small, line-oriented INI-like format.
//!
//! ## The Format
//!
//! A document is an optional global section followed by named sections.
//! Every key holds exactly one of three kinds of value:
//!
//! ```text
//! # a scalar, assigned once
//! name = value
//! # an array, one element per line
//! list[] = first
//! list[] = second
//! # a map, one entry per distinct inner key
//! map[inner] = value
//!
//! [section]
//! key = "quoted value"
//! ```
//!
//! Section and key names are case-insensitive and stored lowercased; map
//! inner keys keep their case. Lines starting with `//` or `#` are comments.
//! See the [`format`] module for the full grammar.
//!
//! ## Quick Start
//!
//! ### Parsing
//!
//! ```rust
//! use serde_ini::from_str;
//!
//! let doc = from_str(
//!     "a = b\n\
//!      c[] = 123\n\
//!      c[] = 456\n\
//!      d[abc] = bob\n\
//!      \n\
//!      [SectionA]\n\
//!      ghi = \"nob lob tob\"\n",
//! )
//! .unwrap();
//!
//! assert_eq!(doc.get(None, "a").and_then(|v| v.as_scalar()), Some("b"));
//! assert_eq!(doc.get(Some("sectiona"), "ghi").and_then(|v| v.as_scalar()), Some("nob lob tob"));
//! ```
//!
//! ### Marshaling
//!
//! ```rust
//! use serde::Serialize;
//! use serde_ini::to_string;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! #[derive(Serialize)]
//! struct Shape { name: String, origin: Point }
//!
//! let shape = Shape { name: "square".to_string(), origin: Point { x: 1, y: 2 } };
//! assert_eq!(to_string(&shape).unwrap(), "name=square\n\n[origin]\nx=1\ny=2\n\n");
//! ```
//!
//! ### Rendering
//!
//! A parsed [`Document`] renders back to the canonical text form. Keys are
//! sorted within each section, so the output does not depend on the order of
//! the input:
//!
//! ```rust
//! use serde_ini::from_str;
//!
//! let doc = from_str("b = 2\na = 1").unwrap();
//! assert_eq!(doc.to_string(), "a=1\nb=2\n\n");
//! ```
//!
//! ## Failure Model
//!
//! Parsing and marshaling stop at the first error and return an [`Error`];
//! there is no partial document and no silent recovery.

pub mod de;
pub mod document;
pub mod error;
pub mod format;
pub mod map;
pub mod options;
pub mod render;
pub mod ser;
pub mod value;

pub use de::Parser;
pub use document::Document;
pub use error::{Error, Result};
pub use map::Section;
pub use options::{RenderOptions, SectionOrder};
pub use ser::{empty_section, Serializer};
pub use value::{Value, ValueKind};

use serde::Serialize;
use std::io;

/// Marshal any `T: Serialize` into a [`Document`].
///
/// The top-level value must be a record (struct) or a map, possibly behind
/// any number of `Option`s.
///
/// # Examples
///
/// ```rust
/// use serde_ini::to_document;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Flags { verbose: bool, tags: Vec<&'static str> }
///
/// let doc = to_document(&Flags { verbose: false, tags: vec!["a", "b"] }).unwrap();
/// assert_eq!(doc.get(None, "verbose").and_then(|v| v.as_scalar()), Some("0"));
/// ```
///
/// # Errors
///
/// [`Error::NilInput`] for a top-level `None`, [`Error::UnsupportedType`] for
/// shapes the format cannot hold, [`Error::NestedSection`] for a record inside
/// a section, and the value conflicts of [`Document`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_document<T>(value: &T) -> Result<Document>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new();
    value.serialize(&mut serializer)?;
    let document = serializer.into_inner();
    log::debug!(
        "marshaled {} global keys and {} sections",
        document.global().len(),
        document.sections().count()
    );
    Ok(document)
}

/// Marshal any `T: Serialize` to an INI string.
///
/// # Examples
///
/// ```rust
/// use serde_ini::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x=1\ny=2\n\n");
/// ```
///
/// # Errors
///
/// See [`to_document`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, RenderOptions::default())
}

/// Marshal any `T: Serialize` to an INI string with custom render options.
///
/// # Errors
///
/// See [`to_document`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: RenderOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(to_document(value)?.render_with(&options))
}

/// Marshal any `T: Serialize` to INI bytes.
///
/// # Errors
///
/// See [`to_document`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_string(value).map(String::into_bytes)
}

/// Marshal any `T: Serialize` to a writer.
///
/// # Examples
///
/// ```rust
/// use serde_ini::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x=1\ny=2\n\n");
/// ```
///
/// # Errors
///
/// See [`to_document`]; also [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, RenderOptions::default())
}

/// Marshal any `T: Serialize` to a writer with custom render options.
///
/// # Errors
///
/// See [`to_writer`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: RenderOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let ini = to_string_with_options(value, options)?;
    writer.write_all(ini.as_bytes())?;
    Ok(())
}

/// Parse a [`Document`] from a string of INI text.
///
/// # Examples
///
/// ```rust
/// use serde_ini::from_str;
///
/// let doc = from_str("# settings\nname = Alice\n[Limits]\nmax = 10").unwrap();
/// assert_eq!(doc.section("limits").map(|s| s.len()), Some(1));
/// ```
///
/// # Errors
///
/// See [`Parser::parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Document> {
    Parser::from_str(s).parse()
}

/// Parse a [`Document`] from an I/O stream of INI text.
///
/// The stream is read to the end before the document is returned.
///
/// # Examples
///
/// ```rust
/// use serde_ini::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new(b"x = 1\ny = 2")).unwrap();
/// assert_eq!(doc.global().len(), 2);
/// ```
///
/// # Errors
///
/// See [`Parser::parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R) -> Result<Document>
where
    R: io::Read,
{
    Parser::new(io::BufReader::new(reader)).parse()
}

/// Parse a [`Document`] from bytes of INI text.
///
/// # Errors
///
/// [`Error::Io`] if the bytes are not valid UTF-8; otherwise see
/// [`Parser::parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Document> {
    Parser::new(v).parse()
}
