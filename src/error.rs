//! Error types for INI parsing and marshaling.
//!
//! Every failure is a value of [`Error`]. Parsing and marshaling both stop at
//! the first error, so a caller never sees a partially built [`Document`].
//!
//! ## Error Categories
//!
//! - **Stream errors**: the input could not be read ([`Error::Io`])
//! - **Grammar errors**: a line is neither a section header nor a key/value
//!   line, or its quotes do not match
//! - **Value conflicts**: a write disagrees with what a key already holds
//! - **Marshaling errors**: the input value has a shape the format cannot hold
//!
//! Conflicts raised while parsing carry the 1-based line number of the
//! offending line, so callers can match on the kind and still report where it
//! happened:
//!
//! ```rust
//! use serde_ini::{from_str, Error};
//!
//! let err = from_str("a = 1\na = 2").unwrap_err();
//! assert!(matches!(err, Error::DuplicateScalar { line: Some(2), .. }));
//! assert_eq!(err.line(), Some(2));
//! ```
//!
//! [`Document`]: crate::Document

use crate::ValueKind;
use std::fmt;
use std::io;
use thiserror::Error;

/// Represents all possible errors that can occur while parsing or marshaling.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading the input stream failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The line matches neither the section header nor the key/value grammar.
    #[error("Syntax error at line {line}: line is not understood")]
    Syntax { line: usize },

    /// A quoted value opens and closes with different quote characters.
    #[error(
        "Quoted value on line {line} has mismatched quotation characters - {} at start and {} at end",
        quote_name(.open),
        quote_name(.close)
    )]
    QuoteMismatch {
        line: usize,
        open: Option<char>,
        close: Option<char>,
    },

    /// The key already holds a value of a different kind.
    #[error(
        "{}can't extend {existing} value '{key}' with {attempted} value",
        line_prefix(.line)
    )]
    TypeConflict {
        line: Option<usize>,
        key: String,
        existing: ValueKind,
        attempted: ValueKind,
    },

    /// A scalar was assigned to a key that already holds a scalar.
    #[error("{}scalar value exists for key '{key}'", line_prefix(.line))]
    DuplicateScalar { line: Option<usize>, key: String },

    /// A map entry was assigned to an inner key that already exists.
    #[error(
        "{}map value exists for key '{key}' with map key '{map_key}'",
        line_prefix(.line)
    )]
    DuplicateMapKey {
        line: Option<usize>,
        key: String,
        map_key: String,
    },

    /// The marshaled value has a shape with no place in the format.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A record was found inside a section that is already selected.
    #[error("can not marshal record '{key}' here - ini format does not support nested sections")]
    NestedSection { key: String },

    /// A marshaled field or section name is not made of ASCII letters.
    #[error("can not marshal key '{key}' - names must be ASCII letters")]
    InvalidKey { key: String },

    /// A marshaled map key is empty or can not be written inside `[...]`.
    #[error(
        "can not marshal map key '{map_key}' for key '{key}' - map keys must be \
         non-empty single-line text without ']'"
    )]
    InvalidMapKey { key: String, map_key: String },

    /// The top-level marshaled value is `None`.
    #[error("can not marshal a nil value")]
    NilInput,

    /// Custom error raised by a `Serialize` implementation.
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported type error naming the offending shape.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns the 1-based input line this error is attached to, if any.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line } | Error::QuoteMismatch { line, .. } => Some(*line),
            Error::TypeConflict { line, .. }
            | Error::DuplicateScalar { line, .. }
            | Error::DuplicateMapKey { line, .. } => *line,
            _ => None,
        }
    }

    /// Attaches a line number to a value conflict. Other variants pass through.
    pub(crate) fn at_line(mut self, at: usize) -> Self {
        match &mut self {
            Error::TypeConflict { line, .. }
            | Error::DuplicateScalar { line, .. }
            | Error::DuplicateMapKey { line, .. } => *line = Some(at),
            _ => {}
        }
        self
    }
}

fn line_prefix(line: &Option<usize>) -> String {
    line.map(|l| format!("failed to add key value pair at line {}: ", l))
        .unwrap_or_default()
}

fn quote_name(quote: &Option<char>) -> String {
    match quote {
        Some(c) => c.to_string(),
        None => "no quote".to_string(),
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
