//! INI marshaling.
//!
//! This module provides the [`Serializer`] implementation that walks any
//! `T: Serialize` and fills a [`Document`] through the same mutation contract
//! the parser uses.
//!
//! ## Overview
//!
//! Serde's data model is mapped onto the three value kinds:
//!
//! - **Records** (structs, unit structs, and maps of unknown length such as
//!   those produced by `#[serde(flatten)]`): at the top level their fields
//!   are keys of the global section; a record-valued field becomes a
//!   `[section]` named after the field
//! - **Associative containers** (maps of known length): one `key[inner]=value`
//!   entry per map entry
//! - **Sequences** (`Vec`, arrays, tuples, bytes): one `key[]=value` per element
//! - **Scalars**: `key=value`
//!
//! Flattened fields are promoted into their parent, recursively, and fields
//! skipped by serde never reach the document. A record inside a section is a
//! [`Error::NestedSection`] error, as the format has no nested sections.
//!
//! Field and section names must be ASCII letters, so a `snake_case` field is
//! an [`Error::InvalidKey`]; `#[serde(rename_all = "PascalCase")]` or
//! `"lowercase"` fixes that. Map keys must be non-empty and free of `]` and
//! line breaks, or the entry is an [`Error::InvalidMapKey`].
//!
//! Scalar conversion: `bool` as `1`/`0`, integers in decimal, floats in
//! shortest round-trip form, strings and chars unchanged, unit enum variants
//! by name and `None` as the empty string.
//!
//! ## Usage
//!
//! ```rust
//! use serde::Serialize;
//! use serde_ini::to_string;
//!
//! #[derive(Serialize)]
//! struct Server {
//!     host: String,
//!     ports: Vec<u16>,
//! }
//!
//! #[derive(Serialize)]
//! struct Config {
//!     debug: bool,
//!     server: Server,
//! }
//!
//! let config = Config {
//!     debug: true,
//!     server: Server { host: "local host".to_string(), ports: vec![80, 443] },
//! };
//!
//! assert_eq!(
//!     to_string(&config).unwrap(),
//!     "debug=1\n\n[server]\nhost=\"local host\"\nports[]=80\nports[]=443\n\n"
//! );
//! ```

use crate::de::{is_identifier, is_map_key};
use crate::{Document, Error, Result};
use serde::ser::{self, Impossible, Serialize, SerializeStruct};

/// The INI serializer.
///
/// Accepts a record or an associative container at the top level and
/// accumulates the result in a [`Document`], returned by
/// [`Serializer::into_inner`].
#[derive(Debug, Default)]
pub struct Serializer {
    document: Document,
}

impl Serializer {
    pub fn new() -> Self {
        Serializer {
            document: Document::new(),
        }
    }

    pub fn into_inner(self) -> Document {
        self.document
    }
}

/// Serializes an `Option` field so that `None` still yields an empty section.
///
/// Serde erases the type of a `None`, so an absent record would otherwise be
/// written as an empty scalar. Use it on optional record fields:
///
/// ```rust
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Limits {
///     max: u32,
/// }
///
/// #[derive(Serialize)]
/// struct Config {
///     #[serde(serialize_with = "serde_ini::empty_section")]
///     limits: Option<Limits>,
/// }
///
/// let ini = serde_ini::to_string(&Config { limits: None }).unwrap();
/// assert_eq!(ini, "\n[limits]\n\n");
/// ```
///
/// # Errors
///
/// Whatever the wrapped serializer returns.
pub fn empty_section<T, S>(
    value: &Option<T>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    T: Serialize,
    S: ser::Serializer,
{
    match value {
        Some(value) => value.serialize(serializer),
        None => serializer.serialize_struct("EmptySection", 0)?.end(),
    }
}

fn unsupported_top_level(kind: &str) -> Error {
    Error::unsupported_type(&format!("can not marshal unsupported type '{}'", kind))
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = RecordSerializer<'a>;
    type SerializeStruct = RecordSerializer<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, _v: bool) -> Result<()> {
        Err(unsupported_top_level("bool"))
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, _v: i64) -> Result<()> {
        Err(unsupported_top_level("integer"))
    }

    fn serialize_i128(self, _v: i128) -> Result<()> {
        Err(unsupported_top_level("integer"))
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, _v: u64) -> Result<()> {
        Err(unsupported_top_level("unsigned integer"))
    }

    fn serialize_u128(self, _v: u128) -> Result<()> {
        Err(unsupported_top_level("unsigned integer"))
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, _v: f64) -> Result<()> {
        Err(unsupported_top_level("float"))
    }

    fn serialize_char(self, _v: char) -> Result<()> {
        Err(unsupported_top_level("char"))
    }

    fn serialize_str(self, _v: &str) -> Result<()> {
        Err(unsupported_top_level("string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(unsupported_top_level("bytes"))
    }

    fn serialize_none(self) -> Result<()> {
        Err(Error::NilInput)
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Err(unsupported_top_level("()"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        Err(unsupported_top_level(&format!("{}::{}", name, variant)))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(unsupported_top_level(&format!("{}::{}", name, variant)))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(unsupported_top_level("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(unsupported_top_level("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(unsupported_top_level(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(unsupported_top_level(&format!("{}::{}", name, variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(RecordSerializer::new(&mut self.document, None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(RecordSerializer::new(&mut self.document, None))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(unsupported_top_level(&format!("{}::{}", name, variant)))
    }
}

/// Writes the fields of a record into one section.
///
/// `section` is `None` for the top-level record, whose fields land in the
/// global section and may themselves open sections.
pub struct RecordSerializer<'a> {
    document: &'a mut Document,
    section: Option<String>,
    current_key: Option<String>,
}

impl<'a> RecordSerializer<'a> {
    fn new(document: &'a mut Document, section: Option<String>) -> Self {
        RecordSerializer {
            document,
            section,
            current_key: None,
        }
    }

    fn field<T>(&mut self, key: &str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if !is_identifier(key) {
            return Err(Error::InvalidKey {
                key: key.to_string(),
            });
        }
        value.serialize(FieldSerializer {
            document: &mut *self.document,
            section: self.section.as_deref(),
            key,
        })
    }
}

impl<'a> ser::SerializeStruct for RecordSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a> ser::SerializeMap for RecordSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(key.serialize(ScalarSerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.field(&key, value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Serializes the value of one named field into the targeted section.
struct FieldSerializer<'a> {
    document: &'a mut Document,
    section: Option<&'a str>,
    key: &'a str,
}

impl<'a> FieldSerializer<'a> {
    fn scalar(self, value: String) -> Result<()> {
        self.document.set_scalar(self.section, self.key, value)
    }

    fn record(self) -> Result<RecordSerializer<'a>> {
        if self.section.is_some() {
            return Err(Error::NestedSection {
                key: self.key.to_string(),
            });
        }
        let name = self.key.to_lowercase();
        log::trace!("marshaling record field '{}' into section [{}]", self.key, name);
        self.document.section_mut(&name);
        Ok(RecordSerializer::new(self.document, Some(name)))
    }

    fn array(self) -> ArraySerializer<'a> {
        ArraySerializer {
            document: self.document,
            section: self.section,
            key: self.key,
        }
    }
}

impl<'a> ser::Serializer for FieldSerializer<'a> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = ArraySerializer<'a>;
    type SerializeTuple = ArraySerializer<'a>;
    type SerializeTupleStruct = ArraySerializer<'a>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = MapSerializer<'a>;
    type SerializeStruct = RecordSerializer<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        let text = ser::Serializer::serialize_bool(ScalarSerializer, v)?;
        self.scalar(text)
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.scalar(v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        self.scalar(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.scalar(v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.scalar(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.scalar(v.to_string())
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.scalar(v.to_string())
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.scalar(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.scalar(v.to_string())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        for byte in v {
            self.document
                .append_array(self.section, self.key, byte.to_string())?;
        }
        Ok(())
    }

    fn serialize_none(self) -> Result<()> {
        self.scalar(String::new())
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Err(Error::unsupported_type("()"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.record().map(|_| ())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.scalar(variant.to_string())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type(&format!("{}::{}", name, variant)))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(self.array())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(self.array())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(self.array())
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type(&format!("{}::{}", name, variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        // Derived impls with `#[serde(flatten)]` are the maps of unknown length.
        match len {
            None => Ok(MapSerializer::Record(self.record()?)),
            Some(_) => Ok(MapSerializer::Entries(EntrySerializer {
                document: self.document,
                section: self.section,
                key: self.key,
                current_key: None,
            })),
        }
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.record()
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type(&format!("{}::{}", name, variant)))
    }
}

/// Appends each element of a sequence field as `key[]=value`.
pub struct ArraySerializer<'a> {
    document: &'a mut Document,
    section: Option<&'a str>,
    key: &'a str,
}

impl<'a> ArraySerializer<'a> {
    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let text = value.serialize(ScalarSerializer)?;
        self.document.append_array(self.section, self.key, text)
    }
}

impl<'a> ser::SerializeSeq for ArraySerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a> ser::SerializeTuple for ArraySerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a> ser::SerializeTupleStruct for ArraySerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// A map-shaped field: either a flattened record or an associative container.
pub enum MapSerializer<'a> {
    Record(RecordSerializer<'a>),
    Entries(EntrySerializer<'a>),
}

impl<'a> ser::SerializeMap for MapSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match self {
            MapSerializer::Record(record) => ser::SerializeMap::serialize_key(record, key),
            MapSerializer::Entries(entries) => entries.serialize_key(key),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match self {
            MapSerializer::Record(record) => ser::SerializeMap::serialize_value(record, value),
            MapSerializer::Entries(entries) => entries.serialize_value(value),
        }
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Writes each entry of an associative container as `key[inner]=value`.
pub struct EntrySerializer<'a> {
    document: &'a mut Document,
    section: Option<&'a str>,
    key: &'a str,
    current_key: Option<String>,
}

impl<'a> EntrySerializer<'a> {
    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(key.serialize(ScalarSerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let map_key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        if !is_map_key(&map_key) {
            return Err(Error::InvalidMapKey {
                key: self.key.to_string(),
                map_key,
            });
        }
        let text = value.serialize(ScalarSerializer)?;
        self.document
            .set_map_entry(self.section, self.key, &map_key, text)
    }
}

/// Converts a scalar-shaped value to its text form.
struct ScalarSerializer;

impl ser::Serializer for ScalarSerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    fn serialize_bool(self, v: bool) -> Result<String> {
        Ok(if v { "1" } else { "0" }.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_f64(self, v: f64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(Error::unsupported_type("bytes as a scalar value"))
    }

    fn serialize_none(self) -> Result<String> {
        Ok(String::new())
    }

    fn serialize_some<T>(self, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String> {
        Err(Error::unsupported_type("() as a scalar value"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<String> {
        Err(unsupported_scalar(name))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(unsupported_scalar(&format!("{}::{}", name, variant)))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(unsupported_scalar("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(unsupported_scalar("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(unsupported_scalar(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(unsupported_scalar(&format!("{}::{}", name, variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(unsupported_scalar("map"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(unsupported_scalar(name))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(unsupported_scalar(&format!("{}::{}", name, variant)))
    }
}

fn unsupported_scalar(kind: &str) -> Error {
    Error::unsupported_type(&format!("'{}' as a scalar value", kind))
}
