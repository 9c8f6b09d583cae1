//! Fast path for mapping keys.
//!
//! Scalar keys, newtypes over them and fieldless enum variants map straight
//! to a [`Key`]. Everything else is refused with
//! [`ValueError::NotScalarKey`] so the caller can lower it as a full value
//! and wrap it in a composite key.

use crate::errors::ValueError;
use crate::value::{FloatKey, Key};
use serde::ser::{self, Impossible, Serialize};

pub(super) struct KeySerializer;

fn unsupported(found: &'static str) -> ValueError {
    ValueError::NotScalarKey { found }
}

impl ser::Serializer for KeySerializer {
    type Ok = Key;
    type Error = ValueError;

    type SerializeSeq = Impossible<Key, ValueError>;
    type SerializeTuple = Impossible<Key, ValueError>;
    type SerializeTupleStruct = Impossible<Key, ValueError>;
    type SerializeTupleVariant = Impossible<Key, ValueError>;
    type SerializeMap = Impossible<Key, ValueError>;
    type SerializeStruct = Impossible<Key, ValueError>;
    type SerializeStructVariant = Impossible<Key, ValueError>;

    fn serialize_bool(self, v: bool) -> Result<Key, ValueError> {
        Ok(Key::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Key, ValueError> {
        Ok(Key::Int(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Key, ValueError> {
        Ok(Key::Int(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Key, ValueError> {
        Ok(Key::Int(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Key, ValueError> {
        Ok(Key::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Key, ValueError> {
        Ok(Key::UInt(u64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Key, ValueError> {
        Ok(Key::UInt(u64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Key, ValueError> {
        Ok(Key::UInt(u64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Key, ValueError> {
        Ok(Key::UInt(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Key, ValueError> {
        Ok(Key::Float(FloatKey::new(f64::from(v))))
    }

    fn serialize_f64(self, v: f64) -> Result<Key, ValueError> {
        Ok(Key::Float(FloatKey::new(v)))
    }

    fn serialize_char(self, v: char) -> Result<Key, ValueError> {
        Ok(Key::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<Key, ValueError> {
        Ok(Key::Str(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Key, ValueError> {
        Ok(Key::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Key, ValueError> {
        Err(unsupported("option"))
    }

    fn serialize_some<T>(self, _value: &T) -> Result<Key, ValueError>
    where
        T: ?Sized + Serialize,
    {
        Err(unsupported("option"))
    }

    fn serialize_unit(self) -> Result<Key, ValueError> {
        Err(unsupported("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Key, ValueError> {
        Err(unsupported("unit struct"))
    }

    // Fieldless enum keys render as their variant name.
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Key, ValueError> {
        Ok(Key::Str(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Key, ValueError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Key, ValueError>
    where
        T: ?Sized + Serialize,
    {
        Err(unsupported("enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, ValueError> {
        Err(unsupported("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, ValueError> {
        Err(unsupported("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, ValueError> {
        Err(unsupported("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, ValueError> {
        Err(unsupported("enum variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, ValueError> {
        Err(unsupported("map"))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, ValueError> {
        Err(unsupported("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, ValueError> {
        Err(unsupported("enum variant"))
    }
}
