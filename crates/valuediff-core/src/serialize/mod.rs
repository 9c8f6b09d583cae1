//! Lowering native Rust values into [`Value`] through serde.
//!
//! | serde data model | Value |
//! |---|---|
//! | bool, integers, floats, char, str, bytes | `Scalar` |
//! | `()` | `Scalar::Null` |
//! | `None` / `Some(v)` | nil `Boxed` / `Boxed(v)` |
//! | seq (`Vec`, slices, sets) | `List` |
//! | tuple, `[T; N]` | `Array` |
//! | map | `Map`, keys as below |
//! | struct, tuple struct, newtype struct | `Record` named after the type |
//! | enum variant | `Record` named `Enum::Variant` |
//!
//! Tuple-like records number their fields `"0"`, `"1"`, and so on.
//!
//! Map keys that are scalars (including floats and bytes) become the
//! matching [`Key`]. Any other key is lowered like a value and kept as a
//! [`CompositeKey`](crate::value::CompositeKey), rendered as its path
//! segment.

mod key;

use crate::errors::{ExError, ValueError};
use crate::value::{Key, MapStorage, Record, Scalar, Value};
use key::KeySerializer;
use serde::ser::{self, Serialize};

/// Lower any serializable value.
///
/// # Errors
///
/// - `IntegerOverflow`: a 128-bit integer outside the 64-bit range
/// - `Serialization`: the value's `Serialize` impl failed
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, ExError> {
    value.serialize(ValueSerializer).map_err(ExError::from)
}

fn variant_name(name: &str, variant: &str) -> String {
    format!("{}::{}", name, variant)
}

/// Serializer whose output is a [`Value`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = ValueError;

    type SerializeSeq = SerializeList;
    type SerializeTuple = SerializeArray;
    type SerializeTupleStruct = SerializeRecord;
    type SerializeTupleVariant = SerializeRecord;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeRecord;
    type SerializeStructVariant = SerializeRecord;

    fn serialize_bool(self, v: bool) -> Result<Value, ValueError> {
        Ok(Value::from(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, ValueError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, ValueError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, ValueError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, ValueError> {
        Ok(Value::Scalar(Scalar::Int(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, ValueError> {
        i64::try_from(v)
            .map(|n| Value::Scalar(Scalar::Int(n)))
            .map_err(|_| ValueError::IntegerOverflow {
                value: v.to_string(),
            })
    }

    fn serialize_u8(self, v: u8) -> Result<Value, ValueError> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, ValueError> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, ValueError> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, ValueError> {
        Ok(Value::Scalar(Scalar::UInt(v)))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, ValueError> {
        u64::try_from(v)
            .map(|n| Value::Scalar(Scalar::UInt(n)))
            .map_err(|_| ValueError::IntegerOverflow {
                value: v.to_string(),
            })
    }

    fn serialize_f32(self, v: f32) -> Result<Value, ValueError> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, ValueError> {
        Ok(Value::Scalar(Scalar::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value, ValueError> {
        Ok(Value::from(v))
    }

    fn serialize_str(self, v: &str) -> Result<Value, ValueError> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, ValueError> {
        Ok(Value::Scalar(Scalar::Bytes(v.to_vec())))
    }

    fn serialize_none(self) -> Result<Value, ValueError> {
        Ok(Value::nil_boxed())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value, ValueError>
    where
        T: ?Sized + Serialize,
    {
        Ok(Value::boxed(value.serialize(self)?))
    }

    fn serialize_unit(self) -> Result<Value, ValueError> {
        Ok(Value::Scalar(Scalar::Null))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value, ValueError> {
        Ok(Value::from(Record::new(name)))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, ValueError> {
        Ok(Value::from(Record::new(variant_name(name, variant))))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value, ValueError>
    where
        T: ?Sized + Serialize,
    {
        Ok(Value::from(Record::new(name).field("0", value.serialize(self)?)))
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, ValueError>
    where
        T: ?Sized + Serialize,
    {
        let inner = value.serialize(self)?;
        Ok(Value::from(Record::new(variant_name(name, variant)).field("0", inner)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeList, ValueError> {
        Ok(SerializeList {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeArray, ValueError> {
        Ok(SerializeArray {
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<SerializeRecord, ValueError> {
        Ok(SerializeRecord::new(name.to_string()))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeRecord, ValueError> {
        Ok(SerializeRecord::new(variant_name(name, variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap, ValueError> {
        Ok(SerializeMap {
            entries: MapStorage::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<SerializeRecord, ValueError> {
        Ok(SerializeRecord::new(name.to_string()))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeRecord, ValueError> {
        Ok(SerializeRecord::new(variant_name(name, variant)))
    }
}

/// Builds a growable sequence
pub struct SerializeList {
    items: Vec<Value>,
}

impl ser::SerializeSeq for SerializeList {
    type Ok = Value;
    type Error = ValueError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), ValueError>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, ValueError> {
        Ok(Value::list(self.items))
    }
}

/// Builds a fixed-length sequence
pub struct SerializeArray {
    items: Vec<Value>,
}

impl ser::SerializeTuple for SerializeArray {
    type Ok = Value;
    type Error = ValueError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), ValueError>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, ValueError> {
        Ok(Value::Array(self.items))
    }
}

/// Builds a mapping
pub struct SerializeMap {
    entries: MapStorage,
    pending_key: Option<Key>,
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = ValueError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), ValueError>
    where
        T: ?Sized + Serialize,
    {
        let lowered = match key.serialize(KeySerializer) {
            Err(ValueError::NotScalarKey { .. }) => Key::from_value(key.serialize(ValueSerializer)?),
            other => other?,
        };
        self.pending_key = Some(lowered);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), ValueError>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .pending_key
            .take()
            .ok_or(ValueError::ValueWithoutKey)?;
        self.entries.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, ValueError> {
        Ok(Value::map(self.entries))
    }
}

/// Builds a record, for structs, tuple structs and enum variants
pub struct SerializeRecord {
    record: Record,
}

impl SerializeRecord {
    fn new(type_name: String) -> Self {
        Self {
            record: Record::new(type_name),
        }
    }

    fn push<T>(&mut self, name: String, value: &T) -> Result<(), ValueError>
    where
        T: ?Sized + Serialize,
    {
        let value = value.serialize(ValueSerializer)?;
        self.record.push_field(name, value, true);
        Ok(())
    }

    fn push_positional<T>(&mut self, value: &T) -> Result<(), ValueError>
    where
        T: ?Sized + Serialize,
    {
        let name = self.record.fields().len().to_string();
        self.push(name, value)
    }
}

impl ser::SerializeTupleStruct for SerializeRecord {
    type Ok = Value;
    type Error = ValueError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), ValueError>
    where
        T: ?Sized + Serialize,
    {
        self.push_positional(value)
    }

    fn end(self) -> Result<Value, ValueError> {
        Ok(Value::from(self.record))
    }
}

impl ser::SerializeTupleVariant for SerializeRecord {
    type Ok = Value;
    type Error = ValueError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), ValueError>
    where
        T: ?Sized + Serialize,
    {
        self.push_positional(value)
    }

    fn end(self) -> Result<Value, ValueError> {
        Ok(Value::from(self.record))
    }
}

impl ser::SerializeStruct for SerializeRecord {
    type Ok = Value;
    type Error = ValueError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), ValueError>
    where
        T: ?Sized + Serialize,
    {
        self.push(key.to_string(), value)
    }

    fn end(self) -> Result<Value, ValueError> {
        Ok(Value::from(self.record))
    }
}

impl ser::SerializeStructVariant for SerializeRecord {
    type Ok = Value;
    type Error = ValueError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), ValueError>
    where
        T: ?Sized + Serialize,
    {
        self.push(key.to_string(), value)
    }

    fn end(self) -> Result<Value, ValueError> {
        Ok(Value::from(self.record))
    }
}
