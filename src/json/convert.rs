//! Conversion of arbitrary Rust values into [`JsonValue`] trees.
//!
//! Any `T: Serialize` converts through [`to_json_value`]. The mapping is:
//!
//! | Rust value                         | JsonValue                              |
//! |------------------------------------|----------------------------------------|
//! | `()`, `None`, unit struct          | `Null`                                 |
//! | `bool`                             | `Bool`                                 |
//! | integers, floats                   | `Number` (integer or float kept)       |
//! | `char`, `&str`, `String`           | `String`                               |
//! | sequences, tuples, byte slices     | `Array`                                |
//! | maps with string keys              | `Object`, last duplicate key wins      |
//! | structs                            | `Object` of fields in declaration order|
//! | unit enum variants                 | `String` of the upper-cased tag name   |
//!
//! Maps with non-string keys fail with [`ConvertError::UnsupportedKeyType`];
//! enum variants carrying data fail with
//! [`ConvertError::UnsupportedValueShape`].

use super::value::{JsonMap, JsonNumber, JsonValue};
use crate::error::ConvertError;
use serde::ser::{self, Impossible, Serialize};

/// Convert any serializable value into a [`JsonValue`].
///
/// # Errors
///
/// Returns [`ConvertError`] when the value has no JSON representation.
pub fn to_json_value<T: Serialize + ?Sized>(value: &T) -> Result<JsonValue, ConvertError> {
    value.serialize(ValueSerializer)
}

impl Serialize for JsonValue {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Bool(b) => serializer.serialize_bool(*b),
            JsonValue::Number(JsonNumber::Int(n)) => serializer.serialize_i64(*n),
            JsonValue::Number(JsonNumber::UInt(n)) => serializer.serialize_u64(*n),
            JsonValue::Number(JsonNumber::Float(n)) => serializer.serialize_f64(*n),
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Array(items) => serializer.collect_seq(items),
            JsonValue::Object(fields) => serializer.collect_map(fields.iter()),
        }
    }
}

struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = JsonValue;
    type Error = ConvertError;

    type SerializeSeq = SerializeArray;
    type SerializeTuple = SerializeArray;
    type SerializeTupleStruct = SerializeArray;
    type SerializeTupleVariant = Impossible<JsonValue, ConvertError>;
    type SerializeMap = SerializeObject;
    type SerializeStruct = SerializeObject;
    type SerializeStructVariant = Impossible<JsonValue, ConvertError>;

    fn serialize_bool(self, v: bool) -> Result<JsonValue, ConvertError> {
        Ok(JsonValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<JsonValue, ConvertError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<JsonValue, ConvertError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<JsonValue, ConvertError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<JsonValue, ConvertError> {
        Ok(JsonValue::Number(JsonNumber::Int(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<JsonValue, ConvertError> {
        if let Ok(n) = i64::try_from(v) {
            self.serialize_i64(n)
        } else if let Ok(n) = u64::try_from(v) {
            self.serialize_u64(n)
        } else {
            Err(ConvertError::UnsupportedValueShape(format!(
                "integer {v} out of range"
            )))
        }
    }

    fn serialize_u8(self, v: u8) -> Result<JsonValue, ConvertError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<JsonValue, ConvertError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<JsonValue, ConvertError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<JsonValue, ConvertError> {
        Ok(JsonValue::Number(JsonNumber::from(v)))
    }

    fn serialize_u128(self, v: u128) -> Result<JsonValue, ConvertError> {
        u64::try_from(v).map_or_else(
            |_| {
                Err(ConvertError::UnsupportedValueShape(format!(
                    "integer {v} out of range"
                )))
            },
            |n| self.serialize_u64(n),
        )
    }

    fn serialize_f32(self, v: f32) -> Result<JsonValue, ConvertError> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<JsonValue, ConvertError> {
        Ok(JsonValue::Number(JsonNumber::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<JsonValue, ConvertError> {
        Ok(JsonValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<JsonValue, ConvertError> {
        Ok(JsonValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<JsonValue, ConvertError> {
        Ok(JsonValue::Array(
            v.iter().map(|b| JsonValue::from(i64::from(*b))).collect(),
        ))
    }

    fn serialize_none(self) -> Result<JsonValue, ConvertError> {
        Ok(JsonValue::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<JsonValue, ConvertError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<JsonValue, ConvertError> {
        Ok(JsonValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<JsonValue, ConvertError> {
        Ok(JsonValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<JsonValue, ConvertError> {
        Ok(JsonValue::String(variant.to_uppercase()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<JsonValue, ConvertError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<JsonValue, ConvertError> {
        Err(ConvertError::UnsupportedValueShape(format!(
            "enum variant {name}::{variant} carries data"
        )))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeArray, ConvertError> {
        Ok(SerializeArray {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeArray, ConvertError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeArray, ConvertError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, ConvertError> {
        Err(ConvertError::UnsupportedValueShape(format!(
            "enum variant {name}::{variant} carries data"
        )))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeObject, ConvertError> {
        Ok(SerializeObject {
            fields: JsonMap::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeObject, ConvertError> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, ConvertError> {
        Err(ConvertError::UnsupportedValueShape(format!(
            "enum variant {name}::{variant} carries data"
        )))
    }
}

struct SerializeArray {
    items: Vec<JsonValue>,
}

impl ser::SerializeSeq for SerializeArray {
    type Ok = JsonValue;
    type Error = ConvertError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ConvertError> {
        self.items.push(to_json_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<JsonValue, ConvertError> {
        Ok(JsonValue::Array(self.items))
    }
}

impl ser::SerializeTuple for SerializeArray {
    type Ok = JsonValue;
    type Error = ConvertError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ConvertError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<JsonValue, ConvertError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeArray {
    type Ok = JsonValue;
    type Error = ConvertError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ConvertError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<JsonValue, ConvertError> {
        ser::SerializeSeq::end(self)
    }
}

struct SerializeObject {
    fields: JsonMap,
    next_key: Option<String>,
}

impl ser::SerializeMap for SerializeObject {
    type Ok = JsonValue;
    type Error = ConvertError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), ConvertError> {
        self.next_key = Some(key.serialize(MapKeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ConvertError> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| ConvertError::Custom("map value without a key".to_string()))?;
        self.fields.insert(key, to_json_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<JsonValue, ConvertError> {
        Ok(JsonValue::Object(self.fields))
    }
}

impl ser::SerializeStruct for SerializeObject {
    type Ok = JsonValue;
    type Error = ConvertError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), ConvertError> {
        self.fields.insert(key, to_json_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<JsonValue, ConvertError> {
        Ok(JsonValue::Object(self.fields))
    }
}

/// Accepts only string-like keys.
struct MapKeySerializer;

fn key_error(kind: &str) -> ConvertError {
    ConvertError::UnsupportedKeyType(kind.to_string())
}

impl ser::Serializer for MapKeySerializer {
    type Ok = String;
    type Error = ConvertError;

    type SerializeSeq = Impossible<String, ConvertError>;
    type SerializeTuple = Impossible<String, ConvertError>;
    type SerializeTupleStruct = Impossible<String, ConvertError>;
    type SerializeTupleVariant = Impossible<String, ConvertError>;
    type SerializeMap = Impossible<String, ConvertError>;
    type SerializeStruct = Impossible<String, ConvertError>;
    type SerializeStructVariant = Impossible<String, ConvertError>;

    fn serialize_str(self, v: &str) -> Result<String, ConvertError> {
        Ok(v.to_string())
    }

    fn serialize_char(self, _v: char) -> Result<String, ConvertError> {
        Err(key_error("char"))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, ConvertError> {
        value.serialize(self)
    }

    fn serialize_bool(self, _v: bool) -> Result<String, ConvertError> {
        Err(key_error("bool"))
    }

    fn serialize_i8(self, _v: i8) -> Result<String, ConvertError> {
        Err(key_error("i8"))
    }

    fn serialize_i16(self, _v: i16) -> Result<String, ConvertError> {
        Err(key_error("i16"))
    }

    fn serialize_i32(self, _v: i32) -> Result<String, ConvertError> {
        Err(key_error("i32"))
    }

    fn serialize_i64(self, _v: i64) -> Result<String, ConvertError> {
        Err(key_error("i64"))
    }

    fn serialize_u8(self, _v: u8) -> Result<String, ConvertError> {
        Err(key_error("u8"))
    }

    fn serialize_u16(self, _v: u16) -> Result<String, ConvertError> {
        Err(key_error("u16"))
    }

    fn serialize_u32(self, _v: u32) -> Result<String, ConvertError> {
        Err(key_error("u32"))
    }

    fn serialize_u64(self, _v: u64) -> Result<String, ConvertError> {
        Err(key_error("u64"))
    }

    fn serialize_f32(self, _v: f32) -> Result<String, ConvertError> {
        Err(key_error("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<String, ConvertError> {
        Err(key_error("f64"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, ConvertError> {
        Err(key_error("bytes"))
    }

    fn serialize_none(self) -> Result<String, ConvertError> {
        Err(key_error("none"))
    }

    fn serialize_some<T: Serialize + ?Sized>(self, _value: &T) -> Result<String, ConvertError> {
        Err(key_error("option"))
    }

    fn serialize_unit(self) -> Result<String, ConvertError> {
        Err(key_error("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<String, ConvertError> {
        Err(key_error(name))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<String, ConvertError> {
        Err(key_error(name))
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, ConvertError> {
        Err(key_error(name))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, ConvertError> {
        Err(key_error("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, ConvertError> {
        Err(key_error("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, ConvertError> {
        Err(key_error(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, ConvertError> {
        Err(key_error(name))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, ConvertError> {
        Err(key_error("map"))
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, ConvertError> {
        Err(key_error(name))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, ConvertError> {
        Err(key_error(name))
    }
}
