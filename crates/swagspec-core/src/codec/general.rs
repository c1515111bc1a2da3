//! General decode path.
//!
//! Decoding runs in two passes. The input is first parsed with `serde_json` into a
//! value tree, rejecting duplicate keys and excessive nesting along the way. A single
//! generic driver then walks the tree for any [`Extensible`] type, using only the
//! metadata its property group declares: the known keys and a per-key field decoder.

use std::{cell::RefCell, collections::BTreeMap, fmt};

use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};

use crate::{
    error::{Error, Result},
    object::{Extensible, KeyClass, PropertyGroup as _, classify_key},
    spec::{REF_KEY, Ref},
};

use super::MAX_DEPTH_CEILING;

/// Conversion from a parsed JSON value, with type checking against the declared type.
pub trait FromJson: Sized {
    fn from_json(value: Value) -> Result<Self>;
}

/// Decodes `input` into `T` through the general path.
pub fn decode<T: FromJson>(input: &[u8], max_depth: usize) -> Result<T> {
    let value = parse_strict(input, max_depth)?;
    T::from_json(value)
}

/// Parses `input` into a value tree, rejecting duplicate keys and nesting deeper than
/// `max_depth` containers.
pub fn parse_strict(input: &[u8], max_depth: usize) -> Result<Value> {
    let fault = RefCell::new(None);
    let mut deserializer = serde_json::Deserializer::from_slice(input);
    let parsed = StrictSeed::root(max_depth, &fault)
        .deserialize(&mut deserializer)
        .and_then(|value| deserializer.end().map(|()| value));
    parsed.map_err(|err| fault.take().unwrap_or_else(|| Error::syntax(err)))
}

/// `serde::Deserialize` entry point shared by every specification type.
///
/// The incoming data is buffered with the same duplicate-key and depth checks as
/// [`parse_strict`] and then decoded with [`FromJson`].
pub(crate) fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: de::Deserializer<'de>,
    T: FromJson,
{
    let fault = RefCell::new(None);
    let value = StrictSeed::root(MAX_DEPTH_CEILING, &fault).deserialize(deserializer)?;
    T::from_json(value).map_err(de::Error::custom)
}

/// Decodes a JSON object into an extensible object of kind `T`.
pub(crate) fn decode_object<T: Extensible>(value: Value) -> Result<T> {
    let entries = match value {
        Value::Object(entries) => entries,
        other => return Err(Error::not_an_object(kind_name(&other))),
    };

    let mut object = T::default();
    if T::REFABLE && entries.contains_key(REF_KEY) {
        for (key, value) in entries {
            match classify_key::<T>(&key) {
                KeyClass::Reference => {
                    let reference = decode_reference(value).map_err(|err| err.within(REF_KEY))?;
                    if let Some(slot) = object.reference_slot() {
                        *slot = Some(reference);
                    }
                }
                KeyClass::Extension => object.extensions_mut().insert_decoded(key, value),
                KeyClass::Known(_) | KeyClass::Unknown => {
                    tracing::trace!(key = %key, "sibling of `$ref` ignored");
                }
            }
        }
        return Ok(object);
    }

    for (key, value) in entries {
        match classify_key::<T>(&key) {
            KeyClass::Known(_) => object.props_mut().decode_field(&key, value)?,
            KeyClass::Extension => object.extensions_mut().insert_decoded(key, value),
            KeyClass::Reference | KeyClass::Unknown => {
                return Err(Error::invalid_extension_key(key));
            }
        }
    }
    Ok(object)
}

fn decode_reference(value: Value) -> Result<Ref> {
    Ref::new(String::from_json(value)?)
}

/// JSON type name of a value, as reported in type mismatch errors.
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl FromJson for Value {
    fn from_json(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl FromJson for String {
    fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(Error::type_mismatch("string", kind_name(&other))),
        }
    }
}

impl FromJson for bool {
    fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(Error::type_mismatch("boolean", kind_name(&other))),
        }
    }
}

impl FromJson for f64 {
    fn from_json(value: Value) -> Result<Self> {
        match &value {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| Error::type_mismatch("number", "number")),
            other => Err(Error::type_mismatch("number", kind_name(other))),
        }
    }
}

impl FromJson for i64 {
    fn from_json(value: Value) -> Result<Self> {
        match &value {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| Error::type_mismatch("integer", "number")),
            other => Err(Error::type_mismatch("integer", kind_name(other))),
        }
    }
}

impl<T: FromJson> FromJson for Option<T> {
    fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_json(other).map(Some),
        }
    }
}

impl<T: FromJson> FromJson for Box<T> {
    fn from_json(value: Value) -> Result<Self> {
        T::from_json(value).map(Box::new)
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| T::from_json(item).map_err(|err| err.within(idx)))
                .collect(),
            other => Err(Error::type_mismatch("array", kind_name(&other))),
        }
    }
}

impl<T: FromJson> FromJson for BTreeMap<String, T> {
    fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(entries) => entries
                .into_iter()
                .map(|(key, item)| match T::from_json(item) {
                    Ok(item) => Ok((key, item)),
                    Err(err) => Err(err.within(key)),
                })
                .collect(),
            other => Err(Error::type_mismatch("object", kind_name(&other))),
        }
    }
}

/// Seed building a [`Value`] while enforcing unique keys and the depth limit.
///
/// Errors have to travel through `serde`'s stringly error type, so the typed error is
/// parked in `fault` and recovered by the caller.
struct StrictSeed<'f> {
    depth: usize,
    max_depth: usize,
    fault: &'f RefCell<Option<Error>>,
}

impl<'f> StrictSeed<'f> {
    fn root(max_depth: usize, fault: &'f RefCell<Option<Error>>) -> Self {
        Self {
            depth: 0,
            max_depth,
            fault,
        }
    }

    fn child(&self) -> StrictSeed<'f> {
        StrictSeed {
            depth: self.depth + 1,
            max_depth: self.max_depth,
            fault: self.fault,
        }
    }

    fn fail<E: de::Error>(&self, error: Error) -> E {
        let err = E::custom(&error);
        *self.fault.borrow_mut() = Some(error);
        err
    }

    fn enter<E: de::Error>(&self) -> Result<(), E> {
        if self.depth + 1 > self.max_depth {
            return Err(self.fail(Error::DepthLimitExceeded {
                limit: self.max_depth,
            }));
        }
        Ok(())
    }
}

impl<'de> DeserializeSeed<'de> for StrictSeed<'_> {
    type Value = Value;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for StrictSeed<'_> {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Number::from_f64(v)
            .map(Value::Number)
            .ok_or_else(|| E::custom("non-finite number"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        self.enter::<A::Error>()?;
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element_seed(self.child())? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        self.enter::<A::Error>()?;
        let mut entries = Map::new();
        while let Some(key) = access.next_key::<String>()? {
            if entries.contains_key(&key) {
                return Err(self.fail(Error::DuplicateKey { key }));
            }
            let value = access.next_value_seed(self.child())?;
            entries.insert(key, value);
        }
        Ok(Value::Object(entries))
    }
}
