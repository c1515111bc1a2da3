//! Canonical encoding.
//!
//! Declared fields are written in declaration order, skipping values equal to their
//! absence sentinel, then extensions in lexical key order. An object holding a
//! reference writes `$ref` in place of its declared fields.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde_json::Value;

use crate::{
    object::{Extensible, PropertyGroup as _},
    spec::{Extensions, REF_KEY},
};

/// Values that are omitted from the output when they equal their zero value.
pub(crate) trait Absent {
    fn is_absent(&self) -> bool;
}

impl Absent for String {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl Absent for bool {
    fn is_absent(&self) -> bool {
        !*self
    }
}

impl Absent for Value {
    fn is_absent(&self) -> bool {
        self.is_null()
    }
}

impl<T> Absent for Option<T> {
    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

impl<T> Absent for Vec<T> {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Absent for BTreeMap<K, V> {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

/// Serializes an extensible object as one flat JSON object.
pub(crate) fn serialize_object<T, S>(object: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Extensible,
    S: serde::Serializer,
{
    let mut map = serializer.serialize_map(None)?;
    match object.reference() {
        Some(reference) => map.serialize_entry(REF_KEY, reference.uri())?,
        None => object.props().write_fields(&mut map)?,
    }
    write_extensions(&mut map, object.extensions())?;
    map.end()
}

/// Writes the extension entries of an object, sorted by key.
pub(crate) fn write_extensions<M: SerializeMap>(
    map: &mut M,
    extensions: &Extensions,
) -> Result<(), M::Error> {
    for (key, value) in extensions {
        map.serialize_entry(key, value)?;
    }
    Ok(())
}
