//! Extensible objects: a typed property group flattened together with an extension map.
//!
//! Every specification object kind is declared once with the
//! [`extensible_object!`](crate::object_macros) macro. From that single declaration the
//! macro derives the metadata the general decoder walks (`KEYS`, `decode_field`), the
//! specialised streaming code used by the optimized decoder (`read_field`) and the
//! canonical encoder (`write_fields`). Both decoders therefore classify keys with
//! [`classify_key`] and dispatch to the same set of fields.

use serde::ser::SerializeMap;
use serde_json::Value;

use crate::{
    codec::optimized::Reader,
    error::{Error, Result},
    spec::{Extensions, REF_KEY, Ref, is_extension_key},
};

/// The statically-typed half of an extensible object.
pub trait PropertyGroup: Default {
    /// JSON keys of the declared fields, in encoding order.
    const KEYS: &'static [&'static str];

    /// Decodes a parsed JSON value into the field declared under `key`.
    fn decode_field(&mut self, key: &str, value: Value) -> Result<()>;

    /// Reads the field declared under `key` straight from the token stream.
    fn read_field(&mut self, key: &str, reader: &mut Reader<'_>) -> Result<()>;

    /// Writes every present field, in declaration order.
    fn write_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error>;

    /// Position of `key` in [`KEYS`](Self::KEYS), if it is a declared field.
    fn key_index(key: &str) -> Option<usize> {
        Self::KEYS.iter().position(|known| *known == key)
    }

    fn is_known(key: &str) -> bool {
        Self::key_index(key).is_some()
    }
}

/// A specification object: typed properties plus vendor extensions, and for refable
/// kinds an optional [`Ref`] that shadows the properties.
pub trait Extensible: Default {
    type Props: PropertyGroup;

    /// Whether a `$ref` key turns this object into a reference.
    const REFABLE: bool = false;

    fn props(&self) -> &Self::Props;
    fn props_mut(&mut self) -> &mut Self::Props;
    fn extensions(&self) -> &Extensions;
    fn extensions_mut(&mut self) -> &mut Extensions;

    fn reference(&self) -> Option<&Ref> {
        None
    }

    /// Storage for the reference; `None` for kinds that cannot be references.
    fn reference_slot(&mut self) -> Option<&mut Option<Ref>> {
        None
    }

    /// Adds an extension after checking the key against this object's known fields.
    fn add_extension(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        let key = key.into();
        if Self::Props::is_known(&key) || (Self::REFABLE && key == REF_KEY) {
            return Err(Error::ExtensionCollision { key });
        }
        self.extensions_mut().insert(key, value)
    }

    /// Builder flavour of [`add_extension`](Self::add_extension).
    fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        self.add_extension(key, value)?;
        Ok(self)
    }
}

/// How a key of an incoming JSON object is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyClass {
    /// A declared field, with its position in the property group.
    Known(usize),
    Reference,
    Extension,
    Unknown,
}

/// Routes `key` for an object of kind `T`.
///
/// Known fields win over everything else; no declared key carries the extension
/// prefix, so a key can never be both.
pub(crate) fn classify_key<T: Extensible>(key: &str) -> KeyClass {
    if let Some(idx) = T::Props::key_index(key) {
        KeyClass::Known(idx)
    } else if T::REFABLE && key == REF_KEY {
        KeyClass::Reference
    } else if is_extension_key(key) {
        KeyClass::Extension
    } else {
        KeyClass::Unknown
    }
}
