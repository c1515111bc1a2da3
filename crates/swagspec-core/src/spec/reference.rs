//! JSON Reference (`$ref`) values.

use std::{fmt, str::FromStr};

use serde::ser::SerializeMap as _;

use crate::error::{Error, Result};

/// Key under which a reference is encoded.
pub const REF_KEY: &str = "$ref";

/// A pointer to another part of this document or to an external document.
///
/// A reference always holds a non-empty URI. When set on an object, it replaces the
/// object's declared fields on the wire: only `$ref` and the extensions are encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ref {
    uri: String,
}

impl Ref {
    /// Creates a reference to the given URI.
    ///
    /// Fails with [`Error::EmptyReference`] if the URI is empty.
    pub fn new(uri: impl Into<String>) -> Result<Self> {
        let uri = uri.into();
        if uri.is_empty() {
            return Err(Error::EmptyReference);
        }
        Ok(Self { uri })
    }

    /// Creates a local reference to an entry of the document's `definitions`.
    pub fn definition(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::EmptyReference);
        }
        Self::new(format!("#/definitions/{name}"))
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns `true` if the reference points inside the current document.
    pub fn is_local(&self) -> bool {
        self.uri.starts_with('#')
    }

    pub fn into_uri(self) -> String {
        self.uri
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

impl FromStr for Ref {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Ref {
    type Error = Error;

    fn try_from(uri: String) -> Result<Self> {
        Self::new(uri)
    }
}

impl TryFrom<&str> for Ref {
    type Error = Error;

    fn try_from(uri: &str) -> Result<Self> {
        Self::new(uri)
    }
}

impl serde::Serialize for Ref {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(REF_KEY, &self.uri)?;
        map.end()
    }
}

impl<'de> serde::Deserialize<'de> for Ref {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct RefObject {
            #[serde(rename = "$ref")]
            uri: String,
        }

        let RefObject { uri } = RefObject::deserialize(deserializer)?;
        Self::new(uri).map_err(serde::de::Error::custom)
    }
}
