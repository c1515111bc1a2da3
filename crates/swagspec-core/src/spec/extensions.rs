//! Extension support for specification objects.
//!
//! Extensions allow vendor-specific properties (`x-something`) to be attached to any
//! extensible object. They are encoded after the declared fields, sorted by key.

use std::collections::{BTreeMap, btree_map};

use serde_json::Value;

use crate::error::{Error, Result};

/// Prefix every extension key must carry.
pub const EXTENSION_PREFIX: &str = "x-";

/// Returns `true` if `key` carries the extension prefix.
pub fn is_extension_key(key: &str) -> bool {
    key.starts_with(EXTENSION_PREFIX)
}

/// A map of extension properties.
///
/// Keys must start with `x-`; values can be any JSON value. Iteration is always in
/// lexical key order, independent of insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extensions(BTreeMap<String, Value>);

impl Extensions {
    /// Creates an empty extension map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an extension, returning the previous value under the same key.
    ///
    /// Fails with [`Error::InvalidExtensionKey`] if the key lacks the `x-` prefix.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        let key = key.into();
        if !is_extension_key(&key) {
            return Err(Error::invalid_extension_key(key));
        }
        Ok(self.0.insert(key, value.into()))
    }

    /// Inserts an extension and returns the map, for chained construction.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Inserts a key the decoder already classified as an extension.
    pub(crate) fn insert_decoded(&mut self, key: String, value: Value) {
        debug_assert!(is_extension_key(&key));
        self.0.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the extension as a string, if present and a string.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Returns the extension as a boolean, if present and a boolean.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Returns the extension as a list of strings.
    ///
    /// `None` if the extension is missing, not an array, or holds a non-string item.
    pub fn get_string_slice(&self, key: &str) -> Option<Vec<&str>> {
        self.0
            .get(key)?
            .as_array()?
            .iter()
            .map(Value::as_str)
            .collect()
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the extensions in lexical key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a Extensions {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
