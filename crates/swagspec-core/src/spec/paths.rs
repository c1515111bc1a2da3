//! Paths collection and path items.

use std::collections::BTreeMap;

use serde::ser::SerializeMap as _;
use serde_json::Value;

use super::{Extensions, Operation, Parameter, is_extension_key};
use crate::{
    codec::{
        encode::write_extensions,
        general::{self, FromJson, kind_name},
        optimized::{Kind, ReadJson, Reader},
    },
    error::{Error, Result},
    object_macros::extensible_object,
};

/// Holds the relative paths to the individual endpoints.
///
/// A collection keyed by path templates, which must start with `/`, and extensible
/// with `x-` keys. Paths are encoded first, in lexical order, followed by the
/// extensions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paths {
    /// Vendor extensions, encoded after the paths.
    pub extensions: Extensions,
    /// Path items by path template.
    pub paths: BTreeMap<String, PathItem>,
}

impl Paths {
    /// Creates an empty paths collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path item, returning the collection.
    ///
    /// Fails with [`Error::InvalidExtensionKey`] if `path` does not start with `/`.
    pub fn path(mut self, path: impl Into<String>, item: PathItem) -> Result<Self> {
        let path = path.into();
        if !is_path_key(&path) {
            return Err(Error::invalid_extension_key(path));
        }
        self.paths.insert(path, item);
        Ok(self)
    }

    /// Returns the path item registered under `path`.
    pub fn get(&self, path: &str) -> Option<&PathItem> {
        self.paths.get(path)
    }
}

/// Returns `true` if `key` is a path template key.
pub fn is_path_key(key: &str) -> bool {
    key.starts_with('/')
}

impl serde::Serialize for Paths {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.paths.len() + self.extensions.len()))?;
        for (path, item) in &self.paths {
            map.serialize_entry(path, item)?;
        }
        write_extensions(&mut map, &self.extensions)?;
        map.end()
    }
}

impl<'de> serde::Deserialize<'de> for Paths {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        general::deserialize(deserializer)
    }
}

impl FromJson for Paths {
    fn from_json(value: Value) -> Result<Self> {
        let entries = match value {
            Value::Object(entries) => entries,
            other => return Err(Error::not_an_object(kind_name(&other))),
        };

        let mut paths = Paths::default();
        for (key, value) in entries {
            if is_path_key(&key) {
                let item = PathItem::from_json(value).map_err(|err| err.within(&key))?;
                paths.paths.insert(key, item);
            } else if is_extension_key(&key) {
                paths.extensions.insert_decoded(key, value);
            } else {
                return Err(Error::invalid_extension_key(key));
            }
        }
        Ok(paths)
    }
}

impl ReadJson for Paths {
    fn read_json(reader: &mut Reader<'_>) -> Result<Self> {
        let kind = reader.peek_kind()?;
        if kind != Kind::Object {
            return Err(Error::not_an_object(kind.name()));
        }

        let mut paths = Paths::default();
        reader.begin_object()?;
        while let Some(key) = reader.next_key()? {
            if paths.paths.contains_key(key.as_ref()) || paths.extensions.contains_key(&key) {
                return Err(Error::DuplicateKey {
                    key: key.into_owned(),
                });
            }
            if is_path_key(&key) {
                let item = PathItem::read_json(reader).map_err(|err| err.within(&key))?;
                paths.paths.insert(key.into_owned(), item);
            } else if is_extension_key(&key) {
                let value = reader.read_value()?;
                paths.extensions.insert_decoded(key.into_owned(), value);
            } else {
                return Err(Error::invalid_extension_key(key));
            }
        }
        Ok(paths)
    }
}

extensible_object! {
    /// Describes the operations available on a single path.
    ///
    /// A path item may be empty, due to ACL constraints. The path itself is still
    /// exposed to the documentation viewer but they will not know which operations
    /// and parameters are available.
    pub struct PathItem: Refable;

    /// Declared fields of a [`PathItem`].
    pub struct PathItemProps {
        "get" => get: Option<Operation>,
        "put" => put: Option<Operation>,
        "post" => post: Option<Operation>,
        "delete" => delete: Option<Operation>,
        "options" => options: Option<Operation>,
        "head" => head: Option<Operation>,
        "patch" => patch: Option<Operation>,
        /// Parameters applicable to all the operations described under this path.
        "parameters" => parameters: Vec<Parameter>,
    }
}

impl PathItem {
    /// Creates an empty path item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the GET operation.
    pub fn get(mut self, operation: Operation) -> Self {
        self.props.get = Some(operation);
        self
    }

    /// Sets the PUT operation.
    pub fn put(mut self, operation: Operation) -> Self {
        self.props.put = Some(operation);
        self
    }

    /// Sets the POST operation.
    pub fn post(mut self, operation: Operation) -> Self {
        self.props.post = Some(operation);
        self
    }

    /// Sets the DELETE operation.
    pub fn delete(mut self, operation: Operation) -> Self {
        self.props.delete = Some(operation);
        self
    }

    /// Sets the path-wide parameters.
    pub fn parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.props.parameters = parameters;
        self
    }

    /// Iterates over the operations set on this path, keyed by lowercase HTTP method.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> {
        let props = &self.props;
        [
            ("get", &props.get),
            ("put", &props.put),
            ("post", &props.post),
            ("delete", &props.delete),
            ("options", &props.options),
            ("head", &props.head),
            ("patch", &props.patch),
        ]
        .into_iter()
        .filter_map(|(method, operation)| operation.as_ref().map(|op| (method, op)))
    }
}
