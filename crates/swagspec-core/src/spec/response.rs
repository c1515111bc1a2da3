//! Response and responses entities.

use std::collections::BTreeMap;

use serde::ser::SerializeMap as _;
use serde_json::Value;

use super::{Extensions, Header, Schema, is_extension_key};
use crate::{
    codec::{
        encode::write_extensions,
        general::{self, FromJson, kind_name},
        optimized::{Kind, ReadJson, Reader},
    },
    error::{Error, Result},
    object_macros::extensible_object,
};

/// Key of the catch-all response.
pub const DEFAULT_RESPONSE_KEY: &str = "default";

extensible_object! {
    /// Describes a single response from an API operation.
    pub struct Response: Refable;

    /// Declared fields of a [`Response`].
    pub struct ResponseProps {
        /// A short description of the response. Always encoded.
        "description" [always] => description: String,
        /// A definition of the response structure.
        "schema" => schema: Option<Box<Schema>>,
        /// Headers sent with the response, by name.
        "headers" => headers: BTreeMap<String, Header>,
        /// Example response bodies by MIME type.
        "examples" => examples: BTreeMap<String, Value>,
    }
}

impl Response {
    /// Creates a response with the given description.
    pub fn new(description: impl Into<String>) -> Self {
        let mut response = Self::default();
        response.props.description = description.into();
        response
    }

    /// Sets the response schema.
    pub fn schema(mut self, schema: Schema) -> Self {
        self.props.schema = Some(Box::new(schema));
        self
    }

    /// Adds a response header.
    pub fn header(mut self, name: impl Into<String>, header: Header) -> Self {
        self.props.headers.insert(name.into(), header);
        self
    }

    /// Adds an example body for `mime_type`.
    pub fn example(mut self, mime_type: impl Into<String>, example: impl Into<Value>) -> Self {
        self.props.examples.insert(mime_type.into(), example.into());
        self
    }
}

/// The possible responses of an operation, by HTTP status code.
///
/// Encoded as `default` first, then the status codes in ascending order, then the
/// extensions. A status code key must be the canonical decimal form of the code.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Responses {
    /// Vendor extensions, encoded after the responses.
    pub extensions: Extensions,
    /// The response for codes not covered individually.
    pub default: Option<Response>,
    /// Responses by HTTP status code.
    pub status_codes: BTreeMap<u16, Response>,
}

impl Responses {
    /// Creates an empty responses collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default response.
    pub fn default_response(mut self, response: Response) -> Self {
        self.default = Some(response);
        self
    }

    /// Sets the response for `code`.
    pub fn status(mut self, code: u16, response: Response) -> Self {
        self.status_codes.insert(code, response);
        self
    }
}

/// Parses a status code key, accepting only its canonical decimal form.
fn parse_status_code(key: &str) -> Option<u16> {
    key.parse::<u16>()
        .ok()
        .filter(|code| code.to_string() == key)
}

#[derive(Clone, Copy)]
enum ResponseKey {
    Default,
    Status(u16),
    Extension,
}

fn classify_response_key(key: &str) -> Result<ResponseKey> {
    if key == DEFAULT_RESPONSE_KEY {
        Ok(ResponseKey::Default)
    } else if is_extension_key(key) {
        Ok(ResponseKey::Extension)
    } else {
        parse_status_code(key)
            .map(ResponseKey::Status)
            .ok_or_else(|| Error::invalid_extension_key(key))
    }
}

impl serde::Serialize for Responses {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(default) = &self.default {
            map.serialize_entry(DEFAULT_RESPONSE_KEY, default)?;
        }
        for (code, response) in &self.status_codes {
            map.serialize_entry(&code.to_string(), response)?;
        }
        write_extensions(&mut map, &self.extensions)?;
        map.end()
    }
}

impl<'de> serde::Deserialize<'de> for Responses {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        general::deserialize(deserializer)
    }
}

impl FromJson for Responses {
    fn from_json(value: Value) -> Result<Self> {
        let entries = match value {
            Value::Object(entries) => entries,
            other => return Err(Error::not_an_object(kind_name(&other))),
        };

        let mut responses = Responses::default();
        for (key, value) in entries {
            match classify_response_key(&key)? {
                ResponseKey::Default => {
                    let response = Response::from_json(value).map_err(|err| err.within(&key))?;
                    responses.default = Some(response);
                }
                ResponseKey::Status(code) => {
                    let response = Response::from_json(value).map_err(|err| err.within(&key))?;
                    responses.status_codes.insert(code, response);
                }
                ResponseKey::Extension => responses.extensions.insert_decoded(key, value),
            }
        }
        Ok(responses)
    }
}

impl ReadJson for Responses {
    fn read_json(reader: &mut Reader<'_>) -> Result<Self> {
        let kind = reader.peek_kind()?;
        if kind != Kind::Object {
            return Err(Error::not_an_object(kind.name()));
        }

        let mut responses = Responses::default();
        reader.begin_object()?;
        while let Some(key) = reader.next_key()? {
            let class = classify_response_key(&key)?;
            let duplicate = match class {
                ResponseKey::Default => responses.default.is_some(),
                ResponseKey::Status(code) => responses.status_codes.contains_key(&code),
                ResponseKey::Extension => responses.extensions.contains_key(&key),
            };
            if duplicate {
                return Err(Error::DuplicateKey {
                    key: key.into_owned(),
                });
            }
            match class {
                ResponseKey::Default => {
                    let response = Response::read_json(reader).map_err(|err| err.within(&key))?;
                    responses.default = Some(response);
                }
                ResponseKey::Status(code) => {
                    let response = Response::read_json(reader).map_err(|err| err.within(&key))?;
                    responses.status_codes.insert(code, response);
                }
                ResponseKey::Extension => {
                    let value = reader.read_value()?;
                    responses
                        .extensions
                        .insert_decoded(key.into_owned(), value);
                }
            }
        }
        Ok(responses)
    }
}
