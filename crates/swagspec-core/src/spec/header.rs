//! Header entity.

use serde_json::Value;

use super::Items;
use crate::object_macros::extensible_object;

extensible_object! {
    /// A header sent with a response.
    pub struct Header;

    /// Declared fields of a [`Header`].
    pub struct HeaderProps {
        "description" => description: String,
        /// The simple type of the header value.
        "type" => type_name: String,
        "format" => format: String,
        /// Describes the array items when `type` is `array`.
        "items" => items: Option<Items>,
        "collectionFormat" => collection_format: String,
        /// The default value; `null` means unset.
        "default" => default: Value,
        "maximum" => maximum: Option<f64>,
        "exclusiveMaximum" => exclusive_maximum: bool,
        "minimum" => minimum: Option<f64>,
        "exclusiveMinimum" => exclusive_minimum: bool,
        "maxLength" => max_length: Option<i64>,
        "minLength" => min_length: Option<i64>,
        "pattern" => pattern: String,
        "maxItems" => max_items: Option<i64>,
        "minItems" => min_items: Option<i64>,
        "uniqueItems" => unique_items: bool,
        "enum" => enum_values: Vec<Value>,
        "multipleOf" => multiple_of: Option<f64>,
        "example" => example: Value,
    }
}

impl Header {
    /// Creates a header of the given simple type.
    pub fn new(type_name: impl Into<String>) -> Self {
        let mut header = Self::default();
        header.props.type_name = type_name.into();
        header
    }

    /// Sets the format.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.props.format = format.into();
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.props.description = description.into();
        self
    }
}
