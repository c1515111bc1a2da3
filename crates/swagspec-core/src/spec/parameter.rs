//! Parameter entity.

use serde_json::Value;

use super::{Items, Schema};
use crate::object_macros::extensible_object;

/// Location of a parameter, as written in the `in` field.
pub mod location {
    pub const QUERY: &str = "query";
    pub const HEADER: &str = "header";
    pub const PATH: &str = "path";
    pub const FORM_DATA: &str = "formData";
    pub const BODY: &str = "body";
}

extensible_object! {
    /// Describes a single operation parameter.
    ///
    /// A unique parameter is defined by a combination of a name and location. Body
    /// parameters carry a `schema`, every other location uses the simple `type` and
    /// `format` pair.
    pub struct Parameter: Refable;

    /// Declared fields of a [`Parameter`].
    pub struct ParameterProps {
        "description" => description: String,
        /// The name of the parameter. Parameter names are case sensitive.
        "name" => name: String,
        /// The location of the parameter, see [`location`].
        "in" => location: String,
        /// Determines whether this parameter is mandatory.
        "required" => required: bool,
        /// The schema defining the type used for the body parameter.
        "schema" => schema: Option<Box<Schema>>,
        /// Sets the ability to pass empty-valued parameters.
        "allowEmptyValue" => allow_empty_value: bool,
        "type" => type_name: String,
        "format" => format: String,
        /// Describes the array items when `type` is `array`.
        "items" => items: Option<Items>,
        /// Determines the format of the array if type array is used.
        "collectionFormat" => collection_format: String,
        /// The value the server uses if none is provided; `null` means unset.
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

impl Parameter {
    /// Creates a parameter with the given name and location.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        let mut param = Self::default();
        param.props.name = name.into();
        param.props.location = location.into();
        param
    }

    /// Creates a query parameter.
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, location::QUERY)
    }

    /// Creates a header parameter.
    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name, location::HEADER)
    }

    /// Creates a required path parameter.
    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, location::PATH).required(true)
    }

    /// Creates a body parameter carrying `schema`.
    pub fn body(name: impl Into<String>, schema: Schema) -> Self {
        let mut param = Self::new(name, location::BODY);
        param.props.schema = Some(Box::new(schema));
        param
    }

    /// Sets whether the parameter is mandatory.
    pub fn required(mut self, required: bool) -> Self {
        self.props.required = required;
        self
    }

    /// Sets the simple type and format.
    pub fn typed(mut self, type_name: impl Into<String>, format: impl Into<String>) -> Self {
        self.props.type_name = type_name.into();
        self.props.format = format.into();
        self
    }

    /// Makes this an array parameter of `items`.
    pub fn items(mut self, items: Items, collection_format: impl Into<String>) -> Self {
        self.props.type_name = "array".to_owned();
        self.props.items = Some(items);
        self.props.collection_format = collection_format.into();
        self
    }

    /// Sets the allowed values.
    pub fn enum_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.props.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.props.description = description.into();
        self
    }
}
