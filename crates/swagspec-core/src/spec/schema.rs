//! Schema entity.
//!
//! Schemas describe the data types used by parameters, responses and the document-wide
//! definitions. They nest through `items`, `properties` and the composition keywords.

use std::collections::BTreeMap;

use serde_json::Value;

use super::ExternalDocumentation;
use crate::{
    codec::{
        encode::Absent,
        general::{FromJson, kind_name},
        optimized::{Kind, ReadJson, Reader},
    },
    error::{Error, Result},
    object_macros::extensible_object,
};

extensible_object! {
    /// A data type definition, a subset of JSON Schema draft 4.
    ///
    /// A schema holding a reference stands for the referenced definition.
    pub struct Schema: Refable;

    /// Declared fields of a [`Schema`].
    pub struct SchemaProps {
        "id" => id: String,
        /// URI of the JSON Schema dialect.
        "$schema" => schema_uri: String,
        "description" => description: String,
        /// The JSON type, or a list of types.
        "type" => type_name: StringOrArray,
        /// The extending format for the type, e.g. `int64` or `date-time`.
        "format" => format: String,
        "title" => title: String,
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
        "multipleOf" => multiple_of: Option<f64>,
        "enum" => enum_values: Vec<Value>,
        "maxProperties" => max_properties: Option<i64>,
        "minProperties" => min_properties: Option<i64>,
        /// Names of the properties that must be present.
        "required" => required: Vec<String>,
        /// The schema of array items.
        "items" => items: Option<Box<Schema>>,
        /// Schemas the value must match all of.
        "allOf" => all_of: Vec<Schema>,
        "oneOf" => one_of: Vec<Schema>,
        "anyOf" => any_of: Vec<Schema>,
        "not" => not: Option<Box<Schema>>,
        /// Schemas of the object properties, by name.
        "properties" => properties: BTreeMap<String, Schema>,
        /// Whether, and how, properties not listed in `properties` are allowed.
        "additionalProperties" => additional_properties: Option<SchemaOrBool>,
        /// Schemas of the object properties, by name pattern.
        "patternProperties" => pattern_properties: BTreeMap<String, Schema>,
        "additionalItems" => additional_items: Option<SchemaOrBool>,
        /// Schemas local to this schema, by name.
        "definitions" => definitions: BTreeMap<String, Schema>,
        /// Name of the property used for polymorphism.
        "discriminator" => discriminator: String,
        "readOnly" => read_only: bool,
        /// XML representation of a property.
        "xml" => xml: Option<XmlObject>,
        "externalDocs" => external_docs: Option<ExternalDocumentation>,
        "example" => example: Value,
    }
}

extensible_object! {
    /// Metadata for the XML representation of a schema property.
    pub struct XmlObject;

    /// Declared fields of an [`XmlObject`].
    pub struct XmlObjectProps {
        /// Replaces the name of the element or attribute.
        "name" => name: String,
        "namespace" => namespace: String,
        "prefix" => prefix: String,
        /// Translates the property to an attribute instead of an element.
        "attribute" => attribute: bool,
        /// Wraps array items in an outer element.
        "wrapped" => wrapped: bool,
    }
}

impl Schema {
    /// Creates an empty schema, accepting any value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schema of the given JSON type.
    pub fn of_type(type_name: impl Into<String>) -> Self {
        let mut schema = Self::default();
        schema.props.type_name = StringOrArray::from(type_name.into());
        schema
    }

    /// Creates an `object` schema.
    pub fn object() -> Self {
        Self::of_type("object")
    }

    /// Creates an `array` schema of `items`.
    pub fn array(items: Schema) -> Self {
        let mut schema = Self::of_type("array");
        schema.props.items = Some(Box::new(items));
        schema
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

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.props.title = title.into();
        self
    }

    /// Adds a property schema.
    pub fn property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.props.properties.insert(name.into(), schema);
        self
    }

    /// Marks a property as required.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.props.required.push(name.into());
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

    /// Adds a schema the value must also match.
    pub fn all_of(mut self, schema: Schema) -> Self {
        self.props.all_of.push(schema);
        self
    }

    /// Sets the policy for properties not listed in `properties`.
    pub fn additional_properties(mut self, additional: impl Into<SchemaOrBool>) -> Self {
        self.props.additional_properties = Some(additional.into());
        self
    }

    /// Sets the inclusive bounds of a numeric value.
    pub fn range(mut self, minimum: f64, maximum: f64) -> Self {
        self.props.minimum = Some(minimum);
        self.props.maximum = Some(maximum);
        self
    }
}

/// Either a boolean switch or a schema, as used by `additionalProperties`.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaOrBool {
    /// `true` allows any value, `false` allows none.
    Allows(bool),
    /// Values must match the schema.
    Schema(Box<Schema>),
}

impl From<bool> for SchemaOrBool {
    fn from(allows: bool) -> Self {
        Self::Allows(allows)
    }
}

impl From<Schema> for SchemaOrBool {
    fn from(schema: Schema) -> Self {
        Self::Schema(Box::new(schema))
    }
}

impl serde::Serialize for SchemaOrBool {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Allows(allows) => serializer.serialize_bool(*allows),
            Self::Schema(schema) => serde::Serialize::serialize(schema, serializer),
        }
    }
}

impl FromJson for SchemaOrBool {
    fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Bool(allows) => Ok(Self::Allows(allows)),
            object @ Value::Object(_) => Schema::from_json(object).map(Self::from),
            other => Err(Error::type_mismatch("boolean or object", kind_name(&other))),
        }
    }
}

impl ReadJson for SchemaOrBool {
    fn read_json(reader: &mut Reader<'_>) -> Result<Self> {
        match reader.peek_kind()? {
            Kind::Bool => reader.read_bool().map(Self::Allows),
            Kind::Object => Schema::read_json(reader).map(Self::from),
            other => Err(Error::type_mismatch("boolean or object", other.name())),
        }
    }
}

/// A value that is either a single string or a list of strings.
///
/// Encoded as a plain string when it holds exactly one element, as an array otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StringOrArray(pub Vec<String>);

impl StringOrArray {
    /// Returns `true` if `value` is one of the held strings.
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|item| item == value)
    }

    /// Returns the single held string, if there is exactly one.
    pub fn as_single(&self) -> Option<&str> {
        match self.0.as_slice() {
            [single] => Some(single),
            _ => None,
        }
    }
}

impl From<String> for StringOrArray {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<&str> for StringOrArray {
    fn from(value: &str) -> Self {
        Self(vec![value.to_owned()])
    }
}

impl From<Vec<String>> for StringOrArray {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl Absent for StringOrArray {
    fn is_absent(&self) -> bool {
        self.0.is_empty()
    }
}

impl serde::Serialize for StringOrArray {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_single() {
            Some(single) => serializer.serialize_str(single),
            None => serde::Serialize::serialize(&self.0, serializer),
        }
    }
}

impl FromJson for StringOrArray {
    fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::String(single) => Ok(Self(vec![single])),
            array @ Value::Array(_) => Vec::from_json(array).map(Self),
            other => Err(Error::type_mismatch("string or array", kind_name(&other))),
        }
    }
}

impl ReadJson for StringOrArray {
    fn read_json(reader: &mut Reader<'_>) -> Result<Self> {
        match reader.peek_kind()? {
            Kind::String => String::read_json(reader).map(|single| Self(vec![single])),
            Kind::Array => Vec::read_json(reader).map(Self),
            other => Err(Error::type_mismatch("string or array", other.name())),
        }
    }
}
