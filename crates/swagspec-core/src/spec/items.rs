//! Items entity.

use serde_json::Value;

use crate::object_macros::extensible_object;

extensible_object! {
    /// Describes the type of the items of a non-body array parameter or header.
    ///
    /// Items use the simple type system of parameters rather than a full [`Schema`].
    ///
    /// [`Schema`]: super::Schema
    pub struct Items;

    /// Declared fields of an [`Items`] object.
    pub struct ItemsProps {
        /// The internal type of the array: `string`, `number`, `integer`, `boolean`
        /// or `array`.
        "type" => type_name: String,
        "format" => format: String,
        /// Describes the nested items when `type` is `array`.
        "items" => items: Option<Box<Items>>,
        /// Determines the format of the array, e.g. `csv` or `pipes`.
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

impl Items {
    /// Creates items of the given simple type.
    pub fn new(type_name: impl Into<String>) -> Self {
        let mut items = Self::default();
        items.props.type_name = type_name.into();
        items
    }

    /// Sets the format.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.props.format = format.into();
        self
    }

    /// Creates array items whose elements are `items`.
    pub fn array(items: Items, collection_format: impl Into<String>) -> Self {
        let mut outer = Self::new("array");
        outer.props.items = Some(Box::new(items));
        outer.props.collection_format = collection_format.into();
        outer
    }
}
