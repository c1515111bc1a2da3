//! ToSchema trait for types that can be converted to Swagger schemas.
//!
//! Definitions are registered in a document under a canonical name. A type may declare
//! its own name through [`ToSchema::model_name`]; otherwise the name is derived from
//! its module path, see [`canonical_type_name`].

use crate::spec::Schema;

/// Trait for types that describe themselves as a Swagger schema.
///
/// # Examples
///
/// ```
/// use swagspec_core::{Schema, ToSchema};
///
/// struct Pet;
///
/// impl ToSchema for Pet {
///     fn schema() -> Schema {
///         Schema::object().property("name", String::schema()).required("name")
///     }
///
///     fn model_name() -> Option<String> {
///         Some("io.example.Pet".to_owned())
///     }
/// }
///
/// assert_eq!(Pet::schema_name(), "io.example.Pet");
/// ```
pub trait ToSchema {
    /// Get the schema for this type.
    fn schema() -> Schema;

    /// A model name declared by the type itself, overriding the derived one.
    fn model_name() -> Option<String> {
        None
    }

    /// Get the canonical definition name for this type.
    ///
    /// The name is used as the key in the document's `definitions` and in references
    /// to it.
    fn schema_name() -> String {
        Self::model_name().unwrap_or_else(canonical_type_name::<Self>)
    }
}

/// Namespace-qualified name of `T`: its module path with `::` replaced by `.`.
///
/// ```
/// mod pets {
///     pub struct Dog;
/// }
///
/// let name = swagspec_core::canonical_type_name::<pets::Dog>();
/// assert!(name.ends_with(".pets.Dog"));
/// ```
pub fn canonical_type_name<T: ?Sized>() -> String {
    std::any::type_name::<T>().replace("::", ".")
}

macro_rules! impl_primitive_schema {
    ($( $ty:ty => $type_name:literal $(, $format:literal )? );* $(;)?) => {
        $(
            impl ToSchema for $ty {
                fn schema() -> Schema {
                    Schema::of_type($type_name) $( .format($format) )?
                }

                fn schema_name() -> String {
                    stringify!($ty).to_owned()
                }
            }
        )*
    };
}

// Only 32 and 64 bit numbers carry a format in Swagger 2.0
impl_primitive_schema! {
    i8 => "integer";
    i16 => "integer";
    i32 => "integer", "int32";
    i64 => "integer", "int64";
    u8 => "integer";
    u16 => "integer";
    u32 => "integer", "int32";
    u64 => "integer", "int64";
    f32 => "number", "float";
    f64 => "number", "double";
    bool => "boolean";
    str => "string";
    String => "string";
}

impl<T: ToSchema> ToSchema for Option<T> {
    fn schema() -> Schema {
        T::schema()
    }

    fn schema_name() -> String {
        T::schema_name()
    }
}

impl<T: ToSchema> ToSchema for Vec<T> {
    fn schema() -> Schema {
        Schema::array(T::schema())
    }
}
