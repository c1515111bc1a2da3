//! Declaration macro for extensible specification objects.
//!
//! This module provides the macro that turns one field table into an extensible object
//! type, its property group and every codec implementation they need.

/// Declares an extensible object and its property group.
///
/// The macro creates:
/// 1. The property group struct with one public field per table row
/// 2. The object struct holding the properties, the extensions and, for refable
///    kinds, the optional reference
/// 3. [`PropertyGroup`](crate::object::PropertyGroup) and
///    [`Extensible`](crate::object::Extensible) implementations
/// 4. `serde` and codec implementations routed through the generic drivers
///
/// Rows read `"jsonKey" => field: Type`. A row marked `[always]` is encoded even when
/// its value is the absence sentinel.
///
/// # Example
///
/// ```ignore
/// extensible_object! {
///     /// A tag.
///     pub struct Tag;
///
///     /// Declared fields of a [`Tag`].
///     pub struct TagProps {
///         "name" [always] => name: String,
///         "description" => description: String,
///     }
/// }
/// ```
macro_rules! extensible_object {
    (
        $( #[$meta:meta] )*
        pub struct $name:ident;
        $( #[$props_meta:meta] )*
        pub struct $props:ident { $( $rows:tt )* }
    ) => {
        $( #[$meta] )*
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $name {
            /// Vendor extensions, encoded after the declared fields.
            pub extensions: $crate::spec::Extensions,
            /// Declared fields.
            pub props: $props,
        }

        impl $crate::object::Extensible for $name {
            type Props = $props;

            fn props(&self) -> &$props {
                &self.props
            }

            fn props_mut(&mut self) -> &mut $props {
                &mut self.props
            }

            fn extensions(&self) -> &$crate::spec::Extensions {
                &self.extensions
            }

            fn extensions_mut(&mut self) -> &mut $crate::spec::Extensions {
                &mut self.extensions
            }
        }

        extensible_object!(@common $name $( #[$props_meta] )* $props { $( $rows )* });
    };

    (
        $( #[$meta:meta] )*
        pub struct $name:ident: Refable;
        $( #[$props_meta:meta] )*
        pub struct $props:ident { $( $rows:tt )* }
    ) => {
        $( #[$meta] )*
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $name {
            /// When set, the object stands for the referenced one and `props` are
            /// neither encoded nor decoded.
            pub reference: Option<$crate::spec::Ref>,
            /// Vendor extensions, encoded after the declared fields.
            pub extensions: $crate::spec::Extensions,
            /// Declared fields.
            pub props: $props,
        }

        impl $name {
            /// Creates an object that stands for the referenced one.
            pub fn from_ref(reference: $crate::spec::Ref) -> Self {
                Self {
                    reference: Some(reference),
                    ..Self::default()
                }
            }
        }

        impl $crate::object::Extensible for $name {
            type Props = $props;

            const REFABLE: bool = true;

            fn props(&self) -> &$props {
                &self.props
            }

            fn props_mut(&mut self) -> &mut $props {
                &mut self.props
            }

            fn extensions(&self) -> &$crate::spec::Extensions {
                &self.extensions
            }

            fn extensions_mut(&mut self) -> &mut $crate::spec::Extensions {
                &mut self.extensions
            }

            fn reference(&self) -> Option<&$crate::spec::Ref> {
                self.reference.as_ref()
            }

            fn reference_slot(&mut self) -> Option<&mut Option<$crate::spec::Ref>> {
                Some(&mut self.reference)
            }
        }

        extensible_object!(@common $name $( #[$props_meta] )* $props { $( $rows )* });
    };

    (
        @common $name:ident
        $( #[$props_meta:meta] )*
        $props:ident {
            $(
                $( #[$field_meta:meta] )*
                $key:literal $( [$presence:ident] )? => $field:ident: $field_ty:ty
            ),* $(,)?
        }
    ) => {
        $( #[$props_meta] )*
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $props {
            $( $( #[$field_meta] )* pub $field: $field_ty, )*
        }

        impl $crate::object::PropertyGroup for $props {
            const KEYS: &'static [&'static str] = &[ $( $key ),* ];

            fn decode_field(
                &mut self,
                key: &str,
                value: ::serde_json::Value,
            ) -> $crate::error::Result<()> {
                match key {
                    $(
                        $key => {
                            self.$field =
                                <$field_ty as $crate::codec::general::FromJson>::from_json(value)
                                    .map_err(|err| err.within($key))?;
                        }
                    )*
                    _ => return Err($crate::error::Error::invalid_extension_key(key)),
                }
                Ok(())
            }

            fn read_field(
                &mut self,
                key: &str,
                reader: &mut $crate::codec::optimized::Reader<'_>,
            ) -> $crate::error::Result<()> {
                match key {
                    $(
                        $key => {
                            self.$field =
                                <$field_ty as $crate::codec::optimized::ReadJson>::read_json(reader)
                                    .map_err(|err| err.within($key))?;
                        }
                    )*
                    _ => return Err($crate::error::Error::invalid_extension_key(key)),
                }
                Ok(())
            }

            fn write_fields<M: ::serde::ser::SerializeMap>(
                &self,
                map: &mut M,
            ) -> ::std::result::Result<(), M::Error> {
                $(
                    if extensible_object!(@always $( $presence )?)
                        || !$crate::codec::encode::Absent::is_absent(&self.$field)
                    {
                        map.serialize_entry($key, &self.$field)?;
                    }
                )*
                Ok(())
            }
        }

        const _: () = assert!(
            <$props as $crate::object::PropertyGroup>::KEYS.len()
                <= $crate::codec::optimized::FIELD_SET_CAPACITY,
            "too many declared fields for the optimized decoder"
        );

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                $crate::codec::encode::serialize_object(self, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                $crate::codec::general::deserialize(deserializer)
            }
        }

        impl $crate::codec::general::FromJson for $name {
            fn from_json(value: ::serde_json::Value) -> $crate::error::Result<Self> {
                $crate::codec::general::decode_object(value)
            }
        }

        impl $crate::codec::optimized::ReadJson for $name {
            fn read_json(
                reader: &mut $crate::codec::optimized::Reader<'_>,
            ) -> $crate::error::Result<Self> {
                $crate::codec::optimized::read_object(reader)
            }
        }
    };

    (@always always) => {
        true
    };

    (@always) => {
        false
    };
}

pub(crate) use extensible_object;
