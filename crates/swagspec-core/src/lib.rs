//! # swagspec-core
//!
//! Core types and the JSON codec for swagspec - Swagger 2.0 specification support.
//!
//! This crate provides a strongly-typed object model of a Swagger 2.0 document in which
//! every object carries, next to its declared fields, an open map of `x-` vendor
//! extensions. The [`codec`] encodes documents in a canonical, byte-stable form and
//! decodes them with one of two interchangeable implementations.
//!
//! ```
//! use swagspec_core::{DecodeOptions, DecodeStrategy, Swagger, codec};
//!
//! let input = br#"{"swagger":"2.0","x-framework":"go-swagger"}"#;
//! let options = DecodeOptions::new().strategy(DecodeStrategy::Optimized);
//! let swagger: Swagger = codec::decode(input, options)?;
//!
//! assert_eq!(swagger.props.swagger, "2.0");
//! assert_eq!(codec::encode(&swagger)?, input);
//! # Ok::<(), swagspec_core::Error>(())
//! ```

pub mod codec;
pub mod error;
pub mod object;
mod object_macros;
pub mod spec;
pub mod to_schema;

// Re-export main types at the crate root for convenience
pub use codec::{DecodeOptions, DecodeStrategy, decode, decode_str, encode, encode_to_string};
pub use error::{Error, ErrorKind, FieldPath, Result};
pub use object::{Extensible, PropertyGroup};
pub use spec::{
    ContactInfo, Definitions, Extensions, ExternalDocumentation, Header, Info, Items, License,
    Operation, Parameter, PathItem, Paths, Ref, Response, Responses, Schema, SchemaOrBool,
    SecurityRequirement, SecurityScheme, StringOrArray, Swagger, Tag, XmlObject,
};
pub use to_schema::{ToSchema, canonical_type_name};
