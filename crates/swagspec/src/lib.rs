//! # swagspec
//!
//! Typed Swagger 2.0 documents with a canonical, extension-preserving JSON codec.
//!
//! This crate provides the main API for working with Swagger 2.0 specifications,
//! re-exporting all types from the `swagspec-core` crate.

#[doc(hidden)]
pub use swagspec_core;
// Re-export the modules for access to builders, codecs and internal types
pub use swagspec_core::{codec, error, object, spec, to_schema};
// Re-export all main types at the crate root for convenience
pub use swagspec_core::{
    ContactInfo, DecodeOptions, DecodeStrategy, Definitions, Error, ErrorKind, Extensible,
    Extensions, ExternalDocumentation, FieldPath, Header, Info, Items, License, Operation,
    Parameter, PathItem, Paths, PropertyGroup, Ref, Response, Responses, Result, Schema,
    SchemaOrBool, SecurityRequirement, SecurityScheme, StringOrArray, Swagger, Tag, ToSchema,
    XmlObject, canonical_type_name, decode, decode_str, encode, encode_to_string,
};
