//! Swagger 2.0 specification types.
//!
//! This module provides the object model of a Swagger 2.0 document. Every object kind
//! is an extensible object: its declared fields and its `x-` vendor extensions are
//! presented as one flat JSON object.

use std::collections::BTreeMap;

use crate::{error::Result, object_macros::extensible_object, to_schema::ToSchema};

pub mod extensions;
pub mod external_docs;
pub mod header;
pub mod info;
pub mod items;
pub mod operation;
pub mod parameter;
pub mod paths;
pub mod reference;
pub mod response;
pub mod schema;
pub mod security;
pub mod tag;

pub use self::{
    extensions::{EXTENSION_PREFIX, Extensions, is_extension_key},
    external_docs::{ExternalDocumentation, ExternalDocumentationProps},
    header::{Header, HeaderProps},
    info::{ContactInfo, ContactInfoProps, Info, InfoProps, License, LicenseProps},
    items::{Items, ItemsProps},
    operation::{Operation, OperationProps},
    parameter::{Parameter, ParameterProps},
    paths::{PathItem, PathItemProps, Paths, is_path_key},
    reference::{REF_KEY, Ref},
    response::{DEFAULT_RESPONSE_KEY, Response, ResponseProps, Responses},
    schema::{Schema, SchemaOrBool, SchemaProps, StringOrArray, XmlObject, XmlObjectProps},
    security::{SecurityScheme, SecuritySchemeProps},
    tag::{Tag, TagProps},
};

/// The Swagger specification version written by [`Swagger::new`].
pub const SWAGGER_VERSION: &str = "2.0";

/// Names of the security schemes an operation requires, each with its scopes.
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

/// Data type definitions, by definition name.
pub type Definitions = BTreeMap<String, Schema>;

extensible_object! {
    /// The root object of a Swagger 2.0 specification document.
    ///
    /// This is the main entry point of a specification, containing the metadata, the
    /// paths and the reusable definitions of an API.
    pub struct Swagger;

    /// Declared fields of a [`Swagger`] document.
    pub struct SwaggerProps {
        "id" => id: String,
        /// MIME types the APIs can consume.
        "consumes" => consumes: Vec<String>,
        /// MIME types the APIs can produce.
        "produces" => produces: Vec<String>,
        /// The transfer protocols of the API.
        "schemes" => schemes: Vec<String>,
        /// The Swagger specification version being used.
        "swagger" => swagger: String,
        "info" => info: Option<Info>,
        /// The host (name or IP) serving the API.
        "host" => host: String,
        /// The base path on which the API is served, relative to the host.
        "basePath" => base_path: String,
        "paths" => paths: Option<Paths>,
        "definitions" => definitions: Definitions,
        /// Parameters that can be used across operations.
        "parameters" => parameters: BTreeMap<String, Parameter>,
        /// Responses that can be used across operations.
        "responses" => responses: BTreeMap<String, Response>,
        "securityDefinitions" => security_definitions: BTreeMap<String, SecurityScheme>,
        /// Security schemes applied to the whole API.
        "security" => security: Vec<SecurityRequirement>,
        "tags" => tags: Vec<Tag>,
        "externalDocs" => external_docs: Option<ExternalDocumentation>,
    }
}

impl Swagger {
    /// Creates a Swagger 2.0 document with the given info.
    pub fn new(info: Info) -> Self {
        let mut swagger = Self::default();
        swagger.props.swagger = SWAGGER_VERSION.to_owned();
        swagger.props.info = Some(info);
        swagger
    }

    /// Sets the host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.props.host = host.into();
        self
    }

    /// Sets the base path.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.props.base_path = base_path.into();
        self
    }

    /// Sets the paths.
    pub fn paths(mut self, paths: Paths) -> Self {
        self.props.paths = Some(paths);
        self
    }

    /// Adds a tag.
    pub fn tag(mut self, tag: Tag) -> Self {
        self.props.tags.push(tag);
        self
    }

    /// Registers a security scheme under `name`.
    pub fn security_definition(mut self, name: impl Into<String>, scheme: SecurityScheme) -> Self {
        self.props.security_definitions.insert(name.into(), scheme);
        self
    }

    /// Registers the schema of `T` under its canonical definition name and returns a
    /// reference to it.
    pub fn add_definition<T: ToSchema + ?Sized>(&mut self) -> Result<Ref> {
        let name = T::schema_name();
        let reference = Ref::definition(&name)?;
        tracing::trace!(name = %name, "registering definition");
        self.props.definitions.insert(name, T::schema());
        Ok(reference)
    }

    /// Returns the definition registered under `name`.
    pub fn definition(&self, name: &str) -> Option<&Schema> {
        self.props.definitions.get(name)
    }
}
