//! Security scheme entity.

use std::collections::BTreeMap;

use crate::object_macros::extensible_object;

/// Security scheme types, as written in the `type` field.
pub mod scheme_type {
    pub const BASIC: &str = "basic";
    pub const API_KEY: &str = "apiKey";
    pub const OAUTH2: &str = "oauth2";
}

/// OAuth2 flows, as written in the `flow` field.
pub mod flow {
    pub const IMPLICIT: &str = "implicit";
    pub const PASSWORD: &str = "password";
    pub const APPLICATION: &str = "application";
    pub const ACCESS_CODE: &str = "accessCode";
}

extensible_object! {
    /// Defines a security scheme that can be used by the operations.
    ///
    /// Supported schemes are basic authentication, an API key (either as a header or
    /// as a query parameter) and OAuth2's common flows.
    pub struct SecurityScheme;

    /// Declared fields of a [`SecurityScheme`].
    pub struct SecuritySchemeProps {
        /// The type of the security scheme, see [`scheme_type`]. Always encoded.
        "type" [always] => type_name: String,
        /// The location of the API key, `query` or `header`.
        "in" => location: String,
        /// The name of the header or query parameter to be used.
        "name" => name: String,
        "description" => description: String,
        /// The flow used by the OAuth2 security scheme, see [`flow`].
        "flow" => flow: String,
        "authorizationUrl" => authorization_url: String,
        "tokenUrl" => token_url: String,
        /// The available scopes for the OAuth2 security scheme, with descriptions.
        "scopes" => scopes: BTreeMap<String, String>,
    }
}

impl SecurityScheme {
    fn of_type(type_name: &str) -> Self {
        let mut scheme = Self::default();
        scheme.props.type_name = type_name.to_owned();
        scheme
    }

    /// Creates a basic authentication scheme.
    pub fn basic_auth() -> Self {
        Self::of_type(scheme_type::BASIC)
    }

    /// Creates an API key scheme reading `name` from `location`.
    pub fn api_key(name: impl Into<String>, location: impl Into<String>) -> Self {
        let mut scheme = Self::of_type(scheme_type::API_KEY);
        scheme.props.name = name.into();
        scheme.props.location = location.into();
        scheme
    }

    /// Creates an OAuth2 implicit flow scheme.
    pub fn oauth2_implicit(authorization_url: impl Into<String>) -> Self {
        let mut scheme = Self::of_type(scheme_type::OAUTH2);
        scheme.props.flow = flow::IMPLICIT.to_owned();
        scheme.props.authorization_url = authorization_url.into();
        scheme
    }

    /// Creates an OAuth2 password flow scheme.
    pub fn oauth2_password(token_url: impl Into<String>) -> Self {
        let mut scheme = Self::of_type(scheme_type::OAUTH2);
        scheme.props.flow = flow::PASSWORD.to_owned();
        scheme.props.token_url = token_url.into();
        scheme
    }

    /// Creates an OAuth2 application flow scheme.
    pub fn oauth2_application(token_url: impl Into<String>) -> Self {
        let mut scheme = Self::of_type(scheme_type::OAUTH2);
        scheme.props.flow = flow::APPLICATION.to_owned();
        scheme.props.token_url = token_url.into();
        scheme
    }

    /// Creates an OAuth2 access code flow scheme.
    pub fn oauth2_access_token(
        authorization_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        let mut scheme = Self::of_type(scheme_type::OAUTH2);
        scheme.props.flow = flow::ACCESS_CODE.to_owned();
        scheme.props.authorization_url = authorization_url.into();
        scheme.props.token_url = token_url.into();
        scheme
    }

    /// Adds an OAuth2 scope.
    pub fn scope(mut self, scope: impl Into<String>, description: impl Into<String>) -> Self {
        self.props.scopes.insert(scope.into(), description.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.props.description = description.into();
        self
    }
}
